//! runner/workspace.rs
//! Ephemeral directory holding the working copy and every artifact.
//!
//! Recreated once per run and left on disk afterwards for inspection.
//! One file is processed at a time, so the working name is shared by every
//! pipeline without locking.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::pipeline::InputFile;
use crate::types::HarnessError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
    working_name: String,
}

impl Workspace {
    /// Delete `root` if present, then create it empty.
    pub fn recreate(root: impl Into<PathBuf>, working_name: impl Into<String>) -> Result<Self, HarnessError> {
        let root = root.into();
        if root.exists() {
            fs::remove_dir_all(&root).map_err(|e| HarnessError::io(&root, e))?;
        }
        fs::create_dir_all(&root).map_err(|e| HarnessError::io(&root, e))?;
        Ok(Self { root, working_name: working_name.into() })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the working copy of the current input.
    pub fn working_path(&self) -> PathBuf {
        self.root.join(&self.working_name)
    }

    /// `<working name><suffix>`, e.g. `testfile.hex.lzma`.
    pub fn artifact_path(&self, suffix: &str) -> PathBuf {
        self.root.join(format!("{}{}", self.working_name, suffix))
    }

    /// Overwrite the working copy with `input`.
    pub fn stage(&self, input: &InputFile) -> Result<PathBuf, HarnessError> {
        let path = self.working_path();
        fs::write(&path, &input.bytes).map_err(|e| HarnessError::io(&path, e))?;
        Ok(path)
    }
}

/// Remove `path` so a step that claims success without writing output cannot
/// be judged on a stale file.
pub fn remove_if_exists(path: &Path) -> Result<(), HarnessError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(HarnessError::io(path, e)),
    }
}
