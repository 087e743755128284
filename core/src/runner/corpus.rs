//! runner/corpus.rs
//! Directory of sample inputs.
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::HarnessError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    root: PathBuf,
}

impl Corpus {
    /// `None` when `root` is missing or not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Option<Self> {
        let root = root.into();
        if root.is_dir() { Some(Self { root }) } else { None }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Regular files directly under the root, sorted by name.
    /// Subdirectories and other non-files are skipped; symlinks to files count.
    pub fn files(&self) -> Result<Vec<PathBuf>, HarnessError> {
        let entries = fs::read_dir(&self.root).map_err(|e| HarnessError::io(&self.root, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| HarnessError::io(&self.root, e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}
