//! pipeline/types.rs
//! Actions, per-pipeline state and outcomes.
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::compression::{CodecId, ContainerReport};
use crate::types::HarnessError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Compress,
    Decompress,
    ValidateContainer,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Actor {
    Subject,
    Reference,
}

/// One step of a codec pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub actor: Actor,
    /// Only meaningful for reference compression; the subject picks its own level.
    pub level: Option<i32>,
}

impl Action {
    pub fn compress(actor: Actor, level: Option<i32>) -> Self {
        Self { kind: ActionKind::Compress, actor, level }
    }

    pub fn decompress(actor: Actor) -> Self {
        Self { kind: ActionKind::Decompress, actor, level: None }
    }

    pub fn validate_container() -> Self {
        Self { kind: ActionKind::ValidateContainer, actor: Actor::Reference, level: None }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actor = match self.actor {
            Actor::Subject => "subject",
            Actor::Reference => "reference",
        };
        let kind = match self.kind {
            ActionKind::Compress => "compress",
            ActionKind::Decompress => "decompress",
            ActionKind::ValidateContainer => "validate-container",
        };
        write!(f, "{} {}", actor, kind)?;
        if let Some(level) = self.level {
            write!(f, " (level {})", level)?;
        }
        Ok(())
    }
}

/// A corpus file, read once and never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self { path: path.into(), bytes }
    }

    pub fn read(path: &Path) -> Result<Self, HarnessError> {
        let bytes = fs::read(path).map_err(|e| HarnessError::io(path, e))?;
        Ok(Self::new(path, bytes))
    }
}

/// State threaded through one (file, codec) pipeline.
#[derive(Debug)]
pub struct PipelineState {
    /// Content of the working file as of the last action that wrote it.
    pub current_plain: Vec<u8>,
    pub plain_path: PathBuf,
    pub artifact_path: PathBuf,
}

impl PipelineState {
    pub fn new(input: &InputFile, plain_path: PathBuf, artifact_path: PathBuf) -> Self {
        Self { current_plain: input.bytes.clone(), plain_path, artifact_path }
    }
}

/// Successful pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub codec: CodecId,
    pub actions_run: usize,
    /// Filled in by a container validation step.
    pub container: Option<ContainerReport>,
}

/// Failed pipeline: which file, which codec, which step, and why.
#[derive(Debug, Error)]
#[error(
    "{} [{codec}] step {} ({action}) failed with {}: {error}",
    .file.display(),
    .action_index + 1,
    .error.kind()
)]
pub struct StepFailure {
    pub file: PathBuf,
    pub codec: CodecId,
    /// Zero-based index into the codec's action list.
    pub action_index: usize,
    pub action: Action,
    #[source]
    pub error: HarnessError,
}
