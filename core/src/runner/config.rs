//! runner/config.rs
//! Harness configuration.
//!
//! Passed explicitly to the run controller; nothing in the crate reads
//! process-wide paths or executable names. Loadable from JSON, every field
//! optional with defaults from `crate::constants`.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::{CodecId, LzmaDecodeBackend, ReferenceToolset};
use crate::constants::*;
use crate::process::{ProcessInvoker, ReferenceTool};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// An external program plus fixed leading arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    pub program: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn invoker(&self) -> ProcessInvoker {
        ProcessInvoker::new(&self.program).with_leading_args(self.args.iter().cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    pub corpus_dir: PathBuf,
    pub workspace_dir: PathBuf,
    pub working_name: String,
    pub subject: CommandConfig,
    pub lzma_tool: CommandConfig,
    pub lpaq8_tool: CommandConfig,
    pub lzma_decoder: LzmaDecodeBackend,
    /// Overrides every reference-compress level when set.
    pub level: Option<i32>,
    /// Empty means every registered codec.
    pub codecs: Vec<CodecId>,
    /// Record failures and carry on instead of aborting on the first one.
    pub keep_going: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::new(),
            workspace_dir: PathBuf::from(DEFAULT_WORKSPACE_DIR),
            working_name: DEFAULT_WORKING_NAME.to_string(),
            subject: CommandConfig::new(DEFAULT_SUBJECT),
            lzma_tool: CommandConfig::new(DEFAULT_LZMA_TOOL),
            lpaq8_tool: CommandConfig::new(DEFAULT_LPAQ8_TOOL),
            lzma_decoder: LzmaDecodeBackend::default(),
            level: None,
            codecs: Vec::new(),
            keep_going: false,
        }
    }
}

impl HarnessConfig {
    pub fn new(corpus_dir: impl Into<PathBuf>) -> Self {
        Self { corpus_dir: corpus_dir.into(), ..Self::default() }
    }

    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_json_str(&json, path)
    }

    pub fn with_corpus_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.corpus_dir = dir.into();
        self
    }

    pub fn with_workspace_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workspace_dir = dir.into();
        self
    }

    pub fn with_working_name(mut self, name: impl Into<String>) -> Self {
        self.working_name = name.into();
        self
    }

    pub fn with_subject(mut self, subject: CommandConfig) -> Self {
        self.subject = subject;
        self
    }

    pub fn with_lzma_tool(mut self, tool: CommandConfig) -> Self {
        self.lzma_tool = tool;
        self
    }

    pub fn with_lpaq8_tool(mut self, tool: CommandConfig) -> Self {
        self.lpaq8_tool = tool;
        self
    }

    pub fn with_lzma_decoder(mut self, backend: LzmaDecodeBackend) -> Self {
        self.lzma_decoder = backend;
        self
    }

    pub fn with_level(mut self, level: Option<i32>) -> Self {
        self.level = level;
        self
    }

    pub fn with_codecs(mut self, codecs: Vec<CodecId>) -> Self {
        self.codecs = codecs;
        self
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Codecs to run, in fixed registry order, without duplicates.
    pub fn selected_codecs(&self) -> Vec<CodecId> {
        if self.codecs.is_empty() {
            return CodecId::ALL.to_vec();
        }
        let mut selected = self.codecs.clone();
        selected.sort();
        selected.dedup();
        selected
    }

    pub fn toolset(&self) -> ReferenceToolset {
        ReferenceToolset {
            lzma: ReferenceTool::new(self.lzma_tool.invoker()),
            lpaq8: ReferenceTool::new(self.lpaq8_tool.invoker()),
            lzma_backend: self.lzma_decoder,
        }
    }

    pub fn subject_invoker(&self) -> ProcessInvoker {
        self.subject.invoker()
    }
}
