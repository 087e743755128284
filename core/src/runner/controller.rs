//! runner/controller.rs
//! Top-level driver: corpus in, verdict out.
//!
//! Walks the corpus one file at a time and runs every selected codec
//! pipeline against it. Fail-fast unless the config asks to keep going.
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::compression::{CodecId, CodecRegistry};
use crate::logger::Logger;
use crate::pipeline::{InputFile, PipelineEngine, StepFailure};
use crate::process::Subject;
use crate::runner::config::HarnessConfig;
use crate::runner::corpus::Corpus;
use crate::runner::workspace::Workspace;
use crate::types::{ErrorKind, HarnessError};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("usage error: {0}")]
    Usage(String),

    /// Failure outside any pipeline (workspace setup, corpus listing).
    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error(transparent)]
    Failed(Box<StepFailure>),
}

impl RunError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::Usage(_) => ErrorKind::Usage,
            RunError::Harness(e) => e.kind(),
            RunError::Failed(f) => f.error.kind(),
        }
    }
}

/// Totals for a completed run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub files_passed: usize,
    pub pipelines_run: usize,
    pub actions_run: usize,
    /// Only populated in keep-going mode.
    pub failures: Vec<StepFailure>,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct RunController<'a> {
    config: HarnessConfig,
    registry: &'a CodecRegistry,
    subject: &'a dyn Subject,
    logger: &'a dyn Logger,
}

impl<'a> RunController<'a> {
    pub fn new(
        config: HarnessConfig,
        registry: &'a CodecRegistry,
        subject: &'a dyn Subject,
        logger: &'a dyn Logger,
    ) -> Self {
        Self { config, registry, subject, logger }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn run(&self) -> Result<RunReport, RunError> {
        let corpus = self.open_corpus()?;
        let workspace = Workspace::recreate(&self.config.workspace_dir, self.config.working_name.clone())?;
        let files = corpus.files()?;
        let codecs = self.config.selected_codecs();

        self.logger.verbose(&format!(
            "[RUN] {} file(s) from {}, codecs: {}",
            files.len(),
            corpus.root().display(),
            codecs.iter().map(CodecId::as_str).collect::<Vec<_>>().join(", ")
        ));

        let engine = PipelineEngine::new(self.registry, self.subject, self.logger)
            .with_level_override(self.config.level);
        let mut report = RunReport::default();

        for path in &files {
            let input = InputFile::read(path)?;
            let mut file_ok = true;

            for &codec in &codecs {
                report.pipelines_run += 1;
                match engine.run(&input, codec, &workspace) {
                    Ok(pipeline) => report.actions_run += pipeline.actions_run,
                    Err(failure) => {
                        report.actions_run += failure.action_index;
                        self.logger.info(&format!("***Error {}", failure));
                        if !self.config.keep_going {
                            return Err(RunError::Failed(Box::new(failure)));
                        }
                        file_ok = false;
                        report.failures.push(failure);
                    }
                }
            }

            if file_ok {
                report.files_passed += 1;
                self.logger.info(&format!("=== {} test passed ===", path.display()));
            }
        }

        if report.passed() {
            self.logger.info("=== all test passed ===");
        } else {
            self.logger.info(&format!(
                "=== {} failure(s) across {} file(s) ===",
                report.failures.len(),
                files.len() - report.files_passed
            ));
        }
        Ok(report)
    }

    fn open_corpus(&self) -> Result<Corpus, RunError> {
        let dir = &self.config.corpus_dir;
        if dir.as_os_str().is_empty() {
            return Err(RunError::Usage("no corpus directory given".to_string()));
        }
        let corpus = Corpus::open(dir).ok_or_else(|| {
            RunError::Usage(format!("input directory {} does not exist", dir.display()))
        })?;
        if within_directory(dir, &self.config.workspace_dir) {
            return Err(RunError::Usage(format!(
                "corpus directory {} lies inside the workspace {}; it would be wiped",
                dir.display(),
                self.config.workspace_dir.display()
            )));
        }
        Ok(corpus)
    }
}

/// True when `inner` is `outer` or sits anywhere below it.
fn within_directory(inner: &Path, outer: &Path) -> bool {
    match (canonical(inner), canonical(outer)) {
        (Some(inner), Some(outer)) => inner.starts_with(outer),
        _ => false,
    }
}

fn canonical(path: &Path) -> Option<PathBuf> {
    fs::canonicalize(path).ok()
}
