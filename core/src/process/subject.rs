//! process/subject.rs
//! The implementation under test, reached through a fixed command-line grammar:
//!
//! `<subject> {-c|-d} {--gzip|--zstd|--lzma|--lz4|--lpaq8} [--zip] <input> <output>`
use std::ffi::OsString;
use std::path::PathBuf;

use crate::compression::SubjectCodec;
use crate::logger::Logger;
use crate::process::invoker::ProcessInvoker;
use crate::types::HarnessError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubjectMode {
    Compress,
    Decompress,
}

impl SubjectMode {
    pub fn flag(&self) -> &'static str {
        match self {
            SubjectMode::Compress => "-c",
            SubjectMode::Decompress => "-d",
        }
    }
}

/// One subject invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectRequest {
    pub mode: SubjectMode,
    pub codec: SubjectCodec,
    /// Wrap the stream in a ZIP container. Only honoured in compress mode.
    pub container: bool,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl SubjectRequest {
    pub fn compress(codec: SubjectCodec, container: bool, input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self { mode: SubjectMode::Compress, codec, container, input: input.into(), output: output.into() }
    }

    pub fn decompress(codec: SubjectCodec, input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self { mode: SubjectMode::Decompress, codec, container: false, input: input.into(), output: output.into() }
    }

    /// Render the argument vector in the fixed grammar order.
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![self.mode.flag().into(), self.codec.flag().into()];
        if self.container && self.mode == SubjectMode::Compress {
            args.push("--zip".into());
        }
        args.push(self.input.clone().into_os_string());
        args.push(self.output.clone().into_os_string());
        args
    }
}

/// Seam between the pipeline and whatever plays the subject role.
pub trait Subject {
    fn invoke(&self, request: &SubjectRequest) -> Result<(), HarnessError>;
}

/// Production subject: an external program launched once per request.
pub struct ProcessSubject<'a> {
    invoker: ProcessInvoker,
    logger: &'a dyn Logger,
}

impl<'a> ProcessSubject<'a> {
    pub fn new(invoker: ProcessInvoker, logger: &'a dyn Logger) -> Self {
        Self { invoker, logger }
    }
}

impl Subject for ProcessSubject<'_> {
    fn invoke(&self, request: &SubjectRequest) -> Result<(), HarnessError> {
        let args = request.to_args();
        self.logger.verbose(&format!("[SUBJECT] {}", self.invoker.display_command(&args)));

        let output = self.invoker.run(&args)?;
        if !output.stdout.is_empty() {
            self.logger.debug(&format!("[SUBJECT] stdout: {}", String::from_utf8_lossy(&output.stdout).trim_end()));
        }
        if !output.stderr.is_empty() {
            self.logger.debug(&format!("[SUBJECT] stderr: {}", String::from_utf8_lossy(&output.stderr).trim_end()));
        }
        Ok(())
    }
}
