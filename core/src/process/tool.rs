//! process/tool.rs
//! External reference executables (official LZMA / LPAQ8 command-line coders).
//!
//! Grammar:
//! - compress:   `<tool> <level> <input> <output>`
//! - decompress: `<tool> d <input> <output>`
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use crate::compression::CodecError;
use crate::process::invoker::ProcessInvoker;

const SCRATCH_PREFIX: &str = "conformance-ref-";
const SCRATCH_INPUT: &str = "input.bin";
const SCRATCH_OUTPUT: &str = "output.bin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTool {
    invoker: ProcessInvoker,
}

impl ReferenceTool {
    pub fn new(invoker: ProcessInvoker) -> Self {
        Self { invoker }
    }

    pub fn invoker(&self) -> &ProcessInvoker {
        &self.invoker
    }

    pub fn compress_file(&self, level: i32, input: &Path, output: &Path) -> Result<(), CodecError> {
        let args: Vec<OsString> = vec![level.to_string().into(), input.into(), output.into()];
        self.invoker.run(&args)?;
        Ok(())
    }

    pub fn decompress_file(&self, input: &Path, output: &Path) -> Result<(), CodecError> {
        let args: Vec<OsString> = vec!["d".into(), input.into(), output.into()];
        self.invoker.run(&args)?;
        Ok(())
    }

    pub fn compress_bytes(&self, plain: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        self.staged(plain, |input, output| self.compress_file(level, input, output))
    }

    pub fn decompress_bytes(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.staged(artifact, |input, output| self.decompress_file(input, output))
    }

    /// Stage `data` into a private scratch directory, run the tool, collect its
    /// output. The directory is removed when this returns.
    fn staged<F>(&self, data: &[u8], run: F) -> Result<Vec<u8>, CodecError>
    where
        F: FnOnce(&Path, &Path) -> Result<(), CodecError>,
    {
        let scratch = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;
        let input = scratch.path().join(SCRATCH_INPUT);
        let output = scratch.path().join(SCRATCH_OUTPUT);
        fs::write(&input, data)?;
        run(&input, &output)?;
        Ok(fs::read(&output)?)
    }
}
