//! process/invoker.rs
//! Structured process launcher shared by the subject and the external reference tools.
//!
//! Arguments are passed as a vector straight to the OS; nothing goes through a
//! shell, so paths with spaces or metacharacters arrive verbatim.
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::utils::tail_lossy;

/// Bytes of captured stderr kept in an error for diagnostics.
pub const STDERR_TAIL_BYTES: usize = 2048;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` {}{}", describe_exit(.code), stderr_suffix(.stderr_tail))]
    Exit {
        program: String,
        /// `None` when the process was terminated by a signal.
        code: Option<i32>,
        stderr_tail: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exited with code {}", c),
        None => "terminated abnormally (no exit code)".to_string(),
    }
}

fn stderr_suffix(tail: &str) -> String {
    let tail = tail.trim();
    if tail.is_empty() { String::new() } else { format!("; stderr: {}", tail) }
}

/// Captured output of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// A program plus fixed leading arguments (e.g. `wine tinyZZZ.exe`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInvoker {
    program: PathBuf,
    leading_args: Vec<OsString>,
}

impl ProcessInvoker {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), leading_args: Vec::new() }
    }

    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Human-readable command line, for logs only. Never executed.
    pub fn display_command<S: AsRef<OsStr>>(&self, args: &[S]) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.leading_args.iter().map(|a| a.as_os_str()))
            .chain(args.iter().map(|a| a.as_ref()))
            .map(|a| {
                let s = a.to_string_lossy();
                if s.is_empty() || s.chars().any(char::is_whitespace) {
                    format!("\"{}\"", s)
                } else {
                    s.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion, blocking. Any non-zero or abnormal exit is an error.
    pub fn run<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<ProcessOutput, ProcessError> {
        let program = self.program.display().to_string();
        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProcessError::Spawn { program: program.clone(), source })?;

        if !output.status.success() {
            return Err(ProcessError::Exit {
                program,
                code: output.status.code(),
                stderr_tail: tail_lossy(&output.stderr, STDERR_TAIL_BYTES),
            });
        }

        Ok(ProcessOutput { stdout: output.stdout, stderr: output.stderr })
    }
}
