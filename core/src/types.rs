use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::compression::CodecError;
use crate::pipeline::oracle::ContentMismatch;
use crate::process::ProcessError;

/// Unified harness error covering usage, external processes, codecs, the
/// oracle and workspace I/O.
/// - `From<T>` impls enable `?` from every layer up to the run controller.
/// - `kind()` names the failure class for the final diagnostic.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error("external process failure: {0}")]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Mismatch(#[from] ContentMismatch),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HarnessError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        HarnessError::Io { path: path.as_ref().to_path_buf(), source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HarnessError::Usage(_) => ErrorKind::Usage,
            HarnessError::Process(_) => ErrorKind::ExternalProcessFailure,
            HarnessError::Codec(e) => match e {
                CodecError::UnknownCodec(_) => ErrorKind::Usage,
                CodecError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
                CodecError::Encode { .. } => ErrorKind::EncodeError,
                CodecError::Decode { .. } => ErrorKind::DecodeError,
                CodecError::ContainerIntegrity { .. } => ErrorKind::ContainerIntegrityFailure,
                CodecError::Tool(_) => ErrorKind::ExternalProcessFailure,
                CodecError::Scratch(_) => ErrorKind::Io,
            },
            HarnessError::Mismatch(_) => ErrorKind::ContentMismatch,
            HarnessError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Failure classes reported to the user.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    ExternalProcessFailure,
    EncodeError,
    DecodeError,
    UnsupportedFormat,
    ContentMismatch,
    ContainerIntegrityFailure,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Usage => "UsageError",
            ErrorKind::ExternalProcessFailure => "ExternalProcessFailure",
            ErrorKind::EncodeError => "EncodeError",
            ErrorKind::DecodeError => "DecodeError",
            ErrorKind::UnsupportedFormat => "UnsupportedFormat",
            ErrorKind::ContentMismatch => "ContentMismatch",
            ErrorKind::ContainerIntegrityFailure => "ContainerIntegrityFailure",
            ErrorKind::Io => "IoError",
        };
        f.write_str(name)
    }
}
