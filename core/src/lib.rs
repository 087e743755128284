//! conformance-core
//!
//! Cross-implementation codec conformance harness.
//! Drives an external codec under test and a set of reference codecs through
//! fixed round-trip pipelines, comparing every decoded buffer byte for byte.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod logger;
pub mod types;
pub mod utils;

// Reference codecs and external processes
pub mod compression;
pub mod process;

// Verification
pub mod pipeline;
pub mod runner;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{CodecId, CodecRegistry, LzmaDecodeBackend, ReferenceAdapter, ReferenceToolset};
    pub use crate::logger::{Logger, NullLogger, StderrLogger, Verbosity};
    pub use crate::pipeline::{Action, InputFile, PipelineEngine, PipelineReport, StepFailure};
    pub use crate::process::{ProcessInvoker, ProcessSubject, Subject, SubjectRequest};
    pub use crate::runner::{CommandConfig, HarnessConfig, RunController, RunError, RunReport, Workspace};
    pub use crate::types::{ErrorKind, HarnessError};
}
