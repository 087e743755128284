//! pipeline/mod.rs
//! Round-trip verification pipeline: action plans, the engine that executes
//! them, and the byte-equality oracle gating every decompress.

pub mod engine;
pub mod oracle;
pub mod plan;
pub mod types;

pub use engine::*;
pub use oracle::{compare, ensure_identical, ContentMismatch};
pub use plan::plan;
pub use types::*;
