//! compression/mod.rs
//! Reference side of the harness.
//!
//! Notes:
//! - Codec ids are a closed enumeration; behaviour is never inferred from a
//!   file name at the call site.
//! - Adapters are stateless and may be called any number of times.
//! - The registry resolves codec ids to (spec, adapter) pairs.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use registry::*;
pub use codecs::LzmaDecodeBackend;
