//! compression/codecs/mod.rs
//! Reference adapters, one per codec family.

pub mod deflate;
pub mod lpaq8;
pub mod lz4;
pub mod lzma;
pub mod zip;
pub mod zstd;

pub use deflate::*;
pub use lpaq8::*;
pub use self::lz4::*;
pub use lzma::*;
pub use self::zip::*;
pub use self::zstd::*;
