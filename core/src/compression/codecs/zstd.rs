//! src/compression/codecs/zstd.rs
//!
//! Zstandard reference.
//!
//! Design notes:
//! - Uses the streaming helpers so the output is a regular framed `.zst`
//!   file, not the raw block API. The frame carries no content size.
//! - Errors are mapped into `CodecError` variants with codec context.

use crate::compression::types::{CodecError, CodecId, ReferenceAdapter};

pub struct ZstdReference;

impl ZstdReference {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZstdReference {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceAdapter for ZstdReference {
    fn compress(&self, plain: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        zstd::stream::encode_all(plain, level)
            .map_err(|e| CodecError::encode(CodecId::Zstd, e))
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
        zstd::stream::decode_all(artifact)
            .map_err(|e| CodecError::decode(CodecId::Zstd, e))
    }
}
