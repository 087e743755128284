//! codecs/lz4.rs
//! LZ4 frame-format reference.
//!
//! The `lz4` binding is used for encoding because it honours the level;
//! decoding goes through the pure-Rust `lz4_flex` frame decoder.
use std::io::{Read, Write};

use lz4_flex::frame::FrameDecoder;

use crate::compression::types::{CodecError, CodecId, ReferenceAdapter};

pub struct Lz4Reference;

impl Lz4Reference {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Lz4Reference {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceAdapter for Lz4Reference {
    fn compress(&self, plain: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        let level = u32::try_from(level)
            .map_err(|_| CodecError::encode(CodecId::Lz4, format!("negative level {}", level)))?;
        let mut enc = lz4::EncoderBuilder::new()
            .level(level)
            .build(Vec::new())
            .map_err(|e| CodecError::encode(CodecId::Lz4, e))?;
        enc.write_all(plain)
            .map_err(|e| CodecError::encode(CodecId::Lz4, e))?;
        let (out, result) = enc.finish();
        result.map_err(|e| CodecError::encode(CodecId::Lz4, e))?;
        Ok(out)
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut dec = FrameDecoder::new(artifact);
        let mut plain = Vec::new();
        dec.read_to_end(&mut plain)
            .map_err(|e| CodecError::decode(CodecId::Lz4, e))?;
        Ok(plain)
    }
}
