//! Gzip (deflate) reference via flate2.

use std::io::{Read, Write};
use flate2::{Compression, read::MultiGzDecoder, write::GzEncoder};

use crate::compression::types::{CodecError, CodecId, ReferenceAdapter};

pub struct GzipReference;

impl GzipReference {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GzipReference {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceAdapter for GzipReference {
    fn compress(&self, plain: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        let lvl = match level {
            0..=9 => Compression::new(level as u32),
            other => return Err(CodecError::encode(CodecId::Gzip, format!("level {} outside 0..=9", other))),
        };
        let mut enc = GzEncoder::new(Vec::new(), lvl);
        enc.write_all(plain)
            .map_err(|e| CodecError::encode(CodecId::Gzip, e))?;
        enc.finish()
            .map_err(|e| CodecError::encode(CodecId::Gzip, e))
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
        // Multi-member aware, like `gzip -d`.
        let mut dec = MultiGzDecoder::new(artifact);
        let mut plain = Vec::new();
        dec.read_to_end(&mut plain)
            .map_err(|e| CodecError::decode(CodecId::Gzip, e))?;
        Ok(plain)
    }
}
