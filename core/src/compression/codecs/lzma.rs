//! codecs/lzma.rs
//! LZMA "alone" (`.lzma`) reference.
//!
//! Encoding always goes through liblzma (`xz2`) at the requested preset.
//! Decoding defaults to the official command-line decoder so the subject's
//! bit-stream is judged by a second, independent implementation; the library
//! decoder is available for hosts without that binary.
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use xz2::read::XzDecoder;
use xz2::stream::{LzmaOptions, Stream};
use xz2::write::XzEncoder;

use crate::compression::types::{CodecError, CodecId, ReferenceAdapter};
use crate::process::ReferenceTool;

/// Which implementation decodes `.lzma` artifacts on the reference side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LzmaDecodeBackend {
    #[default]
    Tool,
    Library,
}

enum Decoder {
    Tool(ReferenceTool),
    Library,
}

pub struct LzmaReference {
    decoder: Decoder,
}

impl LzmaReference {
    /// Library encoder, external tool decoder.
    pub fn with_tool(tool: ReferenceTool) -> Self {
        Self { decoder: Decoder::Tool(tool) }
    }

    /// Library for both directions.
    pub fn library() -> Self {
        Self { decoder: Decoder::Library }
    }

    pub fn backend(&self) -> LzmaDecodeBackend {
        match self.decoder {
            Decoder::Tool(_) => LzmaDecodeBackend::Tool,
            Decoder::Library => LzmaDecodeBackend::Library,
        }
    }
}

/// Encode `plain` as an LZMA-alone stream (unknown size + end marker).
pub fn lzma_alone_compress(plain: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
    let preset = u32::try_from(level)
        .map_err(|_| CodecError::encode(CodecId::Lzma, format!("negative preset {}", level)))?;
    let options = LzmaOptions::new_preset(preset)
        .map_err(|e| CodecError::encode(CodecId::Lzma, format!("preset {}: {}", preset, e)))?;
    let stream = Stream::new_lzma_encoder(&options)
        .map_err(|e| CodecError::encode(CodecId::Lzma, e))?;

    let mut enc = XzEncoder::new_stream(Vec::new(), stream);
    enc.write_all(plain)
        .map_err(|e| CodecError::encode(CodecId::Lzma, e))?;
    enc.finish()
        .map_err(|e| CodecError::encode(CodecId::Lzma, e))
}

pub fn lzma_alone_decompress(artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
    let stream = Stream::new_lzma_decoder(u64::MAX)
        .map_err(|e| CodecError::decode(CodecId::Lzma, e))?;
    let mut dec = XzDecoder::new_stream(artifact, stream);
    let mut plain = Vec::new();
    dec.read_to_end(&mut plain)
        .map_err(|e| CodecError::decode(CodecId::Lzma, e))?;
    Ok(plain)
}

impl ReferenceAdapter for LzmaReference {
    fn compress(&self, plain: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        lzma_alone_compress(plain, level)
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
        match &self.decoder {
            Decoder::Tool(tool) => tool.decompress_bytes(artifact),
            Decoder::Library => lzma_alone_decompress(artifact),
        }
    }
}
