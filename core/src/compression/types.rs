//! compression/types.rs
//! Codec identifiers, per-codec specs, the reference adapter trait and its error type.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::constants::*;
use crate::process::ProcessError;

/// Every codec family the harness knows how to exercise.
///
/// Declaration order is the order pipelines run for each corpus file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodecId {
    Gzip,
    Zstd,
    Lzma,
    Lz4,
    Lpaq8,
    ZipDeflate,
    ZipLzma,
}

impl CodecId {
    pub const ALL: [CodecId; 7] = [
        CodecId::Gzip,
        CodecId::Zstd,
        CodecId::Lzma,
        CodecId::Lz4,
        CodecId::Lpaq8,
        CodecId::ZipDeflate,
        CodecId::ZipLzma,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CodecId::Gzip       => codec_names::GZIP,
            CodecId::Zstd       => codec_names::ZSTD,
            CodecId::Lzma       => codec_names::LZMA,
            CodecId::Lz4        => codec_names::LZ4,
            CodecId::Lpaq8      => codec_names::LPAQ8,
            CodecId::ZipDeflate => codec_names::ZIP_DEFLATE,
            CodecId::ZipLzma    => codec_names::ZIP_LZMA,
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodecId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CodecId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CodecError::UnknownCodec(s.to_string()))
    }
}

/// Entropy coder selected on the subject command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubjectCodec {
    Gzip,
    Zstd,
    Lzma,
    Lz4,
    Lpaq8,
}

impl SubjectCodec {
    pub fn flag(&self) -> &'static str {
        match self {
            SubjectCodec::Gzip  => "--gzip",
            SubjectCodec::Zstd  => "--zstd",
            SubjectCodec::Lzma  => "--lzma",
            SubjectCodec::Lz4   => "--lz4",
            SubjectCodec::Lpaq8 => "--lpaq8",
        }
    }
}

/// Static description of one codec family.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CodecSpec {
    pub id: CodecId,
    pub default_level: i32,
    pub suffix: &'static str,
    pub subject_codec: SubjectCodec,
    /// ZIP variants: the subject wraps its stream in a container and the
    /// reference side only validates it.
    pub container: bool,
}

impl CodecSpec {
    pub const fn for_id(id: CodecId) -> CodecSpec {
        match id {
            CodecId::Gzip => CodecSpec {
                id, default_level: DEFAULT_LEVEL_GZIP, suffix: suffixes::GZIP,
                subject_codec: SubjectCodec::Gzip, container: false,
            },
            CodecId::Zstd => CodecSpec {
                id, default_level: DEFAULT_LEVEL_ZSTD, suffix: suffixes::ZSTD,
                subject_codec: SubjectCodec::Zstd, container: false,
            },
            CodecId::Lzma => CodecSpec {
                id, default_level: DEFAULT_LEVEL_LZMA, suffix: suffixes::LZMA,
                subject_codec: SubjectCodec::Lzma, container: false,
            },
            CodecId::Lz4 => CodecSpec {
                id, default_level: DEFAULT_LEVEL_LZ4, suffix: suffixes::LZ4,
                subject_codec: SubjectCodec::Lz4, container: false,
            },
            CodecId::Lpaq8 => CodecSpec {
                id, default_level: DEFAULT_LEVEL_LPAQ8, suffix: suffixes::LPAQ8,
                subject_codec: SubjectCodec::Lpaq8, container: false,
            },
            CodecId::ZipDeflate => CodecSpec {
                id, default_level: DEFAULT_LEVEL_ZIP, suffix: suffixes::ZIP,
                subject_codec: SubjectCodec::Gzip, container: true,
            },
            CodecId::ZipLzma => CodecSpec {
                id, default_level: DEFAULT_LEVEL_ZIP, suffix: suffixes::ZIP,
                subject_codec: SubjectCodec::Lzma, container: true,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }
}

/// One entry found while validating a container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerEntry {
    pub name: String,
    pub size: u64,
    pub crc32: u32,
}

/// Result of a successful container integrity scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerReport {
    pub entries: Vec<ContainerEntry>,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unknown codec identifier: {0:?}")]
    UnknownCodec(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("codec {codec} compress failed: {msg}")]
    Encode { codec: &'static str, msg: String },

    #[error("codec {codec} decompress failed: {msg}")]
    Decode { codec: &'static str, msg: String },

    #[error("container integrity failure ({entry}): {msg}")]
    ContainerIntegrity { entry: String, msg: String },

    #[error("reference tool failed: {0}")]
    Tool(#[from] ProcessError),

    #[error("reference scratch I/O error: {0}")]
    Scratch(#[from] std::io::Error),
}

impl CodecError {
    pub fn encode(codec: CodecId, msg: impl fmt::Display) -> Self {
        CodecError::Encode { codec: codec.as_str(), msg: msg.to_string() }
    }

    pub fn decode(codec: CodecId, msg: impl fmt::Display) -> Self {
        CodecError::Decode { codec: codec.as_str(), msg: msg.to_string() }
    }
}

/// Independently trusted implementation of one codec family.
///
/// Implementations hold configuration only; every call is a pure function of
/// its arguments.
pub trait ReferenceAdapter: Send {
    /// Compress `plain` at a codec-specific `level`.
    fn compress(&self, plain: &[u8], level: i32) -> Result<Vec<u8>, CodecError>;

    /// Decompress a complete artifact.
    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Scan a container artifact and verify every entry against its stored checksum.
    fn validate_container(&self, _artifact: &[u8]) -> Result<ContainerReport, CodecError> {
        Err(CodecError::UnsupportedFormat("container validation is only available for ZIP".into()))
    }
}
