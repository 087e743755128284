//! compression/constants.rs
//! Stable codec identifiers, artifact suffixes and reference levels.

/// Codec identifiers as they appear on the command line and in config files.
pub mod codec_names {
    pub const GZIP: &str        = "gzip";
    pub const ZSTD: &str        = "zstd";
    pub const LZMA: &str        = "lzma";
    pub const LZ4: &str         = "lz4";
    pub const LPAQ8: &str       = "lpaq8";
    pub const ZIP_DEFLATE: &str = "zip-deflate";
    pub const ZIP_LZMA: &str    = "zip-lzma";
}

/// Artifact file suffixes (appended to the working file name).
pub mod suffixes {
    pub const GZIP: &str  = ".gz";
    pub const ZSTD: &str  = ".zst";
    pub const LZMA: &str  = ".lzma";
    pub const LZ4: &str   = ".lz4";
    pub const LPAQ8: &str = ".lpaq8";
    pub const ZIP: &str   = ".zip";
}

/// Default levels used when the reference side compresses.
pub const DEFAULT_LEVEL_GZIP: i32  = 9;
pub const DEFAULT_LEVEL_ZSTD: i32  = 9;
pub const DEFAULT_LEVEL_LZMA: i32  = 4;
pub const DEFAULT_LEVEL_LZ4: i32   = 5;
pub const DEFAULT_LEVEL_LPAQ8: i32 = 3;
/// Containers are only ever produced by the subject.
pub const DEFAULT_LEVEL_ZIP: i32   = 0;
