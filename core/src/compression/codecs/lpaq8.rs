//! codecs/lpaq8.rs
//! LPAQ8 reference. There is no library binding; both directions shell out
//! to the official command-line coder.

use crate::compression::types::{CodecError, ReferenceAdapter};
use crate::process::ReferenceTool;

pub struct Lpaq8Reference {
    tool: ReferenceTool,
}

impl Lpaq8Reference {
    pub fn new(tool: ReferenceTool) -> Self {
        Self { tool }
    }
}

impl ReferenceAdapter for Lpaq8Reference {
    fn compress(&self, plain: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
        self.tool.compress_bytes(plain, level)
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.tool.decompress_bytes(artifact)
    }
}
