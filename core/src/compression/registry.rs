//! compression/registry.rs
//! Codec registry: codec id -> (spec, reference adapter).

use std::collections::BTreeMap;
use std::path::Path;

use crate::compression::codecs::{
    GzipReference, Lpaq8Reference, Lz4Reference, LzmaDecodeBackend, LzmaReference, ZipReference, ZstdReference,
};
use crate::compression::types::{CodecError, CodecId, CodecSpec, ReferenceAdapter};
use crate::process::ReferenceTool;

/// External executables backing the reference side.
#[derive(Debug, Clone)]
pub struct ReferenceToolset {
    pub lzma: ReferenceTool,
    pub lpaq8: ReferenceTool,
    pub lzma_backend: LzmaDecodeBackend,
}

pub struct RegisteredCodec {
    pub spec: CodecSpec,
    adapter: Box<dyn ReferenceAdapter>,
}

impl RegisteredCodec {
    pub fn adapter(&self) -> &dyn ReferenceAdapter {
        self.adapter.as_ref()
    }
}

pub struct CodecRegistry {
    codecs: BTreeMap<CodecId, RegisteredCodec>,
}

impl CodecRegistry {
    /// Registry with every codec family wired to its standard reference.
    pub fn standard(tools: &ReferenceToolset) -> Self {
        let lzma = match tools.lzma_backend {
            LzmaDecodeBackend::Tool => LzmaReference::with_tool(tools.lzma.clone()),
            LzmaDecodeBackend::Library => LzmaReference::library(),
        };

        Self { codecs: BTreeMap::new() }
            .with_adapter(CodecId::Gzip, Box::new(GzipReference::new()))
            .with_adapter(CodecId::Zstd, Box::new(ZstdReference::new()))
            .with_adapter(CodecId::Lzma, Box::new(lzma))
            .with_adapter(CodecId::Lz4, Box::new(Lz4Reference::new()))
            .with_adapter(CodecId::Lpaq8, Box::new(Lpaq8Reference::new(tools.lpaq8.clone())))
            .with_adapter(CodecId::ZipDeflate, Box::new(ZipReference::new(CodecId::ZipDeflate)))
            .with_adapter(CodecId::ZipLzma, Box::new(ZipReference::new(CodecId::ZipLzma)))
    }

    /// Register (or replace) the adapter for `id`.
    pub fn with_adapter(mut self, id: CodecId, adapter: Box<dyn ReferenceAdapter>) -> Self {
        self.codecs.insert(id, RegisteredCodec { spec: CodecSpec::for_id(id), adapter });
        self
    }

    pub fn get(&self, id: CodecId) -> Result<&RegisteredCodec, CodecError> {
        self.codecs
            .get(&id)
            .ok_or_else(|| CodecError::UnsupportedFormat(format!("no reference registered for {}", id)))
    }

    /// Registered codecs in their fixed run order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCodec> {
        self.codecs.values()
    }

    pub fn ids(&self) -> Vec<CodecId> {
        self.codecs.keys().copied().collect()
    }

    /// Map an artifact file name to the codec that owns its suffix.
    pub fn resolve_suffix(&self, artifact: &Path) -> Result<CodecId, CodecError> {
        let name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        self.codecs
            .values()
            .find(|c| name.ends_with(c.spec.suffix))
            .map(|c| c.spec.id)
            .ok_or_else(|| CodecError::UnsupportedFormat(format!("no codec for artifact {}", artifact.display())))
    }
}
