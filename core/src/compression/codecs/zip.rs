//! codecs/zip.rs
//! ZIP container reference: integrity validation only.
//!
//! Every entry is fully inflated and its CRC-32 recomputed against the value
//! stored in the central directory. The reference side never produces ZIP
//! artifacts, and never extracts them for plaintext comparison.
use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::compression::types::{CodecError, CodecId, ContainerEntry, ContainerReport, ReferenceAdapter};
use crate::utils::compute_checksum;

const ARCHIVE: &str = "<archive>";

pub struct ZipReference {
    id: CodecId,
}

impl ZipReference {
    pub fn new(id: CodecId) -> Self {
        Self { id }
    }
}

fn integrity(entry: impl Into<String>, msg: impl std::fmt::Display) -> CodecError {
    CodecError::ContainerIntegrity { entry: entry.into(), msg: msg.to_string() }
}

/// Open `artifact` as a ZIP archive and verify each entry's content against its stored CRC.
pub fn validate_zip(artifact: &[u8]) -> Result<ContainerReport, CodecError> {
    let mut archive = ZipArchive::new(Cursor::new(artifact))
        .map_err(|e| integrity(ARCHIVE, e))?;
    if archive.is_empty() {
        return Err(integrity(ARCHIVE, "archive has no entries"));
    }

    let mut report = ContainerReport::default();
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| integrity(format!("entry #{}", index), e))?;
        let name = entry.name().to_string();
        let stored_crc = entry.crc32();
        let declared_size = entry.size();

        // The zip reader also checks the CRC at EOF; a mismatch surfaces here as a read error.
        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|e| integrity(name.as_str(), e))?;

        if content.len() as u64 != declared_size {
            return Err(integrity(
                name,
                format!("declared size {} but inflated {} bytes", declared_size, content.len()),
            ));
        }
        let actual_crc = compute_checksum(&content);
        if actual_crc != stored_crc {
            return Err(integrity(
                name,
                format!("stored crc32 {:08x} != computed {:08x}", stored_crc, actual_crc),
            ));
        }

        report.entries.push(ContainerEntry { name, size: declared_size, crc32: stored_crc });
    }
    Ok(report)
}

impl ReferenceAdapter for ZipReference {
    fn compress(&self, _plain: &[u8], _level: i32) -> Result<Vec<u8>, CodecError> {
        Err(CodecError::encode(self.id, "containers are produced by the subject only"))
    }

    fn decompress(&self, _artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
        Err(CodecError::UnsupportedFormat(format!(
            "{} artifacts are validated as containers, not decompressed",
            self.id
        )))
    }

    fn validate_container(&self, artifact: &[u8]) -> Result<ContainerReport, CodecError> {
        validate_zip(artifact)
    }
}
