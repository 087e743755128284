// Shared fixtures for the integration tests.
//
// * in-process subject built on the reference libraries
// * registry that needs no external executables
// * /bin/sh stand-ins for external tools
#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use conformance_core::compression::codecs::{
    lzma_alone_compress, lzma_alone_decompress, GzipReference, Lz4Reference, ZstdReference,
};
use conformance_core::compression::{
    CodecError, CodecId, CodecRegistry, LzmaDecodeBackend, ReferenceAdapter, ReferenceToolset, SubjectCodec,
};
use conformance_core::process::{ProcessInvoker, ReferenceTool, Subject, SubjectMode, SubjectRequest};
use conformance_core::types::HarnessError;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

// ------------------------------------------------------------
// Inputs
// ------------------------------------------------------------

/// 0x00..=0xFF repeated 16 times.
pub fn pattern_bytes() -> Vec<u8> {
    (0..16).flat_map(|_| 0u8..=255).collect()
}

pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}

pub fn write_corpus(dir: &Path, files: &[(&str, &[u8])]) {
    fs::create_dir_all(dir).unwrap();
    for (name, bytes) in files {
        fs::write(dir.join(name), bytes).unwrap();
    }
}

// ------------------------------------------------------------
// Reference side
// ------------------------------------------------------------

/// Lpaq8 has no library binding; tests stand in a copy-through coder.
pub struct IdentityAdapter;

impl ReferenceAdapter for IdentityAdapter {
    fn compress(&self, plain: &[u8], _level: i32) -> Result<Vec<u8>, CodecError> {
        Ok(plain.to_vec())
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(artifact.to_vec())
    }
}

pub fn library_toolset() -> ReferenceToolset {
    ReferenceToolset {
        lzma: ReferenceTool::new(ProcessInvoker::new("/nonexistent/lzma")),
        lpaq8: ReferenceTool::new(ProcessInvoker::new("/nonexistent/lpaq8")),
        lzma_backend: LzmaDecodeBackend::Library,
    }
}

/// Every codec, no external executables.
pub fn library_registry() -> CodecRegistry {
    CodecRegistry::standard(&library_toolset()).with_adapter(CodecId::Lpaq8, Box::new(IdentityAdapter))
}

// ------------------------------------------------------------
// Subject side
// ------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fault {
    /// Flip the last byte of whatever the subject compresses with this codec.
    CorruptArtifact(SubjectCodec),
    /// Keep only the first half of whatever the subject compresses with this codec.
    TruncateArtifact(SubjectCodec),
    /// Flip the first byte of whatever the subject decompresses with this codec.
    CorruptPlain(SubjectCodec),
    /// Exit without writing output for any request naming this codec.
    Refuse(SubjectCodec),
}

/// Well-behaved codec under test, with optional injected faults.
#[derive(Default)]
pub struct MockSubject {
    faults: Vec<Fault>,
    /// Faults only fire when the plaintext side of a request equals this.
    target: Option<Vec<u8>>,
    requests: RefCell<Vec<SubjectRequest>>,
}

impl MockSubject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.faults.push(fault);
        self
    }

    pub fn only_for(mut self, plain: &[u8]) -> Self {
        self.target = Some(plain.to_vec());
        self
    }

    pub fn requests(&self) -> Vec<SubjectRequest> {
        self.requests.borrow().clone()
    }

    fn armed(&self, plain: &[u8]) -> bool {
        self.target.as_deref().map_or(true, |t| t == plain)
    }

    fn has_fault(&self, fault: Fault) -> bool {
        self.faults.contains(&fault)
    }
}

fn refuse(request: &SubjectRequest) -> HarnessError {
    HarnessError::Process(conformance_core::process::ProcessError::Exit {
        program: "mock-subject".to_string(),
        code: Some(2),
        stderr_tail: format!("refused {}", request.codec.flag()),
    })
}

fn encode(codec: SubjectCodec, plain: &[u8]) -> Result<Vec<u8>, CodecError> {
    match codec {
        SubjectCodec::Gzip => GzipReference::new().compress(plain, 6),
        SubjectCodec::Zstd => ZstdReference::new().compress(plain, 3),
        SubjectCodec::Lzma => lzma_alone_compress(plain, 6),
        SubjectCodec::Lz4 => Lz4Reference::new().compress(plain, 1),
        SubjectCodec::Lpaq8 => Ok(plain.to_vec()),
    }
}

fn decode(codec: SubjectCodec, artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
    match codec {
        SubjectCodec::Gzip => GzipReference::new().decompress(artifact),
        SubjectCodec::Zstd => ZstdReference::new().decompress(artifact),
        SubjectCodec::Lzma => lzma_alone_decompress(artifact),
        SubjectCodec::Lz4 => Lz4Reference::new().decompress(artifact),
        SubjectCodec::Lpaq8 => Ok(artifact.to_vec()),
    }
}

/// Single Deflated entry, as `--gzip --zip` writes it.
pub fn deflate_zip(entry_name: &str, plain: &[u8]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    writer.start_file(entry_name, options).unwrap();
    writer.write_all(plain).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Single method-14 (LZMA) entry laid out the way `--lzma --zip` writes it:
/// no data descriptor, general purpose flags 0, and an end-marked raw LZMA1
/// stream behind the 4-byte version/properties-size prefix.
pub fn lzma_zip(entry_name: &str, plain: &[u8]) -> Vec<u8> {
    // LZMA-alone header: 5 property bytes, then an 8-byte size we drop.
    let alone = lzma_alone_compress(plain, 6).unwrap();
    let mut data = vec![0x10, 0x02, 0x05, 0x00];
    data.extend_from_slice(&alone[..5]);
    data.extend_from_slice(&alone[13..]);

    let name = entry_name.as_bytes();
    let crc = crc32fast::hash(plain);
    let fields = |out: &mut Vec<u8>| {
        out.extend_from_slice(&63u16.to_le_bytes()); // version needed
        out.extend_from_slice(&0u16.to_le_bytes()); // flags
        out.extend_from_slice(&14u16.to_le_bytes()); // method
        out.extend_from_slice(&[0; 4]); // time, date
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&(plain.len() as u32).to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // extra length
    };

    let mut out = Vec::new();
    out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
    fields(&mut out);
    out.extend_from_slice(name);
    out.extend_from_slice(&data);

    let central_offset = out.len() as u32;
    out.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
    out.extend_from_slice(&0x031Eu16.to_le_bytes()); // version made by
    fields(&mut out);
    out.extend_from_slice(&[0; 6]); // comment length, disk, internal attrs
    out.extend_from_slice(&[0; 4]); // external attrs
    out.extend_from_slice(&0u32.to_le_bytes()); // local header offset
    out.extend_from_slice(name);
    let central_size = out.len() as u32 - central_offset;

    out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    out.extend_from_slice(&[0; 4]); // disk numbers
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&central_size.to_le_bytes());
    out.extend_from_slice(&central_offset.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // comment length
    out
}

fn flip_last(bytes: &mut [u8]) {
    if let Some(b) = bytes.last_mut() {
        *b ^= 0xFF;
    }
}

impl Subject for MockSubject {
    fn invoke(&self, request: &SubjectRequest) -> Result<(), HarnessError> {
        self.requests.borrow_mut().push(request.clone());

        let input = fs::read(&request.input).map_err(|e| HarnessError::io(&request.input, e))?;
        let mut output = match request.mode {
            SubjectMode::Compress if request.container => {
                let name = request
                    .input
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "entry".to_string());
                match request.codec {
                    SubjectCodec::Lzma => lzma_zip(&name, &input),
                    _ => deflate_zip(&name, &input),
                }
            }
            SubjectMode::Compress => encode(request.codec, &input)?,
            SubjectMode::Decompress => decode(request.codec, &input)?,
        };

        let armed = match request.mode {
            SubjectMode::Compress => self.armed(&input),
            SubjectMode::Decompress => self.armed(&output),
        };
        if armed && self.has_fault(Fault::Refuse(request.codec)) {
            return Err(refuse(request));
        }

        match request.mode {
            SubjectMode::Compress if armed && self.has_fault(Fault::CorruptArtifact(request.codec)) => {
                flip_last(&mut output)
            }
            SubjectMode::Compress if armed && self.has_fault(Fault::TruncateArtifact(request.codec)) => {
                output.truncate(output.len() / 2)
            }
            SubjectMode::Decompress if armed && self.has_fault(Fault::CorruptPlain(request.codec)) => {
                match output.first_mut() {
                    Some(b) => *b ^= 0x01,
                    None => output.push(0),
                }
            }
            _ => {}
        }

        fs::write(&request.output, &output).map_err(|e| HarnessError::io(&request.output, e))
    }
}

// ------------------------------------------------------------
// External tool stand-ins
// ------------------------------------------------------------

/// Write `body` to `<dir>/<name>.sh` and return an invoker running it through
/// `/bin/sh`, so the script never needs the executable bit.
#[cfg(unix)]
pub fn sh_script(dir: &Path, name: &str, body: &str) -> ProcessInvoker {
    let path: PathBuf = dir.join(format!("{}.sh", name));
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    ProcessInvoker::new("/bin/sh").with_leading_args([path.into_os_string()])
}

/// Single-quote `path` for embedding in a script body.
pub fn sh_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}
