//! pipeline/oracle.rs
//! Byte-equality oracle.
//!
//! Exact comparison only: no normalisation, no partial matches. Diagnostics
//! carry lengths and the first differing offset, never the content.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "content mismatch: expected {expected_len} bytes, got {actual_len} bytes{}",
    describe_offset(.first_difference)
)]
pub struct ContentMismatch {
    pub expected_len: usize,
    pub actual_len: usize,
    /// Offset of the first differing byte (or the shorter length when one
    /// buffer is a prefix of the other).
    pub first_difference: Option<usize>,
}

fn describe_offset(offset: &Option<usize>) -> String {
    match offset {
        Some(o) => format!(", first difference at offset {}", o),
        None => String::new(),
    }
}

pub fn compare(expected: &[u8], actual: &[u8]) -> bool {
    expected == actual
}

pub fn first_difference(expected: &[u8], actual: &[u8]) -> Option<usize> {
    if expected == actual {
        return None;
    }
    expected
        .iter()
        .zip(actual.iter())
        .position(|(a, b)| a != b)
        .or(Some(expected.len().min(actual.len())))
}

/// Gate form of [`compare`]: `Err` on any difference.
pub fn ensure_identical(expected: &[u8], actual: &[u8]) -> Result<(), ContentMismatch> {
    if compare(expected, actual) {
        return Ok(());
    }
    Err(ContentMismatch {
        expected_len: expected.len(),
        actual_len: actual.len(),
        first_difference: first_difference(expected, actual),
    })
}
