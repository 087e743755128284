/// CRC-32 (IEEE), the checksum ZIP stores per entry.
pub fn compute_checksum(data: &[u8]) -> u32 {
    use crc32fast::Hasher;
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Last `max` bytes of `bytes` as lossy UTF-8, prefixed with `...` when cut.
pub fn tail_lossy(bytes: &[u8], max: usize) -> String {
    if bytes.len() <= max {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    let tail = &bytes[bytes.len() - max..];
    format!("...{}", String::from_utf8_lossy(tail))
}
