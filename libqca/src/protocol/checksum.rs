// libqca/src/protocol/checksum.rs

/// Word-wise XOR checksum used by NVM headers and images.
///
/// Folds `data` as little-endian 32-bit words into `seed` and returns the
/// complement of the result. Trailing bytes that do not fill a word are
/// ignored.
pub fn checksum(data: &[u8], seed: u32) -> u32 {
    !fold(data, seed)
}

fn fold(data: &[u8], seed: u32) -> u32 {
    data.chunks_exact(4)
        .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
        .fold(seed, |acc, word| acc ^ word)
}
