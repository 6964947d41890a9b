// libqca/src/protocol/parser.rs
//! Bounds-checked field reads for wire and NVM records.

use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Copy the `N` bytes at `idx` out of `data`.
pub fn array_at<const N: usize>(data: &[u8], idx: usize) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(slice_at(data, idx, N)?);
    Ok(out)
}

/// Little-endian `u16` at `idx`.
pub fn le_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    array_at(data, idx).map(u16::from_le_bytes)
}

/// Big-endian `u16` at `idx`.
pub fn be_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    array_at(data, idx).map(u16::from_be_bytes)
}

/// Little-endian `u32` at `idx`.
pub fn le_u32_at(data: &[u8], idx: usize) -> Result<u32> {
    array_at(data, idx).map(u32::from_le_bytes)
}

/// Big-endian `u32` at `idx`.
pub fn be_u32_at(data: &[u8], idx: usize) -> Result<u32> {
    array_at(data, idx).map(u32::from_be_bytes)
}

/// Little-endian `u64` at `idx`.
pub fn le_u64_at(data: &[u8], idx: usize) -> Result<u64> {
    array_at(data, idx).map(u64::from_le_bytes)
}

/// Return `len` bytes starting at `idx`.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// The byte at `idx`.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    array_at::<1>(data, idx).map(|[b]| b)
}
