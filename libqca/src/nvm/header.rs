// libqca/src/nvm/header.rs

use crate::protocol::checksum;
use crate::protocol::parser::{ensure_len, le_u16_at, le_u32_at};
use crate::types::ImageType;
use crate::Result;

/// One image header of the chip's NVM chain.
///
/// Fields are decoded one by one from their little-endian offsets; the
/// reserved area is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NvmHeader {
    /// Header format major version.
    pub major_version: u16,
    /// Header format minor version.
    pub minor_version: u16,
    /// Chips allowed to execute the applet.
    pub applet_execute_mask: u32,
    /// Offset of the image in the NVM region.
    pub image_nvm_address: u32,
    /// Load address of the image in chip memory.
    pub image_memory_address: u32,
    /// Image length in bytes.
    pub image_length: u32,
    /// Checksum of the image body.
    pub image_checksum: u32,
    /// Entry point, or [`NvmHeader::NO_ENTRY`].
    pub applet_entry_ptr: u32,
    /// Offset of the next header, or [`NvmHeader::END_OF_CHAIN`].
    pub next_header_ptr: u32,
    /// Offset of the previous header.
    pub previous_header_ptr: u32,
    /// Raw image class, see [`NvmHeader::image_type`].
    pub entry_type: u32,
    /// Module the image belongs to.
    pub module_id: u16,
    /// Sub-module within `module_id`.
    pub module_sub_id: u16,
    /// Applet entry version.
    pub applet_entry_version: u16,
    /// Checksum over the first 92 header bytes.
    pub header_checksum: u32,
}

impl NvmHeader {
    /// Encoded header size.
    pub const HEADER_SIZE: usize = 96;

    /// `applet_entry_ptr` value of an image that is not executable.
    pub const NO_ENTRY: u32 = u32::MAX;

    /// `next_header_ptr` value of the last header.
    pub const END_OF_CHAIN: u32 = u32::MAX;

    const CHECKSUM_OFFSET: usize = 92;

    /// Decode a header from the front of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        ensure_len(data, Self::HEADER_SIZE)?;
        Ok(Self {
            major_version: le_u16_at(data, 0)?,
            minor_version: le_u16_at(data, 2)?,
            applet_execute_mask: le_u32_at(data, 4)?,
            image_nvm_address: le_u32_at(data, 8)?,
            image_memory_address: le_u32_at(data, 12)?,
            image_length: le_u32_at(data, 16)?,
            image_checksum: le_u32_at(data, 20)?,
            applet_entry_ptr: le_u32_at(data, 24)?,
            next_header_ptr: le_u32_at(data, 28)?,
            previous_header_ptr: le_u32_at(data, 32)?,
            entry_type: le_u32_at(data, 36)?,
            module_id: le_u16_at(data, 40)?,
            module_sub_id: le_u16_at(data, 42)?,
            applet_entry_version: le_u16_at(data, 44)?,
            header_checksum: le_u32_at(data, Self::CHECKSUM_OFFSET)?,
        })
    }

    /// Serialize with a zeroed reserved area.
    pub fn to_bytes(&self) -> [u8; Self::HEADER_SIZE] {
        let mut out = [0u8; Self::HEADER_SIZE];
        out[0..2].copy_from_slice(&self.major_version.to_le_bytes());
        out[2..4].copy_from_slice(&self.minor_version.to_le_bytes());
        let words = [
            self.applet_execute_mask,
            self.image_nvm_address,
            self.image_memory_address,
            self.image_length,
            self.image_checksum,
            self.applet_entry_ptr,
            self.next_header_ptr,
            self.previous_header_ptr,
            self.entry_type,
        ];
        for (i, w) in words.iter().enumerate() {
            let at = 4 + i * 4;
            out[at..at + 4].copy_from_slice(&w.to_le_bytes());
        }
        out[40..42].copy_from_slice(&self.module_id.to_le_bytes());
        out[42..44].copy_from_slice(&self.module_sub_id.to_le_bytes());
        out[44..46].copy_from_slice(&self.applet_entry_version.to_le_bytes());
        out[Self::CHECKSUM_OFFSET..].copy_from_slice(&self.header_checksum.to_le_bytes());
        out
    }

    /// Checksum over everything in front of the checksum field of `raw`.
    pub fn compute_checksum(raw: &[u8]) -> Result<u32> {
        ensure_len(raw, Self::HEADER_SIZE)?;
        Ok(checksum(&raw[..Self::CHECKSUM_OFFSET], 0))
    }

    /// Whether `raw`, the bytes this header was decoded from, carries a
    /// matching header checksum.
    pub fn is_checksum_valid(&self, raw: &[u8]) -> bool {
        Self::compute_checksum(raw).is_ok_and(|c| c == self.header_checksum)
    }

    /// Recompute `header_checksum` over [`NvmHeader::to_bytes`].
    pub fn seal(&mut self) {
        self.header_checksum = checksum(&self.to_bytes()[..Self::CHECKSUM_OFFSET], 0);
    }

    /// Image class of `entry_type`.
    pub fn image_type(&self) -> ImageType {
        ImageType::from_u32(self.entry_type)
    }

    /// Whether the image is an executable applet.
    pub fn has_entry(&self) -> bool {
        self.applet_entry_ptr != Self::NO_ENTRY
    }

    /// Whether this header ends the chain.
    pub fn is_last(&self) -> bool {
        self.next_header_ptr == Self::END_OF_CHAIN
    }
}
