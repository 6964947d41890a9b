// libqca/src/protocol/frame.rs

use crate::constants::{
    COMMAND_LEN, ETH_MAX_LEN, FRAME_MAGIC, FRAME_TRAILER, MAX_BUFSIZE, WRAPPER_LEN,
};
use crate::protocol::parser::le_u16_at;
use crate::{Error, Result};

/// SPI frame helper. Provides encode/validate/decode of the write wrapper
/// Format: [Magic(4)] [Len(2, LE)] [Version(2)] [Payload(n)] [Trailer(2)]
/// Magic: 0xAA 0xAA 0xAA 0xAA
/// Trailer: 0x55 0x55
pub struct Frame;

impl Frame {
    const LEN_OFFSET: usize = 4;
    const VERSION_OFFSET: usize = 6;
    const PAYLOAD_OFFSET: usize = 8;

    /// Encode a payload into a standalone wire frame (no command prefix).
    pub fn encode(payload: &[u8]) -> Result<Vec<u8>> {
        Self::check_payload(payload)?;
        let mut out = vec![0u8; payload.len() + WRAPPER_LEN + COMMAND_LEN];
        let n = Self::encode_into(payload, &mut out)?;
        out.truncate(n);
        Ok(out.split_off(COMMAND_LEN))
    }

    /// Encode `payload` into `out`, leaving the first two bytes for the
    /// bus command. Returns the number of bytes used including them.
    pub fn encode_into(payload: &[u8], out: &mut [u8]) -> Result<usize> {
        Self::check_payload(payload)?;
        let total = COMMAND_LEN + payload.len() + WRAPPER_LEN;
        if out.len() < total {
            return Err(Error::InvalidLength {
                expected: total,
                actual: out.len(),
            });
        }

        let frame = &mut out[COMMAND_LEN..total];
        let len = payload.len() as u16;
        frame[..4].copy_from_slice(&FRAME_MAGIC);
        frame[Self::LEN_OFFSET..Self::VERSION_OFFSET].copy_from_slice(&len.to_le_bytes());
        frame[Self::VERSION_OFFSET..Self::PAYLOAD_OFFSET].copy_from_slice(&[0, 0]);
        let end = Self::PAYLOAD_OFFSET + payload.len();
        frame[Self::PAYLOAD_OFFSET..end].copy_from_slice(payload);
        frame[end..end + 2].copy_from_slice(&FRAME_TRAILER);
        Ok(total)
    }

    /// Payload length announced by a frame. `None` when fewer than six
    /// bytes are available, which is not the same as an empty frame.
    pub fn payload_len(frame: &[u8]) -> Option<u16> {
        le_u16_at(frame, Self::LEN_OFFSET).ok()
    }

    /// True when `frame` holds a complete, well-formed wire frame.
    pub fn validate(frame: &[u8]) -> bool {
        Self::decode(frame).is_ok()
    }

    /// Size of the frame at the front of `frame`, if one is fully present.
    pub fn frame_size(frame: &[u8]) -> Option<usize> {
        let size = Self::payload_len(frame)? as usize + WRAPPER_LEN;
        if size <= frame.len() && Self::validate(&frame[..size]) {
            Some(size)
        } else {
            None
        }
    }

    /// Validate a wire frame and return its payload.
    pub fn decode(frame: &[u8]) -> Result<&[u8]> {
        if frame.len() < WRAPPER_LEN {
            return Err(Error::InvalidLength {
                expected: WRAPPER_LEN,
                actual: frame.len(),
            });
        }
        if frame.len() > MAX_BUFSIZE {
            return Err(Error::InvalidLength {
                expected: MAX_BUFSIZE,
                actual: frame.len(),
            });
        }
        let magic = &frame[..4];
        if magic[0] != FRAME_MAGIC[0] || magic.iter().fold(0u8, |acc, b| acc ^ b) != 0 {
            return Err(Error::FrameFormat("invalid magic".into()));
        }

        let len = le_u16_at(frame, Self::LEN_OFFSET)? as usize;
        if len > ETH_MAX_LEN {
            return Err(Error::FrameFormat(format!(
                "payload length {} exceeds {}",
                len, ETH_MAX_LEN
            )));
        }
        let required = len + WRAPPER_LEN;
        if frame.len() < required {
            return Err(Error::InvalidLength {
                expected: required,
                actual: frame.len(),
            });
        }

        let end = Self::PAYLOAD_OFFSET + len;
        if frame[end..end + 2] != FRAME_TRAILER {
            return Err(Error::FrameFormat("invalid trailer".into()));
        }
        Ok(&frame[Self::PAYLOAD_OFFSET..end])
    }

    fn check_payload(payload: &[u8]) -> Result<()> {
        if payload.len() > ETH_MAX_LEN {
            return Err(Error::InvalidArgument(format!(
                "payload of {} bytes exceeds {}",
                payload.len(),
                ETH_MAX_LEN
            )));
        }
        Ok(())
    }
}
