// libqca/src/protocol/mme/body.rs
//! Typed message bodies. All multi-byte fields are little-endian and sit at
//! fixed offsets behind the OUI.

use crate::protocol::checksum;
use crate::protocol::mme::ids::HostRequest;
use crate::protocol::parser::{byte_at, ensure_len, le_u16_at, le_u32_at, le_u64_at, slice_at};
use crate::{Error, Result};

/// Body of an `SW_VER` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwVersionRequest {
    /// Opaque value echoed by the chip.
    pub cookie: u32,
}

impl SwVersionRequest {
    /// Encoded size.
    pub const LEN: usize = 4;

    /// Encode the body.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        self.cookie.to_le_bytes()
    }

    /// Decode the body.
    pub fn from_bytes(body: &[u8]) -> Result<Self> {
        Ok(Self {
            cookie: le_u32_at(body, 0)?,
        })
    }
}

/// Body of an `SW_VER` confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwVersionConfirm {
    /// `0` on success.
    pub status: u8,
    /// Device class reported by the chip.
    pub device_class: u8,
    /// Raw version string, `version_len` bytes long on the wire.
    pub version: Vec<u8>,
    /// Chip identifier.
    pub chip_id: u32,
    /// Chip revision.
    pub chip_rev: u32,
    /// Chip sequence number.
    pub chip_seq: u32,
    /// Package variant.
    pub chip_package: u32,
    /// Option bits.
    pub chip_options: u32,
}

impl SwVersionConfirm {
    /// Encoded size, including the unused tail of the version field.
    pub const LEN: usize = 277;
    /// Room for the version string.
    pub const VERSION_CAPACITY: usize = 253;

    const VERSION_OFFSET: usize = 3;
    const CHIP_OFFSET: usize = 257;

    /// Decode the body.
    pub fn from_bytes(body: &[u8]) -> Result<Self> {
        ensure_len(body, Self::LEN)?;
        let version_len = byte_at(body, 2)? as usize;
        if version_len > Self::VERSION_CAPACITY {
            return Err(Error::FrameFormat(format!(
                "version string of {} bytes exceeds {}",
                version_len,
                Self::VERSION_CAPACITY
            )));
        }
        let chip = Self::CHIP_OFFSET;
        Ok(Self {
            status: byte_at(body, 0)?,
            device_class: byte_at(body, 1)?,
            version: slice_at(body, Self::VERSION_OFFSET, version_len)?.to_vec(),
            chip_id: le_u32_at(body, chip)?,
            chip_rev: le_u32_at(body, chip + 4)?,
            chip_seq: le_u32_at(body, chip + 8)?,
            chip_package: le_u32_at(body, chip + 12)?,
            chip_options: le_u32_at(body, chip + 16)?,
        })
    }

    /// Encode the body. Fails if the version string does not fit.
    pub fn to_bytes(&self) -> Result<[u8; Self::LEN]> {
        if self.version.len() > Self::VERSION_CAPACITY {
            return Err(Error::InvalidArgument(format!(
                "version string of {} bytes exceeds {}",
                self.version.len(),
                Self::VERSION_CAPACITY
            )));
        }
        let mut b = [0u8; Self::LEN];
        b[0] = self.status;
        b[1] = self.device_class;
        b[2] = self.version.len() as u8;
        let v = Self::VERSION_OFFSET;
        b[v..v + self.version.len()].copy_from_slice(&self.version);
        let words = [
            self.chip_id,
            self.chip_rev,
            self.chip_seq,
            self.chip_package,
            self.chip_options,
        ];
        for (i, w) in words.iter().enumerate() {
            let at = Self::CHIP_OFFSET + i * 4;
            b[at..at + 4].copy_from_slice(&w.to_le_bytes());
        }
        Ok(b)
    }

    /// Version string without trailing NULs, if it is UTF-8.
    pub fn version_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.version)
            .ok()
            .map(|s| s.trim_end_matches('\0'))
    }
}

/// Body of a `HST_ACTION` indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostAction {
    /// What the chip asks for.
    pub request: HostRequest,
    /// Protocol major version.
    pub version_major: u8,
    /// Protocol minor version.
    pub version_minor: u8,
    /// Session the exchange belongs to.
    pub session_id: u8,
    /// Retries left before the chip gives up.
    pub outstanding_retries: u16,
    /// Retry interval in units of 10 ms.
    pub retry_interval_10ms: u16,
}

impl HostAction {
    /// Encoded size.
    pub const LEN: usize = 8;

    /// Decode the body.
    pub fn from_bytes(body: &[u8]) -> Result<Self> {
        Ok(Self {
            request: HostRequest::from_u8(byte_at(body, 0)?),
            version_major: byte_at(body, 1)?,
            version_minor: byte_at(body, 2)?,
            session_id: byte_at(body, 3)?,
            outstanding_retries: le_u16_at(body, 4)?,
            retry_interval_10ms: le_u16_at(body, 6)?,
        })
    }

    /// Encode the body.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut b = [0u8; Self::LEN];
        b[0] = self.request.as_u8();
        b[1] = self.version_major;
        b[2] = self.version_minor;
        b[3] = self.session_id;
        b[4..6].copy_from_slice(&self.outstanding_retries.to_le_bytes());
        b[6..8].copy_from_slice(&self.retry_interval_10ms.to_le_bytes());
        b
    }

    /// The response acknowledging this indication with `status`.
    pub fn response(&self, status: u8) -> HostActionResponse {
        HostActionResponse {
            status,
            version_major: self.version_major,
            version_minor: self.version_minor,
            request: self.request,
            session_id: self.session_id,
            outstanding_retries: self.outstanding_retries,
        }
    }
}

/// Body of a `HST_ACTION` response. The request code moves behind the
/// version bytes compared to the indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostActionResponse {
    /// Result code, `0` on success.
    pub status: u8,
    /// Protocol major version.
    pub version_major: u8,
    /// Protocol minor version.
    pub version_minor: u8,
    /// What the chip asks for.
    pub request: HostRequest,
    /// Session the exchange belongs to.
    pub session_id: u8,
    /// Retries left before the chip gives up.
    pub outstanding_retries: u16,
}

impl HostActionResponse {
    /// Encoded size.
    pub const LEN: usize = 7;

    /// Decode the body.
    pub fn from_bytes(body: &[u8]) -> Result<Self> {
        Ok(Self {
            status: byte_at(body, 0)?,
            version_major: byte_at(body, 1)?,
            version_minor: byte_at(body, 2)?,
            request: HostRequest::from_u8(byte_at(body, 3)?),
            session_id: byte_at(body, 4)?,
            outstanding_retries: le_u16_at(body, 5)?,
        })
    }

    /// Encode the body.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut b = [0u8; Self::LEN];
        b[0] = self.status;
        b[1] = self.version_major;
        b[2] = self.version_minor;
        b[3] = self.request.as_u8();
        b[4] = self.session_id;
        b[5..7].copy_from_slice(&self.outstanding_retries.to_le_bytes());
        b
    }
}

/// Header of a `WRITE_EXC_APPLET` request. One part of an applet or image
/// follows it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteExecute {
    /// Session id chosen by the host.
    pub session_id_client: u32,
    /// Session id chosen by the chip.
    pub session_id_server: u32,
    /// Write flags.
    pub flags: u32,
    /// Target memory selector.
    pub memory_type: u64,
    /// Length of all parts of the session; a multiple of 4.
    pub total_len: u32,
    /// Length of this part.
    pub current_len: u32,
    /// Offset of this part within the session.
    pub current_offset: u32,
    /// Load address of the session.
    pub start_addr: u32,
    /// Checksum of this part.
    pub checksum: u32,
}

impl WriteExecute {
    /// Size of the fixed header in front of the part data.
    pub const HEADER_LEN: usize = 48;

    /// Set `current_len` and `checksum` for `part`.
    pub fn seal(&mut self, part: &[u8]) {
        self.current_len = part.len() as u32;
        self.checksum = checksum(part, 0);
    }

    /// Encode the fixed header.
    pub fn to_bytes(&self) -> [u8; Self::HEADER_LEN] {
        let mut b = [0u8; Self::HEADER_LEN];
        b[0..4].copy_from_slice(&self.session_id_client.to_le_bytes());
        b[4..8].copy_from_slice(&self.session_id_server.to_le_bytes());
        b[8..12].copy_from_slice(&self.flags.to_le_bytes());
        b[12..20].copy_from_slice(&self.memory_type.to_le_bytes());
        b[20..24].copy_from_slice(&self.total_len.to_le_bytes());
        b[24..28].copy_from_slice(&self.current_len.to_le_bytes());
        b[28..32].copy_from_slice(&self.current_offset.to_le_bytes());
        b[32..36].copy_from_slice(&self.start_addr.to_le_bytes());
        b[36..40].copy_from_slice(&self.checksum.to_le_bytes());
        b
    }

    /// Encode the header followed by `part` into `out`. Returns the number
    /// of bytes written.
    pub fn encode_into(&self, part: &[u8], out: &mut [u8]) -> Result<usize> {
        if self.total_len % 4 != 0 {
            return Err(Error::InvalidArgument(format!(
                "session length {} is not a multiple of 4",
                self.total_len
            )));
        }
        if part.len() != self.current_len as usize {
            return Err(Error::InvalidArgument(format!(
                "part of {} bytes announced as {}",
                part.len(),
                self.current_len
            )));
        }
        let total = Self::HEADER_LEN + part.len();
        if out.len() < total {
            return Err(Error::InvalidLength {
                expected: total,
                actual: out.len(),
            });
        }
        out[..Self::HEADER_LEN].copy_from_slice(&self.to_bytes());
        out[Self::HEADER_LEN..total].copy_from_slice(part);
        Ok(total)
    }

    /// Decode the header and return it with the part it announces.
    pub fn from_bytes(body: &[u8]) -> Result<(Self, &[u8])> {
        let header = Self {
            session_id_client: le_u32_at(body, 0)?,
            session_id_server: le_u32_at(body, 4)?,
            flags: le_u32_at(body, 8)?,
            memory_type: le_u64_at(body, 12)?,
            total_len: le_u32_at(body, 20)?,
            current_len: le_u32_at(body, 24)?,
            current_offset: le_u32_at(body, 28)?,
            start_addr: le_u32_at(body, 32)?,
            checksum: le_u32_at(body, 36)?,
        };
        ensure_len(body, Self::HEADER_LEN)?;
        let part = slice_at(body, Self::HEADER_LEN, header.current_len as usize)?;
        Ok((header, part))
    }
}

/// Body of a `WRITE_EXC_APPLET` confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteExecuteResponse {
    /// `0` on success.
    pub status: u32,
    /// Session id chosen by the host.
    pub session_id_client: u32,
    /// Session id chosen by the chip.
    pub session_id_server: u32,
    /// Write flags.
    pub flags: u32,
    /// Target memory selector.
    pub memory_type: u64,
    /// Length of all parts of the session.
    pub total_len: u32,
    /// Length of this part.
    pub current_len: u32,
    /// Offset of this part within the session.
    pub current_offset: u32,
    /// Load address of the session.
    pub start_addr: u32,
    /// Checksum of this part.
    pub checksum: u32,
    /// Absolute address the part was written to.
    pub target_addr_abs: u32,
    /// Absolute address execution starts at.
    pub start_addr_abs: u32,
}

impl WriteExecuteResponse {
    /// Encoded size.
    pub const LEN: usize = 60;

    /// Decode the body.
    pub fn from_bytes(body: &[u8]) -> Result<Self> {
        Ok(Self {
            status: le_u32_at(body, 0)?,
            session_id_client: le_u32_at(body, 4)?,
            session_id_server: le_u32_at(body, 8)?,
            flags: le_u32_at(body, 12)?,
            memory_type: le_u64_at(body, 16)?,
            total_len: le_u32_at(body, 24)?,
            current_len: le_u32_at(body, 28)?,
            current_offset: le_u32_at(body, 32)?,
            start_addr: le_u32_at(body, 36)?,
            checksum: le_u32_at(body, 40)?,
            target_addr_abs: le_u32_at(body, 52)?,
            start_addr_abs: le_u32_at(body, 56)?,
        })
    }

    /// Encode the body.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut b = [0u8; Self::LEN];
        b[0..4].copy_from_slice(&self.status.to_le_bytes());
        b[4..8].copy_from_slice(&self.session_id_client.to_le_bytes());
        b[8..12].copy_from_slice(&self.session_id_server.to_le_bytes());
        b[12..16].copy_from_slice(&self.flags.to_le_bytes());
        b[16..24].copy_from_slice(&self.memory_type.to_le_bytes());
        b[24..28].copy_from_slice(&self.total_len.to_le_bytes());
        b[28..32].copy_from_slice(&self.current_len.to_le_bytes());
        b[32..36].copy_from_slice(&self.current_offset.to_le_bytes());
        b[36..40].copy_from_slice(&self.start_addr.to_le_bytes());
        b[40..44].copy_from_slice(&self.checksum.to_le_bytes());
        b[52..56].copy_from_slice(&self.target_addr_abs.to_le_bytes());
        b[56..60].copy_from_slice(&self.start_addr_abs.to_le_bytes());
        b
    }

    /// Whether the chip confirms `request`'s part unchanged.
    pub fn acknowledges(&self, request: &WriteExecute) -> bool {
        self.status == 0
            && self.session_id_client == request.session_id_client
            && self.current_offset == request.current_offset
            && self.current_len == request.current_len
            && self.checksum == request.checksum
    }
}

/// Body of a `MODULE` confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOperationConfirm {
    /// `0` on success.
    pub status: u16,
    /// Recovery hint on failure.
    pub err_recovery_code: u16,
    /// Number of operation data blocks in `data`.
    pub num_op_data: u8,
    /// Operation data, kept raw.
    pub data: Vec<u8>,
}

impl ModuleOperationConfirm {
    /// Size of the fixed part in front of `data`.
    pub const HEADER_LEN: usize = 9;

    /// Decode the body.
    pub fn from_bytes(body: &[u8]) -> Result<Self> {
        ensure_len(body, Self::HEADER_LEN)?;
        Ok(Self {
            status: le_u16_at(body, 0)?,
            err_recovery_code: le_u16_at(body, 2)?,
            num_op_data: byte_at(body, 8)?,
            data: body[Self::HEADER_LEN..].to_vec(),
        })
    }

    /// Encode the body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut b = vec![0u8; Self::HEADER_LEN];
        b[0..2].copy_from_slice(&self.status.to_le_bytes());
        b[2..4].copy_from_slice(&self.err_recovery_code.to_le_bytes());
        b[8] = self.num_op_data;
        b.extend_from_slice(&self.data);
        b
    }
}
