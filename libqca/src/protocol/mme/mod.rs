// libqca/src/protocol/mme/mod.rs
//! Vendor management messages (MMEs).
//!
//! Every message starts with the three byte Qualcomm OUI followed by a body
//! whose layout depends on the message type. Encoding dispatches through a
//! small static table; types without an entry get an empty body.

use derive_more::{Display, From, Into};

use crate::constants::QCA_OUI;
use crate::{Error, Result};

pub mod body;
pub mod ids;

pub use body::{
    HostAction, HostActionResponse, ModuleOperationConfirm, SwVersionConfirm, SwVersionRequest,
    WriteExecute, WriteExecuteResponse,
};
pub use ids::{HostRequest, ModuleId, ModuleOperation};

/// Length of the OUI header in front of every body.
pub const MME_HEADER_LEN: usize = 3;

/// Base of the HomePlug AV vendor-specific message code range.
const VENDOR_MMTYPE_BASE: u16 = 0xA000;

/// Vendor message type (the index into the vendor code range).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into, Display)]
#[display(fmt = "{:#06x}", _0)]
pub struct MmType(u16);

// Catalog of vendor types, named after the chip's message names.
#[allow(missing_docs)]
impl MmType {
    pub const SW_VER: Self = Self(0x0000);
    pub const WR_MEM: Self = Self(0x0001);
    pub const RD_MEM: Self = Self(0x0002);
    pub const ST_MAC: Self = Self(0x0003);
    pub const GET_NVM: Self = Self(0x0004);
    pub const RS_DEV: Self = Self(0x0007);
    pub const WR_MOD: Self = Self(0x0008);
    pub const RD_MOD: Self = Self(0x0009);
    pub const MOD_NVM: Self = Self(0x000A);
    pub const WD_RPT: Self = Self(0x000B);
    pub const LINK_STATS: Self = Self(0x000C);
    pub const NW_INFO: Self = Self(0x000E);
    pub const CP_RPT: Self = Self(0x0010);
    pub const SET_KEY: Self = Self(0x0014);
    pub const MFG_STR: Self = Self(0x0015);
    pub const RD_CBLOCK: Self = Self(0x0016);
    pub const SET_SDRAM: Self = Self(0x0017);
    pub const HST_ACTION: Self = Self(0x0018);
    pub const OP_ATTR: Self = Self(0x001A);
    pub const ETH_SET: Self = Self(0x001B);
    pub const TONE_MAP: Self = Self(0x001C);
    pub const NW_STAT: Self = Self(0x001D);
    pub const SLAVE_MEM: Self = Self(0x001E);
    pub const FAC_DEFAULT: Self = Self(0x001F);
    pub const MULTICAST_INFO: Self = Self(0x0021);
    pub const CLASSIFICATION: Self = Self(0x0022);
    pub const RX_TONE_MAP: Self = Self(0x0024);
    pub const SET_LED: Self = Self(0x0025);
    pub const WRITE_EXC_APPLET: Self = Self(0x0026);
    pub const MDIO_CMD: Self = Self(0x0027);
    pub const SLAVE_REG: Self = Self(0x0028);
    pub const BW_LIMIT: Self = Self(0x0029);
    pub const SNID: Self = Self(0x002A);
    pub const NN_MITIGATE: Self = Self(0x002B);
    pub const MODULE: Self = Self(0x002C);
    pub const DIAG_NETWORK_PROBE: Self = Self(0x002D);
    pub const PL_LINK_STATUS: Self = Self(0x002E);
    pub const GPIO_STATE: Self = Self(0x002F);
    pub const CONN_ADD: Self = Self(0x0030);
    pub const CONN_MOD: Self = Self(0x0031);
    pub const CONN_REL: Self = Self(0x0032);
    pub const CONN_INFO: Self = Self(0x0033);
    pub const MULTIPORT_LNK_STA: Self = Self(0x0034);
    pub const EM_ID_TABLE: Self = Self(0x0037);
    pub const STANDBY: Self = Self(0x0038);
    pub const SLEEP_SCHED: Self = Self(0x0039);
    pub const SLEEP_SCHED_NOTI: Self = Self(0x003A);
    pub const MCU_DIAG: Self = Self(0x003C);
    pub const GET_PROPERTY: Self = Self(0x003E);
    pub const SET_PROPERTY: Self = Self(0x003F);
    pub const ATTEN: Self = Self(0x0053);
    pub const UNKNOWN: Self = Self(0x07FF);
}

impl MmType {
    /// Wrap a raw vendor type index.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw vendor type index.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Full 16-bit MMTYPE carried in the HomePlug AV header.
    pub fn code(&self, variant: MmVariant) -> u16 {
        VENDOR_MMTYPE_BASE | ((self.0 & Self::UNKNOWN.0) << 2) | variant as u16
    }

    /// Split a 16-bit MMTYPE back into vendor type and variant. Returns
    /// `None` outside the vendor range.
    pub fn from_code(code: u16) -> Option<(Self, MmVariant)> {
        if code & 0xE000 != VENDOR_MMTYPE_BASE {
            return None;
        }
        let variant = MmVariant::from_bits(code & 0x3);
        Some((Self((code >> 2) & Self::UNKNOWN.0), variant))
    }
}

/// Request/confirm/indication/response selector in the low two bits.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmVariant {
    /// `.REQ`, host to chip.
    Request = 0,
    /// `.CNF`, the chip's answer to a request.
    Confirm = 1,
    /// `.IND`, chip to host unprompted.
    Indication = 2,
    /// `.RSP`, the host's answer to an indication.
    Response = 3,
}

impl MmVariant {
    fn from_bits(bits: u16) -> Self {
        match bits & 0x3 {
            0 => Self::Request,
            1 => Self::Confirm,
            2 => Self::Indication,
            _ => Self::Response,
        }
    }
}

type Encoder = fn(&[u8], &mut [u8]) -> Result<usize>;

static ENCODERS: &[(MmType, Encoder)] = &[
    (MmType::SW_VER, encode_generic),
    (MmType::HST_ACTION, encode_generic),
    (MmType::WRITE_EXC_APPLET, encode_generic),
];

fn encode_empty(_payload: &[u8], _body: &mut [u8]) -> Result<usize> {
    Ok(0)
}

fn encode_generic(payload: &[u8], body: &mut [u8]) -> Result<usize> {
    if body.len() < payload.len() {
        return Err(Error::InvalidLength {
            expected: MME_HEADER_LEN + payload.len(),
            actual: MME_HEADER_LEN + body.len(),
        });
    }
    body[..payload.len()].copy_from_slice(payload);
    Ok(payload.len())
}

/// Encode a vendor message of type `mmtype` into `out`. Returns the total
/// encoded length including the OUI.
pub fn encode(mmtype: MmType, payload: &[u8], out: &mut [u8]) -> Result<usize> {
    if out.len() < MME_HEADER_LEN {
        return Err(Error::InvalidLength {
            expected: MME_HEADER_LEN,
            actual: out.len(),
        });
    }
    out[..MME_HEADER_LEN].copy_from_slice(&QCA_OUI);

    let encoder = ENCODERS
        .iter()
        .find(|(t, _)| *t == mmtype)
        .map(|(_, f)| *f)
        .unwrap_or(encode_empty);
    let body_len = encoder(payload, &mut out[MME_HEADER_LEN..])?;
    Ok(MME_HEADER_LEN + body_len)
}

/// Identify a received vendor message.
///
/// Bodies are not parsed yet: the type announced by the caller is echoed
/// back unchanged. Use the typed bodies in [`body`] to interpret one.
pub fn decode(_data: &[u8], mmtype: u16) -> MmType {
    MmType(mmtype)
}
