//! QCA7000 bring-up configuration

/// Signature reads attempted before the chip is declared absent.
pub const SIGNATURE_ATTEMPTS: usize = 2;

/// Activity counter value written during bring-up.
pub const ACT_CTR_VALUE: u16 = 2;

/// CPU-on interrupt source (bit 6).
pub const INT_CPU_ON: u16 = 0x0040;
/// Packet-available interrupt source (bit 0).
pub const INT_PKT_AVLBL: u16 = 0x0001;
/// Interrupt sources enabled during bring-up.
pub const INT_ENABLE_MASK: u16 = INT_CPU_ON | INT_PKT_AVLBL;

/// Writing this to `INT_SRC` acknowledges every pending source.
pub const INT_CLEAR_ALL: u16 = 0xFFFF;

/// `SPI_CONFIG` value that triggers a soft reset.
pub const SOFT_RESET: u16 = 0x0040;
