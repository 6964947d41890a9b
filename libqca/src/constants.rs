// libqca/src/constants.rs
//! Common protocol constants used across the crate

/// Largest bus transfer: 1500 byte Ethernet frame, SPI framing and the
/// 2 byte command.
pub const MAX_BUFSIZE: usize = 1532;

/// Maximum Ethernet payload carried by one frame.
pub const ETH_MAX_LEN: usize = 1500;

/// Bytes wrapped around an outbound payload: magic(4) + length(2) +
/// version(2) + trailer(2).
pub const WRAPPER_LEN: usize = 10;

/// Command placeholder at the front of an outbound transfer.
pub const COMMAND_LEN: usize = 2;

/// Start-of-frame magic, four bytes of `0xAA`.
pub const FRAME_MAGIC: [u8; 4] = [0xAA; 4];

/// End-of-frame trailer, two bytes of `0x55`.
pub const FRAME_TRAILER: [u8; 2] = [0x55; 2];

/// Inbound prefix: hardware length(4) + magic(4) + length(2) + version(2).
pub const INBOUND_PREFIX_LEN: usize = 12;

/// Inbound postfix: the `0x55 0x55` trailer.
pub const INBOUND_POSTFIX_LEN: usize = 2;

/// Largest inbound frame the reassembler can be asked to hold.
pub const INBOUND_MAX_FRAME_LEN: usize = INBOUND_PREFIX_LEN + ETH_MAX_LEN + INBOUND_POSTFIX_LEN;

/// Value of the signature register on a responsive chip.
pub const QCA_SIGNATURE: u16 = 0xAA55;

/// Default capacity of the inbound staging ring.
pub const RXQ_MAXSIZE: usize = 2048;

/// Qualcomm Atheros OUI prefixed to every vendor management message.
pub const QCA_OUI: [u8; 3] = [0x00, 0xB0, 0x52];
