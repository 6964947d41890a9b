// libqca/src/protocol/mod.rs

/// The XOR word checksum.
pub mod checksum;
/// The SPI write wrapper.
pub mod frame;
pub mod mme;
pub mod parser;

pub use checksum::checksum;
pub use frame::Frame;
pub use mme::{MmType, MmVariant};
