// libqca/src/lib.rs

//! libqca
//!
//! Host-side driver core for the Qualcomm Atheros QCA7000 HomePlug Green PHY
//! chip attached over SPI: register transactions, frame codec, inbound
//! stream reassembly, NVM header chain walking and vendor management
//! message encoding.

#![warn(missing_docs)]

pub mod constants;
/// Device handle, bring-up and bus transactions.
pub mod device;
/// Crate-wide error type.
pub mod error;
pub mod nvm;
/// One-stop imports for driver users.
pub mod prelude;
/// Wire formats: checksum, SPI frames and vendor messages.
pub mod protocol;
pub mod stream;
pub mod test_support;
/// The bus seam and its mock.
pub mod transport;
/// Registers, commands and image classes.
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the register/image types are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
