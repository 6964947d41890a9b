// libqca/src/nvm/mod.rs
//! NVM image headers and the chain walker over them.

/// The 96-byte image header.
pub mod header;
/// Chain walking over a sequential reader.
pub mod walker;

pub use header::NvmHeader;
pub use walker::{find_offset, walk, NvmOffset, Visit, WalkEnd, WalkSummary};
