// libqca/src/prelude.rs

pub use crate::device::{Device, DeviceBuilder, Initialized, Uninitialized};
pub use crate::nvm::{find_offset, walk, NvmHeader, NvmOffset, Visit, WalkEnd, WalkSummary};
pub use crate::protocol::{checksum, Frame, MmType, MmVariant};
pub use crate::stream::{FrameHandler, InputStatus, Reassembler};
pub use crate::transport::Transport;
pub use crate::{AccessMode, Command, Direction, Error, ImageType, Register, Result};

// Re-export small utilities for convenience
pub use crate::utils::{Hex, RingBuffer};
