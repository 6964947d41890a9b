// libqca/src/stream/mod.rs
//! Inbound stream reassembly.

/// The staging buffer and frame extraction.
pub mod reassembler;

pub use reassembler::{FrameHandler, InputStatus, Reassembler};
