// libqca/src/error.rs

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied value is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A buffer is shorter or longer than allowed.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// The bound that was violated.
        expected: usize,
        /// The length seen.
        actual: usize,
    },

    /// The chip never answered with its signature.
    #[error("device not found: signature {signature:#06x}")]
    DeviceNotFound {
        /// Last value read, `0` if every read failed.
        signature: u16,
    },

    /// The transport failed.
    #[error("bus transfer failed: {0}")]
    Bus(String),

    /// Reading an NVM image failed.
    #[error("nvm read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The chip's write buffer lacks room for a frame.
    #[error("chip buffer exhausted: need {needed} bytes, {available} available")]
    ResourceExhausted {
        /// Bytes the frame needs.
        needed: usize,
        /// Bytes the chip reported free.
        available: usize,
    },

    /// No image of this type in the chain.
    #[error("nvm image type {0:#06x} not found")]
    NotFound(u32),

    /// Malformed frame or record.
    #[error("frame format error: {0}")]
    FrameFormat(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
