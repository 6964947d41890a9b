//! Utilities for libqca: small, reusable helpers used across the crate.
//!
//! The bounded ring buffer stages bytes for the stream reassembler and the
//! NVM walker; the hex helpers format bus traffic for log output.

pub mod hex;
pub mod ringbuf;

pub use hex::Hex;
pub use ringbuf::RingBuffer;
