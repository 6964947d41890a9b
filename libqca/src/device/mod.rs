// libqca/src/device/mod.rs

/// Builder for a [`Device`].
pub mod builder;
pub mod config;
/// The type-state [`Device`] handle.
pub mod handle;

pub use builder::DeviceBuilder;
pub use handle::{BoxedTransport, Device, Initialized, Uninitialized};
