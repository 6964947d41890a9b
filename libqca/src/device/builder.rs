// libqca/src/device/builder.rs

use crate::device::handle::{BoxedTransport, Device, Initialized, Uninitialized};
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
#[derive(Default)]
pub struct DeviceBuilder {
    transport: Option<BoxedTransport>,
    soft_reset: bool,
}

impl DeviceBuilder {
    /// Empty builder without a transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: BoxedTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Soft-reset the chip before checking its signature in [`DeviceBuilder::build`].
    pub fn soft_reset(mut self, enabled: bool) -> Self {
        self.soft_reset = enabled;
        self
    }

    /// Consume the builder and return an uninitialized Device.
    /// Requires a transport to be provided.
    pub fn build_uninitialized(self) -> Result<Device<Uninitialized>> {
        match self.transport {
            Some(t) => Ok(Device::new_with_transport(t)),
            None => Err(Error::InvalidArgument("no transport configured".into())),
        }
    }

    /// Build the Device and run bring-up.
    pub fn build(self) -> Result<Device<Initialized>> {
        let soft_reset = self.soft_reset;
        let device = self.build_uninitialized()?;
        if soft_reset {
            device.reset()?;
        }
        device.initialize()
    }
}
