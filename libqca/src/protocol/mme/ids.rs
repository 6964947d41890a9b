// libqca/src/protocol/mme/ids.rs
//! Code points carried inside vendor message bodies.

/// What the chip asks the host for in an `HST_ACTION` indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostRequest {
    /// The boot loader waits for an applet or firmware download.
    LoaderReady,
    /// Firmware is running.
    FirmwareReady,
    /// A new PIB was written.
    PibReady,
    /// Firmware and PIB are both in place.
    FirmwarePibReady,
    /// The loader waits for the SDRAM configuration applet.
    SdramConfig,
    /// Restore factory defaults.
    Factory,
    /// PIB written in the background.
    PibReadyBackground,
    /// The chip rebooted.
    Rebooted,
    /// A code outside the known set.
    Other(u8),
}

impl HostRequest {
    /// Map a wire code onto the catalog.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => Self::LoaderReady,
            0x01 => Self::FirmwareReady,
            0x02 => Self::PibReady,
            0x03 => Self::FirmwarePibReady,
            0x04 => Self::SdramConfig,
            0x05 => Self::Factory,
            0x06 => Self::PibReadyBackground,
            0x07 => Self::Rebooted,
            other => Self::Other(other),
        }
    }

    /// Wire code.
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::LoaderReady => 0x00,
            Self::FirmwareReady => 0x01,
            Self::PibReady => 0x02,
            Self::FirmwarePibReady => 0x03,
            Self::SdramConfig => 0x04,
            Self::Factory => 0x05,
            Self::PibReadyBackground => 0x06,
            Self::Rebooted => 0x07,
            Self::Other(v) => *v,
        }
    }
}

impl From<u8> for HostRequest {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

/// Operation selector of a `MODULE` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleOperation {
    /// Read module data from RAM.
    ReadRam,
    /// Read module data from NVM.
    ReadNvm,
    /// Open a session for a multi-part write.
    StartWriteSession,
    /// Write one part of a module.
    Write,
    /// Commit the written module to NVM.
    Commit,
    /// A code outside the known set.
    Other(u16),
}

impl ModuleOperation {
    /// Map a wire code onto the catalog.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x00 => Self::ReadRam,
            0x01 => Self::ReadNvm,
            0x10 => Self::StartWriteSession,
            0x11 => Self::Write,
            0x12 => Self::Commit,
            other => Self::Other(other),
        }
    }

    /// Wire code.
    pub fn as_u16(&self) -> u16 {
        match self {
            Self::ReadRam => 0x00,
            Self::ReadNvm => 0x01,
            Self::StartWriteSession => 0x10,
            Self::Write => 0x11,
            Self::Commit => 0x12,
            Self::Other(v) => *v,
        }
    }
}

impl From<u16> for ModuleOperation {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

/// Module addressed by a `MODULE` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleId {
    /// Initialization parameters.
    Init,
    /// UART settings.
    Uart,
    /// Enumeration id table.
    EnumIdTable,
    /// Power management settings.
    PowerManagement,
    /// Forwarding configuration.
    ForwardConfig,
    /// Firmware image.
    Firmware,
    /// Parameter information block.
    Pib,
    /// Soft loader applet.
    Softloader,
    /// PIB merge description.
    PibMerge,
    /// An id outside the known set.
    Other(u16),
}

impl ModuleId {
    /// Map a wire id onto the catalog.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x1000 => Self::Init,
            0x2000 => Self::Uart,
            0x3000 => Self::EnumIdTable,
            0x4000 => Self::PowerManagement,
            0x7000 => Self::ForwardConfig,
            0x7001 => Self::Firmware,
            0x7002 => Self::Pib,
            0x7003 => Self::Softloader,
            0x7005 => Self::PibMerge,
            other => Self::Other(other),
        }
    }

    /// Wire id.
    pub fn as_u16(&self) -> u16 {
        match self {
            Self::Init => 0x1000,
            Self::Uart => 0x2000,
            Self::EnumIdTable => 0x3000,
            Self::PowerManagement => 0x4000,
            Self::ForwardConfig => 0x7000,
            Self::Firmware => 0x7001,
            Self::Pib => 0x7002,
            Self::Softloader => 0x7003,
            Self::PibMerge => 0x7005,
            Self::Other(v) => *v,
        }
    }
}

impl From<u16> for ModuleId {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}
