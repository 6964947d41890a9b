// libqca/src/types.rs

/// 16-bit registers of the chip's SPI slave interface.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Streaming window into the chip's packet buffers.
    Buffer = 0x0000,
    /// Size of the next streaming access.
    BufSize = 0x0100,
    /// Free bytes in the write buffer.
    WrBufAvailable = 0x0200,
    /// Pending bytes in the read buffer.
    RdBufAvailable = 0x0300,
    /// SPI configuration, including soft reset.
    SpiConfig = 0x0400,
    /// SPI status.
    SpiStatus = 0x0500,
    /// Latched interrupt sources; write to acknowledge.
    IntSrc = 0x0C00,
    /// Enabled interrupt sources.
    IntEnable = 0x0D00,
    /// Read buffer watermark.
    RdBufWatermark = 0x1200,
    /// Write buffer watermark.
    WrBufWatermark = 0x1300,
    /// Reads `0xAA55` on a live chip.
    Signature = 0x1A00,
    /// Activity counter.
    ActCtr = 0x1B00,
}

impl Register {
    /// Register address as carried in a command.
    pub fn addr(self) -> u16 {
        self as u16
    }
}

/// Access mode encoded in bit 14 of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Address the register itself.
    Register,
    /// Stream repeatedly through the buffer window.
    Streaming,
}

/// Direction encoded in bit 15 of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Chip to host.
    Read,
    /// Host to chip.
    Write,
}

/// Command word sent at the start of every bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Addressed register.
    pub register: Register,
    /// Transfer direction.
    pub direction: Direction,
    /// Register or streaming access.
    pub mode: AccessMode,
}

impl Command {
    const READ_BIT: u8 = 0x80;
    const ADDR_MODE_BIT: u8 = 0x40;

    /// Command for any combination of direction and mode.
    pub fn new(register: Register, direction: Direction, mode: AccessMode) -> Self {
        Self {
            register,
            direction,
            mode,
        }
    }

    /// Register read.
    pub fn read(register: Register) -> Self {
        Self::new(register, Direction::Read, AccessMode::Register)
    }

    /// Register write.
    pub fn write(register: Register) -> Self {
        Self::new(register, Direction::Write, AccessMode::Register)
    }

    /// Encode the command as the two bytes that go on the wire.
    pub fn encode(&self) -> [u8; 2] {
        let [mut hi, lo] = self.register.addr().to_be_bytes();
        if self.direction == Direction::Read {
            hi |= Self::READ_BIT;
        }
        if self.mode == AccessMode::Register {
            hi |= Self::ADDR_MODE_BIT;
        }
        [hi, lo]
    }
}

/// Image class stored in an NVM header's entry type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageType {
    /// Generic image.
    Generic,
    /// Firmware image.
    Firmware,
    /// Custom image.
    Custom,
    /// The memory controller configuration applet.
    MemCtl,
    /// Advanced power management applet.
    AdvPwrMgmt,
    /// NVM soft loader.
    NvmSoftloader,
    /// Image manifest.
    Manifest,
    /// Parameter information block.
    Pib,
    /// A class outside the known set.
    Other(u32),
}

impl ImageType {
    /// Map a raw entry type onto the catalog.
    pub fn from_u32(value: u32) -> Self {
        match value {
            0x0000 => Self::Generic,
            0x0004 => Self::Firmware,
            0x0006 => Self::Custom,
            0x0007 => Self::MemCtl,
            0x0008 => Self::AdvPwrMgmt,
            0x000B => Self::NvmSoftloader,
            0x000E => Self::Manifest,
            0x000F => Self::Pib,
            other => Self::Other(other),
        }
    }

    /// Raw entry type.
    pub fn as_u32(&self) -> u32 {
        match self {
            Self::Generic => 0x0000,
            Self::Firmware => 0x0004,
            Self::Custom => 0x0006,
            Self::MemCtl => 0x0007,
            Self::AdvPwrMgmt => 0x0008,
            Self::NvmSoftloader => 0x000B,
            Self::Manifest => 0x000E,
            Self::Pib => 0x000F,
            Self::Other(v) => *v,
        }
    }
}

impl From<u32> for ImageType {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}
