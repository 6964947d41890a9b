// libqca/src/device/handle.rs

use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, error, trace, warn};

use crate::constants::{COMMAND_LEN, MAX_BUFSIZE, QCA_SIGNATURE};
use crate::device::config;
use crate::protocol::Frame;
use crate::stream::{FrameHandler, InputStatus, Reassembler};
use crate::transport::Transport;
use crate::types::{AccessMode, Command, Direction, Register};
use crate::utils::Hex;
use crate::{Error, Result};

/// Type-state marker: signature not yet checked.
pub struct Uninitialized;
/// Type-state marker: chip detected and interrupts enabled.
pub struct Initialized;

/// Transport shared by every transaction of one device.
pub type BoxedTransport = Box<dyn Transport + Send>;

/// Device handle that enforces bring-up at compile time.
///
/// Every method that touches the bus takes the handle's lock for the whole
/// transaction and releases it before returning, so a window reservation
/// and the streaming access that follows it are never interleaved with
/// another caller's traffic.
pub struct Device<State = Uninitialized> {
    bus: Mutex<BoxedTransport>,
    _state: PhantomData<State>,
}

impl Device<Uninitialized> {
    /// Create a Device from an existing Transport instance.
    pub fn new_with_transport(transport: BoxedTransport) -> Self {
        Self {
            bus: Mutex::new(transport),
            _state: PhantomData,
        }
    }

    /// Check the chip's signature and enable the interrupt sources the
    /// driver relies on. Returns an initialized Device on success.
    pub fn initialize(self) -> Result<Device<Initialized>> {
        {
            let mut guard = self.lock();
            let bus: &mut dyn Transport = &mut **guard;

            detect(bus)?;
            write_register(bus, Register::ActCtr, config::ACT_CTR_VALUE)?;
            write_register(bus, Register::IntEnable, config::INT_ENABLE_MASK)?;

            // Acknowledge whatever latched before the handler existed, or
            // the edge for it would never come again.
            let pending = read_register(bus, Register::IntSrc)?;
            write_register(bus, Register::IntSrc, pending)?;
            debug!("qca7000 up, flushed pending interrupts {:#06x}", pending);
        }

        Ok(Device {
            bus: self.bus,
            _state: PhantomData,
        })
    }
}

impl<State> Device<State> {
    fn lock(&self) -> MutexGuard<'_, BoxedTransport> {
        // Every transaction rewrites the window it uses, so a panic in
        // another holder leaves nothing to repair.
        self.bus.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read a 16-bit register.
    pub fn read_register(&self, reg: Register) -> Result<u16> {
        let mut guard = self.lock();
        read_register(&mut **guard, reg)
    }

    /// Write a 16-bit register.
    pub fn write_register(&self, reg: Register, value: u16) -> Result<()> {
        let mut guard = self.lock();
        write_register(&mut **guard, reg, value)
    }

    /// Soft-reset the chip.
    pub fn reset(&self) -> Result<()> {
        self.write_register(Register::SpiConfig, config::SOFT_RESET)
    }

    /// Acknowledge every pending interrupt source.
    pub fn clear_interrupts(&self) -> Result<()> {
        self.write_register(Register::IntSrc, config::INT_CLEAR_ALL)
    }
}

impl Device<Initialized> {
    /// Set the size of the window used by the next streaming access.
    pub fn reserve_window(&self, n: u16) -> Result<()> {
        let mut guard = self.lock();
        reserve_window(&mut **guard, n)
    }

    /// Reserve a window of `buf.len()` bytes and stream it in from the
    /// chip's read buffer.
    pub fn stream_in(&self, buf: &mut [u8]) -> Result<()> {
        let mut guard = self.lock();
        stream_in(&mut **guard, buf)
    }

    /// Reserve a window and stream `frame[2..]` out to the chip. The first
    /// two bytes are overwritten with the command.
    pub fn stream_out(&self, frame: &mut [u8]) -> Result<()> {
        let mut guard = self.lock();
        stream_out(&mut **guard, frame)
    }

    /// Queue a wire frame for transmission if the chip has room for it.
    ///
    /// `frame` starts with the two byte command placeholder left by
    /// [`Frame::encode_into`].
    pub fn write_payload(&self, frame: &mut [u8]) -> Result<()> {
        if frame.len() <= COMMAND_LEN || frame.len() > MAX_BUFSIZE {
            return Err(Error::InvalidArgument(format!(
                "frame of {} bytes cannot be written",
                frame.len()
            )));
        }
        let needed = frame.len() - COMMAND_LEN;

        let mut guard = self.lock();
        let bus: &mut dyn Transport = &mut **guard;
        let available = read_register(bus, Register::WrBufAvailable)? as usize;
        if available < needed {
            warn!("write buffer has {} bytes, need {}", available, needed);
            return Err(Error::ResourceExhausted { needed, available });
        }
        stream_out(bus, frame)
    }

    /// Pull whatever the chip has buffered into `buf`. Returns the number of
    /// bytes read; `0` means nothing was pending.
    pub fn read_payload(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.len() <= COMMAND_LEN {
            return Err(Error::InvalidArgument(format!(
                "receive buffer of {} bytes is too small",
                buf.len()
            )));
        }

        let mut guard = self.lock();
        let bus: &mut dyn Transport = &mut **guard;
        let available = read_register(bus, Register::RdBufAvailable)? as usize;
        if available == 0 {
            return Ok(0);
        }
        let len = available.min(buf.len() - COMMAND_LEN);
        stream_in(bus, &mut buf[..len])?;
        Ok(len)
    }

    /// Frame `payload` and write it to the chip.
    pub fn write_encoding(&self, payload: &[u8]) -> Result<()> {
        let mut buf = [0u8; MAX_BUFSIZE];
        let n = Frame::encode_into(payload, &mut buf)?;
        let size = Frame::frame_size(&buf[COMMAND_LEN..n])
            .ok_or_else(|| Error::FrameFormat("encoded frame did not validate".into()))?;
        self.write_payload(&mut buf[..COMMAND_LEN + size])
    }

    /// Read pending bytes from the chip and feed them to `reassembler`.
    pub fn pump<H: FrameHandler>(&self, reassembler: &mut Reassembler<H>) -> Result<InputStatus> {
        let mut buf = [0u8; MAX_BUFSIZE];
        let n = self.read_payload(&mut buf)?;
        Ok(reassembler.input(&buf[..n]))
    }
}

fn detect(bus: &mut dyn Transport) -> Result<()> {
    let mut signature = 0;
    for attempt in 1..=config::SIGNATURE_ATTEMPTS {
        match read_register(bus, Register::Signature) {
            Ok(QCA_SIGNATURE) => return Ok(()),
            Ok(other) => {
                warn!("signature {:#06x} on attempt {}", other, attempt);
                signature = other;
            }
            Err(e) => warn!("signature read failed on attempt {}: {}", attempt, e),
        }
    }
    error!("qca7000 not found (signature {:#06x})", signature);
    Err(Error::DeviceNotFound { signature })
}

fn read_register(bus: &mut dyn Transport, reg: Register) -> Result<u16> {
    let mut rx = [0u8; 2];
    bus.transfer(&Command::read(reg).encode(), &mut rx)?;
    let value = u16::from_be_bytes(rx);
    trace!("read {:?} -> {:#06x}", reg, value);
    Ok(value)
}

fn write_register(bus: &mut dyn Transport, reg: Register, value: u16) -> Result<()> {
    let [c0, c1] = Command::write(reg).encode();
    let [v0, v1] = value.to_be_bytes();
    trace!("write {:?} <- {:#06x}", reg, value);
    bus.write(&[c0, c1, v0, v1])
}

fn reserve_window(bus: &mut dyn Transport, n: u16) -> Result<()> {
    write_register(bus, Register::BufSize, n)
}

fn window_len(n: usize) -> Result<u16> {
    u16::try_from(n).map_err(|_| Error::InvalidArgument(format!("window of {} bytes", n)))
}

fn stream_in(bus: &mut dyn Transport, buf: &mut [u8]) -> Result<()> {
    reserve_window(bus, window_len(buf.len())?)?;
    let cmd = Command::new(Register::Buffer, Direction::Read, AccessMode::Streaming);
    bus.transfer(&cmd.encode(), buf)?;
    trace!("stream in {}", Hex(buf));
    Ok(())
}

fn stream_out(bus: &mut dyn Transport, frame: &mut [u8]) -> Result<()> {
    if frame.len() < COMMAND_LEN {
        return Err(Error::InvalidLength {
            expected: COMMAND_LEN,
            actual: frame.len(),
        });
    }
    reserve_window(bus, window_len(frame.len() - COMMAND_LEN)?)?;
    let cmd = Command::new(Register::Buffer, Direction::Write, AccessMode::Streaming);
    frame[..COMMAND_LEN].copy_from_slice(&cmd.encode());
    trace!("stream out {}", Hex(&frame[COMMAND_LEN..]));
    bus.write(frame)
}
