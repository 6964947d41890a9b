//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize mock bus setup and fixture construction so tests
//! across the crate and the tests/ directory build frames and NVM images the
//! same way.
#![allow(dead_code)]

use std::io::{self, Read};
use std::sync::{Arc, Mutex, PoisonError};

use crate::constants::{FRAME_MAGIC, FRAME_TRAILER, QCA_SIGNATURE, WRAPPER_LEN};
use crate::device::{Device, Initialized};
use crate::nvm::NvmHeader;
use crate::protocol::checksum;
use crate::transport::mock::MockTransport;
use crate::transport::Transport;
use crate::types::ImageType;
use crate::Result;

/// A MockTransport the test keeps a handle on after the device took its
/// boxed clone.
#[doc(hidden)]
#[derive(Clone, Default)]
pub struct SharedMock(Arc<Mutex<MockTransport>>);

impl SharedMock {
    /// Share `mock`.
    pub fn new(mock: MockTransport) -> Self {
        Self(Arc::new(Mutex::new(mock)))
    }

    /// Run `f` against the underlying mock.
    pub fn with<T>(&self, f: impl FnOnce(&mut MockTransport) -> T) -> T {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Everything transmitted so far.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.with(|m| m.sent.clone())
    }
}

impl Transport for SharedMock {
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        self.with(|m| m.transfer(tx, rx))
    }
}

/// Create and initialize a Device backed by `mock`. The bring-up reads are
/// queued in front of whatever the mock already holds.
#[doc(hidden)]
pub fn initialized_mock_device(mock: &SharedMock) -> Result<Device<Initialized>> {
    mock.with(|m| {
        let mut queued = vec![
            QCA_SIGNATURE.to_be_bytes().to_vec(),
            0u16.to_be_bytes().to_vec(),
        ];
        queued.append(&mut m.responses);
        m.responses = queued;
    });
    let device = Device::new_with_transport(Box::new(mock.clone())).initialize()?;
    mock.with(|m| m.sent.clear());
    Ok(device)
}

/// Wrap `payload` the way the chip streams a received frame back: a
/// big-endian hardware length in front of a regular wire frame.
#[doc(hidden)]
pub fn inbound_frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + WRAPPER_LEN + 4);
    out.extend_from_slice(&((payload.len() + WRAPPER_LEN) as u32).to_be_bytes());
    out.extend_from_slice(&FRAME_MAGIC);
    out.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    out.extend_from_slice(&[0x00, 0x00]);
    out.extend_from_slice(payload);
    out.extend_from_slice(&FRAME_TRAILER);
    out
}

/// Lay out an NVM region holding `images` back to back, each behind a
/// sealed header that points at the next one.
#[doc(hidden)]
pub fn nvm_image(images: &[(ImageType, Vec<u8>)]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut previous = 0u32;
    for (i, (image_type, body)) in images.iter().enumerate() {
        let at = out.len() as u32;
        let module = at + NvmHeader::HEADER_SIZE as u32;
        let next = if i + 1 == images.len() {
            NvmHeader::END_OF_CHAIN
        } else {
            module + body.len() as u32
        };
        let mut header = NvmHeader {
            major_version: 1,
            image_nvm_address: module,
            image_length: body.len() as u32,
            image_checksum: checksum(body, 0),
            applet_entry_ptr: NvmHeader::NO_ENTRY,
            next_header_ptr: next,
            previous_header_ptr: previous,
            entry_type: image_type.as_u32(),
            module_id: i as u16,
            ..Default::default()
        };
        header.seal();
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(body);
        previous = at;
    }
    out
}

/// Reader that hands out at most `chunk` bytes per call, optionally failing
/// every n-th call with `ErrorKind::Interrupted`.
#[doc(hidden)]
pub struct ChunkedReader<'a> {
    data: &'a [u8],
    chunk: usize,
    interrupt_every: Option<usize>,
    calls: usize,
}

impl<'a> ChunkedReader<'a> {
    /// Read `data` at most `chunk` bytes at a time.
    pub fn new(data: &'a [u8], chunk: usize) -> Self {
        Self {
            data,
            chunk: chunk.max(1),
            interrupt_every: None,
            calls: 0,
        }
    }

    /// Fail every `n`-th read with `Interrupted`.
    pub fn interrupt_every(mut self, n: usize) -> Self {
        self.interrupt_every = Some(n.max(1));
        self
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.interrupt_every.is_some_and(|n| self.calls % n == 0) {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        let n = buf.len().min(self.chunk).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}
