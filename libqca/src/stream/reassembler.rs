// libqca/src/stream/reassembler.rs

use log::{debug, trace};

use crate::constants::{
    ETH_MAX_LEN, INBOUND_MAX_FRAME_LEN, INBOUND_POSTFIX_LEN, INBOUND_PREFIX_LEN, MAX_BUFSIZE,
    RXQ_MAXSIZE,
};
use crate::protocol::parser::{be_u16_at, be_u32_at, le_u16_at};
use crate::utils::RingBuffer;
use crate::{Error, Result};

/// Consumer of reassembled payloads.
///
/// The payload is borrowed from the reassembler's arena and is only valid
/// for the duration of the call.
pub trait FrameHandler {
    /// Called once per validated frame.
    fn on_frame(&mut self, payload: &[u8]);
}

impl<F: FnMut(&[u8])> FrameHandler for F {
    fn on_frame(&mut self, payload: &[u8]) {
        self(payload)
    }
}

/// Outcome of feeding bytes to a [`Reassembler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStatus {
    /// Fewer bytes than the smallest frame remain staged.
    Drained,
    /// A valid prefix is staged but its frame is incomplete; call again
    /// once more bytes arrive.
    NeedMore,
}

/// Turns raw inbound SPI bytes into validated Ethernet payloads.
///
/// Inbound format:
/// [HwLen(4, BE)] [Magic(4)] [Len(2, LE)] [Version(2, BE)] [Payload(n)] [Trailer(2)]
///
/// Bytes that cannot start a valid prefix are dropped one at a time until
/// alignment is recovered. A frame split across deliveries stays staged
/// until the rest of it arrives.
pub struct Reassembler<H> {
    rxq: RingBuffer,
    payload: Box<[u8]>,
    handler: H,
    discarded: usize,
}

impl<H: FrameHandler> Reassembler<H> {
    /// Create a reassembler with the default staging capacity.
    pub fn new(handler: H) -> Self {
        Self::build(RXQ_MAXSIZE, handler)
    }

    /// Create a reassembler staging at most `capacity` bytes. The capacity
    /// must hold one maximal inbound frame.
    pub fn with_capacity(capacity: usize, handler: H) -> Result<Self> {
        if capacity < INBOUND_MAX_FRAME_LEN {
            return Err(Error::InvalidArgument(format!(
                "staging capacity {} is below one frame ({})",
                capacity, INBOUND_MAX_FRAME_LEN
            )));
        }
        Ok(Self::build(capacity, handler))
    }

    fn build(capacity: usize, handler: H) -> Self {
        Self {
            rxq: RingBuffer::new(capacity),
            payload: vec![0u8; MAX_BUFSIZE].into_boxed_slice(),
            handler,
            discarded: 0,
        }
    }

    /// Feed raw bytes and deliver every complete frame they finish.
    pub fn input(&mut self, mut data: &[u8]) -> InputStatus {
        loop {
            let taken = self.rxq.write(data);
            data = &data[taken..];
            let status = self.drain();
            if data.is_empty() {
                return status;
            }
        }
    }

    fn drain(&mut self) -> InputStatus {
        let mut prefix = [0u8; INBOUND_PREFIX_LEN];
        let mut dropped = 0usize;
        let mut status = InputStatus::Drained;

        while self.rxq.len() >= INBOUND_PREFIX_LEN + INBOUND_POSTFIX_LEN {
            self.rxq.peek(0, &mut prefix);
            let Some(packet_len) = parse_prefix(&prefix) else {
                dropped += self.rxq.consume(1);
                continue;
            };

            let total = INBOUND_PREFIX_LEN + packet_len + INBOUND_POSTFIX_LEN;
            if self.rxq.len() < total {
                trace!("frame of {} bytes waiting, {} staged", packet_len, self.rxq.len());
                status = InputStatus::NeedMore;
                break;
            }

            self.rxq
                .peek(INBOUND_PREFIX_LEN, &mut self.payload[..packet_len]);
            self.rxq.consume(total);
            trace!("delivering frame of {} bytes", packet_len);
            self.handler.on_frame(&self.payload[..packet_len]);
        }

        if dropped > 0 {
            debug!("dropped {} bytes while resynchronizing", dropped);
            self.discarded += dropped;
        }
        status
    }

    /// Bytes currently staged.
    pub fn buffered(&self) -> usize {
        self.rxq.len()
    }

    /// Total bytes dropped by resynchronization so far.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Drop everything staged.
    pub fn reset(&mut self) {
        self.rxq.clear();
    }

    /// The frame handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The frame handler, mutably.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Give the frame handler back.
    pub fn into_handler(self) -> H {
        self.handler
    }
}

/// Validate a candidate prefix and return its payload length.
///
/// The hardware length in front is only bounded, not matched against the
/// payload length: the chip counts its own framing in it.
fn parse_prefix(p: &[u8; INBOUND_PREFIX_LEN]) -> Option<usize> {
    let hw_len = be_u32_at(p, 0).ok()? as usize;
    let magic = &p[4..8];
    let packet_len = le_u16_at(p, 8).ok()? as usize;
    let version = be_u16_at(p, 10).ok()?;

    if hw_len > MAX_BUFSIZE
        || magic[0] != 0xAA
        || magic.iter().fold(0u8, |acc, b| acc ^ b) != 0
        || version != 0
        || packet_len > ETH_MAX_LEN
    {
        return None;
    }
    Some(packet_len)
}
