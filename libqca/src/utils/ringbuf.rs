//! Bounded FIFO byte buffer with random-access peek.
//!
//! Backs both the inbound staging queue and the NVM walker's window. Writes
//! never grow the buffer past its capacity; callers drain with `consume`.

use bytes::{Buf, BytesMut};

/// Fixed-capacity byte FIFO.
#[derive(Debug)]
pub struct RingBuffer {
    buf: BytesMut,
    capacity: usize,
}

impl RingBuffer {
    /// Empty buffer holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of buffered bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Space left before the buffer is full.
    pub fn free(&self) -> usize {
        self.capacity - self.buf.len()
    }

    /// Append as much of `data` as fits. Returns the number of bytes taken.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.free());
        self.buf.extend_from_slice(&data[..n]);
        n
    }

    /// Copy bytes starting `offset` bytes from the front into `out` without
    /// consuming them. Returns the number of bytes copied.
    pub fn peek(&self, offset: usize, out: &mut [u8]) -> usize {
        if offset >= self.buf.len() {
            return 0;
        }
        let n = out.len().min(self.buf.len() - offset);
        out[..n].copy_from_slice(&self.buf[offset..offset + n]);
        n
    }

    /// Drop up to `n` bytes from the front. Returns the number dropped.
    pub fn consume(&mut self, n: usize) -> usize {
        let n = n.min(self.buf.len());
        self.buf.advance(n);
        n
    }

    /// Drop everything buffered.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
