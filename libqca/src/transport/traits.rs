// libqca/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the duplex bus transfer away from the
/// register protocol.
pub trait Transport {
    /// Clock `tx` out to the chip, then clock `rx.len()` bytes back into
    /// `rx`. An empty `rx` makes this a write-only transfer.
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()>;

    /// Write-only transfer. Default implementation is `transfer` with an
    /// empty receive buffer.
    fn write(&mut self, tx: &[u8]) -> Result<()> {
        self.transfer(tx, &mut [])
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        (**self).transfer(tx, rx)
    }

    fn write(&mut self, tx: &[u8]) -> Result<()> {
        (**self).write(tx)
    }
}
