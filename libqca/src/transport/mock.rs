// libqca/src/transport/mock.rs

use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Mock transport for unit tests. It records every transmitted buffer and
/// fills receive buffers from a queue of canned responses.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every transmitted buffer, oldest first.
    pub sent: Vec<Vec<u8>>,
    /// Receive buffers still to hand out, oldest first.
    pub responses: Vec<Vec<u8>>,
    /// Testing hook: number of upcoming transfers that should fail
    pub failures: usize,
}

impl MockTransport {
    /// Mock with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many subsequent transfers should fail (for tests).
    pub fn set_failures(&mut self, n: usize) {
        self.failures = n;
    }

    /// Queue the bytes the next reading transfer returns.
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push(resp);
    }

    /// Queue the two big-endian bytes a register read returns.
    pub fn push_register(&mut self, value: u16) {
        self.responses.push(value.to_be_bytes().to_vec());
    }

    /// Remove and return the most recent transmission.
    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }
}

impl Transport for MockTransport {
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(Error::Bus("simulated transfer failure".into()));
        }
        self.sent.push(tx.to_vec());

        if rx.is_empty() {
            return Ok(());
        }
        if self.responses.is_empty() {
            return Err(Error::Bus("no response queued".into()));
        }
        let resp = self.responses.remove(0);
        if resp.len() != rx.len() {
            return Err(Error::InvalidLength {
                expected: rx.len(),
                actual: resp.len(),
            });
        }
        rx.copy_from_slice(&resp);
        Ok(())
    }
}
