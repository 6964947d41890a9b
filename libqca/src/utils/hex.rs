//! Hexadecimal formatting for log output.
//!
//! `Hex` formats lazily, so a disabled `trace!` costs nothing. Long buffers
//! are cut after `Hex::LIMIT` bytes with a count of what was left out.

use std::fmt;

/// Spaced lowercase hex view of a byte slice.
///
/// Example: `Hex(&[0xde, 0xad])` displays as `"de ad"`.
#[derive(Debug, Clone, Copy)]
pub struct Hex<'a>(pub &'a [u8]);

impl Hex<'_> {
    /// Bytes shown before the output is cut.
    pub const LIMIT: usize = 32;
}

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.0.len().min(Self::LIMIT);
        for (i, b) in self.0[..shown].iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        if self.0.len() > shown {
            write!(f, " .. (+{} bytes)", self.0.len() - shown)?;
        }
        Ok(())
    }
}
