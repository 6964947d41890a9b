// libqca/src/nvm/walker.rs

use std::io::{ErrorKind, Read};

use log::{debug, trace, warn};

use crate::nvm::header::NvmHeader;
use crate::types::ImageType;
use crate::utils::RingBuffer;
use crate::{Error, Result};

const HEADER_SIZE: usize = NvmHeader::HEADER_SIZE;

/// Whether a walk goes on after a header was visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Go on to the next header.
    Continue,
    /// End the walk here.
    Stop,
}

/// Why a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEnd {
    /// The last header carried the end-of-chain pointer.
    Terminated,
    /// The visitor returned [`Visit::Stop`].
    Stopped,
    /// The reader ran dry before the chain ended.
    EndOfData,
    /// The byte bound was reached before the chain ended.
    BoundReached,
    /// A forward pointer named an offset already passed.
    BrokenChain,
}

/// Outcome of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    /// Headers handed to the visitor.
    pub headers: usize,
    /// Why the walk ended.
    pub end: WalkEnd,
}

/// Where an image and its header live in the NVM region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NvmOffset {
    /// Offset of the image's header.
    pub header: u32,
    /// Offset of the image body.
    pub module: u32,
}

/// Follow the header chain of an NVM image read sequentially from `reader`.
///
/// The first header sits at offset 0 and each one names the offset of the
/// next. Image bodies between headers are skipped without being buffered.
/// With `bound` set, nothing at or past that offset is visited.
pub fn walk<R, F>(mut reader: R, bound: Option<usize>, mut visit: F) -> Result<WalkSummary>
where
    R: Read,
    F: FnMut(&NvmHeader) -> Visit,
{
    let mut ring = RingBuffer::new(2 * HEADER_SIZE);
    let mut chunk = [0u8; HEADER_SIZE];
    let mut raw = [0u8; HEADER_SIZE];

    let mut index = 0usize;
    let mut next = 0usize;
    let mut headers = 0usize;
    let mut eof = false;

    let end = loop {
        if bound.is_some_and(|b| index >= b) {
            break WalkEnd::BoundReached;
        }

        if !eof && ring.free() > 0 {
            let want = HEADER_SIZE.min(ring.free());
            let n = read_some(&mut reader, &mut chunk[..want])?;
            if n == 0 {
                eof = true;
            } else {
                ring.write(&chunk[..n]);
            }
        }

        if index < next {
            let skip = (next - index).min(ring.len());
            if skip == 0 && eof {
                break WalkEnd::EndOfData;
            }
            ring.consume(skip);
            index += skip;
            continue;
        }

        if ring.len() < HEADER_SIZE {
            if eof {
                break WalkEnd::EndOfData;
            }
            continue;
        }

        ring.peek(0, &mut raw);
        ring.consume(HEADER_SIZE);
        let header = NvmHeader::from_bytes(&raw)?;
        if !header.is_checksum_valid(&raw) {
            warn!(
                "header at {:#x} fails its checksum (stored {:#010x})",
                index, header.header_checksum
            );
        }
        debug!(
            "header at {:#x}: type {:?}, image {:#x}+{:#x}, next {:#x}",
            index,
            header.image_type(),
            header.image_nvm_address,
            header.image_length,
            header.next_header_ptr
        );
        let at = index;
        index += HEADER_SIZE;
        headers += 1;

        if visit(&header) == Visit::Stop {
            break WalkEnd::Stopped;
        }
        if header.is_last() {
            break WalkEnd::Terminated;
        }
        next = header.next_header_ptr as usize;
        if next < index {
            warn!(
                "header at {:#x} points back to {:#x}, abandoning walk",
                at, next
            );
            break WalkEnd::BrokenChain;
        }
    };

    trace!("walk ended after {} headers: {:?}", headers, end);
    Ok(WalkSummary { headers, end })
}

/// Locate the first image of class `image_type`.
pub fn find_offset<R: Read>(
    image_type: ImageType,
    reader: R,
    bound: Option<usize>,
) -> Result<NvmOffset> {
    let mut found = None;
    walk(reader, bound, |h| {
        if h.image_type() == image_type {
            found = Some(h.image_nvm_address);
            Visit::Stop
        } else {
            Visit::Continue
        }
    })?;

    let module = found.ok_or(Error::NotFound(image_type.as_u32()))?;
    let header = module.checked_sub(HEADER_SIZE as u32).ok_or_else(|| {
        Error::FrameFormat(format!(
            "image address {:#x} leaves no room for its header",
            module
        ))
    })?;
    Ok(NvmOffset { header, module })
}

fn read_some<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
