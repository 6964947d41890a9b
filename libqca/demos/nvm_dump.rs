//! Walk the header chain of a QCA7000 NVM image file and print every header.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p libqca --example nvm_dump -- firmware.nvm [bound]

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};

use anyhow::{Context, bail};
use libqca::nvm::{self, NvmHeader, Visit};
use libqca::protocol::checksum;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: nvm_dump <image> [bound]");
    };
    let bound = args
        .next()
        .map(|b| b.parse::<usize>())
        .transpose()
        .context("bound must be a byte count")?;

    let file = File::open(&path).with_context(|| format!("opening {}", path))?;
    let mut bodies = File::open(&path).with_context(|| format!("opening {}", path))?;
    let mut piece = Vec::with_capacity(PIECE);

    let mut index = 0;
    let summary = nvm::walk(BufReader::new(file), bound, |h| {
        let verdict = match image_checksum(&mut bodies, h, &mut piece) {
            Ok(Some(sum)) if sum == h.image_checksum => "ok".to_string(),
            Ok(Some(_)) => "bad checksum".to_string(),
            Ok(None) => "truncated".to_string(),
            Err(e) => format!("unreadable: {}", e),
        };
        println!(
            "#{:<2} {:?} v{}.{} module {:#06x}/{:#06x} image {:#010x}+{:#x} ({}) entry {}",
            index,
            h.image_type(),
            h.major_version,
            h.minor_version,
            h.module_id,
            h.module_sub_id,
            h.image_nvm_address,
            h.image_length,
            verdict,
            if h.has_entry() {
                format!("{:#010x}", h.applet_entry_ptr)
            } else {
                "none".to_string()
            },
        );
        index += 1;
        Visit::Continue
    })?;

    println!("{} headers, walk ended: {:?}", summary.headers, summary.end);
    Ok(())
}

const PIECE: usize = 4096;

/// Checksum the image `h` describes, reading it in pieces from `file`.
/// `None` when the file ends first.
fn image_checksum(file: &mut File, h: &NvmHeader, piece: &mut Vec<u8>) -> io::Result<Option<u32>> {
    file.seek(SeekFrom::Start(u64::from(h.image_nvm_address)))?;
    let mut body = file.take(u64::from(h.image_length));
    let mut read = 0u64;
    let mut sum = checksum(&[], 0);
    loop {
        piece.clear();
        let n = (&mut body).take(PIECE as u64).read_to_end(piece)?;
        if n == 0 {
            break;
        }
        // Pieces are word multiples, so the fold carries across them.
        sum = checksum(piece, !sum);
        read += n as u64;
    }
    Ok((read == u64::from(h.image_length)).then_some(sum))
}
