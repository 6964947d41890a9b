#[path = "../common/mod.rs"]
mod common;

use libqca::stream::{InputStatus, Reassembler};
use proptest::prelude::*;

fn collect(chunks: &[&[u8]]) -> (Vec<Vec<u8>>, usize) {
    let mut frames = Vec::new();
    let mut r = Reassembler::new(|p: &[u8]| frames.push(p.to_vec()));
    for chunk in chunks {
        r.input(chunk);
    }
    let discarded = r.discarded();
    drop(r);
    (frames, discarded)
}

#[test]
fn one_garbage_byte_then_frame_delivers_once() {
    let payload = common::fixtures::scenario_payload();
    let mut stream = vec![0x13];
    stream.extend(common::inbound_frame(&payload));

    let (frames, discarded) = collect(&[&stream[..]]);
    assert_eq!(frames, vec![payload]);
    assert_eq!(discarded, 1);
}

#[test]
fn short_noise_delivers_nothing() {
    let mut delivered = 0;
    let mut r = Reassembler::new(|_: &[u8]| delivered += 1);
    assert_eq!(r.input(&[0xAA; 13]), InputStatus::Drained);
    assert_eq!(r.buffered(), 13);
    drop(r);
    assert_eq!(delivered, 0);
}

#[test]
fn garbage_between_frames_is_skipped() {
    let mut stream = common::inbound_frame(b"first");
    stream.extend_from_slice(&[0x00, 0x55, 0x55, 0x01]);
    stream.extend(common::inbound_frame(b"second"));

    let (frames, discarded) = collect(&[&stream[..]]);
    assert_eq!(frames, vec![b"first".to_vec(), b"second".to_vec()]);
    assert_eq!(discarded, 4);
}

#[test]
fn frame_split_at_every_offset_arrives_once() {
    let frame = common::inbound_frame(&[0x42; 64]);
    for split in 1..frame.len() {
        let (frames, _) = collect(&[&frame[..split], &frame[split..]]);
        assert_eq!(frames.len(), 1, "split at {}", split);
        assert_eq!(frames[0], vec![0x42; 64]);
    }
}

#[test]
fn incomplete_frame_reports_need_more() {
    let frame = common::inbound_frame(&[1u8; 100]);
    let mut r = Reassembler::new(|_: &[u8]| {});
    assert_eq!(r.input(&frame[..50]), InputStatus::NeedMore);
    assert_eq!(r.input(&frame[50..]), InputStatus::Drained);
    assert_eq!(r.buffered(), 0);
}

#[test]
fn maximal_frames_pass_the_default_ring() {
    let mut stream = common::inbound_frame(&[0xA5; 1500]);
    stream.extend(common::inbound_frame(&[0x5A; 1500]));
    let (frames, _) = collect(&[&stream[..]]);
    assert_eq!(frames.len(), 2);
    assert!(frames[0].iter().all(|b| *b == 0xA5));
    assert!(frames[1].iter().all(|b| *b == 0x5A));
}

proptest! {
    // Noise that holds no 0xAA can never start a prefix, so exactly the
    // noise is dropped before the frame behind it.
    #[test]
    fn resync_drops_exactly_the_noise(
        noise in prop::collection::vec(any::<u8>().prop_filter("no magic", |b| *b != 0xAA), 0..200),
        payload in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        let mut stream = noise.clone();
        stream.extend(common::inbound_frame(&payload));
        let (frames, discarded) = collect(&[&stream[..]]);
        prop_assert_eq!(frames, vec![payload]);
        prop_assert_eq!(discarded, noise.len());
    }

    #[test]
    fn delivery_does_not_depend_on_chunking(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..400), 1..5),
        sizes in prop::collection::vec(1usize..97, 1..16),
    ) {
        let mut stream = Vec::new();
        for p in &payloads {
            stream.extend(common::inbound_frame(p));
        }

        let mut chunks: Vec<&[u8]> = Vec::new();
        let mut rest = &stream[..];
        for size in sizes.iter().cycle() {
            if rest.is_empty() {
                break;
            }
            let n = (*size).min(rest.len());
            chunks.push(&rest[..n]);
            rest = &rest[n..];
        }

        let (whole, _) = collect(&[&stream[..]]);
        let (pieces, _) = collect(&chunks);
        prop_assert_eq!(&whole, &payloads);
        prop_assert_eq!(pieces, whole);
    }
}
