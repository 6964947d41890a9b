#[path = "../common/mod.rs"]
mod common;

use libqca::protocol::Frame;

#[test]
fn minimum_ethernet_payload_frame_matches_fixture() {
    let payload = common::fixtures::scenario_payload();
    assert_eq!(payload.len(), 46);

    let frame = Frame::encode(&payload).expect("frame encode");
    assert_eq!(frame.len(), 56);
    assert_eq!(frame, common::fixtures::scenario_frame());
    assert_eq!(&frame[..6], &[0xAA, 0xAA, 0xAA, 0xAA, 0x2E, 0x00]);
    assert_eq!(&frame[54..], &[0x55, 0x55]);
}

#[test]
fn fixture_frame_decodes_to_payload() {
    let frame = common::fixtures::scenario_frame();
    assert!(Frame::validate(&frame));
    assert_eq!(Frame::payload_len(&frame), Some(46));
    assert_eq!(Frame::frame_size(&frame), Some(56));
    assert_eq!(
        Frame::decode(&frame).expect("frame decode"),
        &common::fixtures::scenario_payload()[..]
    );
}

#[test]
fn magic_only_needs_leading_aa_and_zero_xor() {
    let mut frame = common::fixtures::scenario_frame();
    frame[1] = 0x0F;
    frame[2] = 0x0F;
    assert!(Frame::validate(&frame));

    frame[0] = 0x00;
    frame[3] = 0x00;
    assert!(!Frame::validate(&frame));
}

#[test]
fn oversized_announced_length_is_invalid() {
    let mut frame = vec![0u8; 1520];
    frame[..4].copy_from_slice(&[0xAA; 4]);
    frame[4..6].copy_from_slice(&1501u16.to_le_bytes());
    frame[1509..1511].copy_from_slice(&[0x55, 0x55]);
    assert!(!Frame::validate(&frame));
}

#[test]
fn empty_payload_is_a_ten_byte_frame() {
    let frame = Frame::encode(&[]).unwrap();
    assert_eq!(frame, vec![0xAA, 0xAA, 0xAA, 0xAA, 0x00, 0x00, 0x00, 0x00, 0x55, 0x55]);
    assert!(Frame::decode(&frame).unwrap().is_empty());
}
