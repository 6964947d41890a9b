#[path = "../common/mod.rs"]
mod common;

use libqca::stream::{InputStatus, Reassembler};
use libqca::transport::MockTransport;
use libqca::Error;

#[test]
fn write_encoding_streams_the_framed_payload() {
    let mock = common::SharedMock::new(MockTransport::new());
    let device = common::initialized_mock_device(&mock).unwrap();
    mock.with(|m| m.push_register(0x0C5C));

    device
        .write_encoding(&common::fixtures::scenario_payload())
        .unwrap();

    let mut streamed = vec![0x00, 0x00];
    streamed.extend(common::fixtures::scenario_frame());
    assert_eq!(
        mock.sent(),
        vec![
            vec![0xC2, 0x00],             // read WRBUF_AVAILABLE
            vec![0x41, 0x00, 0x00, 0x38], // BUFSIZE = 56
            streamed,                     // streaming write of BUFFER
        ]
    );
}

#[test]
fn write_encoding_rejects_oversized_payload() {
    let mock = common::SharedMock::new(MockTransport::new());
    let device = common::initialized_mock_device(&mock).unwrap();
    assert!(matches!(
        device.write_encoding(&[0u8; 1501]),
        Err(Error::InvalidArgument(_))
    ));
    assert!(mock.sent().is_empty());
}

#[test]
fn write_payload_rejects_bad_sizes() {
    let mock = common::SharedMock::new(MockTransport::new());
    let device = common::initialized_mock_device(&mock).unwrap();
    assert!(matches!(
        device.write_payload(&mut [0u8; 2]),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        device.write_payload(&mut vec![0u8; 1533]),
        Err(Error::InvalidArgument(_))
    ));
    assert!(mock.sent().is_empty());
}

#[test]
fn pump_feeds_received_bytes_to_the_reassembler() {
    let payload = common::fixtures::scenario_payload();
    let inbound = common::inbound_frame(&payload);
    assert_eq!(inbound.len(), 60);

    let mock = common::SharedMock::new(MockTransport::new());
    let device = common::initialized_mock_device(&mock).unwrap();
    mock.with(|m| {
        m.push_register(inbound.len() as u16);
        m.push_response(inbound.clone());
    });

    let mut frames = Vec::new();
    let mut reassembler = Reassembler::new(|p: &[u8]| frames.push(p.to_vec()));
    assert_eq!(device.pump(&mut reassembler).unwrap(), InputStatus::Drained);
    drop(reassembler);

    assert_eq!(frames, vec![payload]);
    assert_eq!(
        mock.sent(),
        vec![
            vec![0xC3, 0x00],             // read RDBUF_AVAILABLE
            vec![0x41, 0x00, 0x00, 0x3C], // BUFSIZE = 60
            vec![0x80, 0x00],             // streaming read of BUFFER
        ]
    );
}

#[test]
fn pump_with_nothing_pending_reads_once() {
    let mock = common::SharedMock::new(MockTransport::new());
    let device = common::initialized_mock_device(&mock).unwrap();
    mock.with(|m| m.push_register(0));

    let mut delivered = 0;
    let mut reassembler = Reassembler::new(|_: &[u8]| delivered += 1);
    assert_eq!(device.pump(&mut reassembler).unwrap(), InputStatus::Drained);
    drop(reassembler);
    assert_eq!(delivered, 0);
    assert_eq!(mock.sent(), vec![vec![0xC3, 0x00]]);
}

#[test]
fn read_payload_clamps_to_buffer() {
    let mock = common::SharedMock::new(MockTransport::new());
    let device = common::initialized_mock_device(&mock).unwrap();
    mock.with(|m| {
        m.push_register(500);
        m.push_response(vec![0x11; 14]);
    });

    let mut buf = [0u8; 16];
    assert_eq!(device.read_payload(&mut buf).unwrap(), 14);
    assert_eq!(mock.sent()[1], vec![0x41, 0x00, 0x00, 0x0E]);
}
