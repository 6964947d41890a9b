#[path = "../common/mod.rs"]
mod common;

use libqca::device::{Device, DeviceBuilder, Initialized};
use libqca::transport::MockTransport;
use libqca::types::Register;
use libqca::Error;

#[test]
fn builder_brings_up_the_chip() {
    let mock = common::SharedMock::new(MockTransport::new());
    mock.with(|m| {
        m.push_register(0xAA55);
        m.push_register(0x0000);
    });
    let device: Device<Initialized> = DeviceBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .build()
        .expect("bring-up");

    mock.with(|m| m.push_register(0x0C5C));
    assert_eq!(device.read_register(Register::WrBufAvailable).unwrap(), 0x0C5C);
}

#[test]
fn silent_bus_reports_absent_device() {
    let mock = common::SharedMock::new(MockTransport::new());
    mock.with(|m| m.set_failures(2));
    let result = Device::new_with_transport(Box::new(mock.clone())).initialize();
    match result {
        Err(Error::DeviceNotFound { signature }) => assert_eq!(signature, 0),
        Err(other) => panic!("expected DeviceNotFound, got: {:?}", other),
        Ok(_) => panic!("expected DeviceNotFound"),
    }
    assert!(mock.sent().is_empty());
}

#[test]
fn uninitialized_device_can_still_reset() {
    let mock = common::SharedMock::new(MockTransport::new());
    let device = DeviceBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .build_uninitialized()
        .unwrap();
    device.reset().unwrap();
    assert_eq!(mock.sent(), vec![vec![0x44, 0x00, 0x00, 0x40]]);
}
