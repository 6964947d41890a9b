// fixtures.rs — provides commonly used test payloads/frames

use libqca::types::ImageType;

/// A 46 byte Ethernet payload: an SW_VER request MME padded to the minimum
/// frame size.
pub const SCENARIO_PAYLOAD_HEX: &str = concat!(
    "00b052000001",
    "020000000001",
    "88e1",
    "00",
    "00a0",
    "00b052",
    "0000000000000000000000000000000000000000000000000000",
);

/// The same payload as it goes out on the wire, without the command.
pub const SCENARIO_FRAME_HEX: &str = concat!(
    "aaaaaaaa",
    "2e00",
    "0000",
    "00b052000001",
    "020000000001",
    "88e1",
    "00",
    "00a0",
    "00b052",
    "0000000000000000000000000000000000000000000000000000",
    "5555",
);

pub fn scenario_payload() -> Vec<u8> {
    hex::decode(SCENARIO_PAYLOAD_HEX).unwrap()
}

pub fn scenario_frame() -> Vec<u8> {
    hex::decode(SCENARIO_FRAME_HEX).unwrap()
}

/// Three images: a configuration applet, an empty PIB and firmware.
pub fn sample_images() -> Vec<(ImageType, Vec<u8>)> {
    vec![
        (ImageType::MemCtl, vec![0x5A; 120]),
        (ImageType::Pib, Vec::new()),
        (ImageType::Firmware, (0..=255u8).cycle().take(777).collect()),
    ]
}

/// An image chain whose first body spans many header rings, followed by a
/// PIB that leaves the next header off word alignment.
pub fn large_gap_images() -> Vec<(ImageType, Vec<u8>)> {
    vec![
        (ImageType::MemCtl, (0..5000u32).map(|i| (i % 251) as u8).collect()),
        (ImageType::Pib, vec![0xC3; 193]),
        (ImageType::Firmware, vec![0x0F; 10]),
    ]
}
