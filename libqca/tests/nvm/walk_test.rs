#[path = "../common/mod.rs"]
mod common;

use libqca::nvm::{find_offset, walk, NvmHeader, NvmOffset, Visit, WalkEnd};
use libqca::types::ImageType;
use libqca::Error;

#[test]
fn chain_is_walked_in_order_for_any_read_size() {
    let images = common::fixtures::sample_images();
    let image = common::nvm_image(&images);
    let expected: Vec<ImageType> = images.iter().map(|(t, _)| *t).collect();

    for chunk in [1usize, 7, 96] {
        let mut seen = Vec::new();
        let reader = common::ChunkedReader::new(&image, chunk);
        let summary = walk(reader, None, |h| {
            seen.push(h.image_type());
            Visit::Continue
        })
        .unwrap();
        assert_eq!(seen, expected, "chunk size {}", chunk);
        assert_eq!(summary.headers, 3);
        assert_eq!(summary.end, WalkEnd::Terminated);
    }
}

#[test]
fn bodies_larger_than_the_ring_are_skipped() {
    let image = common::nvm_image(&common::fixtures::large_gap_images());
    assert_eq!(image.len(), 5481 + 10);

    for chunk in [1usize, 7, 96, 4096] {
        let mut seen = Vec::new();
        let reader = common::ChunkedReader::new(&image, chunk).interrupt_every(3);
        let summary = walk(reader, None, |h| {
            seen.push((h.image_type(), h.image_length));
            Visit::Continue
        })
        .unwrap();
        assert_eq!(
            seen,
            vec![
                (ImageType::MemCtl, 5000),
                (ImageType::Pib, 193),
                (ImageType::Firmware, 10)
            ],
            "chunk size {}",
            chunk
        );
        assert_eq!(summary.end, WalkEnd::Terminated);
    }

    for chunk in [1usize, 7, 96] {
        let reader = common::ChunkedReader::new(&image, chunk);
        assert_eq!(
            find_offset(ImageType::Firmware, reader, None).unwrap(),
            NvmOffset { header: 5385, module: 5481 },
            "chunk size {}",
            chunk
        );
    }
    assert_eq!(
        find_offset(ImageType::Pib, image.as_slice(), None).unwrap(),
        NvmOffset { header: 5096, module: 5192 }
    );
}

#[test]
fn headers_carry_valid_checksums_and_image_sums() {
    let images = common::fixtures::sample_images();
    let image = common::nvm_image(&images);
    let mut headers = Vec::new();
    walk(image.as_slice(), None, |h| {
        headers.push(*h);
        Visit::Continue
    })
    .unwrap();

    let mut at = 0usize;
    for (header, (_, body)) in headers.iter().zip(&images) {
        let raw = &image[at..at + NvmHeader::HEADER_SIZE];
        assert!(header.is_checksum_valid(raw));
        let start = header.image_nvm_address as usize;
        let end = start + header.image_length as usize;
        assert_eq!(&image[start..end], &body[..]);
        assert_eq!(header.image_checksum, libqca::checksum(body, 0));
        at = end;
    }
}

#[test]
fn offsets_of_each_image() {
    let image = common::nvm_image(&common::fixtures::sample_images());

    // The first header sits at offset 0, which is a real answer.
    assert_eq!(
        find_offset(ImageType::MemCtl, image.as_slice(), None).unwrap(),
        NvmOffset { header: 0, module: 96 }
    );
    assert_eq!(
        find_offset(ImageType::Pib, image.as_slice(), None).unwrap(),
        NvmOffset { header: 216, module: 312 }
    );
    assert_eq!(
        find_offset(ImageType::Firmware, image.as_slice(), None).unwrap(),
        NvmOffset { header: 312, module: 408 }
    );
}

#[test]
fn missing_image_type_is_not_found() {
    let image = common::nvm_image(&common::fixtures::sample_images());
    match find_offset(ImageType::NvmSoftloader, image.as_slice(), None) {
        Err(Error::NotFound(t)) => assert_eq!(t, 0x0B),
        other => panic!("expected NotFound, got: {:?}", other),
    }
}

#[test]
fn bound_hides_later_images() {
    let image = common::nvm_image(&common::fixtures::sample_images());
    assert!(matches!(
        find_offset(ImageType::Firmware, image.as_slice(), Some(300)),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn visitor_can_stop_at_second_header() {
    let image = common::nvm_image(&common::fixtures::sample_images());
    let mut count = 0;
    let summary = walk(image.as_slice(), None, |_| {
        count += 1;
        if count == 2 { Visit::Stop } else { Visit::Continue }
    })
    .unwrap();
    assert_eq!(summary.headers, 2);
    assert_eq!(summary.end, WalkEnd::Stopped);
}

#[test]
fn reader_errors_propagate() {
    struct Failing;
    impl std::io::Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("flash gone"))
        }
    }
    assert!(matches!(
        walk(Failing, None, |_| Visit::Continue),
        Err(Error::Io(_))
    ));
}
