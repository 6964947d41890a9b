use libqca::constants::QCA_OUI;
use libqca::protocol::checksum;
use libqca::protocol::mme::{
    self, HostAction, HostRequest, MmType, MmVariant, SwVersionRequest, WriteExecute,
    WriteExecuteResponse, MME_HEADER_LEN,
};
use libqca::protocol::Frame;

#[test]
fn sw_version_request_fits_in_a_frame() {
    let body = SwVersionRequest { cookie: 0x0102_0304 }.to_bytes();
    let mut mme_buf = [0u8; 64];
    let n = mme::encode(MmType::SW_VER, &body, &mut mme_buf).unwrap();
    assert_eq!(n, MME_HEADER_LEN + 4);
    assert_eq!(&mme_buf[..n], &[0x00, 0xB0, 0x52, 0x04, 0x03, 0x02, 0x01]);

    let frame = Frame::encode(&mme_buf[..n]).unwrap();
    assert_eq!(Frame::decode(&frame).unwrap(), &mme_buf[..n]);
}

#[test]
fn host_action_body_is_copied_verbatim() {
    let action = HostAction {
        request: HostRequest::SdramConfig,
        version_major: 1,
        version_minor: 0,
        session_id: 0x2A,
        outstanding_retries: 2,
        retry_interval_10ms: 50,
    };
    let mut out = [0u8; 32];
    let n = mme::encode(MmType::HST_ACTION, &action.to_bytes(), &mut out).unwrap();
    assert_eq!(n, MME_HEADER_LEN + HostAction::LEN);
    assert_eq!(HostAction::from_bytes(&out[MME_HEADER_LEN..n]).unwrap(), action);
    assert_eq!(out[MME_HEADER_LEN], 0x04);
}

#[test]
fn write_execute_parts_cover_an_applet() {
    let applet: Vec<u8> = (0..40u8).collect();
    let mut sums = Vec::new();
    let mut offset = 0usize;
    for part in applet.chunks(16) {
        let mut req = WriteExecute {
            session_id_client: 0x55AA,
            total_len: applet.len() as u32,
            current_offset: offset as u32,
            start_addr: 0x0100_0000,
            ..Default::default()
        };
        req.seal(part);

        let mut body = [0u8; 128];
        let body_len = req.encode_into(part, &mut body).unwrap();
        let mut out = [0u8; 160];
        let n = mme::encode(MmType::WRITE_EXC_APPLET, &body[..body_len], &mut out).unwrap();
        assert_eq!(n, MME_HEADER_LEN + WriteExecute::HEADER_LEN + part.len());

        let (echoed, data) = WriteExecute::from_bytes(&out[MME_HEADER_LEN..n]).unwrap();
        assert_eq!(data, part);
        let cnf = WriteExecuteResponse {
            session_id_client: echoed.session_id_client,
            current_len: echoed.current_len,
            current_offset: echoed.current_offset,
            checksum: echoed.checksum,
            ..Default::default()
        };
        assert!(cnf.acknowledges(&req));

        sums.push(req.checksum);
        offset += part.len();
    }
    assert_eq!(offset, applet.len());
    assert_eq!(sums.len(), 3);
    assert_eq!(sums[2], checksum(&applet[32..], 0));
}

#[test]
fn types_without_encoder_get_an_empty_body() {
    let mut out = [0xEEu8; 16];
    for t in [MmType::RS_DEV, MmType::ATTEN, MmType::UNKNOWN] {
        assert_eq!(mme::encode(t, &[9, 9, 9], &mut out).unwrap(), MME_HEADER_LEN);
        assert_eq!(&out[..3], &QCA_OUI);
    }
}

#[test]
fn vendor_codes_cover_every_variant() {
    for variant in [
        MmVariant::Request,
        MmVariant::Confirm,
        MmVariant::Indication,
        MmVariant::Response,
    ] {
        let code = MmType::WRITE_EXC_APPLET.code(variant);
        assert_eq!(code & 0xE000, 0xA000);
        assert_eq!(MmType::from_code(code), Some((MmType::WRITE_EXC_APPLET, variant)));
    }
}

#[test]
fn decode_returns_announced_type() {
    assert_eq!(mme::decode(&[], 0x0026), MmType::WRITE_EXC_APPLET);
}
