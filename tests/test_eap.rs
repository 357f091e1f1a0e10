//! EAP packet hierarchy round trips through the tagged `EapPacket` dispatcher,
//! covering every inner/outer shape this driver speaks.

use eapol_drive::eap::header::Code;
use eapol_drive::eap::{identity, mschapv2, peap, tlv, EapPacket};

#[test]
fn identity_request_round_trips_through_eap_packet() {
    let request = identity::Identity {
        code: Code::Request,
        identifier: 1,
        identity: "anonymous".into(),
    };
    let encoded = request.encode();

    match EapPacket::decode(&encoded).unwrap() {
        EapPacket::Identity(decoded) => assert_eq!(decoded.identity, "anonymous"),
        other => panic!("expected Identity, got {other:?}"),
    }
}

#[test]
fn peap_start_fragment_round_trips() {
    let start = peap::Peap {
        code: Code::Request,
        identifier: 2,
        flags: peap::Flags::START,
        tls_total_length: None,
        payload: Vec::new(),
    };
    let encoded = start.encode();

    let decoded = EapPacket::decode(&encoded).unwrap();
    assert_eq!(decoded.eap_type(), Some(eapol_drive::eap::header::TYPE_PEAP));
    match decoded {
        EapPacket::Peap(p) => {
            assert!(p.flags.contains(peap::Flags::START));
            assert!(p.payload.is_empty());
        }
        other => panic!("expected Peap, got {other:?}"),
    }
}

#[test]
fn peap_fragmented_record_carries_total_length_only_on_the_first_fragment() {
    let first = peap::Peap {
        code: Code::Request,
        identifier: 3,
        flags: peap::Flags::LENGTH_INCLUDED | peap::Flags::MORE_FRAGMENTS,
        tls_total_length: Some(4096),
        payload: vec![0xAA; 200],
    };
    let encoded = first.encode();
    match EapPacket::decode(&encoded).unwrap() {
        EapPacket::Peap(p) => {
            assert_eq!(p.tls_total_length, Some(4096));
            assert!(p.flags.contains(peap::Flags::MORE_FRAGMENTS));
        }
        other => panic!("expected Peap, got {other:?}"),
    }

    let continuation = peap::Peap {
        code: Code::Request,
        identifier: 3,
        flags: peap::Flags::empty(),
        tls_total_length: None,
        payload: vec![0xBB; 50],
    };
    let encoded = continuation.encode();
    match EapPacket::decode(&encoded).unwrap() {
        EapPacket::Peap(p) => assert_eq!(p.tls_total_length, None),
        other => panic!("expected Peap, got {other:?}"),
    }
}

#[test]
fn mschapv2_challenge_and_response_round_trip_through_eap_packet() {
    let challenge = mschapv2::MsChapV2 {
        code: Code::Request,
        identifier: 4,
        op_code: mschapv2::OpCode::Challenge,
        ms_id: Some(4),
        value: vec![0x11; 16],
        name: "radius-server".into(),
        message: String::new(),
    };
    let encoded = challenge.encode();
    match EapPacket::decode(&encoded).unwrap() {
        EapPacket::MsChapV2(m) => {
            assert_eq!(m.op_code, mschapv2::OpCode::Challenge);
            assert_eq!(m.value.len(), 16);
            assert_eq!(m.name, "radius-server");
        }
        other => panic!("expected MsChapV2, got {other:?}"),
    }

    let response = mschapv2::MsChapV2 {
        code: Code::Response,
        identifier: 4,
        op_code: mschapv2::OpCode::Response,
        ms_id: Some(4),
        value: vec![0x22; 49],
        name: "alice".into(),
        message: String::new(),
    };
    let encoded = response.encode();
    match EapPacket::decode(&encoded).unwrap() {
        EapPacket::MsChapV2(m) => {
            assert_eq!(m.op_code, mschapv2::OpCode::Response);
            assert_eq!(m.value.len(), 49);
        }
        other => panic!("expected MsChapV2, got {other:?}"),
    }
}

#[test]
fn bare_success_and_failure_have_no_type_byte() {
    let success = EapPacket::SuccessOrFailure {
        code: Code::Success,
        identifier: 9,
    };
    let encoded = success.encode();
    assert_eq!(encoded.len(), 4);
    match EapPacket::decode(&encoded).unwrap() {
        EapPacket::SuccessOrFailure { code, identifier } => {
            assert_eq!(code, Code::Success);
            assert_eq!(identifier, 9);
        }
        other => panic!("expected SuccessOrFailure, got {other:?}"),
    }
}

#[test]
fn result_tlv_round_trips() {
    let request = tlv::Tlv {
        code: Code::Request,
        identifier: 10,
        result: tlv::ResultStatus::Success,
    };
    let encoded = request.encode();
    match EapPacket::decode(&encoded).unwrap() {
        EapPacket::Tlv(t) => assert_eq!(t.result, tlv::ResultStatus::Success),
        other => panic!("expected Tlv, got {other:?}"),
    }
}
