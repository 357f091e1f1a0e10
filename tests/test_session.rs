//! End-to-end session dispatch against an in-process RADIUS conversation.
//!
//! These tests never open a socket: every "reply" is a `RadiusPacket` built
//! by hand, the way a RADIUS server's datagram would arrive over UDP, and
//! fed straight to `Driver::reply`. The PEAP tunnel underneath still runs a
//! real `rustls::ClientConnection` against an in-memory duplex transport, so
//! the handshake-start path below is exercising the genuine TLS state
//! machine, just without a peer on the other end.

use std::time::Duration;

use eapol_drive::eap::header::Code as EapCode;
use eapol_drive::eap::{identity, peap, EapPacket};
use eapol_drive::radius::{attribute, Code as RadiusCode, Packet as RadiusPacket};
use eapol_drive::session::{Context, Driver, Secret};

fn test_context() -> Context {
    Context {
        user_name: "alice".into(),
        password: Secret("clientPass".into()),
        nas_ip: "10.0.0.1".into(),
        nas_port_id: "GigabitEthernet0/0".into(),
        nas_shared_secret: Secret("sharedsecret".into()),
        vlan_id: 10,
        client_ip: "192.168.1.50".into(),
        client_mac: "aa:bb:cc:dd:ee:ff".into(),
        verify_tls: false,
    }
}

fn access_challenge_carrying(eap_bytes: &[u8]) -> Vec<u8> {
    let mut packet = RadiusPacket::new();
    packet.code = RadiusCode::ACCESS_CHALLENGE;
    packet.identifier = 1;
    packet.eap_message_set(eap_bytes).unwrap();
    packet.encode().unwrap()
}

#[test]
fn build_initial_carries_identity_and_nas_attributes() {
    let driver = Driver::new("127.0.0.1", test_context()).unwrap();
    let initial = driver.build_initial().unwrap();

    assert_eq!(initial.get(attribute::USER_NAME), Some(b"alice".as_slice()));
    assert_eq!(
        initial.get(attribute::NAS_PORT_ID),
        Some(b"slot=0;subslot=0;port=0;vlanid=10;interfaceName=GigabitEthernet0/0".as_slice())
    );
    assert!(initial.get(attribute::MESSAGE_AUTHENTICATOR).is_some());

    let eap = EapPacket::decode(&initial.eap_message_get().unwrap()).unwrap();
    match eap {
        EapPacket::Identity(id) => assert_eq!(id.identity, "alice"),
        other => panic!("expected an Identity response, got {other:?}"),
    }
}

#[test]
fn bare_eap_success_ends_the_conversation() {
    let mut driver = Driver::new("127.0.0.1", test_context()).unwrap();
    let success = EapPacket::SuccessOrFailure {
        code: EapCode::Success,
        identifier: 2,
    };
    let datagram = access_challenge_carrying(&success.encode());

    assert!(driver.reply(&datagram).unwrap().is_none());
}

#[test]
fn bare_eap_failure_ends_the_conversation() {
    let mut driver = Driver::new("127.0.0.1", test_context()).unwrap();
    let failure = EapPacket::SuccessOrFailure {
        code: EapCode::Failure,
        identifier: 3,
    };
    let datagram = access_challenge_carrying(&failure.encode());

    assert!(driver.reply(&datagram).unwrap().is_none());
}

#[test]
fn an_outer_eap_type_other_than_peap_terminates_the_session() {
    let mut driver = Driver::new("127.0.0.1", test_context()).unwrap();
    let stray_identity_request = identity::Identity {
        code: EapCode::Request,
        identifier: 4,
        identity: String::new(),
    };
    let datagram = access_challenge_carrying(&stray_identity_request.encode());

    assert!(driver.reply(&datagram).unwrap().is_none());
}

#[test]
fn peap_start_fragment_drives_the_tls_handshake_forward() {
    let mut driver = Driver::new("127.0.0.1", test_context()).unwrap();

    let start = peap::Peap {
        code: EapCode::Request,
        identifier: 5,
        flags: peap::Flags::START,
        tls_total_length: None,
        payload: Vec::new(),
    };
    let datagram = access_challenge_carrying(&start.encode());

    // The background handshake thread writes the ClientHello asynchronously;
    // poll for it instead of assuming it has landed by the first call.
    let mut client_hello = Vec::new();
    for _ in 0..50 {
        let reply = driver.reply(&datagram).unwrap().expect("Start fragment always gets a reply");
        let reply_packet = RadiusPacket::parse(&reply).unwrap();
        let eap = EapPacket::decode(&reply_packet.eap_message_get().unwrap()).unwrap();
        if let EapPacket::Peap(p) = eap {
            if !p.payload.is_empty() {
                client_hello = p.payload;
                break;
            }
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    assert!(!client_hello.is_empty(), "expected a ClientHello fragment within 500ms");
    // TLS 1.x record header: handshake content type, then a 0x03 major version.
    assert_eq!(client_hello[0], 0x16);
    assert_eq!(client_hello[1], 0x03);
}
