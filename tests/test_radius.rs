//! RADIUS packet/attribute round trips exercised through the public codec
//! API, the way a real Access-Request/Access-Challenge conversation would
//! build and parse them.

use eapol_drive::radius::{attribute, Code, NasPortType, Packet, ServiceType};

#[test]
fn builds_a_full_access_request_and_parses_it_back() {
    let mut request = Packet::new();
    request.set_user_name("alice").unwrap();
    request.add_nas_ip_address("10.1.2.3").unwrap();
    request.set_nas_port_id("GigabitEthernet0/0", 42).unwrap();
    request.set_calling_station_id("aa:bb:cc:dd:ee:ff").unwrap();
    request.add_service_type(ServiceType::FramedUser);
    request.add_nas_port_type(NasPortType::Ethernet);
    request.add_framed_ip_address("192.168.1.50").unwrap();
    request.add_framed_mtu(1400);
    request.eap_message_set(&[1, 2, 3, 4]).unwrap();
    request.message_authenticator_set(b"topsecret").unwrap();

    let encoded = request.encode().unwrap();
    let parsed = Packet::parse(&encoded).unwrap();

    assert_eq!(parsed.code, Code::ACCESS_REQUEST);
    assert_eq!(parsed.get(attribute::USER_NAME), Some(b"alice".as_slice()));
    assert_eq!(
        parsed.get(attribute::NAS_PORT_ID),
        Some(b"slot=0;subslot=0;port=0;vlanid=42;interfaceName=GigabitEthernet0/0".as_slice())
    );
    assert_eq!(parsed.eap_message_get().unwrap(), vec![1, 2, 3, 4]);
    assert_eq!(parsed.get(attribute::MESSAGE_AUTHENTICATOR).unwrap().len(), 16);
}

#[test]
fn access_challenge_state_carries_forward_into_the_next_request() {
    let mut challenge = Packet::new();
    challenge.code = Code::ACCESS_CHALLENGE;
    challenge.identifier = 7;
    challenge.add(attribute::STATE, b"opaque-server-state".to_vec());
    challenge.eap_message_set(&[1, 5, 0, 6, 25, 0]).unwrap();

    let encoded = challenge.encode().unwrap();
    let parsed = Packet::parse(&encoded).unwrap();

    let next_request = Packet::new_reply(&parsed);
    assert_eq!(next_request.identifier, 8);
    assert_eq!(next_request.state_gets(), vec![b"opaque-server-state".as_slice()]);
}

#[test]
fn eap_message_larger_than_one_attribute_splits_and_reassembles() {
    let mut packet = Packet::new();
    let payload: Vec<u8> = (0..900u32).map(|i| (i % 251) as u8).collect();
    packet.eap_message_set(&payload).unwrap();

    let encoded = packet.encode().unwrap();
    let parsed = Packet::parse(&encoded).unwrap();

    let fragments = parsed.gets(attribute::EAP_MESSAGE);
    assert!(fragments.len() >= 4, "900 bytes should need at least 4 chunks of 253");
    assert_eq!(parsed.eap_message_get().unwrap(), payload);
}

#[test]
fn parse_rejects_a_datagram_too_small_to_hold_a_header() {
    let too_short = [0u8; 19];
    assert!(Packet::parse(&too_short).is_err());
}
