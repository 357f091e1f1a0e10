//! The outer coordinator: builds the initial Access-Request and dispatches
//! every subsequent RADIUS reply to the right EAP/PEAP/MS-CHAPv2 handler.

use tracing::{info, warn};

use crate::eap::header::Code as EapCode;
use crate::eap::{self, mschapv2, peap, peap_inner, tlv, EapPacket};
use crate::radius::{self, Packet as RadiusPacket};
use crate::tunnel::{Status as TunnelStatus, Tunnel};

use super::context::Context;
use super::error::{Result, SessionError};

/// Strips a trailing `:port` from a `host:port` transport address, leaving
/// the bare hostname PEAP's TLS layer needs for SNI (the socket layer wants
/// the full `host:port` form, so this is only applied on the TLS path).
fn host_of(server_addr: &str) -> &str {
    server_addr.rsplit_once(':').map_or(server_addr, |(host, _)| host)
}

/// What an inner-EAP handler wants to happen next.
enum InnerOutcome {
    /// Send this plaintext (already tunnel-encrypted to ciphertext) back
    /// as the PEAP response payload.
    Reply(Vec<u8>),
    /// End the session without sending a further reply.
    Terminate,
}

/// Drives one 802.1X/EAP conversation against a RADIUS server: the PEAP
/// tunnel plus everything known about the identity being authenticated.
pub struct Driver {
    context: Context,
    tunnel: Tunnel,
}

impl Driver {
    pub fn new(server_addr: &str, context: Context) -> Result<Self> {
        let server_name = host_of(server_addr);
        let tunnel = Tunnel::new(server_name, context.verify_tls)?;
        Ok(Self { context, tunnel })
    }

    /// The first Access-Request of the conversation: identity attributes
    /// plus an EAP-Response/Identity.
    pub fn build_initial(&self) -> Result<RadiusPacket> {
        let mut packet = RadiusPacket::new();
        self.fill_nas_attributes(&mut packet)?;

        let identity = eap::identity::Identity {
            code: EapCode::Response,
            identifier: 0,
            identity: self.context.user_name.clone(),
        };
        packet.eap_message_set(&identity.encode())?;
        packet.message_authenticator_set(self.context.nas_shared_secret.as_bytes())?;
        Ok(packet)
    }

    /// Handles one inbound RADIUS datagram, returning the next request to
    /// send (`Some`) or `None` once the conversation has reached a
    /// terminal state and nothing further should be sent.
    pub fn reply(&mut self, datagram: &[u8]) -> Result<Option<Vec<u8>>> {
        let request = RadiusPacket::parse(datagram)?;
        let eap_data = request.eap_message_get()?;
        let outer = EapPacket::decode(&eap_data)?;

        match &outer {
            EapPacket::SuccessOrFailure { code, .. } => {
                info!(?code, "outer EAP reached a terminal state");
                Ok(None)
            }
            EapPacket::Peap(req_peap) => self.handle_peap(&request, req_peap),
            other => {
                warn!(eap_type = ?other.eap_type(), "unsupported outer EAP type, terminating session");
                Ok(None)
            }
        }
    }

    fn fill_nas_attributes(&self, packet: &mut RadiusPacket) -> Result<()> {
        packet.set_user_name(&self.context.user_name)?;
        packet.add_nas_ip_address(&self.context.nas_ip)?;
        packet.set_nas_port_id(&self.context.nas_port_id, self.context.vlan_id)?;
        packet.set_calling_station_id(&self.context.client_mac)?;
        packet.add_service_type(radius::ServiceType::FramedUser);
        packet.add_nas_port_type(radius::NasPortType::Ethernet);
        packet.add_framed_ip_address(&self.context.client_ip)?;
        packet.add_framed_mtu(1400);
        Ok(())
    }

    fn handle_peap(&mut self, request: &RadiusPacket, req_peap: &peap::Peap) -> Result<Option<Vec<u8>>> {
        let out_payload = if req_peap.flags.contains(peap::Flags::START) {
            self.tunnel.read()
        } else if self.tunnel.status() != TunnelStatus::Open {
            self.tunnel.handshake(&req_peap.payload, req_peap.tls_total_length)
        } else {
            let plaintext = self.tunnel.decode(&req_peap.payload)?;
            match self.handle_inner(&plaintext)? {
                InnerOutcome::Reply(bytes) => bytes,
                InnerOutcome::Terminate => return Ok(None),
            }
        };

        let mut reply_packet = RadiusPacket::new_reply(request);
        self.fill_nas_attributes(&mut reply_packet)?;

        let peap_reply = peap::Peap {
            code: EapCode::Response,
            identifier: req_peap.identifier,
            flags: peap::Flags::empty(),
            tls_total_length: None,
            payload: out_payload,
        };
        reply_packet.eap_message_set(&peap_reply.encode())?;
        reply_packet.message_authenticator_set(self.context.nas_shared_secret.as_bytes())?;
        Ok(Some(reply_packet.encode()?))
    }

    fn handle_inner(&mut self, plaintext: &[u8]) -> Result<InnerOutcome> {
        let inner = EapPacket::decode(plaintext)?;
        match inner {
            EapPacket::Identity(_) => {
                info!("inner EAP-Identity request");
                let resp = peap_inner::identity_response(&self.context.user_name);
                Ok(InnerOutcome::Reply(self.tunnel.encode(&resp)?))
            }
            EapPacket::MsChapV2(ms) if ms.op_code == mschapv2::OpCode::Challenge => self.handle_mschapv2_challenge(&ms),
            EapPacket::MsChapV2(ms) if ms.op_code == mschapv2::OpCode::Success => self.handle_mschapv2_success(&ms),
            EapPacket::MsChapV2(ms) if ms.op_code == mschapv2::OpCode::Failure => {
                warn!(message = %ms.message, "MS-CHAPv2 failure, terminating session");
                Ok(InnerOutcome::Terminate)
            }
            EapPacket::Tlv(t) => self.handle_tlv(&t),
            other => {
                warn!(eap_type = ?other.eap_type(), "unknown inner EAP type, sending empty ack");
                Ok(InnerOutcome::Reply(Vec::new()))
            }
        }
    }

    fn handle_mschapv2_challenge(&mut self, ms: &mschapv2::MsChapV2) -> Result<InnerOutcome> {
        let auth_challenge: [u8; 16] = ms
            .value
            .as_slice()
            .try_into()
            .map_err(|_| SessionError::MalformedChallenge)?;
        let peer_challenge = eap::crypto::random_peer_challenge();
        let nt_response = eap::crypto::generate_nt_response(
            &self.context.user_name,
            &self.context.password,
            &auth_challenge,
            &peer_challenge,
        );

        let mut value = Vec::with_capacity(49);
        value.extend_from_slice(&peer_challenge);
        value.extend_from_slice(&[0u8; 8]); // reserved
        value.extend_from_slice(&nt_response);
        value.push(0); // flags

        let response = mschapv2::MsChapV2 {
            code: EapCode::Response,
            identifier: ms.identifier,
            op_code: mschapv2::OpCode::Response,
            ms_id: Some(0),
            value,
            name: self.context.user_name.clone(),
            message: String::new(),
        };
        let encoded = response.encode();
        let inner_body = peap_inner::strip_outer_header(&encoded);
        Ok(InnerOutcome::Reply(self.tunnel.encode(inner_body)?))
    }

    fn handle_mschapv2_success(&mut self, ms: &mschapv2::MsChapV2) -> Result<InnerOutcome> {
        info!(message = %ms.message, "MS-CHAPv2 success, acknowledging");
        let response = mschapv2::MsChapV2 {
            code: EapCode::Response,
            identifier: ms.identifier,
            op_code: mschapv2::OpCode::Success,
            ms_id: None,
            value: Vec::new(),
            name: String::new(),
            message: String::new(),
        };
        let encoded = response.encode();
        let inner_body = peap_inner::strip_outer_header(&encoded);
        Ok(InnerOutcome::Reply(self.tunnel.encode(inner_body)?))
    }

    fn handle_tlv(&mut self, t: &tlv::Tlv) -> Result<InnerOutcome> {
        info!(result = ?t.result, "inner Result-TLV");
        let response = tlv::Tlv {
            code: EapCode::Response,
            identifier: t.identifier,
            result: tlv::ResultStatus::Success,
        };
        let encoded = response.encode();
        Ok(InnerOutcome::Reply(self.tunnel.encode(&encoded)?))
    }
}
