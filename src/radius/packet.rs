//! RADIUS packet codec (RFC 2865).

use std::fmt;

use hmac::{Hmac, Mac};
use rand::RngCore;

use super::attribute::{self, EAP_MESSAGE_CHUNK_LEN};
use super::error::{RadiusError, Result};

pub const MAX_PACKET_LENGTH: usize = 4096;
const HEADER_LEN: usize = 20;

/// A RADIUS packet code.
///
/// Modeled as a raw byte rather than a closed enum: RFC 2865/3576/5176
/// define far more codes than this driver ever constructs, and a reply
/// carrying one we don't recognize should still round-trip rather than
/// fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(pub u8);

impl Code {
    pub const ACCESS_REQUEST: Code = Code(1);
    pub const ACCESS_ACCEPT: Code = Code(2);
    pub const ACCESS_REJECT: Code = Code(3);
    pub const ACCOUNTING_REQUEST: Code = Code(4);
    pub const ACCOUNTING_RESPONSE: Code = Code(5);
    pub const ACCESS_CHALLENGE: Code = Code(11);
    pub const STATUS_SERVER: Code = Code(12);
    pub const STATUS_CLIENT: Code = Code(13);
    pub const DISCONNECT_REQUEST: Code = Code(40);
    pub const DISCONNECT_ACK: Code = Code(41);
    pub const DISCONNECT_NAK: Code = Code(42);
    pub const COA_REQUEST: Code = Code(43);
    pub const COA_ACK: Code = Code(44);
    pub const COA_NAK: Code = Code(45);
    pub const RESERVED: Code = Code(255);
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Code::ACCESS_REQUEST => "Access-Request",
            Code::ACCESS_ACCEPT => "Access-Accept",
            Code::ACCESS_REJECT => "Access-Reject",
            Code::ACCOUNTING_REQUEST => "Accounting-Request",
            Code::ACCOUNTING_RESPONSE => "Accounting-Response",
            Code::ACCESS_CHALLENGE => "Access-Challenge",
            Code::STATUS_SERVER => "Status-Server",
            Code::STATUS_CLIENT => "Status-Client",
            Code::DISCONNECT_REQUEST => "Disconnect-Request",
            Code::DISCONNECT_ACK => "Disconnect-ACK",
            Code::DISCONNECT_NAK => "Disconnect-NAK",
            Code::COA_REQUEST => "CoA-Request",
            Code::COA_ACK => "CoA-ACK",
            Code::COA_NAK => "CoA-NAK",
            Code::RESERVED => "Reserved",
            Code(other) => return write!(f, "Code({other})"),
        };
        write!(f, "{name}")
    }
}

/// A RADIUS packet: header plus an ordered list of attributes.
///
/// Attributes are kept in an ordered `Vec` rather than a map since RADIUS
/// permits repeated attribute types (`State`, `EAP-Message`) whose order
/// carries meaning (EAP-Message fragments must be reassembled in the order
/// they appear).
#[derive(Debug, Clone)]
pub struct Packet {
    pub code: Code,
    pub identifier: u8,
    pub authenticator: [u8; 16],
    pub attributes: Vec<(u8, Vec<u8>)>,
}

impl Packet {
    /// A fresh Access-Request with a random Request Authenticator and no
    /// attributes.
    pub fn new() -> Self {
        let mut authenticator = [0u8; 16];
        rand::rng().fill_bytes(&mut authenticator);
        Packet {
            code: Code::ACCESS_REQUEST,
            identifier: 0,
            authenticator,
            attributes: Vec::new(),
        }
    }

    /// Builds the next request in a conversation: identifier advances by
    /// one (wrapping, per the one-byte identifier field), the Authenticator
    /// is freshly randomized, and any `State` attributes from `req` are
    /// carried forward so the server can resume its own session state.
    pub fn new_reply(req: &Packet) -> Self {
        let mut authenticator = [0u8; 16];
        rand::rng().fill_bytes(&mut authenticator);
        let mut packet = Packet {
            code: Code::ACCESS_REQUEST,
            identifier: req.identifier.wrapping_add(1),
            authenticator,
            attributes: Vec::new(),
        };
        for state in req.gets(attribute::STATE) {
            packet.add(attribute::STATE, state.to_vec());
        }
        packet
    }

    pub fn parse(buf: &[u8]) -> Result<Self> {
        tracing::trace!(bytes = %hex::encode(buf), "parsing RADIUS packet");
        if buf.len() < HEADER_LEN {
            return Err(RadiusError::TooShort(buf.len()));
        }
        let length = u16::from_be_bytes([buf[2], buf[3]]) as usize;
        if length < HEADER_LEN || length > MAX_PACKET_LENGTH || buf.len() < length {
            return Err(RadiusError::InvalidLength(length as u16));
        }
        let mut authenticator = [0u8; 16];
        authenticator.copy_from_slice(&buf[4..20]);
        let attributes = parse_attributes(&buf[HEADER_LEN..length])?;
        Ok(Packet {
            code: Code(buf[0]),
            identifier: buf[1],
            authenticator,
            attributes,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let attrs_len: usize = self.attributes.iter().map(|(_, v)| 2 + v.len()).sum();
        let size = HEADER_LEN + attrs_len;
        if size > MAX_PACKET_LENGTH {
            return Err(RadiusError::TooLarge(size));
        }
        let mut buf = Vec::with_capacity(size);
        buf.push(self.code.0);
        buf.push(self.identifier);
        buf.extend_from_slice(&(size as u16).to_be_bytes());
        buf.extend_from_slice(&self.authenticator);
        for (t, v) in &self.attributes {
            buf.push(*t);
            buf.push((2 + v.len()) as u8);
            buf.extend_from_slice(v);
        }
        tracing::trace!(bytes = %hex::encode(&buf), "encoded RADIUS packet");
        Ok(buf)
    }

    /// Replaces the first attribute of type `t`, or appends one if absent.
    pub fn set(&mut self, t: u8, value: Vec<u8>) {
        if let Some(slot) = self.attributes.iter_mut().find(|(at, _)| *at == t) {
            slot.1 = value;
        } else {
            self.attributes.push((t, value));
        }
    }

    pub fn add(&mut self, t: u8, value: Vec<u8>) {
        self.attributes.push((t, value));
    }

    pub fn get(&self, t: u8) -> Option<&[u8]> {
        self.attributes
            .iter()
            .find(|(at, _)| *at == t)
            .map(|(_, v)| v.as_slice())
    }

    pub fn gets(&self, t: u8) -> Vec<&[u8]> {
        self.attributes
            .iter()
            .filter(|(at, _)| *at == t)
            .map(|(_, v)| v.as_slice())
            .collect()
    }

    pub fn set_user_name(&mut self, name: &str) -> Result<()> {
        self.set(attribute::USER_NAME, attribute::string_value(name)?);
        Ok(())
    }

    pub fn add_nas_ip_address(&mut self, addr: &str) -> Result<()> {
        self.add(attribute::NAS_IP_ADDRESS, attribute::ipv4_value(addr)?);
        Ok(())
    }

    pub fn set_nas_port_id(&mut self, interface_name: &str, vlan_id: u32) -> Result<()> {
        let value = attribute::nas_port_id(interface_name, vlan_id);
        self.set(attribute::NAS_PORT_ID, attribute::string_value(&value)?);
        Ok(())
    }

    pub fn set_calling_station_id(&mut self, mac: &str) -> Result<()> {
        self.set(attribute::CALLING_STATION_ID, attribute::string_value(mac)?);
        Ok(())
    }

    pub fn add_service_type(&mut self, value: attribute::ServiceType) {
        self.add(attribute::SERVICE_TYPE, attribute::integer_value(value as u32));
    }

    pub fn add_nas_port_type(&mut self, value: attribute::NasPortType) {
        self.add(attribute::NAS_PORT_TYPE, attribute::integer_value(value as u32));
    }

    pub fn add_framed_ip_address(&mut self, addr: &str) -> Result<()> {
        self.add(attribute::FRAMED_IP_ADDRESS, attribute::ipv4_value(addr)?);
        Ok(())
    }

    pub fn add_framed_mtu(&mut self, mtu: u32) {
        self.add(attribute::FRAMED_MTU, attribute::integer_value(mtu));
    }

    pub fn state_gets(&self) -> Vec<&[u8]> {
        self.gets(attribute::STATE)
    }

    /// Splits `payload` across as many `EAP-Message` attributes as needed,
    /// replacing any that were already present.
    pub fn eap_message_set(&mut self, payload: &[u8]) -> Result<()> {
        self.attributes.retain(|(t, _)| *t != attribute::EAP_MESSAGE);
        if payload.is_empty() {
            self.attributes.push((attribute::EAP_MESSAGE, Vec::new()));
            return Ok(());
        }
        for chunk in payload.chunks(EAP_MESSAGE_CHUNK_LEN) {
            self.add(attribute::EAP_MESSAGE, chunk.to_vec());
        }
        Ok(())
    }

    /// Concatenates every `EAP-Message` attribute, in order, into a single
    /// buffer. Fails if none are present.
    pub fn eap_message_get(&self) -> Result<Vec<u8>> {
        let chunks = self.gets(attribute::EAP_MESSAGE);
        if chunks.is_empty() {
            return Err(RadiusError::NoAttribute(attribute::EAP_MESSAGE));
        }
        Ok(chunks.concat())
    }

    /// Zeroes the Message-Authenticator attribute, HMAC-MD5's the encoded
    /// packet keyed by the shared secret, and writes the result back in
    /// place (RFC 3579 §3.2).
    pub fn message_authenticator_set(&mut self, secret: &[u8]) -> Result<()> {
        self.set(attribute::MESSAGE_AUTHENTICATOR, vec![0u8; 16]);
        let encoded = self.encode()?;
        type HmacMd5 = Hmac<md5_digest::Md5>;
        let mut mac = HmacMd5::new_from_slice(secret).map_err(|_| RadiusError::HmacKey)?;
        mac.update(&encoded);
        let digest = mac.finalize().into_bytes();
        self.set(attribute::MESSAGE_AUTHENTICATOR, digest.to_vec());
        Ok(())
    }
}

impl Default for Packet {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_attributes(mut buf: &[u8]) -> Result<Vec<(u8, Vec<u8>)>> {
    let mut attrs = Vec::new();
    let mut offset = 0usize;
    while !buf.is_empty() {
        if buf.len() < 2 {
            return Err(RadiusError::AttributeOverrun {
                offset,
                length: buf.len(),
            });
        }
        let t = buf[0];
        let len = buf[1] as usize;
        if len < 2 {
            return Err(RadiusError::AttributeTooShort(t));
        }
        if buf.len() < len {
            return Err(RadiusError::AttributeOverrun { offset, length: len });
        }
        attrs.push((t, buf[2..len].to_vec()));
        buf = &buf[len..];
        offset += len;
    }
    Ok(attrs)
}
