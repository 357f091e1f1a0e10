//! The common 4- or 5-byte EAP header (RFC 3748 §4.1).

use super::error::{EapError, Result};

pub const TYPE_IDENTITY: u8 = 1;
pub const TYPE_PEAP: u8 = 25;
pub const TYPE_MSCHAPV2: u8 = 26;
pub const TYPE_TLV: u8 = 33;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Code {
    Request = 1,
    Response = 2,
    Success = 3,
    Failure = 4,
}

impl Code {
    pub fn from_u8(v: u8) -> Option<Code> {
        match v {
            1 => Some(Code::Request),
            2 => Some(Code::Response),
            3 => Some(Code::Success),
            4 => Some(Code::Failure),
            _ => None,
        }
    }
}

/// A decoded Request/Response header: code, identifier, declared length
/// and the Type byte that follows it. Success/Failure packets have no
/// Type byte and are handled separately by [`super::EapPacket::decode`].
pub struct Header {
    pub code: Code,
    pub identifier: u8,
    pub length: u16,
    pub eap_type: u8,
}

impl Header {
    pub const SIZE: usize = 5;

    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < Self::SIZE {
            return Err(EapError::TooShort(buf.len()));
        }
        let code = Code::from_u8(buf[0]).ok_or(EapError::UnknownCode(buf[0]))?;
        let identifier = buf[1];
        let length = u16::from_be_bytes([buf[2], buf[3]]);
        if length as usize != buf.len() {
            return Err(EapError::LengthMismatch {
                declared: length,
                actual: buf.len(),
            });
        }
        Ok(Header {
            code,
            identifier,
            length,
            eap_type: buf[4],
        })
    }

    pub fn encode_prefix(code: Code, identifier: u8, length: u16, eap_type: u8) -> [u8; 5] {
        let mut out = [0u8; 5];
        out[0] = code as u8;
        out[1] = identifier;
        out[2..4].copy_from_slice(&length.to_be_bytes());
        out[4] = eap_type;
        out
    }
}
