//! EAP-PEAP (Protected EAP), the outer TLS-tunneling EAP type.
//!
//! Draft-josefsson-pppext-eap-tls-eap-10 §2.2 flag byte: `L M S R R R R R`
//! from the most significant bit down: Length-included, More-fragments,
//! Start, and five reserved bits.

use super::error::{EapError, Result};
use super::header::{Code, Header, TYPE_PEAP};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u8 {
        const LENGTH_INCLUDED = 0b1000_0000;
        const MORE_FRAGMENTS  = 0b0100_0000;
        const START           = 0b0010_0000;
    }
}

#[derive(Debug, Clone)]
pub struct Peap {
    pub code: Code,
    pub identifier: u8,
    pub flags: Flags,
    pub tls_total_length: Option<u32>,
    pub payload: Vec<u8>,
}

impl Peap {
    pub fn decode(header: &Header, buf: &[u8]) -> Result<Self> {
        if header.eap_type != TYPE_PEAP {
            return Err(EapError::UnknownType(header.eap_type));
        }
        if buf.len() < Header::SIZE + 1 {
            return Err(EapError::TooShort(buf.len()));
        }
        let flags = Flags::from_bits_truncate(buf[Header::SIZE]);
        let mut offset = Header::SIZE + 1;
        let tls_total_length = if flags.contains(Flags::LENGTH_INCLUDED) {
            if buf.len() < offset + 4 {
                return Err(EapError::TooShort(buf.len()));
            }
            let v = u32::from_be_bytes(buf[offset..offset + 4].try_into().unwrap());
            offset += 4;
            Some(v)
        } else {
            None
        };
        Ok(Peap {
            code: header.code,
            identifier: header.identifier,
            flags,
            tls_total_length,
            payload: buf[offset..].to_vec(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut body = Vec::new();
        body.push(self.flags.bits());
        if let Some(len) = self.tls_total_length {
            body.extend_from_slice(&len.to_be_bytes());
        }
        body.extend_from_slice(&self.payload);

        let length = (Header::SIZE + body.len()) as u16;
        let mut buf = Vec::with_capacity(length as usize);
        buf.extend_from_slice(&Header::encode_prefix(self.code, self.identifier, length, TYPE_PEAP));
        buf.extend_from_slice(&body);
        buf
    }
}
