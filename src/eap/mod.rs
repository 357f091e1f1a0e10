//! EAP (RFC 3748) packet hierarchy: Identity, PEAP, MS-CHAPv2, and the
//! Result TLV, plus the RFC 2759 cryptography MS-CHAPv2 needs.

pub mod crypto;
pub mod error;
pub mod header;
pub mod identity;
pub mod mschapv2;
pub mod peap;
pub mod peap_inner;
pub mod tlv;

pub use error::{EapError, Result};
pub use header::Code;

/// The closed set of EAP packet shapes this driver speaks, dispatched by
/// (code, type) in [`EapPacket::decode`]. Mirrors the way this crate's
/// other protocol layers model a family of related wire formats as one
/// tagged enum rather than a trait object per variant.
#[derive(Debug, Clone)]
pub enum EapPacket {
    Identity(identity::Identity),
    Peap(peap::Peap),
    MsChapV2(mschapv2::MsChapV2),
    Tlv(tlv::Tlv),
    /// A bare Success or Failure: 4 bytes, no Type field at all.
    SuccessOrFailure { code: Code, identifier: u8 },
}

impl EapPacket {
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < 4 {
            return Err(EapError::TooShort(buf.len()));
        }
        let code = Code::from_u8(buf[0]).ok_or(EapError::UnknownCode(buf[0]))?;
        if matches!(code, Code::Success | Code::Failure) {
            let length = u16::from_be_bytes([buf[2], buf[3]]);
            if length != 4 || buf.len() != 4 {
                return Err(EapError::LengthMismatch {
                    declared: length,
                    actual: buf.len(),
                });
            }
            return Ok(EapPacket::SuccessOrFailure {
                code,
                identifier: buf[1],
            });
        }

        let header = header::Header::decode(buf)?;
        match header.eap_type {
            header::TYPE_IDENTITY => Ok(EapPacket::Identity(identity::Identity::decode(&header, buf)?)),
            header::TYPE_PEAP => Ok(EapPacket::Peap(peap::Peap::decode(&header, buf)?)),
            header::TYPE_MSCHAPV2 => Ok(EapPacket::MsChapV2(mschapv2::MsChapV2::decode(&header, buf)?)),
            header::TYPE_TLV => Ok(EapPacket::Tlv(tlv::Tlv::decode(&header, buf)?)),
            other => Err(EapError::UnknownType(other)),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            EapPacket::Identity(p) => p.encode(),
            EapPacket::Peap(p) => p.encode(),
            EapPacket::MsChapV2(p) => p.encode(),
            EapPacket::Tlv(p) => p.encode(),
            EapPacket::SuccessOrFailure { code, identifier } => {
                let mut buf = Vec::with_capacity(4);
                buf.push(*code as u8);
                buf.push(*identifier);
                buf.extend_from_slice(&4u16.to_be_bytes());
                buf
            }
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            EapPacket::Identity(p) => p.identifier,
            EapPacket::Peap(p) => p.identifier,
            EapPacket::MsChapV2(p) => p.identifier,
            EapPacket::Tlv(p) => p.identifier,
            EapPacket::SuccessOrFailure { identifier, .. } => *identifier,
        }
    }

    pub fn code(&self) -> Code {
        match self {
            EapPacket::Identity(p) => p.code,
            EapPacket::Peap(p) => p.code,
            EapPacket::MsChapV2(p) => p.code,
            EapPacket::Tlv(p) => p.code,
            EapPacket::SuccessOrFailure { code, .. } => *code,
        }
    }

    pub fn eap_type(&self) -> Option<u8> {
        match self {
            EapPacket::Identity(_) => Some(header::TYPE_IDENTITY),
            EapPacket::Peap(_) => Some(header::TYPE_PEAP),
            EapPacket::MsChapV2(_) => Some(header::TYPE_MSCHAPV2),
            EapPacket::Tlv(_) => Some(header::TYPE_TLV),
            EapPacket::SuccessOrFailure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_success_and_failure_without_type_byte() {
        let mut buf = vec![3, 5];
        buf.extend_from_slice(&4u16.to_be_bytes());
        match EapPacket::decode(&buf).unwrap() {
            EapPacket::SuccessOrFailure { code, identifier } => {
                assert_eq!(code, Code::Success);
                assert_eq!(identifier, 5);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn dispatches_to_peap_by_type() {
        let inner = peap::Peap {
            code: Code::Request,
            identifier: 2,
            flags: peap::Flags::START,
            tls_total_length: None,
            payload: Vec::new(),
        };
        let encoded = inner.encode();
        match EapPacket::decode(&encoded).unwrap() {
            EapPacket::Peap(p) => assert!(p.flags.contains(peap::Flags::START)),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
