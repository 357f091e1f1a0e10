//! EAP-TLV (RFC 4851 §4.2.9), restricted to the Result TLV this driver
//! actually exchanges inside a PEAP tunnel.

use super::error::{EapError, Result};
use super::header::{Code, Header, TYPE_TLV};

const RESULT_TLV_TYPE: u16 = 3;
const MANDATORY_BIT: u16 = 0x8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ResultStatus {
    Success = 1,
    Failure = 2,
}

#[derive(Debug, Clone)]
pub struct Tlv {
    pub code: Code,
    pub identifier: u8,
    pub result: ResultStatus,
}

impl Tlv {
    pub fn decode(header: &Header, buf: &[u8]) -> Result<Self> {
        if header.eap_type != TYPE_TLV {
            return Err(EapError::UnknownType(header.eap_type));
        }
        if buf.len() < Header::SIZE + 6 {
            return Err(EapError::TooShort(buf.len()));
        }
        let tlv_type = u16::from_be_bytes([buf[Header::SIZE], buf[Header::SIZE + 1]]) & !MANDATORY_BIT;
        if tlv_type != RESULT_TLV_TYPE {
            return Err(EapError::UnknownTlvType(tlv_type));
        }
        let tlv_len = u16::from_be_bytes([buf[Header::SIZE + 2], buf[Header::SIZE + 3]]);
        if tlv_len != 2 {
            return Err(EapError::InvalidTlvLength(tlv_len));
        }
        let status = u16::from_be_bytes([buf[Header::SIZE + 4], buf[Header::SIZE + 5]]);
        let result = match status {
            1 => ResultStatus::Success,
            2 => ResultStatus::Failure,
            other => return Err(EapError::UnknownTlvStatus(other)),
        };
        Ok(Tlv {
            code: header.code,
            identifier: header.identifier,
            result,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let length = (Header::SIZE + 6) as u16;
        let mut buf = Vec::with_capacity(length as usize);
        buf.extend_from_slice(&Header::encode_prefix(self.code, self.identifier, length, TYPE_TLV));
        buf.extend_from_slice(&(RESULT_TLV_TYPE | MANDATORY_BIT).to_be_bytes());
        buf.extend_from_slice(&2u16.to_be_bytes());
        buf.extend_from_slice(&(self.result as u16).to_be_bytes());
        buf
    }
}
