//! EAP-MSCHAPv2 (RFC 2759 / draft-kamath-pppext-eap-mschapv2-00).
//!
//! Four wire shapes share this EAP type, distinguished by (outer code,
//! op-code):
//!
//! - Request/Challenge and Response/Response carry a 1-byte value-size, a
//!   value, and a trailing name.
//! - Request/Success and Request/Failure carry an ms-id and a free-text
//!   message, no value-size.
//! - Response/Success and Response/Failure are a bare 6-byte ack: no
//!   ms-id, no length, just the op-code.

use super::error::{EapError, Result};
use super::header::{Code, Header, TYPE_MSCHAPV2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    Challenge = 1,
    Response = 2,
    Success = 3,
    Failure = 4,
    ChangePassword = 7,
}

impl OpCode {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(OpCode::Challenge),
            2 => Some(OpCode::Response),
            3 => Some(OpCode::Success),
            4 => Some(OpCode::Failure),
            7 => Some(OpCode::ChangePassword),
            _ => None,
        }
    }
}

const VALUE_SIZE_CHALLENGE: usize = 0x10;
const VALUE_SIZE_RESPONSE: usize = 0x31;

#[derive(Debug, Clone)]
pub struct MsChapV2 {
    pub code: Code,
    pub identifier: u8,
    pub op_code: OpCode,
    /// Absent only for the compact Response/Success and Response/Failure ack.
    pub ms_id: Option<u8>,
    pub value: Vec<u8>,
    pub name: String,
    pub message: String,
}

impl MsChapV2 {
    pub fn decode(header: &Header, buf: &[u8]) -> Result<Self> {
        if header.eap_type != TYPE_MSCHAPV2 {
            return Err(EapError::UnknownType(header.eap_type));
        }
        if buf.len() < Header::SIZE + 1 {
            return Err(EapError::TooShort(buf.len()));
        }
        let op_code = OpCode::from_u8(buf[Header::SIZE]).ok_or(EapError::UnknownOpCode(buf[Header::SIZE]))?;

        if header.code == Code::Response && matches!(op_code, OpCode::Success | OpCode::Failure) {
            if buf.len() != Header::SIZE + 1 {
                return Err(EapError::LengthMismatch {
                    declared: header.length,
                    actual: buf.len(),
                });
            }
            return Ok(MsChapV2 {
                code: header.code,
                identifier: header.identifier,
                op_code,
                ms_id: None,
                value: Vec::new(),
                name: String::new(),
                message: String::new(),
            });
        }

        if buf.len() < Header::SIZE + 4 {
            return Err(EapError::TooShort(buf.len()));
        }
        let ms_id = buf[Header::SIZE + 1];
        let ms_length = u16::from_be_bytes([buf[Header::SIZE + 2], buf[Header::SIZE + 3]]);
        if ms_length as usize + Header::SIZE != header.length as usize {
            return Err(EapError::MsLengthMismatch {
                ms_length,
                header_length: header.length,
            });
        }

        if header.code == Code::Request && matches!(op_code, OpCode::Success | OpCode::Failure) {
            let message = String::from_utf8_lossy(&buf[Header::SIZE + 4..]).into_owned();
            return Ok(MsChapV2 {
                code: header.code,
                identifier: header.identifier,
                op_code,
                ms_id: Some(ms_id),
                value: Vec::new(),
                name: String::new(),
                message,
            });
        }

        if (header.code == Code::Request && op_code == OpCode::Challenge)
            || (header.code == Code::Response && op_code == OpCode::Response)
        {
            let value_offset = Header::SIZE + 4;
            if buf.len() <= value_offset {
                return Err(EapError::TooShort(buf.len()));
            }
            let value_size = buf[value_offset] as usize;
            let expected = if op_code == OpCode::Challenge {
                VALUE_SIZE_CHALLENGE
            } else {
                VALUE_SIZE_RESPONSE
            };
            if value_size != expected {
                return Err(EapError::InvalidValueSize(value_size));
            }
            let name_offset = value_offset + 1 + value_size;
            if buf.len() <= name_offset {
                return Err(EapError::TooShort(buf.len()));
            }
            let value = buf[value_offset + 1..name_offset].to_vec();
            let name = String::from_utf8_lossy(&buf[name_offset..]).into_owned();
            return Ok(MsChapV2 {
                code: header.code,
                identifier: header.identifier,
                op_code,
                ms_id: Some(ms_id),
                value,
                name,
                message: String::new(),
            });
        }

        Ok(MsChapV2 {
            code: header.code,
            identifier: header.identifier,
            op_code,
            ms_id: Some(ms_id),
            value: Vec::new(),
            name: String::new(),
            message: String::new(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        if self.code == Code::Response && matches!(self.op_code, OpCode::Success | OpCode::Failure) {
            let length = (Header::SIZE + 1) as u16;
            let mut buf = Vec::with_capacity(length as usize);
            buf.extend_from_slice(&Header::encode_prefix(self.code, self.identifier, length, TYPE_MSCHAPV2));
            buf.push(self.op_code as u8);
            return buf;
        }

        if self.code == Code::Request && matches!(self.op_code, OpCode::Success | OpCode::Failure) {
            let message = self.message.as_bytes();
            let length = (Header::SIZE + 4 + message.len()) as u16;
            let mut buf = Vec::with_capacity(length as usize);
            buf.extend_from_slice(&Header::encode_prefix(self.code, self.identifier, length, TYPE_MSCHAPV2));
            buf.push(self.op_code as u8);
            buf.push(self.ms_id.unwrap_or(0));
            buf.extend_from_slice(&(length - Header::SIZE as u16).to_be_bytes());
            buf.extend_from_slice(message);
            return buf;
        }

        if (self.code == Code::Request && self.op_code == OpCode::Challenge)
            || (self.code == Code::Response && self.op_code == OpCode::Response)
        {
            let name = self.name.as_bytes();
            let length = (Header::SIZE + 4 + 1 + self.value.len() + name.len()) as u16;
            let mut buf = Vec::with_capacity(length as usize);
            buf.extend_from_slice(&Header::encode_prefix(self.code, self.identifier, length, TYPE_MSCHAPV2));
            buf.push(self.op_code as u8);
            buf.push(self.ms_id.unwrap_or(0));
            buf.extend_from_slice(&(length - Header::SIZE as u16).to_be_bytes());
            buf.push(self.value.len() as u8);
            buf.extend_from_slice(&self.value);
            buf.extend_from_slice(name);
            return buf;
        }

        let length = (Header::SIZE + 4) as u16;
        let mut buf = Vec::with_capacity(length as usize);
        buf.extend_from_slice(&Header::encode_prefix(self.code, self.identifier, length, TYPE_MSCHAPV2));
        buf.push(self.op_code as u8);
        buf.push(self.ms_id.unwrap_or(0));
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_challenge() {
        let msg = MsChapV2 {
            code: Code::Request,
            identifier: 9,
            op_code: OpCode::Challenge,
            ms_id: Some(9),
            value: vec![0xAA; 16],
            name: "server1".into(),
            message: String::new(),
        };
        let encoded = msg.encode();
        let header = Header::decode(&encoded).unwrap();
        let decoded = MsChapV2::decode(&header, &encoded).unwrap();
        assert_eq!(decoded.value, vec![0xAA; 16]);
        assert_eq!(decoded.name, "server1");
        assert_eq!(decoded.op_code, OpCode::Challenge);
    }

    #[test]
    fn round_trips_response() {
        let msg = MsChapV2 {
            code: Code::Response,
            identifier: 9,
            op_code: OpCode::Response,
            ms_id: Some(9),
            value: vec![0xBB; 49],
            name: "alice".into(),
            message: String::new(),
        };
        let encoded = msg.encode();
        let header = Header::decode(&encoded).unwrap();
        let decoded = MsChapV2::decode(&header, &encoded).unwrap();
        assert_eq!(decoded.value.len(), 49);
        assert_eq!(decoded.name, "alice");
    }

    #[test]
    fn round_trips_compact_response_success() {
        let msg = MsChapV2 {
            code: Code::Response,
            identifier: 9,
            op_code: OpCode::Success,
            ms_id: None,
            value: Vec::new(),
            name: String::new(),
            message: String::new(),
        };
        let encoded = msg.encode();
        assert_eq!(encoded.len(), 6);
        let header = Header::decode(&encoded).unwrap();
        let decoded = MsChapV2::decode(&header, &encoded).unwrap();
        assert_eq!(decoded.op_code, OpCode::Success);
        assert!(decoded.ms_id.is_none());
    }

    #[test]
    fn rejects_wrong_value_size_for_challenge() {
        let mut encoded = MsChapV2 {
            code: Code::Request,
            identifier: 1,
            op_code: OpCode::Challenge,
            ms_id: Some(1),
            value: vec![0u8; 16],
            name: String::new(),
            message: String::new(),
        }
        .encode();
        // corrupt the value-size byte
        encoded[9] = 5;
        let header = Header::decode(&encoded).unwrap();
        assert!(matches!(
            MsChapV2::decode(&header, &encoded),
            Err(EapError::InvalidValueSize(5))
        ));
    }
}
