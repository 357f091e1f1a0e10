//! EAP-Identity (RFC 3748 §5.1).

use super::error::{EapError, Result};
use super::header::{Code, Header, TYPE_IDENTITY};

#[derive(Debug, Clone)]
pub struct Identity {
    pub code: Code,
    pub identifier: u8,
    pub identity: String,
}

impl Identity {
    pub fn decode(header: &Header, buf: &[u8]) -> Result<Self> {
        if header.eap_type != TYPE_IDENTITY {
            return Err(EapError::UnknownType(header.eap_type));
        }
        let identity = String::from_utf8_lossy(&buf[Header::SIZE..]).into_owned();
        Ok(Identity {
            code: header.code,
            identifier: header.identifier,
            identity,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let length = (Header::SIZE + self.identity.len()) as u16;
        let mut buf = Vec::with_capacity(length as usize);
        buf.extend_from_slice(&Header::encode_prefix(
            self.code,
            self.identifier,
            length,
            TYPE_IDENTITY,
        ));
        buf.extend_from_slice(self.identity.as_bytes());
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let identity = Identity {
            code: Code::Response,
            identifier: 7,
            identity: "alice@example.com".into(),
        };
        let encoded = identity.encode();
        let header = Header::decode(&encoded).unwrap();
        let decoded = Identity::decode(&header, &encoded).unwrap();
        assert_eq!(decoded.identity, "alice@example.com");
        assert_eq!(decoded.identifier, 7);
    }
}
