use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadiusError {
    #[error("packet too short: {0} bytes, need at least 20")]
    TooShort(usize),

    #[error("invalid packet length field: {0}")]
    InvalidLength(u16),

    #[error("attribute at offset {offset} declares length {length}, which overruns the packet")]
    AttributeOverrun { offset: usize, length: usize },

    #[error("attribute {0} has invalid length (must be at least 2)")]
    AttributeTooShort(u8),

    #[error("packet would encode to {0} bytes, which exceeds the 4096-byte maximum")]
    TooLarge(usize),

    #[error("attribute value is {0} bytes, which exceeds the 253-byte maximum")]
    ValueTooLong(usize),

    #[error("invalid IPv4 address")]
    InvalidIpv4,

    #[error("attribute type {0} not present in packet")]
    NoAttribute(u8),

    #[error("failed to key the Message-Authenticator HMAC")]
    HmacKey,
}

pub type Result<T> = std::result::Result<T, RadiusError>;
