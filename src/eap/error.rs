use thiserror::Error;

#[derive(Debug, Error)]
pub enum EapError {
    #[error("EAP packet too short: {0} bytes")]
    TooShort(usize),

    #[error("unknown EAP code: {0}")]
    UnknownCode(u8),

    #[error("unknown EAP type: {0}")]
    UnknownType(u8),

    #[error("EAP header declares length {declared} but packet is {actual} bytes")]
    LengthMismatch { declared: u16, actual: usize },

    #[error("unknown MS-CHAPv2 op-code: {0}")]
    UnknownOpCode(u8),

    #[error("MS-CHAPv2 ms-length {ms_length} is inconsistent with header length {header_length}")]
    MsLengthMismatch { ms_length: u16, header_length: u16 },

    #[error("MS-CHAPv2 value-size {0} does not match RFC 2759 for this op-code")]
    InvalidValueSize(usize),

    #[error("unknown TLV type: {0}")]
    UnknownTlvType(u16),

    #[error("invalid TLV length: {0}")]
    InvalidTlvLength(u16),

    #[error("unknown TLV result status: {0}")]
    UnknownTlvStatus(u16),
}

pub type Result<T> = std::result::Result<T, EapError>;
