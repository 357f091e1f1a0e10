use thiserror::Error;

#[derive(Debug, Error)]
pub enum TunnelError {
    #[error("invalid TLS server name: {0}")]
    InvalidServerName(String),

    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    #[error("TLS I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TunnelError>;
