use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Radius(#[from] crate::radius::RadiusError),

    #[error(transparent)]
    Eap(#[from] crate::eap::EapError),

    #[error(transparent)]
    Tunnel(#[from] crate::tunnel::TunnelError),

    #[error("MS-CHAPv2 challenge value has unexpected length")]
    MalformedChallenge,
}

pub type Result<T> = std::result::Result<T, SessionError>;
