//! Crate-wide error aggregation.

use thiserror::Error;

/// Top-level error type returned by the binary entry point.
///
/// Layer-specific errors ([`crate::radius::RadiusError`], [`crate::eap::EapError`],
/// [`crate::tunnel::TunnelError`], [`crate::session::SessionError`]) are folded in
/// through `#[from]` so callers at the edge only need to match on one type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Session(#[from] crate::session::SessionError),

    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    Argument(String),

    #[error("timed out waiting for a RADIUS reply")]
    Timeout,
}

pub type Result<T> = std::result::Result<T, AppError>;
