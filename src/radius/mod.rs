//! RADIUS (RFC 2865) packet and attribute handling.

pub mod attribute;
pub mod error;
pub mod packet;

pub use attribute::{NasPortType, ServiceType};
pub use error::{RadiusError, Result};
pub use packet::{Code, Packet};
