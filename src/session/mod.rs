//! Session-level coordination: the RADIUS/EAP/PEAP/MS-CHAPv2 conversation.

pub mod context;
pub mod driver;
pub mod error;

pub use context::{Context, Secret};
pub use driver::Driver;
pub use error::{Result, SessionError};
