//! eapol-drive library interface
//!
//! This crate drives an 802.1X/EAP exchange against a RADIUS server,
//! impersonating the network access device (NAS) side of a PEAP/MS-CHAPv2
//! authentication.
//!
//! # Module Organization
//!
//! - [`radius`] - RADIUS packet/attribute codec and Message-Authenticator
//! - [`eap`] - EAP packet hierarchy (Identity, PEAP, MS-CHAPv2, TLV) and
//!   RFC 2759 MS-CHAPv2 cryptography
//! - [`tunnel`] - the PEAP TLS tunnel, driven by an in-memory packet
//!   transport rather than a socket
//! - [`session`] - the outer coordinator: request builder and reply
//!   dispatcher
//! - [`cli`] - command-line argument definitions
//! - [`errors`] - the crate-wide error type

pub mod cli;
pub mod eap;
pub mod errors;
pub mod radius;
pub mod session;
pub mod tunnel;
