//! RADIUS attribute type numbers and value encoders.
//!
//! Only the attribute types this driver actually sends or reads are named
//! here; an unrecognized type number simply passes through the attribute
//! list untouched.

use std::net::Ipv4Addr;

use super::error::{RadiusError, Result};

pub const USER_NAME: u8 = 1;
pub const NAS_IP_ADDRESS: u8 = 4;
pub const SERVICE_TYPE: u8 = 6;
pub const FRAMED_IP_ADDRESS: u8 = 8;
pub const FRAMED_MTU: u8 = 12;
pub const STATE: u8 = 24;
pub const CALLING_STATION_ID: u8 = 31;
pub const NAS_PORT_TYPE: u8 = 61;
pub const EAP_MESSAGE: u8 = 79;
pub const MESSAGE_AUTHENTICATOR: u8 = 80;
pub const NAS_PORT_ID: u8 = 87;

/// Largest value an RFC 2865 attribute can carry (255-byte TLV minus the
/// 2-byte type/length prefix).
pub const MAX_VALUE_LEN: usize = 253;

/// The chunk size `EAPMessage` attributes are split into when an EAP
/// payload would otherwise overrun a single attribute.
pub const EAP_MESSAGE_CHUNK_LEN: usize = 253;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ServiceType {
    FramedUser = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum NasPortType {
    Ethernet = 15,
}

pub fn string_value(s: &str) -> Result<Vec<u8>> {
    bytes_value(s.as_bytes())
}

pub fn bytes_value(b: &[u8]) -> Result<Vec<u8>> {
    if b.len() > MAX_VALUE_LEN {
        return Err(RadiusError::ValueTooLong(b.len()));
    }
    Ok(b.to_vec())
}

pub fn integer_value(v: u32) -> Vec<u8> {
    v.to_be_bytes().to_vec()
}

pub fn ipv4_value(addr: &str) -> Result<Vec<u8>> {
    let ip: Ipv4Addr = addr.parse().map_err(|_| RadiusError::InvalidIpv4)?;
    Ok(ip.octets().to_vec())
}

/// Builds the `NAS-Port-Id` text RADIUS servers expect for a switched
/// Ethernet port carrying a tagged VLAN: `slot=%d;subslot=%d;port=%d;vlanid=%d;interfaceName=%s`.
pub fn nas_port_id(interface_name: &str, vlan_id: u32) -> String {
    format!("slot=0;subslot=0;port=0;vlanid={vlan_id};interfaceName={interface_name}")
}
