//! Framing conventions for EAP packets carried *inside* the PEAP TLS tunnel.
//!
//! The inner conversation doesn't always look like an ordinary outer EAP
//! packet: the compact Identity response drops the 4-byte code/id/length
//! header entirely, while an inner MS-CHAPv2 packet keeps a header just
//! long enough to strip before handing it to the tunnel.

use super::header::TYPE_IDENTITY;

/// Builds the compact `type | identity` form PEAP expects for the inner
/// Identity response, with no outer code/identifier/length fields at all.
pub fn identity_response(user_name: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + user_name.len());
    buf.push(TYPE_IDENTITY);
    buf.extend_from_slice(user_name.as_bytes());
    buf
}

/// Strips the 4-byte outer EAP header (code, identifier, length) from a
/// fully-encoded inner packet, leaving `type | body` for the tunnel.
pub fn strip_outer_header(full: &[u8]) -> &[u8] {
    &full[4..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_response_has_no_header() {
        let buf = identity_response("alice");
        assert_eq!(buf[0], TYPE_IDENTITY);
        assert_eq!(&buf[1..], b"alice");
    }
}
