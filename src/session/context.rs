//! Parameters describing the credential and network identity this driver
//! impersonates for one authentication attempt.

/// Redacts its contents in `Debug` output so stray `tracing`/`{:?}` calls
/// never leak a password or shared secret into logs.
#[derive(Clone)]
pub struct Secret(pub String);

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl std::ops::Deref for Secret {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Secret(s)
    }
}

#[derive(Debug, Clone)]
pub struct Context {
    pub user_name: String,
    pub password: Secret,
    pub nas_ip: String,
    pub nas_port_id: String,
    pub nas_shared_secret: Secret,
    pub vlan_id: u32,
    pub client_ip: String,
    pub client_mac: String,
    /// Whether the PEAP tunnel validates the RADIUS server's certificate
    /// against the platform trust store. On by default; set to `false` via
    /// `--insecure-tls` when exercising a server with a certificate that
    /// won't otherwise validate.
    pub verify_tls: bool,
}
