//! Command-line argument definitions.

use clap::Parser;

/// Drive a PEAP/MS-CHAPv2 802.1X authentication against a RADIUS server,
/// impersonating the network access device.
#[derive(Debug, Parser)]
#[command(name = "eapol-drive", version, about)]
pub struct Args {
    /// RADIUS server address, host:port.
    #[arg(long, env = "EAPOL_DRIVE_SERVER")]
    pub server: String,

    /// Identity to authenticate as.
    #[arg(long, env = "EAPOL_DRIVE_USER")]
    pub user: String,

    /// Password for the identity above.
    #[arg(long, env = "EAPOL_DRIVE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// RADIUS shared secret between this driver and the server.
    #[arg(long = "secret", env = "EAPOL_DRIVE_SECRET", hide_env_values = true)]
    pub nas_shared_secret: String,

    /// IP address this driver presents as the NAS-IP-Address.
    #[arg(long, default_value = "127.0.0.1")]
    pub nas_ip: String,

    /// Interface name reported in NAS-Port-Id.
    #[arg(long, default_value = "GigabitEthernet0/0")]
    pub nas_port_id: String,

    /// VLAN ID reported in NAS-Port-Id.
    #[arg(long, default_value_t = 1)]
    pub vlan_id: u32,

    /// Framed-IP-Address reported for the authenticating client.
    #[arg(long, default_value = "0.0.0.0")]
    pub client_ip: String,

    /// Calling-Station-Id (MAC address) reported for the authenticating client.
    #[arg(long, default_value = "00:00:00:00:00:00")]
    pub client_mac: String,

    /// Skip validating the RADIUS server's TLS certificate against the
    /// platform trust store. Verification is on by default.
    #[arg(long)]
    pub insecure_tls: bool,

    /// Socket read timeout, in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
