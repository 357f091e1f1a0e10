use std::net::UdpSocket;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use eapol_drive::cli::Args;
use eapol_drive::errors::{AppError, Result};
use eapol_drive::session::{Context, Driver, Secret};

const MAX_DATAGRAM: usize = 4096;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "authentication attempt failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "eapol_drive=info",
        1 => "eapol_drive=debug",
        _ => "eapol_drive=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: Args) -> Result<()> {
    let context = Context {
        user_name: args.user,
        password: Secret(args.password),
        nas_ip: args.nas_ip,
        nas_port_id: args.nas_port_id,
        nas_shared_secret: Secret(args.nas_shared_secret),
        vlan_id: args.vlan_id,
        client_ip: args.client_ip,
        client_mac: args.client_mac,
        verify_tls: !args.insecure_tls,
    };

    let mut driver = Driver::new(&args.server, context).map_err(AppError::from)?;

    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.set_read_timeout(Some(Duration::from_secs(args.timeout_secs)))?;
    socket.connect(args.server.as_str())?;

    let initial = driver.build_initial().map_err(AppError::from)?;
    let mut outbound = initial.encode().map_err(|e| AppError::Session(e.into()))?;
    socket.send(&outbound)?;
    info!("sent initial Access-Request");

    let mut buf = [0u8; MAX_DATAGRAM];
    loop {
        let n = match socket.recv(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock || e.kind() == std::io::ErrorKind::TimedOut => {
                return Err(AppError::Timeout);
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        match driver.reply(&buf[..n]).map_err(AppError::from)? {
            Some(next) => {
                outbound = next;
                socket.send(&outbound)?;
            }
            None => {
                info!("authentication conversation finished");
                return Ok(());
            }
        }
    }
}
