//! The PEAP tunnel: a TLS client connection driven over an in-memory
//! transport instead of a socket.
//!
//! A background thread drives the handshake to completion exactly the way
//! a real client would drive it over a blocking socket, it just reads and
//! writes against [`transport::ByteQueue`] pipes that the session driver
//! feeds one PEAP fragment at a time, rather than a live connection.

pub mod cert_verify;
pub mod error;
pub mod transport;

use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use rustls::{ClientConnection, StreamOwned};

use transport::{ByteQueue, TunnelIo};

pub use error::{Result, TunnelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Init,
    Handshaking,
    Open,
}

struct StatusCell {
    status: Mutex<Status>,
    cond: Condvar,
}

/// The PEAP tunnel's TLS session, plus the handshake countdown state
/// described in [`Tunnel::handshake`].
pub struct Tunnel {
    from_peer: ByteQueue,
    to_peer: ByteQueue,
    status: Arc<StatusCell>,
    stream: Arc<Mutex<StreamOwned<ClientConnection, TunnelIo>>>,
    handshake_remaining: Mutex<u32>,
}

impl Tunnel {
    pub fn new(server_name: &str, verify_tls: bool) -> Result<Self> {
        let config = cert_verify::build_client_config(verify_tls)?;
        let name = rustls::pki_types::ServerName::try_from(server_name.to_string())
            .map_err(|_| TunnelError::InvalidServerName(server_name.to_string()))?;
        let conn = ClientConnection::new(Arc::new(config), name).map_err(TunnelError::Tls)?;

        let from_peer = ByteQueue::new();
        let to_peer = ByteQueue::new();
        let io = TunnelIo {
            from_peer: from_peer.clone(),
            to_peer: to_peer.clone(),
        };
        let stream = Arc::new(Mutex::new(StreamOwned::new(conn, io)));
        let status = Arc::new(StatusCell {
            status: Mutex::new(Status::Handshaking),
            cond: Condvar::new(),
        });

        spawn_handshake_driver(Arc::clone(&stream), Arc::clone(&status));

        Ok(Tunnel {
            from_peer,
            to_peer,
            status,
            stream,
            handshake_remaining: Mutex::new(0),
        })
    }

    pub fn status(&self) -> Status {
        *self.status.status.lock().unwrap()
    }

    /// Drains whatever ciphertext the TLS engine currently has queued for
    /// the peer, without blocking.
    pub fn read(&self) -> Vec<u8> {
        self.to_peer.drain()
    }

    /// Feeds one inbound PEAP fragment to the handshake in progress.
    ///
    /// `tls_total_length` (present only on the first fragment of a
    /// multi-fragment message, per the PEAP Length-included flag) seeds a
    /// byte countdown; each subsequent call decrements it by the fragment
    /// size. Once the countdown reaches zero a complete TLS record has
    /// been reassembled and is handed off to the handshake driver thread,
    /// whose response (if any) is returned. Otherwise this returns an
    /// empty vector. The caller still sends a reply datagram for it (an
    /// explicit zero-length acknowledgement fragment); it just carries no
    /// TLS payload yet.
    pub fn handshake(&self, fragment: &[u8], tls_total_length: Option<u32>) -> Vec<u8> {
        let mut remaining = self.handshake_remaining.lock().unwrap();
        if let Some(len) = tls_total_length {
            if len > 0 {
                *remaining = len;
            }
        }
        let n = fragment.len() as u32;
        self.from_peer.push(fragment);
        if *remaining == 0 {
            return Vec::new();
        }
        if n > 0 {
            *remaining = remaining.saturating_sub(n);
        }
        if *remaining == 0 {
            drop(remaining);
            self.read()
        } else {
            Vec::new()
        }
    }

    /// Decrypts one inbound PEAP application-data fragment once the tunnel
    /// is open.
    pub fn decode(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        tracing::trace!(ciphertext = %hex::encode(ciphertext), "tunnel decode input");
        self.from_peer.push(ciphertext);
        let mut stream = self.stream.lock().unwrap();
        let mut buf = [0u8; 4096];
        let n = std::io::Read::read(&mut *stream, &mut buf).map_err(TunnelError::Io)?;
        let plaintext = buf[..n].to_vec();
        tracing::trace!(plaintext = %hex::encode(&plaintext), "tunnel decode output");
        Ok(plaintext)
    }

    /// Encrypts plaintext for the peer and returns the ciphertext fragment
    /// ready to embed in an outbound PEAP response.
    pub fn encode(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        tracing::trace!(plaintext = %hex::encode(plaintext), "tunnel encode input");
        {
            let mut stream = self.stream.lock().unwrap();
            std::io::Write::write_all(&mut *stream, plaintext).map_err(TunnelError::Io)?;
        }
        let ciphertext = self.read();
        tracing::trace!(ciphertext = %hex::encode(&ciphertext), "tunnel encode output");
        Ok(ciphertext)
    }
}

fn spawn_handshake_driver(stream: Arc<Mutex<StreamOwned<ClientConnection, TunnelIo>>>, status: Arc<StatusCell>) {
    thread::spawn(move || loop {
        let mut guard = stream.lock().unwrap();
        if !guard.conn.is_handshaking() {
            drop(guard);
            *status.status.lock().unwrap() = Status::Open;
            status.cond.notify_all();
            tracing::debug!("PEAP TLS handshake complete");
            return;
        }
        let s = &mut *guard;
        if let Err(err) = s.conn.complete_io(&mut s.sock) {
            tracing::warn!(error = %err, "PEAP TLS handshake failed");
            return;
        }
    });
}
