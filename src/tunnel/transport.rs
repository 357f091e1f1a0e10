//! An in-memory duplex byte pipe standing in for a socket.
//!
//! rustls drives a [`ClientConnection`](rustls::ClientConnection) over
//! anything implementing `Read`/`Write`; this gives it a pipe whose other
//! end is fed and drained by the RADIUS session driver one datagram at a
//! time, rather than a real network connection. Reads block until data
//! shows up (via a condvar, exactly like a blocking socket read would);
//! writes are buffered and always succeed immediately.

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::{Arc, Condvar, Mutex};

#[derive(Default)]
struct QueueState {
    buf: VecDeque<u8>,
}

#[derive(Clone)]
pub struct ByteQueue {
    state: Arc<Mutex<QueueState>>,
    cond: Arc<Condvar>,
}

impl ByteQueue {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            cond: Arc::new(Condvar::new()),
        }
    }

    pub fn push(&self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        let mut guard = self.state.lock().unwrap();
        guard.buf.extend(data.iter().copied());
        drop(guard);
        self.cond.notify_all();
    }

    /// Drains whatever is queued right now without blocking. Used to pull a
    /// handshake or application-data fragment the TLS engine has produced.
    pub fn drain(&self) -> Vec<u8> {
        let mut guard = self.state.lock().unwrap();
        guard.buf.drain(..).collect()
    }
}

impl Read for ByteQueue {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let mut guard = self.state.lock().unwrap();
        while guard.buf.is_empty() {
            guard = self.cond.wait(guard).unwrap();
        }
        let n = out.len().min(guard.buf.len());
        for slot in out.iter_mut().take(n) {
            *slot = guard.buf.pop_front().unwrap();
        }
        Ok(n)
    }
}

impl Write for ByteQueue {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.push(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The `Read + Write` half rustls actually drives: reads pull ciphertext
/// that arrived from the peer, writes queue ciphertext bound for the peer.
pub struct TunnelIo {
    pub from_peer: ByteQueue,
    pub to_peer: ByteQueue,
}

impl Read for TunnelIo {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.from_peer.read(buf)
    }
}

impl Write for TunnelIo {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.to_peer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn read_blocks_until_data_is_pushed() {
        let queue = ByteQueue::new();
        let reader = queue.clone();
        let handle = thread::spawn(move || {
            let mut q = reader;
            let mut buf = [0u8; 4];
            q.read(&mut buf).unwrap();
            buf
        });

        thread::sleep(Duration::from_millis(20));
        queue.push(b"ping");

        assert_eq!(&handle.join().unwrap(), b"ping");
    }

    #[test]
    fn drain_returns_everything_queued_without_blocking() {
        let queue = ByteQueue::new();
        queue.push(b"hello");
        assert_eq!(queue.drain(), b"hello".to_vec());
        assert_eq!(queue.drain(), Vec::<u8>::new());
    }
}
