/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! Scripted in-memory transport.
//!
//! Bytes handed to [`MemoryTransport::feed`] become "the network": each
//! `poll` surfaces at most `chunk_size` of them into the ring buffer, which
//! lets a test deliver a message one byte at a time. Sends are captured for
//! inspection. Useful both for tests and for replaying captured sessions
//! without touching a socket.

use crate::ring::RingBuffer;
use crate::transport::{Callbacks, Transport, TransportError, MAX_READ_SIZE};
use ironwire_core::time::unix_now_nanos;
use tracing::debug;

/// Loopback transport over scripted bytes.
#[derive(Debug)]
pub struct MemoryTransport {
    ring: RingBuffer,
    pending: Vec<u8>,
    read_pos: usize,
    chunk_size: usize,
    sent: Vec<u8>,
    callbacks: Callbacks,
    active: bool,
    last_read_at: i64,
    last_sent_at: i64,
}

impl MemoryTransport {
    /// Creates a transport delivering up to [`MAX_READ_SIZE`] bytes per poll.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ring: RingBuffer::new(),
            pending: Vec::new(),
            read_pos: 0,
            chunk_size: MAX_READ_SIZE,
            sent: Vec::new(),
            callbacks: Callbacks::new(),
            active: false,
            last_read_at: 0,
            last_sent_at: 0,
        }
    }

    /// Limits how many bytes each `poll` surfaces; 1 delivers byte-by-byte.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        self.chunk_size = chunk_size;
        self
    }

    /// Installs lifecycle callbacks.
    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Appends bytes to the scripted inbound stream.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Bytes still scripted but not yet surfaced by `poll`.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len() - self.read_pos
    }

    /// Everything written through `send` so far.
    #[must_use]
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }

    /// Takes the captured outbound bytes, clearing the capture buffer.
    pub fn take_sent(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.sent)
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MemoryTransport {
    fn connect(&mut self) -> Result<(), TransportError> {
        self.active = true;
        self.callbacks.connected();
        debug!("memory transport connected");
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        if self.active {
            self.active = false;
            self.callbacks.disconnected();
            debug!("memory transport disconnected");
        }
        Ok(())
    }

    fn poll(&mut self) -> Result<usize, TransportError> {
        if !self.active {
            return Err(TransportError::NotConnected);
        }
        let available = self.pending.len() - self.read_pos;
        let n = self.chunk_size.min(available).min(self.ring.spare());
        if n == 0 {
            return Ok(0);
        }
        self.ring
            .extend_from_slice(&self.pending[self.read_pos..self.read_pos + n]);
        self.read_pos += n;
        self.last_read_at = unix_now_nanos();
        Ok(n)
    }

    fn buffered(&self) -> &[u8] {
        self.ring.as_slice()
    }

    fn consume(&mut self, n: usize) {
        self.ring.consume(n);
    }

    fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError> {
        if !self.active {
            return Err(TransportError::NotConnected);
        }
        self.sent.extend_from_slice(buf);
        self.last_sent_at = unix_now_nanos();
        Ok(buf.len())
    }

    fn active(&self) -> bool {
        self.active
    }

    fn last_sent_at(&self) -> i64 {
        self.last_sent_at
    }

    fn last_read_at(&self) -> i64 {
        self.last_read_at
    }
}
