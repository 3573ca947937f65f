/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! Non-blocking TCP transport.
//!
//! The socket is switched to non-blocking after connect: `poll` pulls
//! whatever is readable into the ring buffer and treats would-block as "no
//! data yet", while `send` loops until the full buffer is written, retrying
//! would-block in place. Nagle is disabled; a market-data or order-entry
//! session wants its bytes on the wire immediately.

use crate::ring::RingBuffer;
use crate::transport::{Callbacks, Transport, TransportError, MAX_READ_SIZE};
use ironwire_core::time::unix_now_nanos;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};
use tracing::{debug, warn};

/// TCP client transport.
#[derive(Debug)]
pub struct TcpTransport {
    host: String,
    port: u16,
    stream: Option<TcpStream>,
    ring: RingBuffer,
    callbacks: Callbacks,
    active: bool,
    last_read_at: i64,
    last_sent_at: i64,
}

impl TcpTransport {
    /// Creates a transport for `host:port`; nothing is opened until
    /// [`Transport::connect`].
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            stream: None,
            ring: RingBuffer::new(),
            callbacks: Callbacks::new(),
            active: false,
            last_read_at: 0,
            last_sent_at: 0,
        }
    }

    /// Installs lifecycle callbacks.
    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// The configured remote endpoint as `host:port`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Transport for TcpTransport {
    fn connect(&mut self) -> Result<(), TransportError> {
        if self.active {
            return Ok(());
        }
        let connected = TcpStream::connect((self.host.as_str(), self.port))
            .and_then(|stream| {
                stream.set_nodelay(true)?;
                stream.set_nonblocking(true)?;
                Ok(stream)
            });
        match connected {
            Ok(stream) => {
                self.stream = Some(stream);
                self.active = true;
                self.callbacks.connected();
                debug!(endpoint = %self.endpoint(), "tcp transport connected");
                Ok(())
            }
            Err(e) => {
                let msg = format!("{}: {e}", self.endpoint());
                self.callbacks.error(e.raw_os_error().unwrap_or(-1), &msg);
                Err(TransportError::Connect(msg))
            }
        }
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
            self.active = false;
            self.callbacks.disconnected();
            debug!(endpoint = %self.endpoint(), "tcp transport disconnected");
        }
        Ok(())
    }

    fn poll(&mut self) -> Result<usize, TransportError> {
        let mut tmp = [0u8; MAX_READ_SIZE];
        let want = tmp.len().min(self.ring.spare());
        if want == 0 {
            return Ok(0);
        }
        let read = {
            let Some(stream) = self.stream.as_mut() else {
                return Err(TransportError::NotConnected);
            };
            match stream.read(&mut tmp[..want]) {
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(0),
                Err(e) if e.kind() == ErrorKind::Interrupted => return Ok(0),
                other => other,
            }
        };
        match read {
            Ok(0) => {
                debug!(endpoint = %self.endpoint(), "peer closed the connection");
                let _ = self.disconnect();
                Err(TransportError::Closed)
            }
            Ok(n) => {
                self.ring.extend_from_slice(&tmp[..n]);
                self.last_read_at = unix_now_nanos();
                Ok(n)
            }
            Err(e) => {
                let msg = e.to_string();
                warn!(endpoint = %self.endpoint(), %msg, "tcp read failed");
                self.callbacks.error(e.raw_os_error().unwrap_or(-1), &msg);
                let _ = self.disconnect();
                Err(e.into())
            }
        }
    }

    fn buffered(&self) -> &[u8] {
        self.ring.as_slice()
    }

    fn consume(&mut self, n: usize) {
        self.ring.consume(n);
    }

    fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError> {
        // Ok(written) | Err(None) = peer closed | Err(Some(e)) = I/O failure.
        let outcome: Result<usize, Option<std::io::Error>> = {
            let Some(stream) = self.stream.as_mut() else {
                return Err(TransportError::NotConnected);
            };
            let mut written = 0usize;
            loop {
                if written == buf.len() {
                    break Ok(written);
                }
                match stream.write(&buf[written..]) {
                    Ok(0) => break Err(None),
                    Ok(n) => written += n,
                    Err(e) if e.kind() == ErrorKind::WouldBlock => continue,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => break Err(Some(e)),
                }
            }
        };
        match outcome {
            Ok(written) => {
                self.last_sent_at = unix_now_nanos();
                Ok(written)
            }
            Err(None) => {
                let _ = self.disconnect();
                Err(TransportError::Closed)
            }
            Err(Some(e)) => {
                let msg = e.to_string();
                warn!(endpoint = %self.endpoint(), %msg, "tcp write failed");
                self.callbacks.error(e.raw_os_error().unwrap_or(-1), &msg);
                Err(e.into())
            }
        }
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
