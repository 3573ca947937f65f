/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! File replay transport.
//!
//! Reads a captured FIX byte stream from disk in [`MAX_READ_SIZE`] chunks,
//! which makes a recorded session replayable through the same engine loop
//! that drives a live socket. End of file tears the session down, so a
//! `while transport.active()` loop terminates when the capture is exhausted.
//! Sends go to an optional sink file.

use crate::ring::RingBuffer;
use crate::transport::{Callbacks, Transport, TransportError, MAX_READ_SIZE};
use ironwire_core::time::unix_now_nanos;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Transport replaying FIX bytes from a file.
#[derive(Debug)]
pub struct FileTransport {
    path: PathBuf,
    sink_path: Option<PathBuf>,
    source: Option<File>,
    sink: Option<File>,
    ring: RingBuffer,
    callbacks: Callbacks,
    active: bool,
    last_read_at: i64,
    last_sent_at: i64,
}

impl FileTransport {
    /// Creates a replay transport for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sink_path: None,
            source: None,
            sink: None,
            ring: RingBuffer::new(),
            callbacks: Callbacks::new(),
            active: false,
            last_read_at: 0,
            last_sent_at: 0,
        }
    }

    /// Routes sends into `path`, created on connect.
    #[must_use]
    pub fn with_sink(mut self, path: impl Into<PathBuf>) -> Self {
        self.sink_path = Some(path.into());
        self
    }

    /// Installs lifecycle callbacks.
    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }
}

impl Transport for FileTransport {
    fn connect(&mut self) -> Result<(), TransportError> {
        if self.active {
            return Ok(());
        }
        let source = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                let msg = format!("{}: {e}", self.path.display());
                self.callbacks.error(e.raw_os_error().unwrap_or(-1), &msg);
                return Err(TransportError::Connect(msg));
            }
        };
        if let Some(sink_path) = &self.sink_path {
            match File::create(sink_path) {
                Ok(f) => self.sink = Some(f),
                Err(e) => {
                    let msg = format!("{}: {e}", sink_path.display());
                    self.callbacks.error(e.raw_os_error().unwrap_or(-1), &msg);
                    return Err(TransportError::Connect(msg));
                }
            }
        }
        self.source = Some(source);
        self.active = true;
        self.callbacks.connected();
        debug!(path = %self.path.display(), "file transport connected");
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        if self.active {
            self.source = None;
            self.sink = None;
            self.active = false;
            self.callbacks.disconnected();
            debug!(path = %self.path.display(), "file transport disconnected");
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
            let Some(source) = self.source.as_mut() else {
                return Err(TransportError::NotConnected);
            };
            source.read(&mut tmp[..want])
        };
        match read {
            Ok(0) => {
                debug!(path = %self.path.display(), "file replay exhausted");
                let _ = self.disconnect();
                Ok(0)
            }
            Ok(n) => {
                self.ring.extend_from_slice(&tmp[..n]);
                self.last_read_at = unix_now_nanos();
                Ok(n)
            }
            Err(e) => {
                let msg = e.to_string();
                warn!(path = %self.path.display(), %msg, "file read failed");
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
        let Some(sink) = self.sink.as_mut() else {
            return Err(TransportError::NotConnected);
        };
        sink.write_all(buf)?;
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
