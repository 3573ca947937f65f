/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! The byte-stream contract the framing engine consumes.
//!
//! A transport owns its inbound ring buffer and exposes it as a contiguous
//! slice; the engine peeks the slice, dispatches complete messages, and
//! commits consumption with [`Transport::consume`]. `poll` is a single
//! non-blocking read step; `send` blocks until every byte is written or an
//! error occurs. Would-block conditions are swallowed inside `poll` and
//! simply retried on the next call.

use std::fmt;
use thiserror::Error;

/// Largest byte count a transport pulls off its source per `poll`.
pub const MAX_READ_SIZE: usize = 8 * 1024;

/// Errors surfaced by transport operations.
///
/// Session-fatal conditions also flip [`Transport::active`] to false and fire
/// the on-disconnect callback before the error is returned.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Establishing the underlying channel failed.
    #[error("connect failed: {0}")]
    Connect(String),

    /// The operation needs an established channel.
    #[error("transport is not connected")]
    NotConnected,

    /// The peer closed the connection.
    #[error("peer closed the connection")]
    Closed,

    /// An I/O error from the underlying channel.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// User callbacks observing the transport lifecycle.
///
/// All three are optional; an unset callback is a no-op.
#[derive(Default)]
pub struct Callbacks {
    on_connect: Option<Box<dyn FnMut()>>,
    on_disconnect: Option<Box<dyn FnMut()>>,
    on_error: Option<Box<dyn FnMut(i32, &str)>>,
}

impl Callbacks {
    /// Creates an empty callback set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback fired when the channel is established.
    #[must_use]
    pub fn on_connect(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_connect = Some(Box::new(f));
        self
    }

    /// Sets the callback fired when the channel is torn down.
    #[must_use]
    pub fn on_disconnect(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_disconnect = Some(Box::new(f));
        self
    }

    /// Sets the callback fired on transport errors, with an OS error code
    /// (or -1) and a description.
    #[must_use]
    pub fn on_error(mut self, f: impl FnMut(i32, &str) + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub(crate) fn connected(&mut self) {
        if let Some(f) = &mut self.on_connect {
            f();
        }
    }

    pub(crate) fn disconnected(&mut self) {
        if let Some(f) = &mut self.on_disconnect {
            f();
        }
    }

    pub(crate) fn error(&mut self, code: i32, message: &str) {
        if let Some(f) = &mut self.on_error {
            f(code, message);
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_connect", &self.on_connect.is_some())
            .field("on_disconnect", &self.on_disconnect.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Abstract byte-stream with a ring-buffered read side and a blocking send
/// side.
///
/// The engine is generic over this trait; dynamic dispatch through
/// `&mut dyn Transport` is also fine, since `perform` runs at a far coarser
/// cadence than the field codecs.
pub trait Transport {
    /// Establishes the underlying byte channel.
    ///
    /// # Errors
    /// Returns [`TransportError::Connect`] when the channel cannot be
    /// established.
    fn connect(&mut self) -> Result<(), TransportError>;

    /// Tears down the underlying byte channel and releases its resources.
    ///
    /// # Errors
    /// Returns an error when teardown itself fails; the transport is
    /// inactive afterwards either way.
    fn disconnect(&mut self) -> Result<(), TransportError>;

    /// One non-blocking read step: pulls available bytes into the inbound
    /// ring buffer and returns how many arrived (0 when none are available).
    ///
    /// # Errors
    /// Returns an error on channel failure; would-block conditions are not
    /// errors.
    fn poll(&mut self) -> Result<usize, TransportError>;

    /// The buffered inbound bytes, as a contiguous slice starting at the
    /// read head.
    fn buffered(&self) -> &[u8];

    /// Advances the read head past `n` consumed bytes.
    fn consume(&mut self, n: usize);

    /// Blocking write: returns once all of `buf` is written or an error
    /// occurs.
    ///
    /// # Errors
    /// Returns an error when the channel fails mid-write.
    fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError>;

    /// Returns true while the channel is established.
    fn active(&self) -> bool;

    /// Nanosecond epoch timestamp of the last successful send, 0 if none.
    fn last_sent_at(&self) -> i64;

    /// Nanosecond epoch timestamp of the last successful read, 0 if none.
    fn last_read_at(&self) -> i64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_callbacks_fire_when_set() {
        let hits = Rc::new(Cell::new(0));
        let (a, b, c) = (hits.clone(), hits.clone(), hits.clone());
        let mut cb = Callbacks::new()
            .on_connect(move || a.set(a.get() + 1))
            .on_disconnect(move || b.set(b.get() + 1))
            .on_error(move |_, _| c.set(c.get() + 1));

        cb.connected();
        cb.disconnected();
        cb.error(-1, "boom");
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn test_unset_callbacks_are_noops() {
        let mut cb = Callbacks::new();
        cb.connected();
        cb.disconnected();
        cb.error(2, "ignored");
    }

    #[test]
    fn test_debug_shows_presence() {
        let cb = Callbacks::new().on_connect(|| {});
        let repr = format!("{cb:?}");
        assert!(repr.contains("on_connect: true"));
        assert!(repr.contains("on_error: false"));
    }
}
