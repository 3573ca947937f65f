/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! The framing engine: couples a transport and a message visitor.
//!
//! [`Engine::perform`] is one cooperative step of the receive loop. When at
//! least [`MIN_HEADER_SPAN`] bytes are buffered it peeks the three leading
//! fields (BeginString, BodyLength, MessageType) without consuming them,
//! computes the total on-wire length, and dispatches one complete message to
//! the visitor; otherwise it polls the transport once. Callers drive
//! `perform` in a loop.
//!
//! Dispatch requires the buffered byte count to *strictly exceed* the frame
//! length, so a message that exactly fills the buffer waits for one more
//! byte. Deliberate: this reproduces the wire-compatible behavior of
//! existing deployments of this framing.
//!
//! Outbound, [`Engine::send_message`] serializes into an internal 8 KiB
//! scratch buffer and hands the bytes to the transport;
//! [`Engine::send_stamped`] first stamps MsgSeqNum and SendingTime, which is
//! the per-message housekeeping a session owes its counterparty.

use crate::sequence::Sequencer;
use crate::transport::{Transport, TransportError};
use ironwire_codec::tags::{BeginString, BodyLength, MsgSeqNum, SendingTime};
use ironwire_codec::{
    fix_group, Cursor, FixVersion, Has, Message, MessageType, Part, Parts,
};
use ironwire_core::msgtype::MsgType;
use ironwire_core::time::ClockPrecision;
use tracing::trace;

/// Minimum buffered bytes before the engine peeks a frame; the three leading
/// fields always fit within this span, and BodyLength must be fully present
/// before the total length can be computed.
pub const MIN_HEADER_SPAN: usize = 32;

/// On-wire size of the checksum trailer: `10=NNN` plus SOH.
const CHECKSUM_SPAN: usize = 7;

/// Outbound scratch size. Larger messages must be serialized by the caller
/// and written through the transport directly.
const SCRATCH_LEN: usize = 8 * 1024;

/// Receiver of dispatched inbound messages.
///
/// `frame` is the complete message including header and trailer, borrowed
/// from the transport's ring buffer for the duration of the call. Unknown
/// message-type codes arrive as [`MsgType::Unknown`]; what to do with them
/// is the visitor's call.
pub trait MessageVisitor {
    /// Handles one complete inbound message.
    fn on_message(&mut self, msg_type: MsgType, frame: &[u8]);
}

/// Adapts a closure into a [`MessageVisitor`].
#[derive(Debug)]
pub struct FnVisitor<F>(pub F);

impl<F: FnMut(MsgType, &[u8])> MessageVisitor for FnVisitor<F> {
    fn on_message(&mut self, msg_type: MsgType, frame: &[u8]) {
        (self.0)(msg_type, frame);
    }
}

fix_group! {
    struct Initials {
        begin_string: BeginString,
        body_length: BodyLength,
        msg_type: MessageType,
    }
}

/// Peeks the three leading fields and computes the total frame length:
/// `width(BeginString) + width(BodyLength) + BodyLength + 7`.
fn peek_frame(buffered: &[u8]) -> Option<(MsgType, usize)> {
    let mut initials = Initials::default();
    let mut cursor = Cursor::new(buffered);
    initials.parse(&mut cursor).ok()?;
    let begin_width = initials.get::<BeginString>().width();
    if begin_width == 0 {
        return None;
    }
    let body_length = usize::try_from(initials.get::<BodyLength>().get()?).ok()?;
    let frame_len =
        begin_width + initials.get::<BodyLength>().width() + body_length + CHECKSUM_SPAN;
    Some((initials.get::<MessageType>().get(), frame_len))
}

/// Framing/session engine over one transport and one visitor.
#[derive(Debug)]
pub struct Engine<T, Vis> {
    transport: T,
    visitor: Vis,
    sequencer: Sequencer,
    scratch: Box<[u8; SCRATCH_LEN]>,
}

impl<T: Transport, Vis: MessageVisitor> Engine<T, Vis> {
    /// Creates an engine owning `transport` and `visitor`.
    #[must_use]
    pub fn new(transport: T, visitor: Vis) -> Self {
        Self {
            transport,
            visitor,
            sequencer: Sequencer::new(),
            scratch: Box::new([0u8; SCRATCH_LEN]),
        }
    }

    /// Establishes the transport channel; a no-op when already active.
    ///
    /// # Errors
    /// Propagates the transport's connect failure.
    pub fn connect(&mut self) -> Result<(), TransportError> {
        if self.transport.active() {
            return Ok(());
        }
        self.transport.connect()
    }

    /// Tears the transport channel down.
    ///
    /// # Errors
    /// Propagates the transport's teardown failure.
    pub fn disconnect(&mut self) -> Result<(), TransportError> {
        self.transport.disconnect()
    }

    /// One non-blocking step of the receive loop; returns whether a message
    /// was dispatched.
    pub fn perform(&mut self) -> bool {
        if self.transport.buffered().len() >= MIN_HEADER_SPAN {
            if let Some((msg_type, frame_len)) = peek_frame(self.transport.buffered()) {
                if self.transport.buffered().len() > frame_len {
                    let frame = &self.transport.buffered()[..frame_len];
                    trace!(%msg_type, len = frame_len, "dispatching inbound message");
                    self.visitor.on_message(msg_type, frame);
                    self.transport.consume(frame_len);
                    return frame_len > 0;
                }
            }
        }
        if let Err(err) = self.transport.poll() {
            trace!(%err, "transport poll failed");
        }
        false
    }

    /// Serializes `msg` (updating body length and checksum) into the scratch
    /// buffer and sends it. Returns bytes sent, 0 for an empty serialization.
    ///
    /// # Errors
    /// Propagates the transport's send failure.
    pub fn send_message<Ver, B>(
        &mut self,
        msg: &mut Message<Ver, B>,
    ) -> Result<usize, TransportError>
    where
        Ver: FixVersion,
        B: Part<Leader = MessageType>,
    {
        let len = msg.dump(&mut self.scratch[..], true, true);
        if len == 0 {
            return Ok(0);
        }
        trace!(len, "sending outbound message");
        self.transport.send(&self.scratch[..len])
    }

    /// Stamps MsgSeqNum from the engine's sequencer and SendingTime with the
    /// current UTC time, then sends.
    ///
    /// # Errors
    /// Propagates the transport's send failure.
    pub fn send_stamped<Ver, B>(
        &mut self,
        msg: &mut Message<Ver, B>,
        precision: ClockPrecision,
    ) -> Result<usize, TransportError>
    where
        Ver: FixVersion,
        B: Part<Leader = MessageType> + Has<MsgSeqNum> + Has<SendingTime>,
    {
        let seq = self.sequencer.allocate_outbound();
        msg.get_mut::<MsgSeqNum>().set(seq as i64);
        msg.get_mut::<SendingTime>().set_now(precision);
        self.send_message(msg)
    }

    /// Borrows the transport.
    #[inline]
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrows the transport.
    #[inline]
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Borrows the visitor.
    #[inline]
    #[must_use]
    pub fn visitor(&self) -> &Vis {
        &self.visitor
    }

    /// Mutably borrows the visitor.
    #[inline]
    pub fn visitor_mut(&mut self) -> &mut Vis {
        &mut self.visitor
    }

    /// Borrows the sequence housekeeping state.
    #[inline]
    #[must_use]
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Mutably borrows the sequence housekeeping state.
    #[inline]
    pub fn sequencer_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencer
    }

    /// Releases the transport and visitor.
    #[must_use]
    pub fn into_parts(self) -> (T, Vis) {
        (self.transport, self.visitor)
    }
}
