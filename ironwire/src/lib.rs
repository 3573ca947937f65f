/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! # Ironwire
//!
//! A schema-static FIX 4.x codec and low-latency polling session engine.
//!
//! Message layouts are fixed at compile time: each message is a typed record
//! of tag/value fields declared with [`fix_group!`], encoded
//! and decoded by compile-time-unrolled traversal with no allocation on the
//! hot path. The session engine frames messages off a ring-buffered
//! transport and hands them to your visitor; you drive it with a plain
//! `perform` loop, no runtime and no threads.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ironwire::prelude::*;
//!
//! fix_group! {
//!     struct HeartbeatBody {
//!         msg_type: MessageType,
//!         seq: MsgSeqNum,
//!         sending_time: SendingTime,
//!         test_req_id: TestReqId,
//!     }
//! }
//! type Heartbeat = Message<Fix44, HeartbeatBody>;
//!
//! let transport = TcpTransport::new("www.deribit.com", 9881);
//! let mut engine = Engine::new(transport, FnVisitor(|msg_type, frame: &[u8]| {
//!     println!("{msg_type}: {} bytes", frame.len());
//! }));
//! engine.connect()?;
//!
//! let mut heartbeat = Heartbeat::new();
//! heartbeat.get_mut::<MessageType>().set(MsgType::Heartbeat);
//! engine.send_stamped(&mut heartbeat, ClockPrecision::Millis)?;
//!
//! while engine.transport().active() {
//!     engine.perform();
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: errors, ASCII numerics, timestamps, message-type dispatch
//! - [`codec`]: fields, groups, repeating groups, message schemas
//! - [`engine`]: framing engine, transports, session plumbing

pub mod core {
    //! Errors, ASCII numerics, timestamps, and message-type dispatch.
    pub use ironwire_core::*;
}

pub mod codec {
    //! Schema-static tag/value codec.
    pub use ironwire_codec::*;
}

pub mod engine {
    //! Framing engine, transports, and session plumbing.
    pub use ironwire_engine::*;
}

pub use ironwire_codec::fix_group;

/// The common imports of an ironwire application.
pub mod prelude {
    pub use ironwire_codec::tags::*;
    pub use ironwire_codec::{
        fix_group, CharField, Cursor, Fix40, Fix41, Fix42, Fix43, Fix44, Fix50, FixVersion,
        FloatField, Has, IntField, Message, Part, Parts, RepeatArray, RepeatVector, Repeating,
        StrField, TextField, UtcField,
    };
    pub use ironwire_core::{ClockPrecision, DecodeError, MsgType};
    pub use ironwire_engine::{
        Callbacks, Engine, FileTransport, FnVisitor, MemoryTransport, MessageVisitor,
        SessionConfig, Sequencer, TcpTransport, Transport, TransportError,
    };
}
