/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! # Ironwire Engine
//!
//! Framing engine and transports for the ironwire FIX protocol stack.
//!
//! This crate provides:
//! - **Engine**: the cooperative polling loop that frames inbound messages,
//!   dispatches them to a visitor, and sends finalized outbound messages
//! - **Transport contract**: ring-buffered read side, blocking send side,
//!   lifecycle callbacks
//! - **Transports**: in-memory loopback, file replay, non-blocking TCP
//! - **Session plumbing**: configuration, sequence-number housekeeping, and
//!   logon credential signing
//!
//! The engine is single-threaded and never blocks outside the transport:
//! drive [`Engine::perform`] in a loop and build heartbeat or recovery
//! policy on top, in user code.

pub mod auth;
pub mod config;
pub mod engine;
pub mod file;
pub mod memory;
pub mod ring;
pub mod sequence;
pub mod tcp;
pub mod transport;

pub use auth::{logon_credentials, sign, LogonCredentials};
pub use config::SessionConfig;
pub use engine::{Engine, FnVisitor, MessageVisitor, MIN_HEADER_SPAN};
pub use file::FileTransport;
pub use memory::MemoryTransport;
pub use ring::RingBuffer;
pub use sequence::{SeqCheck, Sequencer};
pub use tcp::TcpTransport;
pub use transport::{Callbacks, Transport, TransportError, MAX_READ_SIZE};
