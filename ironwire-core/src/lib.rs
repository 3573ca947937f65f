/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! # Ironwire Core
//!
//! Core types and conversion routines for the ironwire FIX protocol engine.
//!
//! This crate provides the building blocks shared by the codec and engine
//! crates:
//! - **Error types**: codec error taxonomy with `thiserror`
//! - **ASCII numerics**: checked decimal integer parsing and fixed-precision
//!   float rendering, both allocation-free
//! - **Timestamps**: FIX UTC timestamp formatting and parsing at second,
//!   millisecond, microsecond, and nanosecond precision
//! - **Dispatch**: the [`MsgType`] enumeration mapping FIX message-type codes
//!
//! ## Hot-Path Design
//!
//! Everything here runs on the encode/decode hot path of a trading session:
//! the routines write into caller-provided buffers, never allocate, and never
//! block.

pub mod ascii;
pub mod error;
pub mod msgtype;
pub mod time;

pub use ascii::{format_fixed, parse_fixed, parse_int};
pub use error::DecodeError;
pub use msgtype::MsgType;
pub use time::{format_utc, parse_utc, unix_now_nanos, ClockPrecision};
