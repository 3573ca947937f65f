/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! # Ironwire Codec
//!
//! Schema-static tag/value codec for FIX 4.x messages.
//!
//! Message layouts are known at compile time: a schema is an ordered list of
//! typed fields declared with [`fix_group!`], traversed without dynamic
//! dispatch or hidden allocation. Field values are stored in their encoded
//! ASCII form, so decode followed by encode is byte-identical, which is the
//! property a market-data recorder or an order-entry gateway actually needs.
//!
//! - **Fields**: [`CharField`], [`StrField`], [`TextField`], [`IntField`],
//!   [`FloatField`], [`UtcField`], plus the special [`MessageType`] and
//!   [`CheckSum`] codecs
//! - **Groups**: [`fix_group!`] with build-time member uniqueness
//! - **Repeating groups**: [`RepeatArray`], [`RepeatVector`], and the
//!   count-bundling [`Repeating`]
//! - **Messages**: [`Message`] parameterized by a [`FixVersion`] marker and
//!   a body schema that must lead with `MessageType`

pub mod field;
pub mod group;
pub mod message;
pub mod repeat;
pub mod tags;

pub use field::{
    CharField, Cursor, FloatField, IntField, Part, StrField, TagAscii, TextField, UtcField,
    EQUALS, SOH,
};
pub use group::{Has, Parts};
pub use message::{Fix40, Fix41, Fix42, Fix43, Fix44, Fix50, FixVersion, Header, Message, Trailer};
pub use repeat::{Counter, RepeatArray, RepeatVector, Repeating};
pub use tags::{checksum, format_checksum, parse_checksum, CheckSum, MessageType};

pub use ironwire_core::error::DecodeError;
