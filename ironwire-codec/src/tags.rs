/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! Standard FIX tag registry.
//!
//! Each tag is a type alias over a field codec, parameterized by its tag
//! number and capacity. Schema membership is by type identity, so two
//! different tags are always two different types even when they share a
//! codec shape. User-defined tags work the same way: declare an alias such
//! as `type CancelOnDisconnect = CharField<9001>;` and use it in a schema
//! like any standard tag.
//!
//! [`MessageType`] and [`CheckSum`] are dedicated field types rather than
//! aliases: the former is backed by the [`MsgType`] dispatch enum, the
//! latter renders as exactly three decimal digits.

use crate::field::{
    dump_tvp, parse_tvp, tvp_sum, tvp_width, CharField, Cursor, FloatField, IntField, Part,
    StrField, TagAscii, TextField, UtcField,
};
use ironwire_core::error::DecodeError;
use ironwire_core::msgtype::MsgType;

/// Wrapping 8-bit sum of a byte run, as used by the FIX checksum.
#[inline]
#[must_use]
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |s, &b| s.wrapping_add(b))
}

/// Renders a checksum as three zero-padded decimal digits.
#[inline]
#[must_use]
pub fn format_checksum(value: u8) -> [u8; 3] {
    [
        b'0' + value / 100,
        b'0' + value / 10 % 10,
        b'0' + value % 10,
    ]
}

/// Parses a three-digit checksum rendering.
#[inline]
#[must_use]
pub fn parse_checksum(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 3 {
        return None;
    }
    let mut value: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u32::from(b - b'0');
    }
    u8::try_from(value).ok()
}

/// MsgType (tag 35), the mandatory first field of every message body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageType {
    value: MsgType,
}

impl MessageType {
    const TAG_ASCII: TagAscii = TagAscii::new(35);

    /// The current message type; [`MsgType::Unknown`] when unset.
    #[inline]
    #[must_use]
    pub fn get(&self) -> MsgType {
        self.value
    }

    /// Sets the message type.
    #[inline]
    pub fn set(&mut self, msg_type: MsgType) {
        self.value = msg_type;
    }
}

impl Part for MessageType {
    type Leader = Self;
    const HAS_ENVELOPE_TAG: bool = false;

    fn dump(&self, dest: &mut [u8]) -> usize {
        dump_tvp(&Self::TAG_ASCII, self.value.as_str().as_bytes(), dest)
    }

    fn parse(&mut self, cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
        let before = cursor.rest().len();
        match parse_tvp(&Self::TAG_ASCII, cursor)? {
            None => Ok(0),
            Some(value) => {
                self.value = MsgType::from_code(value);
                Ok(before - cursor.rest().len())
            }
        }
    }

    fn width(&self) -> usize {
        tvp_width(&Self::TAG_ASCII, self.value.as_str().len())
    }

    fn sum(&self) -> u8 {
        tvp_sum(&Self::TAG_ASCII, self.value.as_str().as_bytes())
    }
}

/// CheckSum (tag 10), the message trailer: always three decimal digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSum {
    value: Option<u8>,
}

impl CheckSum {
    const TAG_ASCII: TagAscii = TagAscii::new(10);

    /// The current checksum, if set.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<u8> {
        self.value
    }

    /// Sets the checksum.
    #[inline]
    pub fn set(&mut self, value: u8) {
        self.value = Some(value);
    }

    /// Clears the field back to unset.
    #[inline]
    pub fn clear(&mut self) {
        self.value = None;
    }
}

impl Part for CheckSum {
    type Leader = Self;
    const HAS_ENVELOPE_TAG: bool = true;

    fn dump(&self, dest: &mut [u8]) -> usize {
        match self.value {
            Some(v) => dump_tvp(&Self::TAG_ASCII, &format_checksum(v), dest),
            None => 0,
        }
    }

    fn parse(&mut self, cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
        let before = cursor.rest().len();
        match parse_tvp(&Self::TAG_ASCII, cursor)? {
            None => Ok(0),
            Some(value) => {
                self.value = Some(parse_checksum(value).ok_or(DecodeError::BadChecksum)?);
                Ok(before - cursor.rest().len())
            }
        }
    }

    fn width(&self) -> usize {
        tvp_width(&Self::TAG_ASCII, usize::from(self.value.is_some()) * 3)
    }

    fn sum(&self) -> u8 {
        match self.value {
            Some(v) => tvp_sum(&Self::TAG_ASCII, &format_checksum(v)),
            None => 0,
        }
    }
}

/// BeginString (8).
pub type BeginString = StrField<8, 16>;
/// BodyLength (9).
pub type BodyLength = IntField<9, 16>;
/// ClOrdID (11).
pub type ClOrdId = StrField<11, 32>;
/// MsgSeqNum (34).
pub type MsgSeqNum = IntField<34, 20>;
/// OrderID (37).
pub type OrderId = StrField<37, 32>;
/// OrderQty (38).
pub type OrderQty = FloatField<38, 24>;
/// OrdStatus (39).
pub type OrdStatus = CharField<39>;
/// OrigClOrdID (41).
pub type OrigClOrdId = StrField<41, 32>;
/// PossDupFlag (43).
pub type PossDupFlag = CharField<43>;
/// Price (44).
pub type Price = FloatField<44, 24>;
/// SenderCompID (49).
pub type SenderCompId = StrField<49, 32>;
/// SendingTime (52).
pub type SendingTime = UtcField<52>;
/// Side (54).
pub type Side = CharField<54>;
/// Symbol (55).
pub type Symbol = StrField<55, 32>;
/// TargetCompID (56).
pub type TargetCompId = StrField<56, 32>;
/// Text (58).
pub type Text = TextField<58>;
/// RawDataLength (95).
pub type RawDataLength = IntField<95, 8>;
/// RawData (96).
pub type RawData = TextField<96>;
/// PossResend (97).
pub type PossResend = CharField<97>;
/// EncryptMethod (98).
pub type EncryptMethod = IntField<98, 4>;
/// HeartBtInt (108).
pub type HeartBtInt = IntField<108, 8>;
/// TestReqID (112).
pub type TestReqId = StrField<112, 32>;
/// BidPx (132).
pub type BidPx = FloatField<132, 24>;
/// OfferPx (133).
pub type OfferPx = FloatField<133, 24>;
/// BidSize (134).
pub type BidSize = FloatField<134, 24>;
/// OfferSize (135).
pub type OfferSize = FloatField<135, 24>;
/// ResetSeqNumFlag (141).
pub type ResetSeqNumFlag = CharField<141>;
/// NoRelatedSym (146).
pub type NoRelatedSym = IntField<146, 8>;
/// MDReqID (262).
pub type MdReqId = StrField<262, 16>;
/// SubscriptionRequestType (263).
pub type SubscriptionRequestType = CharField<263>;
/// MarketDepth (264).
pub type MarketDepth = IntField<264, 8>;
/// MDUpdateType (265).
pub type MdUpdateType = IntField<265, 4>;
/// NoMDEntryTypes (267).
pub type NoMdEntryTypes = IntField<267, 8>;
/// NoMDEntries (268).
pub type NoMdEntries = IntField<268, 8>;
/// MDEntryType (269).
pub type MdEntryType = CharField<269>;
/// MDEntryPx (270).
pub type MdEntryPx = FloatField<270, 24>;
/// MDEntrySize (271).
pub type MdEntrySize = FloatField<271, 24>;
/// MDUpdateAction (279).
pub type MdUpdateAction = CharField<279>;
/// MDReqRejReason (281).
pub type MdReqRejReason = CharField<281>;
/// Username (553).
pub type Username = StrField<553, 64>;
/// Password (554).
pub type Password = StrField<554, 64>;
/// SessionStatus (1409).
pub type SessionStatus = IntField<1409, 4>;
