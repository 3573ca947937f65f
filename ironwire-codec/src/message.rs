/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! Whole-message schemas: header ‖ body ‖ trailer.
//!
//! A message is parameterized by a FIX version marker (which fixes the
//! BeginString value) and a body schema whose leading field must be
//! [`MessageType`]. That leader rule, and the rule that header, body, and
//! trailer tags stay collectively unique, are both checked when the message
//! type is built. The header carries BeginString and BodyLength, the trailer
//! carries CheckSum.
//!
//! Body length counts the body bytes only, per FIX convention; the checksum
//! is the wrapping 8-bit sum of header and body bytes, rendered as exactly
//! three decimal digits. `parse` populates the fields from a complete
//! message buffer and validates neither; validation is the caller's
//! business.

use crate::field::{Cursor, Part};
use crate::group::Parts;
use crate::tags::{BeginString, BodyLength, CheckSum, MessageType};
use crate::{fix_group, Has};
use ironwire_core::error::DecodeError;
use std::marker::PhantomData;

/// Marker trait fixing the BeginString value of a message schema.
pub trait FixVersion {
    /// The value of tag 8 for this version, e.g. `"FIX.4.4"`.
    const BEGIN_STRING: &'static str;
}

/// FIX 4.0 version marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fix40;
impl FixVersion for Fix40 {
    const BEGIN_STRING: &'static str = "FIX.4.0";
}

/// FIX 4.1 version marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fix41;
impl FixVersion for Fix41 {
    const BEGIN_STRING: &'static str = "FIX.4.1";
}

/// FIX 4.2 version marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fix42;
impl FixVersion for Fix42 {
    const BEGIN_STRING: &'static str = "FIX.4.2";
}

/// FIX 4.3 version marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fix43;
impl FixVersion for Fix43 {
    const BEGIN_STRING: &'static str = "FIX.4.3";
}

/// FIX 4.4 version marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fix44;
impl FixVersion for Fix44 {
    const BEGIN_STRING: &'static str = "FIX.4.4";
}

/// FIX 5.0 version marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fix50;
impl FixVersion for Fix50 {
    const BEGIN_STRING: &'static str = "FIX.5.0";
}

fix_group! {
    /// Message header: BeginString (8) + BodyLength (9).
    pub struct Header {
        begin_string: BeginString,
        body_length: BodyLength,
    }
}

fix_group! {
    /// Message trailer: CheckSum (10).
    pub struct Trailer {
        check_sum: CheckSum,
    }
}

/// A whole FIX message: header ‖ body ‖ trailer.
///
/// Two properties of the schema are checked when a message is built. `B`'s
/// `Leader` must be [`MessageType`]: a body that does not lead with tag 35
/// fails to compile. And the header, body, and trailer tags must be
/// collectively unique: member uniqueness inside `B` comes from the group
/// mechanism, while a body that redeclares one of the envelope tags the
/// message itself owns (BeginString 8, BodyLength 9, CheckSum 10) is
/// rejected at build time through [`Part::HAS_ENVELOPE_TAG`]:
///
/// ```compile_fail
/// use ironwire_codec::tags::{BeginString, MsgSeqNum};
/// use ironwire_codec::{fix_group, Fix44, Message, MessageType};
///
/// fix_group! {
///     struct BadBody {
///         msg_type: MessageType,
///         begin_string: BeginString,
///         seq: MsgSeqNum,
///     }
/// }
///
/// let _ = Message::<Fix44, BadBody>::new();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Message<V: FixVersion, B> {
    header: Header,
    body: B,
    trailer: Trailer,
    _version: PhantomData<V>,
}

impl<V: FixVersion, B: Part<Leader = MessageType>> Default for Message<V, B> {
    fn default() -> Self {
        let _ = Self::BODY_TAGS_UNIQUE;
        let mut header = Header::default();
        header.get_mut::<BeginString>().set(V::BEGIN_STRING);
        Self {
            header,
            body: B::default(),
            trailer: Trailer::default(),
            _version: PhantomData,
        }
    }
}

impl<V: FixVersion, B: Part<Leader = MessageType>> Message<V, B> {
    // Evaluated at every construction; a body carrying tag 8, 9, or 10 turns
    // this into a build failure.
    const BODY_TAGS_UNIQUE: () = assert!(
        !B::HAS_ENVELOPE_TAG,
        "message body redeclares BeginString (8), BodyLength (9), or CheckSum (10)"
    );

    /// Creates an empty message; only BeginString is set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the body member of type `P`.
    #[inline]
    pub fn get<P>(&self) -> &P
    where
        B: Has<P>,
    {
        self.body.part()
    }

    /// Mutably borrows the body member of type `P`.
    #[inline]
    pub fn get_mut<P>(&mut self) -> &mut P
    where
        B: Has<P>,
    {
        self.body.part_mut()
    }

    /// Borrows the body schema.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &B {
        &self.body
    }

    /// Mutably borrows the body schema.
    #[inline]
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    /// The BeginString value, e.g. `"FIX.4.4"`.
    #[inline]
    #[must_use]
    pub fn begin_string(&self) -> &str {
        self.header.get::<BeginString>().as_str()
    }

    /// The BodyLength field value, if set.
    #[inline]
    #[must_use]
    pub fn body_length(&self) -> Option<i64> {
        self.header.get::<BodyLength>().get()
    }

    /// The CheckSum field value, if set.
    #[inline]
    #[must_use]
    pub fn check_sum(&self) -> Option<u8> {
        self.trailer.get::<CheckSum>().get()
    }

    /// Recomputes the body width and stores it into BodyLength, returning it.
    pub fn update_body_length(&mut self) -> usize {
        let width = self.body.width();
        self.header.get_mut::<BodyLength>().set(width as i64);
        width
    }

    /// Recomputes the checksum over header and body field sums (trailer
    /// excluded) and stores it into CheckSum.
    pub fn update_check_sum(&mut self) {
        let sum = self.header.sum().wrapping_add(self.body.sum());
        self.trailer.get_mut::<CheckSum>().set(sum);
    }

    /// Serializes the message into `dest`, returning bytes written.
    ///
    /// With `set_body_length`, BodyLength is recomputed before the header is
    /// written; with `set_check_sum`, CheckSum is recomputed after body
    /// length is final but before the trailer is written. Pass `false` for
    /// both to re-emit a parsed message byte-identically.
    pub fn dump(&mut self, dest: &mut [u8], set_body_length: bool, set_check_sum: bool) -> usize {
        if set_body_length {
            self.update_body_length();
        }
        if set_check_sum {
            self.update_check_sum();
        }
        let mut at = self.header.dump(dest);
        at += self.body.dump(&mut dest[at..]);
        at += self.trailer.dump(&mut dest[at..]);
        at
    }

    /// Parses a complete message from `src`, returning bytes consumed.
    ///
    /// The caller is responsible for having delivered a complete message;
    /// neither checksum nor body length is validated here.
    ///
    /// # Errors
    /// Returns [`DecodeError`] when a field value is malformed; the message
    /// should then be discarded.
    pub fn parse(&mut self, src: &[u8]) -> Result<usize, DecodeError> {
        let mut cursor = Cursor::new(src);
        let mut read = self.header.parse(&mut cursor)?;
        read += self.body.parse(&mut cursor)?;
        read += self.trailer.parse(&mut cursor)?;
        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repeat::{RepeatVector, Repeating};
    use crate::tags::{
        BidPx, BidSize, ClOrdId, MdReqId, MsgSeqNum, NoMdEntries, OfferPx, OfferSize, OrderQty,
        OrigClOrdId, Price, SenderCompId, SendingTime, TargetCompId,
    };
    use ironwire_core::msgtype::MsgType;
    use ironwire_core::time::ClockPrecision;

    fix_group! {
        struct QuoteRow {
            bid_px: BidPx,
            bid_size: BidSize,
            offer_px: OfferPx,
            offer_size: OfferSize,
        }
    }

    type QuoteBook = Repeating<NoMdEntries, RepeatVector<QuoteRow>>;

    fix_group! {
        struct MdBody {
            msg_type: MessageType,
            seq: MsgSeqNum,
            sender: SenderCompId,
            target: TargetCompId,
            sending_time: SendingTime,
            req_id: MdReqId,
            book: QuoteBook,
        }
    }

    type MdIncremental = Message<Fix44, MdBody>;

    fix_group! {
        struct ExecBody {
            msg_type: MessageType,
            seq: MsgSeqNum,
            sender: SenderCompId,
            target: TargetCompId,
            sending_time: SendingTime,
            cl_ord_id: ClOrdId,
            orig_cl_ord_id: OrigClOrdId,
            price: Price,
            qty: OrderQty,
        }
    }

    type ExecReport = Message<Fix44, ExecBody>;

    const MD_WIRE: &[u8] = b"8=FIX.4.4\x019=234\x0135=X\x0134=0\x0149=DERIBITSERVER\x01\
56=TSERVER\x0152=20250211-12:28:38.728\x01262=19985\x01268=4\x01\
132=125.30\x01134=4.1\x01133=220.93\x01135=9.1\x01\
132=144.97\x01134=4.8\x01133=207.69\x01135=5.9\x01\
132=170.00\x01134=18.5\x01133=289.20\x01135=8.0\x01\
132=161.83\x01134=16.4\x01133=294.64\x01135=11.0\x0110=090\x01";

    #[test]
    fn test_market_data_vector_decodes() {
        let mut m = MdIncremental::new();
        assert_eq!(m.parse(MD_WIRE).unwrap(), MD_WIRE.len());

        assert_eq!(m.begin_string(), "FIX.4.4");
        assert_eq!(m.body_length(), Some(234));
        assert_eq!(m.check_sum(), Some(90));
        assert_eq!(
            m.get::<MessageType>().get(),
            MsgType::MarketDataIncrementalRefresh
        );
        assert_eq!(m.get::<SenderCompId>().as_str(), "DERIBITSERVER");
        assert_eq!(m.get::<MdReqId>().as_str(), "19985");

        let book = m.get::<QuoteBook>();
        assert_eq!(book.len(), 4);
        assert_eq!(book.at(0).get::<BidPx>().get(), Some(125.3));
        assert_eq!(book.at(2).get::<BidSize>().get(), Some(18.5));
        assert_eq!(book.at(3).get::<OfferSize>().get(), Some(11.0));
    }

    #[test]
    fn test_market_data_vector_reencodes_byte_identical() {
        let mut m = MdIncremental::new();
        m.parse(MD_WIRE).unwrap();
        let mut buf = [0u8; 512];
        let n = m.dump(&mut buf, false, false);
        assert_eq!(&buf[..n], MD_WIRE);
    }

    #[test]
    fn test_market_data_vector_is_internally_consistent() {
        let mut m = MdIncremental::new();
        m.parse(MD_WIRE).unwrap();
        // Recomputing body length and checksum reproduces the wire values.
        assert_eq!(m.update_body_length(), 234);
        m.update_check_sum();
        assert_eq!(m.check_sum(), Some(90));
        let mut buf = [0u8; 512];
        let n = m.dump(&mut buf, true, true);
        assert_eq!(&buf[..n], MD_WIRE);
    }

    #[test]
    fn test_constructed_message_roundtrip() {
        let mut m = ExecReport::new();
        m.get_mut::<MessageType>().set(MsgType::ExecutionReport);
        m.get_mut::<MsgSeqNum>().set(17);
        m.get_mut::<SenderCompId>().set("DERIBITSERVER");
        m.get_mut::<TargetCompId>().set("TSERVER");
        m.get_mut::<SendingTime>()
            .set(1_739_277_818_728_000_000, ClockPrecision::Millis);
        m.get_mut::<ClOrdId>().set("424242");
        m.get_mut::<OrigClOrdId>().set("424241");
        m.get_mut::<Price>().set_scaled(201.25, 2);
        m.get_mut::<OrderQty>().set_scaled(3.5, 1);

        let mut buf = [0u8; 512];
        let n = m.dump(&mut buf, true, true);

        let mut parsed = ExecReport::new();
        assert_eq!(parsed.parse(&buf[..n]).unwrap(), n);
        assert_eq!(parsed, m);
        assert_eq!(parsed.body_length(), Some(m.body().width() as i64));
    }

    #[test]
    fn test_checksum_is_sum_of_header_and_body() {
        let mut m = ExecReport::new();
        m.get_mut::<MessageType>().set(MsgType::ExecutionReport);
        m.get_mut::<ClOrdId>().set("CHK");
        let mut buf = [0u8; 256];
        let n = m.dump(&mut buf, true, true);
        // Sum every byte before the "10=" tag and compare with the trailer.
        let trailer_at = n - 7;
        let expected = buf[..trailer_at]
            .iter()
            .fold(0u8, |s, &b| s.wrapping_add(b));
        assert_eq!(m.check_sum(), Some(expected));
    }

    #[test]
    fn test_checksum_wraparound_renders_leading_zeros() {
        // Header + body byte sum is 6 * 256 + 7 for this ClOrdID.
        let mut m = ExecReport::new();
        m.get_mut::<MessageType>().set(MsgType::NewOrderSingle);
        m.get_mut::<ClOrdId>().set("WRAPF");
        let mut buf = [0u8; 256];
        let n = m.dump(&mut buf, true, true);
        assert_eq!(m.check_sum(), Some(7));
        assert!(buf[..n].ends_with(b"10=007\x01"));
    }

    #[test]
    fn test_body_length_counts_body_only() {
        let mut m = ExecReport::new();
        m.get_mut::<MessageType>().set(MsgType::ExecutionReport);
        m.get_mut::<ClOrdId>().set("LEN");
        let width = m.update_body_length();
        // "35=8|" + "11=LEN|"
        assert_eq!(width, 5 + 7);
        assert_eq!(m.body_length(), Some(12));
    }

    #[test]
    fn test_empty_repeating_group_roundtrip() {
        let mut m = MdIncremental::new();
        m.get_mut::<MessageType>()
            .set(MsgType::MarketDataIncrementalRefresh);
        m.get_mut::<MdReqId>().set("20001");
        m.get_mut::<QuoteBook>().resize(0);

        let mut buf = [0u8; 256];
        let n = m.dump(&mut buf, true, true);
        let wire = &buf[..n];
        assert!(std::str::from_utf8(wire).unwrap().contains("268=0\x01"));

        let mut parsed = MdIncremental::new();
        assert_eq!(parsed.parse(wire).unwrap(), n);
        assert_eq!(parsed.get::<QuoteBook>().len(), 0);

        let mut again = [0u8; 256];
        let again_n = parsed.dump(&mut again, false, false);
        assert_eq!(&again[..again_n], wire);
    }

    #[test]
    fn test_default_message_has_begin_string_only() {
        let m = MdIncremental::new();
        assert_eq!(m.begin_string(), "FIX.4.4");
        assert_eq!(m.body_length(), None);
        assert_eq!(m.check_sum(), None);
        assert_eq!(m.body().width(), 0);
    }

    #[test]
    fn test_version_markers() {
        let m40 = Message::<Fix40, ExecBody>::new();
        assert_eq!(m40.begin_string(), "FIX.4.0");
        let m50 = Message::<Fix50, ExecBody>::new();
        assert_eq!(m50.begin_string(), "FIX.5.0");
    }

    #[test]
    fn test_envelope_tag_detection() {
        // Header, body, and trailer tags must stay collectively unique: a
        // body flagged here would fail the build-time assertion on
        // construction (the compile_fail example on `Message` shows the
        // rejected case). Detection propagates through groups and repeating
        // containers.
        assert!(!<MdBody as Part>::HAS_ENVELOPE_TAG);
        assert!(!<ExecBody as Part>::HAS_ENVELOPE_TAG);
        assert!(!<QuoteBook as Part>::HAS_ENVELOPE_TAG);
        assert!(<Header as Part>::HAS_ENVELOPE_TAG);
        assert!(<Trailer as Part>::HAS_ENVELOPE_TAG);
        assert!(<BeginString as Part>::HAS_ENVELOPE_TAG);
        assert!(<BodyLength as Part>::HAS_ENVELOPE_TAG);
        assert!(<CheckSum as Part>::HAS_ENVELOPE_TAG);
        assert!(!<MsgSeqNum as Part>::HAS_ENVELOPE_TAG);
        assert!(!<MessageType as Part>::HAS_ENVELOPE_TAG);
    }
}
