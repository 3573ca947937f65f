/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! Schema groups: ordered, heterogeneous collections of fields.
//!
//! A group is declared with the [`fix_group!`] macro, which expands an
//! ordered member list into a struct whose [`Part`](crate::Part)
//! implementation traverses the members in declaration order. The traversal
//! is unrolled at compile time; there is no dynamic iterator.
//!
//! Member access is by schema identity: the macro emits one [`Has`] impl per
//! member type, and [`Parts::get`]/[`Parts::get_mut`] select a member by
//! turbofish. Because two impls of `Has<T>` for the same group cannot
//! coexist, declaring the same member type twice is a build-time error;
//! the uniqueness invariant falls out of trait coherence. That check is
//! scoped to one group: the cross-part rule that a message body must not
//! redeclare the envelope tags lives in [`Message`](crate::Message), which
//! rejects bodies whose [`Part::HAS_ENVELOPE_TAG`](crate::Part) flag is set.

/// Projection of a schema member out of the group that declares it.
///
/// Implementations are generated by [`fix_group!`]; there is one per member
/// type, which is what makes member types unique within a group.
pub trait Has<P> {
    /// Borrows the member.
    fn part(&self) -> &P;
    /// Mutably borrows the member.
    fn part_mut(&mut self) -> &mut P;
}

/// Turbofish accessors over [`Has`], available on every schema part.
///
/// ```ignore
/// let seq = body.get::<MsgSeqNum>().get();
/// body.get_mut::<Price>().set_scaled(101.5, 2);
/// ```
pub trait Parts: crate::Part {
    /// Borrows the member of type `P`.
    #[inline]
    fn get<P>(&self) -> &P
    where
        Self: Has<P>,
    {
        self.part()
    }

    /// Mutably borrows the member of type `P`.
    #[inline]
    fn get_mut<P>(&mut self) -> &mut P
    where
        Self: Has<P>,
    {
        self.part_mut()
    }
}

impl<T: crate::Part> Parts for T {}

/// Declares a schema group.
///
/// Expands to a struct holding the members in declaration order, a
/// [`Part`](crate::Part) implementation that chains `dump`/`parse`/`width`/
/// `sum` over them, and a [`Has`] projection per member. The group's
/// `Leader` is the leader of its first member, recursively flattened
/// through nested groups.
///
/// ```ignore
/// fix_group! {
///     /// One price level of a quote book.
///     pub struct QuoteRow {
///         bid_px: BidPx,
///         bid_size: BidSize,
///         offer_px: OfferPx,
///         offer_size: OfferSize,
///     }
/// }
/// ```
#[macro_export]
macro_rules! fix_group {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(#[$first_meta:meta])*
            $first_field:ident: $first_ty:ty
            $(, $(#[$field_meta:meta])* $field:ident: $ty:ty)*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(#[$first_meta])*
            $first_field: $first_ty,
            $($(#[$field_meta])* $field: $ty,)*
        }

        impl $crate::Part for $name {
            type Leader = <$first_ty as $crate::Part>::Leader;

            const HAS_ENVELOPE_TAG: bool = <$first_ty as $crate::Part>::HAS_ENVELOPE_TAG
                $(|| <$ty as $crate::Part>::HAS_ENVELOPE_TAG)*;

            fn dump(&self, dest: &mut [u8]) -> usize {
                let mut at = self.$first_field.dump(dest);
                $(at += self.$field.dump(&mut dest[at..]);)*
                at
            }

            fn parse(
                &mut self,
                cursor: &mut $crate::Cursor<'_>,
            ) -> ::std::result::Result<usize, $crate::DecodeError> {
                let mut read = self.$first_field.parse(cursor)?;
                $(read += self.$field.parse(cursor)?;)*
                Ok(read)
            }

            fn width(&self) -> usize {
                self.$first_field.width() $(+ self.$field.width())*
            }

            fn sum(&self) -> u8 {
                self.$first_field.sum() $(.wrapping_add(self.$field.sum()))*
            }
        }

        impl $crate::Has<$first_ty> for $name {
            #[inline]
            fn part(&self) -> &$first_ty {
                &self.$first_field
            }
            #[inline]
            fn part_mut(&mut self) -> &mut $first_ty {
                &mut self.$first_field
            }
        }
        $(
            impl $crate::Has<$ty> for $name {
                #[inline]
                fn part(&self) -> &$ty {
                    &self.$field
                }
                #[inline]
                fn part_mut(&mut self) -> &mut $ty {
                    &mut self.$field
                }
            }
        )*
    };
}

#[cfg(test)]
mod tests {
    use crate::field::{CharField, Cursor, FloatField, IntField, StrField};
    use crate::group::Parts;
    use crate::Part;

    type ClOrdId = StrField<11, 16>;
    type OrderQty = IntField<38, 20>;
    type Price = FloatField<44, 24>;
    type Side = CharField<54>;

    fix_group! {
        struct OrderFields {
            cl_ord_id: ClOrdId,
            side: Side,
            qty: OrderQty,
            price: Price,
        }
    }

    fix_group! {
        struct Wrapper {
            order: OrderFields,
            price_check: FloatField<6, 24>,
        }
    }

    #[test]
    fn test_group_dump_in_declaration_order() {
        let mut g = OrderFields::default();
        g.get_mut::<Price>().set_scaled(101.5, 1);
        g.get_mut::<ClOrdId>().set("ORD-7");
        g.get_mut::<Side>().set('1');
        g.get_mut::<OrderQty>().set(250);

        let mut buf = [0u8; 128];
        let n = g.dump(&mut buf);
        assert_eq!(&buf[..n], b"11=ORD-7\x0154=1\x0138=250\x0144=101.5\x01");
        assert_eq!(g.width(), n);
    }

    #[test]
    fn test_group_skips_unset_members() {
        let mut g = OrderFields::default();
        g.get_mut::<ClOrdId>().set("ORD-8");
        g.get_mut::<OrderQty>().set(10);

        let mut buf = [0u8; 128];
        let n = g.dump(&mut buf);
        assert_eq!(&buf[..n], b"11=ORD-8\x0138=10\x01");
    }

    #[test]
    fn test_group_parse_roundtrip() {
        let wire = b"11=ORD-7\x0154=1\x0138=250\x0144=101.5\x01";
        let mut g = OrderFields::default();
        let mut cursor = Cursor::new(wire);
        assert_eq!(g.parse(&mut cursor).unwrap(), wire.len());
        assert_eq!(g.get::<ClOrdId>().as_str(), "ORD-7");
        assert_eq!(g.get::<Side>().get(), Some('1'));
        assert_eq!(g.get::<OrderQty>().get(), Some(250));
        assert_eq!(g.get::<Price>().get(), Some(101.5));

        let mut buf = [0u8; 128];
        let n = g.dump(&mut buf);
        assert_eq!(&buf[..n], wire);
    }

    #[test]
    fn test_group_parse_with_absent_member() {
        // Side (54) missing on the wire: parsed as absent, rest still lands.
        let wire = b"11=ORD-9\x0138=5\x01";
        let mut g = OrderFields::default();
        let mut cursor = Cursor::new(wire);
        assert_eq!(g.parse(&mut cursor).unwrap(), wire.len());
        assert_eq!(g.get::<Side>().get(), None);
        assert_eq!(g.get::<OrderQty>().get(), Some(5));
    }

    #[test]
    fn test_group_sum_matches_wire() {
        let mut g = OrderFields::default();
        g.get_mut::<ClOrdId>().set("A");
        g.get_mut::<OrderQty>().set(77);
        let mut buf = [0u8; 64];
        let n = g.dump(&mut buf);
        let expected = buf[..n].iter().fold(0u8, |s, &b| s.wrapping_add(b));
        assert_eq!(g.sum(), expected);
    }

    #[test]
    fn test_nested_group_traversal() {
        let mut w = Wrapper::default();
        w.get_mut::<OrderFields>()
            .get_mut::<ClOrdId>()
            .set("NEST");
        w.get_mut::<FloatField<6, 24>>().set_scaled(9.75, 2);

        let mut buf = [0u8; 128];
        let n = w.dump(&mut buf);
        assert_eq!(&buf[..n], b"11=NEST\x016=9.75\x01");

        let mut parsed = Wrapper::default();
        let mut cursor = Cursor::new(&buf[..n]);
        parsed.parse(&mut cursor).unwrap();
        assert_eq!(parsed, w);
    }

    #[test]
    fn test_nested_leader_flattens() {
        fn leader_is_cl_ord_id<T: Part<Leader = ClOrdId>>() {}
        leader_is_cl_ord_id::<OrderFields>();
        leader_is_cl_ord_id::<Wrapper>();
    }
}
