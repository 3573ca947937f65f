/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! Repeating groups: count-driven sequences of sub-groups.
//!
//! On the wire a repeating group is a count field immediately followed by
//! that many flat repetitions of the sub-group, with no end marker. The
//! containers here never self-delimit: on decode the element count comes
//! from the cursor's `meta` side channel, deposited there by the integer
//! count field parsed just before.
//!
//! [`Repeating`] bundles the count field and its container into one schema
//! member so the count value and the container length cannot drift apart.

use crate::field::{Cursor, IntField, Part};
use ironwire_core::error::DecodeError;

/// A count field that can drive a repeating container.
///
/// Implemented by [`IntField`]; the count is the field's non-negative value.
pub trait Counter: Part {
    /// Sets the count value.
    fn set_count(&mut self, n: usize);
    /// The current count, if set and non-negative.
    fn count(&self) -> Option<usize>;
    /// Clears the count field back to unset.
    fn clear_count(&mut self);
}

impl<const TAG: u32, const CAP: usize> Counter for IntField<TAG, CAP> {
    #[inline]
    fn set_count(&mut self, n: usize) {
        self.set(n as i64);
    }

    #[inline]
    fn count(&self) -> Option<usize> {
        self.get().and_then(|v| usize::try_from(v).ok())
    }

    #[inline]
    fn clear_count(&mut self) {
        self.clear();
    }
}

/// Fixed-capacity repeating container of `N` sub-groups.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatArray<G, const N: usize> {
    items: [G; N],
    used: usize,
}

impl<G: Part, const N: usize> Default for RepeatArray<G, N> {
    fn default() -> Self {
        Self {
            items: std::array::from_fn(|_| G::default()),
            used: 0,
        }
    }
}

impl<G: Part, const N: usize> RepeatArray<G, N> {
    /// Logical element count.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.used
    }

    /// Returns true if no elements are in use.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Fixed capacity `N`.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Borrows element `i`; panics if `i` is outside the logical length.
    #[inline]
    #[must_use]
    pub fn at(&self, i: usize) -> &G {
        &self.items[..self.used][i]
    }

    /// Mutably borrows element `i`, growing the logical length to cover it.
    /// Asserts `i < N`.
    pub fn entry_mut(&mut self, i: usize) -> &mut G {
        assert!(i < N, "repeating group index {i} outside capacity {N}");
        self.used = self.used.max(i + 1);
        &mut self.items[i]
    }

    /// Resets the logical length to zero.
    #[inline]
    pub fn clear(&mut self) {
        self.used = 0;
    }

    /// Iterates over the elements in use.
    pub fn iter(&self) -> impl Iterator<Item = &G> {
        self.items[..self.used].iter()
    }
}

impl<G: Part, const N: usize> std::ops::Index<usize> for RepeatArray<G, N> {
    type Output = G;

    fn index(&self, i: usize) -> &G {
        self.at(i)
    }
}

impl<G: Part, const N: usize> Part for RepeatArray<G, N> {
    type Leader = <G as Part>::Leader;
    const HAS_ENVELOPE_TAG: bool = <G as Part>::HAS_ENVELOPE_TAG;

    fn dump(&self, dest: &mut [u8]) -> usize {
        let mut at = 0;
        for item in self.iter() {
            at += item.dump(&mut dest[at..]);
        }
        at
    }

    fn parse(&mut self, cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
        let count = cursor.take_meta().ok_or(DecodeError::CountMissing)?;
        if count > N {
            return Err(DecodeError::CountOverflow { count, cap: N });
        }
        self.used = count;
        let mut read = 0;
        for item in &mut self.items[..count] {
            read += item.parse(cursor)?;
        }
        Ok(read)
    }

    fn width(&self) -> usize {
        self.iter().map(Part::width).sum()
    }

    fn sum(&self) -> u8 {
        self.iter().fold(0u8, |s, item| s.wrapping_add(item.sum()))
    }
}

/// Resizable repeating container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepeatVector<G> {
    items: Vec<G>,
}

impl<G: Part> RepeatVector<G> {
    /// Logical element count.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no elements are in use.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resizes to `n` elements, default-constructing new ones.
    pub fn resize(&mut self, n: usize) {
        self.items.resize_with(n, G::default);
    }

    /// Borrows element `i`; panics if out of range.
    #[inline]
    #[must_use]
    pub fn at(&self, i: usize) -> &G {
        &self.items[i]
    }

    /// Mutably borrows element `i`; the container must have been resized to
    /// cover it first.
    #[inline]
    pub fn entry_mut(&mut self, i: usize) -> &mut G {
        &mut self.items[i]
    }

    /// Drops all elements.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &G> {
        self.items.iter()
    }
}

impl<G: Part> std::ops::Index<usize> for RepeatVector<G> {
    type Output = G;

    fn index(&self, i: usize) -> &G {
        self.at(i)
    }
}

impl<G: Part> Part for RepeatVector<G> {
    type Leader = <G as Part>::Leader;
    const HAS_ENVELOPE_TAG: bool = <G as Part>::HAS_ENVELOPE_TAG;

    fn dump(&self, dest: &mut [u8]) -> usize {
        let mut at = 0;
        for item in self.iter() {
            at += item.dump(&mut dest[at..]);
        }
        at
    }

    fn parse(&mut self, cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
        let count = cursor.take_meta().ok_or(DecodeError::CountMissing)?;
        self.items.clear();
        self.items.resize_with(count, G::default);
        let mut read = 0;
        for item in &mut self.items {
            read += item.parse(cursor)?;
        }
        Ok(read)
    }

    fn width(&self) -> usize {
        self.iter().map(Part::width).sum()
    }

    fn sum(&self) -> u8 {
        self.iter().fold(0u8, |s, item| s.wrapping_add(item.sum()))
    }
}

/// A count field bundled with its repeating container.
///
/// Encodes as the count followed by the repetitions, keeps the two in sync
/// through the mutating accessors, and parses the pair as one schema member.
/// An absent count on the wire makes the whole bundle absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Repeating<C, X> {
    count: C,
    items: X,
}

impl<C: Counter, G: Part, const N: usize> Repeating<C, RepeatArray<G, N>> {
    /// Logical element count.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no elements are in use.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrows element `i`; panics if `i` is outside the logical length.
    #[inline]
    #[must_use]
    pub fn at(&self, i: usize) -> &G {
        self.items.at(i)
    }

    /// Mutably borrows element `i`, growing the logical length and the count
    /// field to cover it. Asserts `i < N`.
    pub fn entry_mut(&mut self, i: usize) -> &mut G {
        self.count.set_count(self.items.len().max(i + 1));
        self.items.entry_mut(i)
    }

    /// Sets the logical length to zero and unsets the count field.
    pub fn clear(&mut self) {
        self.items.clear();
        self.count.clear_count();
    }
}

impl<C: Counter, G: Part> Repeating<C, RepeatVector<G>> {
    /// Logical element count.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no elements are in use.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resizes the container and the count field together. `resize(0)` keeps
    /// the count field set, so an explicit zero-length group stays on the
    /// wire.
    pub fn resize(&mut self, n: usize) {
        self.items.resize(n);
        self.count.set_count(n);
    }

    /// Borrows element `i`; panics if out of range.
    #[inline]
    #[must_use]
    pub fn at(&self, i: usize) -> &G {
        self.items.at(i)
    }

    /// Mutably borrows element `i`; resize first.
    #[inline]
    pub fn entry_mut(&mut self, i: usize) -> &mut G {
        self.items.entry_mut(i)
    }

    /// Drops all elements and unsets the count field.
    pub fn clear(&mut self) {
        self.items.clear();
        self.count.clear_count();
    }
}

impl<C: Counter, X: Part> Part for Repeating<C, X> {
    type Leader = <C as Part>::Leader;
    const HAS_ENVELOPE_TAG: bool =
        <C as Part>::HAS_ENVELOPE_TAG || <X as Part>::HAS_ENVELOPE_TAG;

    fn dump(&self, dest: &mut [u8]) -> usize {
        let mut at = self.count.dump(dest);
        at += self.items.dump(&mut dest[at..]);
        at
    }

    fn parse(&mut self, cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
        let read = self.count.parse(cursor)?;
        if read == 0 {
            return Ok(0);
        }
        Ok(read + self.items.parse(cursor)?)
    }

    fn width(&self) -> usize {
        self.count.width() + self.items.width()
    }

    fn sum(&self) -> u8 {
        self.count.sum().wrapping_add(self.items.sum())
    }
}
