//! Provenance positions and ranges.
//!
//! A [`Provenance`] is an opaque position in the global provenance space
//! maintained by the source registry. Every byte of every file, inclusion,
//! and macro expansion owns a distinct provenance, so a single integer is
//! enough to identify where a byte came from.

use std::fmt;
use std::ops::{Add, AddAssign};

/// Position of a single byte in the global provenance space.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Provenance(usize);

impl Provenance {
    /// Create a provenance from its raw position.
    #[inline]
    pub const fn new(raw: usize) -> Self {
        Provenance(raw)
    }

    /// The raw position.
    #[inline]
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl Add<usize> for Provenance {
    type Output = Provenance;

    #[inline]
    fn add(self, offset: usize) -> Provenance {
        Provenance(self.0 + offset)
    }
}

impl AddAssign<usize> for Provenance {
    #[inline]
    fn add_assign(&mut self, offset: usize) {
        self.0 += offset;
    }
}

impl fmt::Debug for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contiguous span of provenances: `[start, start + len)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ProvenanceRange {
    start: Provenance,
    len: usize,
}

impl ProvenanceRange {
    /// Create a range of `len` provenances starting at `start`.
    #[inline]
    pub const fn new(start: Provenance, len: usize) -> Self {
        ProvenanceRange { start, len }
    }

    /// Empty range at position 0.
    #[inline]
    pub const fn empty() -> Self {
        ProvenanceRange {
            start: Provenance(0),
            len: 0,
        }
    }

    /// First provenance in the range.
    #[inline]
    pub const fn start(&self) -> Provenance {
        self.start
    }

    /// Number of provenances covered.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the range covers nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last provenance in the range.
    #[inline]
    pub fn end(&self) -> Provenance {
        self.start + self.len
    }

    /// Check if a provenance lies within this range.
    #[inline]
    pub fn contains(&self, provenance: Provenance) -> bool {
        provenance >= self.start && provenance < self.end()
    }

    /// Check if another range lies entirely within this one.
    #[inline]
    pub fn contains_range(&self, other: ProvenanceRange) -> bool {
        other.start >= self.start && other.end() <= self.end()
    }

    /// The provenance `n` positions into the range.
    ///
    /// # Panics
    /// Panics if `n > len`. `n == len` is allowed and yields [`end`](Self::end).
    #[inline]
    pub fn offset_member(&self, n: usize) -> Provenance {
        assert!(
            n <= self.len,
            "offset {n} outside provenance range of length {}",
            self.len
        );
        self.start + n
    }

    /// The first `n` provenances (all of them if `n >= len`).
    #[inline]
    #[must_use]
    pub fn prefix(&self, n: usize) -> ProvenanceRange {
        ProvenanceRange {
            start: self.start,
            len: n.min(self.len),
        }
    }

    /// Everything after the first `n` provenances.
    ///
    /// # Panics
    /// Panics if `n > len`.
    #[inline]
    #[must_use]
    pub fn suffix(&self, n: usize) -> ProvenanceRange {
        assert!(
            n <= self.len,
            "suffix offset {n} outside provenance range of length {}",
            self.len
        );
        ProvenanceRange {
            start: self.start + n,
            len: self.len - n,
        }
    }

    /// Check if `next` begins exactly where this range ends.
    #[inline]
    pub fn annexed_by(&self, next: ProvenanceRange) -> bool {
        self.end() == next.start
    }

    /// Extend this range over `next`, which must begin where this one ends.
    ///
    /// # Panics
    /// Panics if the two ranges are not contiguous.
    #[inline]
    pub fn annex(&mut self, next: ProvenanceRange) {
        assert!(
            self.annexed_by(next),
            "cannot annex {next:?} to non-adjacent {self:?}"
        );
        self.len += next.len;
    }

    /// Extend this range over `next` if it begins where this one ends.
    ///
    /// Returns `true` if the range was extended.
    #[inline]
    pub fn annex_if_predecessor(&mut self, next: ProvenanceRange) -> bool {
        if self.annexed_by(next) {
            self.len += next.len;
            true
        } else {
            false
        }
    }

    /// Smallest range covering both this range and `other`.
    #[inline]
    #[must_use]
    pub fn cover(&self, other: ProvenanceRange) -> ProvenanceRange {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        ProvenanceRange {
            start,
            len: end.raw() - start.raw(),
        }
    }
}

impl fmt::Debug for ProvenanceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}..{}", self.start.raw(), self.end().raw())
    }
}

impl fmt::Display for ProvenanceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.raw(), self.end().raw())
    }
}

#[cfg(test)]
mod tests;
