//! Additional traits for comparisons.
//!
//! Normally, domain names are compared ignoring ASCII case. This is what
//! `PartialEq` and `PartialOrd` do for name types and, consequently, for
//! composite values containing names. The canonical form used by DNS
//! security, however, requires a different mode of comparison in some
//! cases. In order to make it clear when that mode is used, this module
//! defines a separate trait [`CanonicalOrd`] instead of overloading the
//! standard traits.

use core::cmp::Ordering;

//------------ CanonicalOrd --------------------------------------------------

/// A trait for the canonical sort order of values.
///
/// The canonical sort order is used when multiple values take part in
/// constructing or validating a DNSSEC signature. It is defined in
/// [RFC 4034] and clarified in [RFC 6840]: names are compared label by
/// label from the right with ASCII letters lowercased, and record data is
/// compared as the octet sequence of its canonical wire representation.
///
/// [RFC 4034]: https://tools.ietf.org/html/rfc4034
/// [RFC 6840]: https://tools.ietf.org/html/rfc6840
pub trait CanonicalOrd<Rhs: ?Sized = Self> {
    /// Returns the canonical ordering between `self` and `other`.
    #[must_use]
    fn canonical_cmp(&self, other: &Rhs) -> Ordering;

    /// Returns whether `self` is canonically less than `other`.
    #[must_use]
    fn canonical_lt(&self, other: &Rhs) -> bool {
        matches!(self.canonical_cmp(other), Ordering::Less)
    }

    /// Returns whether `self` is canonically less than or equal to `other`.
    #[must_use]
    fn canonical_le(&self, other: &Rhs) -> bool {
        !matches!(self.canonical_cmp(other), Ordering::Greater)
    }

    /// Returns whether `self` is canonically greater than `other`.
    #[must_use]
    fn canonical_gt(&self, other: &Rhs) -> bool {
        matches!(self.canonical_cmp(other), Ordering::Greater)
    }

    /// Returns whether `self` is canonically greater or equal to `other`.
    #[must_use]
    fn canonical_ge(&self, other: &Rhs) -> bool {
        !matches!(self.canonical_cmp(other), Ordering::Less)
    }
}
