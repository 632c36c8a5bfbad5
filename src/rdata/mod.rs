//! Record data implementations.
//!
//! This module contains the implementations of the record data for the
//! record types this crate knows. The types are named identically to the
//! [`Rtype`] constant they implement and are grouped into submodules by
//! the RFC they were defined in. All types are also re-exported at the top
//! level here.
//!
//! In addition, the module provides the enum [`AllRecordData`], combining
//! every implemented record data type with
//! [`UnknownRecordData`][crate::base::rdata::UnknownRecordData] as the
//! fallback for everything else. It is the type to use when parsing
//! records whose type isn't known up front: a record of an unimplemented
//! type is stored opaquely rather than rejected, so any message can be
//! read and written back unchanged.

pub use self::dnssec::{RtypeBitmap, RtypeBitmapBuilder, RtypeBitmapError};
pub use self::nsec3::{Nsec3, Nsec3Salt, Nsec3param, OwnerHash};
pub use self::rfc1035::A;
pub use self::rfc3596::Aaaa;

pub mod dnssec;
pub mod nsec3;
pub mod rfc1035;
pub mod rfc3596;

use crate::base::cmp::CanonicalOrd;
use crate::base::iana::Rtype;
use crate::base::rdata::{
    ComposeRecordData, ParseRecordData, RecordData, UnknownRecordData,
};
use crate::base::wire::{Composer, ParseError, Parser, ShortBuf};
use bytes::Bytes;
use core::cmp::Ordering;
use core::fmt;

//------------ AllRecordData -------------------------------------------------

/// Record data for all record types known to this crate.
///
/// This type is the registry of record data codecs: parsing dispatches on
/// the numeric record type of the record being read and selects the
/// matching variant, falling back to [`UnknownRecordData`] for everything
/// unregistered. The set of variants is fixed at compile time; there is no
/// runtime registration and thus no mutable global state.
#[derive(Clone)]
pub enum AllRecordData<Octs> {
    A(A),
    Aaaa(Aaaa),
    Nsec3(Nsec3<Octs>),
    Nsec3param(Nsec3param<Octs>),
    Unknown(UnknownRecordData<Octs>),
}

//--- From

impl<Octs> From<A> for AllRecordData<Octs> {
    fn from(value: A) -> Self {
        AllRecordData::A(value)
    }
}

impl<Octs> From<Aaaa> for AllRecordData<Octs> {
    fn from(value: Aaaa) -> Self {
        AllRecordData::Aaaa(value)
    }
}

impl<Octs> From<Nsec3<Octs>> for AllRecordData<Octs> {
    fn from(value: Nsec3<Octs>) -> Self {
        AllRecordData::Nsec3(value)
    }
}

impl<Octs> From<Nsec3param<Octs>> for AllRecordData<Octs> {
    fn from(value: Nsec3param<Octs>) -> Self {
        AllRecordData::Nsec3param(value)
    }
}

impl<Octs> From<UnknownRecordData<Octs>> for AllRecordData<Octs> {
    fn from(value: UnknownRecordData<Octs>) -> Self {
        AllRecordData::Unknown(value)
    }
}

//--- PartialEq and Eq

impl<Octs, Other> PartialEq<AllRecordData<Other>> for AllRecordData<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn eq(&self, other: &AllRecordData<Other>) -> bool {
        use AllRecordData::*;

        match (self, other) {
            (A(left), A(right)) => left == right,
            (Aaaa(left), Aaaa(right)) => left == right,
            (Nsec3(left), Nsec3(right)) => left == right,
            (Nsec3param(left), Nsec3param(right)) => left == right,
            (Unknown(left), Unknown(right)) => left == right,
            _ => false,
        }
    }
}

impl<Octs: AsRef<[u8]>> Eq for AllRecordData<Octs> {}

//--- CanonicalOrd

impl<Octs, Other> CanonicalOrd<AllRecordData<Other>> for AllRecordData<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn canonical_cmp(&self, other: &AllRecordData<Other>) -> Ordering {
        use AllRecordData::*;

        match (self, other) {
            (A(left), A(right)) => left.canonical_cmp(right),
            (Aaaa(left), Aaaa(right)) => left.canonical_cmp(right),
            (Nsec3(left), Nsec3(right)) => left.canonical_cmp(right),
            (Nsec3param(left), Nsec3param(right)) => {
                left.canonical_cmp(right)
            }
            (Unknown(left), Unknown(right)) => left.canonical_cmp(right),
            _ => self.rtype().cmp(&other.rtype()),
        }
    }
}

//--- RecordData, ParseRecordData, and ComposeRecordData

impl<Octs: AsRef<[u8]>> RecordData for AllRecordData<Octs> {
    fn rtype(&self) -> Rtype {
        match self {
            AllRecordData::A(inner) => inner.rtype(),
            AllRecordData::Aaaa(inner) => inner.rtype(),
            AllRecordData::Nsec3(inner) => inner.rtype(),
            AllRecordData::Nsec3param(inner) => inner.rtype(),
            AllRecordData::Unknown(inner) => inner.rtype(),
        }
    }
}

impl<'a> ParseRecordData<'a> for AllRecordData<Bytes> {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a>,
    ) -> Result<Option<Self>, ParseError> {
        Ok(Some(match rtype {
            Rtype::A => AllRecordData::A(A::parse(parser)?),
            Rtype::AAAA => AllRecordData::Aaaa(Aaaa::parse(parser)?),
            Rtype::NSEC3 => AllRecordData::Nsec3(Nsec3::parse(parser)?),
            Rtype::NSEC3PARAM => {
                AllRecordData::Nsec3param(Nsec3param::parse(parser)?)
            }
            _ => {
                return UnknownRecordData::parse_rdata(rtype, parser)
                    .map(|res| res.map(AllRecordData::Unknown))
            }
        }))
    }
}

impl<Octs: AsRef<[u8]>> ComposeRecordData for AllRecordData<Octs> {
    fn rdlen(&self, compress: bool) -> Option<u16> {
        match self {
            AllRecordData::A(inner) => inner.rdlen(compress),
            AllRecordData::Aaaa(inner) => inner.rdlen(compress),
            AllRecordData::Nsec3(inner) => inner.rdlen(compress),
            AllRecordData::Nsec3param(inner) => inner.rdlen(compress),
            AllRecordData::Unknown(inner) => inner.rdlen(compress),
        }
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        match self {
            AllRecordData::A(inner) => inner.compose_rdata(target),
            AllRecordData::Aaaa(inner) => inner.compose_rdata(target),
            AllRecordData::Nsec3(inner) => inner.compose_rdata(target),
            AllRecordData::Nsec3param(inner) => inner.compose_rdata(target),
            AllRecordData::Unknown(inner) => inner.compose_rdata(target),
        }
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        match self {
            AllRecordData::A(inner) => {
                inner.compose_canonical_rdata(target)
            }
            AllRecordData::Aaaa(inner) => {
                inner.compose_canonical_rdata(target)
            }
            AllRecordData::Nsec3(inner) => {
                inner.compose_canonical_rdata(target)
            }
            AllRecordData::Nsec3param(inner) => {
                inner.compose_canonical_rdata(target)
            }
            AllRecordData::Unknown(inner) => {
                inner.compose_canonical_rdata(target)
            }
        }
    }
}

//--- Display and Debug

impl<Octs: AsRef<[u8]>> fmt::Display for AllRecordData<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AllRecordData::A(inner) => inner.fmt(f),
            AllRecordData::Aaaa(inner) => inner.fmt(f),
            AllRecordData::Nsec3(inner) => inner.fmt(f),
            AllRecordData::Nsec3param(inner) => inner.fmt(f),
            AllRecordData::Unknown(inner) => inner.fmt(f),
        }
    }
}

impl<Octs: AsRef<[u8]>> fmt::Debug for AllRecordData<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AllRecordData::A(inner) => inner.fmt(f),
            AllRecordData::Aaaa(inner) => inner.fmt(f),
            AllRecordData::Nsec3(inner) => inner.fmt(f),
            AllRecordData::Nsec3param(inner) => inner.fmt(f),
            AllRecordData::Unknown(inner) => inner.fmt(f),
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dispatch_by_rtype() {
        let mut parser = Parser::from_ref(b"\xc0\x00\x02\x01".as_ref());
        let data =
            AllRecordData::parse_rdata(Rtype::A, &mut parser)
                .unwrap()
                .unwrap();
        assert!(matches!(data, AllRecordData::A(_)));
        assert_eq!(data.rtype(), Rtype::A);

        // An unimplemented record type comes back as its raw data.
        let mut parser = Parser::from_ref(b"\xc0\x00\x02\x01".as_ref());
        let data =
            AllRecordData::parse_rdata(Rtype::from_int(4711), &mut parser)
                .unwrap()
                .unwrap();
        assert!(matches!(data, AllRecordData::Unknown(_)));
        assert_eq!(data.rtype(), Rtype::from_int(4711));
        let mut buf = Vec::new();
        data.compose_rdata(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), b"\xc0\x00\x02\x01");
    }
}
