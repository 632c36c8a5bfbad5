//! Resource record data.
//!
//! Each resource record type has its own definition of the content and
//! formatting of its data. This module provides the basics for
//! implementing specific types for this record data. The concrete
//! implementations for well-known record types live in the top-level
//! [rdata][crate::rdata] module.
//!
//! There are three traits herein: any type that represents record data
//! implements [`RecordData`]. Such a type can be added to a message via
//! [`ComposeRecordData`]. If the data can also be parsed from an existing
//! message, the type in addition implements [`ParseRecordData`].
//!
//! The module also provides a type, [`UnknownRecordData`], that can be
//! used to deal with record types whose specification is not known (or
//! has not been implemented yet). Its use for unknown types is deliberate
//! policy: an unsupported record type round-trips as its raw data rather
//! than failing the whole message.

use super::cmp::CanonicalOrd;
use super::iana::Rtype;
use super::wire::{Compose, Composer, ParseError, Parser, ShortBuf};
use core::cmp::Ordering;
use core::fmt;

//------------ RecordData ----------------------------------------------------

/// A type that represents record data.
///
/// The type needs to be able to provide the record type of a record with
/// this data via the [`rtype`][Self::rtype] method.
pub trait RecordData {
    /// Returns the record type associated with this record data instance.
    ///
    /// This is a method rather than an associated function to allow one
    /// type to be used for several real record types.
    fn rtype(&self) -> Rtype;
}

impl<'a, T: RecordData> RecordData for &'a T {
    fn rtype(&self) -> Rtype {
        (*self).rtype()
    }
}

//------------ ComposeRecordData ---------------------------------------------

/// A type of record data that can be composed.
pub trait ComposeRecordData: RecordData {
    /// Returns the length of the record data if known in advance.
    ///
    /// If `compress` is `true`, name compression is available in the
    /// target. If name compression would be used in `compose_rdata`, the
    /// method should return `None` since it can't know the final size.
    fn rdlen(&self, compress: bool) -> Option<u16>;

    /// Appends the wire format of the record data into `target`.
    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf>;

    /// Appends the canonical wire format of the record data into `target`.
    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf>;

    /// Appends the record data prefixed with its length.
    ///
    /// The length written is always the actual length of the data that
    /// follows it, either because it is computed up front via
    /// [`rdlen`][Self::rdlen] or because it is patched in after the data
    /// has been written.
    fn compose_len_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        if let Some(rdlen) = self.rdlen(target.can_compress()) {
            rdlen.compose(target)?;
            self.compose_rdata(target)
        } else {
            compose_prefixed(target, |target| self.compose_rdata(target))
        }
    }

    /// Appends the canonical record data prefixed with its length.
    fn compose_canonical_len_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        if let Some(rdlen) = self.rdlen(false) {
            rdlen.compose(target)?;
            self.compose_canonical_rdata(target)
        } else {
            compose_prefixed(target, |target| {
                self.compose_canonical_rdata(target)
            })
        }
    }
}

/// Composes data prefixed by its length by patching the length in later.
fn compose_prefixed<Target: Composer + ?Sized, F>(
    target: &mut Target,
    op: F,
) -> Result<(), ShortBuf>
where
    F: FnOnce(&mut Target) -> Result<(), ShortBuf>,
{
    target.append_slice(&[0; 2])?;
    let pos = target.as_ref().len();
    match op(target) {
        Ok(_) => {
            let len = u16::try_from(target.as_ref().len() - pos)
                .map_err(|_| {
                    target.truncate(pos);
                    ShortBuf::new()
                })?;
            target.as_mut()[pos - 2..pos].copy_from_slice(&len.to_be_bytes());
            Ok(())
        }
        Err(err) => {
            target.truncate(pos);
            Err(err)
        }
    }
}

impl<'a, T: ComposeRecordData> ComposeRecordData for &'a T {
    fn rdlen(&self, compress: bool) -> Option<u16> {
        (*self).rdlen(compress)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        (*self).compose_rdata(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        (*self).compose_canonical_rdata(target)
    }
}

//------------ ParseRecordData -----------------------------------------------

/// A record data type that can be parsed from a message.
///
/// When record data types are generic, they may not in all cases be
/// parseable. They may still represent record data to be used when
/// constructing a message. To reflect this asymmetry, parsing of record
/// data has its own trait.
pub trait ParseRecordData<'a>: RecordData + Sized {
    /// Parses the record data.
    ///
    /// The record data is for a record of type `rtype`. The function may
    /// decide whether it wants to parse data for that type. It should
    /// return `Ok(None)` if it doesn't.
    ///
    /// The `parser` is positioned at the beginning of the record data and
    /// is limited to the length of the data. The method only needs to
    /// parse as much data as it needs. The caller has to make sure to deal
    /// with data remaining in the parser.
    ///
    /// If the function doesn't want to process the data, it must not touch
    /// the parser. In particular, it must not advance it.
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a>,
    ) -> Result<Option<Self>, ParseError>;
}

//------------ UnknownRecordData ---------------------------------------------

/// A type for parsing any type of record data.
///
/// This type accepts any record type and stores the plain, unparsed record
/// data as an octets sequence. It is used as the fallback variant of
/// [`AllRecordData`][crate::rdata::AllRecordData], guaranteeing that a
/// message containing record types unknown to this crate still parses and
/// round-trips with the data intact.
///
/// Because some record types allow compressed domain names in their record
/// data, this type cannot be used safely with those record types when
/// composing: the pointers would refer into a different message. The
/// structure of such record types needs to be known.
#[derive(Clone)]
pub struct UnknownRecordData<Octs> {
    /// The record type of this data.
    rtype: Rtype,

    /// The record data.
    data: Octs,
}

impl<Octs> UnknownRecordData<Octs> {
    /// Creates generic record data from an octets sequence.
    ///
    /// Returns an error if `data` is longer than 65,535 octets and thus
    /// can never be the data of a real record.
    pub fn from_octets(
        rtype: Rtype,
        data: Octs,
    ) -> Result<Self, LongRecordData>
    where
        Octs: AsRef<[u8]>,
    {
        if data.as_ref().len() > 0xFFFF {
            Err(LongRecordData(()))
        } else {
            Ok(UnknownRecordData { rtype, data })
        }
    }

    /// Returns the record type this data is for.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns a reference to the record data.
    pub fn data(&self) -> &Octs {
        &self.data
    }
}

//--- PartialEq and Eq

impl<Octs, Other> PartialEq<UnknownRecordData<Other>>
    for UnknownRecordData<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn eq(&self, other: &UnknownRecordData<Other>) -> bool {
        self.rtype == other.rtype
            && self.data.as_ref().eq(other.data.as_ref())
    }
}

impl<Octs: AsRef<[u8]>> Eq for UnknownRecordData<Octs> {}

//--- PartialOrd, CanonicalOrd, and Ord

impl<Octs, Other> PartialOrd<UnknownRecordData<Other>>
    for UnknownRecordData<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn partial_cmp(
        &self,
        other: &UnknownRecordData<Other>,
    ) -> Option<Ordering> {
        self.data.as_ref().partial_cmp(other.data.as_ref())
    }
}

impl<Octs, Other> CanonicalOrd<UnknownRecordData<Other>>
    for UnknownRecordData<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn canonical_cmp(&self, other: &UnknownRecordData<Other>) -> Ordering {
        self.data.as_ref().cmp(other.data.as_ref())
    }
}

impl<Octs: AsRef<[u8]>> Ord for UnknownRecordData<Octs> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.data.as_ref().cmp(other.data.as_ref())
    }
}

//--- RecordData, ParseRecordData, and ComposeRecordData

impl<Octs: AsRef<[u8]>> RecordData for UnknownRecordData<Octs> {
    fn rtype(&self) -> Rtype {
        self.rtype
    }
}

impl<'a> ParseRecordData<'a> for UnknownRecordData<bytes::Bytes> {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a>,
    ) -> Result<Option<Self>, ParseError> {
        let rdlen = parser.remaining();
        parser
            .parse_octets(rdlen)
            .map(|data| Some(Self { rtype, data }))
            .map_err(Into::into)
    }
}

impl<Octs: AsRef<[u8]>> ComposeRecordData for UnknownRecordData<Octs> {
    fn rdlen(&self, _compress: bool) -> Option<u16> {
        Some(u16::try_from(self.data.as_ref().len()).expect("long rdata"))
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        target.append_slice(self.data.as_ref())
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        self.compose_rdata(target)
    }
}

//--- Display and Debug

impl<Octs: AsRef<[u8]>> fmt::Display for UnknownRecordData<Octs> {
    /// Formats the record data in the [RFC 3597] generic representation.
    ///
    /// [RFC 3597]: https://tools.ietf.org/html/rfc3597
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.data.as_ref().len())?;
        for ch in self.data.as_ref() {
            write!(f, " {:02x}", *ch)?
        }
        Ok(())
    }
}

impl<Octs: AsRef<[u8]>> fmt::Debug for UnknownRecordData<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("UnknownRecordData(")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

//------------ LongRecordData ------------------------------------------------

/// The octets sequence to be used for record data is too long.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongRecordData(());

impl fmt::Display for LongRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("record data too long")
    }
}

impl std::error::Error for LongRecordData {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn unknown_round_trip() {
        let data = UnknownRecordData::from_octets(
            Rtype::from_int(2017),
            Bytes::from_static(b"\xde\xad\xbe\xef"),
        )
        .unwrap();

        let mut buf = Vec::new();
        data.compose_len_rdata(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), b"\0\x04\xde\xad\xbe\xef");

        let mut parser = Parser::from_ref(&buf.as_slice()[2..]);
        let parsed = UnknownRecordData::parse_rdata(
            Rtype::from_int(2017),
            &mut parser,
        )
        .unwrap()
        .unwrap();
        assert_eq!(parsed, data);
        assert_eq!(parsed.rtype(), Rtype::from_int(2017));
    }

    #[test]
    fn long_data() {
        assert!(UnknownRecordData::from_octets(
            Rtype::from_int(2017),
            vec![0u8; 0x10000],
        )
        .is_err());
    }

    #[test]
    fn display() {
        let data = UnknownRecordData::from_octets(
            Rtype::from_int(2017),
            Bytes::from_static(b"\xde\xad"),
        )
        .unwrap();
        assert_eq!(format!("{}", data), "\\# 2 de ad");
    }
}
