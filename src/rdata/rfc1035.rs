//! Record data from [RFC 1035]: the A record.
//!
//! This RFC defines the initial set of record types. Of those, this crate
//! only implements the A record; everything else it encounters is handled
//! through [`UnknownRecordData`][crate::base::rdata::UnknownRecordData].
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use crate::base::cmp::CanonicalOrd;
use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    Compose, Composer, Parse, ParseError, Parser, ShortBuf,
};
use core::cmp::Ordering;
use core::str::FromStr;
use core::{fmt, ops};
use std::net::Ipv4Addr;

//------------ A -------------------------------------------------------------

/// A record data.
///
/// An A record contains the IPv4 address of a host with the owner domain
/// name.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct A {
    addr: Ipv4Addr,
}

impl A {
    /// Creates new A record data from an IPv4 address.
    #[must_use]
    pub fn new(addr: Ipv4Addr) -> A {
        A { addr }
    }

    /// Creates new A record data from the IPv4 address components.
    #[must_use]
    pub fn from_octets(a: u8, b: u8, c: u8, d: u8) -> A {
        A::new(Ipv4Addr::new(a, b, c, d))
    }

    /// Returns the IPv4 address.
    #[must_use]
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// Sets the IPv4 address.
    pub fn set_addr(&mut self, addr: Ipv4Addr) {
        self.addr = addr
    }

    /// Parses A record data from the beginning of a parser.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        Ipv4Addr::parse(parser).map(Self::new)
    }
}

//--- From and FromStr

impl From<Ipv4Addr> for A {
    fn from(addr: Ipv4Addr) -> Self {
        Self::new(addr)
    }
}

impl From<A> for Ipv4Addr {
    fn from(a: A) -> Self {
        a.addr
    }
}

impl FromStr for A {
    type Err = <Ipv4Addr as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4Addr::from_str(s).map(A::new)
    }
}

//--- CanonicalOrd

impl CanonicalOrd for A {
    fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for A {
    fn rtype(&self) -> Rtype {
        Rtype::A
    }
}

impl<'a> ParseRecordData<'a> for A {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::A {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for A {
    fn rdlen(&self, _compress: bool) -> Option<u16> {
        Some(Ipv4Addr::COMPOSE_LEN)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        self.addr.compose(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        self.compose_rdata(target)
    }
}

//--- Display

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.addr.fmt(f)
    }
}

//--- Deref and DerefMut

impl ops::Deref for A {
    type Target = Ipv4Addr;

    fn deref(&self) -> &Self::Target {
        &self.addr
    }
}

impl ops::DerefMut for A {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.addr
    }
}

//--- AsRef and AsMut

impl AsRef<Ipv4Addr> for A {
    fn as_ref(&self) -> &Ipv4Addr {
        &self.addr
    }
}

impl AsMut<Ipv4Addr> for A {
    fn as_mut(&mut self) -> &mut Ipv4Addr {
        &mut self.addr
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compose_and_parse() {
        let a = A::from_octets(192, 0, 2, 1);
        let mut buf = Vec::new();
        a.compose_rdata(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), b"\xc0\x00\x02\x01");
        assert_eq!(buf.len(), usize::from(a.rdlen(false).unwrap()));

        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(A::parse(&mut parser), Ok(a));
        assert_eq!(parser.remaining(), 0);

        let mut parser = Parser::from_ref(&buf.as_slice()[..3]);
        assert_eq!(A::parse(&mut parser), Err(ParseError::ShortInput));
    }

    #[test]
    fn from_str() {
        assert_eq!(
            A::from_str("192.0.2.1").unwrap(),
            A::from_octets(192, 0, 2, 1)
        );
        assert_eq!(format!("{}", A::from_octets(192, 0, 2, 1)), "192.0.2.1");
    }
}
