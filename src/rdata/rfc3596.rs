//! Record data from [RFC 3596]: the AAAA record.
//!
//! [RFC 3596]: https://tools.ietf.org/html/rfc3596

use crate::base::cmp::CanonicalOrd;
use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    Compose, Composer, Parse, ParseError, Parser, ShortBuf,
};
use core::cmp::Ordering;
use core::str::FromStr;
use core::{fmt, ops};
use std::net::Ipv6Addr;

//------------ Aaaa ----------------------------------------------------------

/// AAAA record data.
///
/// An AAAA record contains the IPv6 address of a host with the owner
/// domain name.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Aaaa {
    addr: Ipv6Addr,
}

impl Aaaa {
    /// Creates new AAAA record data from an IPv6 address.
    #[must_use]
    pub fn new(addr: Ipv6Addr) -> Aaaa {
        Aaaa { addr }
    }

    /// Returns the IPv6 address.
    #[must_use]
    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }

    /// Sets the IPv6 address.
    pub fn set_addr(&mut self, addr: Ipv6Addr) {
        self.addr = addr
    }

    /// Parses AAAA record data from the beginning of a parser.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        Ipv6Addr::parse(parser).map(Self::new)
    }
}

//--- From and FromStr

impl From<Ipv6Addr> for Aaaa {
    fn from(addr: Ipv6Addr) -> Self {
        Self::new(addr)
    }
}

impl From<Aaaa> for Ipv6Addr {
    fn from(aaaa: Aaaa) -> Self {
        aaaa.addr
    }
}

impl FromStr for Aaaa {
    type Err = <Ipv6Addr as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv6Addr::from_str(s).map(Aaaa::new)
    }
}

//--- CanonicalOrd

impl CanonicalOrd for Aaaa {
    fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Aaaa {
    fn rtype(&self) -> Rtype {
        Rtype::AAAA
    }
}

impl<'a> ParseRecordData<'a> for Aaaa {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::AAAA {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Aaaa {
    fn rdlen(&self, _compress: bool) -> Option<u16> {
        Some(Ipv6Addr::COMPOSE_LEN)
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

impl fmt::Display for Aaaa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.addr.fmt(f)
    }
}

//--- Deref and DerefMut

impl ops::Deref for Aaaa {
    type Target = Ipv6Addr;

    fn deref(&self) -> &Self::Target {
        &self.addr
    }
}

impl ops::DerefMut for Aaaa {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.addr
    }
}

//--- AsRef and AsMut

impl AsRef<Ipv6Addr> for Aaaa {
    fn as_ref(&self) -> &Ipv6Addr {
        &self.addr
    }
}

impl AsMut<Ipv6Addr> for Aaaa {
    fn as_mut(&mut self) -> &mut Ipv6Addr {
        &mut self.addr
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compose_and_parse() {
        let aaaa = Aaaa::from_str("2001:db8::1").unwrap();
        let mut buf = Vec::new();
        aaaa.compose_rdata(&mut buf).unwrap();
        assert_eq!(buf.len(), 16);
        assert_eq!(buf.len(), usize::from(aaaa.rdlen(false).unwrap()));

        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(Aaaa::parse(&mut parser), Ok(aaaa));
        assert_eq!(parser.remaining(), 0);
    }
}
