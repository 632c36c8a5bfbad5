//! Resource records.
//!
//! This module defines types and traits related to DNS resource records.
//! The most complete type is [`Record`] which contains a full record for a
//! certain record data type. [`RecordHeader`] contains the data from a
//! record's header, the first couple of octets common to all records.
//! Finally, [`ParsedRecord`] is similar to [`Record`] but contains the
//! record data in its raw, encoded form.
//!
//! The [`ComposeRecord`] trait is used by the message builder to accept
//! different representations of records when building the record sections
//! of a message.

use super::cmp::CanonicalOrd;
use super::iana::{Class, Rtype};
use super::name::{ParsedDname, ToDname};
use super::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use super::wire::{Compose, Composer, FormError, ParseError, Parser, ShortBuf};
use core::cmp::Ordering;
use core::time::Duration;
use core::{fmt, hash};

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource
/// records. They have a three part key of a domain name, resource record
/// type, and class. The domain name resulting from looking the record up
/// is part of the record itself and is called the *owner* of the record.
///
/// The record type describes the kind of data the record holds, such as IP
/// addresses. The class describes which sort of network the information is
/// for. In practice, the only relevant class is IN, the Internet.
///
/// There is one more piece of data: the TTL or time to live. This value
/// says how long a record remains valid before it should be refreshed from
/// its original source.
///
/// Since there are more than eighty record types, the type is generic over
/// a trait for record data, [`RecordData`]. Because a record's owner is a
/// domain name, the `Record` type is additionally generic over the domain
/// name type.
///
/// There are two ways to create a record value: you can make one yourself
/// using the [`new`][Self::new] function, or you can parse one from an
/// existing message. [`Message`][super::message::Message] and its friends
/// provide a way to do that.
#[derive(Clone)]
pub struct Record<Name, Data> {
    /// The owner of the record.
    owner: Name,

    /// The class of the record.
    class: Class,

    /// The time-to-live value of the record.
    ttl: Ttl,

    /// The record data. The value also specifies the record's type.
    data: Data,
}

/// # Creation and Element Access
///
impl<Name, Data> Record<Name, Data> {
    /// Creates a new record from its parts.
    pub fn new(owner: Name, class: Class, ttl: Ttl, data: Data) -> Self {
        Record {
            owner,
            class,
            ttl,
            data,
        }
    }

    /// Returns a reference to the owner domain name.
    ///
    /// The owner of a record is the domain name that specifies the node in
    /// the DNS tree this record belongs to.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype
    where
        Data: RecordData,
    {
        self.data.rtype()
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Sets the record's class.
    pub fn set_class(&mut self, class: Class) {
        self.class = class
    }

    /// Returns the record's time-to-live.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Sets the record's time-to-live.
    pub fn set_ttl(&mut self, ttl: Ttl) {
        self.ttl = ttl
    }

    /// Returns a reference to the record data.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Returns a mutable reference to the record data.
    pub fn data_mut(&mut self) -> &mut Data {
        &mut self.data
    }

    /// Trades the record for its record data.
    pub fn into_data(self) -> Data {
        self.data
    }

    /// Trades the record for its owner name and data.
    pub fn into_owner_and_data(self) -> (Name, Data) {
        (self.owner, self.data)
    }
}

/// # Parsing and Composing
///
impl<'a, Data> Record<ParsedDname<'a>, Data> {
    /// Parses a record from the beginning of a parser.
    ///
    /// Returns `Ok(None)` if the record data type `Data` doesn't feel
    /// responsible for records of the encountered record type.
    pub fn parse(
        parser: &mut Parser<'a>,
    ) -> Result<Option<Self>, ParseError>
    where
        Data: ParseRecordData<'a>,
    {
        let header = RecordHeader::parse(parser)?;
        header.parse_into_record(parser)
    }
}

impl<Name: ToDname, Data: RecordData + ComposeRecordData> Record<Name, Data> {
    /// Appends the record to a message target.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        target.append_compressed_dname(&self.owner)?;
        self.data.rtype().compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        self.data.compose_len_rdata(target)
    }

    /// Appends the record in canonical form to a message target.
    pub fn compose_canonical<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        self.owner.compose_canonical(target)?;
        self.data.rtype().compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        self.data.compose_canonical_len_rdata(target)
    }
}

//--- From

impl<N, D> From<(N, Class, u32, D)> for Record<N, D> {
    fn from((owner, class, ttl, data): (N, Class, u32, D)) -> Self {
        Self::new(owner, class, Ttl::from_secs(ttl), data)
    }
}

impl<N, D> From<(N, Class, Ttl, D)> for Record<N, D> {
    fn from((owner, class, ttl, data): (N, Class, Ttl, D)) -> Self {
        Self::new(owner, class, ttl, data)
    }
}

impl<N, D> From<(N, u32, D)> for Record<N, D> {
    fn from((owner, ttl, data): (N, u32, D)) -> Self {
        Self::new(owner, Class::IN, Ttl::from_secs(ttl), data)
    }
}

impl<N, D> From<(N, Ttl, D)> for Record<N, D> {
    fn from((owner, ttl, data): (N, Ttl, D)) -> Self {
        Self::new(owner, Class::IN, ttl, data)
    }
}

//--- PartialEq and Eq

impl<N, NN, D, DD> PartialEq<Record<NN, DD>> for Record<N, D>
where
    N: PartialEq<NN>,
    D: RecordData + PartialEq<DD>,
    DD: RecordData,
{
    fn eq(&self, other: &Record<NN, DD>) -> bool {
        self.owner == other.owner
            && self.class == other.class
            && self.data == other.data
    }
}

impl<N: Eq, D: RecordData + Eq> Eq for Record<N, D> {}

//--- CanonicalOrd

impl<N, NN, D, DD> CanonicalOrd<Record<NN, DD>> for Record<N, D>
where
    N: ToDname,
    NN: ToDname,
    D: RecordData + CanonicalOrd<DD>,
    DD: RecordData,
{
    fn canonical_cmp(&self, other: &Record<NN, DD>) -> Ordering {
        // This sort order keeps all the records of a zone together.
        match self.class.cmp(&other.class) {
            Ordering::Equal => {}
            res => return res,
        }
        match self.owner.name_cmp(&other.owner) {
            Ordering::Equal => {}
            res => return res,
        }
        match self.rtype().cmp(&other.rtype()) {
            Ordering::Equal => {}
            res => return res,
        }
        self.data.canonical_cmp(&other.data)
    }
}

//--- Hash

impl<Name, Data> hash::Hash for Record<Name, Data>
where
    Name: hash::Hash,
    Data: hash::Hash,
{
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.class.hash(state);
        self.ttl.hash(state);
        self.data.hash(state);
    }
}

//--- Display and Debug

impl<Name, Data> fmt::Display for Record<Name, Data>
where
    Name: fmt::Display,
    Data: RecordData + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}. {} {} {} {}",
            self.owner,
            self.ttl.as_secs(),
            self.class,
            self.data.rtype(),
            self.data
        )
    }
}

impl<Name, Data> fmt::Debug for Record<Name, Data>
where
    Name: fmt::Debug,
    Data: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Record")
            .field("owner", &self.owner)
            .field("class", &self.class)
            .field("ttl", &self.ttl)
            .field("data", &self.data)
            .finish()
    }
}

//------------ ComposeRecord -------------------------------------------------

/// A helper trait allowing construction of records on the fly.
///
/// The trait's primary users are the three record section builder types of
/// the [message builder][super::message_builder] system. Their `push`
/// methods accept anything that implements this trait.
///
/// Implementations are provided for [`Record`] values and references. In
/// addition, a tuple of a domain name, class, TTL, and record data can be
/// used as this trait, saving the detour of constructing a record first.
/// Since the class is pretty much always `Class::IN`, it can be left out
/// in this case.
pub trait ComposeRecord {
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf>;
}

impl<'a, T: ComposeRecord> ComposeRecord for &'a T {
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        (*self).compose_record(target)
    }
}

impl<Name, Data> ComposeRecord for Record<Name, Data>
where
    Name: ToDname,
    Data: RecordData + ComposeRecordData,
{
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        self.compose(target)
    }
}

impl<Name, Data> ComposeRecord for (Name, Class, u32, Data)
where
    Name: ToDname,
    Data: RecordData + ComposeRecordData,
{
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        Record::new(&self.0, self.1, Ttl::from_secs(self.2), &self.3)
            .compose(target)
    }
}

impl<Name, Data> ComposeRecord for (Name, Class, Ttl, Data)
where
    Name: ToDname,
    Data: RecordData + ComposeRecordData,
{
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        Record::new(&self.0, self.1, self.2, &self.3).compose(target)
    }
}

impl<Name, Data> ComposeRecord for (Name, u32, Data)
where
    Name: ToDname,
    Data: RecordData + ComposeRecordData,
{
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        Record::new(&self.0, Class::IN, Ttl::from_secs(self.1), &self.2)
            .compose(target)
    }
}

impl<Name, Data> ComposeRecord for (Name, Ttl, Data)
where
    Name: ToDname,
    Data: RecordData + ComposeRecordData,
{
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        Record::new(&self.0, Class::IN, self.1, &self.2).compose(target)
    }
}

//------------ RecordHeader --------------------------------------------------

/// The header of a resource record.
///
/// This type encapsulates the common header of a resource record. It
/// consists of the owner, record type, class, TTL, and the length of the
/// record data. It is effectively a helper type for dealing with resource
/// records encoded in a DNS message.
#[derive(Clone)]
pub struct RecordHeader<Name> {
    owner: Name,
    rtype: Rtype,
    class: Class,
    ttl: Ttl,
    rdlen: u16,
}

impl<Name> RecordHeader<Name> {
    /// Creates a new record header from its components.
    pub fn new(
        owner: Name,
        rtype: Rtype,
        class: Class,
        ttl: Ttl,
        rdlen: u16,
    ) -> Self {
        RecordHeader {
            owner,
            rtype,
            class,
            ttl,
            rdlen,
        }
    }

    /// Returns a reference to the owner of the record.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type of the record.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the class of the record.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the TTL of the record.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Returns the data length of the record.
    pub fn rdlen(&self) -> u16 {
        self.rdlen
    }

    /// Converts the header into an actual record.
    pub fn into_record<Data>(self, data: Data) -> Record<Name, Data> {
        Record::new(self.owner, self.class, self.ttl, data)
    }
}

/// # Parsing and Composing
///
impl<'a> RecordHeader<ParsedDname<'a>> {
    /// Parses a record header from the beginning of a parser.
    pub fn parse(parser: &mut Parser<'a>) -> Result<Self, ParseError> {
        Ok(RecordHeader::new(
            ParsedDname::parse(parser)?,
            Rtype::parse(parser)?,
            Class::parse(parser)?,
            Ttl::parse(parser)?,
            parser.parse_u16_be()?,
        ))
    }

    /// Parses the remainder of the record and returns it.
    ///
    /// The method assumes that the parser is currently positioned right
    /// after the end of the record header. If the record data type `Data`
    /// feels capable of parsing a record with a header of `self`, the
    /// method will parse the data and return a full record. Otherwise, it
    /// returns `Ok(None)` and leaves the record data unread in `parser`.
    #[allow(clippy::type_complexity)]
    pub fn parse_into_record<Data>(
        self,
        parser: &mut Parser<'a>,
    ) -> Result<Option<Record<ParsedDname<'a>, Data>>, ParseError>
    where
        Data: ParseRecordData<'a>,
    {
        let mut parser = parser.parse_parser(self.rdlen as usize)?;
        let res = Data::parse_rdata(self.rtype, &mut parser)?
            .map(|data| Record::new(self.owner, self.class, self.ttl, data));
        if res.is_some() && parser.remaining() > 0 {
            return Err(ParseError::Form(FormError::new(
                "trailing data in record data",
            )));
        }
        Ok(res)
    }
}

impl RecordHeader<()> {
    /// Parses only the record length and skips over all the other fields.
    fn parse_rdlen(parser: &mut Parser<'_>) -> Result<u16, ParseError> {
        ParsedDname::skip(parser)?;
        parser.advance(
            (Rtype::COMPOSE_LEN + Class::COMPOSE_LEN + Ttl::COMPOSE_LEN)
                .into(),
        )?;
        parser.parse_u16_be().map_err(Into::into)
    }
}

impl<Name: ToDname> RecordHeader<Name> {
    /// Appends the record header to a message target.
    ///
    /// Note that this composes the header with the data length given to
    /// [`new`][Self::new]; the value is not recomputed.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        target.append_compressed_dname(&self.owner)?;
        self.rtype.compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        self.rdlen.compose(target)
    }
}

//--- PartialEq and Eq

impl<Name, NName> PartialEq<RecordHeader<NName>> for RecordHeader<Name>
where
    Name: ToDname,
    NName: ToDname,
{
    fn eq(&self, other: &RecordHeader<NName>) -> bool {
        self.owner.name_eq(&other.owner)
            && self.rtype == other.rtype
            && self.class == other.class
            && self.ttl == other.ttl
            && self.rdlen == other.rdlen
    }
}

impl<Name: ToDname> Eq for RecordHeader<Name> {}

//--- Debug

impl<Name: fmt::Debug> fmt::Debug for RecordHeader<Name> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RecordHeader")
            .field("owner", &self.owner)
            .field("rtype", &self.rtype)
            .field("class", &self.class)
            .field("ttl", &self.ttl)
            .field("rdlen", &self.rdlen)
            .finish()
    }
}

//------------ ParsedRecord --------------------------------------------------

/// A raw record parsed from a message.
///
/// A value of this type contains the record header and the raw record
/// data. It is mainly used as an intermediary type when turning raw
/// message data into [`Record`]s.
///
/// It allows access to the header only but can be traded for a real record
/// of a specific record data type via the [`to_record`][Self::to_record]
/// and [`into_record`][Self::into_record] methods.
#[derive(Clone)]
pub struct ParsedRecord<'a> {
    /// The record's header.
    header: RecordHeader<ParsedDname<'a>>,

    /// A parser positioned at the beginning of the record's data.
    data: Parser<'a>,
}

impl<'a> ParsedRecord<'a> {
    /// Creates a new parsed record from a header and the record data.
    ///
    /// The record data is provided via a parser that is positioned at the
    /// first octet of the record data.
    #[must_use]
    pub fn new(
        header: RecordHeader<ParsedDname<'a>>,
        data: Parser<'a>,
    ) -> Self {
        ParsedRecord { header, data }
    }

    /// Returns the owner of the record.
    #[must_use]
    pub fn owner(&self) -> ParsedDname<'a> {
        *self.header.owner()
    }

    /// Returns the record type of the record.
    #[must_use]
    pub fn rtype(&self) -> Rtype {
        self.header.rtype()
    }

    /// Returns the class of the record.
    #[must_use]
    pub fn class(&self) -> Class {
        self.header.class()
    }

    /// Returns the TTL of the record.
    #[must_use]
    pub fn ttl(&self) -> Ttl {
        self.header.ttl()
    }

    /// Returns the data length of the record.
    #[must_use]
    pub fn rdlen(&self) -> u16 {
        self.header.rdlen()
    }
}

impl<'a> ParsedRecord<'a> {
    /// Creates a real resource record from the parsed record.
    ///
    /// The method is generic over a type that knows how to parse record
    /// data via the [`ParseRecordData`] trait. If the trait feels capable
    /// of parsing this record type and parsing succeeds, the method
    /// returns `Ok(Some(_))`. It returns `Ok(None)` if the trait doesn't
    /// know how to parse this particular record type. It returns an error
    /// if parsing fails.
    #[allow(clippy::type_complexity)]
    pub fn to_record<Data>(
        &self,
    ) -> Result<Option<Record<ParsedDname<'a>, Data>>, ParseError>
    where
        Data: ParseRecordData<'a>,
    {
        self.header
            .clone()
            .parse_into_record(&mut self.data.clone())
    }

    /// Trades the parsed record for a real resource record.
    ///
    /// See [`to_record`][Self::to_record] for the semantics.
    #[allow(clippy::type_complexity)]
    pub fn into_record<Data>(
        mut self,
    ) -> Result<Option<Record<ParsedDname<'a>, Data>>, ParseError>
    where
        Data: ParseRecordData<'a>,
    {
        self.header.parse_into_record(&mut self.data)
    }
}

impl<'a> ParsedRecord<'a> {
    /// Parses a raw record from the beginning of a parser.
    pub fn parse(parser: &mut Parser<'a>) -> Result<Self, ParseError> {
        let header = RecordHeader::parse(parser)?;
        let data = *parser;
        parser.advance(header.rdlen() as usize)?;
        Ok(Self::new(header, data))
    }

    /// Skips over a record at the beginning of a parser.
    pub fn skip(parser: &mut Parser<'a>) -> Result<(), ParseError> {
        let rdlen = RecordHeader::parse_rdlen(parser)?;
        parser.advance(rdlen as usize)?;
        Ok(())
    }

    // No compose because the data may contain compressed domain names.
}

//--- PartialEq and Eq

impl<'a, 'o> PartialEq<ParsedRecord<'o>> for ParsedRecord<'a> {
    fn eq(&self, other: &ParsedRecord<'o>) -> bool {
        self.header == other.header
            && self
                .data
                .peek(self.header.rdlen() as usize)
                .eq(&other.data.peek(other.header.rdlen() as usize))
    }
}

impl<'a> Eq for ParsedRecord<'a> {}

//------------ Ttl -----------------------------------------------------------

const SECS_PER_MINUTE: u32 = 60;
const SECS_PER_HOUR: u32 = 3600;
const SECS_PER_DAY: u32 = 86400;

/// A span of time, typically used to describe how long a record is valid.
///
/// TTL values have second-level precision and are limited to 32 bits per
/// [RFC 2181], which is why this type exists instead of using
/// [`std::time::Duration`] directly. Conversion into a `Duration` is
/// available via [`into_duration`][Self::into_duration].
///
/// [RFC 2181]: https://datatracker.ietf.org/doc/html/rfc2181#section-8
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub struct Ttl(u32);

impl Ttl {
    /// A time-to-live of one second.
    pub const SECOND: Ttl = Ttl::from_secs(1);

    /// A time-to-live of one minute.
    pub const MINUTE: Ttl = Ttl::from_mins(1);

    /// A time-to-live of one hour.
    pub const HOUR: Ttl = Ttl::from_hours(1);

    /// A time-to-live of one day.
    pub const DAY: Ttl = Ttl::from_days(1);

    /// A time-to-live of zero seconds.
    ///
    /// A record with this TTL should not be cached.
    pub const ZERO: Ttl = Ttl::from_secs(0);

    /// The maximum theoretical time to live.
    pub const MAX: Ttl = Ttl::from_secs(u32::MAX);

    /// The practical maximum time to live as recommended by [RFC 8767].
    ///
    /// [RFC 8767]: https://datatracker.ietf.org/doc/html/rfc8767#section-4
    pub const CAP: Ttl = Ttl::from_secs(604_800);

    /// The length of the wire representation.
    pub const COMPOSE_LEN: u16 = 4;

    /// Creates a new `Ttl` from the specified number of seconds.
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Creates a new `Ttl` from the specified number of minutes.
    ///
    /// # Panics
    ///
    /// Panics if the resulting number of seconds does not fit 32 bits.
    #[must_use]
    pub const fn from_mins(minutes: u32) -> Self {
        assert!(minutes <= u32::MAX / SECS_PER_MINUTE);
        Self(minutes * SECS_PER_MINUTE)
    }

    /// Creates a new `Ttl` from the specified number of hours.
    ///
    /// # Panics
    ///
    /// Panics if the resulting number of seconds does not fit 32 bits.
    #[must_use]
    pub const fn from_hours(hours: u32) -> Self {
        assert!(hours <= u32::MAX / SECS_PER_HOUR);
        Self(hours * SECS_PER_HOUR)
    }

    /// Creates a new `Ttl` from the specified number of days.
    ///
    /// # Panics
    ///
    /// Panics if the resulting number of seconds does not fit 32 bits.
    #[must_use]
    pub const fn from_days(days: u16) -> Self {
        Self(days as u32 * SECS_PER_DAY)
    }

    /// Returns the total time to live in seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u32 {
        self.0
    }

    /// Returns true if this `Ttl` spans no time.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Converts a `Ttl` into a [`Duration`].
    #[must_use]
    pub const fn into_duration(&self) -> Duration {
        Duration::from_secs(self.0 as u64)
    }

    /// Checked addition. Returns [`None`] on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Ttl) -> Option<Ttl> {
        match self.0.checked_add(rhs.0) {
            Some(secs) => Some(Ttl(secs)),
            None => None,
        }
    }

    /// Saturating subtraction. Returns [`Ttl::ZERO`] on underflow.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Ttl) -> Ttl {
        match self.0.checked_sub(rhs.0) {
            Some(secs) => Ttl(secs),
            None => Ttl::ZERO,
        }
    }

    /// Caps the value at 7 days as recommended by [RFC 8767].
    ///
    /// [RFC 8767]: https://datatracker.ietf.org/doc/html/rfc8767
    #[must_use]
    pub const fn cap(self) -> Ttl {
        if self.0 > Self::CAP.0 {
            Self::CAP
        } else {
            self
        }
    }

    /// Appends the 32 bit wire representation to a target.
    pub fn compose<Target: super::wire::OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        target.append_slice(&self.0.to_be_bytes())
    }

    /// Takes a TTL from the beginning of a parser.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        parser
            .parse_u32_be()
            .map(Ttl::from_secs)
            .map_err(Into::into)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::name::Dname;
    use crate::base::rdata::UnknownRecordData;
    use bytes::Bytes;

    fn rdata(data: &'static [u8]) -> UnknownRecordData<Bytes> {
        UnknownRecordData::from_octets(
            Rtype::from_int(4321),
            Bytes::from_static(data),
        )
        .unwrap()
    }

    #[test]
    fn compose_and_parse() {
        let record = Record::new(
            Dname::vec_from_str("example.com").unwrap(),
            Class::IN,
            Ttl::from_secs(86400),
            rdata(b"\x01\x02\x03"),
        );

        let mut buf = Vec::new();
        record.compose(&mut buf).unwrap();
        assert_eq!(
            buf.as_slice(),
            b"\x07example\x03com\0\x10\xe1\0\x01\0\x01\x51\x80\
              \0\x03\x01\x02\x03"
        );

        let mut parser = Parser::from_ref(buf.as_slice());
        let parsed =
            Record::<_, UnknownRecordData<Bytes>>::parse(&mut parser)
                .unwrap()
                .unwrap();
        assert_eq!(parser.remaining(), 0);
        assert_eq!(parsed.rtype(), Rtype::from_int(4321));
        assert_eq!(parsed.class(), Class::IN);
        assert_eq!(parsed.ttl(), Ttl::DAY);
        assert_eq!(parsed.data().data().as_ref(), b"\x01\x02\x03");
        assert_eq!(record, parsed);
    }

    #[test]
    fn parse_truncated_rdata() {
        // The rdlen claims four octets but only three follow.
        let buf =
            b"\x07example\x03com\0\x10\xe1\0\x01\0\x01\x51\x80\0\x04\x01\x02\x03";
        let mut parser = Parser::from_ref(buf.as_ref());
        assert_eq!(
            Record::<_, UnknownRecordData<Bytes>>::parse(&mut parser),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn parsed_record_skip() {
        let mut buf = Vec::new();
        let record = Record::new(
            Dname::vec_from_str("example.com").unwrap(),
            Class::IN,
            Ttl::MINUTE,
            rdata(b"\x01\x02\x03"),
        );
        record.compose(&mut buf).unwrap();
        record.compose(&mut buf).unwrap();

        let mut parser = Parser::from_ref(buf.as_slice());
        ParsedRecord::skip(&mut parser).unwrap();
        let second = ParsedRecord::parse(&mut parser).unwrap();
        assert_eq!(parser.remaining(), 0);
        assert_eq!(second.rdlen(), 3);
        assert_eq!(
            second.owner(),
            Dname::vec_from_str("example.com").unwrap()
        );
    }

    #[test]
    fn ttl() {
        assert_eq!(Ttl::MINUTE.as_secs(), 60);
        assert_eq!(Ttl::HOUR.as_secs(), 3600);
        assert_eq!(Ttl::DAY.as_secs(), 86400);
        assert_eq!(Ttl::from_days(50).cap(), Ttl::from_days(7));
        assert_eq!(Ttl::from_mins(5).cap(), Ttl::from_mins(5));
        assert!(Ttl::ZERO.is_zero());
        assert_eq!(Ttl::MAX.checked_add(Ttl::SECOND), None);
    }
}
