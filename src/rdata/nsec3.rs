//! Record data from [RFC 5155]: NSEC3 and NSEC3PARAM records.
//!
//! These records prove the non-existence of a name through a salted hash
//! over the owner names of a zone. Their wire format mixes fixed fields
//! with two length-prefixed opaque fields and a record type bitmap, which
//! makes them a good workout for the record data machinery: the salt may
//! be empty yet still carries its length octet, and the next hashed owner
//! name is binary data that is presented in base32hex text form.
//!
//! [RFC 5155]: https://tools.ietf.org/html/rfc5155

use super::dnssec::RtypeBitmap;
use crate::base::cmp::CanonicalOrd;
use crate::base::iana::{Nsec3HashAlgorithm, Rtype};
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    Compose, Composer, FormError, Parse, ParseError, Parser, ShortBuf,
};
use crate::utils::{base16, base32};
use bytes::Bytes;
use core::cmp::Ordering;
use core::{fmt, hash, str};
use std::vec::Vec;

//------------ Nsec3 ---------------------------------------------------------

/// NSEC3 record data.
///
/// The record consists of the parameters of the hash function used for
/// the zone (algorithm, flags, iteration count, and salt), the hashed
/// next owner name in hash order, and the bitmap of the record types
/// present at the record's actual owner name.
#[derive(Clone)]
pub struct Nsec3<Octs> {
    hash_algorithm: Nsec3HashAlgorithm,
    flags: u8,
    iterations: u16,
    salt: Nsec3Salt<Octs>,
    next_owner: OwnerHash<Octs>,
    types: RtypeBitmap<Octs>,
}

impl<Octs> Nsec3<Octs> {
    /// Creates new NSEC3 record data from its components.
    pub fn new(
        hash_algorithm: Nsec3HashAlgorithm,
        flags: u8,
        iterations: u16,
        salt: Nsec3Salt<Octs>,
        next_owner: OwnerHash<Octs>,
        types: RtypeBitmap<Octs>,
    ) -> Self {
        Nsec3 {
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_owner,
            types,
        }
    }

    /// Returns the hash algorithm of the record.
    pub fn hash_algorithm(&self) -> Nsec3HashAlgorithm {
        self.hash_algorithm
    }

    /// Returns the flags field of the record.
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Returns whether the opt-out flag is set.
    pub fn opt_out(&self) -> bool {
        self.flags & 0x01 != 0
    }

    /// Returns the number of hash iterations.
    pub fn iterations(&self) -> u16 {
        self.iterations
    }

    /// Returns a reference to the salt.
    pub fn salt(&self) -> &Nsec3Salt<Octs> {
        &self.salt
    }

    /// Returns a reference to the next hashed owner name.
    pub fn next_owner(&self) -> &OwnerHash<Octs> {
        &self.next_owner
    }

    /// Returns a reference to the record type bitmap.
    pub fn types(&self) -> &RtypeBitmap<Octs> {
        &self.types
    }
}

impl Nsec3<Bytes> {
    /// Parses NSEC3 record data from the beginning of a parser.
    ///
    /// The parser must be limited to the length of the record data. The
    /// salt and hash length octets are checked against that length, so a
    /// lying length octet fails here rather than reading into the data of
    /// the next record.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        let hash_algorithm = Nsec3HashAlgorithm::parse(parser)?;
        let flags = u8::parse(parser)?;
        let iterations = u16::parse(parser)?;
        let salt = Nsec3Salt::parse(parser)?;
        let next_owner = OwnerHash::parse(parser)?;
        let types = RtypeBitmap::parse(parser)?;
        Ok(Self::new(
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_owner,
            types,
        ))
    }
}

//--- PartialEq and Eq

impl<Octs, Other> PartialEq<Nsec3<Other>> for Nsec3<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn eq(&self, other: &Nsec3<Other>) -> bool {
        self.hash_algorithm == other.hash_algorithm
            && self.flags == other.flags
            && self.iterations == other.iterations
            && self.salt == other.salt
            && self.next_owner == other.next_owner
            && self.types == other.types
    }
}

impl<Octs: AsRef<[u8]>> Eq for Nsec3<Octs> {}

//--- PartialOrd, CanonicalOrd, and Ord

impl<Octs, Other> PartialOrd<Nsec3<Other>> for Nsec3<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn partial_cmp(&self, other: &Nsec3<Other>) -> Option<Ordering> {
        match self.hash_algorithm.partial_cmp(&other.hash_algorithm) {
            Some(Ordering::Equal) => {}
            other => return other,
        }
        match self.flags.partial_cmp(&other.flags) {
            Some(Ordering::Equal) => {}
            other => return other,
        }
        match self.iterations.partial_cmp(&other.iterations) {
            Some(Ordering::Equal) => {}
            other => return other,
        }
        match self.salt.partial_cmp(&other.salt) {
            Some(Ordering::Equal) => {}
            other => return other,
        }
        match self.next_owner.partial_cmp(&other.next_owner) {
            Some(Ordering::Equal) => {}
            other => return other,
        }
        self.types.partial_cmp(&other.types)
    }
}

impl<Octs, Other> CanonicalOrd<Nsec3<Other>> for Nsec3<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn canonical_cmp(&self, other: &Nsec3<Other>) -> Ordering {
        match self.hash_algorithm.cmp(&other.hash_algorithm) {
            Ordering::Equal => {}
            other => return other,
        }
        match self.flags.cmp(&other.flags) {
            Ordering::Equal => {}
            other => return other,
        }
        match self.iterations.cmp(&other.iterations) {
            Ordering::Equal => {}
            other => return other,
        }
        match self.salt.canonical_cmp(&other.salt) {
            Ordering::Equal => {}
            other => return other,
        }
        match self.next_owner.canonical_cmp(&other.next_owner) {
            Ordering::Equal => {}
            other => return other,
        }
        self.types.canonical_cmp(&other.types)
    }
}

impl<Octs: AsRef<[u8]>> Ord for Nsec3<Octs> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_cmp(other)
    }
}

//--- Hash

impl<Octs: AsRef<[u8]>> hash::Hash for Nsec3<Octs> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.hash_algorithm.hash(state);
        self.flags.hash(state);
        self.iterations.hash(state);
        self.salt.hash(state);
        self.next_owner.hash(state);
        self.types.hash(state);
    }
}

//--- RecordData, ParseRecordData, and ComposeRecordData

impl<Octs> RecordData for Nsec3<Octs> {
    fn rtype(&self) -> Rtype {
        Rtype::NSEC3
    }
}

impl<'a> ParseRecordData<'a> for Nsec3<Bytes> {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::NSEC3 {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl<Octs: AsRef<[u8]>> ComposeRecordData for Nsec3<Octs> {
    fn rdlen(&self, _compress: bool) -> Option<u16> {
        Some(
            u16::checked_add(
                Nsec3HashAlgorithm::COMPOSE_LEN
                    + u8::COMPOSE_LEN
                    + u16::COMPOSE_LEN,
                self.salt.compose_len(),
            )
            .expect("long NSEC3")
            .checked_add(self.next_owner.compose_len())
            .expect("long NSEC3")
            .checked_add(self.types.compose_len())
            .expect("long NSEC3"),
        )
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        self.hash_algorithm.compose(target)?;
        self.flags.compose(target)?;
        self.iterations.compose(target)?;
        self.salt.compose(target)?;
        self.next_owner.compose(target)?;
        self.types.compose(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        self.compose_rdata(target)
    }
}

//--- Display and Debug

impl<Octs: AsRef<[u8]>> fmt::Display for Nsec3<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} ",
            self.hash_algorithm, self.flags, self.iterations, self.salt
        )?;
        base32::display_hex(&self.next_owner, f)?;
        write!(f, " {}", self.types)
    }
}

impl<Octs: AsRef<[u8]>> fmt::Debug for Nsec3<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Nsec3")
            .field("hash_algorithm", &self.hash_algorithm)
            .field("flags", &self.flags)
            .field("iterations", &self.iterations)
            .field("salt", &self.salt)
            .field("next_owner", &self.next_owner)
            .field("types", &self.types)
            .finish()
    }
}

//------------ Nsec3param ----------------------------------------------------

/// NSEC3PARAM record data.
///
/// This record carries the hashing parameters a zone uses for its NSEC3
/// records so that validating resolvers can compute hashes themselves. It
/// shares everything except the hashed name and the bitmap with [`Nsec3`].
#[derive(Clone)]
pub struct Nsec3param<Octs> {
    hash_algorithm: Nsec3HashAlgorithm,
    flags: u8,
    iterations: u16,
    salt: Nsec3Salt<Octs>,
}

impl<Octs> Nsec3param<Octs> {
    /// Creates new NSEC3PARAM record data from its components.
    pub fn new(
        hash_algorithm: Nsec3HashAlgorithm,
        flags: u8,
        iterations: u16,
        salt: Nsec3Salt<Octs>,
    ) -> Self {
        Nsec3param {
            hash_algorithm,
            flags,
            iterations,
            salt,
        }
    }

    /// Returns the hash algorithm of the record.
    pub fn hash_algorithm(&self) -> Nsec3HashAlgorithm {
        self.hash_algorithm
    }

    /// Returns the flags field of the record.
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Returns the number of hash iterations.
    pub fn iterations(&self) -> u16 {
        self.iterations
    }

    /// Returns a reference to the salt.
    pub fn salt(&self) -> &Nsec3Salt<Octs> {
        &self.salt
    }
}

impl Nsec3param<Bytes> {
    /// Parses NSEC3PARAM record data from the beginning of a parser.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        Ok(Self::new(
            Nsec3HashAlgorithm::parse(parser)?,
            u8::parse(parser)?,
            u16::parse(parser)?,
            Nsec3Salt::parse(parser)?,
        ))
    }
}

//--- PartialEq and Eq

impl<Octs, Other> PartialEq<Nsec3param<Other>> for Nsec3param<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn eq(&self, other: &Nsec3param<Other>) -> bool {
        self.hash_algorithm == other.hash_algorithm
            && self.flags == other.flags
            && self.iterations == other.iterations
            && self.salt == other.salt
    }
}

impl<Octs: AsRef<[u8]>> Eq for Nsec3param<Octs> {}

//--- PartialOrd, CanonicalOrd, and Ord

impl<Octs, Other> PartialOrd<Nsec3param<Other>> for Nsec3param<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn partial_cmp(&self, other: &Nsec3param<Other>) -> Option<Ordering> {
        match self.hash_algorithm.partial_cmp(&other.hash_algorithm) {
            Some(Ordering::Equal) => {}
            other => return other,
        }
        match self.flags.partial_cmp(&other.flags) {
            Some(Ordering::Equal) => {}
            other => return other,
        }
        match self.iterations.partial_cmp(&other.iterations) {
            Some(Ordering::Equal) => {}
            other => return other,
        }
        self.salt.partial_cmp(&other.salt)
    }
}

impl<Octs, Other> CanonicalOrd<Nsec3param<Other>> for Nsec3param<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn canonical_cmp(&self, other: &Nsec3param<Other>) -> Ordering {
        match self.hash_algorithm.cmp(&other.hash_algorithm) {
            Ordering::Equal => {}
            other => return other,
        }
        match self.flags.cmp(&other.flags) {
            Ordering::Equal => {}
            other => return other,
        }
        match self.iterations.cmp(&other.iterations) {
            Ordering::Equal => {}
            other => return other,
        }
        self.salt.canonical_cmp(&other.salt)
    }
}

impl<Octs: AsRef<[u8]>> Ord for Nsec3param<Octs> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_cmp(other)
    }
}

//--- Hash

impl<Octs: AsRef<[u8]>> hash::Hash for Nsec3param<Octs> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.hash_algorithm.hash(state);
        self.flags.hash(state);
        self.iterations.hash(state);
        self.salt.hash(state);
    }
}

//--- RecordData, ParseRecordData, and ComposeRecordData

impl<Octs> RecordData for Nsec3param<Octs> {
    fn rtype(&self) -> Rtype {
        Rtype::NSEC3PARAM
    }
}

impl<'a> ParseRecordData<'a> for Nsec3param<Bytes> {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::NSEC3PARAM {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl<Octs: AsRef<[u8]>> ComposeRecordData for Nsec3param<Octs> {
    fn rdlen(&self, _compress: bool) -> Option<u16> {
        Some(
            u16::checked_add(
                Nsec3HashAlgorithm::COMPOSE_LEN
                    + u8::COMPOSE_LEN
                    + u16::COMPOSE_LEN,
                self.salt.compose_len(),
            )
            .expect("long NSEC3PARAM"),
        )
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        self.hash_algorithm.compose(target)?;
        self.flags.compose(target)?;
        self.iterations.compose(target)?;
        self.salt.compose(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        self.compose_rdata(target)
    }
}

//--- Display and Debug

impl<Octs: AsRef<[u8]>> fmt::Display for Nsec3param<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.hash_algorithm, self.flags, self.iterations, self.salt
        )
    }
}

impl<Octs: AsRef<[u8]>> fmt::Debug for Nsec3param<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Nsec3param")
            .field("hash_algorithm", &self.hash_algorithm)
            .field("flags", &self.flags)
            .field("iterations", &self.iterations)
            .field("salt", &self.salt)
            .finish()
    }
}

//------------ Nsec3Salt -----------------------------------------------------

/// The salt value of an NSEC3 record.
///
/// The salt is opaque binary data. It can never be longer than 255 octets
/// since its length is encoded as a single octet, and it may be empty. An
/// empty salt is still a value of its own: its length octet is written to
/// the wire as zero, never left out, and the salt round-trips through the
/// wire format octet for octet.
///
/// The salt uses base16 (i.e., hex digits) as its presentation format,
/// with `-` denoting an empty salt.
#[derive(Clone)]
pub struct Nsec3Salt<Octs: ?Sized>(Octs);

impl Nsec3Salt<()> {
    /// The salt has a maximum length of 255 octets.
    pub const MAX_LEN: usize = 255;
}

impl<Octs> Nsec3Salt<Octs> {
    /// Creates an empty salt value.
    pub fn empty() -> Self
    where
        Octs: From<&'static [u8]>,
    {
        Self(b"".as_ref().into())
    }

    /// Creates a new salt value from the given octets.
    ///
    /// Returns successfully if `octets` is no longer than 255 octets.
    pub fn from_octets(octets: Octs) -> Result<Self, Nsec3SaltError>
    where
        Octs: AsRef<[u8]>,
    {
        if octets.as_ref().len() > Nsec3Salt::MAX_LEN {
            Err(Nsec3SaltError(()))
        } else {
            Ok(Self(octets))
        }
    }

    /// Converts the salt value into the underlying octets.
    pub fn into_octets(self) -> Octs {
        self.0
    }

    /// Returns the length of the salt itself.
    fn salt_len(&self) -> u8
    where
        Octs: AsRef<[u8]>,
    {
        self.0.as_ref().len().try_into().expect("long salt")
    }

    /// Returns the length of the wire representation.
    ///
    /// This includes the length octet.
    pub fn compose_len(&self) -> u16
    where
        Octs: AsRef<[u8]>,
    {
        u16::from(self.salt_len()) + 1
    }

    /// Appends the wire representation to a target.
    ///
    /// An empty salt writes its zero length octet.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf>
    where
        Octs: AsRef<[u8]>,
    {
        self.salt_len().compose(target)?;
        target.append_slice(self.0.as_ref())
    }
}

impl<Octs: AsRef<[u8]> + ?Sized> Nsec3Salt<Octs> {
    /// Returns a reference to a slice of the salt.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Nsec3Salt<Bytes> {
    /// Parses a salt from the beginning of a parser.
    ///
    /// An empty salt on the wire produces an empty -- not absent -- value.
    /// A length octet pointing past the end of the record data is a form
    /// error.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        let len = parser.parse_u8()? as usize;
        if len > parser.remaining() {
            return Err(FormError::new("short NSEC3 salt").into());
        }
        Ok(Self(parser.parse_octets(len).expect("checked length")))
    }
}

//--- FromStr

impl<Octs> str::FromStr for Nsec3Salt<Octs>
where
    Octs: From<Vec<u8>> + AsRef<[u8]>,
{
    type Err = base16::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self(Vec::new().into()))
        } else {
            base16::decode(s).map(|octets| Self(Octs::from(octets)))
        }
    }
}

//--- AsRef

impl<Octs: AsRef<[u8]> + ?Sized> AsRef<[u8]> for Nsec3Salt<Octs> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

//--- PartialEq and Eq

impl<T, U> PartialEq<Nsec3Salt<U>> for Nsec3Salt<T>
where
    T: AsRef<[u8]> + ?Sized,
    U: AsRef<[u8]> + ?Sized,
{
    fn eq(&self, other: &Nsec3Salt<U>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: AsRef<[u8]> + ?Sized> Eq for Nsec3Salt<T> {}

//--- PartialOrd, CanonicalOrd, and Ord

impl<T, U> PartialOrd<Nsec3Salt<U>> for Nsec3Salt<T>
where
    T: AsRef<[u8]> + ?Sized,
    U: AsRef<[u8]> + ?Sized,
{
    fn partial_cmp(&self, other: &Nsec3Salt<U>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: AsRef<[u8]> + ?Sized> Ord for Nsec3Salt<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T, U> CanonicalOrd<Nsec3Salt<U>> for Nsec3Salt<T>
where
    T: AsRef<[u8]> + ?Sized,
    U: AsRef<[u8]> + ?Sized,
{
    fn canonical_cmp(&self, other: &Nsec3Salt<U>) -> Ordering {
        match self.as_slice().len().cmp(&other.as_slice().len()) {
            Ordering::Equal => {}
            other => return other,
        }
        self.as_slice().cmp(other.as_slice())
    }
}

//--- Hash

impl<T: AsRef<[u8]> + ?Sized> hash::Hash for Nsec3Salt<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.as_ref().hash(state)
    }
}

//--- Display and Debug

impl<Octs: AsRef<[u8]> + ?Sized> fmt::Display for Nsec3Salt<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.as_slice().is_empty() {
            f.write_str("-")
        } else {
            base16::display(self.as_slice(), f)
        }
    }
}

impl<Octs: AsRef<[u8]> + ?Sized> fmt::Debug for Nsec3Salt<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Nsec3Salt")
            .field(&format_args!("{}", self))
            .finish()
    }
}

//------------ OwnerHash -----------------------------------------------------

/// The hash over the next owner name.
///
/// This hash is used instead of the actual owner name in an NSEC3 record.
/// It can never be longer than 255 octets since its length is encoded as
/// a single octet.
///
/// For its presentation format, the hash uses an unpadded base32hex
/// encoding, which is case-insensitive. To give the hash a canonical form
/// for comparisons, parsing maps every octet that is an ASCII base32hex
/// letter to its upper case form. This happens at decode time only:
/// composing writes the stored octets verbatim, whatever their case.
#[derive(Clone)]
pub struct OwnerHash<Octs: ?Sized>(Octs);

impl OwnerHash<()> {
    /// The hash has a maximum length of 255 octets.
    pub const MAX_LEN: usize = 255;
}

impl<Octs> OwnerHash<Octs> {
    /// Creates a new owner hash from the given octets.
    ///
    /// Returns successfully if `octets` is no longer than 255 octets.
    pub fn from_octets(octets: Octs) -> Result<Self, OwnerHashError>
    where
        Octs: AsRef<[u8]>,
    {
        if octets.as_ref().len() > OwnerHash::MAX_LEN {
            Err(OwnerHashError(()))
        } else {
            Ok(Self(octets))
        }
    }

    /// Converts the hash value into the underlying octets.
    pub fn into_octets(self) -> Octs {
        self.0
    }

    /// Returns the length of the hash itself.
    fn hash_len(&self) -> u8
    where
        Octs: AsRef<[u8]>,
    {
        self.0.as_ref().len().try_into().expect("long hash")
    }

    /// Returns the length of the wire representation.
    ///
    /// This includes the length octet.
    pub fn compose_len(&self) -> u16
    where
        Octs: AsRef<[u8]>,
    {
        u16::from(self.hash_len()) + 1
    }

    /// Appends the wire representation to a target.
    ///
    /// The stored octets are written verbatim; no case normalization
    /// happens here.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf>
    where
        Octs: AsRef<[u8]>,
    {
        self.hash_len().compose(target)?;
        target.append_slice(self.0.as_ref())
    }
}

impl<Octs: AsRef<[u8]> + ?Sized> OwnerHash<Octs> {
    /// Returns a reference to a slice of the hash.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl OwnerHash<Bytes> {
    /// Parses an owner hash from the beginning of a parser.
    ///
    /// Every parsed octet that is an ASCII base32hex letter is mapped to
    /// its upper case form so that logically equal hashes compare equal
    /// after decoding. A length octet pointing past the end of the record
    /// data is a form error.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        let len = parser.parse_u8()? as usize;
        if len > parser.remaining() {
            return Err(FormError::new("short NSEC3 owner hash").into());
        }
        let mut octets =
            parser.parse_octets(len).expect("checked length").to_vec();
        for ch in &mut octets {
            if matches!(*ch, b'a'..=b'v') {
                *ch = ch.to_ascii_uppercase()
            }
        }
        Ok(Self(Bytes::from(octets)))
    }
}

//--- FromStr

impl<Octs> str::FromStr for OwnerHash<Octs>
where
    Octs: From<Vec<u8>> + AsRef<[u8]>,
{
    type Err = base32::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        base32::decode_hex(s).map(|octets| Self(Octs::from(octets)))
    }
}

//--- AsRef

impl<Octs: AsRef<[u8]> + ?Sized> AsRef<[u8]> for OwnerHash<Octs> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

//--- PartialEq and Eq

impl<T, U> PartialEq<OwnerHash<U>> for OwnerHash<T>
where
    T: AsRef<[u8]> + ?Sized,
    U: AsRef<[u8]> + ?Sized,
{
    fn eq(&self, other: &OwnerHash<U>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: AsRef<[u8]> + ?Sized> Eq for OwnerHash<T> {}

//--- PartialOrd, CanonicalOrd, and Ord

impl<T, U> PartialOrd<OwnerHash<U>> for OwnerHash<T>
where
    T: AsRef<[u8]> + ?Sized,
    U: AsRef<[u8]> + ?Sized,
{
    fn partial_cmp(&self, other: &OwnerHash<U>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: AsRef<[u8]> + ?Sized> Ord for OwnerHash<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T, U> CanonicalOrd<OwnerHash<U>> for OwnerHash<T>
where
    T: AsRef<[u8]> + ?Sized,
    U: AsRef<[u8]> + ?Sized,
{
    fn canonical_cmp(&self, other: &OwnerHash<U>) -> Ordering {
        match self.as_slice().len().cmp(&other.as_slice().len()) {
            Ordering::Equal => {}
            other => return other,
        }
        self.as_slice().cmp(other.as_slice())
    }
}

//--- Hash

impl<T: AsRef<[u8]> + ?Sized> hash::Hash for OwnerHash<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.as_ref().hash(state)
    }
}

//--- Display and Debug

impl<Octs: AsRef<[u8]> + ?Sized> fmt::Display for OwnerHash<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        base32::display_hex(self.as_slice(), f)
    }
}

impl<Octs: AsRef<[u8]> + ?Sized> fmt::Debug for OwnerHash<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("OwnerHash")
            .field(&format_args!("{}", self))
            .finish()
    }
}

//============ Error Types ===================================================

//------------ Nsec3SaltError ------------------------------------------------

/// A byte sequence does not represent a valid NSEC3 salt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Nsec3SaltError(());

impl fmt::Display for Nsec3SaltError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal NSEC3 salt")
    }
}

impl std::error::Error for Nsec3SaltError {}

//------------ OwnerHashError ------------------------------------------------

/// A byte sequence does not represent a valid owner hash.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OwnerHashError(());

impl fmt::Display for OwnerHashError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal owner name hash")
    }
}

impl std::error::Error for OwnerHashError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    fn test_nsec3() -> Nsec3<Bytes> {
        let mut types = RtypeBitmap::<Bytes>::builder();
        types.add(Rtype::A);
        types.add(Rtype::RRSIG);
        Nsec3::new(
            Nsec3HashAlgorithm::SHA1,
            1,
            12,
            Nsec3Salt::from_str("aabbccdd").unwrap(),
            OwnerHash::from_octets(Bytes::from_static(
                b"K8UDEMVP1J2F7EG6JEBPS17VP3N8I58H",
            ))
            .unwrap(),
            types.finalize(),
        )
    }

    fn compose_rdata(data: &Nsec3<Bytes>) -> Vec<u8> {
        let mut buf = Vec::new();
        data.compose_rdata(&mut buf).unwrap();
        assert_eq!(buf.len(), usize::from(data.rdlen(false).unwrap()));
        buf
    }

    fn parse_rdata(buf: &[u8]) -> Result<Nsec3<Bytes>, ParseError> {
        let mut parser = Parser::from_ref(buf);
        let res = Nsec3::parse(&mut parser)?;
        assert_eq!(parser.remaining(), 0);
        Ok(res)
    }

    #[test]
    fn compose_and_parse() {
        let data = test_nsec3();
        let buf = compose_rdata(&data);
        assert_eq!(
            &buf[..9],
            b"\x01\x01\0\x0c\x04\xaa\xbb\xcc\xdd"
        );
        assert_eq!(buf[9], 32);
        let parsed = parse_rdata(&buf).unwrap();
        assert_eq!(parsed, data);
        assert!(parsed.types().contains(Rtype::RRSIG));
        assert!(!parsed.opt_out());
    }

    #[test]
    fn empty_salt_keeps_length_octet() {
        let mut data = test_nsec3();
        data.salt = Nsec3Salt::from_str("-").unwrap();
        let buf = compose_rdata(&data);

        // Algorithm, flags, iterations, then a single zero length octet.
        assert_eq!(&buf[..5], b"\x01\x01\0\x0c\0");

        let parsed = parse_rdata(&buf).unwrap();
        assert!(parsed.salt().as_slice().is_empty());
        assert_eq!(parsed, data);
    }

    #[test]
    fn owner_hash_case_normalized_on_parse_only() {
        let mut data = test_nsec3();
        data.next_owner = OwnerHash::from_octets(Bytes::from_static(
            b"k8udemvp1j2f7eg6jebps17vp3n8i58h",
        ))
        .unwrap();
        let buf = compose_rdata(&data);

        // Composing writes the lower case octets verbatim.
        assert_eq!(&buf[10..42], b"k8udemvp1j2f7eg6jebps17vp3n8i58h");

        // Parsing maps base32hex letters to upper case.
        let parsed = parse_rdata(&buf).unwrap();
        assert_eq!(
            parsed.next_owner().as_slice(),
            b"K8UDEMVP1J2F7EG6JEBPS17VP3N8I58H"
        );
    }

    #[test]
    fn lying_length_octets() {
        // Salt length pointing past the end of the record data.
        assert_eq!(
            parse_rdata(b"\x01\x01\0\x0c\x04\xaa\xbb"),
            Err(ParseError::Form(FormError::new("short NSEC3 salt")))
        );

        // Hash length pointing past the end of the record data.
        assert_eq!(
            parse_rdata(b"\x01\x01\0\x0c\0\x20\xab\xcd"),
            Err(ParseError::Form(FormError::new(
                "short NSEC3 owner hash"
            )))
        );
    }

    #[test]
    fn broken_bitmap() {
        // Window with length zero.
        assert!(parse_rdata(b"\x01\x01\0\x0c\0\x01\xab\0\0").is_err());
        // Window with length 33.
        let mut buf = b"\x01\x01\0\x0c\0\x01\xab\0\x21".to_vec();
        buf.extend_from_slice(&[0u8; 33]);
        assert!(parse_rdata(&buf).is_err());
    }

    #[test]
    fn salt_from_str() {
        let salt: Nsec3Salt<Bytes> = Nsec3Salt::from_str("aabbccdd").unwrap();
        assert_eq!(salt.as_slice(), b"\xaa\xbb\xcc\xdd");
        assert_eq!(format!("{}", salt), "AABBCCDD");

        let salt: Nsec3Salt<Bytes> = Nsec3Salt::from_str("-").unwrap();
        assert!(salt.as_slice().is_empty());
        assert_eq!(format!("{}", salt), "-");

        assert!(Nsec3Salt::<Bytes>::from_str("aabbcc0x").is_err());
    }

    #[test]
    fn owner_hash_from_str() {
        let lower: OwnerHash<Bytes> =
            OwnerHash::from_str("k8udemvp1j2f7eg6jebps17vp3n8i58h").unwrap();
        let upper: OwnerHash<Bytes> =
            OwnerHash::from_str("K8UDEMVP1J2F7EG6JEBPS17VP3N8I58H").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(
            format!("{}", lower),
            "K8UDEMVP1J2F7EG6JEBPS17VP3N8I58H"
        );
    }

    #[test]
    fn nsec3param_round_trip() {
        let data = Nsec3param::new(
            Nsec3HashAlgorithm::SHA1,
            0,
            10,
            Nsec3Salt::from_octets(Bytes::from_static(b"\x12\x34")).unwrap(),
        );
        let mut buf = Vec::new();
        data.compose_rdata(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), b"\x01\0\0\x0a\x02\x12\x34");
        let mut parser = Parser::from_ref(buf.as_slice());
        let parsed = Nsec3param::parse(&mut parser).unwrap();
        assert_eq!(parser.remaining(), 0);
        assert_eq!(parsed, data);
    }
}
