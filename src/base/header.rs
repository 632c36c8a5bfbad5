//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section
//! containing some general information related to the message as well as
//! the number of records in each of the four sections that follow the
//! header. Its content and format are defined in section 4.1.1 of
//! [RFC 1035].
//!
//! In order to reflect the fact that changing the section counts may
//! invalidate the rest of the message whereas the other elements of the
//! header section can safely be modified, the whole header has been split
//! into two separate types: [`Header`] contains the safely modifiable part
//! at the beginning and [`HeaderCounts`] contains the section counts. In
//! addition, the [`HeaderSection`] type wraps both of them into a single
//! type.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::iana::{Opcode, Rcode};
use core::{fmt, mem};

//------------ Header --------------------------------------------------------

/// The first part of the header of a DNS message.
///
/// This type represents the information contained in the first four octets
/// of the header: the message ID, opcode, rcode, and the various flags. It
/// keeps those four octets in wire representation, i.e., in network byte
/// order. The data is laid out like this:
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|Z |AD|CD|   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// You can create owned values via the [`new`][Self::new] method or the
/// `Default` trait. However, more often the type will be used via a
/// reference into the octets of an actual message. The functions
/// [`for_message_slice`][Self::for_message_slice] and
/// [`for_message_slice_mut`][Self::for_message_slice_mut] create such
/// references from an octets slice.
///
/// The basic structure and most of the fields are defined in [RFC 1035],
/// except for the AD and CD flags, which are defined in [RFC 4035].
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
/// [RFC 4035]: https://tools.ietf.org/html/rfc4035
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(transparent)]
pub struct Header {
    /// The actual header in its wire format representation.
    inner: [u8; 4],
}

/// # Creation and Conversion
///
impl Header {
    /// Creates a new header.
    ///
    /// The new header has all fields as either zero or false. Thus, the
    /// opcode will be [`Opcode::QUERY`] and the response code will be
    /// [`Rcode::NOERROR`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header reference from an octets slice of a message.
    ///
    /// # Panics
    ///
    /// This function panics if the slice is less than four octets long.
    #[must_use]
    pub fn for_message_slice(s: &[u8]) -> &Header {
        assert!(s.len() >= mem::size_of::<Header>());
        unsafe { &*(s.as_ptr() as *const Header) }
    }

    /// Creates a mutable header reference from a message slice.
    ///
    /// # Panics
    ///
    /// This function panics if the slice is less than four octets long.
    pub fn for_message_slice_mut(s: &mut [u8]) -> &mut Header {
        assert!(s.len() >= mem::size_of::<Header>());
        unsafe { &mut *(s.as_mut_ptr() as *mut Header) }
    }

    /// Returns a reference to the underlying octets slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }
}

/// # Field Access
///
impl Header {
    /// Returns the value of the ID field.
    ///
    /// The ID field is an identifier chosen by whoever created a query
    /// and is copied into a response by a server. It allows matching
    /// incoming responses to their queries.
    ///
    /// When choosing an ID for an outgoing message, make sure it is random
    /// to avoid spoofing through guessing the message ID. The method
    /// [`set_random_id`][Self::set_random_id] can be used for this purpose.
    #[must_use]
    pub fn id(self) -> u16 {
        u16::from_be_bytes(self.inner[..2].try_into().expect("two octets"))
    }

    /// Sets the value of the ID field.
    pub fn set_id(&mut self, value: u16) {
        self.inner[..2].copy_from_slice(&value.to_be_bytes())
    }

    /// Sets the value of the ID field to a randomly chosen number.
    pub fn set_random_id(&mut self) {
        self.set_id(::rand::random())
    }

    /// Returns whether the QR bit is set.
    ///
    /// The *query response* bit specifies whether a message is a query
    /// (`false`) or a response (`true`).
    #[must_use]
    pub fn qr(self) -> bool {
        self.get_bit(2, 7)
    }

    /// Sets the value of the QR bit.
    pub fn set_qr(&mut self, set: bool) {
        self.set_bit(2, 7, set)
    }

    /// Returns the value of the Opcode field.
    ///
    /// This field specifies the kind of query a message contains. See
    /// the [`Opcode`] type for more information on the possible values and
    /// their meaning. Normal queries have the variant [`Opcode::QUERY`]
    /// which is also the default value when creating a new header.
    #[must_use]
    pub fn opcode(self) -> Opcode {
        Opcode::from_int((self.inner[2] >> 3) & 0x0F)
    }

    /// Sets the value of the opcode field.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.inner[2] = self.inner[2] & 0x87 | (opcode.to_int() << 3);
    }

    /// Returns all flags contained in the header.
    ///
    /// This is a virtual field composed of all the flag bits that are
    /// present in the header. The returned [`Flags`] type can be useful
    /// when you are working with all flags rather than a single one.
    #[must_use]
    pub fn flags(self) -> Flags {
        Flags {
            qr: self.qr(),
            aa: self.aa(),
            tc: self.tc(),
            rd: self.rd(),
            ra: self.ra(),
            ad: self.ad(),
            cd: self.cd(),
        }
    }

    /// Sets all flag bits.
    pub fn set_flags(&mut self, flags: Flags) {
        self.set_qr(flags.qr);
        self.set_aa(flags.aa);
        self.set_tc(flags.tc);
        self.set_rd(flags.rd);
        self.set_ra(flags.ra);
        self.set_ad(flags.ad);
        self.set_cd(flags.cd);
    }

    /// Returns whether the AA bit is set.
    ///
    /// Using this *authoritative answer* bit, a name server generating a
    /// response states whether it is authoritative for the requested
    /// domain name. The field has no meaning in a query.
    #[must_use]
    pub fn aa(self) -> bool {
        self.get_bit(2, 2)
    }

    /// Sets the value of the AA bit.
    pub fn set_aa(&mut self, set: bool) {
        self.set_bit(2, 2, set)
    }

    /// Returns whether the TC bit is set.
    ///
    /// The *truncation* bit is set if the message was longer than the
    /// transport allowed and had to be cut short.
    #[must_use]
    pub fn tc(self) -> bool {
        self.get_bit(2, 1)
    }

    /// Sets the value of the TC bit.
    pub fn set_tc(&mut self, set: bool) {
        self.set_bit(2, 1, set)
    }

    /// Returns whether the RD bit is set.
    ///
    /// The *recursion desired* bit may be set in a query to ask the server
    /// to pursue the query recursively.
    #[must_use]
    pub fn rd(self) -> bool {
        self.get_bit(2, 0)
    }

    /// Sets the value of the RD bit.
    pub fn set_rd(&mut self, set: bool) {
        self.set_bit(2, 0, set)
    }

    /// Returns whether the RA bit is set.
    ///
    /// In a response, the *recursion available* bit denotes whether the
    /// responding name server supports recursion.
    #[must_use]
    pub fn ra(self) -> bool {
        self.get_bit(3, 7)
    }

    /// Sets the value of the RA bit.
    pub fn set_ra(&mut self, set: bool) {
        self.set_bit(3, 7, set)
    }

    /// Returns whether the reserved bit is set.
    ///
    /// This bit must be `false` in all queries and responses.
    #[must_use]
    pub fn z(self) -> bool {
        self.get_bit(3, 6)
    }

    /// Sets the value of the reserved bit.
    pub fn set_z(&mut self, set: bool) {
        self.set_bit(3, 6, set)
    }

    /// Returns whether the AD bit is set.
    ///
    /// The *authentic data* bit is used by security-aware servers to
    /// indicate that the data in a response was authenticated.
    #[must_use]
    pub fn ad(self) -> bool {
        self.get_bit(3, 5)
    }

    /// Sets the value of the AD bit.
    pub fn set_ad(&mut self, set: bool) {
        self.set_bit(3, 5, set)
    }

    /// Returns whether the CD bit is set.
    ///
    /// The *checking disabled* bit asks a security-aware server to not
    /// perform DNSSEC validation.
    #[must_use]
    pub fn cd(self) -> bool {
        self.get_bit(3, 4)
    }

    /// Sets the value of the CD bit.
    pub fn set_cd(&mut self, set: bool) {
        self.set_bit(3, 4, set)
    }

    /// Returns the value of the RCODE field.
    ///
    /// The *response code* is used in a response to indicate what happened
    /// when processing the query. See the [`Rcode`] type for information
    /// on possible values and their meaning.
    #[must_use]
    pub fn rcode(self) -> Rcode {
        Rcode::from_int(self.inner[3] & 0x0F)
    }

    /// Sets the value of the RCODE field.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.inner[3] = self.inner[3] & 0xF0 | (rcode.to_int() & 0x0F);
    }

    //--- Internal helpers

    /// Returns the value of the bit at the given position.
    ///
    /// The argument `offset` gives the octet offset into the header and
    /// `bit` gives the number of the bit with the most significant bit
    /// being 7.
    fn get_bit(self, offset: usize, bit: usize) -> bool {
        self.inner[offset] & (1 << bit) != 0
    }

    /// Sets or resets the given bit.
    fn set_bit(&mut self, offset: usize, bit: usize, set: bool) {
        if set {
            self.inner[offset] |= 1 << bit
        } else {
            self.inner[offset] &= !(1 << bit)
        }
    }
}

//------------ Flags ---------------------------------------------------------

/// The flags contained in the DNS message header.
///
/// This is a utility type that makes it easier to work with flags. It
/// contains only the flags that are part of [`Header`].
///
/// Each flag that is set is represented by a two-letter token in the text
/// notation, which is the uppercase version of the flag name. If multiple
/// flags are set, the tokens are separated by space.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Flags {
    /// The `QR` bit: is this message a response?
    pub qr: bool,

    /// The `AA` bit: is the answer authoritative?
    pub aa: bool,

    /// The `TC` bit: has the message been truncated?
    pub tc: bool,

    /// The `RD` bit: is recursion desired?
    pub rd: bool,

    /// The `RA` bit: is recursion available?
    pub ra: bool,

    /// The `AD` bit: is the contained data authentic?
    pub ad: bool,

    /// The `CD` bit: is DNSSEC checking disabled?
    pub cd: bool,
}

impl Flags {
    /// Creates new, empty flags.
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sep = "";
        for (flag, token) in [
            (self.qr, "QR"),
            (self.aa, "AA"),
            (self.tc, "TC"),
            (self.rd, "RD"),
            (self.ra, "RA"),
            (self.ad, "AD"),
            (self.cd, "CD"),
        ] {
            if flag {
                f.write_str(sep)?;
                f.write_str(token)?;
                sep = " ";
            }
        }
        Ok(())
    }
}

//------------ HeaderCounts --------------------------------------------------

/// The section count part of the header section of a DNS message.
///
/// This part consists of four 16 bit counters for the number of entries in
/// the four sections of a DNS message. The type contains the sequence of
/// these for values in wire representation, i.e., in network byte order.
///
/// The counters are accessed via methods named after the fields they are
/// traditionally called: `qdcount` for the number of questions, `ancount`
/// for the number of answer records, `nscount` for the number of authority
/// records, and `arcount` for the number of additional records.
///
/// Since the counters must always match the actual number of entries in
/// their section, the incrementing and decrementing methods used by the
/// message builder are checked: they fail on overflow rather than let the
/// header lie about the message.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(transparent)]
pub struct HeaderCounts {
    /// The actual counts in their wire format representation.
    inner: [u8; 8],
}

/// # Creation and Conversion
///
impl HeaderCounts {
    /// Creates a new value with all counters set to zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a counts reference from the octets slice of a message.
    ///
    /// The slice `message` must be the whole message, i.e., start with the
    /// bytes of the [`Header`].
    ///
    /// # Panics
    ///
    /// This function panics if the slice is shorter than the full header
    /// section.
    #[must_use]
    pub fn for_message_slice(message: &[u8]) -> &Self {
        assert!(message.len() >= mem::size_of::<HeaderSection>());
        unsafe {
            &*(message[mem::size_of::<Header>()..].as_ptr()
                as *const HeaderCounts)
        }
    }

    /// Creates a mutable counts reference from a message slice.
    ///
    /// The slice `message` must be the whole message, i.e., start with the
    /// bytes of the [`Header`].
    ///
    /// # Panics
    ///
    /// This function panics if the slice is shorter than the full header
    /// section.
    pub fn for_message_slice_mut(message: &mut [u8]) -> &mut Self {
        assert!(message.len() >= mem::size_of::<HeaderSection>());
        unsafe {
            &mut *(message[mem::size_of::<Header>()..].as_mut_ptr()
                as *mut HeaderCounts)
        }
    }

    /// Returns a reference to the underlying octets slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }
}

/// # Field Access
///
impl HeaderCounts {
    /// Returns the number of questions in the question section.
    #[must_use]
    pub fn qdcount(self) -> u16 {
        self.get_u16(0)
    }

    /// Sets the number of questions in the question section.
    pub fn set_qdcount(&mut self, value: u16) {
        self.set_u16(0, value)
    }

    /// Increases the number of questions by one.
    pub fn inc_qdcount(&mut self) -> Result<(), CountOverflow> {
        match self.qdcount().checked_add(1) {
            Some(count) => {
                self.set_qdcount(count);
                Ok(())
            }
            None => Err(CountOverflow(())),
        }
    }

    /// Returns the number of records in the answer section.
    #[must_use]
    pub fn ancount(self) -> u16 {
        self.get_u16(2)
    }

    /// Sets the number of records in the answer section.
    pub fn set_ancount(&mut self, value: u16) {
        self.set_u16(2, value)
    }

    /// Increases the number of records in the answer section by one.
    pub fn inc_ancount(&mut self) -> Result<(), CountOverflow> {
        match self.ancount().checked_add(1) {
            Some(count) => {
                self.set_ancount(count);
                Ok(())
            }
            None => Err(CountOverflow(())),
        }
    }

    /// Returns the number of records in the authority section.
    #[must_use]
    pub fn nscount(self) -> u16 {
        self.get_u16(4)
    }

    /// Sets the number of records in the authority section.
    pub fn set_nscount(&mut self, value: u16) {
        self.set_u16(4, value)
    }

    /// Increases the number of records in the authority section by one.
    pub fn inc_nscount(&mut self) -> Result<(), CountOverflow> {
        match self.nscount().checked_add(1) {
            Some(count) => {
                self.set_nscount(count);
                Ok(())
            }
            None => Err(CountOverflow(())),
        }
    }

    /// Returns the number of records in the additional section.
    #[must_use]
    pub fn arcount(self) -> u16 {
        self.get_u16(6)
    }

    /// Sets the number of records in the additional section.
    pub fn set_arcount(&mut self, value: u16) {
        self.set_u16(6, value)
    }

    /// Increases the number of records in the additional section by one.
    pub fn inc_arcount(&mut self) -> Result<(), CountOverflow> {
        match self.arcount().checked_add(1) {
            Some(count) => {
                self.set_arcount(count);
                Ok(())
            }
            None => Err(CountOverflow(())),
        }
    }

    //--- Internal helpers

    /// Returns the counter at the given octet offset.
    fn get_u16(self, offset: usize) -> u16 {
        u16::from_be_bytes(
            self.inner[offset..offset + 2]
                .try_into()
                .expect("two octets"),
        )
    }

    /// Sets the counter at the given octet offset.
    fn set_u16(&mut self, offset: usize, value: u16) {
        self.inner[offset..offset + 2].copy_from_slice(&value.to_be_bytes())
    }
}

//------------ HeaderSection -------------------------------------------------

/// The complete header section of a DNS message.
///
/// Consists of a [`Header`] directly followed by a [`HeaderCounts`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(transparent)]
pub struct HeaderSection {
    inner: [u8; 12],
}

/// # Creation and Conversion
///
impl HeaderSection {
    /// Creates a new header section with all fields set to zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reference from the octets slice of a message.
    ///
    /// # Panics
    ///
    /// This function panics if the slice is shorter than 12 octets.
    #[must_use]
    pub fn for_message_slice(s: &[u8]) -> &HeaderSection {
        assert!(s.len() >= mem::size_of::<HeaderSection>());
        unsafe { &*(s.as_ptr() as *const HeaderSection) }
    }

    /// Creates a mutable reference from the octets slice of a message.
    ///
    /// # Panics
    ///
    /// This function panics if the slice is shorter than 12 octets.
    pub fn for_message_slice_mut(s: &mut [u8]) -> &mut HeaderSection {
        assert!(s.len() >= mem::size_of::<HeaderSection>());
        unsafe { &mut *(s.as_mut_ptr() as *mut HeaderSection) }
    }

    /// Returns a reference to the underlying octets slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }
}

/// # Access to Header and Counts
///
impl HeaderSection {
    /// Returns a reference to the header.
    #[must_use]
    pub fn header(&self) -> &Header {
        Header::for_message_slice(&self.inner)
    }

    /// Returns a mutable reference to the header.
    pub fn header_mut(&mut self) -> &mut Header {
        Header::for_message_slice_mut(&mut self.inner)
    }

    /// Returns a reference to the header counts.
    #[must_use]
    pub fn counts(&self) -> &HeaderCounts {
        HeaderCounts::for_message_slice(&self.inner)
    }

    /// Returns a mutable reference to the header counts.
    pub fn counts_mut(&mut self) -> &mut HeaderCounts {
        HeaderCounts::for_message_slice_mut(&mut self.inner)
    }
}

//------------ CountOverflow -------------------------------------------------

/// An error happened while increasing a header count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CountOverflow(());

impl fmt::Display for CountOverflow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("section count overflow")
    }
}

impl std::error::Error for CountOverflow {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn for_message_slice() {
        let msg = [0u8; 12];
        assert_eq!(
            Header::for_message_slice(&msg).as_slice(),
            &[0u8; 4]
        );
        assert_eq!(
            HeaderCounts::for_message_slice(&msg).as_slice(),
            &[0u8; 8]
        );
        assert_eq!(
            HeaderSection::for_message_slice(&msg).as_slice(),
            &[0u8; 12]
        );
    }

    #[test]
    #[should_panic]
    fn short_header() {
        let _ = Header::for_message_slice(&[0u8; 2]);
    }

    #[test]
    fn header_fields() {
        let mut header = Header::new();
        header.set_id(0x1234);
        assert_eq!(header.id(), 0x1234);

        header.set_qr(true);
        header.set_opcode(Opcode::NOTIFY);
        header.set_rd(true);
        header.set_rcode(Rcode::REFUSED);
        assert!(header.qr());
        assert!(!header.aa());
        assert!(header.rd());
        assert_eq!(header.opcode(), Opcode::NOTIFY);
        assert_eq!(header.rcode(), Rcode::REFUSED);

        // NOTIFY is 4, REFUSED is 5.
        assert_eq!(header.as_slice(), b"\x12\x34\xa1\x05");

        header.set_qr(false);
        header.set_opcode(Opcode::QUERY);
        assert!(!header.qr());
        assert_eq!(header.opcode(), Opcode::QUERY);
        assert!(header.rd());
        assert_eq!(header.rcode(), Rcode::REFUSED);
    }

    #[test]
    fn flags() {
        let mut header = Header::new();
        header.set_flags(Flags {
            qr: true,
            aa: true,
            rd: true,
            ..Default::default()
        });
        assert!(header.qr() && header.aa() && header.rd());
        assert!(!header.tc() && !header.ra() && !header.ad() && !header.cd());
        assert_eq!(format!("{}", header.flags()), "QR AA RD");
    }

    #[test]
    fn counts() {
        let mut msg = [0u8; 12];
        {
            let counts = HeaderCounts::for_message_slice_mut(&mut msg);
            counts.set_qdcount(1);
            counts.inc_ancount().unwrap();
            counts.inc_ancount().unwrap();
            counts.set_arcount(0xFFFF);
            assert!(counts.inc_arcount().is_err());
        }
        assert_eq!(&msg[4..], b"\0\x01\0\x02\0\0\xff\xff");
        let counts = HeaderCounts::for_message_slice(&msg);
        assert_eq!(counts.qdcount(), 1);
        assert_eq!(counts.ancount(), 2);
        assert_eq!(counts.nscount(), 0);
        assert_eq!(counts.arcount(), 0xFFFF);
    }
}
