//! Parsed domain names.
//!
//! This is a private module. Its public types are re-exported by the
//! parent module.

use super::super::wire::{FormError, ParseError, Parser};
use super::label::{Label, LabelTypeError};
use super::traits::{ToDname, ToLabelIter};
use core::{cmp, fmt, hash};

//------------ ParsedDname ---------------------------------------------------

/// A domain name parsed from a DNS message.
///
/// In an attempt to keep messages small, DNS uses a procedure called 'name
/// compression.' It tries to minimize the space used for repeatedly
/// appearing domain names by simply referring to the first occurrence of
/// the name. This works not only for complete names but also for suffixes.
/// In this case, the first unique labels of the name are included and then
/// a pointer is included for the remainder of the name.
///
/// A consequence of this is that when parsing a domain name, its labels can
/// be scattered all over the message. `ParsedDname` avoids reassembling
/// them into allocated storage: it remembers a reference to the whole
/// message and the position the name starts at and traverses the labels in
/// place when iterating. When being created, the type walks over the name
/// once to check that it is, indeed, a valid name, so you don't have to
/// deal with parse errors later on.
///
/// `ParsedDname` implements the [`ToDname`] trait, so you can use it
/// everywhere a generic absolute domain name is accepted. In particular,
/// you can compare it to other names and convert it into a flat,
/// self-contained [`Dname`][super::Dname] via [`ToDname::to_dname`].
#[derive(Clone, Copy)]
pub struct ParsedDname<'a> {
    /// The message the name is embedded in.
    ///
    /// This needs to be the full message as compression pointers in the
    /// name are indexes into this slice.
    octets: &'a [u8],

    /// The start position of the name within `octets`.
    pos: usize,

    /// The length of the uncompressed name in octets.
    ///
    /// We need this for implementing `ToLabelIter`.
    name_len: u16,

    /// Whether the name is compressed.
    ///
    /// This allows various neat optimizations for the case where it isn't.
    compressed: bool,
}

impl<'a> ParsedDname<'a> {
    /// Returns whether the name is compressed.
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Returns whether the name is the root label only.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name_len == 1
    }

    /// Returns an iterator over the labels of the name.
    #[must_use]
    pub fn iter(&self) -> ParsedDnameIter<'a> {
        ParsedDnameIter::new(self.octets, self.pos, self.name_len)
    }

    /// Returns the number of labels in the domain name.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.iter().count()
    }

    /// Returns a reference to the first label.
    #[must_use]
    pub fn first(&self) -> &'a Label {
        self.iter().next().expect("at least the root label")
    }
}

impl<'a> ParsedDname<'a> {
    /// Parses a possibly compressed name from a message.
    ///
    /// The parser must be positioned at the first octet of the name within
    /// the message the parser was created for. Compression pointers are
    /// followed as long as each one points strictly backwards; anything
    /// else would allow crafted messages to keep the parser busy forever
    /// and fails with a form error.
    pub fn parse(parser: &mut Parser<'a>) -> Result<Self, ParseError> {
        let mut name_len = 0;
        let mut pos = parser.pos();

        // Phase 1: No compression pointers have been found yet.
        //
        // Parse labels. If we encounter the root label, return an
        // uncompressed name. Otherwise continue to phase 2.
        let mut ptr = loop {
            match LabelType::parse(parser)? {
                LabelType::Normal(0) => {
                    // Root label.
                    name_len += 1;
                    return Ok(ParsedDname {
                        octets: parser.octets_ref(),
                        pos,
                        name_len,
                        compressed: false,
                    });
                }
                LabelType::Normal(label_len) => {
                    parser.advance(usize::from(label_len))?;
                    name_len += label_len + 1;
                    if name_len >= 255 {
                        return Err(ParsedDnameError::LongName.into());
                    }
                }
                LabelType::Compressed(ptr) => {
                    break ptr;
                }
            }
        };

        // Phase 2: Compression has occurred.
        //
        // Now we need to add up label lengths until we encounter the root
        // label or the name becomes too long.
        //
        // We are going to work on a copy of the parser so we can jump
        // around. The actual parser has already reached the end of the
        // name.
        let mut parser = *parser;
        let mut compressed = true;
        loop {
            // Check that the compression pointer points backwards. Because
            // it is 16 bit long and the current position is behind the two
            // pointer octets, it needs to be less than the current position
            // minus 2 -- less so it can't point to itself.
            if ptr >= parser.pos() - 2 {
                return Err(ParsedDnameError::ExcessiveCompression.into());
            }

            // If this is the first label, the returned name may as well
            // start at the pointer target.
            if name_len == 0 {
                pos = ptr;
                compressed = false;
            }

            // Reposition and read next label.
            parser.seek(ptr)?;

            loop {
                match LabelType::parse(&mut parser)? {
                    LabelType::Normal(0) => {
                        // Root label.
                        name_len += 1;
                        return Ok(ParsedDname {
                            octets: parser.octets_ref(),
                            pos,
                            name_len,
                            compressed,
                        });
                    }
                    LabelType::Normal(label_len) => {
                        parser.advance(usize::from(label_len))?;
                        name_len += label_len + 1;
                        if name_len >= 255 {
                            return Err(ParsedDnameError::LongName.into());
                        }
                    }
                    LabelType::Compressed(new_ptr) => {
                        ptr = new_ptr;
                        compressed = true;
                        break;
                    }
                }
            }
        }
    }

    /// Skips over a domain name.
    ///
    /// This will only check the uncompressed part of the name. If the name
    /// is compressed but the pointer is invalid or the name pointed to is
    /// invalid or too long, the function will still succeed.
    ///
    /// If you need to check that the name you are skipping over is valid,
    /// you will have to use `parse` and drop the result.
    pub fn skip(parser: &mut Parser<'a>) -> Result<(), ParseError> {
        let mut len = 0;
        loop {
            match LabelType::parse(parser)? {
                LabelType::Normal(0) => {
                    len += 1;
                    if len > 255 {
                        return Err(ParsedDnameError::LongName.into());
                    }
                    return Ok(());
                }
                LabelType::Normal(label_len) => {
                    parser.advance(label_len.into())?;
                    len += label_len + 1;
                    if len > 255 {
                        return Err(ParsedDnameError::LongName.into());
                    }
                }
                LabelType::Compressed(_) => return Ok(()),
            }
        }
    }
}

//--- ToLabelIter and ToDname

impl<'a> ToLabelIter for ParsedDname<'a> {
    type LabelIter<'s> = ParsedDnameIter<'s> where 'a: 's;

    fn iter_labels(&self) -> Self::LabelIter<'_> {
        self.iter()
    }

    fn compose_len(&self) -> u16 {
        self.name_len
    }
}

impl<'a> ToDname for ParsedDname<'a> {
    fn as_flat_slice(&self) -> Option<&[u8]> {
        if self.compressed {
            None
        } else {
            Some(
                &self.octets[self.pos..self.pos + usize::from(self.name_len)],
            )
        }
    }
}

//--- IntoIterator

impl<'a, 's> IntoIterator for &'s ParsedDname<'a> {
    type Item = &'s Label;
    type IntoIter = ParsedDnameIter<'s>;

    fn into_iter(self) -> Self::IntoIter {
        ParsedDnameIter::new(self.octets, self.pos, self.name_len)
    }
}

//--- PartialEq and Eq

impl<'a, N: ToDname + ?Sized> PartialEq<N> for ParsedDname<'a> {
    fn eq(&self, other: &N) -> bool {
        self.name_eq(other)
    }
}

impl<'a> Eq for ParsedDname<'a> {}

//--- PartialOrd and Ord

impl<'a, N: ToDname + ?Sized> PartialOrd<N> for ParsedDname<'a> {
    fn partial_cmp(&self, other: &N) -> Option<cmp::Ordering> {
        Some(self.name_cmp(other))
    }
}

impl<'a> Ord for ParsedDname<'a> {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.name_cmp(other)
    }
}

//--- Hash

impl<'a> hash::Hash for ParsedDname<'a> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for item in self.iter() {
            item.hash(state)
        }
    }
}

//--- Display and Debug

impl<'a> fmt::Display for ParsedDname<'a> {
    /// Formats the domain name.
    ///
    /// This will produce the domain name in 'common display format'
    /// without the trailing dot.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut iter = self.iter();
        write!(f, "{}", iter.next().expect("at least the root label"))?;
        for label in iter {
            if !label.is_root() {
                write!(f, ".{}", label)?
            }
        }
        Ok(())
    }
}

impl<'a> fmt::Debug for ParsedDname<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ParsedDname({}.)", self)
    }
}

//------------ ParsedDnameIter -----------------------------------------------

/// An iterator over the labels in a parsed domain name.
#[derive(Clone)]
pub struct ParsedDnameIter<'a> {
    slice: &'a [u8],
    pos: usize,
    len: u16,
}

impl<'a> ParsedDnameIter<'a> {
    /// Creates a new iterator from the message and the name's start.
    ///
    /// The iterator assumes the name has been validated before: the label
    /// heads it encounters must be well-formed and any pointer must stay
    /// within the slice.
    fn new(slice: &'a [u8], pos: usize, len: u16) -> Self {
        ParsedDnameIter { slice, pos, len }
    }

    /// Returns the next label.
    ///
    /// This just assumes that there is a label at the current beginning
    /// of the parser. This may lead to funny results if there isn't,
    /// including panics if the label head is illegal or points beyond the
    /// end of the message.
    fn get_label(&mut self) -> &'a Label {
        let end = loop {
            let ltype = self.slice[self.pos];
            self.pos += 1;
            match ltype {
                0..=0x3F => break self.pos + (ltype as usize),
                0xC0..=0xFF => {
                    self.pos = (self.slice[self.pos] as usize)
                        | (((ltype as usize) & 0x3F) << 8);
                }
                _ => panic!("bad label"),
            }
        };
        let res = unsafe {
            Label::from_slice_unchecked(&self.slice[self.pos..end])
        };
        self.pos = end;
        self.len -= res.compose_len();
        res
    }
}

impl<'a> Iterator for ParsedDnameIter<'a> {
    type Item = &'a Label;

    fn next(&mut self) -> Option<&'a Label> {
        if self.len == 0 {
            return None;
        }
        Some(self.get_label())
    }
}

impl<'a> DoubleEndedIterator for ParsedDnameIter<'a> {
    fn next_back(&mut self) -> Option<&'a Label> {
        if self.len == 0 {
            return None;
        }
        let mut tmp = self.clone();
        let label = loop {
            let label = tmp.get_label();
            if tmp.len == 0 {
                break label;
            }
        };
        self.len -= label.compose_len();
        Some(label)
    }
}

//------------ LabelType -----------------------------------------------------

/// The type of a label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LabelType {
    /// A normal label with its size in octets.
    Normal(u16),

    /// A compressed label with the position of where to continue.
    Compressed(usize),
}

impl LabelType {
    /// Attempts to take a label type from the beginning of `parser`.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        let ltype = parser.parse_u8()?;
        match ltype {
            0..=0x3F => Ok(LabelType::Normal(ltype.into())),
            0xC0..=0xFF => {
                let res = usize::from(parser.parse_u8()?);
                let res = res | ((usize::from(ltype) & 0x3F) << 8);
                Ok(LabelType::Compressed(res))
            }
            _ => Err(ParseError::Form(FormError::new("invalid label type"))),
        }
    }
}

//------------ ParsedDnameError ----------------------------------------------

/// Parsing a domain name failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParsedDnameError {
    /// A bad label was encountered.
    BadLabel(LabelTypeError),

    /// The name is longer than the 255 octets allowed.
    LongName,

    /// A compression pointer did not point strictly backwards.
    ExcessiveCompression,
}

impl fmt::Display for ParsedDnameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        FormError::from(*self).fmt(f)
    }
}

impl std::error::Error for ParsedDnameError {}

impl From<LabelTypeError> for ParsedDnameError {
    fn from(err: LabelTypeError) -> Self {
        ParsedDnameError::BadLabel(err)
    }
}

impl From<ParsedDnameError> for FormError {
    fn from(err: ParsedDnameError) -> FormError {
        match err {
            ParsedDnameError::BadLabel(_) => {
                FormError::new("invalid label type")
            }
            ParsedDnameError::LongName => FormError::new("long domain name"),
            ParsedDnameError::ExcessiveCompression => {
                FormError::new("too many compression pointers")
            }
        }
    }
}

impl From<ParsedDnameError> for ParseError {
    fn from(err: ParsedDnameError) -> ParseError {
        ParseError::Form(err.into())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use super::super::dname::test::{cmp_iter, cmp_iter_back};
    use super::super::Dname;

    macro_rules! name {
        (root) => {
            name!(b"123\0", 3, 1, false)
        };
        (flat) => {
            name!(b"\x03www\x07example\x03com\0\xc0\0", 0, 17, false)
        };
        (copy) => {
            name!(b"\x03www\x07example\x03com\0\xc0\0", 17, 17, false)
        };
        (once) => {
            name!(b"\x03com\0\x03www\x07example\xC0\0", 5, 17, true)
        };
        (twice) => {
            name!(b"\x03com\0\x07example\xc0\0\x03www\xc0\x05", 15, 17, true)
        };

        ($octets:expr, $start:expr, $len:expr, $compressed:expr) => {
            ParsedDname {
                octets: $octets,
                pos: $start,
                name_len: $len,
                compressed: $compressed,
            }
        };
    }

    static WECR: &[u8] = b"\x03www\x07example\x03com\0";

    #[test]
    fn len() {
        assert_eq!(name!(root).compose_len(), 1);
        assert_eq!(name!(flat).compose_len(), 17);
        assert_eq!(name!(once).compose_len(), 17);
        assert_eq!(name!(twice).compose_len(), 17);
    }

    #[test]
    fn is_compressed() {
        assert!(!name!(root).is_compressed());
        assert!(!name!(flat).is_compressed());
        assert!(name!(once).is_compressed());
        assert!(name!(twice).is_compressed());
    }

    #[test]
    fn is_root() {
        assert!(name!(root).is_root());
        assert!(!name!(flat).is_root());
        assert!(!name!(once).is_root());
        assert!(!name!(twice).is_root());
    }

    #[test]
    fn iter() {
        let labels: &[&[u8]] = &[b"www", b"example", b"com", b""];
        cmp_iter(name!(root).iter(), &[b""]);
        cmp_iter(name!(flat).iter(), labels);
        cmp_iter(name!(once).iter(), labels);
        cmp_iter(name!(twice).iter(), labels);
    }

    #[test]
    fn iter_back() {
        let labels: &[&[u8]] = &[b"", b"com", b"example", b"www"];
        cmp_iter_back(name!(root).iter(), &[b""]);
        cmp_iter_back(name!(flat).iter(), labels);
        cmp_iter_back(name!(once).iter(), labels);
        cmp_iter_back(name!(twice).iter(), labels);
    }

    #[test]
    fn label_count() {
        assert_eq!(name!(root).label_count(), 1);
        assert_eq!(name!(flat).label_count(), 4);
        assert_eq!(name!(once).label_count(), 4);
        assert_eq!(name!(twice).label_count(), 4);
    }

    #[test]
    fn first() {
        assert_eq!(name!(root).first().as_slice(), b"");
        assert_eq!(name!(flat).first().as_slice(), b"www");
        assert_eq!(name!(once).first().as_slice(), b"www");
        assert_eq!(name!(twice).first().as_slice(), b"www");
    }

    #[test]
    fn parse_and_skip() {
        fn name_eq(parsed: ParsedDname<'_>, name: ParsedDname<'_>) {
            assert_eq!(parsed.octets, name.octets);
            assert_eq!(parsed.pos, name.pos);
            assert_eq!(parsed.name_len, name.name_len);
            assert_eq!(parsed.compressed, name.compressed);
        }

        fn parse(
            mut parser: Parser<'_>,
            equals: ParsedDname<'_>,
            compose_len: usize,
        ) {
            let end = parser.pos() + compose_len;
            name_eq(ParsedDname::parse(&mut parser).unwrap(), equals);
            assert_eq!(parser.pos(), end);
        }

        fn skip(name: ParsedDname<'_>, len: usize) {
            let mut parser = Parser::from_ref(name.octets);
            parser.advance(name.pos).unwrap();
            let pos = parser.pos();
            assert_eq!(ParsedDname::skip(&mut parser), Ok(()));
            assert_eq!(parser.pos(), pos + len);
        }

        fn p(slice: &[u8], pos: usize) -> Parser<'_> {
            let mut res = Parser::from_ref(slice);
            res.advance(pos).unwrap();
            res
        }

        // Correctly formatted names.
        parse(p(name!(root).octets, 3), name!(root), 1);
        parse(p(name!(flat).octets, 0), name!(flat), 17);
        parse(p(name!(copy).octets, 17), name!(flat), 2);
        parse(p(name!(once).octets, 5), name!(once), 14);
        parse(p(name!(twice).octets, 15), name!(twice), 6);
        skip(name!(root), 1);
        skip(name!(flat), 17);
        skip(name!(copy), 2);
        skip(name!(once), 14);
        skip(name!(twice), 6);

        // Short buffer in the middle of a label.
        let mut parser = p(b"\x03www\x07exam", 0);
        assert_eq!(
            ParsedDname::parse(&mut parser.clone()),
            Err(ParseError::ShortInput)
        );
        assert_eq!(
            ParsedDname::skip(&mut parser),
            Err(ParseError::ShortInput)
        );

        // Short buffer at end of label.
        let mut parser = p(b"\x03www\x07example", 0);
        assert_eq!(
            ParsedDname::parse(&mut parser.clone()),
            Err(ParseError::ShortInput)
        );
        assert_eq!(
            ParsedDname::skip(&mut parser),
            Err(ParseError::ShortInput)
        );

        // Compression pointer beyond the end of buffer.
        let mut parser = p(b"\x03www\xc0\xee12", 0);
        assert!(ParsedDname::parse(&mut parser.clone()).is_err());
        assert_eq!(ParsedDname::skip(&mut parser), Ok(()));
        assert_eq!(parser.remaining(), 2);

        // Compression pointer to itself.
        assert!(ParsedDname::parse(&mut p(b"\x03www\xc0\x0412", 4)).is_err());

        // Compression pointer forward.
        assert!(ParsedDname::parse(&mut p(b"\x03www\xc0\x0612", 4)).is_err());

        // Bad label header.
        let mut parser = p(b"\x03www\x07example\xbffoo", 0);
        assert!(ParsedDname::parse(&mut parser.clone()).is_err());
        assert!(ParsedDname::skip(&mut parser).is_err());

        // Long name: 255 octets is fine.
        let mut buf = Vec::from(&b"\x03123\0"[..]);
        for _ in 0..25 {
            buf.extend_from_slice(b"\x09123456789");
        }
        buf.extend_from_slice(b"\xc0\x0012");
        let mut parser = Parser::from_ref(buf.as_slice());
        parser.advance(5).unwrap();
        let name = ParsedDname::parse(&mut parser.clone()).unwrap();
        assert_eq!(name.compose_len(), 255);
        assert_eq!(ParsedDname::skip(&mut parser), Ok(()));
        assert_eq!(parser.remaining(), 2);

        // Long name: 256 octets are bad.
        let mut buf = Vec::from(&b"\x041234\x00"[..]);
        for _ in 0..25 {
            buf.extend_from_slice(b"\x09123456789");
        }
        buf.extend_from_slice(b"\xc0\x0012");
        let mut parser = Parser::from_ref(buf.as_slice());
        parser.advance(6).unwrap();
        assert!(ParsedDname::parse(&mut parser.clone()).is_err());
        assert_eq!(ParsedDname::skip(&mut parser), Ok(()));
        assert_eq!(parser.remaining(), 2);

        // Long name through recursion.
        let mut parser = p(b"\x03www\xc0\x0012", 0);
        assert!(ParsedDname::parse(&mut parser.clone()).is_err());
        assert_eq!(ParsedDname::skip(&mut parser), Ok(()));
        assert_eq!(parser.remaining(), 2);

        // Single-step infinite recursion.
        let mut parser = p(b"\xc0\x0012", 0);
        assert!(ParsedDname::parse(&mut parser.clone()).is_err());
        assert_eq!(ParsedDname::skip(&mut parser), Ok(()));
        assert_eq!(parser.remaining(), 2);

        // Two-step infinite recursion.
        let mut parser = p(b"\xc0\x02\xc0\x0012", 2);
        assert!(ParsedDname::parse(&mut parser.clone()).is_err());
        assert_eq!(ParsedDname::skip(&mut parser), Ok(()));
        assert_eq!(parser.remaining(), 2);
    }

    #[test]
    fn compose() {
        fn step(name: ParsedDname<'_>, result: &[u8]) {
            let mut buf = Vec::new();
            name.compose(&mut buf).unwrap();
            assert_eq!(buf.as_slice(), result);
        }

        step(name!(root), b"\x00");
        step(name!(flat), WECR);
        step(name!(once), WECR);
        step(name!(twice), WECR);
    }

    #[test]
    fn as_flat_slice() {
        assert_eq!(name!(root).as_flat_slice(), Some(b"\x00".as_ref()));
        assert_eq!(name!(flat).as_flat_slice(), Some(WECR));
        assert_eq!(name!(once).as_flat_slice(), None);
        assert_eq!(name!(twice).as_flat_slice(), None);
    }

    #[test]
    fn to_dname() {
        assert_eq!(name!(flat).to_vec().as_slice(), WECR);
        assert_eq!(name!(once).to_vec().as_slice(), WECR);
        assert_eq!(name!(twice).to_vec().as_slice(), WECR);
    }

    #[test]
    fn eq() {
        fn step<N: ToDname + fmt::Debug>(name: N) {
            assert_eq!(name!(flat), &name);
            assert_eq!(name!(once), &name);
            assert_eq!(name!(twice), &name);
        }

        fn ne_step<N: ToDname + fmt::Debug>(name: N) {
            assert_ne!(name!(flat), &name);
            assert_ne!(name!(once), &name);
            assert_ne!(name!(twice), &name);
        }

        step(name!(flat));
        step(name!(once));
        step(name!(twice));

        step(
            Dname::from_octets(b"\x03www\x07example\x03com\x00".as_ref())
                .unwrap(),
        );
        step(
            Dname::from_octets(b"\x03wWw\x07EXAMPLE\x03com\x00".as_ref())
                .unwrap(),
        );

        ne_step(
            Dname::from_octets(b"\x03ww4\x07EXAMPLE\x03com\x00".as_ref())
                .unwrap(),
        );
    }
}
