//! Building a domain name.
//!
//! This is a private module for tidiness. `DnameBuilder` and its errors
//! are re-exported by the parent module.

use super::dname::Dname;
use super::label::Label;
use core::fmt;
use std::vec::Vec;

//------------ DnameBuilder --------------------------------------------------

/// A builder for domain names.
///
/// The builder appends octets to the current label and closes labels off
/// via [`end_label`][Self::end_label]. It enforces the label and name
/// length limits while building, so extracting the finished name via
/// [`into_dname`][Self::into_dname] cannot fail anymore.
#[derive(Clone, Debug, Default)]
pub struct DnameBuilder {
    /// The name assembled so far.
    target: Vec<u8>,

    /// The position in `target` of the length octet of the current label.
    ///
    /// This is `None` if no label is currently being built.
    head: Option<usize>,
}

impl DnameBuilder {
    /// Creates a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the number of octets assembled so far.
    ///
    /// The count does not include the root label still to be appended.
    #[must_use]
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Returns whether the builder is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Returns whether a label is currently being built.
    #[must_use]
    pub fn in_label(&self) -> bool {
        self.head.is_some()
    }

    /// Appends a single octet to the current label.
    ///
    /// Starts a new label if none is currently being built.
    pub fn push(&mut self, ch: u8) -> Result<(), PushError> {
        match self.head {
            Some(head) => {
                if self.target.len() - head - 1 >= Label::MAX_LEN {
                    return Err(PushError::LongLabel);
                }
            }
            None => {
                // Room for the length octet, the new octet, and the root
                // label that into_dname will append.
                if self.target.len() + 2 >= 255 {
                    return Err(PushError::LongName);
                }
                self.head = Some(self.target.len());
                self.target.push(0);
            }
        }
        if self.target.len() + 1 >= 255 {
            return Err(PushError::LongName);
        }
        self.target.push(ch);
        Ok(())
    }

    /// Appends all octets in `slice` to the current label.
    pub fn append_slice(&mut self, slice: &[u8]) -> Result<(), PushError> {
        for ch in slice {
            self.push(*ch)?;
        }
        Ok(())
    }

    /// Ends the current label.
    ///
    /// Does nothing if no label is currently being built.
    pub fn end_label(&mut self) {
        if let Some(head) = self.head {
            let len = self.target.len() - head - 1;
            self.target[head] = len as u8;
            self.head = None;
        }
    }

    /// Appends a sequence of characters in presentation format.
    ///
    /// Labels are separated by dots. A backslash escapes the following
    /// character; a backslash followed by three decimal digits denotes an
    /// octet by value.
    pub fn append_chars<C: IntoIterator<Item = char>>(
        &mut self,
        chars: C,
    ) -> Result<(), FromStrError> {
        let mut chars = chars.into_iter();
        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if !self.in_label() {
                        return Err(FromStrError::EmptyLabel);
                    }
                    self.end_label();
                }
                '\\' => {
                    let ch = parse_escape(&mut chars)?;
                    self.push(ch)?;
                }
                ' '..='-' | '/'..='[' | ']'..='~' => {
                    self.push(ch as u8)?;
                }
                _ => return Err(FromStrError::IllegalCharacter(ch)),
            }
        }
        Ok(())
    }

    /// Finishes the name by appending the root label.
    ///
    /// A label still being built is ended first. The length checks during
    /// building guarantee the result stays within the 255 octet limit.
    #[must_use]
    pub fn into_dname(mut self) -> Dname<Vec<u8>> {
        self.end_label();
        self.target.push(0);
        unsafe { Dname::from_octets_unchecked(self.target) }
    }
}

/// Parses the remainder of an escape sequence.
///
/// The backslash itself has already been consumed from `chars`.
fn parse_escape<C: Iterator<Item = char>>(
    chars: &mut C,
) -> Result<u8, FromStrError> {
    let ch = chars.next().ok_or(FromStrError::UnexpectedEnd)?;
    if ch.is_ascii_digit() {
        let mut res = ch.to_digit(10).expect("checked digit") * 100;
        for factor in [10, 1] {
            let ch = chars.next().ok_or(FromStrError::UnexpectedEnd)?;
            res += ch.to_digit(10).ok_or(FromStrError::IllegalEscape)?
                * factor;
        }
        u8::try_from(res).map_err(|_| FromStrError::IllegalEscape)
    } else if (' '..='~').contains(&ch) {
        Ok(ch as u8)
    } else {
        Err(FromStrError::IllegalEscape)
    }
}

//============ Error Types ===================================================

//------------ PushError -----------------------------------------------------

/// An error happened while appending data to a domain name builder.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PushError {
    /// The current label would exceed the maximum length of 63 octets.
    LongLabel,

    /// The name would exceed the maximum length of 255 octets.
    LongName,
}

impl fmt::Display for PushError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PushError::LongLabel => f.write_str("long label"),
            PushError::LongName => f.write_str("long domain name"),
        }
    }
}

impl std::error::Error for PushError {}

//------------ FromStrError --------------------------------------------------

/// An error happened while reading a domain name in presentation format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FromStrError {
    /// The string ended when there should have been more characters.
    ///
    /// This happens in escape sequences and for the empty string.
    UnexpectedEnd,

    /// An empty label was encountered.
    EmptyLabel,

    /// An illegal escape sequence was encountered.
    IllegalEscape,

    /// An illegal character was encountered.
    ///
    /// Only printable ASCII characters are allowed unescaped.
    IllegalCharacter(char),

    /// A label exceeded the maximum length of 63 octets.
    LongLabel,

    /// The name exceeded the maximum length of 255 octets.
    LongName,
}

impl From<PushError> for FromStrError {
    fn from(err: PushError) -> FromStrError {
        match err {
            PushError::LongLabel => FromStrError::LongLabel,
            PushError::LongName => FromStrError::LongName,
        }
    }
}

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FromStrError::UnexpectedEnd => {
                f.write_str("unexpected end of input")
            }
            FromStrError::EmptyLabel => {
                f.write_str("an empty label was encountered")
            }
            FromStrError::IllegalEscape => {
                f.write_str("illegal escape sequence")
            }
            FromStrError::IllegalCharacter(char) => {
                write!(f, "illegal character '{}'", char)
            }
            FromStrError::LongLabel => f.write_str("long label"),
            FromStrError::LongName => f.write_str("long domain name"),
        }
    }
}

impl std::error::Error for FromStrError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn build_simple() {
        let mut builder = DnameBuilder::new();
        builder.append_slice(b"www").unwrap();
        builder.end_label();
        builder.append_slice(b"example").unwrap();
        builder.end_label();
        builder.append_slice(b"com").unwrap();
        assert_eq!(
            builder.into_dname().as_slice(),
            b"\x03www\x07example\x03com\0"
        );
    }

    #[test]
    fn build_limits() {
        let mut builder = DnameBuilder::new();
        for _ in 0..Label::MAX_LEN {
            builder.push(b'x').unwrap();
        }
        assert_eq!(builder.push(b'x'), Err(PushError::LongLabel));
        builder.end_label();

        // Fill up the name with 21 more nine-octet labels for a total of
        // 64 + 21 * 10 = 274 ... which must fail along the way.
        let mut ok = true;
        'outer: for _ in 0..21 {
            for _ in 0..9 {
                if builder.push(b'y').is_err() {
                    ok = false;
                    break 'outer;
                }
            }
            builder.end_label();
        }
        assert!(!ok);
    }

    #[test]
    fn append_chars_with_escapes() {
        let mut builder = DnameBuilder::new();
        builder.append_chars("w\\119w.ex\\.ample".chars()).unwrap();
        assert_eq!(
            builder.into_dname().as_slice(),
            b"\x03www\x08ex.ample\0"
        );
    }

    #[test]
    fn append_chars_errors() {
        assert_eq!(
            DnameBuilder::new().append_chars(".foo".chars()),
            Err(FromStrError::EmptyLabel)
        );
        assert_eq!(
            DnameBuilder::new().append_chars("foo..bar".chars()),
            Err(FromStrError::EmptyLabel)
        );
        assert_eq!(
            DnameBuilder::new().append_chars("foo\\".chars()),
            Err(FromStrError::UnexpectedEnd)
        );
        assert_eq!(
            DnameBuilder::new().append_chars("foo\\1x2".chars()),
            Err(FromStrError::IllegalEscape)
        );
        assert_eq!(
            DnameBuilder::new().append_chars("foo\\999".chars()),
            Err(FromStrError::IllegalEscape)
        );
    }
}
