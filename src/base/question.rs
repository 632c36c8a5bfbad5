//! A single question of a DNS message.
//!
//! This module defines the type [`Question`] which represents an entry in
//! the question section of a DNS message as well as the [`ComposeQuestion`]
//! trait for producing questions on the fly while building a message.

use super::cmp::CanonicalOrd;
use super::iana::{Class, Rtype};
use super::name::{ParsedDname, ToDname};
use super::wire::{Composer, ParseError, Parser, ShortBuf};
use core::cmp::Ordering;
use core::{fmt, hash};

//------------ Question ------------------------------------------------------

/// A question in a DNS message.
///
/// In DNS, a question describes what is requested in a query. It consists
/// of three elements: a domain name, a record type, and a class. This type
/// represents such a question.
///
/// Questions are generic over the domain name type. When read from an
/// actual message, a [`ParsedDname`] has to be used because the name part
/// may be compressed.
#[derive(Clone, Copy)]
pub struct Question<N> {
    /// The domain name of the question.
    qname: N,

    /// The record type of the question.
    qtype: Rtype,

    /// The class of the question.
    qclass: Class,
}

/// # Creation and Conversion
///
impl<N> Question<N> {
    /// Creates a new question from its three components.
    pub fn new(qname: N, qtype: Rtype, qclass: Class) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    /// Creates a new question from a name and record type, assuming class
    /// IN.
    pub fn new_in(qname: N, qtype: Rtype) -> Self {
        Question {
            qname,
            qtype,
            qclass: Class::IN,
        }
    }

    /// Converts the question into the qname.
    pub fn into_qname(self) -> N {
        self.qname
    }
}

/// # Field Access
///
impl<N: ToDname> Question<N> {
    /// Returns a reference to the domain name in the question.
    pub fn qname(&self) -> &N {
        &self.qname
    }

    /// Returns the record type of the question.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the class of the question.
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

/// # Parsing and Composing
///
impl<'a> Question<ParsedDname<'a>> {
    /// Parses a question from the beginning of a parser.
    pub fn parse(parser: &mut Parser<'a>) -> Result<Self, ParseError> {
        Ok(Question::new(
            ParsedDname::parse(parser)?,
            Rtype::parse(parser)?,
            Class::parse(parser)?,
        ))
    }

    /// Skips over a question at the beginning of a parser.
    pub fn skip(parser: &mut Parser<'a>) -> Result<(), ParseError> {
        ParsedDname::skip(parser)?;
        parser
            .advance((Rtype::COMPOSE_LEN + Class::COMPOSE_LEN).into())
            .map_err(Into::into)
    }
}

impl<N: ToDname> Question<N> {
    /// Appends the question to a message target.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        target.append_compressed_dname(&self.qname)?;
        self.qtype.compose(target)?;
        self.qclass.compose(target)
    }
}

//--- From

impl<N: ToDname> From<(N, Rtype, Class)> for Question<N> {
    fn from((qname, qtype, qclass): (N, Rtype, Class)) -> Self {
        Question::new(qname, qtype, qclass)
    }
}

impl<N: ToDname> From<(N, Rtype)> for Question<N> {
    fn from((qname, qtype): (N, Rtype)) -> Self {
        Question::new(qname, qtype, Class::IN)
    }
}

//--- PartialEq and Eq

impl<N, NN> PartialEq<Question<NN>> for Question<N>
where
    N: ToDname,
    NN: ToDname,
{
    fn eq(&self, other: &Question<NN>) -> bool {
        self.qname.name_eq(&other.qname)
            && self.qtype == other.qtype
            && self.qclass == other.qclass
    }
}

impl<N: ToDname> Eq for Question<N> {}

//--- PartialOrd, CanonicalOrd, and Ord

impl<N, NN> PartialOrd<Question<NN>> for Question<N>
where
    N: ToDname,
    NN: ToDname,
{
    fn partial_cmp(&self, other: &Question<NN>) -> Option<Ordering> {
        match self.qname.name_cmp(&other.qname) {
            Ordering::Equal => {}
            other => return Some(other),
        }
        match self.qtype.partial_cmp(&other.qtype) {
            Some(Ordering::Equal) => {}
            other => return other,
        }
        self.qclass.partial_cmp(&other.qclass)
    }
}

impl<N, NN> CanonicalOrd<Question<NN>> for Question<N>
where
    N: ToDname,
    NN: ToDname,
{
    fn canonical_cmp(&self, other: &Question<NN>) -> Ordering {
        match self.qname.lowercase_composed_cmp(&other.qname) {
            Ordering::Equal => {}
            other => return other,
        }
        match self.qtype.cmp(&other.qtype) {
            Ordering::Equal => {}
            other => return other,
        }
        self.qclass.cmp(&other.qclass)
    }
}

impl<N: ToDname> Ord for Question<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.qname.name_cmp(&other.qname) {
            Ordering::Equal => {}
            other => return other,
        }
        match self.qtype.cmp(&other.qtype) {
            Ordering::Equal => {}
            other => return other,
        }
        self.qclass.cmp(&other.qclass)
    }
}

//--- Hash

impl<N: hash::Hash> hash::Hash for Question<N> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.qname.hash(state);
        self.qtype.hash(state);
        self.qclass.hash(state);
    }
}

//--- Display and Debug

impl<N: fmt::Display> fmt::Display for Question<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}. {} {}", self.qname, self.qclass, self.qtype)
    }
}

impl<N: fmt::Debug> fmt::Debug for Question<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Question")
            .field("qname", &self.qname)
            .field("qtype", &self.qtype)
            .field("qclass", &self.qclass)
            .finish()
    }
}

//------------ ComposeQuestion -----------------------------------------------

/// A helper trait allowing construction of questions on the fly.
///
/// The trait's primary user is the
/// [`QuestionBuilder`][super::message_builder::QuestionBuilder] whose
/// `push` method accepts anything that implements this trait.
///
/// Implementations are provided for [`Question`] values and references as
/// well as for tuples of a domain name, record type, and class and, since
/// the class is pretty much always `Class::IN`, a pair of just a name and
/// record type.
pub trait ComposeQuestion {
    fn compose_question<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf>;
}

impl<'a, Q: ComposeQuestion> ComposeQuestion for &'a Q {
    fn compose_question<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        (*self).compose_question(target)
    }
}

impl<N: ToDname> ComposeQuestion for Question<N> {
    fn compose_question<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        self.compose(target)
    }
}

impl<N: ToDname> ComposeQuestion for (N, Rtype, Class) {
    fn compose_question<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        Question::new(&self.0, self.1, self.2).compose(target)
    }
}

impl<N: ToDname> ComposeQuestion for (N, Rtype) {
    fn compose_question<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ShortBuf> {
        Question::new_in(&self.0, self.1).compose(target)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::name::Dname;

    #[test]
    fn parse_and_compose() {
        let wire = b"\x07example\x03com\0\0\x01\0\x01rest";
        let mut parser = Parser::from_ref(wire.as_ref());
        let question = Question::parse(&mut parser).unwrap();
        assert_eq!(parser.remaining(), 4);
        assert_eq!(format!("{}", question.qname()), "example.com");
        assert_eq!(question.qtype(), Rtype::A);
        assert_eq!(question.qclass(), Class::IN);

        let mut parser = Parser::from_ref(wire.as_ref());
        Question::skip(&mut parser).unwrap();
        assert_eq!(parser.remaining(), 4);

        let mut buf = Vec::new();
        question.compose(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), &wire[..17]);
    }

    #[test]
    fn eq() {
        let name = Dname::vec_from_str("Example.Com").unwrap();
        let question = Question::new_in(&name, Rtype::NSEC3);
        let other = Question::new(
            Dname::vec_from_str("example.com").unwrap(),
            Rtype::NSEC3,
            Class::IN,
        );
        assert_eq!(question, other);
        assert_ne!(
            question,
            Question::new_in(
                Dname::vec_from_str("example.org").unwrap(),
                Rtype::NSEC3
            )
        );
    }
}
