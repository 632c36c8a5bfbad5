//! Accessing existing DNS messages.
//!
//! This module defines the type [`Message`] which provides access to a DNS
//! message in wire format. A message is created by handing over an octets
//! sequence containing the raw message, either via
//! [`from_octets`][Message::from_octets], which only checks that a full
//! header is present, or via
//! [`from_octets_checked`][Message::from_octets_checked], which in
//! addition walks all four sections so that a returned message is known to
//! be fully decodable.
//!
//! The content of a message is accessed through iterators over its
//! sections: questions first, then the answer, authority, and additional
//! record sections in this order. The iterators are lazy, parsing each
//! entry as it is requested, and fuse on the first error: once any entry
//! fails to parse, no further entries are returned and moving on to the
//! next section fails, too.

use super::header::{Header, HeaderCounts, HeaderSection};
use super::iana::{Rcode, Rtype};
use super::name::ParsedDname;
use super::question::Question;
use super::rdata::ParseRecordData;
use super::record::{ParsedRecord, Record};
use super::wire::{ParseError, Parser, ShortInput};
use core::marker::PhantomData;
use core::mem;

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// This type wraps an octets sequence containing a complete DNS message in
/// wire format. It provides access to the header and the four message
/// sections; the payload of the message is only parsed when accessed.
///
/// The octets type is typically [`Bytes`][bytes::Bytes] for messages
/// received from the network or `Vec<u8>`/`&[u8]` for messages assembled
/// locally. The message owns its octets; parsed names and records copy
/// data out and never keep the message alive beyond their own lifetime
/// rules.
#[derive(Clone, Copy, Debug)]
pub struct Message<Octs> {
    octets: Octs,
}

/// # Creation and Conversion
///
impl<Octs> Message<Octs> {
    /// Creates a message from an octets sequence.
    ///
    /// This fails if the sequence is too short to even contain a complete
    /// header section. No further checks are done, so if this function
    /// returns `Ok`, the message may still be broken with methods returning
    /// errors later on.
    pub fn from_octets(octets: Octs) -> Result<Self, ShortMessage>
    where
        Octs: AsRef<[u8]>,
    {
        if octets.as_ref().len() < mem::size_of::<HeaderSection>() {
            Err(ShortMessage(()))
        } else {
            Ok(unsafe { Self::from_octets_unchecked(octets) })
        }
    }

    /// Creates a message from an octets sequence, checking all sections.
    ///
    /// In addition to the header check of
    /// [`from_octets`][Self::from_octets], this walks the question section
    /// and the three record sections against the counts declared in the
    /// header. If it returns `Ok`, every entry of the message is known to
    /// parse: decoding is all or nothing, there is no partially usable
    /// message. Record data of types known to this crate is validated by
    /// the walk; unknown types are stored opaquely and cannot fail.
    pub fn from_octets_checked(octets: Octs) -> Result<Self, ParseError>
    where
        Octs: AsRef<[u8]>,
    {
        let msg = Self::from_octets(octets)
            .map_err(|_| ParseError::ShortInput)?;
        let mut questions = msg.question();
        for item in questions.by_ref() {
            item?;
        }
        let mut section = questions.next_section()?;
        loop {
            for item in section.by_ref() {
                item?;
            }
            section = match section.next_section()? {
                Some(section) => section,
                None => break,
            }
        }
        Ok(msg)
    }

    /// Creates a message from an octets sequence without checking.
    pub(super) unsafe fn from_octets_unchecked(octets: Octs) -> Self {
        Message { octets }
    }

    /// Returns a reference to the underlying octets sequence.
    pub fn as_octets(&self) -> &Octs {
        &self.octets
    }

    /// Converts the message into the underlying octets sequence.
    pub fn into_octets(self) -> Octs {
        self.octets
    }

    /// Returns a reference to the underlying octets slice.
    pub fn as_slice(&self) -> &[u8]
    where
        Octs: AsRef<[u8]>,
    {
        self.octets.as_ref()
    }

    /// Returns a message atop a reference to this message's octets.
    pub fn for_slice(&self) -> Message<&[u8]>
    where
        Octs: AsRef<[u8]>,
    {
        unsafe { Message::from_octets_unchecked(self.octets.as_ref()) }
    }
}

/// # Header Section
///
impl<Octs: AsRef<[u8]>> Message<Octs> {
    /// Returns the message header.
    pub fn header(&self) -> Header {
        *Header::for_message_slice(self.as_slice())
    }

    /// Returns a mutable reference to the message header.
    pub fn header_mut(&mut self) -> &mut Header
    where
        Octs: AsMut<[u8]>,
    {
        Header::for_message_slice_mut(self.octets.as_mut())
    }

    /// Returns the header counts of the message.
    pub fn header_counts(&self) -> HeaderCounts {
        *HeaderCounts::for_message_slice(self.as_slice())
    }

    /// Returns the entire header section.
    pub fn header_section(&self) -> HeaderSection {
        *HeaderSection::for_message_slice(self.as_slice())
    }

    /// Returns whether the rcode of the header is NoError.
    pub fn no_error(&self) -> bool {
        self.header().rcode() == Rcode::NOERROR
    }

    /// Returns whether the rcode of the header is one of the error values.
    pub fn is_error(&self) -> bool {
        self.header().rcode() != Rcode::NOERROR
    }
}

/// # Access to Sections
///
impl<Octs: AsRef<[u8]>> Message<Octs> {
    /// Returns the question section.
    pub fn question(&self) -> QuestionSection<'_> {
        QuestionSection::new(self.octets.as_ref())
    }

    /// Returns the answer section.
    ///
    /// This skips over the question section.
    pub fn answer(&self) -> Result<RecordSection<'_>, ParseError> {
        self.question().next_section()
    }

    /// Returns the authority section.
    ///
    /// This skips over the question and answer sections.
    pub fn authority(&self) -> Result<RecordSection<'_>, ParseError> {
        Ok(self
            .answer()?
            .next_section()?
            .expect("answer is not the last section"))
    }

    /// Returns the additional section.
    ///
    /// This skips over the first three sections.
    pub fn additional(&self) -> Result<RecordSection<'_>, ParseError> {
        Ok(self
            .authority()?
            .next_section()?
            .expect("authority is not the last section"))
    }

    /// Returns all four sections in one fell swoop.
    #[allow(clippy::type_complexity)]
    pub fn sections(
        &self,
    ) -> Result<
        (
            QuestionSection<'_>,
            RecordSection<'_>,
            RecordSection<'_>,
            RecordSection<'_>,
        ),
        ParseError,
    > {
        let question = self.question();
        let answer = question.next_section()?;
        let authority = answer
            .next_section()?
            .expect("answer is not the last section");
        let additional = authority
            .next_section()?
            .expect("authority is not the last section");
        Ok((question, answer, authority, additional))
    }
}

/// # Helpers for Common Tasks
///
impl<Octs: AsRef<[u8]>> Message<Octs> {
    /// Returns whether this is the answer to some other message.
    ///
    /// The method checks whether the ID fields of the headers are the
    /// same, whether the QR flag is set in this message, and whether the
    /// questions are the same.
    pub fn is_answer<Other: AsRef<[u8]>>(
        &self,
        query: &Message<Other>,
    ) -> bool {
        if !self.header().qr()
            || self.header().id() != query.header().id()
            || self.header_counts().qdcount()
                != query.header_counts().qdcount()
        {
            false
        } else {
            let mut mine = self.question();
            let mut others = query.question();
            loop {
                match (mine.next(), others.next()) {
                    (Some(Ok(left)), Some(Ok(right))) => {
                        if left != right {
                            return false;
                        }
                    }
                    (None, None) => return true,
                    _ => return false,
                }
            }
        }
    }

    /// Returns the first question, if there is any.
    ///
    /// The method will return `None` both if there are no questions or if
    /// parsing fails.
    pub fn first_question(&self) -> Option<Question<ParsedDname<'_>>> {
        match self.question().next() {
            None | Some(Err(..)) => None,
            Some(Ok(question)) => Some(question),
        }
    }

    /// Returns the query type of the first question, if any.
    pub fn qtype(&self) -> Option<Rtype> {
        self.first_question().map(|x| x.qtype())
    }
}

//--- AsRef

impl<Octs: AsRef<[u8]>> AsRef<[u8]> for Message<Octs> {
    fn as_ref(&self) -> &[u8] {
        self.octets.as_ref()
    }
}

//------------ QuestionSection ----------------------------------------------

/// An iterator over the question section of a DNS message.
///
/// The iterator produces values of type
/// `Result<Question<ParsedDname>, ParseError>`. Once an error has been
/// returned, the iterator is fused and will keep returning `None`.
#[derive(Clone, Copy, Debug)]
pub struct QuestionSection<'a> {
    /// The parser for generating the questions.
    parser: Parser<'a>,

    /// The remaining number of questions.
    ///
    /// The `Result` is here to monitor an error during iteration. It is
    /// used to fuse the iterator after an error and is also returned by
    /// `next_section` should that be called after an error.
    count: Result<u16, ParseError>,
}

impl<'a> QuestionSection<'a> {
    /// Creates a new question section from the message octets.
    fn new(octets: &'a [u8]) -> Self {
        let mut parser = Parser::from_ref(octets);
        parser
            .advance(mem::size_of::<HeaderSection>())
            .expect("short message");
        QuestionSection {
            count: Ok(HeaderCounts::for_message_slice(octets).qdcount()),
            parser,
        }
    }

    /// Returns the current position relative to the start of the message.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.parser.pos()
    }

    /// Proceeds to the answer section.
    ///
    /// Skips over any remaining questions and then converts itself into
    /// the first [`RecordSection`].
    pub fn next_section(mut self) -> Result<RecordSection<'a>, ParseError> {
        while self.next().is_some() {}
        self.count?;
        Ok(RecordSection::new(self.parser, Section::first()))
    }
}

//--- Iterator

impl<'a> Iterator for QuestionSection<'a> {
    type Item = Result<Question<ParsedDname<'a>>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.count {
            Ok(count) if count > 0 => {
                match Question::parse(&mut self.parser) {
                    Ok(question) => {
                        self.count = Ok(count - 1);
                        Some(Ok(question))
                    }
                    Err(err) => {
                        self.count = Err(err);
                        Some(Err(err))
                    }
                }
            }
            _ => None,
        }
    }
}

//------------ Section -------------------------------------------------------

/// A helper type enumerating the three record sections of a message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd)]
pub enum Section {
    Answer,
    Authority,
    Additional,
}

impl Section {
    /// Returns the first record section.
    #[must_use]
    pub fn first() -> Self {
        Section::Answer
    }

    /// Returns the correct record count for this section.
    fn count(self, counts: HeaderCounts) -> u16 {
        match self {
            Section::Answer => counts.ancount(),
            Section::Authority => counts.nscount(),
            Section::Additional => counts.arcount(),
        }
    }

    /// Returns the following section or `None` if this is the last.
    #[must_use]
    pub fn next_section(self) -> Option<Self> {
        match self {
            Section::Answer => Some(Section::Authority),
            Section::Authority => Some(Section::Additional),
            Section::Additional => None,
        }
    }
}

//------------ RecordSection -------------------------------------------------

/// An iterator over one of the three record sections of a DNS message.
///
/// The iterator produces values of type
/// `Result<ParsedRecord, ParseError>`. A parsed record gives access to the
/// record header and can be turned into a concrete record via its
/// `into_record` method. Alternatively, the [`limit_to`][Self::limit_to]
/// method converts this iterator into one that only returns records of a
/// given record data type.
///
/// Once an error has been returned, the iterator is fused and moving on to
/// the next section fails with that error.
#[derive(Clone, Copy, Debug)]
pub struct RecordSection<'a> {
    /// The parser for generating the records.
    parser: Parser<'a>,

    /// Which section are we, really?
    section: Section,

    /// The remaining number of records.
    ///
    /// The `Result` is here to monitor an error during iteration. It is
    /// used to fuse the iterator after an error and is also returned by
    /// `next_section` should that be called after an error.
    count: Result<u16, ParseError>,
}

impl<'a> RecordSection<'a> {
    /// Creates a new section from a parser.
    ///
    /// The parser must be positioned at the beginning of this section.
    fn new(parser: Parser<'a>, section: Section) -> Self {
        RecordSection {
            count: Ok(section.count(*HeaderCounts::for_message_slice(
                parser.octets_ref(),
            ))),
            section,
            parser,
        }
    }

    /// Returns which section this iterator is for.
    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    /// Returns the current position relative to the start of the message.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.parser.pos()
    }

    /// Trades `self` in for an iterator limited to a record data type.
    ///
    /// The returned limited iterator will continue at the current position
    /// of `self`. It will *not* start from the beginning of the section.
    pub fn limit_to<Data: ParseRecordData<'a>>(self) -> RecordIter<'a, Data> {
        RecordIter::new(self)
    }

    /// Proceeds to the next section if there is one.
    ///
    /// Returns an error if parsing has failed and the message is unusable
    /// now.
    pub fn next_section(mut self) -> Result<Option<Self>, ParseError> {
        let section = match self.section.next_section() {
            Some(section) => section,
            None => return Ok(None),
        };
        while self.skip_next().is_some() {}
        self.count?;
        Ok(Some(RecordSection::new(self.parser, section)))
    }

    /// Skips the next record.
    fn skip_next(&mut self) -> Option<Result<(), ParseError>> {
        match self.count {
            Ok(count) if count > 0 => {
                match ParsedRecord::skip(&mut self.parser) {
                    Ok(_) => {
                        self.count = Ok(count - 1);
                        Some(Ok(()))
                    }
                    Err(err) => {
                        self.count = Err(err);
                        Some(Err(err))
                    }
                }
            }
            _ => None,
        }
    }
}

//--- Iterator

impl<'a> Iterator for RecordSection<'a> {
    type Item = Result<ParsedRecord<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.count {
            Ok(count) if count > 0 => {
                match ParsedRecord::parse(&mut self.parser) {
                    Ok(record) => {
                        self.count = Ok(count - 1);
                        Some(Ok(record))
                    }
                    Err(err) => {
                        self.count = Err(err);
                        Some(Err(err))
                    }
                }
            }
            _ => None,
        }
    }
}

//------------ RecordIter ----------------------------------------------------

/// An iterator over the records of a given type in a record section.
///
/// The iterator quietly skips over records whose type `Data` doesn't want
/// to parse.
#[derive(Clone, Copy, Debug)]
pub struct RecordIter<'a, Data> {
    section: RecordSection<'a>,
    marker: PhantomData<Data>,
}

impl<'a, Data: ParseRecordData<'a>> RecordIter<'a, Data> {
    /// Creates a new record iterator.
    fn new(section: RecordSection<'a>) -> Self {
        RecordIter {
            section,
            marker: PhantomData,
        }
    }

    /// Trades the iterator back in for the full section iterator.
    ///
    /// The returned iterator will continue right after the last record
    /// previously returned.
    pub fn unwrap(self) -> RecordSection<'a> {
        self.section
    }

    /// Proceeds to the next section if there is one.
    pub fn next_section(
        self,
    ) -> Result<Option<RecordSection<'a>>, ParseError> {
        self.section.next_section()
    }
}

//--- Iterator

impl<'a, Data: ParseRecordData<'a>> Iterator for RecordIter<'a, Data> {
    type Item = Result<Record<ParsedDname<'a>, Data>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.section.next() {
                Some(Ok(record)) => record,
                Some(Err(err)) => return Some(Err(err)),
                None => return None,
            };
            match record.into_record() {
                Ok(Some(record)) => return Some(Ok(record)),
                Err(err) => return Some(Err(err)),
                Ok(None) => {}
            }
        }
    }
}

//------------ ShortMessage --------------------------------------------------

/// An octets sequence was shorter than the minimal message length.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShortMessage(());

impl core::fmt::Display for ShortMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("short message")
    }
}

impl std::error::Error for ShortMessage {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::message_builder::MessageBuilder;
    use crate::base::name::Dname;
    use crate::base::record::Ttl;
    use crate::rdata::{AllRecordData, Aaaa, A};
    use bytes::Bytes;

    fn get_test_message() -> Message<Vec<u8>> {
        let msg = MessageBuilder::new_vec();
        let mut msg = msg.question();
        msg.push((Dname::vec_from_str("example.com").unwrap(), Rtype::A))
            .unwrap();
        let mut msg = msg.answer();
        msg.push((
            Dname::vec_from_str("example.com").unwrap(),
            86400,
            A::from_octets(192, 0, 2, 1),
        ))
        .unwrap();
        let mut msg = msg.authority();
        msg.push((
            Dname::vec_from_str("example.com").unwrap(),
            Ttl::HOUR,
            Aaaa::new("2001:db8::1".parse().unwrap()),
        ))
        .unwrap();
        msg.into_message()
    }

    #[test]
    fn short_message() {
        assert!(Message::from_octets(&[0u8; 11]).is_err());
        assert!(Message::from_octets(&[0u8; 12]).is_ok());
        assert!(Message::from_octets_checked([0u8; 12].as_ref()).is_ok());
    }

    #[test]
    fn sections_and_counts() {
        let msg = get_test_message();
        assert_eq!(msg.header_counts().qdcount(), 1);
        assert_eq!(msg.header_counts().ancount(), 1);
        assert_eq!(msg.header_counts().nscount(), 1);
        assert_eq!(msg.header_counts().arcount(), 0);

        assert_eq!(msg.qtype(), Some(Rtype::A));
        let question = msg.first_question().unwrap();
        assert_eq!(question.qtype(), Rtype::A);
        assert_eq!(
            question.qname(),
            &Dname::vec_from_str("example.com").unwrap()
        );

        let mut answer = msg.answer().unwrap().limit_to::<A>();
        assert_eq!(
            answer.next().unwrap().unwrap().data(),
            &A::from_octets(192, 0, 2, 1)
        );
        assert!(answer.next().is_none());

        let mut authority =
            msg.authority().unwrap().limit_to::<Aaaa>();
        let rr = authority.next().unwrap().unwrap();
        assert_eq!(rr.ttl(), Ttl::HOUR);
        assert!(authority.next().is_none());

        let additional = msg.additional().unwrap();
        assert_eq!(additional.count, Ok(0));
    }

    #[test]
    fn from_octets_checked() {
        let msg = get_test_message();
        assert!(
            Message::from_octets_checked(msg.as_slice()).is_ok()
        );

        // Truncating anywhere inside the sections must fail the check.
        for len in 13..msg.as_slice().len() {
            assert!(
                Message::from_octets_checked(&msg.as_slice()[..len])
                    .is_err(),
                "length {} unexpectedly passed",
                len
            );
        }
    }

    #[test]
    fn limit_to_skips_other_types() {
        let msg = get_test_message();
        // The authority section holds an AAAA record; iterating it as A
        // records must produce nothing, but iterating as AllRecordData
        // produces the record.
        assert!(msg.authority().unwrap().limit_to::<A>().next().is_none());
        let mut iter = msg
            .authority()
            .unwrap()
            .limit_to::<AllRecordData<Bytes>>();
        assert!(matches!(
            iter.next().unwrap().unwrap().data(),
            AllRecordData::Aaaa(_)
        ));
    }

    #[test]
    fn is_answer() {
        let mut query = MessageBuilder::new_vec().question();
        query
            .push((Dname::vec_from_str("example.com").unwrap(), Rtype::A))
            .unwrap();
        let query = query.into_message();

        let mut answer = MessageBuilder::new_vec();
        answer.header_mut().set_qr(true);
        answer.header_mut().set_id(query.header().id());
        let mut answer = answer.question();
        answer
            .push((Dname::vec_from_str("example.com").unwrap(), Rtype::A))
            .unwrap();
        let answer = answer.into_message();

        assert!(answer.is_answer(&query));
        assert!(!query.is_answer(&answer));
    }
}
