//! Building a new DNS message.
//!
//! The types in this module allow building a DNS message consecutively
//! from its parts. Since messages consist of five parts, a number of types
//! are involved. The concept is that you start out with a
//! [`MessageBuilder`] and work your way step by step through the sections
//! by trading the builder in for one of another type representing the
//! following section. The sequence is [`MessageBuilder`],
//! [`QuestionBuilder`], [`AnswerBuilder`], [`AuthorityBuilder`], and
//! finally [`AdditionalBuilder`]. The sections can only be traversed
//! forward; there is no partially built state to return to.
//!
//! Each of the section builders offers a `push` method to add elements to
//! the section. For the question section, the method accepts anything that
//! resembles a [`Question`][super::question::Question] while the three
//! record sections expect something that looks like a
//! [`Record`][super::record::Record]. Apart from actual values of these
//! types, tuples of their components work as well. Pushing is atomic:
//! either the whole element is appended and the corresponding header count
//! incremented, or the target is rolled back to its previous state and the
//! counts left untouched.
//!
//! Building happens atop any [`Composer`], so the type of buffer to use
//! for building can be chosen. Two wrapper targets, [`TreeCompressor`] and
//! [`StaticCompressor`], provide domain name compression: instead of
//! writing a domain name suffix that has been written before again, they
//! emit a pointer to the position of the previous occurrence. Since this
//! requires remembering which names appeared where, it isn't enabled by
//! default but opted into by wrapping the target.
//!
//! # Example
//!
//! The following example builds a message with name compression and puts
//! two A records into it.
//!
//! ```
//! use core::str::FromStr;
//! use dns_wire::base::{
//!     Dname, MessageBuilder, Rtype, StaticCompressor,
//! };
//! use dns_wire::rdata::A;
//!
//! let name = Dname::<Vec<u8>>::from_str("example.com").unwrap();
//!
//! let mut msg = MessageBuilder::from_target(
//!     StaticCompressor::new(Vec::new())
//! ).unwrap();
//! msg.header_mut().set_rd(true);
//!
//! let mut msg = msg.question();
//! msg.push((&name, Rtype::A)).unwrap();
//!
//! let mut msg = msg.answer();
//! msg.push((&name, 86400, A::from_octets(192, 0, 2, 1))).unwrap();
//! msg.push((&name, 86400, A::from_octets(192, 0, 2, 2))).unwrap();
//!
//! let target = msg.finish().into_target();
//! let _ = target.as_slice();
//! ```

use super::header::{CountOverflow, Header, HeaderCounts, HeaderSection};
use super::iana::{Rcode, Rtype};
use super::message::Message;
use super::name::{Label, ToDname};
use super::question::ComposeQuestion;
use super::record::ComposeRecord;
use super::wire::{
    Compose, Composer, FreezeBuilder, OctetsBuilder, ShortBuf,
};
use bytes::BytesMut;
use core::fmt;
use core::ops::{Deref, DerefMut};
use std::collections::HashMap;
use std::vec::Vec;

//------------ MessageBuilder ------------------------------------------------

/// Starts building a DNS message.
///
/// This type wraps a [`Composer`] and starts the process of building a
/// message. It allows access to the header section. The message builder
/// can be traded in for any section builder or the underlying target.
///
/// For more details see the [module documentation][self].
#[derive(Clone, Debug)]
pub struct MessageBuilder<Target> {
    target: Target,
}

/// # Creating Message Builders
///
impl<Target: Composer> MessageBuilder<Target> {
    /// Creates a new message builder using the given target.
    ///
    /// The target will be truncated to zero size before appending the
    /// header section. That is, all data that was in the target before
    /// will be lost.
    ///
    /// The function will result in an error if the target doesn't have
    /// enough space for the header section.
    pub fn from_target(mut target: Target) -> Result<Self, ShortBuf> {
        target.truncate(0);
        target.append_slice(HeaderSection::new().as_slice())?;
        Ok(MessageBuilder { target })
    }
}

impl MessageBuilder<Vec<u8>> {
    /// Creates a new message builder atop a `Vec<u8>`.
    #[must_use]
    pub fn new_vec() -> Self {
        Self::from_target(Vec::new()).expect("fresh vec")
    }
}

impl MessageBuilder<BytesMut> {
    /// Creates a new message builder atop a bytes value.
    #[must_use]
    pub fn new_bytes() -> Self {
        Self::from_target(BytesMut::new()).expect("fresh bytes")
    }
}

impl<Target: Composer> MessageBuilder<Target> {
    /// Starts creating an answer for the given message.
    ///
    /// Specifically, this sets the ID, QR, OPCODE, RD, and RCODE fields in
    /// the header and attempts to push the message's questions to the
    /// builder. If iterating over the questions fails, it adds what it
    /// can.
    ///
    /// The method converts the message builder into an answer builder
    /// ready to receive the answer for the question.
    pub fn start_answer<Octs: AsRef<[u8]>>(
        mut self,
        msg: &Message<Octs>,
        rcode: Rcode,
    ) -> Result<AnswerBuilder<Target>, PushError> {
        {
            let header = self.header_mut();
            header.set_id(msg.header().id());
            header.set_qr(true);
            header.set_opcode(msg.header().opcode());
            header.set_rd(msg.header().rd());
            header.set_rcode(rcode);
        }
        let mut builder = self.question();
        for item in msg.question().flatten() {
            builder.push(item)?;
        }
        Ok(builder.answer())
    }

    /// Creates an AXFR request for the given zone.
    ///
    /// Sets a random ID, pushes the domain and the AXFR record type into
    /// the question section, and converts the builder into an answer
    /// builder.
    pub fn request_axfr<N: ToDname>(
        mut self,
        apex: N,
    ) -> Result<AnswerBuilder<Target>, PushError> {
        self.header_mut().set_random_id();
        let mut builder = self.question();
        builder.push((apex, Rtype::AXFR))?;
        Ok(builder.answer())
    }
}

/// # Access to the Message Header
///
impl<Target: Composer> MessageBuilder<Target> {
    /// Returns the current value of the message header.
    pub fn header(&self) -> Header {
        *Header::for_message_slice(self.target.as_ref())
    }

    /// Returns the current value of the message header counts.
    pub fn counts(&self) -> HeaderCounts {
        *HeaderCounts::for_message_slice(self.target.as_ref())
    }

    /// Returns a mutable reference to the message header.
    pub fn header_mut(&mut self) -> &mut Header {
        Header::for_message_slice_mut(self.target.as_mut())
    }

    /// Returns a mutable reference to the message header counts.
    fn counts_mut(&mut self) -> &mut HeaderCounts {
        HeaderCounts::for_message_slice_mut(self.target.as_mut())
    }
}

/// # Conversions
///
impl<Target: Composer> MessageBuilder<Target> {
    /// Converts the message builder into a question builder.
    pub fn question(self) -> QuestionBuilder<Target> {
        QuestionBuilder::new(self)
    }

    /// Converts the message builder into an answer builder.
    ///
    /// This will leave the question section empty.
    pub fn answer(self) -> AnswerBuilder<Target> {
        self.question().answer()
    }

    /// Converts the message builder into an authority builder.
    ///
    /// This will leave the question and answer sections empty.
    pub fn authority(self) -> AuthorityBuilder<Target> {
        self.question().answer().authority()
    }

    /// Converts the message builder into an additional builder.
    ///
    /// This will leave the question, answer, and authority sections empty.
    pub fn additional(self) -> AdditionalBuilder<Target> {
        self.question().answer().authority().additional()
    }

    /// Converts the message builder into the underlying target.
    pub fn finish(self) -> Target {
        self.target
    }
}

impl<Target: FreezeBuilder> MessageBuilder<Target> {
    /// Converts the builder into a message.
    ///
    /// The method will return a message atop whatever octets sequence the
    /// builder's target converts into.
    pub fn into_message(self) -> Message<Target::Octets> {
        unsafe { Message::from_octets_unchecked(self.target.freeze()) }
    }
}

impl<Target> MessageBuilder<Target> {
    /// Returns a reference to the underlying target.
    pub fn as_target(&self) -> &Target {
        &self.target
    }

    /// Returns an octets slice of the octets assembled so far.
    pub fn as_slice(&self) -> &[u8]
    where
        Target: AsRef<[u8]>,
    {
        self.target.as_ref()
    }

    /// Returns a message atop the octets assembled so far.
    ///
    /// The message is atop an octets slice derived from the builder, so it
    /// can be created cheaply.
    pub fn as_message(&self) -> Message<&[u8]>
    where
        Target: AsRef<[u8]>,
    {
        unsafe { Message::from_octets_unchecked(self.target.as_ref()) }
    }
}

impl<Target: Composer> MessageBuilder<Target> {
    /// Pushes an element to the target, rolling back on failure.
    ///
    /// The element is written by `push` while `inc` increases the matching
    /// header count. If either fails, the target is truncated back to its
    /// length before the attempt, so a partially appended element never
    /// remains in the message.
    fn push<Push, Inc>(&mut self, push: Push, inc: Inc) -> Result<(), PushError>
    where
        Push: FnOnce(&mut Target) -> Result<(), ShortBuf>,
        Inc: FnOnce(&mut HeaderCounts) -> Result<(), CountOverflow>,
    {
        let pos = self.target.as_ref().len();
        if let Err(err) = push(&mut self.target) {
            self.target.truncate(pos);
            return Err(From::from(err));
        }
        if inc(self.counts_mut()).is_err() {
            self.target.truncate(pos);
            return Err(PushError::CountOverflow);
        }
        Ok(())
    }
}

//--- AsRef

impl<Target> AsRef<Target> for MessageBuilder<Target> {
    fn as_ref(&self) -> &Target {
        self.as_target()
    }
}

impl<Target: AsRef<[u8]>> AsRef<[u8]> for MessageBuilder<Target> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//------------ QuestionBuilder -----------------------------------------------

/// Builds the question section of a DNS message.
///
/// A value of this type can be acquired by calling the `question` method
/// on [`MessageBuilder`]. You can push questions to the end of the section
/// via the [`push`][Self::push] method. Once you are done, you can
/// progress to the answer section via [`answer`][Self::answer] or finish
/// the message via [`finish`][Self::finish] or
/// [`into_message`][Self::into_message].
#[derive(Clone, Debug)]
pub struct QuestionBuilder<Target> {
    builder: MessageBuilder<Target>,
}

impl<Target: Composer> QuestionBuilder<Target> {
    /// Creates a new question builder from a message builder.
    fn new(builder: MessageBuilder<Target>) -> Self {
        Self { builder }
    }

    /// Appends a question to the question section.
    ///
    /// This method accepts anything that implements the
    /// [`ComposeQuestion`] trait. Apart from an actual
    /// [`Question`][super::question::Question] or a reference to it, this
    /// can also be a tuple of a domain name, record type, and class or, if
    /// the class is the usual IN, a pair of just the name and type.
    pub fn push(
        &mut self,
        question: impl ComposeQuestion,
    ) -> Result<(), PushError> {
        self.builder.push(
            |target| question.compose_question(target),
            HeaderCounts::inc_qdcount,
        )
    }

    /// Converts the question builder into an answer builder.
    pub fn answer(self) -> AnswerBuilder<Target> {
        AnswerBuilder::new(self.builder)
    }

    /// Converts the question builder into an authority builder.
    ///
    /// This will leave the answer section empty.
    pub fn authority(self) -> AuthorityBuilder<Target> {
        self.answer().authority()
    }

    /// Converts the question builder into an additional builder.
    ///
    /// This will leave the answer and authority sections empty.
    pub fn additional(self) -> AdditionalBuilder<Target> {
        self.answer().authority().additional()
    }

    /// Converts the question builder into the underlying target.
    pub fn finish(self) -> Target {
        self.builder.finish()
    }

    /// Converts the question builder into the final message.
    pub fn into_message(self) -> Message<Target::Octets>
    where
        Target: FreezeBuilder,
    {
        self.builder.into_message()
    }
}

//--- Deref and DerefMut

impl<Target> Deref for QuestionBuilder<Target> {
    type Target = MessageBuilder<Target>;

    fn deref(&self) -> &Self::Target {
        &self.builder
    }
}

impl<Target> DerefMut for QuestionBuilder<Target> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.builder
    }
}

//--- AsRef

impl<Target: AsRef<[u8]>> AsRef<[u8]> for QuestionBuilder<Target> {
    fn as_ref(&self) -> &[u8] {
        self.builder.as_slice()
    }
}

//------------ AnswerBuilder -------------------------------------------------

/// Builds the answer section of a DNS message.
///
/// A value of this type can be acquired by calling the `answer` method on
/// [`MessageBuilder`] or [`QuestionBuilder`]. You can push records to the
/// end of the section via the [`push`][Self::push] method.
#[derive(Clone, Debug)]
pub struct AnswerBuilder<Target> {
    builder: MessageBuilder<Target>,
}

impl<Target: Composer> AnswerBuilder<Target> {
    /// Creates a new answer builder from an underlying message builder.
    fn new(builder: MessageBuilder<Target>) -> Self {
        AnswerBuilder { builder }
    }

    /// Appends a record to the answer section.
    ///
    /// This method accepts anything that implements the [`ComposeRecord`]
    /// trait. Apart from record values and references, this includes
    /// tuples of an owner name, optional class, TTL, and record data.
    pub fn push(
        &mut self,
        record: impl ComposeRecord,
    ) -> Result<(), PushError> {
        self.builder.push(
            |target| record.compose_record(target),
            HeaderCounts::inc_ancount,
        )
    }

    /// Converts the answer builder into an authority builder.
    pub fn authority(self) -> AuthorityBuilder<Target> {
        AuthorityBuilder::new(self.builder)
    }

    /// Converts the answer builder into an additional builder.
    ///
    /// This will leave the authority section empty.
    pub fn additional(self) -> AdditionalBuilder<Target> {
        self.authority().additional()
    }

    /// Converts the answer builder into the underlying target.
    pub fn finish(self) -> Target {
        self.builder.finish()
    }

    /// Converts the answer builder into the final message.
    pub fn into_message(self) -> Message<Target::Octets>
    where
        Target: FreezeBuilder,
    {
        self.builder.into_message()
    }
}

//--- Deref and DerefMut

impl<Target> Deref for AnswerBuilder<Target> {
    type Target = MessageBuilder<Target>;

    fn deref(&self) -> &Self::Target {
        &self.builder
    }
}

impl<Target> DerefMut for AnswerBuilder<Target> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.builder
    }
}

//--- AsRef

impl<Target: AsRef<[u8]>> AsRef<[u8]> for AnswerBuilder<Target> {
    fn as_ref(&self) -> &[u8] {
        self.builder.as_slice()
    }
}

//------------ AuthorityBuilder ----------------------------------------------

/// Builds the authority section of a DNS message.
///
/// A value of this type can be acquired by calling the `authority` method
/// on any earlier builder. You can push records to the end of the section
/// via the [`push`][Self::push] method.
#[derive(Clone, Debug)]
pub struct AuthorityBuilder<Target> {
    builder: MessageBuilder<Target>,
}

impl<Target: Composer> AuthorityBuilder<Target> {
    /// Creates a new authority builder from an underlying message builder.
    fn new(builder: MessageBuilder<Target>) -> Self {
        AuthorityBuilder { builder }
    }

    /// Appends a record to the authority section.
    ///
    /// This method accepts anything that implements the [`ComposeRecord`]
    /// trait. Apart from record values and references, this includes
    /// tuples of an owner name, optional class, TTL, and record data.
    pub fn push(
        &mut self,
        record: impl ComposeRecord,
    ) -> Result<(), PushError> {
        self.builder.push(
            |target| record.compose_record(target),
            HeaderCounts::inc_nscount,
        )
    }

    /// Converts the authority builder into an additional builder.
    pub fn additional(self) -> AdditionalBuilder<Target> {
        AdditionalBuilder::new(self.builder)
    }

    /// Converts the authority builder into the underlying target.
    pub fn finish(self) -> Target {
        self.builder.finish()
    }

    /// Converts the authority builder into the final message.
    pub fn into_message(self) -> Message<Target::Octets>
    where
        Target: FreezeBuilder,
    {
        self.builder.into_message()
    }
}

//--- Deref and DerefMut

impl<Target> Deref for AuthorityBuilder<Target> {
    type Target = MessageBuilder<Target>;

    fn deref(&self) -> &Self::Target {
        &self.builder
    }
}

impl<Target> DerefMut for AuthorityBuilder<Target> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.builder
    }
}

//--- AsRef

impl<Target: AsRef<[u8]>> AsRef<[u8]> for AuthorityBuilder<Target> {
    fn as_ref(&self) -> &[u8] {
        self.builder.as_slice()
    }
}

//------------ AdditionalBuilder ---------------------------------------------

/// Builds the additional section of a DNS message.
///
/// A value of this type can be acquired by calling the `additional` method
/// on any earlier builder. You can push records to the end of the section
/// via the [`push`][Self::push] method.
#[derive(Clone, Debug)]
pub struct AdditionalBuilder<Target> {
    builder: MessageBuilder<Target>,
}

impl<Target: Composer> AdditionalBuilder<Target> {
    /// Creates a new additional builder from an underlying message builder.
    fn new(builder: MessageBuilder<Target>) -> Self {
        AdditionalBuilder { builder }
    }

    /// Appends a record to the additional section.
    ///
    /// This method accepts anything that implements the [`ComposeRecord`]
    /// trait. Apart from record values and references, this includes
    /// tuples of an owner name, optional class, TTL, and record data.
    pub fn push(
        &mut self,
        record: impl ComposeRecord,
    ) -> Result<(), PushError> {
        self.builder.push(
            |target| record.compose_record(target),
            HeaderCounts::inc_arcount,
        )
    }

    /// Converts the additional builder into the underlying target.
    pub fn finish(self) -> Target {
        self.builder.finish()
    }

    /// Converts the additional builder into the final message.
    pub fn into_message(self) -> Message<Target::Octets>
    where
        Target: FreezeBuilder,
    {
        self.builder.into_message()
    }
}

//--- Deref and DerefMut

impl<Target> Deref for AdditionalBuilder<Target> {
    type Target = MessageBuilder<Target>;

    fn deref(&self) -> &Self::Target {
        &self.builder
    }
}

impl<Target> DerefMut for AdditionalBuilder<Target> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.builder
    }
}

//--- AsRef

impl<Target: AsRef<[u8]>> AsRef<[u8]> for AdditionalBuilder<Target> {
    fn as_ref(&self) -> &[u8] {
        self.builder.as_slice()
    }
}

//------------ RecordSectionBuilder ------------------------------------------

/// A section builder for record sections.
///
/// This trait exists to allow code to work with any of the three record
/// section builders.
pub trait RecordSectionBuilder<Target: Composer> {
    /// Appends a record to a record section.
    fn push(&mut self, record: impl ComposeRecord) -> Result<(), PushError>;
}

impl<Target: Composer> RecordSectionBuilder<Target> for AnswerBuilder<Target> {
    fn push(&mut self, record: impl ComposeRecord) -> Result<(), PushError> {
        Self::push(self, record)
    }
}

impl<Target: Composer> RecordSectionBuilder<Target>
    for AuthorityBuilder<Target>
{
    fn push(&mut self, record: impl ComposeRecord) -> Result<(), PushError> {
        Self::push(self, record)
    }
}

impl<Target: Composer> RecordSectionBuilder<Target>
    for AdditionalBuilder<Target>
{
    fn push(&mut self, record: impl ComposeRecord) -> Result<(), PushError> {
        Self::push(self, record)
    }
}

//------------ StaticCompressor ----------------------------------------------

/// A domain name compressor that doesn't require an allocator.
///
/// This type wraps around a composer and implements domain name
/// compression. It does not require an allocator but because of that it
/// can only remember the position of up to 24 domain names. This should be
/// sufficient for most messages.
///
/// The position of a domain name is calculated relative to the beginning
/// of the underlying composer. This means that this builder must represent
/// the message only.
#[derive(Clone, Debug)]
pub struct StaticCompressor<Target> {
    /// The underlying target.
    target: Target,

    /// The domain names we have encountered so far.
    ///
    /// The value is the position of the domain name within the message.
    entries: [u16; 24],

    /// The number of used entries in `entries`.
    len: usize,
}

impl<Target> StaticCompressor<Target> {
    /// Creates a static compressor from a target.
    pub fn new(target: Target) -> Self {
        StaticCompressor {
            target,
            entries: Default::default(),
            len: 0,
        }
    }

    /// Returns a reference to the underlying target.
    pub fn as_target(&self) -> &Target {
        &self.target
    }

    /// Converts the static compressor into the underlying target.
    pub fn into_target(self) -> Target {
        self.target
    }

    /// Returns an octets slice of the content.
    pub fn as_slice(&self) -> &[u8]
    where
        Target: AsRef<[u8]>,
    {
        self.target.as_ref()
    }

    /// Returns a known position of a domain name if there is one.
    fn get<'a, N: Iterator<Item = &'a Label> + Clone>(
        &self,
        name: N,
    ) -> Option<u16>
    where
        Target: AsRef<[u8]>,
    {
        self.entries[..self.len].iter().find_map(|&pos| {
            if name
                .clone()
                .eq(Label::iter_slice(self.target.as_ref(), pos as usize))
            {
                Some(pos)
            } else {
                None
            }
        })
    }

    /// Inserts the position of a new domain name if possible.
    fn insert(&mut self, pos: usize) -> bool {
        if pos < 0xC000 && self.len < self.entries.len() {
            self.entries[self.len] = pos as u16;
            self.len += 1;
            true
        } else {
            false
        }
    }
}

//--- AsRef and AsMut

impl<Target: AsRef<[u8]>> AsRef<[u8]> for StaticCompressor<Target> {
    fn as_ref(&self) -> &[u8] {
        self.target.as_ref()
    }
}

impl<Target: AsMut<[u8]>> AsMut<[u8]> for StaticCompressor<Target> {
    fn as_mut(&mut self) -> &mut [u8] {
        self.target.as_mut()
    }
}

//--- OctetsBuilder, Composer, and FreezeBuilder

impl<Target: OctetsBuilder> OctetsBuilder for StaticCompressor<Target> {
    fn append_slice(&mut self, slice: &[u8]) -> Result<(), ShortBuf> {
        self.target.append_slice(slice)
    }

    fn truncate(&mut self, len: usize) {
        self.target.truncate(len);
        if len < 0xC000 {
            let len = len as u16;
            for i in 0..self.len {
                if self.entries[i] >= len {
                    self.len = i;
                    break;
                }
            }
        }
    }
}

impl<Target: Composer> Composer for StaticCompressor<Target> {
    fn append_compressed_dname<N: ToDname + ?Sized>(
        &mut self,
        name: &N,
    ) -> Result<(), ShortBuf> {
        let mut name = name.iter_labels().peekable();

        loop {
            // If the parent is root, just write that and return. Because
            // we do that, there will always be a label left here.
            if let Some(label) = name.peek() {
                if label.is_root() {
                    label.compose(self)?;
                    return Ok(());
                }
            }

            // If we already know this name, append it as a compressed
            // label.
            if let Some(pos) = self.get(name.clone()) {
                return (pos | 0xC000).compose(self);
            }

            // So we don't know the name. Try inserting it into the
            // compressor. If we can't insert anymore, just write out
            // what's left and return.
            if !self.insert(self.target.as_ref().len()) {
                for label in &mut name {
                    label.compose(self)?;
                }
                return Ok(());
            }

            // Advance to the parent.
            let label = name.next().expect("root is always last");
            label.compose(self)?;
        }
    }

    fn can_compress(&self) -> bool {
        true
    }
}

impl<Target: FreezeBuilder> FreezeBuilder for StaticCompressor<Target> {
    type Octets = Target::Octets;

    fn freeze(self) -> Self::Octets {
        self.target.freeze()
    }
}

//------------ TreeCompressor ------------------------------------------------

/// A domain name compressor that uses a tree.
///
/// This type wraps around a composer and implements domain name
/// compression for it. It stores the position of any domain name it has
/// seen in a binary tree.
///
/// The position of a domain name is calculated relative to the beginning
/// of the underlying composer. This means that this builder must represent
/// the message only.
#[derive(Clone, Debug)]
pub struct TreeCompressor<Target> {
    /// The underlying target.
    target: Target,

    /// The topmost node of our tree.
    start: Node,
}

/// A node in the tree of a tree compressor.
///
/// The tree follows the labels of the domain names from the root towards
/// the left. The root node is for the root label. Each node contains a map
/// from the label appearing immediately to the left of the name traced by
/// the path through the tree to the node for the name resulting from
/// adding this label, plus the position of that name in the message, if
/// it is known.
#[derive(Clone, Debug, Default)]
struct Node {
    /// The labels immediately to the left of this name and their nodes.
    parents: HashMap<Vec<u8>, Self>,

    /// The position of this name in the message.
    value: Option<u16>,
}

impl Node {
    fn drop_above(&mut self, len: u16) {
        self.value = match self.value {
            Some(value) if value < len => Some(value),
            _ => None,
        };
        self.parents
            .values_mut()
            .for_each(|node| node.drop_above(len))
    }
}

impl<Target> TreeCompressor<Target> {
    /// Creates a new tree compressor from an underlying target.
    pub fn new(target: Target) -> Self {
        TreeCompressor {
            target,
            start: Default::default(),
        }
    }

    /// Returns a reference to the underlying target.
    pub fn as_target(&self) -> &Target {
        &self.target
    }

    /// Converts the tree compressor into the underlying target.
    pub fn into_target(self) -> Target {
        self.target
    }

    /// Returns an octets slice of the content.
    pub fn as_slice(&self) -> &[u8]
    where
        Target: AsRef<[u8]>,
    {
        self.target.as_ref()
    }

    fn get<'a, N: Iterator<Item = &'a Label> + Clone>(
        &self,
        name: N,
    ) -> Option<u16> {
        let mut node = &self.start;
        for label in name {
            if label.is_root() {
                return node.value;
            }
            node = node.parents.get(label.as_slice())?;
        }
        None
    }

    fn insert<'a, N: Iterator<Item = &'a Label> + Clone>(
        &mut self,
        name: N,
        pos: usize,
    ) -> bool {
        if pos >= 0xC000 {
            return false;
        }
        let pos = pos as u16;
        let mut node = &mut self.start;
        for label in name {
            if label.is_root() {
                node.value = Some(pos);
                break;
            }
            node = node
                .parents
                .entry(label.as_slice().to_vec())
                .or_default();
        }
        true
    }
}

//--- AsRef and AsMut

impl<Target: AsRef<[u8]>> AsRef<[u8]> for TreeCompressor<Target> {
    fn as_ref(&self) -> &[u8] {
        self.target.as_ref()
    }
}

impl<Target: AsMut<[u8]>> AsMut<[u8]> for TreeCompressor<Target> {
    fn as_mut(&mut self) -> &mut [u8] {
        self.target.as_mut()
    }
}

//--- OctetsBuilder, Composer, and FreezeBuilder

impl<Target: OctetsBuilder> OctetsBuilder for TreeCompressor<Target> {
    fn append_slice(&mut self, slice: &[u8]) -> Result<(), ShortBuf> {
        self.target.append_slice(slice)
    }

    fn truncate(&mut self, len: usize) {
        self.target.truncate(len);
        if len < 0xC000 {
            self.start.drop_above(len as u16)
        }
    }
}

impl<Target: Composer> Composer for TreeCompressor<Target> {
    fn append_compressed_dname<N: ToDname + ?Sized>(
        &mut self,
        name: &N,
    ) -> Result<(), ShortBuf> {
        let mut name = name.iter_labels().peekable();

        loop {
            // If the parent is root, just write that and return. Because
            // we do that, there will always be a label left here.
            if let Some(label) = name.peek() {
                if label.is_root() {
                    label.compose(self)?;
                    return Ok(());
                }
            }

            // If we already know this name, append it as a compressed
            // label.
            if let Some(pos) = self.get(name.clone()) {
                return (pos | 0xC000).compose(self);
            }

            // So we don't know the name. Try inserting it into the
            // compressor. If we can't insert anymore, just write out
            // what's left and return.
            if !self.insert(name.clone(), self.target.as_ref().len()) {
                for label in &mut name {
                    label.compose(self)?;
                }
                return Ok(());
            }

            // Advance to the parent.
            let label = name.next().expect("root is always last");
            label.compose(self)?;
        }
    }

    fn can_compress(&self) -> bool {
        true
    }
}

impl<Target: FreezeBuilder> FreezeBuilder for TreeCompressor<Target> {
    type Octets = Target::Octets;

    fn freeze(self) -> Self::Octets {
        self.target.freeze()
    }
}

//============ Errors ========================================================

//------------ PushError -----------------------------------------------------

/// An error happened while pushing an element to a message builder.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PushError {
    /// The section count would overflow.
    CountOverflow,

    /// The target buffer is too short to contain the element.
    ShortBuf,
}

impl From<ShortBuf> for PushError {
    fn from(_: ShortBuf) -> Self {
        Self::ShortBuf
    }
}

impl fmt::Display for PushError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PushError::CountOverflow => f.write_str("counter overflow"),
            PushError::ShortBuf => f.write_str("buffer size exceeded"),
        }
    }
}

impl std::error::Error for PushError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::name::Dname;
    use crate::base::wire::Array;
    use crate::rdata::A;
    use core::str::FromStr;

    #[test]
    fn message_builder() {
        let name = Dname::<Vec<u8>>::from_str("example.com").unwrap();

        let mut msg = MessageBuilder::new_vec();
        msg.header_mut().set_rd(true);
        let mut msg = msg.question();
        msg.push((&name, Rtype::A)).unwrap();
        let mut msg = msg.answer();
        msg.push((&name, 86400, A::from_octets(192, 0, 2, 1))).unwrap();
        msg.push((&name, 86400, A::from_octets(192, 0, 2, 2))).unwrap();
        let mut msg = msg.authority();
        msg.push((&name, 0, A::from_octets(192, 0, 2, 3))).unwrap();
        let mut msg = msg.additional();
        msg.push((&name, 86400, A::from_octets(192, 0, 2, 4))).unwrap();

        let msg = msg.into_message();
        assert_eq!(msg.header_counts().qdcount(), 1);
        assert_eq!(msg.header_counts().ancount(), 2);
        assert_eq!(msg.header_counts().nscount(), 1);
        assert_eq!(msg.header_counts().arcount(), 1);

        let q = msg.first_question().unwrap();
        assert_eq!(q.qname(), &name);
        assert_eq!(q.qtype(), Rtype::A);

        let section = msg.answer().unwrap();
        let mut records = section.limit_to::<A>();
        assert_eq!(
            records.next().unwrap().unwrap().data(),
            &A::from_octets(192, 0, 2, 1)
        );
        assert_eq!(
            records.next().unwrap().unwrap().data(),
            &A::from_octets(192, 0, 2, 2)
        );

        let section = msg.authority().unwrap();
        let mut records = section.limit_to::<A>();
        let rr = records.next().unwrap().unwrap();
        assert_eq!(rr.owner(), &name);
        assert_eq!(rr.ttl().as_secs(), 0);
    }

    fn create_compressed<T: Composer>(target: T) -> T {
        let mut msg =
            MessageBuilder::from_target(target).unwrap().question();
        let question_name =
            Dname::<Vec<u8>>::from_str("example.com").unwrap();
        msg.push((&question_name, Rtype::A)).unwrap();
        let mut msg = msg.answer();
        msg.push((
            Dname::<Vec<u8>>::from_str("www.example.com").unwrap(),
            86400,
            A::from_octets(192, 0, 2, 1),
        ))
        .unwrap();
        msg.push((&question_name, 86400, A::from_octets(192, 0, 2, 2)))
            .unwrap();
        msg.finish()
    }

    #[test]
    fn compressor() {
        // A question for `example.com. A` and two answers whose names can
        // reuse the question's name.
        let expect: &[u8] = &[
            0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00,
            0x00, 0x00, // header
            0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c',
            b'o', b'm', 0x00, 0x00, 0x01, 0x00, 0x01, // question
            0x03, b'w', b'w', b'w', 0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01,
            0x00, 0x01, 0x51, 0x80, 0x00, 0x04, 0xc0, 0x00, 0x02,
            0x01, // www.example.com. A
            0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01, 0x00, 0x01, 0x51, 0x80,
            0x00, 0x04, 0xc0, 0x00, 0x02, 0x02, // example.com. A
        ];

        let msg = create_compressed(StaticCompressor::new(Vec::new()));
        assert_eq!(expect, msg.as_ref());

        let msg = create_compressed(TreeCompressor::new(Vec::new()));
        assert_eq!(expect, msg.as_ref());

        // The compressed message parses back to the full names.
        let msg = Message::from_octets_checked(msg.as_slice()).unwrap();
        let rr = msg
            .answer()
            .unwrap()
            .limit_to::<A>()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(
            rr.owner(),
            &Dname::<Vec<u8>>::from_str("www.example.com").unwrap()
        );
    }

    #[test]
    fn push_rollback_on_full_target() {
        let mut msg = MessageBuilder::from_target(Array::<40>::new())
            .unwrap()
            .question();
        msg.push((
            Dname::<Vec<u8>>::from_str("example.com").unwrap(),
            Rtype::A,
        ))
        .unwrap();
        let len = msg.as_slice().len();
        let mut msg = msg.answer();
        assert_eq!(
            msg.push((
                Dname::<Vec<u8>>::from_str("example.com").unwrap(),
                86400,
                A::from_octets(192, 0, 2, 1),
            )),
            Err(PushError::ShortBuf)
        );

        // A failed push leaves neither partial data nor a changed count.
        assert_eq!(msg.as_slice().len(), len);
        assert_eq!(msg.counts().ancount(), 0);
    }

    #[test]
    fn start_answer() {
        let mut query = MessageBuilder::new_vec().question();
        query
            .push((
                Dname::<Vec<u8>>::from_str("example.com").unwrap(),
                Rtype::A,
            ))
            .unwrap();
        let query = query.into_message();

        let answer = MessageBuilder::new_vec()
            .start_answer(&query, Rcode::NXDOMAIN)
            .unwrap();
        let answer = answer.into_message();
        assert!(answer.is_answer(&query));
        assert_eq!(answer.header().rcode(), Rcode::NXDOMAIN);
        assert_eq!(answer.header_counts().qdcount(), 1);
    }
}
