//! Handling of DNS data.
//!
//! This module provides types and traits for working with DNS data. The
//! types allow creating such data from scratch and processing it. Crucially,
//! the module provides means to extract the data from and encode it into
//! its wire format, the binary representation exchanged between name
//! servers and resolvers.
//!
//! The fundamental types are [`Message`] for decoding messages received
//! from the wire and [`MessageBuilder`] for assembling new messages. Both
//! are built from the same parts: the [`header`] section, [`Question`]s,
//! and [`Record`]s whose type-specific data lives in the
//! [rdata][crate::rdata] module. Domain names get their own family of
//! types in [`name`], and the low-level parsing and composing machinery
//! everything rests on lives in [`wire`].

pub use self::cmp::CanonicalOrd;
pub use self::header::{Flags, Header, HeaderCounts, HeaderSection};
pub use self::iana::{Class, Opcode, Rcode, Rtype};
pub use self::message::{Message, QuestionSection, RecordSection, Section};
pub use self::message_builder::{
    AdditionalBuilder, AnswerBuilder, AuthorityBuilder, MessageBuilder,
    QuestionBuilder, RecordSectionBuilder, StaticCompressor, TreeCompressor,
};
pub use self::name::{Dname, Label, ParsedDname, ToDname};
pub use self::question::Question;
pub use self::record::{ParsedRecord, Record, RecordHeader, Ttl};
pub use self::wire::{Composer, ParseError, Parser};

pub mod cmp;
pub mod header;
pub mod iana;
pub mod message;
pub mod message_builder;
pub mod name;
pub mod question;
pub mod rdata;
pub mod record;
pub mod wire;
