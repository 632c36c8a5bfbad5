//! A DNS message wire-format codec for Rust.
//!
//! This crate converts between in-memory representations of DNS messages
//! and their binary wire format as defined in [RFC 1035], and back. It
//! covers the parts of that job that are genuinely hard to get right:
//! faithfully implementing the binary layout including domain name
//! compression, computing rather than trusting length fields, keeping or
//! normalizing case where individual record types demand it, and doing all
//! of this against adversarial input without ever reading or writing out
//! of bounds.
//!
//! # Modules
//!
//! * [base] contains the generic machinery: the wire-format substrate,
//!   domain names, the message header, questions and records, and the
//!   [`Message`][base::Message] and
//!   [`MessageBuilder`][base::MessageBuilder] types for taking messages
//!   apart and putting them together.
//! * [rdata] contains the record data implementations for the record
//!   types known to the crate, most prominently the NSEC3 family, plus
//!   the [`AllRecordData`][rdata::AllRecordData] enum dispatching between
//!   them with an opaque fallback for everything else.
//! * [utils] contains the base16 and base32hex text codecs used by the
//!   presentation format of binary record fields.
//!
//! Everything is synchronous and free of shared state: packing and
//! unpacking are pure functions of their input, so values can be used
//! from as many threads as desired as long as each individual value is
//! only mutated from one of them.
//!
//! Transport is out of scope. In particular, the two octet length prefix
//! used by stream transports such as TCP belongs to the transport layer;
//! the codec neither reads nor writes it.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

pub mod base;
pub mod rdata;
pub mod utils;
