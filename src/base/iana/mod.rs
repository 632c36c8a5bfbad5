//! Wrappers for the parameter values maintained by IANA.
//!
//! A number of fields in DNS messages carry integer values whose meaning
//! is curated by IANA. Each of these gets its own newtype here so the
//! compiler can keep, say, record types and classes apart. The types all
//! follow the same pattern: well-known values are associated constants,
//! any other value remains representable.

#[macro_use]
mod macros;

pub use self::class::Class;
pub use self::nsec3::Nsec3HashAlgorithm;
pub use self::opcode::Opcode;
pub use self::rcode::Rcode;
pub use self::rtype::Rtype;

pub mod class;
pub mod nsec3;
pub mod opcode;
pub mod rcode;
pub mod rtype;
