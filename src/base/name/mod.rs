//! Domain names.
//!
//! This module provides the domain name machinery of the crate: [`Dname`]
//! for uncompressed, absolute names owned by the caller, [`ParsedDname`]
//! for names parsed out of a DNS message which may be compressed, and the
//! [`ToDname`] trait connecting the two wherever a name is accepted.
//!
//! Domain names are sequences of [`Label`]s of up to 63 octets each, with
//! a total wire length of at most 255 octets including the length octets
//! and the final root label. Comparisons between names and labels ignore
//! ASCII case; the stored octets keep whatever case they were created
//! with.

pub use self::builder::{DnameBuilder, FromStrError, PushError};
pub use self::dname::{Dname, DnameError, DnameIter};
pub use self::label::{
    Label, LabelTypeError, LongLabelError, SliceLabelsIter, SplitLabelError,
};
pub use self::parsed::{ParsedDname, ParsedDnameError, ParsedDnameIter};
pub use self::traits::{ToDname, ToLabelIter};

mod builder;
mod dname;
mod label;
mod parsed;
mod traits;
