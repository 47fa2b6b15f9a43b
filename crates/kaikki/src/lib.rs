//! Models, reads and interprets the kaikki.org Wiktionary extract.
//!
//! The extract is a large file with one JSON object per line, so it is always streamed
//! record by record with [`Records`] instead of being deserialized in one go.

pub mod classify;
pub mod reader;
pub mod record;

pub use reader::{RawRecord, ReadError, Records};
pub use record::{Form, Record, Sense, Term};
