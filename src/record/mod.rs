//! # Record Tokenizer Module
//!
//! Splits raw EXFOR text into its record hierarchy:
//!
//! ```text
//! ENTRY            E0783
//! SUBENT        E0783001
//! BIB                 10         19
//! TITLE       ACCELERATION OF PROTONS AND DEUTERONS POLARIZED IN
//! ...
//! ENDBIB              19
//! COMMON               1          1
//! EN
//! MEV
//! 56.
//! ENDCOMMON            3
//! ENDSUBENT
//! ENDENTRY
//! ```
//!
//! Columns 1-10 of every line hold a tag, column 11 an optional footnote
//! pointer and columns 12-66 the payload. An [`Entry`] owns its
//! [`SubEntry`] records; each SubEntry owns an optional [`Bib`] of raw
//! [`PlainField`]s and optional COMMON and DATA [`Table`]s.
//!
//! Tokenizing is purely structural. BIB fields stay raw until an interpreter
//! from [`crate::fields`] reads them and table cells stay text until
//! [`Table::value`] decodes them, so a bad field or cell only fails its own
//! readers. Structural damage (a section without its END line, a row count
//! matching no known convention) fails the whole entry.
//!
//! Every type renders back to EXFOR text with `exfor_style()`.

mod bib;
mod entry;
mod error;
mod field;
mod number;
mod request;
mod subentry;
mod table;


pub use bib::Bib;
pub use entry::{entry_accession, Entry, DELETED_MARKER};
pub use error::RecordError;
pub use field::{PlainField, LINE_WIDTH, NO_POINTER, POINTER_COLUMN, TAG_WIDTH};
pub use number::parse_fortran_number;
pub use request::split_request;
pub use subentry::SubEntry;
pub use table::{Table, TableKind, CELLS_PER_LINE, CELL_WIDTH};
