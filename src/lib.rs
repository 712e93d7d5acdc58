//! # exfor - A Decoder for the EXFOR Nuclear Reaction Data Format
//!
//! `exfor` reads EXFOR, the fixed-column text exchange format used by the
//! nuclear data centres to publish experimental nuclear reaction measurements,
//! into a typed in-memory model and re-derives unit-normalized data tables
//! (energy, cross section, angle, uncertainty) from the many historical column
//! naming conventions.
//!
//! ## Key Features
//!
//! - **Record Tokenizer**: ENTRY → SUBENT → {BIB, COMMON, DATA} with 11-column tag
//!   alignment, multi-line continuation and footnote pointers. Every section
//!   re-serializes to EXFOR text that tokenizes back to the same model.
//!
//! - **Reaction Grammar**: nuclides, isomers, particles, chemical compounds and the
//!   recursive reaction-combination expressions (`+ - * / // =`), with residual
//!   nuclides inferred from Z/A conservation.
//!
//! - **Field Interpreters**: REACTION, MONITOR, REFERENCE, AUTHOR, INSTITUTE and
//!   TITLE fields turned into structured values.
//!
//! - **Column Matching**: value/uncertainty columns located by label and unit,
//!   converted to MeV, barns and degrees, with uncertainties combined from
//!   symmetric, high/low, high-mid-low, percent and quadrature encodings.
//!
//! - **Dataset Assembly**: one dataset per (entry, subentry, pointer); a failure in
//!   one dataset is recorded in an error map and never aborts its siblings.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exfor::dataset::{extract_datasets, ExtractConfig};
//! use exfor::record::Entry;
//!
//! let text = std::fs::read_to_string("E0783.x4")?;
//! let lines: Vec<&str> = text.lines().collect();
//! let entry = Entry::parse("E0783", &lines)?;
//!
//! let report = extract_datasets(&entry, &ExtractConfig::default().with_simplify(true));
//! for (key, dataset) in &report.datasets {
//!     println!("{key}: {} rows", dataset.numrows());
//! }
//! for (key, message) in &report.errors {
//!     eprintln!("{key}: {message}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a pipeline, leaf first:
//!
//! - [`dictionary`]: fixed-column code dictionaries (institutes, quantities, ...)
//! - [`particle`]: elements, particles, nuclides and isomer tags
//! - [`reaction`]: reaction processes, quantities and reaction combinations
//! - [`record`]: the ENTRY/SUBENT/BIB/COMMON/DATA tokenizer
//! - [`fields`]: interpreters for individual BIB fields
//! - [`columns`]: column matchers, uncertainty strategies and unit conversion
//! - [`dataset`]: dataset assembly, simplification and rendering

// Documentation lints
#![warn(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
// Allow some patterns common in scientific code
#![allow(clippy::too_many_arguments)]

pub mod columns;
pub mod dataset;
pub mod dictionary;
pub mod fields;
pub mod particle;
pub mod reaction;
pub mod record;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::columns::{ColumnError, ColumnMatcher, PairMatcher, Quantity, UnitFamily};
    pub use crate::dataset::{
        extract_datasets, Dataset, DatasetError, DatasetKey, ExtractConfig, ExtractionReport,
        QuantityClass,
    };
    pub use crate::dictionary::{CodeDictionary, Dictionaries, DictionaryError, DictionaryKind};
    pub use crate::fields::{Field, FieldError, FieldKind};
    pub use crate::particle::{IsomerTag, Nucleus, Particle, ParticleError};
    pub use crate::reaction::{Measurement, Process, Reaction, ReactionError, ReactionExpr};
    pub use crate::record::{Entry, PlainField, RecordError, SubEntry, Table};
}
