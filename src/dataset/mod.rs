//! # Dataset Module
//!
//! Assembles the numeric datasets of an entry: one [`Dataset`] per
//! (entry, SubEntry, footnote pointer).
//!
//! Each dataset joins the merged bibliography of SubEntry 001 and its own
//! SubEntry, the reaction measured under the pointer, its monitors, and a
//! table built from the COMMON sections (entry-level, then SubEntry-level)
//! followed by the DATA section. Columns tagged with another pointer are left
//! out.
//!
//! The reaction's quantity codes pick a [`QuantityClass`] from an ordered
//! table. Cross sections, spectrum averages, nubar, angular and energy
//! distributions can be *simplified* into canonical columns:
//!
//! ```text
//! Energy        Data          d(Energy)     d(Data)
//! MeV           barns         MeV           barns
//! ```
//!
//! ## Failure isolation
//!
//! [`extract_datasets`] never fails as a whole. Every dataset that cannot be
//! built, because its REACTION does not parse, a cell is broken, or a
//! required quantity is missing, is recorded in [`ExtractionReport::errors`]
//! under its key while the siblings are built normally.
//!
//! ## Example
//!
//! ```rust,no_run
//! use exfor::dataset::{extract_request, ExtractConfig};
//!
//! let text = std::fs::read_to_string("request.x4")?;
//! let lines: Vec<&str> = text.lines().collect();
//! let config = ExtractConfig::default().with_simplify(true).with_make_all_columns(true);
//!
//! let report = extract_request(&lines, &config);
//! for (key, dataset) in &report.datasets {
//!     println!("{key}\n{dataset}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod classify;
mod config;
mod error;
mod extract;
mod metadata;
mod render;
mod simplify;
mod types;


pub use classify::QuantityClass;
pub use config::ExtractConfig;
pub use error::DatasetError;
pub use extract::{extract_batch, extract_datasets, extract_request, DatasetKey, ExtractionReport};
pub use metadata::{BibMetadata, EntryMetadata, COMMENT};
pub use render::{format_cell, format_float};
pub use types::Dataset;
