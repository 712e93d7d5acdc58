//! # Column Matching Module
//!
//! Finds physical quantities in the labeled, unit-tagged columns of an EXFOR
//! table and converts them to canonical units.
//!
//! The same quantity is written many ways: an incident energy may be a plain
//! `EN` column with an `EN-ERR` column in percent, a pair of `EN-MIN`/`EN-MAX`
//! bounds, or an `EN` column with a resolution width. Each [`Quantity`] carries
//! an ordered list of [`PairMatcher`] strategies; each strategy is tried on the
//! table and the results are condensed row by row, the first strategy that has
//! a value for a row winning.
//!
//! ## Example
//!
//! ```rust
//! use exfor::columns::{Quantity, TableView};
//!
//! struct Bounds;
//!
//! impl TableView for Bounds {
//!     fn labels(&self) -> &[String] {
//!         static LABELS: std::sync::OnceLock<Vec<String>> = std::sync::OnceLock::new();
//!         LABELS.get_or_init(|| vec!["EN-MIN".into(), "EN-MAX".into()])
//!     }
//!     fn units(&self) -> &[String] {
//!         static UNITS: std::sync::OnceLock<Vec<String>> = std::sync::OnceLock::new();
//!         UNITS.get_or_init(|| vec!["KEV".into(), "KEV".into()])
//!     }
//!     fn numrows(&self) -> usize {
//!         1
//!     }
//!     fn cell(&self, _row: usize, col: usize) -> Option<f64> {
//!         Some(if col == 0 { 10.0 } else { 12.0 })
//!     }
//! }
//!
//! let (energy, error) = Quantity::IncidentEnergy.extract(&Bounds, false).unwrap();
//! assert_eq!(energy.unit.as_deref(), Some("MeV"));
//! assert!((energy.values[0].unwrap() - 0.011).abs() < 1e-12);
//! assert!((error.values[0].unwrap() - 0.001).abs() < 1e-12);
//! ```

mod error;
mod matcher;
mod pair;
mod quantity;
mod units;


pub use error::ColumnError;
pub use matcher::ColumnMatcher;
pub use pair::PairMatcher;
pub use quantity::Quantity;
pub use units::{convert_unit, UnitFamily, PERCENT};

use serde::Serialize;

/// Read access to a labeled numeric table
pub trait TableView {
    /// Column labels
    fn labels(&self) -> &[String];

    /// Column units, parallel to [`TableView::labels`]
    fn units(&self) -> &[String];

    /// Number of rows
    fn numrows(&self) -> usize;

    /// Value at `row`, `col`; `None` when blank or out of range
    fn cell(&self, row: usize, col: usize) -> Option<f64>;

    /// Number of columns
    fn numcols(&self) -> usize {
        self.labels().len()
    }
}

/// One extracted column: a header and a value per row
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Column {
    /// Label of the source column
    pub label: Option<String>,
    /// Canonical unit
    pub unit: Option<String>,
    /// Values, `None` where missing
    pub values: Vec<Option<f64>>,
}

impl Column {
    /// Column with a header
    pub fn new(label: impl Into<String>, unit: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: Some(label.into()),
            unit: Some(unit.into()),
            values,
        }
    }

    /// A headerless column of `numrows` missing values
    pub fn empty(numrows: usize) -> Self {
        Self {
            label: None,
            unit: None,
            values: vec![None; numrows],
        }
    }

    /// New values under the header of the last source column that has one
    pub fn headed_by(sources: &[&Column], values: Vec<Option<f64>>) -> Self {
        let mut column = Self {
            values,
            ..Self::default()
        };
        for source in sources {
            if source.label.is_some() {
                column.label = source.label.clone();
            }
            if source.unit.is_some() {
                column.unit = source.unit.clone();
            }
        }
        column
    }

    /// Value at `row`, `None` past the end
    pub fn at(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied().flatten()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when no row has a value
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Absolute values
    pub fn abs(mut self) -> Self {
        for value in self.values.iter_mut().flatten() {
            *value = value.abs();
        }
        self
    }
}

/// Merge columns row by row, keeping the first value present.
///
/// The header comes from the first column that has one.
pub fn condense(columns: Vec<Column>, numrows: usize) -> Column {
    let mut merged = Column::empty(numrows);
    for column in columns {
        if merged.label.is_none() {
            merged.label = column.label;
        }
        if merged.unit.is_none() {
            merged.unit = column.unit;
        }
        for (slot, value) in merged.values.iter_mut().zip(column.values) {
            if slot.is_none() {
                *slot = value;
            }
        }
    }
    merged
}
