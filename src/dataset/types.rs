use std::cmp::Ordering;
use std::fmt::Display;

use serde::{Serialize, Serializer};

use crate::columns::TableView;
use crate::fields::Monitor;
use crate::reaction::Measurement;
use crate::record::Table;

use super::{BibMetadata, DatasetError, QuantityClass};

/// Labels and units are cut to this many characters
const HEADING_WIDTH: usize = 10;

/// One measurement: merged bibliography, the reaction and a numeric table
/// whose columns come from COMMON and DATA sections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    /// Merged entry and SubEntry bibliography
    pub meta: BibMetadata,
    /// Kind of data, from the reaction's quantity codes
    pub class: QuantityClass,
    /// What is measured
    #[serde(serialize_with = "display_option")]
    pub reaction: Option<Measurement>,
    /// Free text after the reaction
    pub reaction_comment: String,
    /// Monitor reactions
    #[serde(serialize_with = "display_list")]
    pub monitors: Vec<Monitor>,
    /// Reference frame of angular and energy distributions
    pub frame: Option<String>,
    /// Column labels
    pub labels: Vec<String>,
    /// Column units
    pub units: Vec<String>,
    /// Rows of values, `None` where missing
    pub data: Vec<Vec<Option<f64>>>,
    /// Set once the columns are reduced to canonical quantities
    pub simplified: bool,
}

fn display_option<T: Display, S: Serializer>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.collect_str(value),
        None => serializer.serialize_none(),
    }
}

fn display_list<S: Serializer>(values: &[Monitor], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(ToString::to_string))
}

fn heading(text: &str) -> String {
    text.chars().take(HEADING_WIDTH).collect::<String>().trim().to_string()
}

/// Missing values sort first
fn compare_cells(a: &Option<f64>, b: &Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

impl Dataset {
    /// An empty dataset of the given class
    pub fn new(class: QuantityClass) -> Self {
        Self {
            meta: BibMetadata::default(),
            class,
            reaction: None,
            reaction_comment: String::new(),
            monitors: Vec::new(),
            frame: None,
            labels: Vec::new(),
            units: Vec::new(),
            data: Vec::new(),
            simplified: false,
        }
    }

    /// Attach merged bibliographic metadata
    pub fn with_meta(mut self, meta: BibMetadata) -> Self {
        self.meta = meta;
        self
    }

    /// Attach the measured reaction and its free-text comment
    pub fn with_reaction(mut self, reaction: Measurement, comment: impl Into<String>) -> Self {
        self.reaction = Some(reaction);
        self.reaction_comment = comment.into();
        self
    }

    /// Attach the monitor reactions
    pub fn with_monitors(mut self, monitors: Vec<Monitor>) -> Self {
        self.monitors = monitors;
        self
    }

    /// Fill the table from COMMON sections (entry-level first) and a DATA section.
    ///
    /// Columns tagged with a pointer other than `pointer` are left out; a table
    /// without any column pointers contributes every column. A one-row COMMON
    /// is copied into every row, a longer one row by row.
    pub fn set_data(
        &mut self,
        data: &Table,
        common: &[Option<&Table>],
        pointer: char,
    ) -> Result<(), DatasetError> {
        let kept = |table: &Table| -> Vec<usize> {
            let unpointed = table.pointers().is_empty();
            (0..table.numcols())
                .filter(|&icol| unpointed || table.column_pointers[icol].map_or(true, |p| p == pointer))
                .collect()
        };

        self.labels.clear();
        self.units.clear();
        let numrows = data.numrows();
        let mut rows: Vec<Vec<Option<f64>>> = vec![Vec::new(); numrows];

        for table in common.iter().flatten().copied() {
            let columns = kept(table);
            self.push_headings(table, &columns);
            if table.numrows() == 1 {
                let values = columns
                    .iter()
                    .map(|&icol| table.value(0, icol))
                    .collect::<Result<Vec<_>, _>>()?;
                for row in rows.iter_mut() {
                    row.extend_from_slice(&values);
                }
            } else {
                for (irow, row) in rows.iter_mut().enumerate() {
                    for &icol in &columns {
                        let value = if irow < table.numrows() {
                            table.value(irow, icol)?
                        } else {
                            None
                        };
                        row.push(value);
                    }
                }
            }
        }

        let columns = kept(data);
        self.push_headings(data, &columns);
        for (irow, row) in rows.iter_mut().enumerate() {
            for &icol in &columns {
                row.push(data.value(irow, icol)?);
            }
        }
        self.data = rows;

        if self.class.has_frame() {
            let frame = if self.labels.iter().any(|l| l.contains("-CM")) {
                "Center of mass"
            } else {
                "Lab"
            };
            self.frame = Some(frame.to_string());
        }
        Ok(())
    }

    fn push_headings(&mut self, table: &Table, columns: &[usize]) {
        for &icol in columns {
            self.labels.push(heading(&table.labels[icol]));
            self.units.push(heading(&table.units[icol]));
        }
    }

    /// Number of rows
    pub fn numrows(&self) -> usize {
        self.data.len()
    }

    /// Number of columns
    pub fn numcols(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset has no columns and no rows
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.units.is_empty() && self.data.is_empty()
    }

    /// Value at `row`, `col`
    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row)?.get(col).copied().flatten()
    }

    /// Label of column `col`
    pub fn label(&self, col: usize) -> Option<&str> {
        self.labels.get(col).map(String::as_str)
    }

    /// Unit of column `col`
    pub fn unit(&self, col: usize) -> Option<&str> {
        self.units.get(col).map(String::as_str)
    }

    /// Index of the first column with this label
    pub fn find_label(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Values of one column
    pub fn column(&self, col: usize) -> Vec<Option<f64>> {
        (0..self.numrows()).map(|row| self.cell(row, col)).collect()
    }

    /// Sort rows in place, comparing whole rows column by column
    pub fn sort(&mut self) {
        self.data.sort_by(|a, b| {
            a.iter()
                .zip(b)
                .map(|(x, y)| compare_cells(x, y))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len()))
        });
    }

    /// Sort rows in place by one column; rows missing the value come first
    pub fn sort_by_column(&mut self, col: usize) {
        self.data
            .sort_by(|a, b| compare_cells(&a.get(col).copied().flatten(), &b.get(col).copied().flatten()));
    }

    /// Append the rows of `other`.
    ///
    /// An empty dataset takes over everything from `other`. Otherwise labels,
    /// units and reaction must agree.
    pub fn append(&mut self, other: &Dataset) -> Result<(), DatasetError> {
        if self.is_empty() {
            self.reaction = other.reaction.clone();
            self.reaction_comment = other.reaction_comment.clone();
            self.monitors = other.monitors.clone();
            self.frame = other.frame.clone();
            self.labels = other.labels.clone();
            self.units = other.units.clone();
            self.data = other.data.clone();
            self.simplified = other.simplified;
            return Ok(());
        }

        let reaction = |d: &Dataset| d.reaction.as_ref().map(ToString::to_string);
        let mut why = Vec::new();
        if self.labels != other.labels {
            why.push(format!("Labels don't match: {:?}, {:?}", self.labels, other.labels));
        }
        if self.units != other.units {
            why.push(format!("Units don't match: {:?}, {:?}", self.units, other.units));
        }
        if reaction(self) != reaction(other) {
            why.push(format!(
                "Reactions don't match: {}, {}",
                reaction(self).unwrap_or_default(),
                reaction(other).unwrap_or_default()
            ));
        }
        if !why.is_empty() {
            return Err(DatasetError::Incompatible(why.join("; ")));
        }
        self.data.extend(other.data.iter().cloned());
        Ok(())
    }
}

impl TableView for Dataset {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn units(&self) -> &[String] {
        &self.units
    }

    fn numrows(&self) -> usize {
        self.data.len()
    }

    fn cell(&self, row: usize, col: usize) -> Option<f64> {
        Dataset::cell(self, row, col)
    }
}
