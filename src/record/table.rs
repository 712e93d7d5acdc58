use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::Serialize;

use super::field::{columns, line_tag, LINE_WIDTH};
use super::number::parse_fortran_number;
use super::RecordError;

/// Width of one table cell
pub const CELL_WIDTH: usize = 11;
/// Cells per physical line
pub const CELLS_PER_LINE: usize = 6;

/// Which table a section holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TableKind {
    /// Constants shared by every DATA row
    Common,
    /// The per-row measurement table
    Data,
}

impl TableKind {
    /// Section tag
    pub fn tag(self) -> &'static str {
        match self {
            TableKind::Common => "COMMON",
            TableKind::Data => "DATA",
        }
    }

    pub(crate) fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "COMMON" => Some(TableKind::Common),
            "DATA" => Some(TableKind::Data),
            _ => None,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A COMMON or DATA section
///
/// Cells are kept as raw text and decoded on access, so a broken number only
/// fails the readers of its own column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// COMMON or DATA
    pub kind: TableKind,
    /// Column labels without their pointer character
    pub labels: Vec<String>,
    /// Column units
    pub units: Vec<String>,
    /// Footnote pointer of each column, if any
    pub column_pointers: Vec<Option<char>>,
    /// Raw cell text, `numrows` rows of `numcols` cells
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Tokenize a section, header line and END line included.
    ///
    /// The header declares the column and row counts. Three conventions for the
    /// row count are accepted, in this order: data rows only, data rows plus the
    /// two heading rows, and physical lines between header and END line.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, RecordError> {
        let first = lines.first().map(|l| l.as_ref()).unwrap_or_default();
        let tag = line_tag(first);
        let kind = TableKind::from_tag(&tag).ok_or_else(|| RecordError::MalformedHeader {
            tag: tag.clone(),
            line: first.to_string(),
        })?;
        let malformed = || RecordError::MalformedHeader {
            tag: tag.clone(),
            line: first.to_string(),
        };

        // everything past column 33 is free text
        let header = columns(first, 0, 33);
        let mut counts = header.split_whitespace().skip(1);
        let numcols: usize = counts
            .next()
            .and_then(|n| n.parse().ok())
            .ok_or_else(malformed)?;
        let declared: usize = counts
            .next()
            .and_then(|n| n.parse().ok())
            .ok_or_else(malformed)?;
        // no convention fits more rows or columns than the section has cells
        let capacity = lines.len().saturating_mul(CELLS_PER_LINE);
        if numcols == 0 || numcols > capacity || declared > capacity {
            return Err(malformed());
        }

        let lpr = (numcols - 1) / CELLS_PER_LINE + 1;
        let numrows = resolve_row_count(kind, lines.len(), declared, lpr, malformed)?;

        // collapse each logical row into one string of numcols cells
        let body = &lines[1..lines.len() - 1];
        let logical: Vec<String> = body
            .chunks(lpr)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|line| columns(line.as_ref(), 0, LINE_WIDTH))
                    .collect::<String>()
            })
            .collect();
        let cell = |row: &str, j: usize| columns(row, CELL_WIDTH * j, CELL_WIDTH * (j + 1));

        let mut labels = Vec::with_capacity(numcols);
        let mut units = Vec::with_capacity(numcols);
        let mut column_pointers = Vec::with_capacity(numcols);
        for j in 0..numcols {
            let raw = cell(&logical[0], j);
            let trimmed = raw.trim();
            // a label filling all 11 characters ends with its pointer
            if trimmed.chars().count() == CELL_WIDTH {
                let pointer = trimmed.chars().last();
                labels.push(trimmed.chars().take(CELL_WIDTH - 1).collect::<String>().trim().to_string());
                column_pointers.push(pointer);
            } else {
                labels.push(trimmed.to_string());
                column_pointers.push(None);
            }
            units.push(cell(&logical[1], j).trim().to_string());
        }

        let rows = logical[2..2 + numrows]
            .iter()
            .map(|row| (0..numcols).map(|j| cell(row, j).trim().to_string()).collect())
            .collect();

        Ok(Self {
            kind,
            labels,
            units,
            column_pointers,
            rows,
        })
    }

    /// Build a table from already split columns
    pub fn new(
        kind: TableKind,
        labels: Vec<String>,
        units: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        let column_pointers = vec![None; labels.len()];
        Self {
            kind,
            labels,
            units,
            column_pointers,
            rows,
        }
    }

    /// Number of columns
    pub fn numcols(&self) -> usize {
        self.labels.len()
    }

    /// Number of data rows
    pub fn numrows(&self) -> usize {
        self.rows.len()
    }

    /// Physical lines per logical row
    pub fn lines_per_row(&self) -> usize {
        self.numcols().saturating_sub(1) / CELLS_PER_LINE + 1
    }

    /// Column indices carrying each pointer
    pub fn pointers(&self) -> BTreeMap<char, Vec<usize>> {
        let mut map: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        for (j, pointer) in self.column_pointers.iter().enumerate() {
            if let Some(p) = pointer {
                map.entry(*p).or_default().push(j);
            }
        }
        map
    }

    /// Raw text of one cell
    pub fn raw(&self, row: usize, col: usize) -> Result<&str, RecordError> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .ok_or(RecordError::CellOutOfRange {
                row,
                col,
                numrows: self.numrows(),
                numcols: self.numcols(),
            })
    }

    /// Decoded value of one cell; blank cells are `None`
    pub fn value(&self, row: usize, col: usize) -> Result<Option<f64>, RecordError> {
        parse_fortran_number(self.raw(row, col)?)
    }

    /// Decoded values of one column
    pub fn column(&self, col: usize) -> Result<Vec<Option<f64>>, RecordError> {
        (0..self.numrows()).map(|row| self.value(row, col)).collect()
    }

    /// Index of the first column with this label
    pub fn find_label(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// EXFOR text. Rows wrap at six cells per line; the END line carries the
    /// physical line count between header and END line.
    pub fn exfor_style(&self) -> String {
        let tag = self.kind.tag();
        let mut out = format!(
            "{:<w$}{:>w$}{:>w$}\n",
            tag,
            self.numcols(),
            self.numrows(),
            w = CELL_WIDTH
        );

        let labels: Vec<String> = self
            .labels
            .iter()
            .zip(&self.column_pointers)
            .map(|(label, pointer)| match pointer {
                Some(p) => format!("{:<w$}{p}", label, w = CELL_WIDTH - 1),
                None => label.clone(),
            })
            .collect();
        self.write_row(&mut out, &labels);
        self.write_row(&mut out, &self.units);
        for row in &self.rows {
            self.write_row(&mut out, row);
        }

        let lines = (self.numrows() + 2) * self.lines_per_row();
        out.push_str(&format!(
            "{:<w$}{:>w$}",
            format!("END{tag}"),
            lines,
            w = CELL_WIDTH
        ));
        out
    }

    fn write_row(&self, out: &mut String, cells: &[String]) {
        for chunk in cells.chunks(CELLS_PER_LINE) {
            for cell in chunk {
                out.push_str(&format!("{:<w$}", cell, w = CELL_WIDTH));
            }
            out.push('\n');
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.exfor_style())
    }
}

fn resolve_row_count(
    kind: TableKind,
    lines: usize,
    declared: usize,
    lpr: usize,
    malformed: impl Fn() -> RecordError,
) -> Result<usize, RecordError> {
    let candidates = [
        declared.checked_add(2).and_then(|n| n.checked_mul(lpr)).and_then(|n| n.checked_add(2)),
        declared.checked_mul(lpr).and_then(|n| n.checked_add(2)),
        declared.checked_add(2),
    ];
    let [Some(with_headings), Some(rows_only), Some(physical)] = candidates else {
        return Err(malformed());
    };
    let candidates = [with_headings, rows_only, physical];
    if lines == candidates[0] {
        return Ok(declared);
    }
    if lines == candidates[1] && declared >= 2 {
        debug!("{kind} row count includes the two heading rows");
        return Ok(declared - 2);
    }
    if lines == candidates[2] && declared / lpr >= 2 {
        debug!("{kind} row count is the number of physical lines");
        return Ok(declared / lpr - 2);
    }
    Err(RecordError::DataSectionFormat {
        tag: kind.tag().to_string(),
        lines,
        candidates,
    })
}
