use std::fmt;

use serde::Serialize;

use super::bib::Bib;
use super::field::{columns, line_tag};
use super::table::{Table, TableKind, CELL_WIDTH};
use super::RecordError;

/// One SUBENT block: an optional BIB section and optional COMMON and DATA tables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubEntry {
    /// 8-character accession number, entry number plus 3-digit suffix
    pub accnum: String,
    /// Bibliographic fields
    pub bib: Option<Bib>,
    /// Constants shared by all DATA rows
    pub common: Option<Table>,
    /// Measurement table
    pub data: Option<Table>,
}

impl SubEntry {
    /// Tokenize the lines from `SUBENT` through `ENDSUBENT`
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, RecordError> {
        let accnum = lines
            .iter()
            .map(AsRef::as_ref)
            .find(|line| line.split_whitespace().next() == Some("SUBENT"))
            .map(|line| columns(line, 14, 22).trim().to_string())
            .ok_or_else(|| RecordError::MalformedHeader {
                tag: "SUBENT".to_string(),
                line: lines.first().map(|l| l.as_ref().to_string()).unwrap_or_default(),
            })?;
        if accnum.chars().count() != 8 {
            return Err(RecordError::InvalidAccession(accnum));
        }

        let mut subentry = Self {
            accnum,
            bib: None,
            common: None,
            data: None,
        };

        let mut section: Option<(String, Vec<&str>)> = None;
        for line in lines.iter().map(AsRef::as_ref) {
            let tag = line_tag(line);
            match section.as_mut() {
                Some((open, _)) if tag == "ENDSUBENT" => {
                    return Err(RecordError::MissingEnd(format!(
                        "{open} in subentry {}",
                        subentry.accnum
                    )));
                }
                Some((open, body)) => {
                    body.push(line);
                    if tag.starts_with("END") {
                        let open = open.clone();
                        let body = std::mem::take(body);
                        section = None;
                        subentry.add_section(&open, &body)?;
                    }
                }
                None if matches!(tag.as_str(), "BIB" | "COMMON" | "DATA") => {
                    section = Some((tag, vec![line]));
                }
                None => {}
            }
        }
        if let Some((open, _)) = section {
            return Err(RecordError::MissingEnd(format!("{open} in subentry {}", subentry.accnum)));
        }
        Ok(subentry)
    }

    fn add_section(&mut self, tag: &str, lines: &[&str]) -> Result<(), RecordError> {
        match TableKind::from_tag(tag) {
            Some(TableKind::Common) => self.common = Some(Table::parse(lines)?),
            Some(TableKind::Data) => self.data = Some(Table::parse(lines)?),
            None => self.bib = Some(Bib::parse(lines)),
        }
        Ok(())
    }

    /// Numeric suffix of the accession number, `12898002` → `2`
    pub fn index(&self) -> Option<u32> {
        self.accnum.get(5..).and_then(|s| s.parse().ok())
    }

    /// Whether a COMMON table is present
    pub fn has_common(&self) -> bool {
        self.common.is_some()
    }

    /// EXFOR text, `SUBENT` through `ENDSUBENT`, sections in BIB, COMMON, DATA order
    pub fn exfor_style(&self) -> String {
        let mut out = format!("{:<w$}{:>w$}\n", "SUBENT", self.accnum, w = CELL_WIDTH);
        if let Some(bib) = &self.bib {
            out.push_str(&bib.exfor_style());
            out.push('\n');
        }
        for table in [&self.common, &self.data].into_iter().flatten() {
            out.push_str(&table.exfor_style());
            out.push('\n');
        }
        out.push_str(&format!("{:<w$}", "ENDSUBENT", w = CELL_WIDTH));
        out
    }
}

impl fmt::Display for SubEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SUBENT {}", self.accnum)?;
        if let Some(bib) = &self.bib {
            write!(f, "{bib}")?;
        }
        for table in [&self.common, &self.data].into_iter().flatten() {
            writeln!(f, "{}: {} columns x {} rows", table.kind, table.numcols(), table.numrows())?;
        }
        Ok(())
    }
}
