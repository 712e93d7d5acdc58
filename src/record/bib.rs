use std::fmt;

use serde::Serialize;

use super::field::{line_tag, PlainField};
use super::table::CELL_WIDTH;

/// A BIB section: raw fields in their original order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bib {
    /// Fields in order of appearance
    pub fields: Vec<PlainField>,
}

impl Bib {
    /// Split a BIB section into fields. `BIB`/`ENDBIB` lines are skipped, a
    /// non-blank tag starts a new field and a blank tag continues the last one.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut chunks: Vec<Vec<&str>> = Vec::new();
        for line in lines {
            let line = line.as_ref();
            let tag = line_tag(line);
            if tag == "BIB" || tag == "ENDBIB" {
                continue;
            }
            match chunks.last_mut() {
                Some(chunk) if tag.is_empty() => chunk.push(line),
                _ => chunks.push(vec![line]),
            }
        }
        Self {
            fields: chunks.iter().map(|chunk| PlainField::parse(chunk.as_slice())).collect(),
        }
    }

    /// First field with this tag
    pub fn get(&self, tag: &str) -> Option<&PlainField> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Whether a field with this tag exists
    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Field tags in order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.tag.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the section has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Physical lines over all fields
    pub fn total_len(&self) -> usize {
        self.fields.iter().map(PlainField::total_len).sum()
    }

    /// EXFOR text, `BIB` header through `ENDBIB`
    pub fn exfor_style(&self) -> String {
        let mut out = format!(
            "{:<w$}{:>w$}{:>w$}\n",
            "BIB",
            self.len(),
            self.total_len(),
            w = CELL_WIDTH
        );
        for field in &self.fields {
            out.push_str(&field.exfor_style());
            out.push('\n');
        }
        out.push_str(&format!("{:<w$}{:>w$}", "ENDBIB", self.total_len(), w = CELL_WIDTH));
        out
    }
}

impl fmt::Display for Bib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            writeln!(f, "{:<w$} {field}", field.tag, w = CELL_WIDTH - 1)?;
        }
        Ok(())
    }
}
