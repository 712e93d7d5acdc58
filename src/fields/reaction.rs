use std::collections::BTreeMap;
use std::fmt;

use crate::reaction::{parse_measurement, Measurement, Reaction};
use crate::record::{PlainField, NO_POINTER};

use super::FieldError;

/// One parsed REACTION payload: the measurement and any free text after it
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionEntry {
    /// What is measured
    pub measurement: Measurement,
    /// Free text following the reaction expression
    pub comment: String,
}

impl ReactionEntry {
    /// Parse the payload text of one pointer
    pub fn parse(pointer: char, text: &str) -> Result<Self, FieldError> {
        let (measurement, comment) =
            parse_measurement(text).map_err(|source| FieldError::ReactionParsing {
                pointer,
                text: text.to_string(),
                source,
            })?;
        Ok(Self {
            measurement,
            comment,
        })
    }
}

/// An interpreted REACTION field, one measurement per footnote pointer
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionField {
    /// The raw field
    pub raw: PlainField,
    /// Parsed measurement per pointer
    pub entries: BTreeMap<char, ReactionEntry>,
}

impl ReactionField {
    /// Parse every pointer; the first failing pointer fails the field
    pub fn parse(raw: &PlainField) -> Result<Self, FieldError> {
        let mut entries = BTreeMap::new();
        for (pointer, result) in Self::parse_each(raw) {
            entries.insert(pointer, result?);
        }
        Ok(Self {
            raw: raw.clone(),
            entries,
        })
    }

    /// Parse every pointer independently, so one bad pointer does not hide the others
    pub fn parse_each(raw: &PlainField) -> BTreeMap<char, Result<ReactionEntry, FieldError>> {
        raw.pointers()
            .map(|pointer| {
                let text = raw.text(pointer).unwrap_or_default();
                (pointer, ReactionEntry::parse(pointer, &text))
            })
            .collect()
    }

    /// Pointers in sorted order
    pub fn pointers(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }

    /// Entry under `pointer`
    pub fn get(&self, pointer: char) -> Option<&ReactionEntry> {
        self.entries.get(&pointer)
    }

    /// Equation tokens for `pointer`, see [`Measurement::equation`]
    pub fn equation(&self, pointer: char, schematic: bool) -> Option<Vec<String>> {
        self.get(pointer).map(|e| e.measurement.equation(schematic))
    }

    /// Reactions under `pointer` in order of appearance
    pub fn reactions(&self, pointer: char) -> Vec<&Reaction> {
        self.get(pointer)
            .map(|e| e.measurement.reactions())
            .unwrap_or_default()
    }
}

impl fmt::Display for ReactionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(pointer, entry)| {
                if *pointer == NO_POINTER {
                    entry.measurement.to_string()
                } else if entry.comment.is_empty() {
                    format!("[{pointer}] {}", entry.measurement)
                } else {
                    format!("[{pointer}] {}, {}", entry.measurement, entry.comment)
                }
            })
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
