use std::collections::BTreeMap;
use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use super::field::{columns, line_tag};
use super::subentry::SubEntry;
use super::table::CELL_WIDTH;
use super::RecordError;

/// Marker placed in the HISTORY field of SubEntry 001 when an entry is withdrawn
pub const DELETED_MARKER: &str = "ENTRY DELETED";

/// An EXFOR entry: SubEntries keyed by their 8-character accession number
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// 5-character accession number
    pub accnum: String,
    /// SubEntries in accession order
    pub subentries: BTreeMap<String, SubEntry>,
}

impl Entry {
    /// Tokenize an entry from its raw lines.
    ///
    /// `ENTRY`, `ENDENTRY` and `NOSUBENT` lines are structural markers and are
    /// dropped; everything from `SUBENT` through `ENDSUBENT` becomes one
    /// [`SubEntry`].
    pub fn parse<S: AsRef<str>>(accnum: &str, lines: &[S]) -> Result<Self, RecordError> {
        Self::parse_filtered(accnum, lines, None)
    }

    /// Like [`Entry::parse`], keeping only the SubEntries named in `whitelist`
    pub fn parse_filtered<S: AsRef<str>>(
        accnum: &str,
        lines: &[S],
        whitelist: Option<&[String]>,
    ) -> Result<Self, RecordError> {
        if accnum.chars().count() != 5 {
            return Err(RecordError::InvalidAccession(accnum.to_string()));
        }

        let mut subentries = BTreeMap::new();
        for chunk in split_subentries(lines)? {
            let id = columns(chunk[0], 14, 22).trim().to_string();
            if let Some(keep) = whitelist {
                if !keep.iter().any(|k| *k == id) {
                    debug!("Skipping subentry {id}");
                    continue;
                }
            }
            let subentry = SubEntry::parse(&chunk)?;
            if !subentry.accnum.starts_with(accnum) {
                warn!("Subentry {} filed under entry {accnum}", subentry.accnum);
            }
            subentries.insert(subentry.accnum.clone(), subentry);
        }
        debug!("Entry {accnum}: {} subentries", subentries.len());

        Ok(Self {
            accnum: accnum.to_string(),
            subentries,
        })
    }

    /// Tokenize an entry, reading its accession number from the `ENTRY` line
    /// or, failing that, from the first `SUBENT` line
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, RecordError> {
        let accnum = entry_accession(lines).ok_or_else(|| {
            RecordError::InvalidAccession(
                lines
                    .first()
                    .map(|l| l.as_ref().trim().to_string())
                    .unwrap_or_default(),
            )
        })?;
        Self::parse(&accnum, lines)
    }

    /// Look a SubEntry up by its full 8-character accession number or by its
    /// suffix of at most 3 digits (`"1"`, `"001"`)
    pub fn get(&self, id: &str) -> Result<&SubEntry, RecordError> {
        let key = match id.chars().count() {
            8 => id.to_string(),
            1..=3 => format!("{}{:0>3}", self.accnum, id),
            _ => return Err(RecordError::InvalidAccession(id.to_string())),
        };
        self.subentries.get(&key).ok_or(RecordError::NoSubEntry(key))
    }

    /// Look a SubEntry up by its numeric suffix
    pub fn get_index(&self, index: u32) -> Result<&SubEntry, RecordError> {
        self.get(&index.to_string())
    }

    /// SubEntry 001, which documents the whole entry
    pub fn main_subentry(&self) -> Option<&SubEntry> {
        self.get_index(1).ok()
    }

    /// SubEntry accession numbers in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.subentries.keys().map(String::as_str)
    }

    /// Number of SubEntries
    pub fn len(&self) -> usize {
        self.subentries.len()
    }

    /// Whether no SubEntry survived tokenizing
    pub fn is_empty(&self) -> bool {
        self.subentries.is_empty()
    }

    /// Whether the HISTORY field of SubEntry 001 marks the entry as withdrawn
    pub fn is_deleted(&self) -> bool {
        self.main_subentry()
            .and_then(|s| s.bib.as_ref())
            .and_then(|bib| bib.get("HISTORY"))
            .is_some_and(|history| history.full_text().contains(DELETED_MARKER))
    }

    /// EXFOR text, `ENTRY` through `ENDENTRY`
    pub fn exfor_style(&self) -> String {
        let mut out = format!("{:<w$}{:>w$}\n", "ENTRY", self.accnum, w = CELL_WIDTH);
        for subentry in self.subentries.values() {
            out.push_str(&subentry.exfor_style());
            out.push('\n');
        }
        out.push_str(&format!("{:<w$}", "ENDENTRY", w = CELL_WIDTH));
        out
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ENTRY {}", self.accnum)?;
        for subentry in self.subentries.values() {
            write!(f, "{subentry}")?;
        }
        Ok(())
    }
}

/// Group lines into SUBENT..ENDSUBENT chunks, dropping everything outside them
fn split_subentries<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Vec<&str>>, RecordError> {
    let mut chunks = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    for line in lines.iter().map(AsRef::as_ref) {
        let tag = line_tag(line);
        match current.as_mut() {
            Some(chunk) => {
                chunk.push(line);
                if tag == "ENDSUBENT" {
                    chunks.extend(current.take());
                }
            }
            None if tag == "SUBENT" => current = Some(vec![line]),
            None => {}
        }
    }
    if let Some(chunk) = current {
        let id = columns(chunk[0], 14, 22).trim().to_string();
        return Err(RecordError::MissingEnd(format!("SUBENT for {id}")));
    }
    Ok(chunks)
}

/// Entry accession number from the `ENTRY` line, or the first 5 characters of
/// the first `SUBENT` accession number
pub fn entry_accession<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    for line in lines.iter().map(AsRef::as_ref) {
        match line.split_whitespace().next() {
            Some("ENTRY") => return Some(columns(line, 14, 22).trim().to_string()),
            Some("SUBENT") => {
                return Some(columns(line, 14, 22).trim().chars().take(5).collect());
            }
            _ => {}
        }
    }
    None
}
