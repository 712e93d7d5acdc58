//! # Code Dictionary Module
//!
//! EXFOR abbreviates institutes, journals, quantities, particles and many other
//! things as short codes. The meaning of each code lives in a fixed-column
//! dictionary file, one file per category:
//!
//! ```text
//! Title = Quantities
//! NumFields = 2
//! FieldBreaks = [14]
//! ,SIG          Cross section
//! ,DA           Differential cross section d/dA
//! ```
//!
//! Field 0 of each row is the key and the remaining fields form the row value.
//! A curated subset of every category is compiled into the crate; a directory of
//! complete tables can be loaded instead with [`Dictionaries::load_dir`].
//!
//! The embedded subset only knows the common codes (a few dozen quantities and
//! modifiers). Lookups of other codes come back empty, so reaction type text
//! such as [`Reaction::reaction_type`](crate::reaction::Reaction::reaction_type)
//! is blank for them until the full tables are installed.
//!
//! The set is read-only after construction. [`Dictionaries::global`] hands out a
//! process-wide instance that is built exactly once on first access.

mod embedded;
mod error;

#[cfg(test)]
mod tests;

pub use error::DictionaryError;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use log::{debug, error, info, warn};

/// Process-wide dictionary set.
static DICTIONARIES: OnceLock<Dictionaries> = OnceLock::new();

/// Dictionary categories and their EXFOR dictionary numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DictionaryKind {
    /// Laboratory and institute codes (3)
    Institutes,
    /// Reference type letters (4)
    ReferenceTypes,
    /// Journal codes (5)
    Journals,
    /// Conference and book codes (7)
    ConferencesAndBooks,
    /// Chemical compound codes (9)
    Compounds,
    /// History codes (15)
    History,
    /// Status codes (16)
    Status,
    /// Related reference codes (17)
    RelRef,
    /// Facility codes (18)
    Facility,
    /// Incident source codes (19)
    IncidentSource,
    /// Additional result codes (20)
    AdditionalResults,
    /// Method codes (21)
    Method,
    /// Detector codes (22)
    Detectors,
    /// Analysis codes (23)
    Analysis,
    /// DATA column headings (24)
    DataHeadings,
    /// Reaction process codes (30)
    Process,
    /// Particle codes (33)
    Particles,
    /// Quantity modifiers (34)
    Modifiers,
    /// Data type codes (35)
    DataType,
    /// Reaction quantities (36)
    Quantities,
    /// Result codes (37)
    Result,
}

impl DictionaryKind {
    /// All categories in dictionary-number order
    pub const ALL: [DictionaryKind; 21] = [
        DictionaryKind::Institutes,
        DictionaryKind::ReferenceTypes,
        DictionaryKind::Journals,
        DictionaryKind::ConferencesAndBooks,
        DictionaryKind::Compounds,
        DictionaryKind::History,
        DictionaryKind::Status,
        DictionaryKind::RelRef,
        DictionaryKind::Facility,
        DictionaryKind::IncidentSource,
        DictionaryKind::AdditionalResults,
        DictionaryKind::Method,
        DictionaryKind::Detectors,
        DictionaryKind::Analysis,
        DictionaryKind::DataHeadings,
        DictionaryKind::Process,
        DictionaryKind::Particles,
        DictionaryKind::Modifiers,
        DictionaryKind::DataType,
        DictionaryKind::Quantities,
        DictionaryKind::Result,
    ];

    /// EXFOR dictionary number
    pub fn index(self) -> u8 {
        match self {
            DictionaryKind::Institutes => 3,
            DictionaryKind::ReferenceTypes => 4,
            DictionaryKind::Journals => 5,
            DictionaryKind::ConferencesAndBooks => 7,
            DictionaryKind::Compounds => 9,
            DictionaryKind::History => 15,
            DictionaryKind::Status => 16,
            DictionaryKind::RelRef => 17,
            DictionaryKind::Facility => 18,
            DictionaryKind::IncidentSource => 19,
            DictionaryKind::AdditionalResults => 20,
            DictionaryKind::Method => 21,
            DictionaryKind::Detectors => 22,
            DictionaryKind::Analysis => 23,
            DictionaryKind::DataHeadings => 24,
            DictionaryKind::Process => 30,
            DictionaryKind::Particles => 33,
            DictionaryKind::Modifiers => 34,
            DictionaryKind::DataType => 35,
            DictionaryKind::Quantities => 36,
            DictionaryKind::Result => 37,
        }
    }

    /// Category name as used in dictionary file titles
    pub fn name(self) -> &'static str {
        match self {
            DictionaryKind::Institutes => "Institutes",
            DictionaryKind::ReferenceTypes => "ReferenceTypes",
            DictionaryKind::Journals => "Journals",
            DictionaryKind::ConferencesAndBooks => "ConferencesAndBooks",
            DictionaryKind::Compounds => "Compounds",
            DictionaryKind::History => "History",
            DictionaryKind::Status => "Status",
            DictionaryKind::RelRef => "Rel_Ref",
            DictionaryKind::Facility => "Facility",
            DictionaryKind::IncidentSource => "IncidentSource",
            DictionaryKind::AdditionalResults => "AdditionalResults",
            DictionaryKind::Method => "Method",
            DictionaryKind::Detectors => "Detectors",
            DictionaryKind::Analysis => "Analysis",
            DictionaryKind::DataHeadings => "DataHeadings",
            DictionaryKind::Process => "Process",
            DictionaryKind::Particles => "Particles",
            DictionaryKind::Modifiers => "Modifiers",
            DictionaryKind::DataType => "DataType",
            DictionaryKind::Quantities => "Quantities",
            DictionaryKind::Result => "Result",
        }
    }

    /// File name of the category inside a dictionary directory, e.g. `dict03.txt`
    pub fn file_name(self) -> String {
        format!("dict{:02}.txt", self.index())
    }

    /// Look a category up by its dictionary number
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.index() == index)
    }
}

impl fmt::Display for DictionaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DictionaryKind {
    type Err = DictionaryError;

    /// Accepts a category name (`"Quantities"`) or a dictionary number (`"36"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<u8>() {
            return Self::from_index(index)
                .ok_or_else(|| DictionaryError::UnknownDictionary(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DictionaryError::UnknownDictionary(s.to_string()))
    }
}

/// One category of codes: an immutable map from code to its row of fields
#[derive(Debug, Clone, PartialEq)]
pub struct CodeDictionary {
    kind: DictionaryKind,
    title: String,
    entries: BTreeMap<String, Vec<String>>,
}

impl CodeDictionary {
    /// Create an empty dictionary for a category
    pub fn empty(kind: DictionaryKind) -> Self {
        Self {
            kind,
            title: kind.name().to_string(),
            entries: BTreeMap::new(),
        }
    }

    /// Category of this dictionary
    pub fn kind(&self) -> DictionaryKind {
        self.kind
    }

    /// Title read from the file header
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All fields after the key for `code`
    pub fn get(&self, code: &str) -> Option<&[String]> {
        self.entries.get(code).map(Vec::as_slice)
    }

    /// First field after the key, which is the human-readable name in every category
    pub fn description(&self, code: &str) -> Option<&str> {
        self.get(code)
            .and_then(|fields| fields.first())
            .map(String::as_str)
    }

    /// Field `n` (0 = first field after the key)
    pub fn field(&self, code: &str, n: usize) -> Option<&str> {
        self.get(code)
            .and_then(|fields| fields.get(n))
            .map(String::as_str)
    }

    /// Whether `code` is defined
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Number of codes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no codes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate codes in sorted order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate `(code, fields)` pairs in sorted code order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(code, fields)| (code.as_str(), fields.as_slice()))
    }
}

/// Parse one dictionary file.
///
/// Rows are trimmed before slicing at the field breaks and the last field runs
/// to the end of the row. A later row with the same key replaces an earlier one.
pub fn parse_dictionary(kind: DictionaryKind, text: &str) -> Result<CodeDictionary, DictionaryError> {
    let malformed = |message: String| DictionaryError::MalformedHeader {
        kind: kind.name().to_string(),
        message,
    };
    let mut lines = text.lines();

    let title = header_value(lines.next()).ok_or_else(|| malformed("missing Title".into()))?;
    let num_fields: usize = header_value(lines.next())
        .ok_or_else(|| malformed("missing NumFields".into()))?
        .parse()
        .map_err(|e| malformed(format!("bad NumFields: {e}")))?;
    let breaks_text = header_value(lines.next()).ok_or_else(|| malformed("missing FieldBreaks".into()))?;
    let mut breaks = vec![0usize];
    for piece in breaks_text
        .replace(['[', ']'], "")
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
    {
        breaks.push(
            piece
                .parse()
                .map_err(|e| malformed(format!("bad FieldBreaks entry '{piece}': {e}")))?,
        );
    }
    if num_fields == 0 || breaks.len() != num_fields {
        return Err(malformed(format!(
            "NumFields = {num_fields} needs {} field breaks, got {}",
            num_fields.saturating_sub(1),
            breaks.len() - 1
        )));
    }

    let mut entries = BTreeMap::new();
    for line in lines {
        let row: Vec<char> = line.trim().chars().collect();
        if row.is_empty() {
            continue;
        }
        let mut fields: Vec<String> = (0..num_fields)
            .map(|i| {
                let start = breaks[i];
                let end = breaks.get(i + 1).copied().unwrap_or(row.len());
                char_slice(&row, start, end).trim().to_string()
            })
            .collect();
        let key = fields.remove(0);
        entries.insert(key, fields);
    }
    debug!("Parsed dictionary {} with {} codes", kind, entries.len());

    Ok(CodeDictionary {
        kind,
        title,
        entries,
    })
}

fn header_value(line: Option<&str>) -> Option<String> {
    line.and_then(|line| line.rsplit('=').next())
        .map(|value| value.trim().to_string())
}

fn char_slice(row: &[char], start: usize, end: usize) -> String {
    let end = end.min(row.len());
    if start >= end {
        return String::new();
    }
    row[start..end].iter().collect()
}

/// The complete, read-only set of code dictionaries
#[derive(Debug, Clone)]
pub struct Dictionaries {
    /// One table per category, in `DictionaryKind::ALL` order
    tables: Vec<CodeDictionary>,
}

impl Dictionaries {
    /// Build the set from the tables compiled into the crate
    pub fn embedded() -> Result<Self, DictionaryError> {
        let mut tables = Vec::with_capacity(DictionaryKind::ALL.len());
        for kind in DictionaryKind::ALL {
            let table = match embedded::EMBEDDED.iter().find(|(k, _)| *k == kind) {
                Some((_, text)) => parse_dictionary(kind, text)?,
                None => CodeDictionary::empty(kind),
            };
            tables.push(table);
        }
        Ok(Self { tables })
    }

    /// Load `dictNN.txt` files from a directory.
    ///
    /// Categories without a file are left empty.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, DictionaryError> {
        let dir = dir.as_ref();
        let mut tables = Vec::with_capacity(DictionaryKind::ALL.len());
        for kind in DictionaryKind::ALL {
            let path = dir.join(kind.file_name());
            if !path.exists() {
                warn!("Dictionary file {} not found, {} will be empty", path.display(), kind);
                tables.push(CodeDictionary::empty(kind));
                continue;
            }
            let text = std::fs::read_to_string(&path)?;
            tables.push(parse_dictionary(kind, &text)?);
        }
        info!("Loaded {} dictionaries from {}", tables.len(), dir.display());
        Ok(Self { tables })
    }

    fn empty() -> Self {
        Self {
            tables: DictionaryKind::ALL
                .into_iter()
                .map(CodeDictionary::empty)
                .collect(),
        }
    }

    /// Dictionary for a category
    pub fn get(&self, kind: DictionaryKind) -> &CodeDictionary {
        &self.tables[kind as usize]
    }

    /// Shortcut for the descriptive name of `code` in `kind`
    pub fn lookup(&self, kind: DictionaryKind, code: &str) -> Option<&str> {
        self.get(kind).description(code)
    }

    /// Iterate all categories
    pub fn iter(&self) -> impl Iterator<Item = &CodeDictionary> {
        self.tables.iter()
    }

    /// Get the process-wide dictionary set.
    ///
    /// Built from the embedded tables on first access unless
    /// [`Dictionaries::install_global`] ran before.
    pub fn global() -> &'static Dictionaries {
        DICTIONARIES.get_or_init(|| match Self::embedded() {
            Ok(dictionaries) => {
                info!("Loaded embedded EXFOR dictionaries");
                dictionaries
            }
            Err(err) => {
                error!("Embedded dictionaries are unreadable ({err}); continuing without codes");
                Self::empty()
            }
        })
    }

    /// Install a custom process-wide dictionary set.
    ///
    /// Must run before the first call to [`Dictionaries::global`].
    pub fn install_global(dictionaries: Dictionaries) -> Result<(), DictionaryError> {
        DICTIONARIES
            .set(dictionaries)
            .map_err(|_| DictionaryError::AlreadyInitialized)
    }
}

/// Get the process-wide dictionary set
pub fn dictionaries() -> &'static Dictionaries {
    Dictionaries::global()
}
