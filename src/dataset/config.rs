use serde::{Deserialize, Serialize};

/// Options for dataset extraction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Reduce each dataset to canonical quantity columns (Energy, Data, ...)
    pub simplify: bool,

    /// Emit an uncertainty column for every quantity, zero-filled where none is given
    pub make_all_columns: bool,

    /// Fail a simplified dataset whose quantity has no uncertainty at all.
    /// Ignored when `make_all_columns` is set.
    pub fail_if_missing_errors: bool,

    /// Reject matched columns whose units have no known conversion
    pub strict_units: bool,

    /// Only build datasets for these SubEntry accession numbers
    pub subentries: Option<Vec<String>>,
}

impl ExtractConfig {
    /// Default configuration: raw datasets, lenient units, every SubEntry
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce datasets to canonical columns
    pub fn with_simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    /// Zero-fill uncertainty columns that have no source
    pub fn with_make_all_columns(mut self, make_all_columns: bool) -> Self {
        self.make_all_columns = make_all_columns;
        self
    }

    /// Fail simplification when an uncertainty is missing
    pub fn with_fail_if_missing_errors(mut self, fail: bool) -> Self {
        self.fail_if_missing_errors = fail;
        self
    }

    /// Reject unknown units
    pub fn with_strict_units(mut self, strict: bool) -> Self {
        self.strict_units = strict;
        self
    }

    /// Restrict extraction to the given SubEntries
    pub fn with_subentries<I, S>(mut self, subentries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subentries = Some(subentries.into_iter().map(Into::into).collect());
        self
    }

    /// Whether SubEntry `accnum` passes the whitelist
    pub fn keeps(&self, accnum: &str) -> bool {
        self.subentries
            .as_ref()
            .map_or(true, |keep| keep.iter().any(|k| k == accnum))
    }
}
