/// Errors raised while tokenizing EXFOR records
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// Declared row count fits none of the known line-count conventions
    #[error(
        "Number of lines in {tag} section incompatible with information in section tag: \
         {lines} vs. {} or {} or {}",
        .candidates[0],
        .candidates[1],
        .candidates[2]
    )]
    DataSectionFormat {
        /// `DATA` or `COMMON`
        tag: String,
        /// Physical lines in the section, header and END line included
        lines: usize,
        /// Line counts expected under each convention, in the order tried
        candidates: [usize; 3],
    },

    /// A table cell that is not a number even after FORTRAN repair
    #[error("Broken number: \"{0}\"")]
    BrokenNumber(String),

    /// Section header line without readable counts
    #[error("Malformed {tag} header: \"{line}\"")]
    MalformedHeader {
        /// Section tag
        tag: String,
        /// Offending line
        line: String,
    },

    /// A section or subentry that never reaches its END line
    #[error("Missing END{0}")]
    MissingEnd(String),

    /// Accession number of the wrong shape
    #[error("Invalid EXFOR accession number: \"{0}\"")]
    InvalidAccession(String),

    /// Lookup of a subentry that is not in the entry
    #[error("No subentry {0}")]
    NoSubEntry(String),

    /// Table index out of range
    #[error("Cell ({row}, {col}) outside a {numrows}x{numcols} table")]
    CellOutOfRange {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
        /// Rows in the table
        numrows: usize,
        /// Columns in the table
        numcols: usize,
    },
}
