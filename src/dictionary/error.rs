/// Errors that can occur while loading code dictionaries
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Dictionary name or index not known
    #[error("Unknown dictionary: {0}")]
    UnknownDictionary(String),

    /// `Title`/`NumFields`/`FieldBreaks` header is malformed
    #[error("Malformed dictionary header in {kind}: {message}")]
    MalformedHeader {
        /// Dictionary being parsed
        kind: String,
        /// What was wrong
        message: String,
    },

    /// The process-wide dictionary set was already initialized
    #[error("Dictionaries already initialized")]
    AlreadyInitialized,
}
