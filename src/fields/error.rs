use crate::reaction::ReactionError;

/// Errors raised while interpreting BIB fields
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// A REACTION or MONITOR payload the reaction grammar rejects
    #[error("Can not parse reaction \"{text}\" under pointer '{pointer}': {source}")]
    ReactionParsing {
        /// Footnote pointer of the payload
        pointer: char,
        /// Payload text
        text: String,
        /// Grammar failure
        source: ReactionError,
    },

    /// An AUTHOR field without a parenthesized author list
    #[error("Can not parse authors \"{text}\": {message}")]
    AuthorParsing {
        /// Field text
        text: String,
        /// What went wrong
        message: String,
    },

    /// An INSTITUTE field that is not a sequence of `(code) comment` groups
    #[error("Can not parse institute \"{text}\": {message}")]
    InstituteParsing {
        /// Field text
        text: String,
        /// What went wrong
        message: String,
    },

    /// A REFERENCE field with a malformed code, date or reference type
    #[error("Can not parse reference \"{text}\": {message}")]
    ReferenceParsing {
        /// Reference text
        text: String,
        /// What went wrong
        message: String,
    },
}

impl FieldError {
    /// Error kind name as used in extraction reports, e.g. `ReferenceParsingError`
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldError::ReactionParsing { .. } => "ReactionParsingError",
            FieldError::AuthorParsing { .. } => "AuthorParsingError",
            FieldError::InstituteParsing { .. } => "InstituteParsingError",
            FieldError::ReferenceParsing { .. } => "ReferenceParsingError",
        }
    }

    pub(crate) fn reference(text: &str, message: impl Into<String>) -> Self {
        FieldError::ReferenceParsing {
            text: text.to_string(),
            message: message.into(),
        }
    }
}
