use std::fmt;

use crate::record::PlainField;

use super::text::{matching_paren, squash_spaces, title_case};
use super::FieldError;

/// Texts that mark an AUTHOR field without authors
pub const NO_AUTHOR_MARKERS: [&str; 2] = ["No author given", ".NOT GIVEN."];

/// An interpreted AUTHOR field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorField {
    /// The raw field
    pub raw: PlainField,
    /// Authors as `Initials.Family`, title-cased
    pub authors: Vec<String>,
}

impl AuthorField {
    /// Parse the parenthesized, comma separated author list.
    /// Text after the closing parenthesis (collaboration names and the like) is ignored.
    pub fn parse(raw: &PlainField) -> Result<Self, FieldError> {
        let full = raw.full_text();
        if NO_AUTHOR_MARKERS.iter().any(|marker| full.contains(marker)) {
            return Ok(Self {
                raw: raw.clone(),
                authors: Vec::new(),
            });
        }

        let mut authors = Vec::new();
        for pointer in raw.pointers() {
            let text: String = raw
                .lines(pointer)
                .unwrap_or_default()
                .iter()
                .map(|line| line.trim())
                .collect();
            authors.extend(parse_list(&text)?);
        }
        Ok(Self {
            raw: raw.clone(),
            authors,
        })
    }

    /// Family names: whatever follows the last `.` of each author
    pub fn family_names(&self) -> Vec<&str> {
        self.authors
            .iter()
            .map(|a| a.rsplit('.').next().unwrap_or(a))
            .collect()
    }

    /// Whether the field lists nobody
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

impl fmt::Display for AuthorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.authors.is_empty() {
            write!(f, "No author given")
        } else {
            write!(f, "{}", self.authors.join(", "))
        }
    }
}

fn parse_list(text: &str) -> Result<Vec<String>, FieldError> {
    let error = |message: &str| FieldError::AuthorParsing {
        text: text.to_string(),
        message: message.to_string(),
    };
    let trimmed = text.trim_start();
    if !trimmed.starts_with('(') {
        return Err(error("author list must open with '('"));
    }
    let chars: Vec<char> = trimmed.chars().collect();
    // an unbalanced list ends at its first ')'
    let close = matching_paren(&chars, 0)
        .or_else(|| chars.iter().position(|c| *c == ')'))
        .ok_or_else(|| error("author list is never closed"))?;

    Ok(chars[1..close]
        .iter()
        .collect::<String>()
        .split(',')
        .map(squash_spaces)
        .filter(|name| !name.is_empty())
        .map(|name| title_case(&name))
        .collect())
}
