use std::fmt;

use crate::record::PlainField;

use super::text::title_case;

/// A TITLE field, title-cased with its lines joined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleField {
    /// The raw field
    pub raw: PlainField,
    /// Cleaned title
    pub title: String,
}

impl TitleField {
    /// Interpret a raw TITLE field
    pub fn parse(raw: &PlainField) -> Self {
        let title = raw
            .pointers()
            .filter_map(|p| raw.text(p))
            .map(|text| title_case(&text).trim().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            raw: raw.clone(),
            title,
        }
    }
}

impl fmt::Display for TitleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
