use std::fmt;

use serde::Serialize;

use crate::dictionary::{dictionaries, DictionaryKind};
use crate::record::PlainField;

use super::text::{matching_paren, squash_spaces, title_case};
use super::FieldError;

/// One institute with its resolved name and the compiler's comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Institute {
    /// Code as written, e.g. `2JPNOSA`
    pub code: String,
    /// Name from the Institutes dictionary, or the code when unknown
    pub name: String,
    /// Title-cased free text after the code
    pub comment: String,
}

impl Institute {
    /// Resolve a code through the last three characters of its first word
    pub fn resolve(code: &str, comment: &str) -> Self {
        let code = code.split_whitespace().next().unwrap_or_default().to_string();
        let chars: Vec<char> = code.chars().collect();
        let key: String = chars[chars.len().saturating_sub(3)..].iter().collect();
        let name = dictionaries()
            .lookup(DictionaryKind::Institutes, &key)
            .map(str::to_string)
            .unwrap_or_else(|| code.clone());
        Self {
            code,
            name,
            comment: title_case(comment),
        }
    }
}

impl fmt::Display for Institute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.comment.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.comment)
        }
    }
}

/// An interpreted INSTITUTE field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstituteField {
    /// The raw field
    pub raw: PlainField,
    /// Institutes in order of appearance
    pub institutes: Vec<Institute>,
}

impl InstituteField {
    /// Parse `(code) comment (code) comment ...`. Several codes in one pair of
    /// parentheses are split at commas and the comment goes to the first.
    pub fn parse(raw: &PlainField) -> Result<Self, FieldError> {
        let mut institutes = Vec::new();
        for pointer in raw.pointers() {
            let text = raw.text(pointer).unwrap_or_default();
            institutes.extend(parse_text(&text)?);
        }
        Ok(Self {
            raw: raw.clone(),
            institutes,
        })
    }
}

impl fmt::Display for InstituteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.institutes.iter().map(Institute::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

fn parse_text(text: &str) -> Result<Vec<Institute>, FieldError> {
    let error = |message: String| FieldError::InstituteParsing {
        text: text.to_string(),
        message,
    };
    let chars: Vec<char> = text.chars().collect();
    let mut institutes = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        if chars[pos].is_whitespace() {
            pos += 1;
            continue;
        }
        if chars[pos] != '(' {
            return Err(error(format!("expected '(' at column {pos}")));
        }
        let close = matching_paren(&chars, pos)
            .ok_or_else(|| error(format!("unbalanced '(' at column {pos}")))?;
        let codes: String = chars[pos + 1..close].iter().collect();
        let end = chars[close + 1..]
            .iter()
            .position(|c| *c == '(')
            .map_or(chars.len(), |offset| close + 1 + offset);
        let comment = squash_spaces(&chars[close + 1..end].iter().collect::<String>());

        let mut codes = codes.split(',').map(str::trim).filter(|c| !c.is_empty());
        let first = codes
            .next()
            .ok_or_else(|| error(format!("empty institute code at column {pos}")))?;
        institutes.push(Institute::resolve(first, &comment));
        institutes.extend(codes.map(|code| Institute::resolve(code, "")));
        pos = end;
    }
    Ok(institutes)
}
