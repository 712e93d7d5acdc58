use std::fmt;

use super::ParticleError;

/// Isomer state attached to a nucleus with a `-G`, `-M`, `-M2`, `-L` or `-T` suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsomerTag {
    /// Ground state (`G`)
    Ground,
    /// Metastable level `n` (`M` and `L` are level 1)
    Metastable(u8),
    /// Sum over all states (`T`)
    Total,
}

impl IsomerTag {
    fn is_metastable(self) -> bool {
        matches!(self, IsomerTag::Metastable(_))
    }

    /// EXFOR code, e.g. `M2`
    pub fn code(self) -> String {
        match self {
            IsomerTag::Ground => "G".to_string(),
            IsomerTag::Metastable(n) => format!("M{n}"),
            IsomerTag::Total => "T".to_string(),
        }
    }
}

impl fmt::Display for IsomerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsomerTag::Ground => write!(f, "0"),
            IsomerTag::Metastable(n) => write!(f, "{n}"),
            IsomerTag::Total => Ok(()),
        }
    }
}

/// One isomer suffix term together with the operator in front of it.
///
/// In `79-AU-196-G+M1` the terms are `(-, G)` and `(+, M1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsomerTerm {
    /// `-`, `+`, `/` or `*`
    pub op: char,
    /// Parsed state
    pub tag: IsomerTag,
}

/// Parse the isomer suffix of a nucleus token (everything after the mass number).
///
/// `whole` is the full token, used in error messages.
pub fn parse_isomer_terms(suffix: &str, whole: &str) -> Result<Vec<IsomerTerm>, ParticleError> {
    let chars: Vec<char> = suffix.chars().collect();
    let mut terms = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let op = chars[i];
        if !matches!(op, '-' | '+' | '/' | '*') {
            return Err(ParticleError::parsing(
                whole,
                format!("expected isomer separator, found '{op}'"),
            ));
        }
        i += 1;
        if i == chars.len() {
            if op == '-' {
                // trailing dash, e.g. "94-PU-240-"
                break;
            }
            return Err(ParticleError::parsing(whole, "dangling isomer operator"));
        }
        let letter = chars[i].to_ascii_uppercase();
        i += 1;
        let digits_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let digits: String = chars[digits_start..i].iter().collect();
        let level = if digits.is_empty() {
            None
        } else {
            Some(
                digits
                    .parse::<u8>()
                    .map_err(|e| ParticleError::parsing(whole, format!("bad isomer level: {e}")))?,
            )
        };
        let tag = match (letter, level) {
            ('G', None) => IsomerTag::Ground,
            ('T', None) => IsomerTag::Total,
            ('M' | 'L', None) => IsomerTag::Metastable(1),
            ('M' | 'L', Some(n)) => IsomerTag::Metastable(n),
            _ => {
                return Err(ParticleError::parsing(
                    whole,
                    format!("unknown isomer state '{letter}{digits}'"),
                ))
            }
        };
        terms.push(IsomerTerm { op, tag });
    }
    Ok(terms)
}

/// Whether the terms describe arithmetic over several states rather than one state.
///
/// True when a ground or total state is combined with a metastable one, or when
/// more than one metastable state appears.
pub fn is_isomer_math(terms: &[IsomerTerm]) -> bool {
    let metastable = terms.iter().filter(|t| t.tag.is_metastable()).count();
    let other = terms.iter().any(|t| !t.tag.is_metastable());
    (other && metastable > 0) || metastable > 1
}
