use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::dictionary::{dictionaries, DictionaryKind};
use crate::particle::elements::capitalize;
use crate::record::{PlainField, NO_POINTER};

use super::text::matching_paren;
use super::FieldError;

/// Publication type name for a reference type letter
pub fn publication_type(reftype: &str) -> Option<&'static str> {
    Some(match reftype {
        "A" => "Abstract",
        "K" => "Abstract of Journal",
        "J" => "Journal",
        "C" | "S" => "Conf. Proc.",
        "P" => "Prog. Report",
        "R" => "Lab Report",
        "B" => "Book",
        "W" => "Private Comm.",
        "T" => "Thesis",
        "X" => "Preprint",
        _ => return None,
    })
}

/// Normalize an EXFOR date to a 4-digit year.
///
/// `YYYYMMDD` and `YYYYMM` drop the month and day, `YYMM` keeps `YY`, and a
/// 2-digit year above 10 is read as 19xx, otherwise 20xx.
pub fn parse_year(date: &str) -> Option<String> {
    let digits: String = date.chars().filter(|c| *c != ')').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut year = digits.as_str();
    if year.len() == 6 {
        year = &year[..4];
    }
    if year.len() == 8 {
        year = &year[..4];
    }
    if year.len() == 4 {
        if year.starts_with("19") || year.starts_with("20") {
            return Some(year.to_string());
        }
        year = &year[..2];
    }
    if year.len() == 2 {
        let century = if year.parse::<u32>().ok()? > 10 { "19" } else { "20" };
        return Some(format!("{century}{year}"));
    }
    Some(year.to_string())
}

/// One reference code such as `J,NIM,217,397,1983`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceCode {
    /// Reference type letter (`J` journal, `R` report, ...)
    pub reftype: String,
    /// Journal, report or author name
    pub name: String,
    /// Volume, page and similar pieces
    pub details: Vec<String>,
    /// Date as written
    pub date: String,
    /// 4-digit year
    pub year: String,
    /// Expanded name, trailing space included
    pub pretty_name: String,
}

impl ReferenceCode {
    /// Parse the comma separated inside of one code
    pub fn parse(code: &str) -> Result<Self, FieldError> {
        let code: String = code.chars().filter(|c| !c.is_whitespace()).collect();
        let parts: Vec<&str> = code.split(',').collect();
        if parts.len() < 3 {
            return Err(FieldError::reference(&code, "expected type, name and date"));
        }
        let reftype = parts[0].to_string();
        let name = parts[1].to_string();
        let date = parts[parts.len() - 1].to_string();
        let details = parts[2..parts.len() - 1].iter().map(|d| d.trim().to_string()).collect();
        let year = parse_year(&date).ok_or_else(|| {
            FieldError::reference(&code, format!("date should only have digits, found: {date}"))
        })?;
        let pretty_name = pretty_name(&reftype, &name)
            .ok_or_else(|| FieldError::reference(&code, format!("unknown reference type '{reftype}'")))?;
        Ok(Self {
            reftype,
            name,
            details,
            date,
            year,
            pretty_name,
        })
    }

    /// Publication type name, see [`publication_type`]
    pub fn publication_type(&self) -> Option<&'static str> {
        publication_type(&self.reftype)
    }

    /// EXFOR form
    pub fn exfor_style(&self) -> String {
        let mut parts = vec![self.reftype.clone(), self.name.clone()];
        parts.extend(self.details.iter().cloned());
        parts.push(self.date.clone());
        parts.join(",")
    }
}

impl fmt::Display for ReferenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} ({})", self.pretty_name, self.details.join(", "), self.year)
    }
}

/// Expanded name; `None` when the type letter is not a reference type at all.
/// Codes missing from their dictionary fall back to `type,name`.
fn pretty_name(reftype: &str, name: &str) -> Option<String> {
    let dicts = dictionaries();
    let fallback = || format!("{reftype},{name}");
    let type_name = || dicts.get(DictionaryKind::ReferenceTypes).field(reftype, 1);
    let pretty = match reftype {
        "A" | "B" | "C" => dicts
            .lookup(DictionaryKind::ConferencesAndBooks, name)
            .map(|n| format!("{n} ")),
        "J" | "K" => dicts.lookup(DictionaryKind::Journals, name).map(|n| format!("{n} ")),
        "P" | "R" | "S" => type_name().map(|t| format!("{t}: {name} ")),
        "T" | "W" | "X" | "0" | "3" | "4" => {
            type_name().map(|t| format!("{t}: {} ", capitalize(name)))
        }
        _ => return None,
    };
    Some(pretty.unwrap_or_else(fallback))
}

/// A reference code with the free text that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitedReference {
    /// The code
    pub code: ReferenceCode,
    /// Free text after the code, shared by all codes of a tautology
    pub comment: String,
}

/// An interpreted REFERENCE field
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceField {
    /// The raw field
    pub raw: PlainField,
    /// References per pointer, in order of appearance
    pub references: BTreeMap<char, Vec<CitedReference>>,
}

impl ReferenceField {
    /// Parse every reference.
    ///
    /// A line opening with `(` starts a reference and other lines continue it.
    /// `((A)=(B)=(C)) comment` lists the same work under several codes.
    pub fn parse(raw: &PlainField) -> Result<Self, FieldError> {
        let mut references = BTreeMap::new();
        for pointer in raw.pointers() {
            let mut refs = Vec::new();
            for group in group_lines(raw.lines(pointer).unwrap_or_default())? {
                refs.extend(parse_group(&group)?);
            }
            references.insert(pointer, refs);
        }
        Ok(Self {
            raw: raw.clone(),
            references,
        })
    }

    /// The first reference, which stands for the whole field
    pub fn primary(&self) -> Option<&ReferenceCode> {
        self.references.values().flatten().map(|r| &r.code).next()
    }

    /// Every code in order
    pub fn codes(&self) -> impl Iterator<Item = &ReferenceCode> {
        self.references.values().flatten().map(|r| &r.code)
    }
}

impl fmt::Display for ReferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .references
            .iter()
            .map(|(pointer, refs)| {
                let body = refs
                    .iter()
                    .map(|r| r.code.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                if *pointer == NO_POINTER {
                    body
                } else {
                    format!("[{pointer}] {body}")
                }
            })
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

fn group_lines(lines: &[String]) -> Result<Vec<String>, FieldError> {
    let mut groups: Vec<String> = Vec::new();
    let mut in_tautology = false;
    for line in lines {
        if line.starts_with("((") {
            in_tautology = true;
            groups.push(line.clone());
        } else if !in_tautology && line.starts_with('(') {
            groups.push(line.clone());
        } else {
            match groups.last_mut() {
                Some(last) => last.push_str(line),
                None => return Err(FieldError::reference(line, "text before the first reference code")),
            }
        }
        if line.contains("))") {
            in_tautology = false;
        }
    }
    Ok(groups)
}

fn parse_group(group: &str) -> Result<Vec<CitedReference>, FieldError> {
    let chars: Vec<char> = group.chars().collect();
    let close = matching_paren(&chars, 0)
        .ok_or_else(|| FieldError::reference(group, "unbalanced parentheses"))?;
    let inner: String = chars[1..close].iter().collect();
    let comment = chars[close + 1..].iter().collect::<String>().trim().to_string();

    let codes = if group.starts_with("((") {
        split_tautology(&inner).ok_or_else(|| FieldError::reference(group, "malformed tautology"))?
    } else {
        vec![inner]
    };
    codes
        .iter()
        .map(|code| {
            Ok(CitedReference {
                code: ReferenceCode::parse(code)?,
                comment: comment.clone(),
            })
        })
        .collect()
}

/// `(A)=(B)=(C)` → `[A, B, C]`
fn split_tautology(inner: &str) -> Option<Vec<String>> {
    let chars: Vec<char> = inner.chars().collect();
    let mut codes = Vec::new();
    let mut pos = 0;
    loop {
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }
        if chars.get(pos) != Some(&'(') {
            return None;
        }
        let close = matching_paren(&chars, pos)?;
        codes.push(chars[pos + 1..close].iter().collect());
        pos = close + 1;
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }
        match chars.get(pos) {
            Some('=') => pos += 1,
            None => return Some(codes),
            Some(_) => return None,
        }
    }
}
