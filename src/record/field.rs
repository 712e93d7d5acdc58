use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Columns 0-9 of a BIB line hold the field tag
pub const TAG_WIDTH: usize = 10;
/// Column 10 holds the footnote pointer
pub const POINTER_COLUMN: usize = 10;
/// Payload runs from column 11 up to column 66
pub const LINE_WIDTH: usize = 66;

/// Pointer used for text that carries no footnote pointer
pub const NO_POINTER: char = ' ';

/// A raw BIB field: its tag and its payload lines split by footnote pointer
///
/// ```text
/// REACTION  1(30-ZN-64(N,G)30-ZN-65,,RI)
///           2(30-ZN-64(N,G)30-ZN-65,,SIG)
/// ```
///
/// A pointer in column 11 applies to that line and every following line up to
/// the next pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainField {
    /// Field tag, e.g. `REACTION`
    pub tag: String,
    /// Payload lines (columns 12-66, right-trimmed) per pointer; [`NO_POINTER`] when absent
    pub subfields: BTreeMap<char, Vec<String>>,
}

impl PlainField {
    /// Build a field from its physical lines; the first line carries the tag
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let tag = lines
            .first()
            .map(|line| columns(line.as_ref(), 0, TAG_WIDTH).trim().to_string())
            .unwrap_or_default();

        let mut subfields: BTreeMap<char, Vec<String>> = BTreeMap::new();
        let mut pointer = NO_POINTER;
        for line in lines {
            let line = line.as_ref();
            if let Some(p) = line.chars().nth(POINTER_COLUMN).filter(|c| *c != ' ') {
                pointer = p;
            }
            subfields
                .entry(pointer)
                .or_default()
                .push(columns(line, POINTER_COLUMN + 1, LINE_WIDTH).trim_end().to_string());
        }
        Self { tag, subfields }
    }

    /// Pointers in sorted order, [`NO_POINTER`] first
    pub fn pointers(&self) -> impl Iterator<Item = char> + '_ {
        self.subfields.keys().copied()
    }

    /// Raw lines under `pointer`
    pub fn lines(&self, pointer: char) -> Option<&[String]> {
        self.subfields.get(&pointer).map(Vec::as_slice)
    }

    /// Lines under `pointer`, trimmed and joined with single spaces
    pub fn text(&self, pointer: char) -> Option<String> {
        self.lines(pointer).map(join_lines)
    }

    /// Every line of every pointer, trimmed and joined
    pub fn full_text(&self) -> String {
        self.subfields
            .values()
            .map(|lines| join_lines(lines))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of physical lines
    pub fn total_len(&self) -> usize {
        self.subfields.values().map(Vec::len).sum()
    }

    /// EXFOR text with the tag in columns 1-10 and each pointer in column 11
    pub fn exfor_style(&self) -> String {
        let mut out: Vec<String> = Vec::with_capacity(self.total_len());
        for (pointer, lines) in &self.subfields {
            for (i, line) in lines.iter().enumerate() {
                let lead = if i == 0 { *pointer } else { ' ' };
                out.push(format!("{}{lead}{line}", " ".repeat(TAG_WIDTH)));
            }
        }
        if let Some(first) = out.first_mut() {
            let rest: String = first.chars().skip(TAG_WIDTH).collect();
            *first = format!("{:<width$}{rest}", self.tag, width = TAG_WIDTH);
        }
        out.join("\n")
    }
}

impl fmt::Display for PlainField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .subfields
            .iter()
            .map(|(pointer, lines)| {
                if *pointer == NO_POINTER {
                    join_lines(lines)
                } else {
                    format!("[{pointer}] {}", join_lines(lines))
                }
            })
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

fn join_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Characters `start..end` of `line`, padded with spaces when the line is short
pub(crate) fn columns(line: &str, start: usize, end: usize) -> String {
    let width = end.saturating_sub(start);
    let mut out: String = line.chars().skip(start).take(width).collect();
    let len = out.chars().count();
    if len < width {
        out.push_str(&" ".repeat(width - len));
    }
    out
}

/// Tag in columns 1-10 of a line, trimmed
pub(crate) fn line_tag(line: &str) -> String {
    columns(line, 0, TAG_WIDTH).trim().to_string()
}
