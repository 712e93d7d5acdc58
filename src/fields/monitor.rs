use std::collections::BTreeMap;
use std::fmt;

use crate::reaction::{parse_measurement, Measurement};
use crate::record::{PlainField, NO_POINTER};

use super::text::is_balanced;
use super::FieldError;

const HEADING_MARK: &str = "((MONIT";

/// One monitor: a reaction, free text, or both, with the DATA heading of its column
#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    /// Monitor reaction, `None` for free text only
    pub measurement: Option<Measurement>,
    /// Free text
    pub comment: String,
    /// DATA column heading such as `MONIT1`
    pub heading: Option<String>,
}

impl Monitor {
    fn parse(pointer: char, item: &str) -> Result<Self, FieldError> {
        let mut text = item.to_string();
        let mut heading = None;
        if let Some(start) = item.find(HEADING_MARK) {
            let rest = &item[start + HEADING_MARK.len()..];
            if let Some(close) = rest.find(')') {
                heading = Some(format!("MONIT{}", &rest[..close]));
                text = format!("({}", &rest[close + 1..]);
            }
        }

        if !text.starts_with('(') {
            return Ok(Self {
                measurement: None,
                comment: text,
                heading,
            });
        }
        let (measurement, comment) =
            parse_measurement(&text).map_err(|source| FieldError::ReactionParsing {
                pointer,
                text: text.clone(),
                source,
            })?;
        Ok(Self {
            measurement: Some(measurement),
            comment,
            heading,
        })
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(heading) = &self.heading {
            write!(f, "{heading}: ")?;
        }
        match (&self.measurement, self.comment.is_empty()) {
            (Some(m), true) => write!(f, "{m}"),
            (Some(m), false) => write!(f, "{m}, {}", self.comment),
            (None, _) => write!(f, "{}", self.comment),
        }
    }
}

/// An interpreted MONITOR field, a list of monitors per footnote pointer
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorField {
    /// The raw field
    pub raw: PlainField,
    /// Monitors per pointer
    pub monitors: BTreeMap<char, Vec<Monitor>>,
}

impl MonitorField {
    /// Parse every pointer.
    ///
    /// A line opening with `(` or `((` starts a new monitor (pulling in further
    /// lines until its parentheses balance); any other line continues the
    /// previous monitor's text.
    pub fn parse(raw: &PlainField) -> Result<Self, FieldError> {
        let mut monitors = BTreeMap::new();
        for pointer in raw.pointers() {
            let lines = raw.lines(pointer).unwrap_or_default();
            let parsed = split_items(lines)
                .iter()
                .map(|item| Monitor::parse(pointer, item))
                .collect::<Result<Vec<_>, _>>()?;
            monitors.insert(pointer, parsed);
        }
        Ok(Self {
            raw: raw.clone(),
            monitors,
        })
    }

    /// Monitors under `pointer`
    pub fn get(&self, pointer: char) -> Option<&[Monitor]> {
        self.monitors.get(&pointer).map(Vec::as_slice)
    }

    /// Monitors for a dataset built under `pointer`: its own, else the unpointed ones
    pub fn for_pointer(&self, pointer: char) -> Option<&[Monitor]> {
        self.get(pointer).or_else(|| self.get(NO_POINTER))
    }
}

impl fmt::Display for MonitorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .monitors
            .iter()
            .map(|(pointer, monitors)| {
                let body = monitors
                    .iter()
                    .map(Monitor::to_string)
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

fn split_items(lines: &[String]) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    let mut queue = lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty());
    while let Some(line) = queue.next() {
        if line.starts_with('(') {
            let mut item = line.to_string();
            while !is_balanced(&item) {
                match queue.next() {
                    Some(next) => item.push_str(next),
                    None => break,
                }
            }
            items.push(item);
        } else if let Some(last) = items.last_mut() {
            last.push(' ');
            last.push_str(line);
        } else {
            items.push(line.to_string());
        }
    }
    items
}
