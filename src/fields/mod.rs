//! # Field Interpreters Module
//!
//! Turns raw BIB fields ([`PlainField`]) into structured values. The field tag
//! picks the interpreter:
//!
//! | Tag | Interpreter |
//! |-----|-------------|
//! | `REACTION` | [`ReactionField`] |
//! | `MONITOR` | [`MonitorField`] |
//! | `REFERENCE`, `REL-REF` | [`ReferenceField`] |
//! | `AUTHOR` | [`AuthorField`] |
//! | `INSTITUTE` | [`InstituteField`] |
//! | `TITLE` | [`TitleField`] |
//!
//! Anything else stays plain text. Interpreting never touches the raw field,
//! so a field that fails to parse can still be shown as written.
//!
//! ## Example
//!
//! ```rust
//! use exfor::fields::{Field, FieldKind};
//! use exfor::record::PlainField;
//!
//! let raw = PlainField::parse(&["AUTHOR     (D.L.SMITH,J.W.MEADOWS,I.KANNO)"]);
//! assert_eq!(FieldKind::from_tag(&raw.tag), FieldKind::Author);
//!
//! let field = Field::interpret(&raw)?;
//! assert_eq!(field.to_string(), "D.L.Smith, J.W.Meadows, I.Kanno");
//! # Ok::<(), exfor::fields::FieldError>(())
//! ```

mod author;
mod error;
mod institute;
mod monitor;
mod reaction;
mod reference;
mod text;
mod title;

#[cfg(test)]
mod tests;

use std::fmt;

use crate::record::PlainField;

pub use author::{AuthorField, NO_AUTHOR_MARKERS};
pub use error::FieldError;
pub use institute::{Institute, InstituteField};
pub use monitor::{Monitor, MonitorField};
pub use reaction::{ReactionEntry, ReactionField};
pub use reference::{parse_year, publication_type, CitedReference, ReferenceCode, ReferenceField};
pub use text::title_case;
pub use title::TitleField;

/// Which interpreter a BIB field tag selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text
    Plain,
    /// `REACTION`
    Reaction,
    /// `MONITOR`
    Monitor,
    /// `REFERENCE` and `REL-REF`
    Reference,
    /// `AUTHOR`
    Author,
    /// `TITLE`
    Title,
    /// `INSTITUTE`
    Institute,
}

impl FieldKind {
    /// Map a field tag onto its interpreter
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "REACTION" => FieldKind::Reaction,
            "MONITOR" => FieldKind::Monitor,
            "REFERENCE" | "REL-REF" => FieldKind::Reference,
            "AUTHOR" => FieldKind::Author,
            "TITLE" => FieldKind::Title,
            "INSTITUTE" => FieldKind::Institute,
            _ => FieldKind::Plain,
        }
    }
}

/// An interpreted BIB field
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A field without a dedicated interpreter
    Plain(PlainField),
    /// REACTION
    Reaction(ReactionField),
    /// MONITOR
    Monitor(MonitorField),
    /// REFERENCE
    Reference(ReferenceField),
    /// AUTHOR
    Author(AuthorField),
    /// TITLE
    Title(TitleField),
    /// INSTITUTE
    Institute(InstituteField),
}

impl Field {
    /// Run the interpreter that the field's tag selects
    pub fn interpret(raw: &PlainField) -> Result<Self, FieldError> {
        Ok(match FieldKind::from_tag(&raw.tag) {
            FieldKind::Plain => Field::Plain(raw.clone()),
            FieldKind::Reaction => Field::Reaction(ReactionField::parse(raw)?),
            FieldKind::Monitor => Field::Monitor(MonitorField::parse(raw)?),
            FieldKind::Reference => Field::Reference(ReferenceField::parse(raw)?),
            FieldKind::Author => Field::Author(AuthorField::parse(raw)?),
            FieldKind::Title => Field::Title(TitleField::parse(raw)),
            FieldKind::Institute => Field::Institute(InstituteField::parse(raw)?),
        })
    }

    /// Interpreter that produced this field
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Plain(_) => FieldKind::Plain,
            Field::Reaction(_) => FieldKind::Reaction,
            Field::Monitor(_) => FieldKind::Monitor,
            Field::Reference(_) => FieldKind::Reference,
            Field::Author(_) => FieldKind::Author,
            Field::Title(_) => FieldKind::Title,
            Field::Institute(_) => FieldKind::Institute,
        }
    }

    /// The field as written
    pub fn raw(&self) -> &PlainField {
        match self {
            Field::Plain(raw) => raw,
            Field::Reaction(f) => &f.raw,
            Field::Monitor(f) => &f.raw,
            Field::Reference(f) => &f.raw,
            Field::Author(f) => &f.raw,
            Field::Title(f) => &f.raw,
            Field::Institute(f) => &f.raw,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Plain(raw) => write!(f, "{raw}"),
            Field::Reaction(field) => write!(f, "{field}"),
            Field::Monitor(field) => write!(f, "{field}"),
            Field::Reference(field) => write!(f, "{field}"),
            Field::Author(field) => write!(f, "{field}"),
            Field::Title(field) => write!(f, "{field}"),
            Field::Institute(field) => write!(f, "{field}"),
        }
    }
}

