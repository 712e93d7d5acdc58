use serde::Serialize;

use crate::fields::{AuthorField, FieldError, InstituteField, ReferenceField, TitleField};
use crate::record::{Bib, Entry};

/// Prefix of every header line
pub const COMMENT: &str = "#";

const MISSING: &str = "None";
const UNKNOWN_SUBENTRY: &str = "????????";
const REFERENCE_FAILED: &str = "Parsing failed";

/// Bibliographic summary of a BIB section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BibMetadata {
    /// Authors as `Initials.Family`
    pub authors: Option<Vec<String>>,
    /// Institute display
    pub institute: Option<String>,
    /// Title-cased title
    pub title: Option<String>,
    /// Reference display
    pub reference: Option<String>,
    /// Date of the first reference as written
    pub reference_date: Option<String>,
    /// Publication type name of the first reference
    pub publication_type: Option<String>,
    /// 4-digit year of the first reference
    pub year: Option<String>,
    /// SubEntry accession number
    pub subent: Option<String>,
}

impl BibMetadata {
    /// Summarize a BIB section.
    ///
    /// AUTHOR and INSTITUTE failures are returned. A REFERENCE that cannot be
    /// parsed leaves a `Parsing failed` placeholder.
    pub fn from_bib(bib: &Bib, subent: &str) -> Result<Self, FieldError> {
        let authors = bib
            .get("AUTHOR")
            .map(AuthorField::parse)
            .transpose()?
            .map(|field| field.authors);
        let institute = bib
            .get("INSTITUTE")
            .map(InstituteField::parse)
            .transpose()?
            .map(|field| field.to_string());
        let title = bib.get("TITLE").map(|raw| TitleField::parse(raw).to_string());

        let mut meta = Self {
            authors,
            institute,
            title,
            subent: Some(subent.to_string()),
            ..Self::default()
        };
        if let Some(raw) = bib.get("REFERENCE") {
            match ReferenceField::parse(raw) {
                Ok(field) => {
                    meta.reference = Some(field.to_string());
                    if let Some(code) = field.primary() {
                        meta.reference_date = Some(code.date.clone());
                        meta.year = Some(code.year.clone());
                        meta.publication_type = code.publication_type().map(str::to_string);
                    }
                }
                Err(err) => {
                    log::debug!("Reference of {subent} kept as placeholder: {err}");
                    meta.reference = Some(REFERENCE_FAILED.to_string());
                    meta.reference_date = Some("?".to_string());
                    meta.year = Some("?".to_string());
                    meta.publication_type = Some("?".to_string());
                }
            }
        }
        Ok(meta)
    }

    /// `self` with every item `other` has replaced by `other`'s
    pub fn merged(&self, other: &BibMetadata) -> BibMetadata {
        fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
            over.clone().or_else(|| base.clone())
        }
        BibMetadata {
            authors: pick(&self.authors, &other.authors),
            institute: pick(&self.institute, &other.institute),
            title: pick(&self.title, &other.title),
            reference: pick(&self.reference, &other.reference),
            reference_date: pick(&self.reference_date, &other.reference_date),
            publication_type: pick(&self.publication_type, &other.publication_type),
            year: pick(&self.year, &other.year),
            subent: pick(&self.subent, &other.subent),
        }
    }

    fn or_missing(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or(MISSING)
    }

    fn author_list(&self) -> String {
        self.authors
            .as_ref()
            .map_or_else(|| MISSING.to_string(), |a| a.join(", "))
    }

    /// Authors, cut to the first two with `et al.` when there are more
    fn short_authors(&self) -> String {
        match &self.authors {
            Some(authors) if authors.len() > 2 => format!("{}, et al.", authors[..2].join(", ")),
            _ => self.author_list(),
        }
    }

    /// Comment block for plot files
    pub fn xmgrace_header(&self) -> String {
        [
            format!("{COMMENT}  Authors:   {}", self.author_list()),
            format!("{COMMENT}  Title:     {}", Self::or_missing(&self.title)),
            format!("{COMMENT}  Year:      {}", Self::or_missing(&self.year)),
            format!("{COMMENT}  Institute: {}", Self::or_missing(&self.institute)),
            format!("{COMMENT}  Reference: {}", Self::or_missing(&self.reference)),
            format!(
                "{COMMENT}  Subent:    {}",
                self.subent.as_deref().unwrap_or(UNKNOWN_SUBENTRY)
            ),
        ]
        .join("\n")
    }

    /// Full citation of the data
    pub fn citation(&self) -> String {
        format!(
            "{}, {};  Data taken from the EXFOR database, file EXFOR {} dated {}, \
             retrieved from the IAEA Nuclear Data Services website.",
            self.short_authors(),
            Self::or_missing(&self.reference),
            self.subent.as_deref().unwrap_or(UNKNOWN_SUBENTRY),
            Self::or_missing(&self.reference_date),
        )
    }

    /// Short plot legend, `(1983) K.Hatanaka, N.Matsuoka, et al.`
    pub fn legend(&self) -> String {
        format!("({}) {}", Self::or_missing(&self.year), self.short_authors())
    }
}

/// Summary of a whole entry, taken from SubEntry 001
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryMetadata {
    /// Entry accession number
    pub accnum: String,
    /// Whether the entry is withdrawn
    pub deleted: bool,
    /// SubEntry accession numbers in order
    pub subentries: Vec<String>,
    /// Metadata of SubEntry 001
    pub bib: BibMetadata,
}

impl EntryMetadata {
    /// Summarize an entry
    pub fn from_entry(entry: &Entry) -> Result<Self, FieldError> {
        let subent = format!("{}001", entry.accnum);
        let bib = match entry.main_subentry().and_then(|s| s.bib.as_ref()) {
            Some(bib) => BibMetadata::from_bib(bib, &subent)?,
            None => BibMetadata {
                subent: Some(subent),
                ..BibMetadata::default()
            },
        };
        Ok(Self {
            accnum: entry.accnum.clone(),
            deleted: entry.is_deleted(),
            subentries: entry.keys().map(str::to_string).collect(),
            bib,
        })
    }

    fn deleted_notice(&self) -> String {
        format!("ENTRY {} DELETED", self.accnum)
    }

    /// Comment block naming the entry, then [`BibMetadata::xmgrace_header`]
    pub fn xmgrace_header(&self) -> String {
        if self.deleted {
            return self.deleted_notice();
        }
        format!("{COMMENT}Exfor Entry {}\n{}", self.accnum, self.bib.xmgrace_header())
    }

    /// Short citation, or the deleted notice
    pub fn citation(&self) -> String {
        if self.deleted {
            return self.deleted_notice();
        }
        self.bib.citation()
    }

    /// Plot legend, or the deleted notice
    pub fn legend(&self) -> String {
        if self.deleted {
            return self.deleted_notice();
        }
        self.bib.legend()
    }
}
