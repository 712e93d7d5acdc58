use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, warn};
use serde::{Serialize, Serializer};

use crate::fields::{FieldError, MonitorField, ReactionEntry, ReactionField};
use crate::record::{entry_accession, split_request, Entry, SubEntry, Table};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{BibMetadata, Dataset, DatasetError, ExtractConfig, QuantityClass};

/// Where a dataset comes from: entry, SubEntry and footnote pointer
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatasetKey {
    /// Entry accession number
    pub entry: String,
    /// SubEntry accession number
    pub subentry: String,
    /// Footnote pointer, `' '` when the reaction has none
    pub pointer: char,
}

impl DatasetKey {
    /// Key for one dataset
    pub fn new(entry: impl Into<String>, subentry: impl Into<String>, pointer: char) -> Self {
        Self {
            entry: entry.into(),
            subentry: subentry.into(),
            pointer,
        }
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}', '{}', '{}')", self.entry, self.subentry, self.pointer)
    }
}

// serialized as its display form so it can key a JSON object
impl Serialize for DatasetKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Datasets that were built and the errors of those that were not
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    /// Successfully built datasets
    pub datasets: BTreeMap<DatasetKey, Dataset>,
    /// `Encountered <Kind>Error: <message>` per failed dataset
    pub errors: BTreeMap<DatasetKey, String>,
    /// Entries whose records could not be tokenized, by accession number
    pub entry_errors: BTreeMap<String, String>,
}

impl ExtractionReport {
    /// Number of datasets built
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Whether no dataset was built
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Total number of failures, datasets and entries
    pub fn error_count(&self) -> usize {
        self.errors.len() + self.entry_errors.len()
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: ExtractionReport) {
        self.datasets.extend(other.datasets);
        self.errors.extend(other.errors);
        self.entry_errors.extend(other.entry_errors);
    }

    fn record(&mut self, key: DatasetKey, result: Result<Dataset, DatasetError>) {
        match result {
            Ok(dataset) => {
                self.errors.remove(&key);
                self.datasets.insert(key, dataset);
            }
            Err(err) => {
                warn!("Dataset {key} failed: {err}");
                self.datasets.remove(&key);
                self.errors.insert(key, err.report());
            }
        }
    }
}

/// What a BIB section contributes to the datasets built under it
struct BibContext {
    meta: Result<BibMetadata, FieldError>,
    reactions: BTreeMap<char, Result<ReactionEntry, FieldError>>,
    monitors: Result<Option<MonitorField>, FieldError>,
}

impl BibContext {
    fn of(subentry: &SubEntry) -> Self {
        let Some(bib) = subentry.bib.as_ref() else {
            return Self {
                meta: Ok(BibMetadata {
                    subent: Some(subentry.accnum.clone()),
                    ..BibMetadata::default()
                }),
                reactions: BTreeMap::new(),
                monitors: Ok(None),
            };
        };
        Self {
            meta: BibMetadata::from_bib(bib, &subentry.accnum),
            reactions: bib.get("REACTION").map(ReactionField::parse_each).unwrap_or_default(),
            monitors: bib.get("MONITOR").map(MonitorField::parse).transpose(),
        }
    }
}

/// Build every dataset of an entry.
///
/// Datasets are built for each SubEntry with a DATA section, once per pointer
/// of the entry-level REACTION field and once per pointer of the SubEntry's
/// own, the latter winning on a shared key. A failing dataset is recorded in
/// [`ExtractionReport::errors`] and never stops the others. Deleted entries
/// yield nothing.
pub fn extract_datasets(entry: &Entry, config: &ExtractConfig) -> ExtractionReport {
    let mut report = ExtractionReport::default();
    if entry.is_deleted() {
        info!("Entry {} is deleted, skipping", entry.accnum);
        return report;
    }

    let main = entry.main_subentry();
    let main_context = main.map(BibContext::of);
    let main_common = main.and_then(|s| s.common.as_ref());

    for subentry in entry.subentries.values() {
        let Some(data) = subentry.data.as_ref() else {
            continue;
        };
        if !config.keeps(&subentry.accnum) {
            debug!("Subentry {} not requested", subentry.accnum);
            continue;
        }
        let context = BibContext::of(subentry);
        let common = [main_common, subentry.common.as_ref()];

        for source in main_context.iter().chain([&context]) {
            for (&pointer, reaction) in &source.reactions {
                let key = DatasetKey::new(&entry.accnum, &subentry.accnum, pointer);
                let result = build_dataset(
                    reaction,
                    source,
                    main_context.as_ref(),
                    &context,
                    data,
                    &common,
                    pointer,
                    config,
                );
                report.record(key, result);
            }
        }
    }
    debug!(
        "Entry {}: {} datasets, {} errors",
        entry.accnum,
        report.datasets.len(),
        report.errors.len()
    );
    report
}

fn build_dataset(
    reaction: &Result<ReactionEntry, FieldError>,
    source: &BibContext,
    main: Option<&BibContext>,
    own: &BibContext,
    data: &Table,
    common: &[Option<&Table>],
    pointer: char,
    config: &ExtractConfig,
) -> Result<Dataset, DatasetError> {
    let reaction = reaction.as_ref().map_err(|err| err.clone())?;
    let mut meta = match main {
        Some(main) => main.meta.clone()?,
        None => BibMetadata::default(),
    };
    meta = meta.merged(&own.meta.clone()?);
    let monitors = match &source.monitors {
        Ok(Some(field)) => field.for_pointer(pointer).map(<[_]>::to_vec).unwrap_or_default(),
        Ok(None) => Vec::new(),
        Err(err) => return Err(err.clone().into()),
    };

    let class = QuantityClass::of(&reaction.measurement)?;
    let mut dataset = Dataset::new(class)
        .with_meta(meta)
        .with_reaction(reaction.measurement.clone(), reaction.comment.clone())
        .with_monitors(monitors);
    dataset.set_data(data, common, pointer)?;

    if config.simplify {
        dataset = dataset.simplified(config)?;
    }
    Ok(dataset)
}

/// Build the datasets of many entries into one report.
///
/// With the `parallel` feature the entries are processed on the rayon pool.
pub fn extract_batch(entries: &[Entry], config: &ExtractConfig) -> ExtractionReport {
    #[cfg(feature = "parallel")]
    let reports: Vec<ExtractionReport> = entries
        .par_iter()
        .map(|entry| extract_datasets(entry, config))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let reports: Vec<ExtractionReport> = entries
        .iter()
        .map(|entry| extract_datasets(entry, config))
        .collect();

    reports.into_iter().fold(ExtractionReport::default(), |mut acc, report| {
        acc.merge(report);
        acc
    })
}

/// Tokenize a multi-entry request and build every dataset in it.
///
/// Entries that fail to tokenize are listed in
/// [`ExtractionReport::entry_errors`]; the rest are processed normally.
pub fn extract_request<S: AsRef<str>>(lines: &[S], config: &ExtractConfig) -> ExtractionReport {
    let mut report = ExtractionReport::default();
    let mut entries = Vec::new();
    for (index, chunk) in split_request(lines).iter().enumerate() {
        let accnum = entry_accession(chunk).unwrap_or_else(|| format!("#{index}"));
        match Entry::parse_filtered(&accnum, chunk, config.subentries.as_deref()) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                warn!("Entry {accnum} could not be read: {err}");
                report.entry_errors.insert(accnum, err.to_string());
            }
        }
    }
    info!("Request holds {} readable entries", entries.len());
    report.merge(extract_batch(&entries, config));
    report
}
