//! Integration tests for exfor
//!
//! These tests run whole entries through tokenizing, field interpretation,
//! column matching and dataset assembly.

use exfor::dataset::{
    extract_batch, extract_datasets, extract_request, DatasetError, DatasetKey, EntryMetadata,
    ExtractConfig,
};
use exfor::record::Entry;
use tempfile::tempdir;

const SMITH: &str = include_str!("fixtures/12898.x4");
const HATANAKA: &str = include_str!("fixtures/E0783.x4");

fn entry(text: &str) -> Result<Entry, DatasetError> {
    let lines: Vec<&str> = text.lines().collect();
    Ok(Entry::from_lines(&lines)?)
}

fn close(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|a| (a - expected).abs() <= 1e-9 * expected.abs().max(1.0))
}

/// Every pointer of every SubEntry with data becomes a dataset
#[test]
fn test_dataset_keys() -> Result<(), DatasetError> {
    let report = extract_datasets(&entry(SMITH)?, &ExtractConfig::default());
    assert_eq!(report.error_count(), 0, "{:?}", report.errors);

    let keys: Vec<String> = report.datasets.keys().map(ToString::to_string).collect();
    assert_eq!(
        keys,
        vec![
            "('12898', '12898002', '1')",
            "('12898', '12898002', '2')",
            "('12898', '12898003', '1')",
            "('12898', '12898003', '2')",
        ]
    );
    for dataset in report.datasets.values() {
        assert_eq!(dataset.meta.legend(), "(1984) D.L.Smith, J.W.Meadows, et al.");
    }
    Ok(())
}

/// The text rendering of a raw ratio dataset
#[test]
fn test_raw_rendering() -> Result<(), DatasetError> {
    let report = extract_datasets(&entry(SMITH)?, &ExtractConfig::default());
    let dataset = &report.datasets[&DatasetKey::new("12898", "12898002", '1')];

    let expected = "#  Authors:   D.L.Smith, J.W.Meadows, I.Kanno\n\
#  Title:     Measured Activation Cross Sections Below 10 Mev For The 51-V(N,P)51-Ti And 51-V(N,Alpha)48-Sc Reactions.\n\
#  Year:      1984\n\
#  Institute: Argonne National Laboratory, Argonne, IL\n\
#  Reference: Annals of Nuclear Energy 11, 623 (1984); Progress report: ANL-NDM-85  (1984)\n\
#  Subent:    12898002\n\
#  Reaction:  (( Cross section for 51V(n,p)51Ti )/( Cross section for 238U(n,Fission) )) \n\
#        EN            EN-RSL-FW     DATA          ERR-S         ERR-1         ERR-T         \n\
#        MEV           MEV           NO-DIM        PER-CENT      PER-CENT      PER-CENT      \n        \
2.856         0.095         9.075e-06     47.9          15.6          50.4          \n        \
2.957         0.094         1.966e-05     20.6          9.2           22.6          \n        \
3.057         0.094         2.575e-05     15.9          20.1          25.6          \n        \
3.258         0.09          0.0001441     4.9           11.2          12.2          \n        ";
    assert_eq!(dataset.to_string(), expected);
    Ok(())
}

/// Simplification converts millibarns and halves full-width resolutions
#[test]
fn test_simplified_cross_sections() -> Result<(), DatasetError> {
    let config = ExtractConfig::default().with_simplify(true);
    let report = extract_datasets(&entry(SMITH)?, &config);
    assert_eq!(report.error_count(), 0, "{:?}", report.errors);

    let ratio = &report.datasets[&DatasetKey::new("12898", "12898002", '1')];
    assert_eq!(ratio.units, vec!["MeV", "no-dim", "MeV", "no-dim"]);
    assert!(close(ratio.cell(1, 3), 1.966e-05 * 0.226));

    let direct = &report.datasets[&DatasetKey::new("12898", "12898003", '2')];
    assert_eq!(direct.labels, vec!["Energy", "Data", "d(Energy)", "d(Data)"]);
    assert_eq!(direct.units, vec!["MeV", "barns", "MeV", "barns"]);
    assert!(close(direct.cell(0, 0), 4.643));
    assert!(close(direct.cell(0, 1), 0.002236));
    assert!(close(direct.cell(0, 2), 0.138));
    assert!(close(direct.cell(0, 3), 0.000140868));
    assert_eq!(direct.monitors.len(), 1);
    Ok(())
}

/// Entry-level COMMON columns are copied into each row of the SubEntry's table
#[test]
fn test_entry_common_and_metadata() -> Result<(), DatasetError> {
    let e0783 = entry(HATANAKA)?;
    let meta = EntryMetadata::from_entry(&e0783)?;
    assert_eq!(meta.legend(), "(1983) K.Hatanaka, N.Matsuoka, et al.");
    assert!(meta.xmgrace_header().starts_with("#Exfor Entry E0783\n#  Authors:   K.Hatanaka"));

    let report = extract_datasets(&e0783, &ExtractConfig::default().with_simplify(true));
    let dataset = &report.datasets[&DatasetKey::new("E0783", "E0783002", ' ')];
    assert_eq!(dataset.labels, vec!["EN", "ANG-CM", "DATA", "DATA-ERR", "FLAG"]);
    assert_eq!(dataset.numrows(), 6);
    assert!(dataset.column(0).iter().all(|v| *v == Some(56.0)));
    assert_eq!(dataset.cell(3, 4), Some(2.0));
    assert_eq!(dataset.cell(4, 4), None);
    Ok(())
}

/// A broken SubEntry costs only its own datasets
#[test]
fn test_failing_subentry() -> Result<(), DatasetError> {
    let broken = "SUBENT        12898004
BIB                  1          1
REACTION   (23-V-51(N,P)22-TI-51,,SIG)
ENDBIB               1
NOCOMMON             0          0
DATA                 2          2
EN         DATA
MEV        MB
2.1        broken
2.2        3.3
ENDDATA              4
ENDSUBENT            8
ENDENTRY";
    let text = SMITH.replace("ENDENTRY              3", broken);
    let report = extract_datasets(&entry(&text)?, &ExtractConfig::default().with_simplify(true));

    assert_eq!(report.len(), 4);
    assert_eq!(report.errors.len(), 1);
    let message = &report.errors[&DatasetKey::new("12898", "12898004", ' ')];
    assert!(message.starts_with("Encountered BrokenNumberError"), "{message}");
    Ok(())
}

/// Requests hold many entries; batches agree with one-by-one extraction
#[test]
fn test_request_and_batch() -> Result<(), DatasetError> {
    let request = format!("REQUEST          00001\n{SMITH}{HATANAKA}ENDREQUEST           2\n");
    let lines: Vec<&str> = request.lines().collect();
    let config = ExtractConfig::default().with_simplify(true).with_make_all_columns(true);

    let from_request = extract_request(&lines, &config);
    assert_eq!(from_request.len(), 5);
    assert!(from_request.entry_errors.is_empty());

    let entries = vec![entry(SMITH)?, entry(HATANAKA)?];
    let from_batch = extract_batch(&entries, &config);
    assert_eq!(from_batch.datasets, from_request.datasets);
    Ok(())
}

/// Datasets written as CSV keep labels, units and values
#[test]
fn test_csv_files() -> Result<(), DatasetError> {
    let config = ExtractConfig::default().with_simplify(true);
    let report = extract_datasets(&entry(SMITH)?, &config);
    let dir = tempdir()?;

    for (key, dataset) in &report.datasets {
        let path = dir.path().join(format!("{}-{}.csv", key.subentry, key.pointer));
        dataset.save_csv(&path)?;
    }
    let text = std::fs::read_to_string(dir.path().join("12898003-2.csv"))?;
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Energy,Data,d(Energy),d(Data)"));
    assert_eq!(lines.next(), Some("MeV,barns,MeV,barns"));
    assert_eq!(lines.count(), 3);
    Ok(())
}

/// Rendering an entry back to EXFOR text and reading it again changes nothing
#[test]
fn test_entry_round_trip() -> Result<(), DatasetError> {
    let original = entry(SMITH)?;
    let rendered = original.exfor_style();
    let again = entry(&rendered)?;
    assert_eq!(again, original);

    let config = ExtractConfig::default().with_simplify(true);
    assert_eq!(
        extract_datasets(&again, &config).datasets,
        extract_datasets(&original, &config).datasets
    );
    Ok(())
}
