use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

#[cfg(feature = "colorized_output")]
use console::style;

use exfor::dataset::{extract_request, DatasetKey, ExtractConfig, ExtractionReport};

use super::read_lines;

/// Where and how decoded datasets go
pub struct Output {
    pub sort: bool,
    pub json: bool,
    pub csv: Option<PathBuf>,
}

/// Decode every input file into one report
pub fn run(inputs: &[PathBuf], config: &ExtractConfig, output: &Output) -> Result<()> {
    let mut report = ExtractionReport::default();
    for input in inputs {
        info!("Decoding {}", input.display());
        let lines = read_lines(input)?;
        report.merge(extract_request(&lines, config));
    }

    if output.sort {
        for dataset in report.datasets.values_mut() {
            dataset.sort();
        }
    }

    if output.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        for (key, dataset) in &report.datasets {
            println!("# {key}");
            println!("{dataset}");
        }
    }

    if let Some(dir) = &output.csv {
        write_csv(&report, dir)?;
    }

    eprintln!("{}", summary(&report));
    Ok(())
}

/// `12898002-1.csv`, or `E0783002.csv` when the reaction has no pointer
fn csv_name(key: &DatasetKey) -> String {
    if key.pointer == ' ' {
        format!("{}.csv", key.subentry)
    } else {
        format!("{}-{}.csv", key.subentry, key.pointer)
    }
}

fn write_csv(report: &ExtractionReport, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    for (key, dataset) in &report.datasets {
        let path = dir.join(csv_name(key));
        dataset
            .save_csv(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    info!("Wrote {} CSV files to {}", report.len(), dir.display());
    Ok(())
}

fn summary(report: &ExtractionReport) -> String {
    #[cfg(feature = "colorized_output")]
    {
        let mut out = format!(
            "{} {} datasets",
            style("Decoded").bold().green(),
            report.len()
        );
        for (key, message) in &report.errors {
            out.push_str(&format!("\n  {} {key}: {message}", style("failed").red()));
        }
        for (accnum, message) in &report.entry_errors {
            out.push_str(&format!("\n  {} entry {accnum}: {message}", style("unreadable").red().bold()));
        }
        out
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        let mut out = format!("Decoded {} datasets", report.len());
        for (key, message) in &report.errors {
            out.push_str(&format!("\n  failed {key}: {message}"));
        }
        for (accnum, message) in &report.entry_errors {
            out.push_str(&format!("\n  unreadable entry {accnum}: {message}"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_name() {
        assert_eq!(csv_name(&DatasetKey::new("E0783", "E0783002", ' ')), "E0783002.csv");
        assert_eq!(csv_name(&DatasetKey::new("12898", "12898002", '1')), "12898002-1.csv");
    }

    #[test]
    fn test_summary_lists_failures() {
        let mut report = ExtractionReport::default();
        report.errors.insert(
            DatasetKey::new("12898", "12898003", ' '),
            "Encountered NoValuesGivenError: Data".to_string(),
        );
        let text = summary(&report);
        assert!(text.contains("0 datasets"));
        assert!(text.contains("('12898', '12898003', ' '): Encountered NoValuesGivenError: Data"));
    }
}
