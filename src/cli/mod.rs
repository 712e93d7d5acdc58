use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use exfor::dictionary::Dictionaries;

mod config;
mod decode;
mod inspect;
mod reaction;

pub use config::Config;

/// exfor - EXFOR nuclear reaction data decoder
#[derive(Parser)]
#[command(name = "exfor-decode")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode EXFOR entries or requests into datasets
    ///
    /// Only a subset of the EXFOR code dictionaries is built in, so reaction
    /// descriptions stay blank for uncommon quantity codes. Point
    /// `[dictionaries] path` in the config file at the full `dictNN.txt` tables
    /// to decode those.
    Decode {
        /// Input files, each holding one entry or a whole request
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Reduce columns to Energy, Data and their uncertainties
        #[arg(short, long)]
        simplify: bool,

        /// Zero-fill uncertainty columns that have no source
        #[arg(long)]
        make_all_columns: bool,

        /// Fail datasets whose uncertainties cannot be found
        #[arg(long)]
        fail_if_missing_errors: bool,

        /// Reject columns with unknown units
        #[arg(long)]
        strict_units: bool,

        /// Only decode these SubEntries (repeatable)
        #[arg(long = "subentry", value_name = "ACCNUM")]
        subentries: Vec<String>,

        /// Sort rows before printing
        #[arg(long)]
        sort: bool,

        /// Print the whole report as JSON instead of text tables
        #[arg(long)]
        json: bool,

        /// Also write one CSV file per dataset into this directory
        #[arg(long, value_name = "DIR")]
        csv: Option<PathBuf>,
    },

    /// Show the SubEntries, BIB fields and tables of an entry
    Inspect {
        /// Input file with one entry
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Interpret a REACTION string
    Reaction {
        /// Reaction text, e.g. "(92-U-235(N,F),,SIG)"
        #[arg(value_name = "TEXT")]
        text: String,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(dir) = &config.dictionaries.path {
        load_dictionaries(dir)?;
    }

    match cli.command {
        Commands::Decode {
            inputs,
            simplify,
            make_all_columns,
            fail_if_missing_errors,
            strict_units,
            subentries,
            sort,
            json,
            csv,
        } => {
            let mut extract = config.extract.to_extract_config();
            extract.simplify |= simplify;
            extract.make_all_columns |= make_all_columns;
            extract.fail_if_missing_errors |= fail_if_missing_errors;
            extract.strict_units |= strict_units;
            if !subentries.is_empty() {
                extract = extract.with_subentries(subentries);
            }
            let output = decode::Output {
                sort: sort || config.output.sort.unwrap_or(false),
                json: json || config.output.json.unwrap_or(false),
                csv: csv.or(config.output.csv_dir),
            };
            decode::run(&inputs, &extract, &output)
        }
        Commands::Inspect { file } => inspect::run(&file),
        Commands::Reaction { text } => reaction::run(&text),
    }
}

fn load_dictionaries(dir: &Path) -> Result<()> {
    let dictionaries = Dictionaries::load_dir(dir)
        .with_context(|| format!("Failed to load dictionaries from {}", dir.display()))?;
    Dictionaries::install_global(dictionaries).context("Dictionaries were already in use")?;
    info!("Dictionaries loaded from {}", dir.display());
    Ok(())
}

/// Read a text file into lines; invalid UTF-8 is replaced
pub(crate) fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        anyhow::bail!("Input file does not exist: {}", path.display());
    }
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.lines().map(|line| line.trim_end_matches('\r').to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_decode_help_names_dictionary_path() {
        let mut command = Cli::command();
        let decode = command.find_subcommand_mut("decode").unwrap();
        let help = decode.render_long_help().to_string();
        assert!(help.contains("[dictionaries] path"), "{help}");
    }
}
