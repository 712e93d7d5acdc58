//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in
//! a config file; command-line flags are OR-ed on top of it:
//!
//! ```toml
//! # exfor.toml
//! [extract]
//! simplify = true
//! make_all_columns = true
//! subentries = ["12898002"]
//!
//! [output]
//! sort = true
//! csv_dir = "datasets"
//!
//! [dictionaries]
//! path = "/opt/exfor/dicts"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use exfor::dataset::ExtractConfig;

/// Root configuration structure for exfor.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Dataset extraction settings.
    #[serde(default)]
    pub extract: ExtractSection,

    /// How decoded datasets are written.
    #[serde(default)]
    pub output: OutputSection,

    /// Where to read code dictionaries from.
    #[serde(default)]
    pub dictionaries: DictionarySection,
}

/// Configuration for dataset extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractSection {
    pub simplify: Option<bool>,
    pub make_all_columns: Option<bool>,
    pub fail_if_missing_errors: Option<bool>,
    pub strict_units: Option<bool>,

    /// SubEntry whitelist.
    pub subentries: Option<Vec<String>>,
}

impl ExtractSection {
    pub fn to_extract_config(&self) -> ExtractConfig {
        let mut config = ExtractConfig::default()
            .with_simplify(self.simplify.unwrap_or(false))
            .with_make_all_columns(self.make_all_columns.unwrap_or(false))
            .with_fail_if_missing_errors(self.fail_if_missing_errors.unwrap_or(false))
            .with_strict_units(self.strict_units.unwrap_or(false));
        if let Some(subentries) = &self.subentries {
            config = config.with_subentries(subentries.iter().cloned());
        }
        config
    }
}

/// Configuration for the decode command's output.
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    pub sort: Option<bool>,
    pub json: Option<bool>,
    pub csv_dir: Option<PathBuf>,
}

/// Dictionary directory override.
#[derive(Debug, Default, Deserialize)]
pub struct DictionarySection {
    /// Directory holding `dictNN.txt` files.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [extract]
            simplify = true
            make_all_columns = true
            subentries = ["12898002", "12898003"]

            [output]
            sort = true
            csv_dir = "datasets"

            [dictionaries]
            path = "/opt/exfor/dicts"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.extract.simplify, Some(true));
        assert_eq!(config.output.csv_dir, Some(PathBuf::from("datasets")));
        assert_eq!(config.dictionaries.path, Some(PathBuf::from("/opt/exfor/dicts")));

        let extract = config.extract.to_extract_config();
        assert!(extract.simplify);
        assert!(extract.make_all_columns);
        assert!(!extract.strict_units);
        assert!(extract.keeps("12898003"));
        assert!(!extract.keeps("12898001"));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [extract]
            strict_units = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.extract.strict_units, Some(true));
        assert_eq!(config.extract.simplify, None);
        assert_eq!(config.output.sort, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.extract.to_extract_config(), ExtractConfig::default());
        assert!(config.dictionaries.path.is_none());
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_str("[extract]\nsimplify = \"yes\"").is_err());
    }
}
