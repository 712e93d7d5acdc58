use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::metadata::COMMENT;
use super::{Dataset, DatasetError};

const CELL: usize = 14;
const INDENT: &str = "        ";

/// Shortest round-trip text of a float, in the style of plotting-tool input:
/// `56.0`, `0.0001441`, `9.075e-06`, `1e+16`
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{:e}", x.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return x.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return x.to_string();
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let sign = if x < 0.0 { "-" } else { "" };

    if (-4..16).contains(&exponent) {
        let body = if exponent < 0 {
            format!("0.{}{digits}", "0".repeat((-exponent - 1) as usize))
        } else {
            let whole = exponent as usize + 1;
            if digits.len() <= whole {
                format!("{digits}{}.0", "0".repeat(whole - digits.len()))
            } else {
                format!("{}.{}", &digits[..whole], &digits[whole..])
            }
        };
        format!("{sign}{body}")
    } else {
        let mantissa = if digits.len() == 1 {
            digits
        } else {
            format!("{}.{}", &digits[..1], &digits[1..])
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{:02}", exponent.abs())
    }
}

/// A table cell for the human-readable rendering: rounded to 12 significant
/// digits, `None` when missing
pub fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(x) => {
            let rounded = format!("{x:.11e}").parse::<f64>().unwrap_or(x);
            format_float(rounded)
        }
        None => "None".to_string(),
    }
}

impl Dataset {
    /// Bibliography, reaction, monitor and frame lines
    pub fn header(&self) -> String {
        let mut out = self.meta.xmgrace_header();
        let reaction = self
            .reaction
            .as_ref()
            .map_or_else(|| "None".to_string(), ToString::to_string);
        out.push_str(&format!("\n{COMMENT}  Reaction:  {reaction} {}", self.reaction_comment));
        if !self.monitors.is_empty() {
            let monitors: Vec<String> = self.monitors.iter().map(ToString::to_string).collect();
            out.push_str(&format!("\n{COMMENT}  Monitor(s): {}", monitors.join(" ")));
        }
        if let Some(frame) = &self.frame {
            out.push_str(&format!("\n{COMMENT}  Frame:     {frame}"));
        }
        out
    }

    /// EXFOR-like debugging form: bibliography, the reaction in EXFOR syntax,
    /// then labels, units and rows as bracketed lists
    pub fn exfor_repr(&self) -> String {
        let mut out = self.meta.xmgrace_header().replace(&format!("{COMMENT}  "), "");
        let reaction = self
            .reaction
            .as_ref()
            .map_or_else(|| "None".to_string(), |r| r.exfor_style());
        out.push_str(&format!(" \nReaction:  {reaction}"));
        if !self.monitors.is_empty() {
            let monitors: Vec<String> = self
                .monitors
                .iter()
                .map(|m| m.measurement.as_ref().map_or_else(|| m.comment.clone(), |r| r.exfor_style()))
                .collect();
            out.push_str(&format!(" \nMonitor(s):{monitors:?}"));
        }
        out.push_str("\n[");
        out.push_str(&format!("['{}'],\n", self.labels.join("','")));
        out.push_str(&format!("['{}']", self.units.join("','")));
        for row in &self.data {
            let cells: Vec<String> = row
                .iter()
                .map(|v| v.map_or_else(|| "None".to_string(), format_float))
                .collect();
            out.push_str(&format!(",\n[{}]", cells.join(",")));
        }
        out.push(']');
        out
    }

    /// Write labels, units and rows as CSV; missing values are empty cells
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), DatasetError> {
        let mut csv = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        csv.write_record(&self.labels)?;
        csv.write_record(&self.units)?;
        for row in &self.data {
            csv.write_record(row.iter().map(|v| v.map(format_float).unwrap_or_default()))?;
        }
        csv.flush()?;
        Ok(())
    }

    /// [`Dataset::write_csv`] into a new file
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        self.write_csv(File::create(path)?)
    }

    /// Pretty JSON form
    pub fn to_json(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())?;
        write!(f, "\n{COMMENT}{INDENT}")?;
        for label in &self.labels {
            write!(f, "{label:<CELL$}")?;
        }
        write!(f, "\n{COMMENT}{INDENT}")?;
        for unit in &self.units {
            write!(f, "{unit:<CELL$}")?;
        }
        write!(f, "\n{INDENT}")?;
        for row in &self.data {
            for value in row {
                write!(f, "{:<CELL$}", format_cell(*value))?;
            }
            write!(f, "\n{INDENT}")?;
        }
        Ok(())
    }
}
