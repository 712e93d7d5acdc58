use anyhow::{Context, Result};
use std::path::Path;

#[cfg(feature = "colorized_output")]
use console::style;

use exfor::dataset::EntryMetadata;
use exfor::fields::{Field, FieldKind};
use exfor::record::{Entry, Table};

use super::read_lines;

/// Display the structure of an entry file
pub fn run(file: &Path) -> Result<()> {
    let lines = read_lines(file)?;
    let entry = Entry::from_lines(&lines).context("Failed to tokenize entry")?;

    match EntryMetadata::from_entry(&entry) {
        Ok(meta) => println!("{}", meta.xmgrace_header()),
        Err(err) => println!("#Exfor Entry {} (bibliography unreadable: {err})", entry.accnum),
    }
    println!();

    for subentry in entry.subentries.values() {
        println!("{}", heading(&subentry.accnum));
        if let Some(bib) = &subentry.bib {
            println!("  BIB: {} fields", bib.len());
            for raw in &bib.fields {
                match Field::interpret(raw) {
                    Ok(Field::Reaction(reaction)) => {
                        println!("    {:<11}{:?}", raw.tag, FieldKind::Reaction);
                        for (pointer, entry) in &reaction.entries {
                            println!("      [{pointer}] {}", entry.measurement);
                        }
                    }
                    Ok(field) => println!("    {:<11}{:?}", raw.tag, field.kind()),
                    Err(err) => println!("    {:<11}{}", raw.tag, failure(&err.to_string())),
                }
            }
        }
        if let Some(common) = &subentry.common {
            println!("  COMMON: {}", describe(common));
        }
        if let Some(data) = &subentry.data {
            println!("  DATA: {}", describe(data));
        }
    }
    Ok(())
}

fn describe(table: &Table) -> String {
    let columns: Vec<String> = table
        .labels
        .iter()
        .zip(&table.units)
        .zip(&table.column_pointers)
        .map(|((label, unit), pointer)| match pointer {
            Some(p) => format!("{label}[{p}] ({unit})"),
            None => format!("{label} ({unit})"),
        })
        .collect();
    format!("{} rows x {} columns: {}", table.numrows(), table.numcols(), columns.join(", "))
}

fn heading(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        style(text).bold().cyan().to_string()
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}

fn failure(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        style(text).red().to_string()
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}
