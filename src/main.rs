//! # exfor-decode
//!
//! Command-line front end to the `exfor` decoder.
//!
//! ## Usage
//!
//! ```bash
//! # Print every dataset of a request file, simplified to Energy/Data columns
//! exfor-decode decode request.x4 --simplify
//!
//! # Write one CSV per dataset and a JSON report
//! exfor-decode decode E0783.x4 --csv out/ --json > report.json
//!
//! # Show the structure of an entry
//! exfor-decode inspect 12898.x4
//!
//! # Interpret a reaction string
//! exfor-decode reaction "(92-U-235(N,F),,SIG)"
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
