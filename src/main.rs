//! # mkfeed CLI
//!
//! This is the binary entry point for the `mkfeed` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Running one feed generation and translating failures into a one-line
//!   diagnostic and a non-zero exit code.
//!
//! The core logic lives in the `mkfeed` library crate; the binary is a thin
//! wrapper around it.

mod cli;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    if let Err(err) = cli.execute() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
