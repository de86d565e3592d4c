//! CLI argument parsing and dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::debug;

use mkfeed::generate::{self, Options};

/// Build an OPDS Atom feed from a JSON feed descriptor
#[derive(Parser, Debug)]
#[command(name = "mkfeed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON feed descriptor
    #[arg(value_name = "DESCRIPTOR")]
    descriptor: PathBuf,

    /// Resolve the descriptor and every path it names against this directory
    #[arg(short = 'C', long, value_name = "DIR", env = "MKFEED_DIR")]
    directory: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", env = "MKFEED_LOG", default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Generate the feed named by the descriptor argument
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .init();

        let options = Options {
            base_dir: self.directory.unwrap_or_else(|| PathBuf::from(".")),
        };
        debug!("Resolving paths against {}", options.base_dir.display());

        generate::generate(&self.descriptor, &options)?;
        Ok(())
    }
}
