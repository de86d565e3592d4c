//! # mkuuid
//!
//! Prints a fresh feed identifier for pasting into a new descriptor.

use clap::Parser;

use mkfeed::identifier::FeedId;

/// Print a new random feed identifier (urn:uuid, version 4, variant 8)
#[derive(Parser, Debug)]
#[command(name = "mkuuid")]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the identifier of the no-italics variant instead (variant 9)
    #[arg(long)]
    noitalics: bool,
}

fn main() {
    let args = Args::parse();
    let id = FeedId::generate();
    if args.noitalics {
        println!("{}", id.noitalics());
    } else {
        println!("{}", id);
    }
}
