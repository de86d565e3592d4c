//! # Feed Generation
//!
//! One run turns one top-level descriptor into one rendered feed file:
//!
//! 1.  **Load**: Read and validate the descriptor. Nothing else happens if
//!     it is rejected.
//! 2.  **Head**: Build the feed head (id, links, title, authors).
//! 3.  **Acquisitions**: Append one summary entry per sub-feed, in order.
//! 4.  **Entries**: Append each entry fragment, in order, recording its
//!     modification time.
//! 5.  **Updated**: Take the newest of the descriptor and fragment times.
//! 6.  **Render and write**: Serialize the tree and write it atomically to
//!     the descriptor's `output` path.
//!
//! Every relative path (the descriptor, its `output`, `acquisitions`, and
//! `entries`) is resolved against [`Options::base_dir`].

use std::path::{Path, PathBuf};

use log::info;

use crate::descriptor::{self, FeedDescriptor};
use crate::error::{Error, Result};
use crate::feed::FeedDocument;
use crate::import::{acquisition, entry};
use crate::output;
use crate::timestamp::{Freshness, Timestamp};

/// Settings for a generation run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Directory relative paths are resolved against.
    pub base_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            base_dir: PathBuf::from("."),
        }
    }
}

/// A feed rendered in memory.
#[derive(Debug, Clone)]
pub struct RenderedFeed {
    pub descriptor: FeedDescriptor,
    pub updated: Timestamp,
    pub entry_count: usize,
    pub xml: String,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub output: PathBuf,
    pub updated: Timestamp,
    pub entry_count: usize,
}

/// Build the feed for the descriptor at `descriptor_path` without writing it.
pub fn render(descriptor_path: &Path, options: &Options) -> Result<RenderedFeed> {
    let base_dir = options.base_dir.as_path();
    let descriptor_path = base_dir.join(descriptor_path);
    let descriptor = descriptor::load(&descriptor_path)?;
    let mut freshness = Freshness::new(Timestamp::of_file(&descriptor_path)?);

    let mut document = FeedDocument::new(&descriptor);
    for path in &descriptor.acquisitions {
        document.push_entry(acquisition::import(path, &descriptor.output, base_dir)?);
    }
    for path in &descriptor.entries {
        document.push_entry(entry::import(path, base_dir, &mut freshness)?);
    }

    let entry_count = document.entries().len();
    let updated = freshness.latest().clone();
    let xml = document
        .finish(&updated)
        .to_pretty_string()
        .map_err(|message| Error::Render {
            path: base_dir.join(&descriptor.output),
            message,
        })?;

    Ok(RenderedFeed {
        descriptor,
        updated,
        entry_count,
        xml,
    })
}

/// Build the feed for `descriptor_path` and write it to its `output` path.
pub fn generate(descriptor_path: &Path, options: &Options) -> Result<Generated> {
    let rendered = render(descriptor_path, options)?;
    let output = options.base_dir.join(&rendered.descriptor.output);
    output::write_atomically(&output, &rendered.xml)?;

    info!(
        "Wrote {} ({} entries, updated {})",
        output.display(),
        rendered.entry_count,
        rendered.updated
    );
    Ok(Generated {
        output,
        updated: rendered.updated,
        entry_count: rendered.entry_count,
    })
}
