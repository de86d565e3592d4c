//! # Entry Importers
//!
//! A feed's entries come from two kinds of source, imported in this order:
//!
//! 1.  **Acquisitions** ([`acquisition`]): other feed descriptors whose feeds
//!     were rendered by an earlier run. Each becomes a summary entry linking
//!     to the rendered sub-feed and carrying its `id` and `updated` values.
//! 2.  **Entries** ([`entry`]): pre-rendered Atom `<entry>` fragments, copied
//!     into the feed with namespace declarations stripped and links filtered
//!     to a whitelist of media types.
//!
//! Any unreadable, missing, or malformed source aborts the run.

pub mod acquisition;
pub mod entry;

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::xml::{self, Element};

/// Read and parse the XML document at `path`.
fn read_document(path: &Path) -> Result<Element> {
    let text = fs::read_to_string(path).map_err(|e| Error::from_xml_read(path, e))?;
    xml::parse_document(&text).map_err(|message| Error::XmlParse {
        path: path.to_path_buf(),
        message,
    })
}
