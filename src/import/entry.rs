//! Pre-rendered entry fragments
//!
//! Entry fragments are standalone `<entry>` documents produced outside this
//! tool. They are copied into the feed with two clean-ups applied:
//!
//! - attributes named `xmlns` or `xmlns:*` on the entry element itself are
//!   removed, since the output `feed` element declares the namespaces in
//!   use. Declarations on descendants (an XHTML `div` inside `content`, a
//!   `dc:` element declaring its own prefix) are kept;
//! - `link` children are kept only when their `type` is a whitelisted media
//!   type. Links without a `type` are dropped.

use std::path::Path;

use log::debug;

use super::read_document;
use crate::error::{Error, Result};
use crate::timestamp::{Freshness, Timestamp};
use crate::xml::{Element, Node};

/// Media types an imported entry may link to.
pub const LINK_TYPE_WHITELIST: [&str; 4] = [
    "text/html",
    "image/jpeg",
    "image/png",
    "application/epub+zip",
];

/// Import the entry fragment at `path`, resolved against `base_dir`.
///
/// The fragment's modification time is recorded in `freshness`.
pub fn import(path: &str, base_dir: &Path, freshness: &mut Freshness) -> Result<Element> {
    let path = base_dir.join(path);
    debug!("Importing entry {}", path.display());
    freshness.record(Timestamp::of_file(&path)?);

    let document = read_document(&path)?;
    let entry = document
        .find_descendant("entry")
        .ok_or_else(|| Error::MissingElement {
            path: path.clone(),
            element: "entry".to_string(),
        })?
        .clone();

    Ok(clean_entry(entry))
}

/// Strip the entry's own namespace declarations and filter its links.
pub fn clean_entry(entry: Element) -> Element {
    Element {
        name: entry.name,
        attributes: strip_namespace_declarations(entry.attributes),
        children: filter_links(entry.children),
    }
}

/// Attributes whose name does not begin with `xmlns`.
pub fn strip_namespace_declarations(attributes: Vec<(String, String)>) -> Vec<(String, String)> {
    attributes
        .into_iter()
        .filter(|(name, _)| !name.starts_with("xmlns"))
        .collect()
}

/// Children with non-whitelisted `link` elements removed.
///
/// Relative order of the remaining children is unchanged.
pub fn filter_links(children: Vec<Node>) -> Vec<Node> {
    children
        .into_iter()
        .filter(|node| match node {
            Node::Element(element) if element.local_name() == "link" => {
                is_whitelisted(element.attribute("type"))
            }
            _ => true,
        })
        .collect()
}

fn is_whitelisted(media_type: Option<&str>) -> bool {
    media_type.is_some_and(|t| LINK_TYPE_WHITELIST.contains(&t))
}
