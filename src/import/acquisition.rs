//! Sub-feed summary entries
//!
//! Each acquisition is the path of another feed descriptor. Its feed must
//! already be rendered at the descriptor's `output` path; this module reads
//! that rendered feed back and summarises it as one `entry`:
//!
//! ```xml
//! <entry>
//!   <title>Fiction</title>
//!   <link rel="subsection" href="fiction.xml" type="application/atom+xml;profile=opds-catalog;kind=acquisition"/>
//!   <updated>2024-06-01T00:00:00Z</updated>
//!   <id>urn:uuid:...</id>
//!   <content type="text">Novels and short stories</content>
//! </entry>
//! ```

use std::path::{Component, Path};

use log::debug;

use super::read_document;
use crate::descriptor::{self, FeedDescriptor, Link};
use crate::error::{Error, Result};
use crate::feed::link_element;
use crate::xml::Element;

/// Media type of an OPDS acquisition feed.
pub const ACQUISITION_FEED_TYPE: &str =
    "application/atom+xml;profile=opds-catalog;kind=acquisition";

/// Build the summary entry for the sub-feed descriptor at `path`.
///
/// `path` is resolved against `base_dir`, as is the sub-feed's `output`.
/// The link `href` is relative to the directory of `parent_output`.
pub fn import(path: &str, parent_output: &str, base_dir: &Path) -> Result<Element> {
    let child = descriptor::load(&base_dir.join(path))?;
    let rendered_path = base_dir.join(&child.output);
    debug!(
        "Importing sub-feed {} from {}",
        child.title,
        rendered_path.display()
    );

    let rendered = read_document(&rendered_path)?;
    let required = |name: &str| {
        rendered.find(name).cloned().ok_or_else(|| Error::MissingElement {
            path: rendered_path.clone(),
            element: name.to_string(),
        })
    };
    let updated = required("updated")?;
    let id = required("id")?;

    Ok(summary_entry(&child, parent_output, updated, id))
}

fn summary_entry(
    child: &FeedDescriptor,
    parent_output: &str,
    updated: Element,
    id: Element,
) -> Element {
    let link = Link {
        rel: child.root_rel().to_string(),
        href: relative_href(parent_output, &child.output),
        media_type: ACQUISITION_FEED_TYPE.to_string(),
    };

    let mut entry = Element::new("entry")
        .child(Element::with_text("title", &child.title))
        .child(link_element(&link))
        .child(updated)
        .child(id);
    if let Some(content) = &child.content {
        entry = entry.child(Element::with_text("content", content).attr("type", "text"));
    }
    entry
}

/// Path of `target` relative to the directory containing `from`.
///
/// Both paths are relative to the same base directory. The result always
/// uses `/` separators so it can be written into a link `href`.
pub fn relative_href(from: &str, target: &str) -> String {
    let mut from_dir = normalize(from);
    from_dir.pop();
    let target = normalize(target);

    let common = from_dir
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); from_dir.len() - common];
    parts.extend(target[common..].iter().cloned());
    parts.join("/")
}

fn normalize(path: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                if parts.last().is_some_and(|last| last != "..") {
                    parts.pop();
                } else {
                    parts.push("..".to_string());
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts
}
