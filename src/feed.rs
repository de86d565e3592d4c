//! Feed document assembly
//!
//! [`FeedDocument`] holds the typed parts of one output feed. The head comes
//! from a validated descriptor, entries are appended by the importers, and
//! [`FeedDocument::finish`] renders the element tree once the `updated`
//! value is known. Element order in the rendered feed is fixed: `id`,
//! `link`s, `title`, `updated`, `author`s, then entries in the order they
//! were appended.

use crate::descriptor::{Author, FeedDescriptor, Link};
use crate::identifier::FeedId;
use crate::timestamp::Timestamp;
use crate::xml::{Element, ATOM_NAMESPACE};

/// An Atom feed under construction.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    namespaces: Vec<(String, String)>,
    id: FeedId,
    links: Vec<Link>,
    title: String,
    authors: Vec<Author>,
    entries: Vec<Element>,
}

impl FeedDocument {
    /// Start a feed from the head fields of `descriptor`.
    pub fn new(descriptor: &FeedDescriptor) -> Self {
        FeedDocument {
            namespaces: descriptor
                .namespaces
                .iter()
                .map(|(name, uri)| (name.clone(), uri.clone()))
                .collect(),
            id: descriptor.feed_id(),
            links: descriptor.links.clone(),
            title: descriptor.title.clone(),
            authors: descriptor.authors.clone(),
            entries: Vec::new(),
        }
    }

    pub fn push_entry(&mut self, entry: Element) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Element] {
        &self.entries
    }

    /// Render the feed with `updated` filled in.
    pub fn finish(self, updated: &Timestamp) -> Element {
        let mut feed = Element::new("feed").attr("xmlns", ATOM_NAMESPACE);
        for (name, uri) in &self.namespaces {
            feed.set_attribute(format!("xmlns:{}", name), uri.as_str());
        }

        feed = feed.child(Element::with_text("id", self.id.as_str()));
        for link in &self.links {
            feed = feed.child(link_element(link));
        }
        feed = feed
            .child(Element::with_text("title", self.title))
            .child(Element::with_text("updated", updated.as_str()));

        for author in &self.authors {
            let mut node = Element::new("author").child(Element::with_text("name", &author.name));
            if let Some(uri) = &author.uri {
                node = node.child(Element::with_text("uri", uri));
            }
            feed = feed.child(node);
        }

        for entry in self.entries {
            feed = feed.child(entry);
        }
        feed
    }
}

/// A `link` element with `rel`, `href`, and `type` in that order.
pub fn link_element(link: &Link) -> Element {
    Element::new("link")
        .attr("rel", &link.rel)
        .attr("href", &link.href)
        .attr("type", &link.media_type)
}
