//! # mkfeed Library
//!
//! This library assembles OPDS catalog feeds (Atom documents) for a static
//! catalog generator. Each feed is declared by a JSON descriptor listing the
//! feed's metadata and the content it aggregates: sub-feeds rendered by
//! earlier runs, and pre-rendered Atom entry fragments.
//!
//! ## Quick Example
//!
//! ```
//! use mkfeed::descriptor::FeedDescriptor;
//! use mkfeed::feed::FeedDocument;
//! use mkfeed::timestamp::Timestamp;
//! use std::path::Path;
//!
//! let raw = serde_json::json!({
//!     "output": "www/index.xml",
//!     "id": "urn:uuid:3f2b8c1e-9a4d-4e2f-8b1c-0d9e8f7a6b5c",
//!     "title": "Catalog",
//!     "authors": [{ "name": "Catalog Team" }],
//!     "links": [{ "rel": "self", "href": "index.xml", "type": "application/atom+xml" }],
//!     "entries": ["entries/moby-dick.xml"]
//! });
//! let descriptor = FeedDescriptor::from_value(&raw, Path::new("root.json")).unwrap();
//!
//! let updated = Timestamp::parse("2024-06-01T00:00:00Z").unwrap();
//! let xml = FeedDocument::new(&descriptor)
//!     .finish(&updated)
//!     .to_pretty_string()
//!     .unwrap();
//! assert!(xml.contains("<title>Catalog</title>"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Identifiers (`identifier`)**: URN-form version-4 UUIDs with a pinned
//!   variant nibble, and the no-italics sibling convention.
//! - **Descriptors (`descriptor`)**: Single-pass validation of the JSON
//!   descriptor into a typed value.
//! - **Feed documents (`feed`)**: The typed feed under construction and its
//!   fixed element order.
//! - **Importers (`import`)**: Sub-feed summary entries and entry fragments.
//! - **Freshness (`timestamp`)**: The feed's `updated` value.
//! - **Rendering (`xml`, `output`)**: Element tree, pretty printing, and
//!   atomic output writes.
//!
//! ## Execution Flow
//!
//! The entry point is [`generate::generate`], which loads one descriptor,
//! imports its acquisitions and then its entries, computes `updated`,
//! renders the feed, and writes it. Any error aborts the run before the
//! output file is touched.

pub mod descriptor;
pub mod error;
pub mod feed;
pub mod generate;
pub mod identifier;
pub mod import;
pub mod output;
pub mod timestamp;
pub mod xml;

#[cfg(test)]
mod identifier_proptest;
