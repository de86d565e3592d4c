//! # Feed Descriptors
//!
//! A feed descriptor is a JSON file declaring the metadata of one catalog
//! feed and the content it aggregates:
//!
//! ```json
//! {
//!   "output": "www/fiction.xml",
//!   "id": "urn:uuid:3f2b8c1e-9a4d-4e2f-8b1c-0d9e8f7a6b5c",
//!   "title": "Fiction",
//!   "authors": [{ "name": "Catalog Team", "uri": "https://example.org" }],
//!   "links": [{ "rel": "self", "href": "fiction.xml", "type": "application/atom+xml" }],
//!   "namespaces": { "dc": "http://purl.org/dc/terms/" },
//!   "entries": ["entries/moby-dick.xml"]
//! }
//! ```
//!
//! Validation happens in a single pass over the raw JSON value and produces
//! a [`FeedDescriptor`]. Later stages only see the typed value. Validation
//! is all-or-nothing: the first violation is returned as an error naming the
//! file, the offending field, and the rule.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};
use crate::identifier::{FeedId, NOITALICS_MARKER};

/// `rel` used to link a sub-feed from its parent when it declares none.
pub const DEFAULT_ROOT_REL: &str = "subsection";

/// Longest accepted namespace short name.
pub const MAX_NAMESPACE_NAME_LEN: usize = 12;

static NAMESPACE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+$").expect("static regex"));

static NAMESPACE_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(https?|ftps?)://(([a-z0-9]([a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}|localhost|\d{1,3}(\.\d{1,3}){3})(:\d{1,5})?(/\S*)?$",
    )
    .expect("static regex")
});

/// A `link` declared by a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
    pub media_type: String,
}

/// A feed author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub uri: Option<String>,
}

/// A validated feed descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDescriptor {
    /// File the descriptor was read from.
    pub source: PathBuf,
    /// Output path of the rendered feed, relative to the base directory.
    pub output: String,
    pub id: FeedId,
    pub title: String,
    pub authors: Vec<Author>,
    pub links: Vec<Link>,
    /// Short name to namespace URI, iterated in key order.
    pub namespaces: BTreeMap<String, String>,
    /// Paths of sub-feed descriptors.
    pub acquisitions: Vec<String>,
    /// Paths of pre-rendered entry fragments.
    pub entries: Vec<String>,
    /// `rel` used when a parent links to this feed.
    pub rootrel: Option<String>,
    /// Summary text used when a parent links to this feed.
    pub content: Option<String>,
}

impl FeedDescriptor {
    /// Validate a parsed JSON value read from `source`.
    pub fn from_value(raw: &JsonValue, source: &Path) -> Result<Self> {
        let checker = Checker { path: source };
        let object = raw
            .as_object()
            .ok_or_else(|| checker.error("$", format!("expected an object, found {}", kind(raw))))?;

        let output = checker.required_string(object, "output")?;
        let id = checker.required_string(object, "id")?;
        let title = checker.required_string(object, "title")?;
        let links = checker.links(object)?;
        let authors = checker.authors(object)?;
        let namespaces = checker.namespaces(object)?;
        let acquisitions = checker.string_list(object, "acquisitions")?;
        let entries = checker.string_list(object, "entries")?;
        let rootrel = checker.optional_string(object, "rootrel")?;
        let content = checker.optional_string(object, "content")?;

        let acquisitions = acquisitions.unwrap_or_default();
        let entries = entries.unwrap_or_default();
        if acquisitions.is_empty() && entries.is_empty() {
            return Err(Error::NoContent {
                path: source.to_path_buf(),
            });
        }

        let id = FeedId::parse(&id).map_err(|e| Error::Identifier {
            path: source.to_path_buf(),
            source: e,
        })?;

        Ok(FeedDescriptor {
            source: source.to_path_buf(),
            output,
            id,
            title,
            authors,
            links,
            namespaces,
            acquisitions,
            entries,
            rootrel,
            content,
        })
    }

    /// Whether the descriptor's file name selects the no-italics variant.
    pub fn is_noitalics(&self) -> bool {
        self.source
            .file_name()
            .is_some_and(|name| name.to_string_lossy().contains(NOITALICS_MARKER))
    }

    /// The identifier written into the rendered feed.
    pub fn feed_id(&self) -> FeedId {
        if self.is_noitalics() {
            self.id.noitalics()
        } else {
            self.id.clone()
        }
    }

    /// The `rel` a parent feed uses to link here.
    pub fn root_rel(&self) -> &str {
        self.rootrel.as_deref().unwrap_or(DEFAULT_ROOT_REL)
    }
}

/// Read, parse, and validate the descriptor at `path`.
pub fn load(path: &Path) -> Result<FeedDescriptor> {
    debug!("Loading descriptor {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| Error::from_read(path, e))?;
    let raw: JsonValue = serde_json::from_str(&text).map_err(|e| Error::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    FeedDescriptor::from_value(&raw, path)
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a list",
        JsonValue::Object(_) => "an object",
    }
}

/// Shape checks bound to the file being validated.
struct Checker<'a> {
    path: &'a Path,
}

impl Checker<'_> {
    fn error(&self, field: &str, message: impl Into<String>) -> Error {
        Error::schema(self.path, field, message)
    }

    fn expect_string(&self, value: &JsonValue, field: &str) -> Result<String> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.error(field, format!("expected a string, found {}", kind(value))))
    }

    fn required_string(&self, object: &Map<String, JsonValue>, key: &str) -> Result<String> {
        match object.get(key) {
            Some(value) => self.expect_string(value, key),
            None => Err(self.error(key, "required key is missing")),
        }
    }

    fn optional_string(
        &self,
        object: &Map<String, JsonValue>,
        key: &str,
    ) -> Result<Option<String>> {
        object
            .get(key)
            .map(|value| self.expect_string(value, key))
            .transpose()
    }

    /// A required list whose items are all objects.
    fn object_list<'v>(
        &self,
        object: &'v Map<String, JsonValue>,
        key: &str,
    ) -> Result<Vec<(String, &'v Map<String, JsonValue>)>> {
        let value = object
            .get(key)
            .ok_or_else(|| self.error(key, "required key is missing"))?;
        let items = value
            .as_array()
            .ok_or_else(|| self.error(key, format!("expected a list, found {}", kind(value))))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let field = format!("{}[{}]", key, i);
                match item.as_object() {
                    Some(map) => Ok((field, map)),
                    None => {
                        let message = format!("expected an object, found {}", kind(item));
                        Err(self.error(&field, message))
                    }
                }
            })
            .collect()
    }

    fn links(&self, object: &Map<String, JsonValue>) -> Result<Vec<Link>> {
        self.object_list(object, "links")?
            .into_iter()
            .map(|(field, map)| {
                let get = |key: &str| {
                    let location = format!("{}.{}", field, key);
                    match map.get(key) {
                        Some(value) => self.expect_string(value, &location),
                        None => Err(self.error(&location, "required key is missing")),
                    }
                };
                Ok(Link {
                    rel: get("rel")?,
                    href: get("href")?,
                    media_type: get("type")?,
                })
            })
            .collect()
    }

    fn authors(&self, object: &Map<String, JsonValue>) -> Result<Vec<Author>> {
        self.object_list(object, "authors")?
            .into_iter()
            .map(|(field, map)| {
                let location = format!("{}.name", field);
                let name = match map.get("name") {
                    Some(value) => self.expect_string(value, &location)?,
                    None => return Err(self.error(&location, "required key is missing")),
                };
                for (key, value) in map {
                    self.expect_string(value, &format!("{}.{}", field, key))?;
                }
                let uri = map.get("uri").and_then(JsonValue::as_str).map(str::to_string);
                Ok(Author { name, uri })
            })
            .collect()
    }

    fn namespaces(&self, object: &Map<String, JsonValue>) -> Result<BTreeMap<String, String>> {
        let Some(value) = object.get("namespaces") else {
            return Ok(BTreeMap::new());
        };
        let map = value.as_object().ok_or_else(|| {
            self.error("namespaces", format!("expected an object, found {}", kind(value)))
        })?;

        let mut namespaces = BTreeMap::new();
        for (name, uri) in map {
            let field = format!("namespaces.{}", name);
            if name.len() > MAX_NAMESPACE_NAME_LEN || !NAMESPACE_NAME.is_match(name) {
                return Err(self.error(
                    &field,
                    format!(
                        "namespace name must be 1 to {} lowercase letters",
                        MAX_NAMESPACE_NAME_LEN
                    ),
                ));
            }
            let uri = self.expect_string(uri, &field)?;
            if !NAMESPACE_URI.is_match(&uri) {
                return Err(self.error(&field, format!("'{}' is not a valid namespace URI", uri)));
            }
            namespaces.insert(name.clone(), uri);
        }
        Ok(namespaces)
    }

    fn string_list(
        &self,
        object: &Map<String, JsonValue>,
        key: &str,
    ) -> Result<Option<Vec<String>>> {
        let Some(value) = object.get(key) else {
            return Ok(None);
        };
        let items = value
            .as_array()
            .ok_or_else(|| self.error(key, format!("expected a list, found {}", kind(value))))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.expect_string(item, &format!("{}[{}]", key, i)))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}
