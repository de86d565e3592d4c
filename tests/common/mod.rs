//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_entry("entries/a.xml", fragments::HTML_AND_PDF)
//!         .with_descriptor("root.json", &descriptors::with_entries(&["entries/a.xml"]));
//!     fixture.command().arg("root.json").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{descriptors, fragments, at, TestFixture};
}

/// Identifiers used by the fixtures.
#[allow(dead_code)]
pub mod ids {
    pub const ROOT: &str = "urn:uuid:3f2b8c1e-9a4d-4e2f-8b1c-0d9e8f7a6b5c";
    pub const ROOT_NOITALICS: &str = "urn:uuid:3f2b8c1e-9a4d-4e2f-9b1c-0d9e8f7a6b5c";
    pub const FICTION: &str = "urn:uuid:11111111-2222-4333-8444-555555555555";
    pub const POETRY: &str = "urn:uuid:66666666-7777-4888-8999-aaaaaaaaaaaa";
}

/// Descriptor JSON builders.
#[allow(dead_code)]
pub mod descriptors {
    use super::ids;

    /// A root descriptor with the given content keys spliced in.
    pub fn root(content: &str) -> String {
        format!(
            r#"{{
  "output": "www/index.xml",
  "id": "{}",
  "title": "Example Catalog",
  "namespaces": {{
    "opds": "http://opds-spec.org/2010/catalog",
    "dc": "http://purl.org/dc/terms/"
  }},
  "authors": [
    {{ "name": "Catalog Team", "uri": "https://example.org" }},
    {{ "name": "Archivist" }}
  ],
  "links": [
    {{ "rel": "self", "href": "index.xml", "type": "application/atom+xml;profile=opds-catalog;kind=navigation" }},
    {{ "rel": "start", "href": "index.xml", "type": "application/atom+xml;profile=opds-catalog;kind=navigation" }}
  ],
  {}
}}"#,
            ids::ROOT,
            content
        )
    }

    pub fn with_entries(entries: &[&str]) -> String {
        root(&format!("\"entries\": {}", list(entries)))
    }

    pub fn with_acquisitions(acquisitions: &[&str]) -> String {
        root(&format!("\"acquisitions\": {}", list(acquisitions)))
    }

    /// A sub-feed descriptor rendering to `output`.
    pub fn sub_feed(id: &str, title: &str, output: &str, extra: &str) -> String {
        format!(
            r#"{{
  "output": "{}",
  "id": "{}",
  "title": "{}",
  "authors": [{{ "name": "Catalog Team" }}],
  "links": [],
  "entries": ["entries/placeholder.xml"]{}
}}"#,
            output, id, title, extra
        )
    }

    /// A minimal rendered feed as an earlier run would have written it.
    pub fn rendered(id: &str, updated: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>{}</id>
  <title>Rendered</title>
  <updated>{}</updated>
</feed>
"#,
            id, updated
        )
    }

    fn list(items: &[&str]) -> String {
        let quoted: Vec<String> = items.iter().map(|item| format!("\"{}\"", item)).collect();
        format!("[{}]", quoted.join(", "))
    }
}

/// Entry fragment documents.
#[allow(dead_code)]
pub mod fragments {
    /// An entry with one whitelisted and one non-whitelisted link.
    pub const HTML_AND_PDF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<entry xmlns="http://www.w3.org/2005/Atom" xmlns:dc="http://purl.org/dc/terms/">
  <title>Moby Dick</title>
  <id>urn:uuid:aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee</id>
  <updated>2024-01-01T00:00:00Z</updated>
  <dc:language>en</dc:language>
  <link rel="alternate" type="text/html" href="moby-dick.html"/>
  <link rel="http://opds-spec.org/acquisition" type="application/pdf" href="moby-dick.pdf"/>
</entry>
"#;

    /// An entry whose only extra link has no type.
    pub const UNTYPED_LINK: &str = r#"<entry xmlns="http://www.w3.org/2005/Atom">
  <title>Leaves of Grass</title>
  <id>urn:uuid:bbbbbbbb-cccc-4ddd-8eee-ffffffffffff</id>
  <link rel="related" href="leaves.txt"/>
  <link rel="http://opds-spec.org/acquisition" type="application/epub+zip" href="leaves.epub"/>
</entry>
"#;

    /// An entry with XHTML content and a descendant declaring its own prefix.
    pub const NESTED_NAMESPACES: &str = r#"<entry xmlns="http://www.w3.org/2005/Atom">
  <title>Walden</title>
  <id>urn:uuid:cccccccc-dddd-4eee-8fff-000000000000</id>
  <marc:leader xmlns:marc="http://www.loc.gov/MARC21/slim">00000nam</marc:leader>
  <content type="xhtml">
    <div xmlns="http://www.w3.org/1999/xhtml"><p>Life in the <em>woods</em>.</p></div>
  </content>
</entry>
"#;

    /// A fragment that is not well-formed.
    pub const MALFORMED: &str = "<entry><title>Broken</entry>";
}

/// A `SystemTime` at the given Unix second.
#[allow(dead_code)]
pub fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

/// A test fixture that provides a temporary catalog directory.
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_entry("entries/a.xml", fragments::HTML_AND_PDF)
///     .with_descriptor("root.json", &descriptors::with_entries(&["entries/a.xml"]));
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new fixture with an empty `www/` output directory.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("www")
            .create_dir_all()
            .expect("Failed to create output directory");
        Self { temp_dir }
    }

    /// Add a descriptor file.
    pub fn with_descriptor(self, path: &str, content: &str) -> Self {
        self.with_file(path, content)
    }

    /// Add an entry fragment file.
    pub fn with_entry(self, path: &str, content: &str) -> Self {
        self.with_file(path, content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Set the modification time of a file in the fixture.
    pub fn with_mtime(self, path: &str, time: SystemTime) -> Self {
        std::fs::File::options()
            .write(true)
            .open(self.path().join(path))
            .and_then(|file| file.set_modified(time))
            .expect("Failed to set modification time");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Read a file produced by a run.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read output")
    }

    /// Create an `mkfeed` command running in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("mkfeed");
        cmd.current_dir(self.path());
        cmd.env_remove("MKFEED_DIR");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_output_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().join("www").is_dir());
    }

    #[test]
    fn test_descriptor_builders_are_valid_json() {
        let docs = [
            descriptors::with_entries(&["a.xml"]),
            descriptors::with_acquisitions(&["b.json"]),
            descriptors::sub_feed(ids::FICTION, "Fiction", "www/fiction.xml", ""),
        ];
        for doc in docs {
            serde_json::from_str::<serde_json::Value>(&doc).expect("descriptor should be JSON");
        }
    }
}
