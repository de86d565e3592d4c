//! # Error Handling
//!
//! This module defines the centralized error type for `mkfeed`. It uses the
//! `thiserror` library to create an `Error` enum that covers every way a
//! feed-generation run can fail. Every failure is fatal: the run stops at the
//! first error and no output file is written.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant names the file involved so that
//!   the single-line diagnostic printed by the CLI tells the operator exactly
//!   which input to fix.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants follow the failure classes of a run:
//!
//! - Missing input files (descriptor, sub-feed, fragment).
//! - Read failures on files that do exist.
//! - Malformed JSON and malformed XML.
//! - Schema violations in a descriptor (missing key, wrong type).
//! - Descriptors that reference no content.
//! - Identifiers that fail the URN-UUID grammar.
//! - Rendered feeds or fragments missing a required element.
//! - Feeds that cannot be serialized (an imported name whose namespace
//!   prefix is declared nowhere in the feed).
//! - Output files that cannot be written.
//!
//! Argument-count errors are reported by `clap` before the library runs.

use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

use crate::identifier::IdentifierError;

/// Main error type for mkfeed operations
#[derive(Error, Debug)]
pub enum Error {
    /// A descriptor, sub-feed, or fragment file does not exist.
    #[error("{}: file not found", path.display())]
    MissingFile { path: PathBuf },

    /// A file exists but could not be read.
    #[error("{}: failed to read: {message}", path.display())]
    Read { path: PathBuf, message: String },

    /// A descriptor is not valid JSON.
    #[error("{}: invalid JSON: {message}", path.display())]
    JsonParse { path: PathBuf, message: String },

    /// A rendered feed or entry fragment is not well-formed XML.
    #[error("{}: invalid XML: {message}", path.display())]
    XmlParse { path: PathBuf, message: String },

    /// A descriptor is valid JSON but violates the descriptor schema.
    ///
    /// `field` is the dotted location of the offending value, for example
    /// `links[2].href`.
    #[error("{}: schema error at '{field}': {message}", path.display())]
    Schema {
        path: PathBuf,
        field: String,
        message: String,
    },

    /// A descriptor declares neither acquisitions nor entries.
    #[error(
        "{}: no content: descriptor must declare at least one of 'acquisitions' or 'entries'",
        path.display()
    )]
    NoContent { path: PathBuf },

    /// A descriptor `id` is not a well-formed feed identifier.
    #[error("{}: {source}", path.display())]
    Identifier {
        path: PathBuf,
        source: IdentifierError,
    },

    /// A rendered feed or fragment lacks an element the merge depends on.
    #[error("{}: missing <{element}> element", path.display())]
    MissingElement { path: PathBuf, element: String },

    /// The assembled feed could not be serialized.
    #[error("{}: failed to render feed: {message}", path.display())]
    Render { path: PathBuf, message: String },

    /// The output file could not be written.
    #[error("{}: failed to write output: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

impl Error {
    /// Build a schema error for `field` in the descriptor at `path`.
    pub fn schema(
        path: impl Into<PathBuf>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Schema {
            path: path.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Map an I/O failure while reading `path` to `MissingFile` or `Read`.
    pub fn from_read(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            ErrorKind::NotFound => Error::MissingFile { path },
            _ => Error::Read {
                path,
                message: err.to_string(),
            },
        }
    }

    /// Like [`Error::from_read`], but text that is not valid UTF-8 is an
    /// XML parse error.
    pub fn from_xml_read(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidData => Error::XmlParse {
                path: path.into(),
                message: err.to_string(),
            },
            _ => Error::from_read(path, err),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
