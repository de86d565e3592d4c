//! Feed freshness
//!
//! A feed's `updated` value is the most recent modification time among the
//! files it is built from: the descriptor itself and every directly included
//! entry fragment. Sub-feeds carry their own `updated` value and do not
//! contribute here.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{Error, Result};

/// Second-precision UTC timestamp format used in rendered feeds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A UTC timestamp in `YYYY-MM-DDTHH:MM:SSZ` form.
///
/// The fixed-width format makes lexicographic order chronological.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn from_system_time(time: SystemTime) -> Self {
        let utc: DateTime<Utc> = time.into();
        Timestamp(utc.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Accept an already formatted timestamp.
    pub fn parse(text: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
            .ok()
            .map(|naive| Timestamp(naive.format(TIMESTAMP_FORMAT).to_string()))
    }

    /// Modification time of the file at `path`.
    pub fn of_file(path: &Path) -> Result<Self> {
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|e| Error::from_read(path, e))?;
        Ok(Self::from_system_time(modified))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of timestamps contributing to one feed.
#[derive(Debug, Clone)]
pub struct Freshness {
    latest: Timestamp,
}

impl Freshness {
    /// Start from the descriptor's own modification time.
    pub fn new(descriptor: Timestamp) -> Self {
        Freshness { latest: descriptor }
    }

    pub fn record(&mut self, stamp: Timestamp) {
        if stamp > self.latest {
            self.latest = stamp;
        }
    }

    pub fn latest(&self) -> &Timestamp {
        &self.latest
    }
}
