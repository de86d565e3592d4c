//! # Writing Rendered Feeds
//!
//! A rendered feed is written to a temporary file in the destination
//! directory and then renamed over the final path. A run that fails while
//! writing leaves no partial output behind, and an existing feed at the path
//! is only replaced once the new one is complete.
//!
//! The destination directory is not created. A missing directory is an
//! error like any other write failure.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Permissions given to written feeds on Unix.
#[cfg(unix)]
const FEED_MODE: u32 = 0o644;

/// Write `contents` to `path`, replacing any existing file atomically.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let write_error = |message: String| Error::Write {
        path: path.to_path_buf(),
        message,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(write_error(format!(
            "directory '{}' does not exist",
            dir.display()
        )));
    }

    let mut file = NamedTempFile::new_in(dir).map_err(|e| write_error(e.to_string()))?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| write_error(e.to_string()))?;

    // Temporary files are created owner-only; feeds are published.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(FEED_MODE);
        std::fs::set_permissions(file.path(), perms).map_err(|e| write_error(e.to_string()))?;
    }

    file.persist(path).map_err(|e| write_error(e.error.to_string()))?;
    Ok(())
}
