//! Color/depth directory listing
//!
//! TUM image files are named `<timestamp>.<ext>`; the stem is the sample time.

use std::fs;
use std::path::Path;

use contracts::{sort_by_timestamp, ImageEntry, TimestampedEntry};
use tracing::trace;

use crate::error::{IngestionError, Result};

/// List image entries of `dir` whose extension is one of `extensions`.
///
/// Extension matching is case-insensitive. Directories and files with other
/// extensions are ignored. The result is sorted by timestamp.
pub fn list_image_entries(dir: &Path, extensions: &[String]) -> Result<Vec<ImageEntry>> {
    let suffixes: Vec<String> = extensions
        .iter()
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .collect();

    let mut entries = Vec::new();
    for item in fs::read_dir(dir).map_err(|e| IngestionError::io(dir, e))? {
        let item = item.map_err(|e| IngestionError::io(dir, e))?;
        let path = item.path();
        if path.is_dir() {
            continue;
        }

        let name = item.file_name().to_string_lossy().to_lowercase();
        if !suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())) {
            trace!(path = %path.display(), "ignoring non-image entry");
            continue;
        }

        let timestamp = parse_timestamp(&path)?;
        entries.push(TimestampedEntry::new(timestamp, path));
    }

    sort_by_timestamp(&mut entries);
    Ok(entries)
}

/// Parse the timestamp encoded in a file name (`1305031102.175304.png`).
///
/// The stem is everything before the last `.`; it must be a finite number
/// of seconds.
pub fn parse_timestamp(path: &Path) -> Result<f64> {
    let malformed = |reason: String| IngestionError::MalformedFilename {
        path: path.to_path_buf(),
        reason,
    };

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| malformed("file name is not valid UTF-8".to_string()))?;
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);

    let timestamp: f64 = stem
        .parse()
        .map_err(|e| malformed(format!("stem '{stem}' is not a timestamp: {e}")))?;
    if !timestamp.is_finite() {
        return Err(malformed(format!("stem '{stem}' is not a finite timestamp")));
    }
    Ok(timestamp)
}
