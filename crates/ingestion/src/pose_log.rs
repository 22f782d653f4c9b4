//! Ground-truth pose log parser
//!
//! Format: one `timestamp tx ty tz qx qy qz qw` record per line, blank lines
//! and comment lines ignored.

use std::fs;
use std::path::Path;

use contracts::{sort_by_timestamp, PoseEntry, PoseVector, TimestampedEntry};

use crate::error::{IngestionError, Result};

/// Tokens per record: timestamp + 7 pose components
const POSE_LINE_TOKENS: usize = 8;

/// Read and parse a pose log file.
pub fn read_pose_log(path: &Path, comment_prefix: &str) -> Result<Vec<PoseEntry>> {
    let content = fs::read_to_string(path).map_err(|e| IngestionError::io(path, e))?;
    parse_pose_log(&content, comment_prefix, path)
}

/// Parse pose log content; `path` is only used for error reporting.
///
/// Entries are returned sorted by timestamp.
pub fn parse_pose_log(content: &str, comment_prefix: &str, path: &Path) -> Result<Vec<PoseEntry>> {
    let mut entries = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(comment_prefix) {
            continue;
        }

        let entry = parse_pose_line(line).map_err(|reason| IngestionError::MalformedPoseLine {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        })?;
        entries.push(entry);
    }

    sort_by_timestamp(&mut entries);
    Ok(entries)
}

/// Parse a single non-comment record.
pub fn parse_pose_line(line: &str) -> std::result::Result<PoseEntry, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != POSE_LINE_TOKENS {
        return Err(format!(
            "expected {POSE_LINE_TOKENS} tokens, found {}",
            tokens.len()
        ));
    }

    let mut values = [0.0f64; POSE_LINE_TOKENS];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        let value: f64 = token
            .parse()
            .map_err(|_| format!("token '{token}' is not a number"))?;
        if !value.is_finite() {
            return Err(format!("token '{token}' is not finite"));
        }
        *slot = value;
    }

    let [timestamp, components @ ..] = values;
    let pose = PoseVector::from_components(components);
    if pose.quaternion_norm() == 0.0 {
        return Err("rotation quaternion has zero norm".to_string());
    }

    Ok(TimestampedEntry::new(timestamp, pose))
}
