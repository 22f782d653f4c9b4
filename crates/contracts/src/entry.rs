//! TimestampedEntry - Stream Loader output
//!
//! Raw per-stream samples of a TUM scene.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single timestamped sample of one input stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedEntry<T> {
    /// TUM timestamp (seconds)
    pub timestamp: f64,

    /// Sample payload (file path or pose vector)
    pub payload: T,
}

impl<T> TimestampedEntry<T> {
    pub fn new(timestamp: f64, payload: T) -> Self {
        Self { timestamp, payload }
    }

    /// Absolute time difference to `target`
    #[inline]
    pub fn delta_to(&self, target: f64) -> f64 {
        (self.timestamp - target).abs()
    }
}

/// Color or depth image sample
pub type ImageEntry = TimestampedEntry<PathBuf>;

/// Ground-truth pose sample
pub type PoseEntry = TimestampedEntry<PoseVector>;

/// Sort entries by timestamp using the IEEE total order.
pub fn sort_by_timestamp<T>(entries: &mut [TimestampedEntry<T>]) {
    entries.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
}

/// TUM ground-truth pose: translation + unit quaternion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseVector {
    /// Translation (tx, ty, tz) in meters
    pub translation: [f64; 3],

    /// Rotation quaternion in TUM order (qx, qy, qz, qw)
    pub rotation: [f64; 4],
}

impl PoseVector {
    /// Build from the 7 pose-log components `tx ty tz qx qy qz qw`.
    pub fn from_components(c: [f64; 7]) -> Self {
        Self {
            translation: [c[0], c[1], c[2]],
            rotation: [c[3], c[4], c[5], c[6]],
        }
    }

    /// Identity rotation at the given translation
    pub fn from_translation(translation: [f64; 3]) -> Self {
        Self {
            translation,
            rotation: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Euclidean norm of the quaternion
    pub fn quaternion_norm(&self) -> f64 {
        self.rotation.iter().map(|q| q * q).sum::<f64>().sqrt()
    }
}

/// The three streams of one scene, each sorted by timestamp.
#[derive(Debug, Clone, Default)]
pub struct SceneStreams {
    /// Scene directory name
    pub scene_name: String,

    pub color: Vec<ImageEntry>,

    pub depth: Vec<ImageEntry>,

    pub pose: Vec<PoseEntry>,
}
