//! SyncedFrame - Sync Engine output
//!
//! One accepted color/depth/pose triple.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ImageEntry, PoseEntry};

/// Synchronized frame
///
/// A color entry together with the depth and pose entries matched to it
/// within the margin. Depth and pose entries appear in at most one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncedFrame {
    /// Output frame index (contiguous, starts at 0)
    pub frame_index: u64,

    /// Reference color sample
    pub color: ImageEntry,

    /// Matched depth sample
    pub depth: ImageEntry,

    /// Matched ground-truth pose
    pub pose: PoseEntry,

    /// |t_depth - t_color| (seconds)
    pub depth_delta: f64,

    /// |t_pose - t_color| (seconds)
    pub pose_delta: f64,
}

impl SyncedFrame {
    /// Output file stem, e.g. `frame-000042`
    pub fn stem(&self) -> String {
        frame_stem(self.frame_index)
    }
}

/// Zero-padded output file stem for a frame index
pub fn frame_stem(frame_index: u64) -> String {
    format!("frame-{frame_index:06}")
}

/// Why the synchronizer stopped producing frames for a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every color entry was considered
    ColorExhausted,
    /// Depth entries ran out before color entries
    DepthExhausted,
    /// Pose entries ran out before color entries
    PoseExhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ColorExhausted => "color_exhausted",
            Self::DepthExhausted => "depth_exhausted",
            Self::PoseExhausted => "pose_exhausted",
        };
        f.write_str(s)
    }
}
