//! Main sync engine implementation.

use std::path::PathBuf;

use contracts::{ImageEntry, PoseVector, SceneStreams, StopReason, SyncConfig, SyncedFrame};
use tracing::{debug, info, instrument};

use crate::buffer::{Candidate, StreamBuffer};
use crate::stats::SyncStats;

/// Why a single color entry produced no frame
#[derive(Debug, Clone, Copy, PartialEq)]
enum SkipReason {
    /// Nearest depth entry is farther than the margin
    DepthOutOfTolerance { delta: f64 },
    /// Nearest pose entry is farther than the margin
    PoseOutOfTolerance { delta: f64 },
}

impl SkipReason {
    fn label(self) -> &'static str {
        match self {
            Self::DepthOutOfTolerance { .. } => "depth_out_of_tolerance",
            Self::PoseOutOfTolerance { .. } => "pose_out_of_tolerance",
        }
    }
}

/// Outcome of matching one color entry
#[derive(Debug)]
enum MatchOutcome {
    Matched(SyncedFrame),
    Skipped(SkipReason),
    Exhausted(StopReason),
}

/// Greedy color-driven synchronizer for one scene.
///
/// Each color entry, in timestamp order, is paired with the nearest
/// remaining depth and pose entries. A pair is accepted only when both are
/// within `margin` (inclusive); accepted depth/pose entries are removed so
/// they can never be reused. A rejected color entry consumes nothing.
/// Running out of depth or pose entries ends the scene.
#[derive(Debug)]
pub struct SyncEngine {
    /// Configuration
    config: SyncConfig,
    /// Scene name (diagnostics only)
    scene_name: String,
    /// Color entries not yet considered
    color: std::vec::IntoIter<ImageEntry>,
    /// Unconsumed depth entries
    depth: StreamBuffer<PathBuf>,
    /// Unconsumed pose entries
    pose: StreamBuffer<PoseVector>,
    /// Next frame index
    frame_counter: u64,
    /// Set once no further frames can be produced
    stop_reason: Option<StopReason>,
    /// Counters
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine over the streams of one scene
    pub fn new(streams: SceneStreams, config: SyncConfig) -> Self {
        let SceneStreams {
            scene_name,
            mut color,
            depth,
            pose,
        } = streams;

        contracts::sort_by_timestamp(&mut color);
        let stats = SyncStats {
            color_total: color.len() as u64,
            ..Default::default()
        };

        Self {
            config,
            scene_name,
            color: color.into_iter(),
            depth: StreamBuffer::new(depth),
            pose: StreamBuffer::new(pose),
            frame_counter: 0,
            stop_reason: None,
            stats,
        }
    }

    /// Produce the next synchronized frame.
    ///
    /// Returns `None` once the scene is finished; see [`SyncEngine::stop_reason`].
    #[instrument(
        level = "trace",
        name = "sync_engine_next_frame",
        skip(self),
        fields(scene = %self.scene_name)
    )]
    pub fn next_frame(&mut self) -> Option<SyncedFrame> {
        if self.stop_reason.is_some() {
            return None;
        }

        while let Some(color) = self.color.next() {
            let color_ts = color.timestamp;
            match self.try_match(color) {
                MatchOutcome::Matched(frame) => return Some(frame),
                MatchOutcome::Skipped(reason) => self.record_skip(color_ts, reason),
                MatchOutcome::Exhausted(reason) => {
                    // The current color entry was never attempted either
                    self.stats.color_unprocessed = self.color.len() as u64 + 1;
                    info!(
                        scene = %self.scene_name,
                        reason = %reason,
                        color_unprocessed = self.stats.color_unprocessed,
                        frames = self.frame_counter,
                        "required stream exhausted, stopping scene"
                    );
                    self.stop_reason = Some(reason);
                    return None;
                }
            }
        }

        self.stop_reason = Some(StopReason::ColorExhausted);
        None
    }

    /// Why the engine stopped, `None` while frames may still be produced
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Number of frames produced so far (also the next frame index)
    pub fn frames_synced(&self) -> u64 {
        self.frame_counter
    }

    /// Statistics so far
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Consume the engine, returning its statistics
    pub fn into_stats(self) -> SyncStats {
        self.stats
    }

    /// Match one color entry against the remaining depth and pose entries
    fn try_match(&mut self, color: ImageEntry) -> MatchOutcome {
        let target = color.timestamp;

        let Some(depth) = self.depth.nearest(target) else {
            return MatchOutcome::Exhausted(StopReason::DepthExhausted);
        };
        if !self.within_margin(depth) {
            return MatchOutcome::Skipped(SkipReason::DepthOutOfTolerance { delta: depth.delta });
        }

        // The depth candidate is only taken once the pose side also matches
        let Some(pose) = self.pose.nearest(target) else {
            return MatchOutcome::Exhausted(StopReason::PoseExhausted);
        };
        if !self.within_margin(pose) {
            return MatchOutcome::Skipped(SkipReason::PoseOutOfTolerance { delta: pose.delta });
        }

        // Keys come from `nearest` on the same buffers just above
        let Some(depth_entry) = self.depth.take(depth.key) else {
            return MatchOutcome::Exhausted(StopReason::DepthExhausted);
        };
        let Some(pose_entry) = self.pose.take(pose.key) else {
            return MatchOutcome::Exhausted(StopReason::PoseExhausted);
        };

        MatchOutcome::Matched(self.emit(color, depth_entry, depth.delta, pose_entry, pose.delta))
    }

    #[inline]
    fn within_margin(&self, candidate: Candidate) -> bool {
        candidate.delta <= self.config.margin
    }

    fn emit(
        &mut self,
        color: ImageEntry,
        depth: ImageEntry,
        depth_delta: f64,
        pose: contracts::PoseEntry,
        pose_delta: f64,
    ) -> SyncedFrame {
        let frame_index = self.frame_counter;
        self.frame_counter += 1;

        self.stats.frames_synced += 1;
        self.stats.depth_delta.push(depth_delta);
        self.stats.pose_delta.push(pose_delta);
        observability::record_frame_synced(frame_index, depth_delta, pose_delta);

        debug!(
            frame_index,
            t_color = color.timestamp,
            t_depth = depth.timestamp,
            t_pose = pose.timestamp,
            "frame synchronized"
        );

        SyncedFrame {
            frame_index,
            color,
            depth,
            pose,
            depth_delta,
            pose_delta,
        }
    }

    fn record_skip(&mut self, color_ts: f64, reason: SkipReason) {
        match reason {
            SkipReason::DepthOutOfTolerance { delta } => {
                self.stats.depth_out_of_tolerance += 1;
                debug!(t_color = color_ts, delta, margin = self.config.margin, "no depth within margin, color frame dropped");
            }
            SkipReason::PoseOutOfTolerance { delta } => {
                self.stats.pose_out_of_tolerance += 1;
                debug!(t_color = color_ts, delta, margin = self.config.margin, "no pose within margin, color frame dropped");
            }
        }
        observability::record_color_dropped(reason.label());
    }
}

impl Iterator for SyncEngine {
    type Item = SyncedFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame()
    }
}
