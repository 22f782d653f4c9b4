//! Synchronization statistics.

use observability::RunningStats;

/// Counters collected while synchronizing one or more scenes
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Color entries supplied to the engine
    pub color_total: u64,

    /// Frames produced
    pub frames_synced: u64,

    /// Color entries dropped: nearest depth outside the margin
    pub depth_out_of_tolerance: u64,

    /// Color entries dropped: nearest pose outside the margin
    pub pose_out_of_tolerance: u64,

    /// Color entries never attempted because depth or pose ran out
    pub color_unprocessed: u64,

    /// Accepted |t_depth - t_color| (seconds)
    pub depth_delta: RunningStats,

    /// Accepted |t_pose - t_color| (seconds)
    pub pose_delta: RunningStats,
}

impl SyncStats {
    /// Color entries dropped for lack of a match within the margin
    pub fn color_dropped(&self) -> u64 {
        self.depth_out_of_tolerance + self.pose_out_of_tolerance
    }

    /// Accumulate another run (e.g. the next scene of a batch)
    pub fn merge(&mut self, other: &SyncStats) {
        self.color_total += other.color_total;
        self.frames_synced += other.frames_synced;
        self.depth_out_of_tolerance += other.depth_out_of_tolerance;
        self.pose_out_of_tolerance += other.pose_out_of_tolerance;
        self.color_unprocessed += other.color_unprocessed;
        self.depth_delta.merge(&other.depth_delta);
        self.pose_delta.merge(&other.pose_delta);
    }
}
