//! Pipeline statistics.

use std::time::Duration;

use contracts::StopReason;
use sync_engine::SyncStats;

/// Result of one converted scene
#[derive(Debug, Clone)]
pub struct SceneReport {
    /// Scene directory name
    pub scene_name: String,

    /// Frames handed to the sink
    pub frames_written: u64,

    /// Why synchronization ended
    pub stop_reason: Option<StopReason>,

    /// Engine counters for this scene
    pub sync: SyncStats,
}

/// Statistics from a batch run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Scenes converted end to end
    pub scenes_converted: u64,

    /// Scenes skipped for missing inputs
    pub scenes_skipped: u64,

    /// Names of scenes that failed
    pub failed_scenes: Vec<String>,

    /// Frames written across all scenes
    pub frames_written: u64,

    /// Engine counters merged across scenes
    pub sync: SyncStats,

    /// Total duration of the run
    pub duration: Duration,
}

impl PipelineStats {
    /// Fold a converted scene into the totals
    pub fn record_scene(&mut self, report: &SceneReport) {
        self.scenes_converted += 1;
        self.frames_written += report.frames_written;
        self.sync.merge(&report.sync);
    }

    /// Number of failed scenes
    pub fn scenes_failed(&self) -> usize {
        self.failed_scenes.len()
    }

    /// Frames written per second of wall time
    pub fn fps(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.frames_written as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Share of color entries that produced a frame, as a percentage
    pub fn match_rate(&self) -> f64 {
        if self.sync.color_total > 0 {
            (self.sync.frames_synced as f64 / self.sync.color_total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Conversion Summary ===\n");

        println!("Scenes");
        println!("  converted: {}", self.scenes_converted);
        println!("  skipped:   {}", self.scenes_skipped);
        println!("  failed:    {}", self.scenes_failed());
        for scene in &self.failed_scenes {
            println!("    - {scene}");
        }

        println!("\nFrames");
        println!("  written:  {}", self.frames_written);
        println!("  duration: {:.2}s ({:.2} frames/s)", self.duration.as_secs_f64(), self.fps());

        println!("\nSynchronization");
        println!("  color entries:           {}", self.sync.color_total);
        println!("  matched:                 {} ({:.2}%)", self.sync.frames_synced, self.match_rate());
        println!("  depth out of tolerance:  {}", self.sync.depth_out_of_tolerance);
        println!("  pose out of tolerance:   {}", self.sync.pose_out_of_tolerance);
        println!("  unprocessed (exhausted): {}", self.sync.color_unprocessed);

        if self.sync.depth_delta.count() > 0 {
            println!("  depth delta (s): {}", self.sync.depth_delta.summary());
            println!("  pose delta (s):  {}", self.sync.pose_delta.summary());
        }

        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_scene() {
        let mut stats = PipelineStats::default();
        let sync = SyncStats {
            color_total: 10,
            frames_synced: 8,
            depth_out_of_tolerance: 2,
            ..Default::default()
        };
        stats.record_scene(&SceneReport {
            scene_name: "a".into(),
            frames_written: 8,
            stop_reason: Some(StopReason::ColorExhausted),
            sync,
        });

        assert_eq!(stats.scenes_converted, 1);
        assert_eq!(stats.frames_written, 8);
        assert_eq!(stats.match_rate(), 80.0);
        assert_eq!(stats.fps(), 0.0);
    }
}
