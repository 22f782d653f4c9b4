//! LogSink - logs frame summary via tracing

use contracts::{ContractError, FrameSink, SyncedFrame};
use tracing::{info, instrument};

use crate::metrics::SinkMetrics;

/// Sink that only logs frame summaries (dry runs, debugging)
pub struct LogSink {
    name: String,
    metrics: SinkMetrics,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: SinkMetrics::new(),
        }
    }

    /// Write counters
    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    fn log_frame_summary(&self, frame: &SyncedFrame) {
        info!(
            sink = %self.name,
            frame = %frame.stem(),
            t_color = frame.color.timestamp,
            t_depth = frame.depth.timestamp,
            t_pose = frame.pose.timestamp,
            depth_delta = frame.depth_delta,
            pose_delta = frame.pose_delta,
            "SyncedFrame received"
        );
    }
}

impl FrameSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, frame),
        fields(sink = %self.name, frame_index = frame.frame_index)
    )]
    fn write(&mut self, frame: &SyncedFrame) -> Result<(), ContractError> {
        self.log_frame_summary(frame);
        self.metrics.record(&self.name, true);
        Ok(())
    }

    #[instrument(name = "log_sink_flush", skip(self))]
    fn flush(&mut self) -> Result<(), ContractError> {
        // Nothing to flush for log sink
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    fn close(&mut self) -> Result<(), ContractError> {
        info!(sink = %self.name, frames = self.metrics.write_count(), "LogSink closed");
        Ok(())
    }
}
