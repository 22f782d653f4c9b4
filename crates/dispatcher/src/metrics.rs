//! Sink metrics for observability

use observability::record_frame_written;

/// Write counters for a single sink
#[derive(Debug, Default, Clone)]
pub struct SinkMetrics {
    /// Total successful writes
    write_count: u64,
    /// Total write failures
    failure_count: u64,
}

impl SinkMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one write result, also forwarding it to the global recorder
    pub fn record(&mut self, sink_name: &str, success: bool) {
        if success {
            self.write_count += 1;
        } else {
            self.failure_count += 1;
        }
        record_frame_written(sink_name, success);
    }

    /// Get total write count
    pub fn write_count(&self) -> u64 {
        self.write_count
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count
    }
}
