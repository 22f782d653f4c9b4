//! FrameSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for Sinks.

use crate::{ContractError, SyncedFrame};

/// Data output trait
///
/// All sink implementations must implement this trait. Frames are written
/// strictly one at a time in frame-index order.
pub trait FrameSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write synchronized frame
    ///
    /// # Errors
    /// Returns write error (should include context)
    fn write(&mut self, frame: &SyncedFrame) -> Result<(), ContractError>;

    /// Flush buffer (if any)
    fn flush(&mut self) -> Result<(), ContractError>;

    /// Close sink
    fn close(&mut self) -> Result<(), ContractError>;
}
