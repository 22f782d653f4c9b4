//! Sink implementations
//!
//! Contains BundleFusionSink and LogSink.

mod bundlefusion;
mod log;

pub use self::bundlefusion::{BundleFusionSink, COLOR_SUFFIX, DEPTH_SUFFIX, POSE_SUFFIX};
pub use self::log::LogSink;
