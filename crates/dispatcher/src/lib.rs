//! # Dispatcher
//!
//! 帧写出模块。
//!
//! 负责：
//! - 消费 `SyncedFrame`
//! - 彩色图转 JPEG，深度图换算单位后写 16 位 PNG，位姿写 4x4 矩阵
//! - 写出场景清单 `info.txt`

pub mod error;
pub mod manifest;
pub mod metrics;
pub mod sinks;
pub mod transcode;

pub use contracts::{FrameSink, SyncedFrame};
pub use error::TranscodeError;
pub use manifest::{render_manifest, write_manifest, MANIFEST_FILE};
pub use metrics::SinkMetrics;
pub use sinks::{BundleFusionSink, LogSink};
pub use transcode::{
    format_pose_matrix, pose_matrix, rescale_depth, transcode_color, transcode_depth, write_pose,
    DEPTH_UNIT_DIVISOR, JPEG_QUALITY,
};
