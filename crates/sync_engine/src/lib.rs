//! # Sync Engine
//!
//! 以彩色流为参考的 RGB-D 帧同步引擎。
//!
//! 负责：
//! - 按时间顺序遍历彩色帧
//! - 在容差内查找最近的深度帧与位姿（每个样本最多使用一次）
//! - 分配连续帧序号，输出 `SyncedFrame`
//! - 深度或位姿耗尽时结束场景
//!
//! ## 使用示例
//!
//! ```ignore
//! use sync_engine::{SyncConfig, SyncEngine};
//!
//! let mut engine = SyncEngine::new(streams, SyncConfig::default());
//! for frame in engine.by_ref() {
//!     sink.write(&frame)?;
//! }
//! println!("stopped: {:?}", engine.stop_reason());
//! ```

mod buffer;
mod engine;
mod stats;

pub use buffer::{Candidate, StreamBuffer};
pub use engine::SyncEngine;
pub use stats::SyncStats;

// Re-export contracts types
pub use contracts::{SceneStreams, StopReason, SyncConfig, SyncedFrame};
