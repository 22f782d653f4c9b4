//! # Ingestion
//!
//! TUM RGB-D stream loader.
//!
//! Responsibilities:
//! - Check a scene directory for its color/depth directories and pose log
//! - Parse image file names into `(timestamp, path)` entries
//! - Parse the ground-truth log into `(timestamp, pose)` entries
//!
//! ## Usage Example
//!
//! ```no_run
//! use ingestion::SceneLoader;
//! use std::path::Path;
//!
//! let loader = SceneLoader::default();
//! match loader.load(Path::new("/data/tum/rgbd_dataset_freiburg1_xyz")) {
//!     Ok(streams) => println!("{} color frames", streams.color.len()),
//!     Err(e) if e.is_recoverable() => println!("skipped: {e}"),
//!     Err(e) => eprintln!("failed: {e}"),
//! }
//! ```

mod error;
mod image_stream;
mod loader;
mod pose_log;

// Re-exports
pub use contracts::{InputLayout, SceneStreams};
pub use error::{IngestionError, Result};
pub use image_stream::{list_image_entries, parse_timestamp};
pub use loader::{scene_name, SceneLoader};
pub use pose_log::{parse_pose_line, parse_pose_log, read_pose_log};
