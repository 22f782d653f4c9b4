//! # Contracts
//!
//! Frozen interface contracts shared by every stage of the converter.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - TUM timestamps (seconds, f64) are the only clock
//! - `frame_index` is assigned by the synchronizer and only counts accepted frames

mod config;
mod entry;
mod error;
mod intrinsics;
mod sink;
mod sync;

pub use config::*;
pub use entry::*;
pub use error::*;
pub use intrinsics::*;
pub use sink::FrameSink;
pub use sync::*;
