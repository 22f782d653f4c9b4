//! Pipeline orchestration module.

mod orchestrator;
mod stats;

pub use orchestrator::{discover_scenes, Pipeline, PipelineConfig};
pub use stats::{PipelineStats, SceneReport};
