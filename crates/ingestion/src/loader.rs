//! Scene loader
//!
//! Checks a TUM scene directory for its required inputs and loads the
//! color, depth and pose streams.

use std::path::Path;

use contracts::{InputLayout, SceneStreams};
use metrics::counter;
use tracing::{debug, instrument};

use crate::error::{IngestionError, Result};
use crate::image_stream::list_image_entries;
use crate::pose_log::read_pose_log;

/// Loads the three input streams of a TUM scene
#[derive(Debug, Clone, Default)]
pub struct SceneLoader {
    layout: InputLayout,
}

impl SceneLoader {
    /// Create a loader for the given directory layout
    pub fn new(layout: InputLayout) -> Self {
        Self { layout }
    }

    /// Names of required inputs absent from `scene_dir` (empty when complete)
    pub fn missing_inputs(&self, scene_dir: &Path) -> Vec<String> {
        let mut missing = Vec::new();
        if !scene_dir.join(&self.layout.color_dir).is_dir() {
            missing.push(self.layout.color_dir.clone());
        }
        if !scene_dir.join(&self.layout.depth_dir).is_dir() {
            missing.push(self.layout.depth_dir.clone());
        }
        if !scene_dir.join(&self.layout.pose_file).exists() {
            missing.push(self.layout.pose_file.clone());
        }
        missing
    }

    /// Load the scene streams.
    ///
    /// # Errors
    /// - `MissingSceneInput` when a required directory or file is absent (recoverable)
    /// - `MalformedFilename` / `MalformedPoseLine` on unparsable input (fatal for the scene)
    /// - `Io` on read failures
    #[instrument(name = "scene_loader_load", skip(self), fields(scene = %scene_dir.display()))]
    pub fn load(&self, scene_dir: &Path) -> Result<SceneStreams> {
        let missing = self.missing_inputs(scene_dir);
        if !missing.is_empty() {
            return Err(IngestionError::MissingSceneInput {
                scene: scene_dir.to_path_buf(),
                missing,
            });
        }

        let color = list_image_entries(
            &scene_dir.join(&self.layout.color_dir),
            &self.layout.color_extensions,
        )?;
        let depth = list_image_entries(
            &scene_dir.join(&self.layout.depth_dir),
            &self.layout.depth_extensions,
        )?;
        let pose = read_pose_log(
            &scene_dir.join(&self.layout.pose_file),
            &self.layout.comment_prefix,
        )?;

        counter!("tum2bf_entries_loaded_total", "stream" => "color").increment(color.len() as u64);
        counter!("tum2bf_entries_loaded_total", "stream" => "depth").increment(depth.len() as u64);
        counter!("tum2bf_entries_loaded_total", "stream" => "pose").increment(pose.len() as u64);

        debug!(
            color = color.len(),
            depth = depth.len(),
            pose = pose.len(),
            "scene streams loaded"
        );

        Ok(SceneStreams {
            scene_name: scene_name(scene_dir),
            color,
            depth,
            pose,
        })
    }
}

/// Final path component of a scene directory
pub fn scene_name(scene_dir: &Path) -> String {
    scene_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| scene_dir.display().to_string())
}
