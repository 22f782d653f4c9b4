//! Pipeline orchestrator - converts scenes one after another.
//!
//! Every scene is isolated: a missing input skips it, any other error fails
//! it, and the batch moves on to the next scene either way.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use contracts::{ConverterConfig, FrameSink};
use dispatcher::{write_manifest, BundleFusionSink, LogSink};
use ingestion::SceneLoader;
use observability::record_scene_outcome;
use sync_engine::SyncEngine;
use tracing::{error, info, instrument, warn};

use super::{PipelineStats, SceneReport};
use crate::error::{CliError, Result, SceneError};

/// Sink name used for converted output
const BUNDLEFUSION_SINK: &str = "bundlefusion";

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding one sub-directory per scene
    pub source_dir: PathBuf,

    /// Output root
    pub dest_dir: PathBuf,

    /// Effective converter configuration
    pub converter: ConverterConfig,

    /// Restrict the run to these scene names (empty = all)
    pub scenes: Vec<String>,

    /// Log frames instead of writing them
    pub dry_run: bool,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
    loader: SceneLoader,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        let loader = SceneLoader::new(config.converter.input.clone());
        Self { config, loader }
    }

    /// Run the batch to completion.
    ///
    /// # Errors
    /// Only run-level failures (missing source root, unwritable destination
    /// root). Scene failures are reported in the returned stats.
    pub fn run(&self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        let scenes = discover_scenes(&self.config.source_dir, &self.config.scenes)?;
        if !self.config.dry_run {
            fs::create_dir_all(&self.config.dest_dir).map_err(|source| {
                CliError::DestinationCreate {
                    path: self.config.dest_dir.clone(),
                    source,
                }
            })?;
        }

        info!(
            source = %self.config.source_dir.display(),
            dest = %self.config.dest_dir.display(),
            scenes = scenes.len(),
            margin = self.config.converter.sync.margin,
            dry_run = self.config.dry_run,
            "Starting conversion"
        );

        let mut stats = PipelineStats::default();
        for (idx, scene_dir) in scenes.iter().enumerate() {
            let scene_name = ingestion::scene_name(scene_dir);
            info!(scene = %scene_name, progress = format!("{}/{}", idx + 1, scenes.len()), "Processing scene");

            match self.run_scene(scene_dir) {
                Ok(report) => {
                    info!(
                        scene = %report.scene_name,
                        frames = report.frames_written,
                        color_total = report.sync.color_total,
                        dropped = report.sync.color_dropped(),
                        stop_reason = ?report.stop_reason,
                        "Scene converted"
                    );
                    record_scene_outcome("converted");
                    stats.record_scene(&report);
                }
                Err(e) if e.is_skip() => {
                    warn!(scene = %scene_name, error = %e, "Skipping incomplete scene");
                    record_scene_outcome("skipped");
                    stats.scenes_skipped += 1;
                }
                Err(e) => {
                    error!(scene = %scene_name, error = %e, "Scene failed");
                    record_scene_outcome("failed");
                    stats.failed_scenes.push(scene_name);
                }
            }
        }

        stats.duration = start_time.elapsed();
        info!(
            converted = stats.scenes_converted,
            skipped = stats.scenes_skipped,
            failed = stats.scenes_failed(),
            frames = stats.frames_written,
            duration_secs = stats.duration.as_secs_f64(),
            "Conversion finished"
        );

        Ok(stats)
    }

    /// Load, synchronize and write a single scene
    #[instrument(name = "pipeline_scene", skip(self), fields(scene = %scene_dir.display()))]
    fn run_scene(&self, scene_dir: &Path) -> std::result::Result<SceneReport, SceneError> {
        let streams = self.loader.load(scene_dir)?;
        let scene_name = streams.scene_name.clone();
        let mut engine = SyncEngine::new(streams, self.config.converter.sync);

        let frames_written = if self.config.dry_run {
            let mut sink = LogSink::new(format!("dry_run:{scene_name}"));
            drain_into(&mut engine, &mut sink)?
        } else {
            let output_dir = self.config.dest_dir.join(&scene_name);
            let mut sink = BundleFusionSink::new(BUNDLEFUSION_SINK, &output_dir).map_err(
                |source| SceneError::OutputDir {
                    path: output_dir.clone(),
                    source,
                },
            )?;
            let written = drain_into(&mut engine, &mut sink)?;
            write_manifest(&output_dir, &scene_name)?;
            written
        };

        Ok(SceneReport {
            scene_name,
            frames_written,
            stop_reason: engine.stop_reason(),
            sync: engine.into_stats(),
        })
    }
}

/// Feed every frame of `engine` to `sink`, then flush and close it.
fn drain_into<S: FrameSink>(
    engine: &mut SyncEngine,
    sink: &mut S,
) -> std::result::Result<u64, contracts::ContractError> {
    let mut written = 0u64;
    for frame in engine.by_ref() {
        sink.write(&frame)?;
        written += 1;
    }
    sink.flush()?;
    sink.close()?;
    Ok(written)
}

/// List scene directories under `source_dir`, sorted by name.
///
/// With a non-empty `filter`, only the named scenes are returned; names with
/// no matching directory are logged and ignored.
pub fn discover_scenes(source_dir: &Path, filter: &[String]) -> Result<Vec<PathBuf>> {
    if !source_dir.is_dir() {
        return Err(CliError::source_not_directory(source_dir));
    }

    let mut scenes = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            scenes.push(path);
        }
    }
    scenes.sort();

    if !filter.is_empty() {
        for name in filter {
            if !scenes.iter().any(|p| ingestion::scene_name(p) == *name) {
                warn!(scene = %name, "Requested scene not found in source directory");
            }
        }
        scenes.retain(|p| filter.contains(&ingestion::scene_name(p)));
    }

    Ok(scenes)
}
