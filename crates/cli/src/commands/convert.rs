//! `convert` command implementation.

use anyhow::{Context, Result};
use contracts::ConverterConfig;
use tracing::{info, warn};

use crate::cli::ConvertArgs;
use crate::error::CliError;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `convert` command
pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let converter = effective_config(args)?;

    info!(
        margin = converter.sync.margin,
        color_dir = %converter.input.color_dir,
        depth_dir = %converter.input.depth_dir,
        pose_file = %converter.input.pose_file,
        "Configuration loaded"
    );

    if args.dry_run {
        info!("Dry run mode - frames are synchronized and logged, nothing is written");
    }

    let pipeline = Pipeline::new(PipelineConfig {
        source_dir: args.source_dir.clone(),
        dest_dir: args.dest_dir.clone(),
        converter,
        scenes: args.scenes.clone(),
        dry_run: args.dry_run,
    });

    let stats = pipeline.run().context("Conversion failed")?;
    stats.print_summary();

    if stats.scenes_failed() > 0 {
        warn!(failed = stats.scenes_failed(), "Some scenes failed");
        if args.fail_on_error {
            return Err(CliError::scene_failures(stats.failed_scenes).into());
        }
    }

    info!("tum2bf finished");
    Ok(())
}

/// Configuration file (or defaults) with command-line overrides applied
fn effective_config(args: &ConvertArgs) -> Result<ConverterConfig> {
    let mut config = config_loader::ConfigLoader::load_or_default(args.config.as_deref())
        .map_err(CliError::from)
        .with_context(|| match &args.config {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Invalid default configuration".to_string(),
        })?;

    if let Some(margin) = args.margin {
        info!(margin, "Overriding sync margin from CLI");
        config.sync.margin = margin;
        config_loader::ConfigLoader::validate(&config)
            .map_err(CliError::from)
            .context("Invalid --margin")?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn convert_args(margin: Option<f64>) -> ConvertArgs {
        ConvertArgs {
            source_dir: PathBuf::from("in"),
            dest_dir: PathBuf::from("out"),
            config: None,
            margin,
            scenes: Vec::new(),
            dry_run: false,
            fail_on_error: false,
        }
    }

    #[test]
    fn test_margin_override() {
        let config = effective_config(&convert_args(Some(0.05))).unwrap();
        assert_eq!(config.sync.margin, 0.05);

        let config = effective_config(&convert_args(None)).unwrap();
        assert_eq!(config.sync.margin, ConverterConfig::default().sync.margin);
    }

    #[test]
    fn test_invalid_margin_override_rejected() {
        assert!(effective_config(&convert_args(Some(-1.0))).is_err());
        assert!(effective_config(&convert_args(Some(f64::NAN))).is_err());
    }
}
