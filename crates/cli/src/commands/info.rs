//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{ConverterConfig, IntrinsicsPreset};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::CliError;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    config_source: String,
    config: ConverterConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    intrinsics: Option<IntrinsicsInfo>,
}

#[derive(Serialize)]
struct IntrinsicsInfo {
    scene_name: String,
    preset: IntrinsicsPreset,
    fx: f64,
    fy: f64,
    cx: f64,
    cy: f64,
}

impl IntrinsicsInfo {
    fn for_scene(scene_name: &str) -> Self {
        let preset = IntrinsicsPreset::for_scene(scene_name);
        let (fx, fy, cx, cy) = preset.pinhole();
        Self {
            scene_name: scene_name.to_string(),
            preset,
            fx,
            fy,
            cx,
            cy,
        }
    }
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let config_source = match &args.config {
        Some(path) => path.display().to_string(),
        None => "(defaults)".to_string(),
    };
    info!(config = %config_source, "Loading configuration info");

    let config = config_loader::ConfigLoader::load_or_default(args.config.as_deref())
        .map_err(CliError::from)
        .with_context(|| format!("Failed to load config from {config_source}"))?;

    let info = ConfigInfo {
        config_source,
        config,
        intrinsics: args.scene_name.as_deref().map(IntrinsicsInfo::for_scene),
    };

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&info)?;
    }

    Ok(())
}

fn print_config_info(info: &ConfigInfo) -> Result<()> {
    println!("=== tum2bf configuration ({}) ===\n", info.config_source);

    let toml = config_loader::ConfigLoader::to_toml(&info.config)
        .map_err(CliError::from)
        .context("Failed to render configuration")?;
    println!("{}", toml.trim_end());

    if let Some(ref intrinsics) = info.intrinsics {
        println!("\nIntrinsics for '{}'", intrinsics.scene_name);
        println!("  preset: {}", intrinsics.preset);
        println!(
            "  fx={} fy={} cx={} cy={}",
            intrinsics.fx, intrinsics.fy, intrinsics.cx, intrinsics.cy
        );
        println!("  matrix: {}", intrinsics.preset.matrix_row());
    }

    println!();
    Ok(())
}
