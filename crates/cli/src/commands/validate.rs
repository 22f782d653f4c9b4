//! `validate` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use ingestion::SceneLoader;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::error::CliError;
use crate::pipeline::discover_scenes;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    source_dir: String,
    scenes: Vec<SceneCheck>,
}

#[derive(Serialize)]
struct SceneCheck {
    name: String,
    complete: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<String>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(source = %args.source_dir.display(), "Validating scenes");

    let config = config_loader::ConfigLoader::load_or_default(args.config.as_deref())
        .map_err(CliError::from)
        .context("Failed to load configuration")?;
    let loader = SceneLoader::new(config.input);

    let result = check_scenes(&args.source_dir, &loader)?;

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Some scenes are missing required inputs")
    }
}

fn check_scenes(source_dir: &Path, loader: &SceneLoader) -> Result<ValidationResult> {
    let scenes = discover_scenes(source_dir, &[])?
        .iter()
        .map(|scene_dir| {
            let missing = loader.missing_inputs(scene_dir);
            SceneCheck {
                name: ingestion::scene_name(scene_dir),
                complete: missing.is_empty(),
                missing,
            }
        })
        .collect::<Vec<_>>();

    Ok(ValidationResult {
        valid: scenes.iter().all(|s| s.complete),
        source_dir: source_dir.display().to_string(),
        scenes,
    })
}

fn print_validation_result(result: &ValidationResult) {
    let complete = result.scenes.iter().filter(|s| s.complete).count();
    println!(
        "{} of {} scene(s) complete in {}",
        complete,
        result.scenes.len(),
        result.source_dir
    );

    for scene in &result.scenes {
        if scene.complete {
            println!("  ok       {}", scene.name);
        } else {
            println!("  missing  {} ({})", scene.name, scene.missing.join(", "));
        }
    }
}
