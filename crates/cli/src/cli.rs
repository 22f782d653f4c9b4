//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tum2bf - TUM RGB-D to BundleFusion dataset converter
#[derive(Parser, Debug)]
#[command(
    name = "tum2bf",
    author,
    version,
    about = "Convert TUM RGB-D scenes to the BundleFusion layout",
    long_about = "Converts a directory of TUM RGB-D scenes into BundleFusion input folders.\n\n\
                  For every scene, color frames are paired with the nearest depth image and \n\
                  ground-truth pose, then written as frame-XXXXXX.{color.jpg,depth.png,pose.txt} \n\
                  together with an info.txt calibration manifest."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "TUM2BF_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose", env = "TUM2BF_QUIET")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "TUM2BF_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every scene under the source directory
    Convert(ConvertArgs),

    /// Check that each scene has its required inputs
    Validate(ValidateArgs),

    /// Display the effective configuration and intrinsics preset
    Info(InfoArgs),
}

/// Arguments for the `convert` command
#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    /// Directory containing one sub-directory per TUM scene
    #[arg(short, long, env = "TUM2BF_SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Output root; one sub-directory per converted scene is created
    #[arg(short, long, env = "TUM2BF_DEST_DIR")]
    pub dest_dir: PathBuf,

    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "TUM2BF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the matching margin in seconds
    #[arg(long, env = "TUM2BF_MARGIN")]
    pub margin: Option<f64>,

    /// Only convert the named scene (repeatable)
    #[arg(long = "scene", value_name = "NAME")]
    pub scenes: Vec<String>,

    /// Synchronize and log frames without writing anything
    #[arg(long, env = "TUM2BF_DRY_RUN")]
    pub dry_run: bool,

    /// Exit with an error when any scene failed
    #[arg(long, env = "TUM2BF_FAIL_ON_ERROR")]
    pub fail_on_error: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Directory containing one sub-directory per TUM scene
    #[arg(short, long, env = "TUM2BF_SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "TUM2BF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "TUM2BF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show the intrinsics preset selected for this scene name
    #[arg(long)]
    pub scene_name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
