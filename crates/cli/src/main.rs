//! # tum2bf CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 配置加载与验证
//! - 批量场景转换
//! - 场景完整性检查

mod cli;
mod commands;
mod error;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use observability::LogConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_convert, run_info, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on CLI options
    observability::init_logging(log_config(&cli))?;

    info!(version = env!("CARGO_PKG_VERSION"), "tum2bf starting");

    // Execute command
    let result = match &cli.command {
        Commands::Convert(args) => run_convert(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Map verbosity flags to a logging configuration
fn log_config(cli: &Cli) -> LogConfig {
    let (default_log_level, ignore_env) = if cli.quiet {
        ("warn", true)
    } else {
        let level = match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        (level, false)
    };

    LogConfig {
        log_format: cli.log_format.into(),
        default_log_level: default_log_level.to_string(),
        ignore_env,
    }
}
