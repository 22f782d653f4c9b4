//! Error types for CLI operations.

use std::path::PathBuf;

use thiserror::Error;

/// Run-level failures: the batch cannot start or must report failure
#[derive(Error, Debug)]
pub enum CliError {
    /// Source root does not exist or is not a directory
    #[error("Source directory not found: {}", path.display())]
    SourceNotDirectory { path: PathBuf },

    /// Destination root could not be created
    #[error("Failed to create destination directory {}: {source}", path.display())]
    DestinationCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] contracts::ContractError),

    /// At least one scene failed and the caller asked to treat that as fatal
    #[error("{count} scene(s) failed: {}", scenes.join(", "))]
    SceneFailures { count: usize, scenes: Vec<String> },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn source_not_directory(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotDirectory { path: path.into() }
    }

    pub fn scene_failures(scenes: Vec<String>) -> Self {
        Self::SceneFailures {
            count: scenes.len(),
            scenes,
        }
    }
}

/// Failures confined to a single scene; the batch continues
#[derive(Error, Debug)]
pub enum SceneError {
    /// Scene inputs missing or malformed
    #[error(transparent)]
    Ingestion(#[from] ingestion::IngestionError),

    /// Frame conversion or sink failure
    #[error(transparent)]
    Sink(#[from] contracts::ContractError),

    /// Manifest write failure
    #[error(transparent)]
    Transcode(#[from] dispatcher::TranscodeError),

    /// Scene output directory could not be created
    #[error("failed to create scene output {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SceneError {
    /// Whether the scene should be counted as skipped rather than failed
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Ingestion(e) if e.is_recoverable())
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
