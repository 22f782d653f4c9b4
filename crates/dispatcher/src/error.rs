//! Transcoder error types

use std::path::{Path, PathBuf};

use image::ColorType;
use thiserror::Error;

/// Errors raised while converting one frame's files
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// Source image could not be read or decoded
    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Output image could not be encoded
    #[error("failed to encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Depth image is neither 16-bit nor 8-bit single channel
    #[error("unsupported depth pixel format {color:?} in '{path}'")]
    UnsupportedDepthFormat { path: PathBuf, color: ColorType },

    /// IO error
    #[error("io error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TranscodeError {
    pub(crate) fn decode(path: &Path, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn encode(path: &Path, source: image::ImageError) -> Self {
        Self::Encode {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
