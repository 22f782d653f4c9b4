//! Camera intrinsics presets for the BundleFusion manifest.
//!
//! TUM publishes one calibration per Freiburg sensor; scenes are matched to a
//! sensor by name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row-major 4x4 matrix as written into `info.txt`
pub type Matrix4Rows = [f64; 16];

/// Identity extrinsics used for both sensors
pub const IDENTITY_EXTRINSIC: Matrix4Rows = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Intrinsics preset selected from the scene name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntrinsicsPreset {
    Freiburg1,
    Freiburg2,
    Freiburg3,
    Default,
}

impl IntrinsicsPreset {
    /// Presets tested against the scene name, in priority order
    const PRIORITY: [IntrinsicsPreset; 3] = [Self::Freiburg1, Self::Freiburg2, Self::Freiburg3];

    /// Select a preset by case-insensitive substring match on the scene name.
    ///
    /// The first matching key in `freiburg1`, `freiburg2`, `freiburg3` order
    /// wins; no match falls back to [`IntrinsicsPreset::Default`].
    pub fn for_scene(scene_name: &str) -> Self {
        let lowered = scene_name.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|preset| preset.key().is_some_and(|key| lowered.contains(key)))
            .unwrap_or(Self::Default)
    }

    /// Substring key, `None` for the fallback preset
    pub fn key(self) -> Option<&'static str> {
        match self {
            Self::Freiburg1 => Some("freiburg1"),
            Self::Freiburg2 => Some("freiburg2"),
            Self::Freiburg3 => Some("freiburg3"),
            Self::Default => None,
        }
    }

    /// Focal lengths and principal point `(fx, fy, cx, cy)`
    pub fn pinhole(self) -> (f64, f64, f64, f64) {
        match self {
            Self::Freiburg1 => (517.3, 516.5, 318.6, 255.3),
            Self::Freiburg2 => (520.9, 521.0, 325.1, 249.7),
            Self::Freiburg3 => (535.4, 539.2, 320.1, 247.6),
            Self::Default => (525.0, 525.0, 319.5, 239.5),
        }
    }

    /// Intrinsic matrix as a row-major `info.txt` value.
    ///
    /// Calibrated entries keep at least one decimal (`525.0`); the structural
    /// zeros and ones are written as integers.
    pub fn matrix_row(self) -> String {
        let (fx, fy, cx, cy) = self.pinhole();
        format!("{fx:?} 0 {cx:?} 0 0 {fy:?} {cy:?} 0 0 0 1 0 0 0 0 1")
    }
}

impl fmt::Display for IntrinsicsPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key().unwrap_or("default"))
    }
}

/// Render a matrix as 16 space-separated values (`1 0 0 ...`)
pub fn format_matrix_row(matrix: &Matrix4Rows) -> String {
    matrix
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_freiburg2_anywhere_case_insensitive() {
        assert_eq!(
            IntrinsicsPreset::for_scene("rgbd_dataset_FREIBURG2_xyz"),
            IntrinsicsPreset::Freiburg2
        );
        assert_eq!(
            IntrinsicsPreset::for_scene("Freiburg2"),
            IntrinsicsPreset::Freiburg2
        );
    }

    #[test]
    fn test_select_default_when_no_key_matches() {
        assert_eq!(
            IntrinsicsPreset::for_scene("office_scene"),
            IntrinsicsPreset::Default
        );
        assert_eq!(
            IntrinsicsPreset::for_scene("freiburg4_desk"),
            IntrinsicsPreset::Default
        );
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            IntrinsicsPreset::for_scene("freiburg3_vs_freiburg1"),
            IntrinsicsPreset::Freiburg1
        );
    }

    #[test]
    fn test_matrix_layout() {
        assert_eq!(
            IntrinsicsPreset::Freiburg1.matrix_row(),
            "517.3 0 318.6 0 0 516.5 255.3 0 0 0 1 0 0 0 0 1"
        );
        assert_eq!(
            IntrinsicsPreset::Freiburg2.matrix_row(),
            "520.9 0 325.1 0 0 521.0 249.7 0 0 0 1 0 0 0 0 1"
        );
        assert_eq!(
            IntrinsicsPreset::Default.matrix_row(),
            "525.0 0 319.5 0 0 525.0 239.5 0 0 0 1 0 0 0 0 1"
        );
        assert_eq!(
            format_matrix_row(&IDENTITY_EXTRINSIC),
            "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(IntrinsicsPreset::Freiburg3.to_string(), "freiburg3");
        assert_eq!(IntrinsicsPreset::Default.to_string(), "default");
    }
}
