//! BundleFusion `info.txt` writer.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use contracts::{format_matrix_row, IntrinsicsPreset, IDENTITY_EXTRINSIC};
use tracing::debug;

use crate::error::TranscodeError;

/// Manifest file name inside a scene output directory
pub const MANIFEST_FILE: &str = "info.txt";

const VERSION_NUMBER: u32 = 4;
const SENSOR_NAME: &str = "Kinect";
const IMAGE_WIDTH: u32 = 640;
const IMAGE_HEIGHT: u32 = 480;
const DEPTH_SHIFT: u32 = 5000;

/// Render the manifest text for a scene.
pub fn render_manifest(scene_name: &str) -> String {
    let preset = IntrinsicsPreset::for_scene(scene_name);
    let intrinsic = preset.matrix_row();
    let extrinsic = format_matrix_row(&IDENTITY_EXTRINSIC);

    let mut out = String::new();
    let fields: [(&str, String); 11] = [
        ("m_versionNumber", VERSION_NUMBER.to_string()),
        ("m_sensorName", SENSOR_NAME.to_string()),
        ("m_colorWidth", IMAGE_WIDTH.to_string()),
        ("m_colorHeight", IMAGE_HEIGHT.to_string()),
        ("m_depthWidth", IMAGE_WIDTH.to_string()),
        ("m_depthHeight", IMAGE_HEIGHT.to_string()),
        ("m_depthShift", DEPTH_SHIFT.to_string()),
        ("m_calibrationColorIntrinsic", intrinsic.clone()),
        ("m_calibrationColorExtrinsic", extrinsic.clone()),
        ("m_calibrationDepthIntrinsic", intrinsic),
        ("m_calibrationDepthExtrinsic", extrinsic),
    ];
    for (key, value) in fields {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{key} = {value}");
    }
    out
}

/// Write `info.txt` for `scene_name` into `output_dir`.
pub fn write_manifest(output_dir: &Path, scene_name: &str) -> Result<PathBuf, TranscodeError> {
    let path = output_dir.join(MANIFEST_FILE);
    fs::write(&path, render_manifest(scene_name)).map_err(|e| TranscodeError::io(&path, e))?;

    debug!(
        scene = scene_name,
        preset = %IntrinsicsPreset::for_scene(scene_name),
        path = %path.display(),
        "manifest written"
    );
    Ok(path)
}
