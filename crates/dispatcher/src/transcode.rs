//! Per-frame file conversion: color JPEG, rescaled depth PNG, pose matrix.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use contracts::PoseVector;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageBuffer, Luma};
use nalgebra::{Isometry3, Matrix4, Quaternion, Translation3, UnitQuaternion};

use crate::error::TranscodeError;

/// TUM depth is 1/5000 m per unit, BundleFusion reads 1/1000 m
pub const DEPTH_UNIT_DIVISOR: u16 = 5;

/// JPEG quality for color output
pub const JPEG_QUALITY: u8 = 100;

/// 16-bit single channel depth buffer
pub type DepthImage = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Decode `src` and write it to `dst` as an RGB8 JPEG.
pub fn transcode_color(src: &Path, dst: &Path) -> Result<(), TranscodeError> {
    let rgb = image::open(src)
        .map_err(|e| TranscodeError::decode(src, e))?
        .to_rgb8();

    let file = File::create(dst).map_err(|e| TranscodeError::io(dst, e))?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|e| TranscodeError::encode(dst, e))?;
    writer.flush().map_err(|e| TranscodeError::io(dst, e))
}

/// Decode the depth image `src`, rescale it and write a 16-bit PNG to `dst`.
pub fn transcode_depth(src: &Path, dst: &Path) -> Result<(), TranscodeError> {
    let decoded = image::open(src).map_err(|e| TranscodeError::decode(src, e))?;
    let depth = rescale_depth(decoded, src)?;

    let file = File::create(dst).map_err(|e| TranscodeError::io(dst, e))?;
    let mut writer = BufWriter::new(file);
    depth
        .write_with_encoder(PngEncoder::new(&mut writer))
        .map_err(|e| TranscodeError::encode(dst, e))?;
    writer.flush().map_err(|e| TranscodeError::io(dst, e))
}

/// Convert a decoded TUM depth image to BundleFusion units.
///
/// Every pixel is divided by [`DEPTH_UNIT_DIVISOR`] with truncation. 8-bit
/// gray input keeps its raw values before division. `src` is only used
/// for error reporting.
pub fn rescale_depth(image: DynamicImage, src: &Path) -> Result<DepthImage, TranscodeError> {
    let mut depth: DepthImage = match image {
        DynamicImage::ImageLuma16(buf) => buf,
        DynamicImage::ImageLuma8(buf) => {
            ImageBuffer::from_fn(buf.width(), buf.height(), |x, y| {
                Luma([u16::from(buf.get_pixel(x, y)[0])])
            })
        }
        other => {
            return Err(TranscodeError::UnsupportedDepthFormat {
                path: src.to_path_buf(),
                color: other.color(),
            })
        }
    };

    for pixel in depth.pixels_mut() {
        pixel[0] /= DEPTH_UNIT_DIVISOR;
    }
    Ok(depth)
}

/// Homogeneous camera-to-world transform of a TUM pose.
///
/// The quaternion is normalized before conversion.
pub fn pose_matrix(pose: &PoseVector) -> Matrix4<f64> {
    let [tx, ty, tz] = pose.translation;
    let [qx, qy, qz, qw] = pose.rotation;

    let rotation = UnitQuaternion::from_quaternion(Quaternion::new(qw, qx, qy, qz));
    Isometry3::from_parts(Translation3::new(tx, ty, tz), rotation).to_homogeneous()
}

/// Four lines of four values with six decimals each.
pub fn format_pose_matrix(matrix: &Matrix4<f64>) -> String {
    let mut out = String::with_capacity(4 * 4 * 12);
    for row in 0..4 {
        let line = (0..4)
            .map(|col| format!("{:.6}", positive_zero(matrix[(row, col)])))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Write the pose of one frame to `dst`.
pub fn write_pose(pose: &PoseVector, dst: &Path) -> Result<(), TranscodeError> {
    let text = format_pose_matrix(&pose_matrix(pose));
    fs::write(dst, text).map_err(|e| TranscodeError::io(dst, e))
}

#[inline]
fn positive_zero(value: f64) -> f64 {
    // -0.0 == 0.0
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
