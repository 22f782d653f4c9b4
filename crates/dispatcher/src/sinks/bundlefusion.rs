//! BundleFusionSink - writes frames in the BundleFusion folder layout

use std::fs;
use std::path::PathBuf;

use contracts::{ContractError, FrameSink, SyncedFrame};
use tracing::{debug, error, instrument};

use crate::error::TranscodeError;
use crate::metrics::SinkMetrics;
use crate::transcode::{transcode_color, transcode_depth, write_pose};

/// Output file suffixes, appended to `frame-XXXXXX`
pub const COLOR_SUFFIX: &str = ".color.jpg";
pub const DEPTH_SUFFIX: &str = ".depth.png";
pub const POSE_SUFFIX: &str = ".pose.txt";

/// Sink that converts each frame into `frame-XXXXXX.{color.jpg,depth.png,pose.txt}`
pub struct BundleFusionSink {
    name: String,
    output_dir: PathBuf,
    metrics: SinkMetrics,
}

impl BundleFusionSink {
    /// Create a new sink writing into `output_dir` (created if missing)
    pub fn new(name: impl Into<String>, output_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            name: name.into(),
            output_dir,
            metrics: SinkMetrics::new(),
        })
    }

    /// Write counters
    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    fn output_path(&self, stem: &str, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}{suffix}"))
    }

    fn write_frame_to_disk(&self, frame: &SyncedFrame) -> Result<(), TranscodeError> {
        let stem = frame.stem();

        transcode_color(&frame.color.payload, &self.output_path(&stem, COLOR_SUFFIX))?;
        transcode_depth(&frame.depth.payload, &self.output_path(&stem, DEPTH_SUFFIX))?;
        write_pose(&frame.pose.payload, &self.output_path(&stem, POSE_SUFFIX))?;
        Ok(())
    }

    fn persist_frame(&mut self, frame: &SyncedFrame) -> Result<(), ContractError> {
        let result = self.write_frame_to_disk(frame);
        self.metrics.record(&self.name, result.is_ok());

        result.map_err(|e| {
            error!(sink = %self.name, frame_index = frame.frame_index, error = %e, "Write failed");
            ContractError::sink_write(&self.name, frame.stem(), e.to_string())
        })
    }
}

impl FrameSink for BundleFusionSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "bundlefusion_sink_write",
        skip(self, frame),
        fields(sink = %self.name, frame_index = frame.frame_index)
    )]
    fn write(&mut self, frame: &SyncedFrame) -> Result<(), ContractError> {
        self.persist_frame(frame)?;
        debug!(stem = %frame.stem(), "frame written");
        Ok(())
    }

    #[instrument(name = "bundlefusion_sink_flush", skip(self))]
    fn flush(&mut self) -> Result<(), ContractError> {
        // Every file is flushed as it is written
        Ok(())
    }

    #[instrument(name = "bundlefusion_sink_close", skip(self))]
    fn close(&mut self) -> Result<(), ContractError> {
        debug!(
            sink = %self.name,
            written = self.metrics.write_count(),
            failed = self.metrics.failure_count(),
            "BundleFusionSink closed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{PoseVector, TimestampedEntry};
    use std::path::Path;
    use image::{ImageBuffer, Luma, Rgb, RgbImage};
    use tempfile::tempdir;

    fn make_frame(src: &Path, frame_index: u64) -> SyncedFrame {
        let color = src.join("1.0.png");
        let depth = src.join("1.01.png");
        RgbImage::from_pixel(4, 4, Rgb([255, 0, 0])).save(&color).unwrap();
        ImageBuffer::<Luma<u16>, Vec<u16>>::from_pixel(4, 4, Luma([2500]))
            .save(&depth)
            .unwrap();

        SyncedFrame {
            frame_index,
            color: TimestampedEntry::new(1.0, color),
            depth: TimestampedEntry::new(1.01, depth),
            pose: TimestampedEntry::new(1.0, PoseVector::from_translation([1.0, 2.0, 3.0])),
            depth_delta: 0.01,
            pose_delta: 0.0,
        }
    }

    #[test]
    fn test_bundlefusion_sink_write() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        let scene_dir = out.path().join("scene");

        let mut sink = BundleFusionSink::new("test_bf", &scene_dir).unwrap();
        sink.write(&make_frame(src.path(), 7)).unwrap();
        sink.flush().unwrap();
        sink.close().unwrap();

        assert!(scene_dir.join("frame-000007.color.jpg").is_file());
        let depth = image::open(scene_dir.join("frame-000007.depth.png"))
            .unwrap()
            .into_luma16();
        assert_eq!(depth.get_pixel(0, 0)[0], 500);

        let pose = fs::read_to_string(scene_dir.join("frame-000007.pose.txt")).unwrap();
        assert_eq!(
            pose,
            "1.000000 0.000000 0.000000 1.000000\n\
             0.000000 1.000000 0.000000 2.000000\n\
             0.000000 0.000000 1.000000 3.000000\n\
             0.000000 0.000000 0.000000 1.000000\n"
        );
        assert_eq!(sink.metrics().write_count(), 1);
    }

    #[test]
    fn test_bundlefusion_sink_reports_frame_on_failure() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        let mut frame = make_frame(src.path(), 3);
        frame.depth.payload = src.path().join("missing.png");

        let mut sink = BundleFusionSink::new("test_bf", out.path()).unwrap();
        let err = sink.write(&frame).unwrap_err();

        match err {
            ContractError::SinkWrite {
                sink_name, frame, ..
            } => {
                assert_eq!(sink_name, "test_bf");
                assert_eq!(frame, "frame-000003");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(sink.metrics().failure_count(), 1);
    }
}
