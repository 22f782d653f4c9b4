//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约与配置测试
//! - 磁盘场景 e2e 测试：Loader -> SyncEngine -> BundleFusionSink -> info.txt

#[cfg(test)]
mod contract_tests {
    use contracts::{ConverterConfig, IntrinsicsPreset};

    #[test]
    fn test_converter_config_serde_roundtrip() {
        let mut config = ConverterConfig::default();
        config.sync.margin = 0.015625;
        config.input.depth_dir = "depth_raw".to_string();
        config.input.color_extensions = vec!["jpg".to_string()];

        let toml = config_loader::ConfigLoader::to_toml(&config).unwrap();
        assert!(toml.contains("depth_raw"));

        let reloaded = config_loader::ConfigLoader::load_from_str(
            &toml,
            config_loader::ConfigFormat::Toml,
        )
        .unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.version, contracts::ConfigVersion::V1);
    }

    #[test]
    fn test_config_roundtrip_through_loader() {
        let toml = "[sync]\nmargin = 0.05\n\n[input]\ncolor_dir = \"color\"\n";
        let config = config_loader::ConfigLoader::load_from_str(
            toml,
            config_loader::ConfigFormat::Toml,
        )
        .unwrap();

        assert_eq!(config.sync.margin, 0.05);
        assert_eq!(config.input.color_dir, "color");
        assert_eq!(config.input.depth_dir, ConverterConfig::default().input.depth_dir);
    }

    #[test]
    fn test_manifest_preset_selection() {
        assert_eq!(
            IntrinsicsPreset::for_scene("xx_Freiburg2_pioneer"),
            IntrinsicsPreset::Freiburg2
        );
        assert_eq!(
            IntrinsicsPreset::for_scene("kitchen"),
            IntrinsicsPreset::Default
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use contracts::{FrameSink, StopReason, SyncConfig};
    use dispatcher::{write_manifest, BundleFusionSink};
    use image::{ImageBuffer, Luma, Rgb, RgbImage};
    use ingestion::SceneLoader;
    use sync_engine::SyncEngine;
    use tempfile::TempDir;

    type Depth16 = ImageBuffer<Luma<u16>, Vec<u16>>;

    /// On-disk TUM scene fixture
    struct SceneFixture {
        _root: TempDir,
        dir: PathBuf,
    }

    impl SceneFixture {
        fn new(name: &str) -> Self {
            let root = tempfile::tempdir().unwrap();
            let dir = root.path().join(name);
            fs::create_dir_all(dir.join("rgb")).unwrap();
            fs::create_dir_all(dir.join("depth")).unwrap();
            fs::write(dir.join("groundtruth.txt"), "# timestamp tx ty tz qx qy qz qw\n").unwrap();
            Self { _root: root, dir }
        }

        fn color(self, stamps: &[&str]) -> Self {
            for t in stamps {
                RgbImage::from_pixel(4, 4, Rgb([30, 60, 90]))
                    .save(self.dir.join(format!("rgb/{t}.png")))
                    .unwrap();
            }
            self
        }

        fn depth(self, stamps: &[&str], value: u16) -> Self {
            for t in stamps {
                Depth16::from_pixel(4, 4, Luma([value]))
                    .save(self.dir.join(format!("depth/{t}.png")))
                    .unwrap();
            }
            self
        }

        fn poses(self, stamps: &[&str]) -> Self {
            let mut text = fs::read_to_string(self.dir.join("groundtruth.txt")).unwrap();
            for t in stamps {
                text.push_str(&format!("{t} 0 0 0 0 0 0 1\n"));
            }
            fs::write(self.dir.join("groundtruth.txt"), text).unwrap();
            self
        }
    }

    struct Converted {
        out: TempDir,
        frames: u64,
        stop_reason: Option<StopReason>,
    }

    impl Converted {
        fn path(&self, file: &str) -> PathBuf {
            self.out.path().join(file)
        }
    }

    fn convert(scene: &Path, margin: f64) -> Converted {
        let out = tempfile::tempdir().unwrap();
        let streams = SceneLoader::default().load(scene).unwrap();
        let scene_name = streams.scene_name.clone();

        let mut engine = SyncEngine::new(streams, SyncConfig { margin });
        let mut sink = BundleFusionSink::new("e2e", out.path()).unwrap();
        let mut frames = 0;
        for frame in engine.by_ref() {
            sink.write(&frame).unwrap();
            frames += 1;
        }
        sink.close().unwrap();
        write_manifest(out.path(), &scene_name).unwrap();

        Converted {
            out,
            frames,
            stop_reason: engine.stop_reason(),
        }
    }

    #[test]
    fn test_e2e_contiguous_output() {
        // 5 color frames, only 1.0 / 3.0 / 5.0 have depth
        let scene = SceneFixture::new("rgbd_dataset_freiburg1_xyz")
            .color(&["1.0", "2.0", "3.0", "4.0", "5.0"])
            .depth(&["1.0", "3.0", "5.0"], 5000)
            .poses(&["1.0", "2.0", "3.0", "4.0", "5.0"]);

        let result = convert(&scene.dir, 0.02);

        assert_eq!(result.frames, 3);
        assert_eq!(result.stop_reason, Some(StopReason::ColorExhausted));
        for stem in ["frame-000000", "frame-000001", "frame-000002"] {
            assert!(result.path(&format!("{stem}.color.jpg")).is_file());
            assert!(result.path(&format!("{stem}.depth.png")).is_file());
            assert!(result.path(&format!("{stem}.pose.txt")).is_file());
        }
        assert!(!result.path("frame-000003.color.jpg").exists());

        let info = fs::read_to_string(result.path("info.txt")).unwrap();
        assert!(info.contains("m_calibrationDepthIntrinsic = 517.3 0 318.6 0"));
    }

    #[test]
    fn test_e2e_consumed_once() {
        let scene = SceneFixture::new("scene")
            .color(&["1.0", "1.01"])
            .depth(&["1.005"], 1000)
            .poses(&["1.0", "1.01"]);

        let result = convert(&scene.dir, 0.02);

        assert_eq!(result.frames, 1);
        assert!(!result.path("frame-000001.depth.png").exists());
    }

    #[test]
    fn test_e2e_depth_margin_boundary() {
        let scene = SceneFixture::new("scene")
            .color(&["1.0"])
            .depth(&["1.015625"], 1000)
            .poses(&["1.0"]);
        assert_eq!(convert(&scene.dir, 0.015625).frames, 1);

        let scene = SceneFixture::new("scene")
            .color(&["1.0"])
            .depth(&["1.015626"], 1000)
            .poses(&["1.0"]);
        assert_eq!(convert(&scene.dir, 0.015625).frames, 0);
    }

    #[test]
    fn test_e2e_pose_margin_boundary() {
        let scene = SceneFixture::new("scene")
            .color(&["2.0"])
            .depth(&["2.0"], 1000)
            .poses(&["1.984375"]);
        assert_eq!(convert(&scene.dir, 0.015625).frames, 1);

        let scene = SceneFixture::new("scene")
            .color(&["2.0"])
            .depth(&["2.0"], 1000)
            .poses(&["1.984374"]);
        assert_eq!(convert(&scene.dir, 0.015625).frames, 0);
    }

    #[test]
    fn test_e2e_depth_units_and_pose_text() {
        let scene = SceneFixture::new("scene")
            .color(&["1.0", "2.0"])
            .depth(&["1.0"], 5000)
            .poses(&["1.0", "2.0"]);
        Depth16::from_pixel(4, 4, Luma([4999]))
            .save(scene.dir.join("depth/2.0.png"))
            .unwrap();

        let result = convert(&scene.dir, 0.02);
        assert_eq!(result.frames, 2);

        let d0 = image::open(result.path("frame-000000.depth.png")).unwrap().into_luma16();
        let d1 = image::open(result.path("frame-000001.depth.png")).unwrap().into_luma16();
        assert_eq!(d0.get_pixel(0, 0)[0], 1000);
        assert_eq!(d1.get_pixel(3, 3)[0], 999);

        let pose = fs::read_to_string(result.path("frame-000000.pose.txt")).unwrap();
        assert_eq!(
            pose,
            "1.000000 0.000000 0.000000 0.000000\n\
             0.000000 1.000000 0.000000 0.000000\n\
             0.000000 0.000000 1.000000 0.000000\n\
             0.000000 0.000000 0.000000 1.000000\n"
        );
    }

    #[test]
    fn test_e2e_missing_pose_file_is_recoverable() {
        let scene = SceneFixture::new("scene").color(&["1.0"]).depth(&["1.0"], 5000);
        fs::remove_file(scene.dir.join("groundtruth.txt")).unwrap();

        let err = SceneLoader::default().load(&scene.dir).unwrap_err();
        assert!(err.is_recoverable());
    }
}
