//! 转换指标收集模块
//!
//! 通过 `metrics` facade 记录同步与写出指标；未安装 recorder 时为空操作。

use metrics::{counter, gauge, histogram};

/// 记录一个同步成功的帧
///
/// 每次产生 SyncedFrame 时调用此函数来记录指标。
pub fn record_frame_synced(frame_index: u64, depth_delta: f64, pose_delta: f64) {
    counter!("tum2bf_frames_synced_total").increment(1);

    // 帧序号 (用于检测进度)
    gauge!("tum2bf_last_frame_index").set(frame_index as f64);

    // 时间差 (秒 -> 毫秒)
    histogram!("tum2bf_match_delta_ms", "stream" => "depth").record(depth_delta * 1000.0);
    histogram!("tum2bf_match_delta_ms", "stream" => "pose").record(pose_delta * 1000.0);
}

/// 记录被丢弃的彩色帧 (超出容差)
pub fn record_color_dropped(reason: &'static str) {
    counter!("tum2bf_color_frames_dropped_total", "reason" => reason).increment(1);
}

/// 记录帧写出结果
pub fn record_frame_written(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "tum2bf_frames_written_total",
        "sink" => sink_name.to_string(),
        "status" => status
    )
    .increment(1);
}

/// 记录场景处理结果 (converted / skipped / failed)
pub fn record_scene_outcome(outcome: &'static str) {
    counter!("tum2bf_scenes_total", "outcome" => outcome).increment(1);
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// 合并另一组统计 (Chan 并行方差公式)
    pub fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }

        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        let mean = self.mean + delta * other.count as f64 / count as f64;
        let m2 = self.m2
            + other.m2
            + delta * delta * (self.count as f64 * other.count as f64) / count as f64;

        self.count = count;
        self.mean = mean;
        self.m2 = m2;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// 标准差
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// 最小值
    pub fn min(&self) -> f64 {
        self.min
    }

    /// 最大值
    pub fn max(&self) -> f64 {
        self.max
    }

    /// 摘要
    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();

        stats.push(1.0);
        stats.push(2.0);
        stats.push(3.0);
        stats.push(4.0);
        stats.push(5.0);

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_merge_matches_sequential() {
        let mut left = RunningStats::default();
        let mut right = RunningStats::default();
        let mut all = RunningStats::default();

        for v in [1.0, 2.0] {
            left.push(v);
            all.push(v);
        }
        for v in [3.0, 4.0, 5.0] {
            right.push(v);
            all.push(v);
        }

        left.merge(&right);
        assert_eq!(left.count(), all.count());
        assert!((left.mean() - all.mean()).abs() < 1e-10);
        assert!((left.variance() - all.variance()).abs() < 1e-10);
        assert_eq!(left.min(), 1.0);
        assert_eq!(left.max(), 5.0);
    }

    #[test]
    fn test_merge_into_empty() {
        let mut empty = RunningStats::default();
        let mut other = RunningStats::default();
        other.push(0.004);
        empty.merge(&other);
        assert_eq!(empty.count(), 1);
        assert_eq!(empty.max(), 0.004);
    }

    #[test]
    fn test_summary_display() {
        assert_eq!(StatsSummary::default().to_string(), "N/A");

        let summary = StatsSummary {
            count: 10,
            min: 1.0,
            max: 9.0,
            mean: 5.0,
            std_dev: 2.0,
        };
        let output = format!("{}", summary);
        assert!(output.contains("mean=5.000"));
        assert!(output.contains("(n=10)"));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_frame_synced(0, 0.001, 0.002);
        record_color_dropped("depth_out_of_tolerance");
        record_frame_written("bundlefusion", true);
        record_scene_outcome("converted");
    }
}
