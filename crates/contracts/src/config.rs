//! ConverterConfig - Config Loader 输出
//!
//! 描述转换配置：同步容差、TUM 输入目录布局。

use serde::{Deserialize, Serialize};

/// 默认同步容差 (秒)
pub const DEFAULT_MARGIN_S: f64 = 0.02;

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// 完整的转换配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// 配置版本
    #[serde(default)]
    pub version: ConfigVersion,

    /// 同步策略配置
    #[serde(default)]
    pub sync: SyncConfig,

    /// 输入目录布局
    #[serde(default)]
    pub input: InputLayout,
}

/// 同步策略配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// 最大允许时间差 (秒)，差值恰好等于 margin 时仍然匹配
    #[serde(default = "default_margin")]
    pub margin: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN_S,
        }
    }
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN_S
}

/// TUM 场景目录布局
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputLayout {
    /// 彩色图像子目录
    #[serde(default = "default_color_dir")]
    pub color_dir: String,

    /// 深度图像子目录
    #[serde(default = "default_depth_dir")]
    pub depth_dir: String,

    /// 位姿日志文件
    #[serde(default = "default_pose_file")]
    pub pose_file: String,

    /// 彩色图像扩展名 (不区分大小写，不带点)
    #[serde(default = "default_color_extensions")]
    pub color_extensions: Vec<String>,

    /// 深度图像扩展名
    #[serde(default = "default_depth_extensions")]
    pub depth_extensions: Vec<String>,

    /// 位姿日志注释前缀
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

impl Default for InputLayout {
    fn default() -> Self {
        Self {
            color_dir: default_color_dir(),
            depth_dir: default_depth_dir(),
            pose_file: default_pose_file(),
            color_extensions: default_color_extensions(),
            depth_extensions: default_depth_extensions(),
            comment_prefix: default_comment_prefix(),
        }
    }
}

fn default_color_dir() -> String {
    "rgb".to_string()
}

fn default_depth_dir() -> String {
    "depth".to_string()
}

fn default_pose_file() -> String {
    "groundtruth.txt".to_string()
}

fn default_color_extensions() -> Vec<String> {
    vec!["png".to_string(), "jpg".to_string()]
}

fn default_depth_extensions() -> Vec<String> {
    vec!["png".to_string()]
}

fn default_comment_prefix() -> String {
    "#".to_string()
}
