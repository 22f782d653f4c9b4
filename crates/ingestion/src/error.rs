//! Ingestion 错误类型

use std::path::PathBuf;

use thiserror::Error;

/// Ingestion 错误
#[derive(Debug, Error)]
pub enum IngestionError {
    /// 场景缺少必需的输入目录或文件 (可恢复：跳过该场景)
    #[error("incomplete scene '{}': missing {}", scene.display(), missing.join(", "))]
    MissingSceneInput {
        /// 场景目录
        scene: PathBuf,
        /// 缺失的条目名称
        missing: Vec<String>,
    },

    /// 文件名无法解析为时间戳
    #[error("malformed filename '{}': {reason}", path.display())]
    MalformedFilename {
        /// 文件路径
        path: PathBuf,
        /// 错误原因
        reason: String,
    },

    /// 位姿日志行格式错误
    #[error("malformed pose line {line} in '{}': {reason}", path.display())]
    MalformedPoseLine {
        /// 位姿文件路径
        path: PathBuf,
        /// 行号 (从 1 开始)
        line: usize,
        /// 错误原因
        reason: String,
    },

    /// IO 错误
    #[error("io error on '{}': {source}", path.display())]
    Io {
        /// 出错的路径
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestionError {
    /// 是否可恢复 (仅缺失输入可以跳过，其余错误终止当前场景)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingSceneInput { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Ingestion Result 类型别名
pub type Result<T> = std::result::Result<T, IngestionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_recoverable() {
        let err = IngestionError::MissingSceneInput {
            scene: PathBuf::from("/data/scene"),
            missing: vec!["rgb".into(), "groundtruth.txt".into()],
        };
        assert!(err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "incomplete scene '/data/scene': missing rgb, groundtruth.txt"
        );
    }

    #[test]
    fn test_parse_errors_are_fatal() {
        let err = IngestionError::MalformedPoseLine {
            path: PathBuf::from("groundtruth.txt"),
            line: 4,
            reason: "expected 8 tokens, found 7".into(),
        };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("line 4"));
    }
}
