//! 配置校验模块
//!
//! 校验规则：
//! - margin 为有限非负数
//! - 目录/文件名非空且不含路径分隔符
//! - 扩展名列表非空，扩展名不带前导点
//! - 注释前缀非空

use contracts::{ContractError, ConverterConfig, InputLayout};

/// 校验 ConverterConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &ConverterConfig) -> Result<(), ContractError> {
    validate_margin(config.sync.margin)?;
    validate_input_layout(&config.input)?;
    Ok(())
}

/// 校验同步容差
pub(crate) fn validate_margin(margin: f64) -> Result<(), ContractError> {
    if !margin.is_finite() || margin < 0.0 {
        return Err(ContractError::config_validation(
            "sync.margin",
            format!("margin must be a finite value >= 0, got {margin}"),
        ));
    }
    Ok(())
}

/// 校验输入目录布局
fn validate_input_layout(input: &InputLayout) -> Result<(), ContractError> {
    validate_entry_name("input.color_dir", &input.color_dir)?;
    validate_entry_name("input.depth_dir", &input.depth_dir)?;
    validate_entry_name("input.pose_file", &input.pose_file)?;
    validate_extensions("input.color_extensions", &input.color_extensions)?;
    validate_extensions("input.depth_extensions", &input.depth_extensions)?;

    if input.comment_prefix.is_empty() {
        return Err(ContractError::config_validation(
            "input.comment_prefix",
            "comment prefix cannot be empty",
        ));
    }
    Ok(())
}

/// 校验单层目录项名称
fn validate_entry_name(field: &str, name: &str) -> Result<(), ContractError> {
    if name.is_empty() {
        return Err(ContractError::config_validation(field, "name cannot be empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ContractError::config_validation(
            field,
            format!("'{name}' must be a plain entry name inside the scene directory"),
        ));
    }
    Ok(())
}

/// 校验扩展名列表
fn validate_extensions(field: &str, extensions: &[String]) -> Result<(), ContractError> {
    if extensions.is_empty() {
        return Err(ContractError::config_validation(
            field,
            "at least one extension is required",
        ));
    }
    for (idx, ext) in extensions.iter().enumerate() {
        if ext.is_empty() || ext.starts_with('.') {
            return Err(ContractError::config_validation(
                format!("{field}[{idx}]"),
                format!("extension '{ext}' must be non-empty and without a leading dot"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(validate(&ConverterConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_margin_is_valid() {
        let mut config = ConverterConfig::default();
        config.sync.margin = 0.0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_negative_margin() {
        let mut config = ConverterConfig::default();
        config.sync.margin = -0.01;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("sync.margin"), "got: {err}");
    }

    #[test]
    fn test_nan_margin() {
        assert!(validate_margin(f64::NAN).is_err());
        assert!(validate_margin(f64::INFINITY).is_err());
    }

    #[test]
    fn test_empty_color_dir() {
        let mut config = ConverterConfig::default();
        config.input.color_dir = String::new();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("cannot be empty"), "got: {err}");
    }

    #[test]
    fn test_pose_file_with_separator() {
        let mut config = ConverterConfig::default();
        config.input.pose_file = "../groundtruth.txt".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("input.pose_file"), "got: {err}");
    }

    #[test]
    fn test_extension_with_dot() {
        let mut config = ConverterConfig::default();
        config.input.depth_extensions = vec![".png".into()];
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("input.depth_extensions[0]"), "got: {err}");
    }

    #[test]
    fn test_empty_extension_list() {
        let mut config = ConverterConfig::default();
        config.input.color_extensions.clear();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("at least one extension"), "got: {err}");
    }

    #[test]
    fn test_empty_comment_prefix() {
        let mut config = ConverterConfig::default();
        config.input.comment_prefix.clear();
        assert!(validate(&config).is_err());
    }
}
