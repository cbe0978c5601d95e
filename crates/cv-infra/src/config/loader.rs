//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file and hands the parsed value to
//! [`ViewConfig::from_toml`], which owns the mapping and the defaults.
//! 读取 TOML 文件，映射与默认值由 `ViewConfig::from_toml` 负责。

use std::path::Path;

use anyhow::Context;
use cv_core::ViewConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read, is not valid TOML, or names an
/// unknown `early_events` policy.
/// 文件无法读取、不是有效 TOML 或 `early_events` 取值未知时返回错误。
pub fn load_config(config_path: &Path) -> anyhow::Result<ViewConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    ViewConfig::from_toml(&toml_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_core::EarlyEventPolicy;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    /// Test that valid TOML is parsed correctly
    /// 测试有效 TOML 被正确解析
    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [history]
            path = "/var/lib/clipview/history.json"
            early_events = "replay"

            [render]
            show_timestamps = true
            image_max_width = 320
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(
            config.history.path,
            PathBuf::from("/var/lib/clipview/history.json")
        );
        assert_eq!(config.history.early_events, EarlyEventPolicy::Replay);
        assert!(config.render.show_timestamps);
        assert_eq!(config.render.image_max_width, 320);
    }

    #[test]
    fn test_load_config_empty_file_is_default() {
        let temp_file = NamedTempFile::new().unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config, ViewConfig::default());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[history\npath = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_rejects_unknown_policy() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[history]\nearly_events = \"merge\"\n")
            .unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    /// Test that non-existent files return IO error
    /// 测试不存在的文件返回 IO 错误
    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let non_existent_path = Path::new("/this/path/does/not/exist/config.toml");

        let err = load_config(non_existent_path).unwrap_err();

        assert!(
            err.to_string().contains("Failed to read config file"),
            "Expected IO error message, got: {}",
            err
        );
    }
}
