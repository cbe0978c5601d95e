//! # Configuration Resolution / 配置解析
//!
//! Picks the config file, loads it, and applies command-line overrides.
//!
//! - `--config <path>`: the file must exist
//! - otherwise `<config_dir>/clipview/config.toml`, and a missing file means defaults
//! - `--history <path>` replaces `[history] path`
//!
//! 相对的历史文件路径以配置文件所在目录为基准。

use std::path::{Path, PathBuf};

use cv_core::ViewConfig;
use cv_infra::load_config;
use tracing::{debug, info};

const APP_DIR_NAME: &str = "clipview";
const CONFIG_FILE_NAME: &str = "config.toml";

/// `<config_dir>/clipview/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `<data_local_dir>/clipview`, falling back to the working directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve the effective configuration
/// 解析最终生效的配置
///
/// # Errors / 错误
///
/// Returns error if an explicitly given config file cannot be read, or if any
/// config file that exists fails to parse.
pub fn resolve_config(
    explicit: Option<&Path>,
    history_override: Option<PathBuf>,
) -> anyhow::Result<ViewConfig> {
    resolve_config_with(
        explicit,
        default_config_path().as_deref(),
        default_data_dir(),
        history_override,
    )
}

fn resolve_config_with(
    explicit: Option<&Path>,
    default_path: Option<&Path>,
    data_dir: PathBuf,
    history_override: Option<PathBuf>,
) -> anyhow::Result<ViewConfig> {
    let config_path = match explicit {
        Some(path) => Some(path),
        None => default_path.filter(|path| path.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            info!(path = %path.display(), "Loading config");
            let mut config = load_config(path)?;
            if config.history.path.is_relative() {
                if let Some(base) = path.parent() {
                    config.history.path = base.join(&config.history.path);
                }
            }
            config
        }
        None => {
            debug!("No config file, using defaults");
            ViewConfig::with_system_defaults(data_dir)
        }
    };

    if let Some(history) = history_override {
        config.history.path = history;
    }
    Ok(config)
}
