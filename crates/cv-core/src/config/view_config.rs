use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;

/// Default bulk-load file name.
pub const DEFAULT_HISTORY_FILE: &str = "history.json";

/// Default maximum preview width for images, in pixels.
pub const DEFAULT_IMAGE_MAX_WIDTH: u32 = 512;

/// View configuration
/// 视图配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub history: HistoryConfig,
    pub render: RenderOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Bulk-load source used by file-backed gateways.
    pub path: PathBuf,

    /// What happens to clips pushed before the bulk load completes.
    pub early_events: EarlyEventPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Attach an `HH:MM:SS` label to rows whose entry has a timestamp.
    pub show_timestamps: bool,

    /// Maximum image preview width; narrower images keep their size.
    pub image_max_width: u32,
}

/// Handling of clips that arrive before the bulk seed.
///
/// `Discard` is the established contract: such clips are appended and
/// rendered, then dropped when the seed replaces the log. `Replay` re-appends
/// them after the seed so none are lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EarlyEventPolicy {
    #[default]
    Discard,
    Replay,
}

impl FromStr for EarlyEventPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discard" => Ok(EarlyEventPolicy::Discard),
            "replay" => Ok(EarlyEventPolicy::Replay),
            other => Err(anyhow::anyhow!(
                "Invalid early_events value: {other:?}. Expected \"discard\" or \"replay\""
            )),
        }
    }
}

impl fmt::Display for EarlyEventPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EarlyEventPolicy::Discard => write!(f, "discard"),
            EarlyEventPolicy::Replay => write!(f, "replay"),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig {
                path: PathBuf::from(DEFAULT_HISTORY_FILE),
                early_events: EarlyEventPolicy::Discard,
            },
            render: RenderOptions::default(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_timestamps: false,
            image_max_width: DEFAULT_IMAGE_MAX_WIDTH,
        }
    }
}

impl ViewConfig {
    /// Create ViewConfig from a TOML value
    /// 从 TOML 值创建 ViewConfig
    ///
    /// Missing sections and keys fall back to [`ViewConfig::default`]. The
    /// only rejected input is an unknown `history.early_events` value.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let history = toml_value.get("history");
        let render = toml_value.get("render");

        let early_events = match history
            .and_then(|h| h.get("early_events"))
            .and_then(|v| v.as_str())
        {
            Some(raw) => raw.parse().context("Failed to parse [history] section")?,
            None => defaults.history.early_events,
        };

        Ok(Self {
            history: HistoryConfig {
                path: history
                    .and_then(|h| h.get("path"))
                    .and_then(|v| v.as_str())
                    .map(PathBuf::from)
                    .unwrap_or(defaults.history.path),
                early_events,
            },
            render: RenderOptions {
                show_timestamps: render
                    .and_then(|r| r.get("show_timestamps"))
                    .and_then(|v| v.as_bool())
                    .unwrap_or(defaults.render.show_timestamps),
                image_max_width: render
                    .and_then(|r| r.get("image_max_width"))
                    .and_then(|v| v.as_integer())
                    .and_then(|v| u32::try_from(v).ok())
                    .filter(|v| *v > 0)
                    .unwrap_or(defaults.render.image_max_width),
            },
        })
    }

    /// Create ViewConfig with the history file under `data_dir`
    /// 使用 `data_dir` 下的历史文件创建 ViewConfig
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        let mut config = Self::default();
        config.history.path = data_dir.join(DEFAULT_HISTORY_FILE);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_all_keys() {
        let toml_str = r#"
            [history]
            path = "/tmp/clips.json"
            early_events = "replay"

            [render]
            show_timestamps = true
            image_max_width = 256
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = ViewConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.history.path, PathBuf::from("/tmp/clips.json"));
        assert_eq!(config.history.early_events, EarlyEventPolicy::Replay);
        assert!(config.render.show_timestamps);
        assert_eq!(config.render.image_max_width, 256);
    }

    #[test]
    fn test_from_toml_uses_defaults_when_missing() {
        let toml_value: Value = toml::from_str("").unwrap();

        let config = ViewConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config, ViewConfig::default());
        assert_eq!(config.history.early_events, EarlyEventPolicy::Discard);
        assert_eq!(config.render.image_max_width, DEFAULT_IMAGE_MAX_WIDTH);
    }

    #[test]
    fn test_from_toml_rejects_unknown_policy() {
        let toml_str = r#"
            [history]
            early_events = "merge"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let err = ViewConfig::from_toml(&toml_value).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid early_events"));
    }

    #[test]
    fn test_from_toml_ignores_non_positive_width() {
        let toml_str = r#"
            [render]
            image_max_width = 0
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = ViewConfig::from_toml(&toml_value).unwrap();
        assert_eq!(config.render.image_max_width, DEFAULT_IMAGE_MAX_WIDTH);
    }

    #[test]
    fn test_with_system_defaults_places_history_in_data_dir() {
        let config = ViewConfig::with_system_defaults(PathBuf::from("/tmp/test"));
        assert_eq!(config.history.path, PathBuf::from("/tmp/test/history.json"));
    }

    #[test]
    fn test_policy_round_trips_through_display() {
        for policy in [EarlyEventPolicy::Discard, EarlyEventPolicy::Replay] {
            assert_eq!(policy.to_string().parse::<EarlyEventPolicy>().unwrap(), policy);
        }
    }
}
