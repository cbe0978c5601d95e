//! # View configuration / 视图配置
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! Missing keys map to the documented defaults. File I/O lives in `cv-infra`.
mod view_config;

pub use view_config::{
    EarlyEventPolicy, HistoryConfig, RenderOptions, ViewConfig, DEFAULT_HISTORY_FILE,
    DEFAULT_IMAGE_MAX_WIDTH,
};
