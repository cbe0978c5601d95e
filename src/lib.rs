//! ClipView Library
//!
//! 剪贴板历史查看器：启动、配置与装配

pub mod bootstrap;
pub mod cli;

// 重新导出常用类型
pub use bootstrap::{run_app, run_view};
pub use cli::Cli;
