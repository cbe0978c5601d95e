//! History view use cases
//! 历史视图用例
//!
//! ```text
//! HistoryGatewayPort ── fetch / "clip" ──┐
//!                                        ↓
//! ViewHostPort ── FilterChanged ──→ HistoryController ── filter::view ──→ RenderPipeline
//!                                        ↑                                     ↓
//!                                        └──── row click ←──── ViewHostPort::show_rows
//! ```

pub mod history_controller;
pub mod render_rows;

pub use history_controller::HistoryController;
pub use render_rows::{collapse_whitespace, RenderPipeline};
