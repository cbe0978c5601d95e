//! JSON-lines bridge
//! JSON 行协议桥接
//!
//! ```text
//! stdin  ──► reader task ──► clip stream / filter input / row clicks
//! stdout ◄── writer task ◄── rows / restore requests / error notices
//! ```
mod bridge;
mod history_file;
pub mod protocol;

pub use bridge::StdioBridge;
pub use history_file::read_history_file;
