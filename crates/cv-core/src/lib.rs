//! # cv-core
//!
//! Core domain models and ports for ClipView.
//!
//! This crate holds the history log, the search filter and the render model.
//! It has no host, transport or image-codec dependencies; those live behind the
//! traits in [`ports`].

pub mod clipboard;
pub mod config;
pub mod error;
pub mod filter;
pub mod history;
pub mod ports;
pub mod render;

// Re-export commonly used types at the crate root
pub use clipboard::{ClipContent, ClipEntry, ContentKey, InboundClip};
pub use config::{EarlyEventPolicy, HistoryConfig, RenderOptions, ViewConfig};
pub use error::{GatewayError, MalformedPayload, ViewError};
pub use history::{HistorySnapshot, HistoryStore};
pub use render::{DisplayRow, ImagePreview, PreviewSize, RestoreFn, RowPreview};
