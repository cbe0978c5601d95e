//! Ports: the seams between the history view and its collaborators.
//!
//! - [`HistoryGatewayPort`]: the backend that owns the clipboard log.
//! - [`ViewHostPort`]: the UI surface (filter input, list container).
//! - [`ImagePreviewPort`]: image decoding for previews.
mod gateway;
mod host;
mod image_preview;

pub use gateway::{ClipStream, HistoryGatewayPort, CLIP_EVENT};
pub use host::{HostInput, InputStream, ViewHostPort};
pub use image_preview::ImagePreviewPort;
