use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::clipboard::{ClipEntry, InboundClip};
use crate::error::GatewayError;

/// Event name of the backend's live clip stream.
pub const CLIP_EVENT: &str = "clip";

/// Live stream of newly captured clips, in capture order.
pub type ClipStream = mpsc::Receiver<InboundClip>;

/// Backend gateway
/// 后端网关
///
/// Entries are decoded one by one, so a malformed entry arrives as an `Err`
/// item instead of failing the whole fetch or closing the stream.
#[async_trait]
pub trait HistoryGatewayPort: Send + Sync {
    /// One-shot bulk fetch of the current history, oldest first.
    async fn fetch_history(&self) -> Result<Vec<InboundClip>, GatewayError>;

    /// Subscribe to a long-lived event stream (`"clip"`).
    async fn subscribe(&self, event_name: &str) -> Result<ClipStream, GatewayError>;

    /// Ask the backend to put `entry` back on the system clipboard.
    /// No confirmation is consumed beyond success or failure of the request.
    async fn restore(&self, entry: &ClipEntry) -> Result<(), GatewayError>;
}
