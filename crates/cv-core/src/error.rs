//! Error taxonomy for the history view.
//!
//! - [`GatewayError`]: the backend call failed (transport failure). Never retried here.
//! - [`MalformedPayload`]: a received entry matches neither or both content kinds.
//! - [`ViewError`]: either of the above, as reported to the host surface.
//!
//! An empty search needle is not an error; it means "no filtering".
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedPayload {
    #[error("clip content has neither `Text` nor `ImageBase64`")]
    MissingVariant,

    #[error("clip content has both `Text` and `ImageBase64`")]
    AmbiguousVariant,

    #[error("image payload is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("clip entry has an unexpected shape: {0}")]
    InvalidShape(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("history fetch failed: {0}")]
    Fetch(String),

    #[error("subscription to `{event}` failed: {reason}")]
    Subscribe { event: String, reason: String },

    #[error("restore request failed: {0}")]
    Restore(String),

    #[error("gateway channel closed")]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error(transparent)]
    Transport(#[from] GatewayError),

    #[error("malformed clip payload: {0}")]
    MalformedPayload(#[from] MalformedPayload),
}

impl ViewError {
    /// Stable, snake_case kind used by host protocols.
    pub fn kind(&self) -> &'static str {
        match self {
            ViewError::Transport(_) => "transport",
            ViewError::MalformedPayload(_) => "malformed_payload",
        }
    }
}
