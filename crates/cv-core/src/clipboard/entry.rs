use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ClipContent;

/// One captured clipboard item, the unit of history.
///
/// Immutable once created. There is no identity beyond content and arrival
/// order, so two entries with equal content are both kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipEntry {
    /// Capture time reported by the backend, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<DateTime<Utc>>,

    pub content: ClipContent,
}

impl ClipEntry {
    pub fn new(content: ClipContent) -> Self {
        Self { ts: None, content }
    }

    pub fn captured_at(content: ClipContent, ts: DateTime<Utc>) -> Self {
        Self {
            ts: Some(ts),
            content,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ClipContent::text(text))
    }

    pub fn image(png: impl Into<bytes::Bytes>) -> Self {
        Self::new(ClipContent::image(png))
    }
}
