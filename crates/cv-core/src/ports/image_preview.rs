use anyhow::Result;

use crate::clipboard::ContentKey;
use crate::render::PreviewSize;

/// Decodes PNG payloads for display.
///
/// Implementations may cache by `key`; the bytes behind a key never change.
pub trait ImagePreviewPort: Send + Sync {
    fn preview_size(&self, key: &ContentKey, png: &[u8]) -> Result<PreviewSize>;
}
