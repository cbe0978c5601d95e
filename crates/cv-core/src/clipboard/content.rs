//! Clipboard content model
//!
//! [`ClipContent`] is the payload of one captured clip. It is a closed sum type
//! with two kinds, text and image. Every consumer (filter, render) matches on it
//! exhaustively, so a third kind would fail to compile at each of those sites
//! instead of silently falling through.
//!
//! The in-memory form holds raw image bytes. Base64 only exists at the wire
//! boundary, see [`WireClipContent`](super::WireClipContent).
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::wire::WireClipContent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireClipContent", into = "WireClipContent")]
pub enum ClipContent {
    /// Raw captured text, whitespace not normalized.
    Text(String),

    /// Raw PNG bytes.
    Image(Bytes),
}

/// Hex digest of a clip's content.
///
/// Used as a cache key for derived data such as image previews. It is not an
/// identity: two entries with the same key are still two entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentKey(String);

impl ContentKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ClipContent {
    pub fn text(text: impl Into<String>) -> Self {
        ClipContent::Text(text.into())
    }

    pub fn image(png: impl Into<Bytes>) -> Self {
        ClipContent::Image(png.into())
    }

    /// Short kind label for logs and host DTOs.
    pub fn kind(&self) -> &'static str {
        match self {
            ClipContent::Text(_) => "text",
            ClipContent::Image(_) => "image",
        }
    }

    /// Size of the payload as held in memory (UTF-8 length for text).
    pub fn data_len(&self) -> usize {
        match self {
            ClipContent::Text(text) => text.len(),
            ClipContent::Image(png) => png.len(),
        }
    }

    /// The string a search needle is matched against.
    ///
    /// This is the content serialized in its wire form, tag included:
    /// `{"Text":"..."}` or `{"ImageBase64":"..."}`. JSON escaping applies, so a
    /// newline inside text is searchable as the two characters `\n`, and the
    /// tag name itself (`Text`, `ImageBase64`) matches every entry of that kind.
    pub fn searchable_string(&self) -> String {
        serde_json::to_string(&WireClipContent::from(self)).unwrap_or_default()
    }

    /// Compute the content key (blake3 over a kind tag plus the raw payload).
    pub fn content_key(&self) -> ContentKey {
        let mut hasher = blake3::Hasher::new();
        match self {
            ClipContent::Text(text) => {
                hasher.update(&[0u8]);
                hasher.update(text.as_bytes());
            }
            ClipContent::Image(png) => {
                hasher.update(&[1u8]);
                hasher.update(png);
            }
        }
        ContentKey(hasher.finalize().to_hex().to_string())
    }
}
