//! Wire representation of clip content
//! 剪贴板内容的传输格式
//!
//! On the backend boundary content is an object with exactly one of two keys:
//!
//! ```json
//! { "Text": "hello" }
//! { "ImageBase64": "iVBORw0KGgo..." }
//! ```
//!
//! Neither key, both keys, or an undecodable base64 string is a
//! [`MalformedPayload`]. Unknown extra keys are ignored.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClipContent, ClipEntry};
use crate::error::MalformedPayload;

/// A clip as received from the backend, decoded one entry at a time so a bad
/// entry never takes a whole batch down with it.
pub type InboundClip = Result<ClipEntry, MalformedPayload>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireClipContent {
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(
        rename = "ImageBase64",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_base64: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireClipEntry {
    #[serde(default)]
    ts: Option<DateTime<Utc>>,
    content: WireClipContent,
}

/// Base64-encode PNG bytes the way the backend does (standard alphabet, padded).
pub fn encode_image(png: &[u8]) -> String {
    BASE64.encode(png)
}

impl TryFrom<WireClipContent> for ClipContent {
    type Error = MalformedPayload;

    fn try_from(wire: WireClipContent) -> Result<Self, Self::Error> {
        match (wire.text, wire.image_base64) {
            (Some(text), None) => Ok(ClipContent::Text(text)),
            (None, Some(b64)) => {
                let png = BASE64
                    .decode(b64.as_bytes())
                    .map_err(|e| MalformedPayload::InvalidBase64(e.to_string()))?;
                Ok(ClipContent::Image(Bytes::from(png)))
            }
            (Some(_), Some(_)) => Err(MalformedPayload::AmbiguousVariant),
            (None, None) => Err(MalformedPayload::MissingVariant),
        }
    }
}

impl From<&ClipContent> for WireClipContent {
    fn from(content: &ClipContent) -> Self {
        match content {
            ClipContent::Text(text) => WireClipContent {
                text: Some(text.clone()),
                image_base64: None,
            },
            ClipContent::Image(png) => WireClipContent {
                text: None,
                image_base64: Some(encode_image(png)),
            },
        }
    }
}

impl From<ClipContent> for WireClipContent {
    fn from(content: ClipContent) -> Self {
        WireClipContent::from(&content)
    }
}

/// Decode one clip entry from its JSON form.
pub fn decode_clip(value: serde_json::Value) -> InboundClip {
    let wire: WireClipEntry = serde_json::from_value(value)
        .map_err(|e| MalformedPayload::InvalidShape(e.to_string()))?;
    Ok(ClipEntry {
        ts: wire.ts,
        content: ClipContent::try_from(wire.content)?,
    })
}
