//! Clipboard domain models.
mod content;
mod entry;
mod wire;

pub use content::{ClipContent, ContentKey};
pub use entry::ClipEntry;
pub use wire::{decode_clip, encode_image, InboundClip, WireClipContent};
