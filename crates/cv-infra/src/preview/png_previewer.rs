use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use cv_core::ports::ImagePreviewPort;
use cv_core::{ContentKey, PreviewSize};
use image::{GenericImageView, ImageFormat};
use tracing::trace;

/// Decodes PNG payloads and sizes them to fit `max_width`.
///
/// Sizes are cached by content key, so an image is decoded once no matter how
/// many times the list is rebuilt.
pub struct PngPreviewer {
    max_width: u32,
    cache: Mutex<HashMap<ContentKey, PreviewSize>>,
}

impl PngPreviewer {
    pub fn new(max_width: u32) -> Self {
        Self {
            max_width,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ImagePreviewPort for PngPreviewer {
    fn preview_size(&self, key: &ContentKey, png: &[u8]) -> Result<PreviewSize> {
        if let Some(size) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return Ok(*size);
        }

        let decoded = image::load_from_memory_with_format(png, ImageFormat::Png)
            .context("decode png for preview")?;
        let (width, height) = decoded.dimensions();
        let (width, height) = fit_to_width(width, height, self.max_width);
        let size = PreviewSize { width, height };

        trace!(key = %key, width, height, "Cached image preview size");
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), size);
        Ok(size)
    }
}

fn fit_to_width(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }

    let scaled_height = ((height as f64) * (max_width as f64) / (width as f64)).round() as u32;
    (max_width, scaled_height.max(1))
}
