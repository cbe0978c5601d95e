use std::sync::Arc;

use cv_core::clipboard::encode_image;
use cv_core::ports::ImagePreviewPort;
use cv_core::{
    ClipContent, ClipEntry, DisplayRow, ImagePreview, RenderOptions, RestoreFn, RowPreview,
};
use tracing::debug;

/// Converts a filtered view into display rows
/// 将过滤后的视图转换为显示行
///
/// Every call builds the full list again; nothing is carried over from the
/// previous render.
pub struct RenderPipeline {
    previewer: Arc<dyn ImagePreviewPort>,
    options: RenderOptions,
}

impl RenderPipeline {
    pub fn new(previewer: Arc<dyn ImagePreviewPort>, options: RenderOptions) -> Self {
        Self { previewer, options }
    }

    /// One row per entry, in the given order. Each row restores its own entry
    /// through `on_restore` when clicked.
    pub fn render(&self, rows: &[ClipEntry], on_restore: &RestoreFn) -> Vec<DisplayRow> {
        rows.iter()
            .map(|entry| {
                DisplayRow::new(
                    entry.clone(),
                    self.preview(entry),
                    self.timestamp(entry),
                    Arc::clone(on_restore),
                )
            })
            .collect()
    }

    fn preview(&self, entry: &ClipEntry) -> RowPreview {
        match &entry.content {
            ClipContent::Text(text) => RowPreview::Text {
                text: collapse_whitespace(text),
            },
            ClipContent::Image(png) => {
                let key = entry.content.content_key();
                match self.previewer.preview_size(&key, png) {
                    Ok(size) => RowPreview::Image(ImagePreview {
                        src: format!("data:image/png;base64,{}", encode_image(png)),
                        width: size.width,
                        height: size.height,
                    }),
                    Err(err) => {
                        debug!(
                            error = %err,
                            content_key = %key,
                            bytes = png.len(),
                            "Image preview unavailable"
                        );
                        RowPreview::Unrenderable {
                            label: format!("<image {} bytes>", png.len()),
                        }
                    }
                }
            }
        }
    }

    fn timestamp(&self, entry: &ClipEntry) -> Option<String> {
        if !self.options.show_timestamps {
            return None;
        }
        entry.ts.map(|ts| ts.format("%H:%M:%S").to_string())
    }
}

/// Collapse every run of whitespace to one space and trim both ends.
///
/// Display only; the entry keeps its original text.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
