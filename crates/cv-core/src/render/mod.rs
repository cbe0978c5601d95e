//! Render model: what the host surface receives for each visible entry.
//!
//! Rows are rebuilt from scratch on every render. Each row owns a clone of the
//! entry that produced it together with the restore callback, so a click can
//! only ever restore that exact entry, no matter how many rebuilds happened.
use std::fmt;
use std::sync::Arc;

use crate::clipboard::ClipEntry;

/// Callback invoked with the entry of a clicked row.
pub type RestoreFn = Arc<dyn Fn(ClipEntry) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPreview {
    /// Whitespace-collapsed, trimmed text.
    Text { text: String },

    /// Decodable PNG image.
    Image(ImagePreview),

    /// Image payload the previewer could not decode.
    Unrenderable { label: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    /// `data:image/png;base64,...` source for the host.
    pub src: String,

    /// Display size, already scaled to the configured maximum width.
    pub width: u32,
    pub height: u32,
}

/// Display size of a decoded image preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone)]
pub struct DisplayRow {
    pub preview: RowPreview,

    /// `HH:MM:SS` capture time, only when timestamps are enabled.
    pub timestamp: Option<String>,

    entry: ClipEntry,
    on_restore: RestoreFn,
}

impl DisplayRow {
    pub fn new(
        entry: ClipEntry,
        preview: RowPreview,
        timestamp: Option<String>,
        on_restore: RestoreFn,
    ) -> Self {
        Self {
            preview,
            timestamp,
            entry,
            on_restore,
        }
    }

    /// The entry this row was rendered from.
    pub fn entry(&self) -> &ClipEntry {
        &self.entry
    }

    /// Invoke the row's restore action with its own entry.
    pub fn click(&self) {
        (self.on_restore)(self.entry.clone());
    }
}

impl fmt::Debug for DisplayRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayRow")
            .field("preview", &self.preview)
            .field("timestamp", &self.timestamp)
            .field("kind", &self.entry.content.kind())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::tests::fixtures::*;
    use std::sync::Mutex;

    #[test]
    fn test_click_restores_own_entry() {
        let clicked = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&clicked);
        let on_restore: RestoreFn = Arc::new(move |entry| sink.lock().unwrap().push(entry));

        let first = DisplayRow::new(
            text_entry("first"),
            RowPreview::Text {
                text: "first".to_string(),
            },
            None,
            Arc::clone(&on_restore),
        );
        let second = DisplayRow::new(
            text_entry("second"),
            RowPreview::Text {
                text: "second".to_string(),
            },
            None,
            on_restore,
        );

        second.click();
        first.click();
        second.clone().click();

        assert_eq!(
            *clicked.lock().unwrap(),
            vec![text_entry("second"), text_entry("first"), text_entry("second")]
        );
    }
}
