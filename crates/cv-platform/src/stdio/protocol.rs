//! Line protocol spoken over stdin/stdout.
//!
//! Every line is exactly one JSON object. Inbound lines are tagged by `type`,
//! outbound lines by `event`.
use cv_core::{ClipEntry, DisplayRow, RowPreview, ViewError};
use serde::{Deserialize, Serialize};

/// One line read from the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    /// A newly captured clip, in the same entry form as the history file.
    Clip { payload: serde_json::Value },

    /// Full current value of the filter input.
    Filter { value: String },

    /// Click on row `row` of the `rows` event carrying `generation`.
    Click { generation: u64, row: usize },
}

/// One line written to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BridgeEvent {
    /// Replaces the entire displayed list. Clicks echo `generation` back.
    Rows { generation: u64, rows: Vec<RowDto> },

    /// The backend should put this entry on the system clipboard.
    RestoreClip { entry: ClipEntry },

    Error { kind: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDto {
    pub row: usize,

    #[serde(flatten)]
    pub body: RowBody,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowBody {
    Text { text: String },
    Image { src: String, width: u32, height: u32 },
    Unrenderable { label: String },
}

impl RowDto {
    pub fn from_row(index: usize, row: &DisplayRow) -> Self {
        let body = match &row.preview {
            RowPreview::Text { text } => RowBody::Text { text: text.clone() },
            RowPreview::Image(image) => RowBody::Image {
                src: image.src.clone(),
                width: image.width,
                height: image.height,
            },
            RowPreview::Unrenderable { label } => RowBody::Unrenderable {
                label: label.clone(),
            },
        };
        Self {
            row: index,
            body,
            timestamp: row.timestamp.clone(),
        }
    }
}

impl BridgeEvent {
    pub fn rows(generation: u64, rows: &[DisplayRow]) -> Self {
        BridgeEvent::Rows {
            generation,
            rows: rows
                .iter()
                .enumerate()
                .map(|(index, row)| RowDto::from_row(index, row))
                .collect(),
        }
    }

    pub fn error(error: &ViewError) -> Self {
        BridgeEvent::Error {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}
