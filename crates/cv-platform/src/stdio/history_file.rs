use std::io::ErrorKind;
use std::path::Path;

use cv_core::clipboard::decode_clip;
use cv_core::{GatewayError, InboundClip};
use tracing::{debug, info};

/// Read the bulk history from a JSON file holding an array of entries.
///
/// A missing file is an empty history. Entries are decoded one by one, so a
/// malformed entry shows up as an `Err` item next to the valid ones.
pub async fn read_history_file(path: &Path) -> Result<Vec<InboundClip>, GatewayError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "History file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(GatewayError::Fetch(format!(
                "failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| GatewayError::Fetch(format!("{} is not valid JSON: {}", path.display(), e)))?;
    let serde_json::Value::Array(items) = value else {
        return Err(GatewayError::Fetch(format!(
            "{} does not hold a JSON array",
            path.display()
        )));
    };

    debug!(path = %path.display(), entry_count = items.len(), "Read history file");
    Ok(items.into_iter().map(decode_clip).collect())
}
