use std::ops::Deref;
use std::sync::Arc;

use tracing::trace;

use crate::clipboard::ClipEntry;

/// Append-only log of clip entries, oldest first.
///
/// Seeded once from the bulk load, then grown one entry at a time for the
/// rest of the process. No size bound is enforced.
///
/// Storage is copy-on-write: [`snapshot`](Self::snapshot) shares the current
/// buffer, and an append that happens while a snapshot is alive copies it
/// first, so the snapshot never observes the append.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Arc<Vec<ClipEntry>>,
}

/// Read-only view of the log at the time it was taken.
#[derive(Debug, Clone)]
pub struct HistorySnapshot(Arc<Vec<ClipEntry>>);

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole log. Never merges with what was there before.
    pub fn seed(&mut self, entries: impl IntoIterator<Item = ClipEntry>) {
        let entries: Vec<ClipEntry> = entries.into_iter().collect();
        trace!(
            replaced = self.entries.len(),
            seeded = entries.len(),
            "Seeding history"
        );
        self.entries = Arc::new(entries);
    }

    pub fn append(&mut self, entry: ClipEntry) {
        Arc::make_mut(&mut self.entries).push(entry);
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot(Arc::clone(&self.entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Deref for HistorySnapshot {
    type Target = [ClipEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
