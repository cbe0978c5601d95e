//! Search filter over the history log.
//!
//! Pure and stateless: it is called once per keystroke and once per append, and
//! keeps nothing between calls.

use crate::clipboard::ClipEntry;

/// Produce the display view of `log` for `needle`.
///
/// The result is newest first. An entry is kept when its
/// [`searchable_string`](crate::ClipContent::searchable_string) contains
/// `needle` after both are lowercased with [`str::to_lowercase`]. An empty
/// needle keeps every entry.
pub fn view(log: &[ClipEntry], needle: &str) -> Vec<ClipEntry> {
    let needle = needle.to_lowercase();
    log.iter()
        .rev()
        .filter(|entry| matches(entry, &needle))
        .cloned()
        .collect()
}

fn matches(entry: &ClipEntry, lowered_needle: &str) -> bool {
    if lowered_needle.is_empty() {
        return true;
    }
    entry
        .content
        .searchable_string()
        .to_lowercase()
        .contains(lowered_needle)
}
