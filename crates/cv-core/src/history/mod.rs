//! In-memory history log.
mod store;

pub use store::{HistorySnapshot, HistoryStore};
