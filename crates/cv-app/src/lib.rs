//! ClipView application layer
//!
//! This crate turns the history log into what the user sees, and drives it
//! from backend and host events.

pub mod usecases;

pub use usecases::{HistoryController, RenderPipeline};
