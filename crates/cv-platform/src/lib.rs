//! # cv-platform
//!
//! Adapters that connect the history view to the outside world.
//!
//! [`stdio::StdioBridge`] implements both the backend gateway and the host
//! surface over newline-delimited JSON, so any process that can write lines to
//! stdin and read them from stdout can drive the view.

pub mod stdio;

pub use stdio::StdioBridge;
