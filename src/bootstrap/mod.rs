pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::resolve_config;
pub use run::{run_app, run_view};
pub use wiring::{wire_stdio, ViewRuntime};
