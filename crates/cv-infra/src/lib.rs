pub mod config;
pub mod preview;

pub use config::load_config;
pub use preview::PngPreviewer;
