mod png_previewer;

pub use png_previewer::PngPreviewer;
