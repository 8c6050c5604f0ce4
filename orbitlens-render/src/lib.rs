pub mod backdrop;
pub mod buffer;
pub mod error;
pub mod export;
pub mod palette;
pub mod raster;

pub use backdrop::{
    classify, render_backdrop, render_backdrop_for, shade, PointClass, RenderCancel,
};
pub use buffer::RenderBuffer;
pub use error::RenderError;
pub use export::{export_png, load_png, ExportMetadata};
pub use palette::{hsl_to_rgb, interleave, palette_hex, period_palette};
pub use raster::RasterSnapshot;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
