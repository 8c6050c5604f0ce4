pub mod color;
pub mod complex;
pub mod constants;
pub mod error;
pub mod orbit;
pub mod session;
pub mod swatch;
pub mod viewport;

// Re-export primary types for convenience.
pub use color::{hex_to_rgb, rgb_to_hex, Rgb};
pub use complex::Complex;
pub use error::CoreError;
pub use orbit::{iterate, Orbit};
pub use session::{PixelSource, PointerFrame, Session};
pub use swatch::{Highlight, HighlightChange, Swatch, SwatchId, SwatchSet};
pub use viewport::Viewport;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
