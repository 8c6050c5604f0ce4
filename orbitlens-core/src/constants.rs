//! Fixed tracing and matching parameters.

/// Maximum number of `z ← z² + c` steps drawn per trace.
pub const MAX_STEPS: u32 = 200;

/// A trace stops once `|z|²` reaches this value.
pub const ESCAPE_THRESHOLD_SQ: f64 = 8.0;

/// Complex-plane region shown on the canvas.
pub const RE_MIN: f64 = -2.5;
pub const RE_MAX: f64 = 1.0;
pub const IM_MIN: f64 = -1.0;
pub const IM_MAX: f64 = 1.0;

/// Largest summed per-channel distance still reported as a swatch match.
pub const MATCH_THRESHOLD: u32 = 100;

/// Stroke color of the orbit trace.
pub const TRACE_COLOR: &str = "#00ff00";
