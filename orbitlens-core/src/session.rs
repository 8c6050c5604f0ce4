//! Pointer-event handling: trace the orbit under the cursor and keep the
//! swatch highlight in sync with the pixel beneath it.

use tracing::debug;

use crate::color::Rgb;
use crate::error::CoreError;
use crate::orbit::trace;
use crate::swatch::{Highlight, HighlightChange, SwatchSet};
use crate::viewport::Viewport;

/// Read access to a snapshot of the displayed image at its natural size.
pub trait PixelSource {
    /// Natural `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Color at `(x, y)`, or `None` outside the image.
    fn pixel_at(&self, x: u32, y: u32) -> Option<Rgb>;
}

/// Everything a pointer-move produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerFrame {
    /// Polyline in canvas pixels, starting at the origin of the plane.
    pub trace: Vec<(f64, f64)>,
    /// Pixel read from the snapshot, if one could be read.
    pub sample: Option<Rgb>,
    pub change: HighlightChange,
}

/// Owns the palette, the highlight, and the current image snapshot.
///
/// Events are handled one at a time; each pointer-move recomputes the trace
/// and the highlight from scratch.
#[derive(Debug)]
pub struct Session<S> {
    viewport: Viewport,
    swatches: SwatchSet,
    highlight: Highlight,
    snapshot: Option<S>,
    trace: Vec<(f64, f64)>,
}

impl<S: PixelSource> Session<S> {
    /// Register `palette` in order over a canvas of `width × height`.
    ///
    /// A malformed palette entry fails the whole session.
    pub fn new<P: AsRef<str>>(palette: &[P], width: f64, height: f64) -> crate::Result<Self> {
        Ok(Self {
            viewport: Viewport::standard(width, height)?,
            swatches: SwatchSet::from_hex_list(palette)?,
            highlight: Highlight::default(),
            snapshot: None,
            trace: Vec::new(),
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn swatches(&self) -> &SwatchSet {
        &self.swatches
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    /// The trace from the last pointer-move, empty after a leave.
    pub fn current_trace(&self) -> &[(f64, f64)] {
        &self.trace
    }

    /// The canvas was resized (it always matches the displayed image size).
    pub fn resize(&mut self, width: f64, height: f64) -> crate::Result<()> {
        if width != self.viewport.width || height != self.viewport.height {
            self.viewport = self.viewport.with_size(width, height)?;
            debug!(width, height, "Canvas resized");
        }
        Ok(())
    }

    /// A new image finished loading; replace the snapshot.
    pub fn on_image_loaded(&mut self, snapshot: S) {
        let (w, h) = snapshot.dimensions();
        debug!(width = w, height = h, "Pixel snapshot replaced");
        self.snapshot = Some(snapshot);
    }

    /// Read the image pixel under canvas position `(x, y)`.
    ///
    /// The canvas position is rescaled into the snapshot's natural
    /// resolution. `Ok(None)` means the position is outside the image.
    pub fn sample(&self, x: f64, y: f64) -> crate::Result<Option<Rgb>> {
        let snapshot = self.snapshot.as_ref().ok_or(CoreError::StalePixelSample)?;
        let (nw, nh) = snapshot.dimensions();
        let ix = (x / self.viewport.width * f64::from(nw)).floor();
        let iy = (y / self.viewport.height * f64::from(nh)).floor();
        if !(ix >= 0.0 && iy >= 0.0 && ix < f64::from(nw) && iy < f64::from(nh)) {
            return Ok(None);
        }
        Ok(snapshot.pixel_at(ix as u32, iy as u32))
    }

    /// Pointer moved to canvas position `(x, y)`.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> PointerFrame {
        let c = self.viewport.to_plane(x, y);
        self.trace = trace(c, &self.viewport);

        let sample = match self.sample(x, y) {
            Ok(sample) => sample,
            Err(e) => {
                debug!("No pixel sample at ({x}, {y}): {e}");
                None
            }
        };
        let matched = sample.and_then(|rgb| match self.swatches.nearest(rgb) {
            Ok(id) => id,
            Err(e) => {
                debug!("Swatch match skipped: {e}");
                None
            }
        });
        let change = self.highlight.set(matched);

        PointerFrame {
            trace: self.trace.clone(),
            sample,
            change,
        }
    }

    /// Pointer left the canvas: drop the trace and any highlight.
    pub fn on_pointer_leave(&mut self) -> HighlightChange {
        self.trace.clear();
        self.highlight.clear()
    }
}
