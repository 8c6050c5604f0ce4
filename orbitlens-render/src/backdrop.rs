use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use orbitlens_core::{Complex, Rgb, Viewport};

use crate::buffer::RenderBuffer;
use crate::error::RenderError;
use crate::palette::MAX_PERIOD;

/// Iteration limit before a point is declared undetermined.
pub const MAX_ITERATIONS: u32 = 10_000;

/// Two iterates closer than this are treated as the same cycle point.
/// Much smaller values turn slow-converging interior points into noise.
pub const CYCLE_THRESHOLD: f64 = 1e-6;
const CYCLE_THRESHOLD_SQ: f64 = CYCLE_THRESHOLD * CYCLE_THRESHOLD;

/// Bailout on `|z|²`.
pub const ESCAPE_NORM_SQ: f64 = 4.0;

/// Points escaping within this many steps are painted white, later ones black.
pub const WHITE_ESCAPE_STEPS: u32 = 100;

/// Sub-pixel samples averaged per pixel for the cached backdrop.
pub const AA_SAMPLES: u32 = 30;

/// Natural resolution of the generated backdrop.
pub const BACKDROP_WIDTH: u32 = 1920;
pub const BACKDROP_HEIGHT: u32 = 1080;

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Generation counter plus row progress for a running backdrop render.
///
/// Bumping the generation makes every row not yet started bail out.
#[derive(Debug, Default)]
pub struct RenderCancel {
    generation: AtomicU64,
    rows_done: AtomicUsize,
    rows_total: AtomicUsize,
}

impl RenderCancel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn reset_progress(&self, total: usize) {
        self.rows_total.store(total, Ordering::Relaxed);
        self.rows_done.store(0, Ordering::Relaxed);
    }

    fn inc_progress(&self) {
        self.rows_done.fetch_add(1, Ordering::Relaxed);
    }

    /// `(rows done, rows total)`.
    pub fn progress(&self) -> (usize, usize) {
        (
            self.rows_done.load(Ordering::Relaxed),
            self.rows_total.load(Ordering::Relaxed),
        )
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// How the orbit of a point behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClass {
    /// `|z|²` reached [`ESCAPE_NORM_SQ`] at 0-based step `steps`.
    Escaped { steps: u32 },
    /// The orbit returned to within [`CYCLE_THRESHOLD`] of an iterate
    /// `period` steps back.
    Periodic { period: usize },
    /// Neither happened within the iteration limit.
    Undetermined,
}

/// Classify `c` by escape time or by the period of the cycle it settles on.
pub fn classify(c: Complex) -> PointClass {
    classify_bounded(c, MAX_ITERATIONS)
}

fn classify_bounded(c: Complex, max_iterations: u32) -> PointClass {
    let mut z = Complex::ZERO;
    let mut recent: VecDeque<Complex> = VecDeque::with_capacity(MAX_PERIOD);
    for step in 0..max_iterations {
        z = z.step(c);
        if z.norm_sq() >= ESCAPE_NORM_SQ {
            return PointClass::Escaped { steps: step };
        }
        // Newest first, so the shortest period wins.
        let len = recent.len();
        for i in (0..len).rev() {
            if (recent[i] - z).norm_sq() <= CYCLE_THRESHOLD_SQ {
                return PointClass::Periodic { period: len - i };
            }
        }
        if len == MAX_PERIOD {
            recent.pop_front();
        }
        recent.push_back(z);
    }
    PointClass::Undetermined
}

/// Pixel color for a classified point.
pub fn shade(class: PointClass, palette: &[Rgb]) -> Rgb {
    match class {
        PointClass::Periodic { period } => period
            .checked_sub(1)
            .and_then(|i| palette.get(i))
            .copied()
            .unwrap_or(Rgb::BLACK),
        PointClass::Undetermined => Rgb::BLACK,
        PointClass::Escaped { steps } if steps <= WHITE_ESCAPE_STEPS => Rgb::WHITE,
        PointClass::Escaped { .. } => Rgb::BLACK,
    }
}

// ---------------------------------------------------------------------------
// Full-frame render
// ---------------------------------------------------------------------------

/// Sub-pixel offset of sample `k`, in `[-0.5, 0.5)` on both axes.
///
/// Uses the R2 low-discrepancy sequence so renders are reproducible.
/// Sample 0 is the pixel origin itself.
#[inline]
fn jitter(k: u32) -> (f64, f64) {
    const A1: f64 = 0.754_877_666_246_692_7;
    const A2: f64 = 0.569_840_290_998_053_2;
    let k = f64::from(k);
    ((0.5 + A1 * k).fract() - 0.5, (0.5 + A2 * k).fract() - 0.5)
}

fn sample_pixel(viewport: &Viewport, px: u32, py: u32, samples: u32, palette: &[Rgb]) -> Rgb {
    let samples = samples.max(1);
    let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
    for k in 0..samples {
        let (dx, dy) = jitter(k);
        let c = viewport.to_plane(f64::from(px) + dx, f64::from(py) + dy);
        let color = shade(classify(c), palette);
        r += u32::from(color.r);
        g += u32::from(color.g);
        b += u32::from(color.b);
    }
    // Integer division truncates like the float-to-byte cast it replaces.
    Rgb::new((r / samples) as u8, (g / samples) as u8, (b / samples) as u8)
}

/// Render the period-colored backdrop at `width × height`.
///
/// Rows are processed in parallel. Returns `Ok(None)` if `cancel` was
/// bumped while rendering.
pub fn render_backdrop(
    width: u32,
    height: u32,
    aa_samples: u32,
    palette: &[Rgb],
    cancel: &RenderCancel,
) -> crate::Result<Option<RenderBuffer>> {
    render_backdrop_for(cancel.generation(), width, height, aa_samples, palette, cancel)
}

/// [`render_backdrop`] on behalf of a request issued at generation `gen`.
///
/// A cancel that landed after the request was issued but before the render
/// started still counts: every row bails and the result is `Ok(None)`.
pub fn render_backdrop_for(
    gen: u64,
    width: u32,
    height: u32,
    aa_samples: u32,
    palette: &[Rgb],
    cancel: &RenderCancel,
) -> crate::Result<Option<RenderBuffer>> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    let viewport = Viewport::standard(f64::from(width), f64::from(height))?;
    let start = Instant::now();
    cancel.reset_progress(height as usize);
    debug!(width, height, aa_samples, "Starting backdrop render");

    let mut buffer = RenderBuffer::new(width, height);
    let stride = width as usize * 4;
    buffer
        .pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(py, row)| {
            if cancel.generation() != gen {
                return;
            }
            for (px, out) in row.chunks_exact_mut(4).enumerate() {
                let color = sample_pixel(&viewport, px as u32, py as u32, aa_samples, palette);
                out[..3].copy_from_slice(&color.to_array());
            }
            cancel.inc_progress();
        });

    let cancelled = cancel.generation() != gen;
    info!(
        elapsed_ms = start.elapsed().as_millis(),
        width, height, cancelled, "Backdrop render finished"
    );
    Ok((!cancelled).then_some(buffer))
}
