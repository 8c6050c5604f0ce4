use crate::complex::Complex;
use crate::constants::{ESCAPE_THRESHOLD_SQ, MAX_STEPS};
use crate::viewport::Viewport;

/// Lazy escape-time orbit of `c`: `0, z₁, z₂, …` with `zₙ₊₁ = zₙ² + c`.
///
/// Yields the origin first, then at most `max_steps` iterates. The point
/// whose `|z|²` first reaches the threshold is still yielded; nothing after
/// it is.
#[derive(Debug, Clone)]
pub struct Orbit {
    c: Complex,
    z: Complex,
    threshold_sq: f64,
    remaining: u32,
    started: bool,
    escaped: bool,
}

/// Start the orbit of `c`. See [`Orbit`].
pub fn iterate(c: Complex, max_steps: u32, escape_threshold_sq: f64) -> Orbit {
    Orbit {
        c,
        z: Complex::ZERO,
        threshold_sq: escape_threshold_sq,
        remaining: max_steps,
        started: false,
        escaped: false,
    }
}

impl Orbit {
    /// Whether a yielded point has reached the escape threshold.
    pub fn escaped(&self) -> bool {
        self.escaped
    }
}

impl Iterator for Orbit {
    type Item = Complex;

    fn next(&mut self) -> Option<Complex> {
        if !self.started {
            self.started = true;
            return Some(self.z);
        }
        if self.escaped || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.z = self.z.step(self.c);
        if self.z.norm_sq() >= self.threshold_sq {
            self.escaped = true;
        }
        Some(self.z)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(!self.started);
        if self.escaped {
            return (pending, Some(pending));
        }
        let upper = pending + self.remaining as usize;
        (pending.min(upper), Some(upper))
    }
}

impl std::iter::FusedIterator for Orbit {}

/// The polyline for `c` on `viewport`: the orbit under the fixed step limit
/// and escape threshold, each point mapped back to pixels.
pub fn trace(c: Complex, viewport: &Viewport) -> Vec<(f64, f64)> {
    iterate(c, MAX_STEPS, ESCAPE_THRESHOLD_SQ)
        .map(|z| viewport.to_pixel(z))
        .collect()
}
