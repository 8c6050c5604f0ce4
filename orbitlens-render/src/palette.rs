//! The period palette: one color per attracting-cycle length.
//!
//! The backdrop paints interior points with these colors and the front end
//! registers the same list as its swatches, so a highlighted swatch names
//! the period of the bulb under the cursor.

use orbitlens_core::{rgb_to_hex, Rgb};

/// Number of palette entries, and the longest cycle the backdrop detects.
pub const MAX_PERIOD: usize = 30;

/// Hue range of the ramp, in degrees.
pub const H_START: f64 = 200.0;
pub const H_STOP: f64 = 330.0;

pub const SATURATION: f64 = 0.7;
pub const LIGHTNESS: f64 = 0.5;

/// Prime stride used to spread neighbouring hues across periods.
///
/// Bulbs attached to the period-2 bulb all have even periods, so a prime
/// keeps them from sharing one half of the ramp.
pub const INTERLEAVE: usize = 17;

/// Convert HSL (hue in degrees, saturation and lightness in `0..=1`) to RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(360.0) / 60.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(to_byte(r), to_byte(g), to_byte(b))
}

/// Deal `src` out in `n` interleaved runs.
///
/// With `w = len / n`, emits `src[w*k + j]` for each `j < w` and `k < n`,
/// then the leftover tail `src[w*n..]` in order.
pub fn interleave<T: Clone>(src: &[T], n: usize) -> Vec<T> {
    if n == 0 {
        return src.to_vec();
    }
    let w = src.len() / n;
    let mut out = Vec::with_capacity(src.len());
    for j in 0..w {
        for k in 0..n {
            out.push(src[w * k + j].clone());
        }
    }
    out.extend_from_slice(&src[w * n..]);
    out
}

/// The [`MAX_PERIOD`]-entry palette; entry `p - 1` colors period `p`.
pub fn period_palette() -> Vec<Rgb> {
    let step = (H_STOP - H_START) / MAX_PERIOD as f64;
    let ramp: Vec<Rgb> = (0..MAX_PERIOD)
        .map(|i| {
            let hue = H_STOP - (MAX_PERIOD - 1 - i) as f64 * step;
            hsl_to_rgb(hue, SATURATION, LIGHTNESS)
        })
        .collect();
    interleave(&ramp, INTERLEAVE)
}

/// Palette as the ordered `#rrggbb` list the swatch matcher registers.
pub fn palette_hex(colors: &[Rgb]) -> Vec<String> {
    colors.iter().map(|&c| rgb_to_hex(c)).collect()
}
