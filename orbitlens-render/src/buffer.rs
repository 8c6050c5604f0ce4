use orbitlens_core::Rgb;

use crate::error::RenderError;

/// An RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl RenderBuffer {
    /// Create a new buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = [0, 0, 0, 255].repeat(width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap existing RGBA data, checking its length.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> crate::Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        let i = self.offset(x, y)?;
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Write an opaque pixel; out-of-bounds writes are dropped.
    pub fn put(&mut self, x: i64, y: i64, color: Rgb) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Some(i) = self.offset(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    /// Draw a 1-pixel line between two points, clipped to the buffer.
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb) {
        let Some(((x0, y0), (x1, y1))) = self.clip(from, to) else {
            return;
        };
        // Bresenham over integer endpoints.
        let (mut x, mut y) = (x0.round() as i64, y0.round() as i64);
        let (xe, ye) = (x1.round() as i64, y1.round() as i64);
        let dx = (xe - x).abs();
        let dy = -(ye - y).abs();
        let sx = if x < xe { 1 } else { -1 };
        let sy = if y < ye { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x, y, color);
            if x == xe && y == ye {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw consecutive segments through `points`.
    pub fn draw_polyline(&mut self, points: &[(f64, f64)], color: Rgb) {
        match points {
            [] => {}
            [only] => self.draw_line(*only, *only, color),
            _ => {
                for pair in points.windows(2) {
                    self.draw_line(pair[0], pair[1], color);
                }
            }
        }
    }

    /// Liang–Barsky clip of a segment to the buffer rectangle (with a
    /// one-pixel margin so rounding never drops an edge pixel).
    fn clip(&self, a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        if ![a.0, a.1, b.0, b.1].iter().all(|v| v.is_finite()) {
            return None;
        }
        let (xmin, ymin) = (-1.0, -1.0);
        let (xmax, ymax) = (f64::from(self.width), f64::from(self.height));
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        for (p, q) in [
            (-dx, a.0 - xmin),
            (dx, xmax - a.0),
            (-dy, a.1 - ymin),
            (dy, ymax - a.1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
        Some((
            (a.0 + t0 * dx, a.1 + t0 * dy),
            (a.0 + t1 * dx, a.1 + t1 * dy),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = Rgb::new(0, 255, 0);

    fn lit(buf: &RenderBuffer) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..buf.height {
            for x in 0..buf.width {
                if buf.get(x, y) == Some(GREEN) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn new_buffer_is_black_opaque() {
        let buf = RenderBuffer::new(3, 2);
        assert_eq!(buf.pixels.len(), 3 * 2 * 4);
        for chunk in buf.pixels.chunks_exact(4) {
            assert_eq!(chunk, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn from_rgba_checks_length() {
        assert!(RenderBuffer::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            RenderBuffer::from_rgba(2, 2, vec![0; 15]),
            Err(RenderError::BufferSize {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn put_ignores_out_of_bounds() {
        let mut buf = RenderBuffer::new(2, 2);
        buf.put(-1, 0, GREEN);
        buf.put(2, 0, GREEN);
        buf.put(0, 5, GREEN);
        assert!(lit(&buf).is_empty());
        buf.put(1, 1, GREEN);
        assert_eq!(lit(&buf), vec![(1, 1)]);
    }

    #[test]
    fn horizontal_and_diagonal_lines() {
        let mut buf = RenderBuffer::new(5, 5);
        buf.draw_line((0.0, 0.0), (4.0, 0.0), GREEN);
        assert_eq!(lit(&buf), (0..5).map(|x| (x, 0)).collect::<Vec<_>>());

        let mut buf = RenderBuffer::new(5, 5);
        buf.draw_line((4.0, 4.0), (0.0, 0.0), GREEN);
        assert_eq!(lit(&buf), (0..5).map(|i| (i, i)).collect::<Vec<_>>());
    }

    #[test]
    fn line_is_clipped() {
        let mut buf = RenderBuffer::new(4, 4);
        buf.draw_line((-1000.0, 2.0), (1000.0, 2.0), GREEN);
        assert_eq!(lit(&buf), (0..4).map(|x| (x, 2)).collect::<Vec<_>>());

        let mut buf = RenderBuffer::new(4, 4);
        buf.draw_line((10.0, 10.0), (20.0, 30.0), GREEN);
        buf.draw_line((f64::NAN, 0.0), (1.0, 1.0), GREEN);
        assert!(lit(&buf).is_empty());
    }

    #[test]
    fn polyline_connects_points() {
        let mut buf = RenderBuffer::new(4, 4);
        buf.draw_polyline(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0)], GREEN);
        let pts = lit(&buf);
        assert_eq!(pts.len(), 7);
        assert!(pts.contains(&(3, 3)));

        let mut buf = RenderBuffer::new(4, 4);
        buf.draw_polyline(&[(1.0, 2.0)], GREEN);
        assert_eq!(lit(&buf), vec![(1, 2)]);
    }
}
