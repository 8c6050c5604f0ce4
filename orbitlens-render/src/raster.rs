//! Snapshot of a displayed image at its natural resolution.

use rayon::prelude::*;
use tracing::debug;

use orbitlens_core::{PixelSource, Rgb};

use crate::buffer::RenderBuffer;
use crate::error::RenderError;

/// RGB copy of an image, alpha discarded, taken once per image load.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSnapshot {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl RasterSnapshot {
    /// Copy an RGBA buffer of `width × height` pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: rgba.len(),
            });
        }
        let pixels: Vec<Rgb> = rgba
            .par_chunks_exact(4)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
            .collect();
        debug!(width, height, "Snapshot taken");
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_buffer(buffer: &RenderBuffer) -> crate::Result<Self> {
        Self::from_rgba(buffer.width, buffer.height, &buffer.pixels)
    }
}

impl PixelSource for RasterSnapshot {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel_at(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}
