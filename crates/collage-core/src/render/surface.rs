//! The opaque RGB8 canvas the compositor paints on.

use crate::color::Color;
use crate::layout::{LayoutError, Rect};

/// An opaque RGB raster, 3 bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// A black surface.
    ///
    /// # Errors
    ///
    /// `LayoutError::InvalidCanvas` when either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::InvalidCanvas {
                width: width as f64,
                height: height as f64,
            });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.index(x, y);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    pub fn fill(&mut self, color: Color) {
        let rgb = color.to_array();
        for px in self.pixels.chunks_exact_mut(3) {
            px.copy_from_slice(&rgb);
        }
    }

    /// Paint every pixel whose center lies inside `rect`.
    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = rect.pixel_span(self.width, self.height) else {
            return;
        };
        let rgb = color.to_array();
        for y in y0..y1 {
            let start = self.index(x0, y);
            let end = self.index(x1, y);
            for px in self.pixels[start..end].chunks_exact_mut(3) {
                px.copy_from_slice(&rgb);
            }
        }
    }

    /// Composite a premultiplied RGBA sample (channels in 0..=255) over the
    /// pixel at `(x, y)`.
    #[inline]
    pub(crate) fn blend(&mut self, x: u32, y: u32, premultiplied: [f64; 4]) {
        let i = self.index(x, y);
        let keep = 1.0 - premultiplied[3] / 255.0;
        for c in 0..3 {
            let v = premultiplied[c] + self.pixels[i + c] as f64 * keep;
            self.pixels[i + c] = v.clamp(0.0, 255.0).round() as u8;
        }
    }

    /// Hand the buffer to the image crate, e.g. for encoding.
    pub fn into_rgb_image(self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }
}
