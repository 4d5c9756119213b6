// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The finished product of every generator: a row-major grid of
//! integral pixel values.  Geometric fractals store packed `0xRRGGBB`
//! colors; the escape-time generators store their raw intensity, which
//! a display treats the same way.

use image::{Pixel, Rgb, RgbImage};

use crate::turtle::LineSink;

/// Color of a line drawn by the turtle.
pub const INK: u32 = 0x00_FF_00;

/// An owned width x height grid of pixel values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl RasterImage {
    /// A blank (all zero) image.
    pub fn new(width: usize, height: usize) -> Self {
        RasterImage {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Wrap an existing row-major buffer.
    pub(crate) fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Self {
        assert!(pixels.len() == width * height);
        RasterImage {
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The value at column `x`, row `y`.  Panics outside the image.
    pub fn get(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x]
    }

    /// The whole buffer, row by row.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Set a single pixel, silently ignoring anything off the canvas.
    pub fn plot(&mut self, x: i64, y: i64, value: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[(y as usize) * self.width + (x as usize)] = value;
        }
    }

    /// Bresenham line, both endpoints included.  Pixels falling outside
    /// the canvas are clipped one by one, so a partly visible line is
    /// still drawn.
    pub fn draw_line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, value: u32) {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x1, y1);
        loop {
            self.plot(x, y, value);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Number of pixels holding anything other than zero.
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|p| **p != 0).count()
    }

    /// Unpack every value as `0xRRGGBB` into an 8-bit RGB image, ready
    /// for display.  Bits above the low 24 are dropped.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let p = self.get(x as usize, y as usize);
            Rgb::from_channels((p >> 16) as u8, (p >> 8) as u8, p as u8, 0)
        })
    }
}

/// Draws each turtle segment onto a raster in a single color.
pub struct Painter {
    image: RasterImage,
    color: u32,
}

impl Painter {
    /// A painter over a fresh blank canvas.
    pub fn new(width: usize, height: usize, color: u32) -> Self {
        Painter {
            image: RasterImage::new(width, height),
            color,
        }
    }

    /// Done painting; hand over the picture.
    pub fn into_image(self) -> RasterImage {
        self.image
    }
}

impl LineSink for Painter {
    fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        self.image.draw_line(x1, y1, x2, y2, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_line_includes_both_ends() {
        let mut img = RasterImage::new(5, 3);
        img.draw_line(1, 1, 3, 1, 7);
        assert_eq!(img.pixels(), &[0, 0, 0, 0, 0, 0, 7, 7, 7, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn diagonal_line_in_either_direction() {
        let mut a = RasterImage::new(4, 4);
        let mut b = RasterImage::new(4, 4);
        a.draw_line(0, 0, 3, 3, 1);
        b.draw_line(3, 3, 0, 0, 1);
        assert_eq!(a, b);
        assert_eq!(a.lit(), 4);
        assert_eq!(a.get(2, 2), 1);
    }

    #[test]
    fn lines_are_clipped_to_the_canvas() {
        let mut img = RasterImage::new(3, 3);
        img.draw_line(-5, 1, 10, 1, 9);
        assert_eq!(img.lit(), 3);
        img.draw_line(-5, -5, -1, -1, 9);
        assert_eq!(img.lit(), 3);
    }

    #[test]
    fn painter_draws_turtle_segments() {
        let mut painter = Painter::new(4, 4, INK);
        painter.line(0, 3, 3, 3);
        let img = painter.into_image();
        assert_eq!(img.get(0, 3), INK);
        assert_eq!(img.get(3, 3), INK);
        assert_eq!(img.get(0, 0), 0);
    }

    #[test]
    fn rgb_conversion_unpacks_channels() {
        let img = RasterImage::from_pixels(2, 1, vec![INK, 4088]);
        let rgb = img.to_rgb_image();
        assert_eq!(rgb.dimensions(), (2, 1));
        assert_eq!(rgb.get_pixel(0, 0).channels(), &[0, 255, 0]);
        assert_eq!(rgb.get_pixel(1, 0).channels(), &[0, 0x0F, 0xF8]);
    }
}
