// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane, the viewport.
use num::Complex;

use crate::error::FractalError;

/// The rectangle of the complex plane an escape-time image covers.
/// The real part runs along x, the imaginary part along y.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Real part at the left edge.
    pub min_x: f64,
    /// Real part at the right edge.
    pub max_x: f64,
    /// Imaginary part at the top row.
    pub min_y: f64,
    /// Imaginary part just past the bottom row.
    pub max_y: f64,
}

impl Viewport {
    /// The classic full view of the Mandelbrot set.
    pub const MANDELBROT: Viewport = Viewport {
        min_x: -2.2,
        max_x: 1.0,
        min_y: -1.2,
        max_y: 1.2,
    };

    /// The square around the four roots of z⁴ = 1.
    pub const NEWTON: Viewport = Viewport {
        min_x: -1.0,
        max_x: 1.0,
        min_y: -1.0,
        max_y: 1.0,
    };

    /// Constructor, in the order `(min_x, max_x, min_y, max_y)`.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Viewport {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }
}

/// Describes the x, y of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of a width x height grid onto points of a viewport.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Columns and rows of the integral plane.
    pub integral_plane: (usize, usize),
    /// The complex rectangle being sampled.
    pub viewport: Viewport,
    // The size of one pixel, in complex units, along each axis.
    steps: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane and the
    /// viewport it should be laid over.
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Result<PlaneMapper, FractalError> {
        if viewport.max_x < viewport.min_x || viewport.max_y < viewport.min_y {
            return Err(FractalError::InvalidViewport);
        }

        let steps = (
            (viewport.max_x - viewport.min_x) / (width as f64),
            (viewport.max_y - viewport.min_y) / (height as f64),
        );

        Ok(PlaneMapper {
            integral_plane: (width, height),
            viewport,
            steps,
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of no size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral plane, return the complex number at
    /// its top left corner.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.viewport.min_x + (pixel.0 as f64) * self.steps.0,
            self.viewport.min_y + (pixel.1 as f64) * self.steps.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(4, 4, Viewport::new(1.0, -1.0, -1.0, 1.0));
        assert_eq!(pm.err(), Some(FractalError::InvalidViewport));
        let pm = PlaneMapper::new(4, 4, Viewport::new(-1.0, 1.0, 1.0, -1.0));
        assert_eq!(pm.err(), Some(FractalError::InvalidViewport));
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, Viewport::NEWTON).unwrap();
        assert_eq!(pm.len(), 16);
        assert!(!pm.is_empty());
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, Viewport::new(0.0, 5.0, 0.0, 5.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 3)), Complex::new(4.0, 3.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = PlaneMapper::new(4, 4, Viewport::new(-2.0, 2.0, -2.0, 2.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn empty_planes_are_empty() {
        let pm = PlaneMapper::new(0, 10, Viewport::MANDELBROT).unwrap();
        assert!(pm.is_empty());
    }
}
