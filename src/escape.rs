// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractals.
//!
//! Every pixel is mapped to a point `c` of the viewport and a formula is
//! iterated from it until the orbit either escapes (Mandelbrot) or
//! settles on a root (Newton), or the iteration budget runs out.  The
//! pixel stores `8 * (max - iterations)`, unscaled: fast escapes are
//! bright, points that never leave are black.

use itertools::iproduct;
use num::Complex;

use crate::complex::ComplexExt;
use crate::error::FractalError;
use crate::planes::{Pixel, PlaneMapper, Viewport};
use crate::raster::RasterImage;

/// An orbit whose squared modulus exceeds this has escaped.
pub const ESCAPE_RADIUS_SQR: f64 = 4.0;

/// A Newton orbit this close (squared) to a root of z⁴ = 1 has converged.
pub const CONVERGENCE_EPSILON: f64 = 0.001;

/// Stands in for the next Newton step when the derivative vanishes.
pub const DIVERGENT_SENTINEL: Complex<f64> = Complex { re: 65536.0, im: 0.0 };

/// The largest iteration cap whose pixel values still fit a `u32`.
pub const MAX_ITERATION_LIMIT: u32 = u32::max_value() / 8;

/// The two escape-time formulas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Formula {
    /// z ← z² + c from z = 0.
    Mandelbrot,
    /// Newton's method on z⁴ − 1 from z = c.
    Newton,
}

/// The stored value for a pixel that took `iterations` of `max`.
/// Saturates for caps above `MAX_ITERATION_LIMIT`.
#[inline]
pub fn intensity(max: u32, iterations: u32) -> u32 {
    (max - iterations).saturating_mul(8)
}

/// The index of the iteration at which the orbit of `c` escaped, or
/// `max` if it never did.
pub fn mandelbrot_iterations(c: Complex<f64>, max: u32) -> u32 {
    let mut z: Complex<f64> = Complex::from_real(0.0);
    for i in 0..max {
        z = z * z + c;
        if z.sqr_mod() > ESCAPE_RADIUS_SQR {
            return i;
        }
    }
    max
}

/// One Newton step for z⁴ − 1: (3z⁴ + 1) / 4z³.
pub fn newton_step(z: Complex<f64>) -> Complex<f64> {
    let z2 = z * z;
    let numerator = z2 * z2 * 3.0 + 1.0;
    let denominator = z2 * z * 4.0;
    numerator
        .checked_div(&denominator)
        .unwrap_or(DIVERGENT_SENTINEL)
}

fn converged(z: Complex<f64>) -> bool {
    let z2 = z * z;
    (z2 * z2 - 1.0).sqr_mod() <= CONVERGENCE_EPSILON
}

/// The number of Newton steps, the converging one included, that took
/// `c` to a root of z⁴ = 1, or `max` if it never got there.
pub fn newton_iterations(c: Complex<f64>, max: u32) -> u32 {
    let mut z = c;
    for step in 1..=max {
        z = newton_step(z);
        if converged(z) {
            return step;
        }
    }
    max
}

impl Formula {
    /// Iterations taken by the point `c`.
    pub fn iterations(self, c: Complex<f64>, max: u32) -> u32 {
        match self {
            Formula::Mandelbrot => mandelbrot_iterations(c, max),
            Formula::Newton => newton_iterations(c, max),
        }
    }

    /// The pixel value for the point `c`.
    pub fn value(self, c: Complex<f64>, max: u32) -> u32 {
        intensity(max, self.iterations(c, max))
    }
}

/// Rasterize `formula` over `viewport` onto a `width` x `height` grid.
pub fn render(
    formula: Formula,
    viewport: Viewport,
    width: usize,
    height: usize,
    max_iterations: u32,
) -> Result<RasterImage, FractalError> {
    if max_iterations > MAX_ITERATION_LIMIT {
        return Err(FractalError::IterationLimit(max_iterations, MAX_ITERATION_LIMIT));
    }
    let plane = PlaneMapper::new(width, height, viewport)?;
    let pixels: Vec<u32> = iproduct!(0..height, 0..width)
        .map(|(row, column)| {
            let c = plane.pixel_to_point(&Pixel(column, row));
            formula.value(c, max_iterations)
        })
        .collect();
    Ok(RasterImage::from_pixels(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_ITERATIONS as MAX;
    use rand::Rng;

    #[test]
    fn mandelbrot_interior_never_escapes() {
        assert_eq!(mandelbrot_iterations(Complex::new(0.0, 0.0), MAX), MAX);
        assert_eq!(Formula::Mandelbrot.value(Complex::new(-1.0, 0.0), MAX), 0);
    }

    #[test]
    fn mandelbrot_far_points_escape_at_once() {
        assert_eq!(mandelbrot_iterations(Complex::new(10.0, 0.0), MAX), 0);
        assert_eq!(Formula::Mandelbrot.value(Complex::new(10.0, 0.0), MAX), 4088);
    }

    #[test]
    fn mandelbrot_escape_boundary_is_strict() {
        // 2 + 0i lands exactly on |z|² = 4 and escapes one step later.
        assert_eq!(mandelbrot_iterations(Complex::new(2.0, 0.0), MAX), 1);
    }

    #[test]
    fn newton_roots_converge_in_one_step() {
        for root in &[
            Complex::new(1.0, 0.0),
            Complex::new(-1.0, 0.0),
            Complex::new(0.0, 1.0),
            Complex::new(0.0, -1.0),
        ] {
            assert_eq!(newton_iterations(*root, MAX), 1);
            assert_eq!(Formula::Newton.value(*root, MAX), 4080);
        }
    }

    #[test]
    fn newton_survives_a_zero_derivative() {
        assert_eq!(newton_step(Complex::new(0.0, 0.0)), DIVERGENT_SENTINEL);
        let n = newton_iterations(Complex::new(0.0, 0.0), MAX);
        assert!(n > 1 && n < MAX);
    }

    #[test]
    fn mandelbrot_default_view() {
        let img = render(Formula::Mandelbrot, Viewport::MANDELBROT, 400, 400, MAX).unwrap();
        assert_eq!((img.width(), img.height()), (400, 400));
        // Column 275 is re = 0 and row 200 is im = 0: c = 0 never escapes.
        assert_eq!(img.get(275, 200), 0);
        // Row 150 is im = -0.3, still inside the cardioid.
        assert_eq!(img.get(275, 150), 0);
        // The far left column lies outside the set.
        assert!(img.get(0, 0) > 0);
    }

    #[test]
    fn oversized_iteration_caps_are_refused() {
        assert_eq!(
            render(Formula::Mandelbrot, Viewport::MANDELBROT, 4, 4, MAX_ITERATION_LIMIT + 1),
            Err(FractalError::IterationLimit(MAX_ITERATION_LIMIT + 1, MAX_ITERATION_LIMIT))
        );
        let far = Viewport::new(9.0, 11.0, -1.0, 1.0);
        let img = render(Formula::Mandelbrot, far, 2, 2, MAX_ITERATION_LIMIT).unwrap();
        assert!(img.pixels().iter().all(|p| *p == 8 * MAX_ITERATION_LIMIT));
        assert_eq!(intensity(u32::max_value(), 0), u32::max_value());
    }

    #[test]
    fn newton_view_matches_the_point_function() {
        let img = render(Formula::Newton, Viewport::NEWTON, 64, 48, MAX).unwrap();
        let plane = PlaneMapper::new(64, 48, Viewport::NEWTON).unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let (x, y) = (rng.gen_range(0, 64), rng.gen_range(0, 48));
            let c = plane.pixel_to_point(&Pixel(x, y));
            assert_eq!(img.get(x, y), Formula::Newton.value(c, MAX));
        }
    }

    #[test]
    fn arbitrary_sizes_and_viewports() {
        let view = Viewport::new(-0.75, -0.74, 0.1, 0.11);
        let img = render(Formula::Mandelbrot, view, 17, 5, 100).unwrap();
        assert_eq!(img.pixels().len(), 85);
        assert!(img.pixels().iter().all(|p| *p <= 800));
    }

    #[test]
    fn renders_are_reproducible() {
        let a = render(Formula::Newton, Viewport::NEWTON, 40, 40, MAX).unwrap();
        let b = render(Formula::Newton, Viewport::NEWTON, 40, 40, MAX).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn inverted_viewports_are_rejected() {
        let view = Viewport::new(1.0, -1.0, -1.0, 1.0);
        assert_eq!(
            render(Formula::Newton, view, 10, 10, MAX),
            Err(FractalError::InvalidViewport)
        );
    }
}
