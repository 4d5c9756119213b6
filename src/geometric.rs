// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Geometric (L-system) fractals.
//!
//! Rendering happens in two passes.  The first pass is a dry run: the
//! grammar is expanded one level at a time and walked by a turtle that
//! only measures the drawing's bounding box, until the drawing no longer
//! fits the canvas.  The deepest level that *did* fit wins.  The second
//! pass walks that level's expansion again, this time starting from an
//! offset that centers the bounding box on the canvas, and paints every
//! segment.

use log::{debug, trace};

use crate::config::RenderConfig;
use crate::error::FractalError;
use crate::lsystem::LSystem;
use crate::raster::{Painter, RasterImage, INK};
use crate::turtle::{LineSink, Turtle};

/// The extent of a turtle drawing.  The box always contains the
/// turtle's starting point, the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundingBox {
    /// Leftmost segment end.
    pub min_x: i64,
    /// Topmost segment end.
    pub min_y: i64,
    /// Rightmost segment end.
    pub max_x: i64,
    /// Bottommost segment end.
    pub max_y: i64,
}

impl BoundingBox {
    /// Horizontal extent.
    pub fn width(&self) -> i64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    pub fn height(&self) -> i64 {
        self.max_y - self.min_y
    }

    /// True when the box does not fit a `width` x `height` canvas.
    pub fn overflows(&self, width: usize, height: usize) -> bool {
        self.width() >= width as i64 || self.height() >= height as i64
    }

    /// Where the turtle must start so the box lands centered on a
    /// `width` x `height` canvas.
    pub fn centering_offset(&self, width: usize, height: usize) -> (i64, i64) {
        (
            (width as i64 - (self.min_x + self.max_x)) / 2,
            (height as i64 - (self.min_y + self.max_y)) / 2,
        )
    }
}

/// A sink that draws nothing and only grows a bounding box over the
/// end point of every segment.
#[derive(Default)]
struct Measure(BoundingBox);

impl LineSink for Measure {
    fn line(&mut self, _x1: i64, _y1: i64, x2: i64, y2: i64) {
        let b = &mut self.0;
        b.min_x = b.min_x.min(x2);
        b.max_x = b.max_x.max(x2);
        b.min_y = b.min_y.min(y2);
        b.max_y = b.max_y.max(y2);
    }
}

/// The outcome of auto-fitting a grammar to a canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Fit {
    /// The expansion level chosen.
    pub level: usize,
    /// That level's turtle commands.
    pub pattern: String,
    /// That level's dry-run bounding box.
    pub bounds: BoundingBox,
}

/// Dry-run the turtle over `pattern` from the origin and report the
/// extent of what it would have drawn.
pub fn measure(
    lsystem: &LSystem,
    pattern: &str,
    config: &RenderConfig,
) -> Result<BoundingBox, FractalError> {
    let mut turtle = Turtle::with_capacity(config.turtle_scale, config.stack_capacity);
    let mut sink = Measure::default();
    turtle.execute(pattern, lsystem.angle, &mut sink)?;
    Ok(sink.0)
}

/// Find the deepest expansion level whose drawing fits inside a
/// `width` x `height` canvas.
///
/// Levels are tried from 1 upward.  The first level that overflows ends
/// the search and the level before it is kept.  Should level 1 already
/// overflow it is kept anyway, oversized.  The search also ends at
/// `config.max_level`, or at the first level whose expansion visits
/// more than `config.max_expansion_len` symbols, keeping the previous
/// level either way.
pub fn fit(
    lsystem: &LSystem,
    width: usize,
    height: usize,
    config: &RenderConfig,
) -> Result<Fit, FractalError> {
    let mut best = try_level(lsystem, 1, config)?;
    if best.bounds.overflows(width, height) {
        debug!("level 1 already overflows a {}x{} canvas", width, height);
        return Ok(best);
    }
    for level in 2..config.max_level {
        let candidate = match try_level(lsystem, level, config) {
            Ok(candidate) => candidate,
            Err(FractalError::ExpansionBudgetExhausted(budget)) => {
                debug!("level {} needs more than {} symbols", level, budget);
                break;
            }
            Err(e) => return Err(e),
        };
        if candidate.bounds.overflows(width, height) {
            break;
        }
        best = candidate;
    }
    debug!("fit level {} into {}x{}", best.level, width, height);
    Ok(best)
}

fn try_level(lsystem: &LSystem, level: usize, config: &RenderConfig) -> Result<Fit, FractalError> {
    let pattern = lsystem.expand_within(level, config.max_expansion_len)?;
/// Auto-fit `lsystem` to the canvas, then paint it centered.
pub fn render(
    lsystem: &LSystem,
    width: usize,
    height: usize,
    config: &RenderConfig,
) -> Result<RasterImage, FractalError> {
    let fit = fit(lsystem, width, height, config)?;
    let (x, y) = fit.bounds.centering_offset(width, height);

    let mut turtle = Turtle::with_capacity(config.turtle_scale, config.stack_capacity);
    turtle.set_position(x as f64, y as f64);
    let mut painter = Painter::new(width, height, INK);
    turtle.execute(&fit.pattern, lsystem.angle, &mut painter)?;
    Ok(painter.into_image())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn koch() -> LSystem {
        LSystem::parse(60.0, "F:F-F++F-F").unwrap()
    }

    #[test]
    fn measure_tracks_segment_ends() {
        let square = LSystem::parse(90.0, ":F+F+F+F").unwrap();
        let b = measure(&square, "F+F+F+F", &RenderConfig::default()).unwrap();
        assert_eq!(b.width(), 4);
        assert_eq!(b.height(), 4);
        assert_eq!((b.min_x, b.min_y), (0, 0));
    }

    #[test]
    fn pen_up_moves_are_not_measured() {
        let ls = LSystem::parse(90.0, ":ffF").unwrap();
        let b = measure(&ls, "ffF", &RenderConfig::default()).unwrap();
        assert_eq!(b, BoundingBox { min_x: 0, min_y: 0, max_x: 12, max_y: 0 });
    }

    #[test]
    fn centering_offset_balances_the_box() {
        let b = BoundingBox { min_x: -10, min_y: 0, max_x: 30, max_y: 20 };
        assert_eq!(b.centering_offset(100, 100), (40, 40));
        let b = BoundingBox { min_x: 0, min_y: 0, max_x: 3, max_y: 0 };
        assert_eq!(b.centering_offset(10, 10), (3, 5));
    }

    #[test]
    fn fit_keeps_the_last_level_that_fits() {
        // Each Koch level triples the width: 36, 108, 324, 972.
        let config = RenderConfig::default();
        let fit = fit(&koch(), 400, 400, &config).unwrap();
        assert_eq!(fit.level, 3);
        assert!(fit.bounds.width() < 400 && fit.bounds.height() < 400);
        let next = koch().expand(fit.level + 1).unwrap();
        assert!(measure(&koch(), &next, &config).unwrap().overflows(400, 400));
    }

    #[test]
    fn fit_accepts_an_oversized_first_level() {
        let fit = fit(&koch(), 10, 10, &RenderConfig::default()).unwrap();
        assert_eq!(fit.level, 1);
        assert!(fit.bounds.overflows(10, 10));
    }

    #[test]
    fn fit_stops_at_the_level_cap() {
        let config = RenderConfig {
            max_level: 5,
            ..RenderConfig::default()
        };
        // A single segment never grows, so only the cap ends the search.
        let stick = LSystem::parse(0.0, "F:F").unwrap();
        let fit = fit(&stick, 400, 400, &config).unwrap();
        assert_eq!(fit.level, 4);
        assert_eq!(fit.pattern, "F");
    }

    #[test]
    fn fit_stops_on_runaway_expansion() {
        let config = RenderConfig {
            max_expansion_len: 100,
            ..RenderConfig::default()
        };
        // Doubles every level without ever drawing anything.  Level 5
        // visits 125 symbols, so level 4 is kept.
        let ls = LSystem::parse(90.0, ":X;X:XX+-").unwrap();
        let fit = fit(&ls, 400, 400, &config).unwrap();
        assert_eq!(fit.level, 4);
        assert_eq!(fit.pattern.len(), 30);
    }

    #[test]
    fn fit_stops_when_vanishing_symbols_multiply() {
        // The pattern stays empty at every level while the work doubles.
        let ls = LSystem::parse(90.0, ":X;X:XX").unwrap();
        let config = RenderConfig {
            max_expansion_len: 1000,
            ..RenderConfig::default()
        };
        let small = fit(&ls, 400, 400, &config).unwrap();
        assert_eq!(small.level, 8);
        assert_eq!(small.pattern, "");

        // One X at level n visits 2^(n+1) - 1 symbols.
        let full = fit(&ls, 400, 400, &RenderConfig::default()).unwrap();
        assert_eq!(full.level, 21);
    }

    #[test]
    fn fit_reports_a_first_level_over_budget() {
        let config = RenderConfig {
            max_expansion_len: 2,
            ..RenderConfig::default()
        };
        assert_eq!(
            fit(&koch(), 400, 400, &config),
            Err(FractalError::ExpansionBudgetExhausted(2))
        );
    }

    #[test]
    fn render_has_the_requested_shape() {
        let img = render(&koch(), 320, 200, &RenderConfig::default()).unwrap();
        assert_eq!(img.width(), 320);
        assert_eq!(img.height(), 200);
        assert!(img.lit() > 0);
        assert!(img.pixels().iter().all(|p| *p == 0 || *p == INK));
    }

    #[test]
    fn render_is_reproducible() {
        let bush = LSystem::parse(20.0, ":X;F:FF;X:F[+X]F[-X]+X").unwrap();
        let config = RenderConfig::default();
        assert_eq!(
            render(&bush, 200, 200, &config).unwrap(),
            render(&bush, 200, 200, &config).unwrap()
        );
    }

    #[test]
    fn render_surfaces_unknown_symbols() {
        let broken = LSystem::parse(60.0, "F:F-F++F-Z").unwrap();
        assert_eq!(
            render(&broken, 400, 400, &RenderConfig::default()),
            Err(FractalError::UnknownSymbol('Z'))
        );
    }

    #[test]
    fn render_surfaces_unbalanced_branches() {
        let ls = LSystem::parse(30.0, ":F]").unwrap();
        assert_eq!(
            render(&ls, 100, 100, &RenderConfig::default()),
            Err(FractalError::StackUnderflow)
        );
    }
}
