#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fractal generator
//!
//! Two families of fractal live here.  Geometric fractals are
//! L-systems: a small grammar is rewritten a number of times into a
//! long string of turtle commands, and a turtle walking those commands
//! traces a self-similar curve such as the Koch snowflake, the dragon
//! curve or a branching plant.  The grammar is expanded just deep
//! enough for the drawing to fill the canvas, and no deeper.
//!
//! Escape-time fractals are drawn on the complex plane.  Each pixel is
//! a point `c`, and a formula is iterated from it: for the Mandelbrot
//! set until the orbit flies off past radius 2, for the Newton fractal
//! until Newton's method settles on one of the four roots of z⁴ = 1.
//! How long that takes becomes the pixel's value.
//!
//! The `Catalog` lists the fractals by name; `render` turns any one of
//! them into a `RasterImage`.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate log;
extern crate num;

pub mod catalog;
pub mod complex;
pub mod config;
pub mod error;
pub mod escape;
pub mod geometric;
pub mod lsystem;
pub mod planes;
pub mod raster;
pub mod render;
pub mod turtle;

pub use catalog::{Catalog, FractalDescriptor, Variant};
pub use config::RenderConfig;
pub use error::FractalError;
pub use lsystem::{LSystem, Rule};
pub use planes::Viewport;
pub use raster::RasterImage;
pub use render::{list_fractal_names, render, render_catalog, render_fractal, render_with};
