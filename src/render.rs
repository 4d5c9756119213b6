// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning descriptors into pixels.  Every render is a pure function of
//! a descriptor, a canvas size and a configuration: nothing is cached
//! and nothing is shared between calls, so independent renders may run
//! side by side, as `render_catalog` does.

use std::iter::Enumerate;
use std::slice::Iter;
use std::sync::{Arc, Mutex};

use crossbeam::thread::ScopedJoinHandle;
use log::{debug, info};

use crate::catalog::{Catalog, FractalDescriptor, Variant};
use crate::config::RenderConfig;
use crate::error::FractalError;
use crate::escape::{self, Formula};
use crate::geometric;
use crate::raster::RasterImage;

type WorkQueue<'a> = Arc<Mutex<Enumerate<Iter<'a, FractalDescriptor>>>>;

/// Outcome of one entry of a batch render.
pub type Rendered = Result<RasterImage, FractalError>;

/// Render `descriptor` onto a `width` x `height` canvas with the default
/// configuration.
pub fn render(
    descriptor: &FractalDescriptor,
    width: usize,
    height: usize,
) -> Result<RasterImage, FractalError> {
    render_with(descriptor, width, height, &RenderConfig::default())
}

/// Render `descriptor` onto a `width` x `height` canvas.
pub fn render_with(
    descriptor: &FractalDescriptor,
    width: usize,
    height: usize,
    config: &RenderConfig,
) -> Result<RasterImage, FractalError> {
    debug!("rendering {} at {}x{}", descriptor.name, width, height);
    match descriptor.variant {
        Variant::Geometric(ref lsystem) => geometric::render(lsystem, width, height, config),
        Variant::Mandelbrot(viewport) => escape::render(
            Formula::Mandelbrot,
            viewport,
            width,
            height,
            config.max_iterations,
        ),
        Variant::Newton(viewport) => escape::render(
            Formula::Newton,
            viewport,
            width,
            height,
            config.max_iterations,
        ),
    }
}

/// Render every entry of `catalog` using `threads` workers, each
/// pulling the next unrendered entry off a shared queue.  Results come
/// back in catalog order; one entry failing does not stop the others.
pub fn render_catalog(
    catalog: &Catalog,
    width: usize,
    height: usize,
    config: &RenderConfig,
    threads: usize,
) -> Result<Vec<Rendered>, FractalError> {
    let queue: WorkQueue = Arc::new(Mutex::new(catalog.iter().enumerate()));
    let mut finished: Vec<(usize, Rendered)> = vec![];

    crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<Vec<(usize, Rendered)>>> = (0..threads.max(1))
            .map(|_| {
                let queue = queue.clone();
                spawner.spawn(move |_| {
                    let mut done = vec![];
                    loop {
                        let next = match queue.lock() {
                            Ok(mut entries) => entries.next(),
                            Err(_) => None,
                        };
                        match next {
                            Some((index, descriptor)) => {
                                let result = render_with(descriptor, width, height, config);
                                info!("#{} {}: {}", index, descriptor.name, summary(&result));
                                done.push((index, result));
                            }
                            None => {
                                break;
                            }
                        }
                    }
                    done
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(done) => finished.extend(done),
                Err(_) => return Err(FractalError::WorkerPanicked),
            }
        }
        Ok(())
    })
    .map_err(|_| FractalError::WorkerPanicked)??;

    finished.sort_by_key(|&(index, _)| index);
    Ok(finished.into_iter().map(|(_, result)| result).collect())
}

fn summary(result: &Rendered) -> String {
    match result {
        Ok(image) => format!("{}x{}, {} pixels lit", image.width(), image.height(), image.lit()),
        Err(e) => format!("failed: {}", e),
    }
}

/// Names of the built-in fractals, in catalog order.
pub fn list_fractal_names() -> Result<Vec<&'static str>, FractalError> {
    Ok(Catalog::builtin()?.names())
}

/// Render the built-in fractal at `index`.
pub fn render_fractal(
    index: usize,
    width: usize,
    height: usize,
) -> Result<RasterImage, FractalError> {
    render(Catalog::builtin()?.describe(index)?, width, height)
}
