// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;
extern crate fractals;

use criterion::Criterion;
use fractals::{render, Catalog, FractalDescriptor, Viewport};

fn geometric(c: &mut Criterion) {
    let dragon = Catalog::builtin().unwrap().describe(4).unwrap().clone();
    c.bench_function("dragon curve 400x400", move |b| {
        b.iter(|| render(&dragon, 400, 400).unwrap())
    });
}

fn escape_time(c: &mut Criterion) {
    let mandelbrot = FractalDescriptor::mandelbrot("mandelbrot", Viewport::MANDELBROT);
    c.bench_function("mandelbrot 200x200", move |b| {
        b.iter(|| render(&mandelbrot, 200, 200).unwrap())
    });
    let newton = FractalDescriptor::newton("newton");
    c.bench_function("newton 200x200", move |b| {
        b.iter(|| render(&newton, 200, 200).unwrap())
    });
}

criterion_group!(benches, geometric, escape_time);
criterion_main!(benches);
