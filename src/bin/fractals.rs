// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate fractals;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::{format_err, Error};
use fractals::{render_catalog, render_with, Catalog, RasterImage, RenderConfig};
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| format_err!("missing value for --{}", name))?;
    T::from_str(raw).map_err(|_| format_err!("could not parse --{} '{}'", name, raw))
}

const INDEX: &str = "index";
const LIST: &str = "list";
const ALL: &str = "all";
const SIZE: &str = "size";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const SCALE: &str = "scale";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("fractals")
        .version("0.1.0")
        .about("L-system and escape-time fractal generator")
        .arg(
            Arg::with_name(INDEX)
                .index(1)
                .required_unless_one(&[LIST, ALL])
                .validator(|s| {
                    usize::from_str(&s)
                        .map(|_| ())
                        .map_err(|_| "Could not parse fractal index".to_string())
                })
                .help("Catalog index of the fractal to render"),
        )
        .arg(
            Arg::with_name(LIST)
                .long(LIST)
                .short("l")
                .conflicts_with_all(&[INDEX, ALL])
                .help("List the catalog and exit"),
        )
        .arg(
            Arg::with_name(ALL)
                .long(ALL)
                .short("a")
                .conflicts_with(INDEX)
                .help("Render every fractal in the catalog"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("400x400")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of the rendered image"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of fractals rendered at once with --all"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("511")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 100000",
                    )
                })
                .help("Escape-time iteration limit"),
        )
        .arg(
            Arg::with_name(SCALE)
                .required(false)
                .long(SCALE)
                .short("c")
                .takes_value(true)
                .default_value("4")
                .validator(|s| {
                    validate_range(
                        &s,
                        0.5,
                        100.0,
                        "Could not parse turtle step",
                        "Turtle step must be between 0.5 and 100",
                    )
                })
                .help("Length of one turtle step, in pixels"),
        )
        .get_matches()
}

fn report(name: &str, image: &RasterImage) {
    println!(
        "{}: {}x{}, {} pixels lit",
        name,
        image.width(),
        image.height(),
        image.lit()
    );
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let catalog = Catalog::builtin()?;

    if matches.is_present(LIST) {
        for (index, name) in catalog.names().iter().enumerate() {
            println!("{:>2}  {}", index, name);
        }
        return Ok(());
    }

    let size = matches.value_of(SIZE).unwrap_or("400x400");
    let (width, height) =
        parse_pair::<usize>(size, 'x').ok_or_else(|| format_err!("Error parsing image dimensions"))?;
    let config = RenderConfig {
        max_iterations: value(matches, ITERATIONS)?,
        turtle_scale: value(matches, SCALE)?,
        ..RenderConfig::default()
    };

    if matches.is_present(ALL) {
        let threads: usize = value(matches, THREADS)?;
        let results = render_catalog(catalog, width, height, &config, threads)?;
        let mut failures = 0;
        for (descriptor, result) in catalog.iter().zip(results.iter()) {
            match result {
                Ok(image) => report(&descriptor.name, image),
                Err(e) => {
                    eprintln!("{}: {}", descriptor.name, e);
                    failures += 1;
                }
            }
        }
        if failures > 0 {
            return Err(format_err!("{} of {} fractals failed", failures, catalog.len()));
        }
        return Ok(());
    }

    let index: usize = value(matches, INDEX)?;
    let descriptor = catalog.describe(index)?;
    let image = render_with(descriptor, width, height, &config)?;
    report(&descriptor.name, &image);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
