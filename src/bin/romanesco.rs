// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use failure::format_err;
use log::info;
use std::fmt::Display;
use std::str::FromStr;

use romanesco::{fractals, Config};

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

fn validate_range<T: FromStr + PartialOrd + Display>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(format!("must be between {} and {}", low, high))
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_float(s: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f.is_finite() => Ok(()),
        _ => Err(format!("{:?} is not a finite number", s)),
    }
}

const FRACTAL: &str = "fractal";
const CONSTANT: &str = "constant";
const ITERATIONS: &str = "iterations";
const PRECISION: &str = "precision";
const SCHEME: &str = "scheme";
const XCENTER: &str = "x";
const YCENTER: &str = "y";
const ZOOM: &str = "zoom";
const SIZE: &str = "size";
const SAMPLES: &str = "samples";
const THREADS: &str = "threads";
const OUTPUT: &str = "output";
const LIST: &str = "list";
const DESCRIBE: &str = "describe";

fn args<'a>() -> ArgMatches<'a> {
    App::new("romanesco")
        .version("0.1.0")
        .about("Escape-time fractal renderer")
        .arg(
            Arg::with_name(FRACTAL)
                .long(FRACTAL)
                .short("f")
                .takes_value(true)
                .required_unless_one(&[LIST, DESCRIBE])
                .help("Fractal to render (see --list)"),
        )
        .arg(
            Arg::with_name(CONSTANT)
                .long(CONSTANT)
                .short("c")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .allow_hyphen_values(true)
                .validator(|s| validate_float(&s))
                .help("A constant for the fractal; repeat for each one, in order"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("128")
                .validator(|s| {
                    validate_range(&s, 1, 100_000_000, "Could not parse iteration count")
                })
                .help("Iteration cap"),
        )
        .arg(
            Arg::with_name(PRECISION)
                .long(PRECISION)
                .short("p")
                .takes_value(true)
                .validator(|s| validate_range(&s, 1, 1 << 24, "Could not parse precision"))
                .help("Bits of precision; omit to render with ordinary 64-bit floats"),
        )
        .arg(
            Arg::with_name(SCHEME)
                .long(SCHEME)
                .short("s")
                .takes_value(true)
                .default_value("default")
                .help("Coloring scheme"),
        )
        .arg(
            Arg::with_name(XCENTER)
                .short(XCENTER)
                .takes_value(true)
                .default_value("0")
                .allow_hyphen_values(true)
                .validator(|s| validate_float(&s))
                .help("Real part of the image center"),
        )
        .arg(
            Arg::with_name(YCENTER)
                .short(YCENTER)
                .takes_value(true)
                .default_value("0")
                .allow_hyphen_values(true)
                .validator(|s| validate_float(&s))
                .help("Imaginary part of the image center"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1")
                .validator(|s| match f64::from_str(&s) {
                    Ok(z) if z.is_finite() && z > 0.0 => Ok(()),
                    _ => Err("Zoom must be a positive number".to_string()),
                })
                .help("Zoom factor"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .takes_value(true)
                .default_value("1000x1000")
                .validator(|s| validate_pair::<u32>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image, WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .long(SAMPLES)
                .takes_value(true)
                .default_value("1")
                .validator(|s| validate_range(&s, 1, 64, "Could not parse supersampling factor"))
                .help("Supersampling factor along each axis"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| validate_range(&s, 1, 4096, "Could not parse thread count"))
                .help("Number of worker threads [default: number of CPUs]"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("fractal.png")
                .help("Output file"),
        )
        .arg(
            Arg::with_name(LIST)
                .long(LIST)
                .help("List the available fractals"),
        )
        .arg(
            Arg::with_name(DESCRIBE)
                .long(DESCRIBE)
                .takes_value(true)
                .value_name("FRACTAL")
                .help("Describe one fractal, its constants and coloring schemes"),
        )
        .get_matches()
}

fn value<T>(matches: &ArgMatches, name: &str) -> Result<T, failure::Error>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = matches
        .value_of(name)
        .ok_or_else(|| format_err!("missing value for {}", name))?;
    T::from_str(raw).map_err(|e| format_err!("could not parse {} {:?}: {}", name, raw, e))
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    if matches.is_present(LIST) {
        println!("Fractals:");
        for fractal in fractals::all() {
            println!("\t{}", fractal.name);
        }
        return Ok(());
    }
    if let Some(name) = matches.value_of(DESCRIBE) {
        println!("{}", fractals::find(name)?);
        return Ok(());
    }

    let fractal = matches
        .value_of(FRACTAL)
        .ok_or_else(|| format_err!("no fractal named; try --list"))?;
    let scheme = matches.value_of(SCHEME).unwrap_or("default");
    let constants = match matches.values_of(CONSTANT) {
        Some(values) => values
            .map(f64::from_str)
            .collect::<Result<Vec<f64>, _>>()?,
        None => vec![],
    };
    let (width, height) = parse_pair::<u32>(&value::<String>(matches, SIZE)?, 'x')
        .ok_or_else(|| format_err!("could not parse image size"))?;
    let workers = match matches.value_of(THREADS) {
        Some(_) => value(matches, THREADS)?,
        None => num_cpus::get(),
    };
    let precision = match matches.value_of(PRECISION) {
        Some(_) => Some(value(matches, PRECISION)?),
        None => None,
    };
    // Image rows grow downwards; flip y so positive imaginary is up.
    let center = (
        value::<f64>(matches, XCENTER)?,
        -value::<f64>(matches, YCENTER)?,
    );

    let config = Config {
        width,
        height,
        workers,
        cap: value(matches, ITERATIONS)?,
        samples: value(matches, SAMPLES)?,
        center,
        zoom: value(matches, ZOOM)?,
        precision,
    };
    info!("{:?}", config);

    let image = romanesco::render(fractal, scheme, &constants, &config)?;
    let output = value::<String>(matches, OUTPUT)?;
    image.save(&output)?;
    info!("wrote {}", output);
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
