#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal renderer
//!
//! Every pixel of the image is mapped to a point on the complex plane,
//! and a fractal-specific recurrence is iterated from that point until
//! its magnitude passes a bailout radius or an iteration cap is
//! reached.  How long that took, and where the orbit ended up, is
//! turned into a color.
//!
//! The pieces, leaves first:
//!
//! * `real` and `bigfloat`: the scalar backends, `f64` and MPFR floats
//!   of any precision.
//! * `complex`: complex arithmetic over either backend.
//! * `escape`: the iteration loop, shared by every recurrence.
//! * `colors`: coloring schemes.
//! * `fractals`: the registry that binds a recurrence, its constants
//!   and a coloring scheme into one point function.
//! * `planes`: pixel to plane coordinate mapping.
//! * `generator`: the threaded driver that fills an image.
//!
//! `render` strings them together.

use image::RgbaImage;
use log::info;

#[cfg(feature = "bigfloat")]
pub mod bigfloat;
pub mod colors;
pub mod complex;
pub mod errors;
pub mod escape;
pub mod fractals;
pub mod generator;
pub mod planes;
pub mod real;

pub use colors::Color;
pub use complex::Complex;
pub use errors::Error;
pub use fractals::{Fractal, PointFn};
pub use generator::{Config, Generator};
pub use planes::PlaneMapper;
pub use real::Real;

/// Render `fractal` with coloring `scheme` and `constants` under
/// `config`.  Everything is validated before any worker starts.  With
/// `config.precision` unset the render runs on `f64`; with it set, on
/// MPFR floats of that many bits.
pub fn render(
    fractal: &str,
    scheme: &str,
    constants: &[f64],
    config: &Config,
) -> Result<RgbaImage, Error> {
    config.validate()?;
    match config.precision {
        None => render_with::<f64>(fractal, scheme, constants, config),
        #[cfg(feature = "bigfloat")]
        Some(_) => render_with::<rug::Float>(fractal, scheme, constants, config),
        #[cfg(not(feature = "bigfloat"))]
        Some(prec) => Err(Error::PrecisionUnavailable(prec)),
    }
}

fn render_with<T: Real>(
    fractal: &str,
    scheme: &str,
    constants: &[f64],
    config: &Config,
) -> Result<RgbaImage, Error> {
    let resolved = fractals::resolve::<T>(fractal, scheme, constants, config.bits())?;
    info!(
        "{} colored with {} at {} bits",
        resolved.fractal.name,
        resolved.scheme,
        config.bits()
    );
    Generator::new(*config, resolved.point)?.generate()
}
