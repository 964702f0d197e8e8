// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Coloring schemes: pure functions from the end of an orbit to a
//! color.  Channels are computed as reals meant to land in [0, 255];
//! clamping and rounding to bytes happens once, when a pixel is
//! written.

use std::ops::{Add, Div};

use num::clamp;

use crate::complex::Complex;
use crate::escape::Orbit;
use crate::real::Real;

/// Red, green, blue and alpha, each nominally in [0, 255].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color(pub f64, pub f64, pub f64, pub f64);

impl Color {
    /// An opaque gray.
    pub fn gray(level: f64) -> Self {
        Color(level, level, level, 255.0)
    }

    /// Clamp each channel into [0, 255] and round to a byte.  NaN
    /// channels come out as zero.
    pub fn to_bytes(&self) -> [u8; 4] {
        let byte = |channel: f64| -> u8 {
            if channel.is_nan() {
                0
            } else {
                clamp(channel, 0.0, 255.0).round() as u8
            }
        };
        [byte(self.0), byte(self.1), byte(self.2), byte(self.3)]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color(
            self.0 + other.0,
            self.1 + other.1,
            self.2 + other.2,
            self.3 + other.3,
        )
    }
}

impl Div<f64> for Color {
    type Output = Color;

    fn div(self, by: f64) -> Color {
        Color(self.0 / by, self.1 / by, self.2 / by, self.3 / by)
    }
}

/// A coloring scheme.
pub type ColorFn<T> = fn(&Orbit<T>) -> Color;

/// Every scheme the table below implements.
pub const SCHEMES: &[&str] = &[
    "simple-grayscale",
    "z-grayscale",
    "smooth-grayscale",
    "smooth-color",
    "smooth-color2",
    "wacky-grayscale",
    "wacky-color",
];

/// Find the implementation of a scheme by name, ignoring ASCII case.
pub fn lookup<T: Real>(name: &str) -> Option<ColorFn<T>> {
    let name = name.to_ascii_lowercase();
    let scheme: ColorFn<T> = match name.as_str() {
        "simple-grayscale" => simple_grayscale,
        "z-grayscale" => z_grayscale,
        "smooth-grayscale" => smooth_grayscale,
        "smooth-color" => smooth_color,
        "smooth-color2" => smooth_color2,
        "wacky-grayscale" => wacky_grayscale,
        "wacky-color" => wacky_color,
        _ => return None,
    };
    Some(scheme)
}

/// Brightness proportional to how long the point took to escape.
/// The cap is validated to be at least one before any render starts.
pub fn simple_grayscale<T: Real>(orbit: &Orbit<'_, T>) -> Color {
    Color::gray(255.0 * orbit.iterations as f64 / orbit.cap as f64)
}

/// Brightness from where the orbit ended, ignoring how long it took.
/// An orbit that left the finite range is black.
pub fn z_grayscale<T: Real>(orbit: &Orbit<'_, T>) -> Color {
    let magnitude = orbit.z.abs().to_f64();
    if !magnitude.is_finite() {
        return Color::gray(0.0);
    }
    Color::gray(255.0 * (magnitude % 2.0) / 2.0)
}

/// Continuous iteration count.  Two more steps are taken past the
/// escape so that `log log |z|` is well behaved, then the integer
/// count is corrected by how far past the bailout `z` landed.
/// Bounded orbits get no correction.
fn fractional_index<T: Real>(orbit: &Orbit<'_, T>) -> f64 {
    let steps = (orbit.iterations + 2) as f64;
    if orbit.bounded() {
        return steps;
    }
    let mut z: Complex<T> = orbit.next(&orbit.z);
    z = orbit.next(&z);
    let correction = z.abs().ln().ln().to_f64() / std::f64::consts::LN_2;
    let index = steps - correction;
    if index.is_finite() {
        index
    } else {
        steps
    }
}

/// Split a fractional index into its bucket and its position inside
/// the bucket.
fn bucket(index: f64, buckets: i64) -> (i64, f64) {
    ((index.floor() as i64).rem_euclid(buckets), index.rem_euclid(1.0))
}

/// A sawtooth of grays that rises on even buckets and falls on odd
/// ones, so neighbouring bands meet without a seam.
pub fn smooth_grayscale<T: Real>(orbit: &Orbit<'_, T>) -> Color {
    let (band, nu) = bucket(fractional_index(orbit), 2);
    if band == 0 {
        Color::gray(255.0 * nu)
    } else {
        Color::gray(255.0 - 255.0 * nu)
    }
}

/// Pastel rotation through three blends.
pub fn smooth_color<T: Real>(orbit: &Orbit<'_, T>) -> Color {
    let (band, nu) = bucket(fractional_index(orbit), 3);
    match band {
        0 => Color(255.0 * nu, 255.0 * (1.0 - nu), 255.0, 255.0),
        1 => Color(255.0, 255.0 * nu, 255.0 * (1.0 - nu), 255.0),
        _ => Color(255.0 * (1.0 - nu), 255.0, 255.0 * nu, 255.0),
    }
}

/// Saturated rotation through red, green and blue.
pub fn smooth_color2<T: Real>(orbit: &Orbit<'_, T>) -> Color {
    let (band, nu) = bucket(fractional_index(orbit), 3);
    match band {
        0 => Color(255.0 * (1.0 - nu), 255.0 * nu, 0.0, 255.0),
        1 => Color(0.0, 255.0 * (1.0 - nu), 255.0 * nu, 255.0),
        _ => Color(255.0 * nu, 0.0, 255.0 * (1.0 - nu), 255.0),
    }
}

/// Black and white on iteration parity.
pub fn wacky_grayscale<T: Real>(orbit: &Orbit<'_, T>) -> Color {
    if orbit.iterations % 2 == 0 {
        Color::gray(0.0)
    } else {
        Color::gray(255.0)
    }
}

const PALETTE: [Color; 6] = [
    Color(230.0, 25.0, 75.0, 255.0),
    Color(245.0, 130.0, 48.0, 255.0),
    Color(255.0, 225.0, 25.0, 255.0),
    Color(60.0, 180.0, 75.0, 255.0),
    Color(0.0, 130.0, 200.0, 255.0),
    Color(145.0, 30.0, 180.0, 255.0),
];

/// Hard bands cycling through a fixed palette.
pub fn wacky_color<T: Real>(orbit: &Orbit<'_, T>) -> Color {
    PALETTE[orbit.iterations % PALETTE.len()]
}
