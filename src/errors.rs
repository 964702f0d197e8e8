// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by every stage of a render.  Resolution
//! and configuration errors are raised before any worker starts;
//! `WorkerPanicked` is the only one that can come out of a running
//! render.

use failure::Fail;

/// Everything that can go wrong between naming a fractal and holding
/// a finished image.
#[derive(Debug, Fail)]
pub enum Error {
    /// No registered fractal has this identifier.
    #[fail(display = "unknown fractal {:?}", _0)]
    UnknownFractal(String),

    /// The constants list does not match what the fractal needs.
    #[fail(
        display = "{} takes {} constants, {} were supplied",
        fractal, expected, found
    )]
    WrongConstantCount {
        /// The fractal that was asked for.
        fractal: String,
        /// How many constants it takes.
        expected: usize,
        /// How many were supplied.
        found: usize,
    },

    /// The coloring scheme is not one the fractal allows.
    #[fail(display = "{} has no coloring scheme {:?}", fractal, scheme)]
    UnknownColorScheme {
        /// The fractal that was asked for.
        fractal: String,
        /// The scheme that was asked for.
        scheme: String,
    },

    /// A fractal names a scheme that the coloring table does not
    /// implement.  This is a defect in the registry, never user error.
    #[fail(display = "coloring scheme {:?} has no implementation", _0)]
    ColorSchemeNotRegistered(String),

    /// Complex division by an exact zero.
    #[fail(display = "complex division by zero")]
    DivideByZero,

    /// The render configuration cannot produce an image.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// Arbitrary precision was requested but not compiled in.
    #[fail(
        display = "{}-bit precision requested but arbitrary precision support is not built",
        _0
    )]
    PrecisionUnavailable(u32),

    /// A worker thread died before handing back its share of pixels.
    #[fail(display = "render worker {} panicked", _0)]
    WorkerPanicked(usize),
}
