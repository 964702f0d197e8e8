// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between the pixel grid of an image, with its origin at the top
//! left, and the complex plane, seen through a center point and a
//! zoom factor.

use crate::complex::Complex;
use crate::real::Real;

/// Maps pixel positions to points on the complex plane.  The shorter
/// side of the image always spans `2 / zoom` units, so the zoom is
/// the same along both axes whatever the aspect ratio.
///
/// Every field is held at the render precision, so at deep zoom the
/// scale and the center keep all of their bits.
#[derive(Debug)]
pub struct PlaneMapper<T> {
    // Half the image size, in pixels; pixel positions are shifted by
    // these so that the image center lands on the plane center.
    half_width: T,
    half_height: T,
    // Plane units per pixel: (2 / min(width, height)) / zoom.
    scale: T,
    center: Complex<T>,
}

impl<T: Real> PlaneMapper<T> {
    /// Constructor.  Takes the image size, the point on the plane that
    /// should sit at the middle of the image, the zoom factor, and the
    /// precision in bits that all mapping arithmetic runs at.
    pub fn new(width: u32, height: u32, center: (f64, f64), zoom: f64, prec: u32) -> Self {
        let scaler = std::cmp::min(width, height);
        let two = T::with_prec(prec, 2.0);
        let scale = two
            .div(&T::with_prec(prec, f64::from(scaler)))
            .div(&T::with_prec(prec, zoom));
        PlaneMapper {
            half_width: T::with_prec(prec, f64::from(width)).div(&two),
            half_height: T::with_prec(prec, f64::from(height)).div(&two),
            scale,
            center: Complex::with_prec(prec, center.0, center.1),
        }
    }

    /// Plane units covered by one pixel.
    pub fn scale(&self) -> &T {
        &self.scale
    }

    /// Given a (possibly fractional) pixel position, return the
    /// point on the complex plane it corresponds to.
    pub fn pixel_to_point(&self, x: &T, y: &T) -> Complex<T> {
        Complex::new(
            x.sub(&self.half_width).mul(&self.scale).add(&self.center.re),
            y.sub(&self.half_height).mul(&self.scale).add(&self.center.im),
        )
    }
}
