// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Complex numbers over any `Real` backend.  Values are immutable:
//! every operation borrows its operands and returns a new `Complex`.

use crate::errors::Error;
use crate::real::Real;

/// A point on the complex plane, treating the real part as the
/// x-component and the imaginary part as the y-component.
#[derive(Clone, Debug, PartialEq)]
pub struct Complex<T> {
    /// Real part.
    pub re: T,
    /// Imaginary part.
    pub im: T,
}

impl<T: Real> Complex<T> {
    /// Constructor.
    pub fn new(re: T, im: T) -> Self {
        Complex { re, im }
    }

    /// Build from two `f64`s at `prec` bits.
    pub fn with_prec(prec: u32, re: f64, im: f64) -> Self {
        Complex::new(T::with_prec(prec, re), T::with_prec(prec, im))
    }

    /// The origin, at `prec` bits.
    pub fn zero(prec: u32) -> Self {
        Complex::with_prec(prec, 0.0, 0.0)
    }

    /// Precision of the real part; both parts always agree.
    pub fn precision(&self) -> u32 {
        self.re.precision()
    }

    /// Sum.
    pub fn add(&self, other: &Self) -> Self {
        Complex::new(self.re.add(&other.re), self.im.add(&other.im))
    }

    /// Difference.
    pub fn sub(&self, other: &Self) -> Self {
        Complex::new(self.re.sub(&other.re), self.im.sub(&other.im))
    }

    /// Product.
    pub fn mul(&self, other: &Self) -> Self {
        Complex::new(
            self.re.mul(&other.re).sub(&self.im.mul(&other.im)),
            self.re.mul(&other.im).add(&self.im.mul(&other.re)),
        )
    }

    /// Complex division.  An exactly zero divisor is an error in
    /// every backend rather than an infinity in one and a NaN in
    /// another.
    pub fn div(&self, other: &Self) -> Result<Self, Error> {
        let denom = other.norm_sqr();
        if denom.is_zero() {
            return Err(Error::DivideByZero);
        }
        Ok(Complex::new(
            self.re
                .mul(&other.re)
                .add(&self.im.mul(&other.im))
                .div(&denom),
            self.im
                .mul(&other.re)
                .sub(&self.re.mul(&other.im))
                .div(&denom),
        ))
    }

    /// `self * self`, cheaper than `pow(2)`.
    pub fn square(&self) -> Self {
        let two = self.re.lit(2.0);
        Complex::new(
            self.re.mul(&self.re).sub(&self.im.mul(&self.im)),
            two.mul(&self.re).mul(&self.im),
        )
    }

    /// Multiply both parts by a real.
    pub fn scale(&self, k: &T) -> Self {
        Complex::new(self.re.mul(k), self.im.mul(k))
    }

    /// Squared magnitude.  Escape tests compare this against a squared
    /// radius and never need the square root.
    pub fn norm_sqr(&self) -> T {
        self.re.mul(&self.re).add(&self.im.mul(&self.im))
    }

    /// Magnitude.
    pub fn abs(&self) -> T {
        self.norm_sqr().sqrt()
    }

    /// `(|re|, |im|)`.
    pub fn abs_parts(&self) -> Self {
        Complex::new(self.re.abs(), self.im.abs())
    }

    /// Complex conjugate.
    pub fn conj(&self) -> Self {
        Complex::new(self.re.clone(), self.im.neg())
    }

    /// Real power, through the polar form.
    pub fn pow(&self, n: &T) -> Self {
        let half = n.div(&n.lit(2.0));
        let r_n = self.norm_sqr().powf(&half);
        let n_theta = n.mul(&self.im.atan2(&self.re));
        Complex::new(r_n.mul(&n_theta.cos()), r_n.mul(&n_theta.sin()))
    }

    /// Complex sine.
    pub fn sin(&self) -> Self {
        Complex::new(
            self.re.sin().mul(&self.im.cosh()),
            self.re.cos().mul(&self.im.sinh()),
        )
    }

    /// Complex cosine.
    pub fn cos(&self) -> Self {
        Complex::new(
            self.re.cos().mul(&self.im.cosh()),
            self.re.sin().mul(&self.im.sinh()).neg(),
        )
    }

    /// Complex exponential.
    pub fn exp(&self) -> Self {
        let scale = self.re.exp();
        Complex::new(scale.mul(&self.im.cos()), scale.mul(&self.im.sin()))
    }
}

impl From<num::Complex<f64>> for Complex<f64> {
    fn from(c: num::Complex<f64>) -> Self {
        Complex::new(c.re, c.im)
    }
}

impl From<Complex<f64>> for num::Complex<f64> {
    fn from(c: Complex<f64>) -> Self {
        num::Complex::new(c.re, c.im)
    }
}
