// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Arbitrary precision backend on top of MPFR, by way of `rug`.
//!
//! Each result is built with `Float::with_val` at the receiver's
//! precision from one of rug's incomplete-computation values, so a
//! render started at N bits runs every intermediate at N bits.

use rug::float::Constant;
use rug::ops::Pow;
use rug::Float;

use crate::real::Real;

/// The range of precisions MPFR accepts, in bits.
pub fn precision_range() -> (u32, u32) {
    (rug::float::prec_min(), rug::float::prec_max())
}

impl Real for Float {
    fn with_prec(prec: u32, value: f64) -> Self {
        Float::with_val(prec, value)
    }

    fn pi(prec: u32) -> Self {
        Float::with_val(prec, Constant::Pi)
    }

    fn precision(&self) -> u32 {
        Float::prec(self)
    }

    fn to_f64(&self) -> f64 {
        Float::to_f64(self)
    }

    fn add(&self, other: &Self) -> Self {
        Float::with_val(Float::prec(self), self + other)
    }

    fn sub(&self, other: &Self) -> Self {
        Float::with_val(Float::prec(self), self - other)
    }

    fn mul(&self, other: &Self) -> Self {
        Float::with_val(Float::prec(self), self * other)
    }

    fn div(&self, other: &Self) -> Self {
        Float::with_val(Float::prec(self), self / other)
    }

    fn neg(&self) -> Self {
        Float::with_val(Float::prec(self), -self)
    }

    fn abs(&self) -> Self {
        Float::with_val(Float::prec(self), self.abs_ref())
    }

    fn sqrt(&self) -> Self {
        Float::with_val(Float::prec(self), self.sqrt_ref())
    }

    fn sin(&self) -> Self {
        Float::with_val(Float::prec(self), self.sin_ref())
    }

    fn cos(&self) -> Self {
        Float::with_val(Float::prec(self), self.cos_ref())
    }

    fn sinh(&self) -> Self {
        Float::with_val(Float::prec(self), self.sinh_ref())
    }

    fn cosh(&self) -> Self {
        Float::with_val(Float::prec(self), self.cosh_ref())
    }

    fn exp(&self) -> Self {
        Float::with_val(Float::prec(self), self.exp_ref())
    }

    fn ln(&self) -> Self {
        Float::with_val(Float::prec(self), self.ln_ref())
    }

    fn powf(&self, n: &Self) -> Self {
        Float::with_val(Float::prec(self), Pow::pow(self, n))
    }

    fn atan2(&self, x: &Self) -> Self {
        Float::with_val(Float::prec(self), self.atan2_ref(x))
    }

    fn is_zero(&self) -> bool {
        Float::is_zero(self)
    }

    fn is_finite(&self) -> bool {
        Float::is_finite(self)
    }
}
