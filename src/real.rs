// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The scalar contract every numeric backend satisfies.  The complex
//! layer, the recurrences, the plane mapper and the generator are all
//! written against `Real`, so swapping `f64` for an arbitrary
//! precision float swaps the whole pipeline at once.
//!
//! Operations take their operands by reference and hand back a fresh
//! value.  A backend that carries a precision creates every result at
//! the precision of the receiver; nothing in this trait widens or
//! narrows a value behind the caller's back.

use std::fmt::Debug;

/// A real number type the escape-time engine can compute with.
pub trait Real: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Build a value from an `f64` at `prec` bits.  Backends with a
    /// fixed width ignore `prec`.
    fn with_prec(prec: u32, value: f64) -> Self;

    /// Pi at `prec` bits.
    fn pi(prec: u32) -> Self;

    /// The precision, in bits, of this value's mantissa.
    fn precision(&self) -> u32;

    /// Nearest `f64`.  Used only at the color boundary and in tests.
    fn to_f64(&self) -> f64;

    /// A literal at the same precision as `self`.
    fn lit(&self, value: f64) -> Self {
        Self::with_prec(self.precision(), value)
    }

    /// Sum.
    fn add(&self, other: &Self) -> Self;
    /// Difference.
    fn sub(&self, other: &Self) -> Self;
    /// Product.
    fn mul(&self, other: &Self) -> Self;
    /// Plain float division; dividing by zero follows the backend's
    /// infinity rules.  The complex layer checks for zero itself.
    fn div(&self, other: &Self) -> Self;
    /// Negation.
    fn neg(&self) -> Self;
    /// Absolute value.
    fn abs(&self) -> Self;
    /// Square root.
    fn sqrt(&self) -> Self;
    /// Sine, in radians.
    fn sin(&self) -> Self;
    /// Cosine, in radians.
    fn cos(&self) -> Self;
    /// Hyperbolic sine.
    fn sinh(&self) -> Self;
    /// Hyperbolic cosine.
    fn cosh(&self) -> Self;
    /// `e` raised to `self`.
    fn exp(&self) -> Self;
    /// Natural logarithm.
    fn ln(&self) -> Self;
    /// `self` raised to a real power.
    fn powf(&self, n: &Self) -> Self;
    /// Four-quadrant arctangent of `self / x`.
    fn atan2(&self, x: &Self) -> Self;
    /// True for positive or negative zero.
    fn is_zero(&self) -> bool;
    /// True unless infinite or NaN.
    fn is_finite(&self) -> bool;
}

impl Real for f64 {
    fn with_prec(_prec: u32, value: f64) -> Self {
        value
    }

    fn pi(_prec: u32) -> Self {
        std::f64::consts::PI
    }

    fn precision(&self) -> u32 {
        f64::MANTISSA_DIGITS
    }

    fn to_f64(&self) -> f64 {
        *self
    }

    fn add(&self, other: &Self) -> Self {
        *self + *other
    }

    fn sub(&self, other: &Self) -> Self {
        *self - *other
    }

    fn mul(&self, other: &Self) -> Self {
        *self * *other
    }

    fn div(&self, other: &Self) -> Self {
        *self / *other
    }

    fn neg(&self) -> Self {
        -*self
    }

    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    fn sin(&self) -> Self {
        f64::sin(*self)
    }

    fn cos(&self) -> Self {
        f64::cos(*self)
    }

    fn sinh(&self) -> Self {
        f64::sinh(*self)
    }

    fn cosh(&self) -> Self {
        f64::cosh(*self)
    }

    fn exp(&self) -> Self {
        f64::exp(*self)
    }

    fn ln(&self) -> Self {
        f64::ln(*self)
    }

    fn powf(&self, n: &Self) -> Self {
        f64::powf(*self, *n)
    }

    fn atan2(&self, x: &Self) -> Self {
        f64::atan2(*self, *x)
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}
