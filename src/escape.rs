// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time loop.  A recurrence is iterated from its seed until
//! the bailout test fails or the iteration cap is reached, and the
//! terminal state is handed on, whole, to a coloring function.

use crate::complex::Complex;
use crate::real::Real;

/// When an orbit counts as escaped.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Bailout {
    /// Escaped once `|z|` exceeds the radius.
    Radius(f64),
    /// Escaped once `|z|` is no longer a finite `f64`.
    Finite,
}

impl Bailout {
    /// True while `z` is still inside the bailout region.
    pub fn holds<T: Real>(&self, z: &Complex<T>) -> bool {
        match *self {
            Bailout::Radius(r) => z.norm_sqr().to_f64() <= r * r,
            Bailout::Finite => {
                // Per component, so that squaring cannot overflow first.
                let (re, im) = (z.re.to_f64(), z.im.to_f64());
                re.is_finite() && im.is_finite() && re.hypot(im) < std::f64::MAX
            }
        }
    }
}

/// One fractal's recurrence.  Implementations are small structs
/// holding their constants; the escape loop is generic over them, so
/// each fractal gets its own compiled loop.
pub trait Recurrence<T: Real>: Send + Sync {
    /// Turn a point on the plane into the starting `z` and the `c`
    /// that stays fixed for the whole orbit.
    fn seed(&self, point: Complex<T>) -> (Complex<T>, Complex<T>);

    /// One step of the recurrence.
    fn step(&self, z: &Complex<T>, c: &Complex<T>) -> Complex<T>;

    /// The escape test for this recurrence.
    fn bailout(&self) -> Bailout;
}

/// Where an orbit ended up.  This is everything a coloring function
/// is allowed to know.
pub struct Orbit<'a, T: Real> {
    /// Steps taken before escaping, or `cap` if it never did.
    pub iterations: usize,
    /// The iteration cap the orbit ran under.
    pub cap: usize,
    /// The last value of `z`.
    pub z: Complex<T>,
    /// The fixed parameter of the orbit.
    pub c: Complex<T>,
    /// The recurrence that produced the orbit, for coloring schemes
    /// that take extra steps past the end.
    pub recurrence: &'a dyn Recurrence<T>,
}

impl<'a, T: Real> Orbit<'a, T> {
    /// True if the orbit ran to the cap without escaping.
    pub fn bounded(&self) -> bool {
        self.iterations >= self.cap
    }

    /// One step past the terminal state, using the orbit's own
    /// recurrence.
    pub fn next(&self, z: &Complex<T>) -> Complex<T> {
        self.recurrence.step(z, &self.c)
    }
}

/// Iterate `recurrence` from `point` for at most `cap` steps.
pub fn escape<T, R>(recurrence: &R, point: Complex<T>, cap: usize) -> Orbit<'_, T>
where
    T: Real,
    R: Recurrence<T>,
{
    let bailout = recurrence.bailout();
    let (mut z, c) = recurrence.seed(point);
    let mut iterations = 0;
    while iterations < cap && bailout.holds(&z) {
        z = recurrence.step(&z, &c);
        iterations += 1;
    }
    Orbit {
        iterations,
        cap,
        z,
        c,
        recurrence,
    }
}
