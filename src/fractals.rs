// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fractal registry.  Each entry describes one recurrence: its
//! name, how many constants it needs, and which coloring schemes make
//! sense for it.  Resolving a name, a scheme and a list of constants
//! validates all three and binds them into a single point function
//! that the generator can call for every sample.

use std::fmt;

use log::debug;

use crate::colors::{self, ColorFn};
use crate::complex::Complex;
use crate::errors::Error;
use crate::escape::{escape, Bailout, Recurrence};
use crate::real::Real;

/// The fully bound mapping from a point on the plane, given as its x
/// and y coordinates, plus an iteration cap, to a color.
pub type PointFn<T> = Box<dyn Fn(T, T, usize) -> colors::Color + Send + Sync>;

/// Which recurrence a descriptor runs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Kind {
    /// `z <- z^2 + c`, `c` the point.
    Mandelbrot,
    /// `z <- z^2 + c`, `z` starts at the point, `c` fixed.
    Julia,
    /// `z <- (|Re z| + i|Im z|)^2 + c`.
    BurningShip,
    /// `z <- conj(z)^2 + c`.
    Tricorn,
    /// `z <- z^n + c`, `c` the point.
    Multibrot,
    /// `z <- z^n + c`, `z` starts at the point, `c` fixed.
    Multijulia,
    /// The complex extension of the Collatz map.
    Collatz,
}

/// A registered fractal.
#[derive(Debug)]
pub struct Fractal {
    /// Unique identifier, lower case.
    pub name: &'static str,
    /// Human readable description, possibly several lines.
    pub description: &'static str,
    /// How many constants `resolve` must be given.
    pub constants: usize,
    /// Coloring schemes that make sense for this fractal.
    pub schemes: &'static [&'static str],
    /// Scheme used for an empty or `"default"` request.
    pub default_scheme: &'static str,
    /// The recurrence itself.
    pub kind: Kind,
}

static FRACTALS: &[Fractal] = &[
    Fractal {
        name: "mandelbrot",
        description: "Classic Mandelbrot set.",
        constants: 0,
        schemes: colors::SCHEMES,
        default_scheme: "simple-grayscale",
        kind: Kind::Mandelbrot,
    },
    Fractal {
        name: "julia",
        description: "Classic Julia set.\n\
                      The two constants are the real and imaginary parts of C.",
        constants: 2,
        schemes: colors::SCHEMES,
        default_scheme: "simple-grayscale",
        kind: Kind::Julia,
    },
    Fractal {
        name: "burning-ship",
        description: "Burning ship: the Mandelbrot recurrence on absolute values.",
        constants: 0,
        schemes: &["simple-grayscale", "wacky-grayscale"],
        default_scheme: "simple-grayscale",
        kind: Kind::BurningShip,
    },
    Fractal {
        name: "tricorn",
        description: "Tricorn (Mandelbar): the Mandelbrot recurrence on the conjugate.",
        constants: 0,
        schemes: colors::SCHEMES,
        default_scheme: "simple-grayscale",
        kind: Kind::Tricorn,
    },
    Fractal {
        name: "multibrot",
        description: "Mandelbrot set with an arbitrary real exponent.\n\
                      The constant is the exponent.",
        constants: 1,
        schemes: colors::SCHEMES,
        default_scheme: "simple-grayscale",
        kind: Kind::Multibrot,
    },
    Fractal {
        name: "multijulia",
        description: "Julia set with an arbitrary real exponent.\n\
                      The constants are the real and imaginary parts of C, then the exponent.",
        constants: 3,
        schemes: colors::SCHEMES,
        default_scheme: "simple-grayscale",
        kind: Kind::Multijulia,
    },
    Fractal {
        name: "collatz",
        description: "The Collatz map extended to the complex plane.",
        constants: 0,
        schemes: &["simple-grayscale", "z-grayscale", "wacky-grayscale", "wacky-color"],
        default_scheme: "wacky-color",
        kind: Kind::Collatz,
    },
];

impl Fractal {
    /// Resolve a scheme request against this fractal.  An empty name or
    /// `"default"` means the fractal's default scheme.
    pub fn scheme(&self, requested: &str) -> Result<&'static str, Error> {
        if requested.is_empty() || requested.eq_ignore_ascii_case("default") {
            return Ok(self.default_scheme);
        }
        self.schemes
            .iter()
            .find(|scheme| scheme.eq_ignore_ascii_case(requested))
            .cloned()
            .ok_or_else(|| Error::UnknownColorScheme {
                fractal: self.name.to_string(),
                scheme: requested.to_string(),
            })
    }
}

impl fmt::Display for Fractal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f, "Constants: {}", self.constants)?;
        write!(
            f,
            "Color schemes: {} (default {})",
            self.schemes.join(", "),
            self.default_scheme
        )
    }
}

/// Every registered fractal, in listing order.
pub fn all() -> &'static [Fractal] {
    FRACTALS
}

/// Look a fractal up by name, ignoring ASCII case.
pub fn find(name: &str) -> Result<&'static Fractal, Error> {
    FRACTALS
        .iter()
        .find(|fractal| fractal.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownFractal(name.to_string()))
}

/// A successful resolution.
pub struct Resolved<T> {
    /// The descriptor that matched.
    pub fractal: &'static Fractal,
    /// The coloring scheme that was chosen.
    pub scheme: &'static str,
    /// The bound point function.
    pub point: PointFn<T>,
}

/// Validate a fractal name, a scheme name and a list of constants, and
/// bind them into a point function computing at `prec` bits.
pub fn resolve<T: Real>(
    name: &str,
    scheme: &str,
    constants: &[f64],
    prec: u32,
) -> Result<Resolved<T>, Error> {
    let fractal = find(name)?;
    if constants.len() != fractal.constants {
        return Err(Error::WrongConstantCount {
            fractal: fractal.name.to_string(),
            expected: fractal.constants,
            found: constants.len(),
        });
    }
    let scheme = fractal.scheme(scheme)?;
    let color = colors::lookup::<T>(scheme)
        .ok_or_else(|| Error::ColorSchemeNotRegistered(scheme.to_string()))?;
    debug!(
        "resolved {} with {} and constants {:?} at {} bits",
        fractal.name, scheme, constants, prec
    );

    let k: Vec<T> = constants.iter().map(|k| T::with_prec(prec, *k)).collect();
    let point = match fractal.kind {
        Kind::Mandelbrot => bind(Mandelbrot, color),
        Kind::Julia => bind(
            Julia {
                c: Complex::new(k[0].clone(), k[1].clone()),
            },
            color,
        ),
        Kind::BurningShip => bind(BurningShip, color),
        Kind::Tricorn => bind(Tricorn, color),
        Kind::Multibrot => bind(Multibrot { n: k[0].clone() }, color),
        Kind::Multijulia => bind(
            Multijulia {
                c: Complex::new(k[0].clone(), k[1].clone()),
                n: k[2].clone(),
            },
            color,
        ),
        Kind::Collatz => bind(Collatz, color),
    };

    Ok(Resolved {
        fractal,
        scheme,
        point,
    })
}

/// Close a concrete recurrence and a coloring scheme into a point
/// function.  Monomorphising here keeps dynamic dispatch out of the
/// escape loop.
fn bind<T, R>(recurrence: R, color: ColorFn<T>) -> PointFn<T>
where
    T: Real,
    R: Recurrence<T> + 'static,
{
    Box::new(move |x: T, y: T, cap: usize| {
        let orbit = escape(&recurrence, Complex::new(x, y), cap);
        color(&orbit)
    })
}

struct Mandelbrot;

impl<T: Real> Recurrence<T> for Mandelbrot {
    fn seed(&self, point: Complex<T>) -> (Complex<T>, Complex<T>) {
        (Complex::zero(point.precision()), point)
    }

    fn step(&self, z: &Complex<T>, c: &Complex<T>) -> Complex<T> {
        z.square().add(c)
    }

    fn bailout(&self) -> Bailout {
        Bailout::Radius(2.0)
    }
}

struct Julia<T> {
    c: Complex<T>,
}

impl<T: Real> Recurrence<T> for Julia<T> {
    fn seed(&self, point: Complex<T>) -> (Complex<T>, Complex<T>) {
        (point, self.c.clone())
    }

    fn step(&self, z: &Complex<T>, c: &Complex<T>) -> Complex<T> {
        z.square().add(c)
    }

    fn bailout(&self) -> Bailout {
        Bailout::Radius(2.0)
    }
}

/// Bails out at radius 10, not 2.
struct BurningShip;

impl<T: Real> Recurrence<T> for BurningShip {
    fn seed(&self, point: Complex<T>) -> (Complex<T>, Complex<T>) {
        (Complex::zero(point.precision()), point)
    }

    fn step(&self, z: &Complex<T>, c: &Complex<T>) -> Complex<T> {
        z.abs_parts().square().add(c)
    }

    fn bailout(&self) -> Bailout {
        Bailout::Radius(10.0)
    }
}

struct Tricorn;

impl<T: Real> Recurrence<T> for Tricorn {
    fn seed(&self, point: Complex<T>) -> (Complex<T>, Complex<T>) {
        (Complex::zero(point.precision()), point)
    }

    fn step(&self, z: &Complex<T>, c: &Complex<T>) -> Complex<T> {
        z.conj().square().add(c)
    }

    fn bailout(&self) -> Bailout {
        Bailout::Radius(2.0)
    }
}

struct Multibrot<T> {
    n: T,
}

impl<T: Real> Recurrence<T> for Multibrot<T> {
    fn seed(&self, point: Complex<T>) -> (Complex<T>, Complex<T>) {
        (Complex::zero(point.precision()), point)
    }

    fn step(&self, z: &Complex<T>, c: &Complex<T>) -> Complex<T> {
        z.pow(&self.n).add(c)
    }

    fn bailout(&self) -> Bailout {
        Bailout::Radius(2.0)
    }
}

struct Multijulia<T> {
    c: Complex<T>,
    n: T,
}

impl<T: Real> Recurrence<T> for Multijulia<T> {
    fn seed(&self, point: Complex<T>) -> (Complex<T>, Complex<T>) {
        (point, self.c.clone())
    }

    fn step(&self, z: &Complex<T>, c: &Complex<T>) -> Complex<T> {
        z.pow(&self.n).add(c)
    }

    fn bailout(&self) -> Bailout {
        Bailout::Radius(2.0)
    }
}

/// `cos²(πz/2)·z/2 + sin²(πz/2)·(3z+1)`, which agrees with the Collatz
/// map on the integers.  It has no parameter; `c` is carried as zero.
struct Collatz;

impl<T: Real> Recurrence<T> for Collatz {
    fn seed(&self, point: Complex<T>) -> (Complex<T>, Complex<T>) {
        let c = Complex::zero(point.precision());
        (point, c)
    }

    fn step(&self, z: &Complex<T>, _c: &Complex<T>) -> Complex<T> {
        let prec = z.precision();
        let half = T::with_prec(prec, 0.5);
        let angle = z.scale(&T::pi(prec).mul(&half));
        let (cos, sin) = (angle.cos(), angle.sin());
        let even = cos.square().mul(&z.scale(&half));
        let odd = sin
            .square()
            .mul(&z.scale(&T::with_prec(prec, 3.0)).add(&Complex::with_prec(prec, 1.0, 0.0)));
        even.add(&odd)
    }

    fn bailout(&self) -> Bailout {
        Bailout::Finite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(name: &str, scheme: &str, constants: &[f64]) -> PointFn<f64> {
        resolve::<f64>(name, scheme, constants, 53).unwrap().point
    }

    #[test]
    fn empty_and_default_pick_the_default_scheme() {
        for request in &["", "default", "DEFAULT"] {
            let r = resolve::<f64>("mandelbrot", request, &[], 53).unwrap();
            assert_eq!(r.scheme, "simple-grayscale");
            assert_eq!(r.fractal.name, "mandelbrot");
        }
    }

    #[test]
    fn names_are_case_insensitive() {
        let r = resolve::<f64>("Burning-Ship", "Wacky-Grayscale", &[], 53).unwrap();
        assert_eq!(r.fractal.kind, Kind::BurningShip);
        assert_eq!(r.scheme, "wacky-grayscale");
    }

    #[test]
    fn unknown_fractal() {
        match resolve::<f64>("mandelbort", "", &[], 53) {
            Err(Error::UnknownFractal(name)) => assert_eq!(name, "mandelbort"),
            _ => panic!("expected UnknownFractal"),
        }
    }

    #[test]
    fn unknown_scheme() {
        match resolve::<f64>("mandelbrot", "bogus", &[], 53) {
            Err(Error::UnknownColorScheme { .. }) => (),
            _ => panic!("expected UnknownColorScheme"),
        }
        // Registered, but not allowed for the ship.
        match resolve::<f64>("burning-ship", "smooth-color", &[], 53) {
            Err(Error::UnknownColorScheme { .. }) => (),
            _ => panic!("expected UnknownColorScheme"),
        }
    }

    #[test]
    fn wrong_constant_count() {
        match resolve::<f64>("julia", "default", &[1.0], 53) {
            Err(Error::WrongConstantCount {
                expected, found, ..
            }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            _ => panic!("expected WrongConstantCount"),
        }
    }

    #[test]
    fn registry_and_color_table_agree() {
        for fractal in all() {
            assert!(fractal.schemes.contains(&fractal.default_scheme));
            for scheme in fractal.schemes {
                assert!(colors::lookup::<f64>(scheme).is_some(), "{}", scheme);
            }
        }
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in all().iter().enumerate() {
            for b in &all()[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn mandelbrot_origin_is_white() {
        let f = point("mandelbrot", "simple-grayscale", &[]);
        assert_eq!(f(0.0, 0.0, 1), colors::Color::gray(255.0));
        assert_eq!(f(0.0, 0.0, 200), colors::Color::gray(255.0));
    }

    #[test]
    fn mandelbrot_outside_radius_escapes_fast() {
        let orbit = escape(&Mandelbrot, Complex::new(3.0, 0.0), 100);
        assert!(orbit.iterations < 2);
        let orbit = escape(&Mandelbrot, Complex::new(-1.5, 1.6), 100);
        assert!(orbit.iterations < 100);
    }

    #[test]
    fn julia_uses_its_constants() {
        let f = point("julia", "", &[0.0, 0.0]);
        // With c = 0 the unit disc is bounded and everything outside escapes.
        assert_eq!(f(0.5, 0.0, 64), colors::Color::gray(255.0));
        assert!(f(1.5, 0.0, 64).0 < 255.0);
    }

    #[test]
    fn burning_ship_step_matches_the_formula() {
        let z = Complex::new(-1.5, 0.5);
        let c = Complex::new(0.25, -0.75);
        let next = BurningShip.step(&z, &c);
        assert_eq!(next.re, 1.5 * 1.5 - 0.5 * 0.5 + 0.25);
        assert_eq!(next.im, 2.0 * 1.5 * 0.5 - 0.75);
        assert_eq!(Recurrence::<f64>::bailout(&BurningShip), Bailout::Radius(10.0));
    }

    #[test]
    fn tricorn_conjugates_before_squaring() {
        let z = Complex::new(1.0, 1.0);
        let c = Complex::new(0.0, 0.0);
        assert_eq!(Tricorn.step(&z, &c), Complex::new(0.0, -2.0));
    }

    #[test]
    fn multibrot_of_two_is_mandelbrot() {
        let m = Multibrot { n: 2.0 };
        for &(x, y) in &[(0.5, 0.5), (-0.5, 0.5), (-2.5, 0.0)] {
            let a = escape(&m, Complex::new(x, y), 500);
            let b = escape(&Mandelbrot, Complex::new(x, y), 500);
            assert_eq!(a.iterations, b.iterations);
        }
    }

    #[test]
    fn collatz_agrees_on_integers() {
        let near = |z: Complex<f64>, re: f64| (z.re - re).abs() < 1e-9 && z.im.abs() < 1e-9;
        let zero = Complex::new(0.0, 0.0);
        assert!(near(Collatz.step(&Complex::new(4.0, 0.0), &zero), 2.0));
        assert!(near(Collatz.step(&Complex::new(3.0, 0.0), &zero), 10.0));
        assert!(near(Collatz.step(&Complex::new(1.0, 0.0), &zero), 4.0));
    }

    #[test]
    fn collatz_runs_past_where_squaring_would_overflow() {
        let cap = 5000;
        let orbit = escape(&Collatz, Complex::new(1e150 + 1.0, 0.0), cap);
        assert!(orbit.iterations > 0);
        if orbit.iterations < cap {
            // Escaped only because a component really left the f64 range.
            let (re, im) = (orbit.z.re, orbit.z.im);
            assert!(!(re.is_finite() && im.is_finite() && re.hypot(im) < std::f64::MAX));
        }
    }

    #[test]
    fn display_lists_schemes() {
        let text = find("burning-ship").unwrap().to_string();
        assert!(text.starts_with("burning-ship\n"));
        assert!(text.contains("simple-grayscale, wacky-grayscale"));
    }

    #[cfg(feature = "bigfloat")]
    #[test]
    fn big_and_small_agree_at_low_zoom() {
        let small = point("mandelbrot", "simple-grayscale", &[]);
        let big = resolve::<rug::Float>("mandelbrot", "simple-grayscale", &[], 128)
            .unwrap()
            .point;
        for &(x, y) in &[(0.0, 0.0), (-0.75, 0.1), (0.5, 0.5), (1.0, 1.0)] {
            let b = big(
                <rug::Float as Real>::with_prec(128, x),
                <rug::Float as Real>::with_prec(128, y),
                100,
            );
            assert_eq!(small(x, y, 100), b);
        }
    }
}
