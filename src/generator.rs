// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The image generator.  A fixed set of scoped worker threads each
//! take every `workers`-th pixel, supersample it, and hand their
//! finished pixels back through their join handles; the pixels are
//! scattered into the image only once every worker has been joined.

use std::time::Instant;

use image::RgbaImage;
use itertools::iproduct;
use log::{debug, info, warn};

use crate::colors::Color;
use crate::errors::Error;
use crate::fractals::PointFn;
use crate::planes::PlaneMapper;
use crate::real::Real;

/// Everything about a render except what is being rendered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of worker threads.
    pub workers: usize,
    /// Iteration cap handed to the point function.
    pub cap: usize,
    /// Samples per pixel along each axis; 1 means no supersampling.
    pub samples: usize,
    /// The point on the plane at the middle of the image.
    pub center: (f64, f64),
    /// Zoom factor; at 1 the shorter side of the image spans 2 units.
    pub zoom: f64,
    /// Bits of precision for the arbitrary precision backend.  `None`
    /// renders with `f64`.
    pub precision: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 1000,
            height: 1000,
            workers: num_cpus::get(),
            cap: 128,
            samples: 1,
            center: (0.0, 0.0),
            zoom: 1.0,
            precision: None,
        }
    }
}

impl Config {
    /// The precision arithmetic will run at.
    pub fn bits(&self) -> u32 {
        self.precision.unwrap_or(f64::MANTISSA_DIGITS)
    }

    /// Reject any configuration that cannot produce an image.  Called
    /// before any worker is started.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |why: &str| Err(Error::InvalidConfig(why.to_string()));
        if self.width == 0 || self.height == 0 {
            return invalid("image width and height must be at least 1");
        }
        if (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .is_none()
        {
            return invalid("image is too large to address");
        }
        if self.workers == 0 {
            return invalid("at least one worker is needed");
        }
        if self.cap == 0 {
            return invalid("the iteration cap must be at least 1");
        }
        if self.samples == 0 {
            return invalid("the supersampling factor must be at least 1");
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return invalid("the zoom factor must be positive and finite");
        }
        if !(self.center.0.is_finite() && self.center.1.is_finite()) {
            return invalid("the center must be finite");
        }
        if let Some(prec) = self.precision {
            check_precision(prec)?;
        }
        Ok(())
    }
}

#[cfg(feature = "bigfloat")]
fn check_precision(prec: u32) -> Result<(), Error> {
    let (min, max) = crate::bigfloat::precision_range();
    if prec < min || prec > max {
        return Err(Error::InvalidConfig(format!(
            "precision must be between {} and {} bits",
            min, max
        )));
    }
    Ok(())
}

#[cfg(not(feature = "bigfloat"))]
fn check_precision(prec: u32) -> Result<(), Error> {
    Err(Error::PrecisionUnavailable(prec))
}

/// Sub-pixel offsets along one axis: `n` evenly spaced values centered
/// on the pixel, `(1 + 2s - n) / 2n` for `s` in `0..n`.  The set is
/// symmetric about zero for every `n`.
pub fn sample_offsets<T: Real>(samples: usize, prec: u32) -> Vec<T> {
    let denominator = T::with_prec(prec, (2 * samples) as f64);
    (0..samples)
        .map(|s| {
            let numerator = (1 + 2 * s) as f64 - samples as f64;
            T::with_prec(prec, numerator).div(&denominator)
        })
        .collect()
}

/// Drives a point function over every pixel of an image.
pub struct Generator<T> {
    config: Config,
    mapper: PlaneMapper<T>,
    point: PointFn<T>,
}

impl<T: Real> Generator<T> {
    /// Validates the configuration and prepares the plane mapping.
    pub fn new(config: Config, point: PointFn<T>) -> Result<Self, Error> {
        config.validate()?;
        let mapper = PlaneMapper::new(
            config.width,
            config.height,
            config.center,
            config.zoom,
            config.bits(),
        );
        Ok(Generator {
            config,
            mapper,
            point,
        })
    }

    /// Render the whole image.  A worker that panics does not stop the
    /// others; once all of them have been joined the first casualty is
    /// reported as `WorkerPanicked`.
    pub fn generate(&self) -> Result<RgbaImage, Error> {
        let Config {
            width,
            height,
            workers,
            samples,
            ..
        } = self.config;
        info!(
            "rendering {}x{} at {}x{} samples on {} workers",
            width, height, samples, samples, workers
        );
        let started = Instant::now();

        // Each worker fills only its own slot; a slot left empty after
        // the scope closes belongs to a worker that panicked.
        let mut shares: Vec<Option<Vec<[u8; 4]>>> = vec![None; workers];
        let outcome = crossbeam::scope(|spawner| {
            for (worker, slot) in shares.iter_mut().enumerate() {
                spawner.spawn(move |_| *slot = Some(self.work(worker)));
            }
        });
        if outcome.is_err() {
            warn!("a render worker panicked");
        }

        let mut buffer = vec![0u8; width as usize * height as usize * 4];
        for (worker, share) in shares.into_iter().enumerate() {
            let share = share.ok_or(Error::WorkerPanicked(worker))?;
            for (n, pixel) in share.iter().enumerate() {
                let offset = (worker + n * workers) * 4;
                buffer[offset..offset + 4].copy_from_slice(pixel);
            }
        }
        info!("rendered in {:?}", started.elapsed());

        RgbaImage::from_raw(width, height, buffer)
            .ok_or_else(|| Error::InvalidConfig("pixel buffer does not fit the image".to_string()))
    }

    /// One worker's share: pixels `worker`, `worker + workers`, ... in
    /// that order.
    fn work(&self, worker: usize) -> Vec<[u8; 4]> {
        let Config {
            width,
            height,
            workers,
            cap,
            samples,
            ..
        } = self.config;
        let prec = self.config.bits();
        let offsets = sample_offsets::<T>(samples, prec);
        let weight = (samples * samples) as f64;
        let width = width as usize;
        let size = width * height as usize;

        let share: Vec<[u8; 4]> = (worker..size)
            .step_by(workers)
            .map(|i| {
                let x = T::with_prec(prec, (i % width) as f64);
                let y = T::with_prec(prec, (i / width) as f64);
                let sum = iproduct!(&offsets, &offsets).fold(Color::default(), |sum, (dx, dy)| {
                    let point = self.mapper.pixel_to_point(&x.add(dx), &y.add(dy));
                    sum + (self.point)(point.re, point.im, cap)
                });
                (sum / weight).to_bytes()
            })
            .collect();
        debug!("worker {} done, {} pixels", worker, share.len());
        share
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractals::resolve;

    fn config(width: u32, height: u32, workers: usize, samples: usize) -> Config {
        Config {
            width,
            height,
            workers,
            cap: 64,
            samples,
            ..Config::default()
        }
    }

    fn mandelbrot(scheme: &str) -> PointFn<f64> {
        resolve::<f64>("mandelbrot", scheme, &[], 53).unwrap().point
    }

    #[test]
    fn offsets_are_symmetric_and_zero_mean() {
        for n in 1..9 {
            let offsets = sample_offsets::<f64>(n, 53);
            assert_eq!(offsets.len(), n);
            let sum: f64 = offsets.iter().sum();
            assert!(sum.abs() < 1e-12, "n = {}: sum {}", n, sum);
            for (a, b) in offsets.iter().zip(offsets.iter().rev()) {
                assert!((a + b).abs() < 1e-12);
            }
            assert!(offsets.iter().all(|o| o.abs() < 0.5));
        }
        assert_eq!(sample_offsets::<f64>(1, 53), vec![0.0]);
        assert_eq!(sample_offsets::<f64>(2, 53), vec![-0.25, 0.25]);
    }

    #[test]
    fn constant_colors_survive_supersampling() {
        let flat: PointFn<f64> = Box::new(|_, _, _| Color(10.0, 20.0, 30.0, 255.0));
        let image = Generator::new(config(5, 3, 2, 2), flat)
            .unwrap()
            .generate()
            .unwrap();
        for pixel in image.pixels() {
            assert_eq!(pixel.0, [10, 20, 30, 255]);
        }
    }

    #[test]
    fn single_sample_is_the_point_function() {
        let cfg = config(7, 5, 3, 1);
        let image = Generator::new(cfg, mandelbrot("smooth-color"))
            .unwrap()
            .generate()
            .unwrap();
        let mapper: PlaneMapper<f64> = PlaneMapper::new(7, 5, cfg.center, cfg.zoom, 53);
        let point = mandelbrot("smooth-color");
        for y in 0..5 {
            for x in 0..7 {
                let p = mapper.pixel_to_point(&f64::from(x), &f64::from(y));
                let expected = point(p.re, p.im, cfg.cap).to_bytes();
                assert_eq!(image.get_pixel(x, y).0, expected);
            }
        }
    }

    #[test]
    fn worker_count_does_not_change_the_image() {
        let render = |workers| {
            Generator::new(config(23, 17, workers, 2), mandelbrot("smooth-color2"))
                .unwrap()
                .generate()
                .unwrap()
                .into_raw()
        };
        let reference = render(1);
        for workers in &[2, 3, 8, 500] {
            assert_eq!(render(*workers), reference);
        }
    }

    #[test]
    fn a_panicking_worker_is_reported() {
        let fragile: PointFn<f64> = Box::new(|x, y, _| {
            if x < -0.9 && y < -0.9 {
                panic!("bad pixel");
            }
            Color::gray(128.0)
        });
        match Generator::new(config(4, 4, 4, 1), fragile).unwrap().generate() {
            Err(Error::WorkerPanicked(0)) => (),
            other => panic!("expected worker 0 to fail, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn idle_workers_are_not_casualties() {
        let flat: PointFn<f64> = Box::new(|_, _, _| Color::gray(64.0));
        let image = Generator::new(config(2, 1, 8, 1), flat)
            .unwrap()
            .generate()
            .unwrap();
        assert_eq!(image.into_raw(), vec![64, 64, 64, 255, 64, 64, 64, 255]);
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        let flat = || -> PointFn<f64> { Box::new(|_, _, _| Color::default()) };
        let bad = [
            Config { width: 0, ..config(4, 4, 1, 1) },
            Config { workers: 0, ..config(4, 4, 1, 1) },
            Config { cap: 0, ..config(4, 4, 1, 1) },
            Config { samples: 0, ..config(4, 4, 1, 1) },
            Config { zoom: 0.0, ..config(4, 4, 1, 1) },
            Config { zoom: std::f64::NAN, ..config(4, 4, 1, 1) },
            Config { center: (std::f64::INFINITY, 0.0), ..config(4, 4, 1, 1) },
            Config { precision: Some(0), ..config(4, 4, 1, 1) },
        ];
        for cfg in &bad {
            assert!(Generator::new(*cfg, flat()).is_err(), "{:?}", cfg);
        }
    }

    #[cfg(feature = "bigfloat")]
    #[test]
    fn big_offsets_are_exact_thirds() {
        let offsets = sample_offsets::<rug::Float>(3, 128);
        assert_eq!(offsets[1], <rug::Float as Real>::with_prec(128, 0.0));
        assert_eq!(offsets[0].precision(), 128);
        assert_eq!(Real::to_f64(&offsets[2]), 1.0 / 3.0);
    }
}
