//! Sampler

#![allow(dead_code)]

use crate::common::Float;
use crate::geometry::{Point2f, Point2i};

/// A source of pseudo-random sample values driving all stochastic decisions
/// of the rendering algorithms.
///
/// Determinism contract: after `seed(pixel, sample_index)` the stream of
/// `next`/`next_2d` values only depends on the pixel and sample index, so
/// renders are reproducible across runs and thread counts.
pub trait Sampler: Send + Sync {
    /// Returns the number of samples to take per pixel.
    fn samples_per_pixel(&self) -> usize;

    /// Restarts the stream for a given pixel and sample index.
    ///
    /// * `pixel`        - The pixel being sampled.
    /// * `sample_index` - Index of the sample within the pixel.
    fn seed(&mut self, pixel: Point2i, sample_index: usize);

    /// Returns the next 1-D sample value in `[0, 1)`.
    fn next(&mut self) -> Float;

    /// Returns the next 2-D sample value in `[0, 1)^2`.
    fn next_2d(&mut self) -> Point2f {
        let x = self.next();
        let y = self.next();
        Point2f::new(x, y)
    }

    /// Generates an independent instance for use by a rendering thread.
    fn clone_sampler(&self) -> Box<dyn Sampler>;
}
