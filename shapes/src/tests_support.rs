//! Shared helpers for shape tests.

use lumo_core::common::Float;
use lumo_core::geometry::Point2i;
use lumo_core::rng::Rng;
use lumo_core::sampler::Sampler;

/// A sampler backed directly by a PCG stream, independent of pixels.
pub struct StreamSampler {
    rng: Rng,
    seed: u64,
}

impl StreamSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            seed,
        }
    }
}

impl Sampler for StreamSampler {
    fn samples_per_pixel(&self) -> usize {
        1
    }

    fn seed(&mut self, _pixel: Point2i, sample_index: usize) {
        self.rng = Rng::new(self.seed ^ (sample_index as u64).wrapping_mul(0x9e3779b97f4a7c15));
    }

    fn next(&mut self) -> Float {
        self.rng.uniform_float()
    }

    fn clone_sampler(&self) -> Box<dyn Sampler> {
        Box::new(Self::new(self.seed))
    }
}
