//! Shared helpers for light tests.

use lumo_core::color::Color;
use lumo_core::common::Float;
use lumo_core::geometry::{Point2f, Point2i};
use lumo_core::rng::Rng;
use lumo_core::sampler::Sampler;
use lumo_core::texture::Texture;

/// A texture returning the same color everywhere.
pub struct ConstantTexture(pub Color);

impl Texture for ConstantTexture {
    fn evaluate(&self, _uv: Point2f) -> Color {
        self.0
    }
}

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
