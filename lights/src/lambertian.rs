//! Lambertian Emission

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::emission::{Emission, EmissionEval};
use lumo_core::geometry::{Frame, Point2f, Vector3f};
use lumo_core::properties::Properties;
use lumo_core::texture::{ArcTexture, Texture};

/// A surface emitting uniformly into the hemisphere above it. Nothing is
/// emitted into directions behind the surface.
pub struct Lambertian {
    /// The emitted radiance.
    emission: ArcTexture,
}

impl Lambertian {
    /// Create a new `Lambertian` emission.
    ///
    /// * `props` - Construction properties (`emission` texture).
    pub fn new(props: &Properties) -> Result<Self, String> {
        Ok(Self {
            emission: props.require_texture("emission")?,
        })
    }

    /// Create a new `Lambertian` emission from a texture.
    ///
    /// * `emission` - The emitted radiance.
    pub fn with_texture(emission: ArcTexture) -> Self {
        Self { emission }
    }
}

impl Emission for Lambertian {
    fn evaluate(&self, uv: Point2f, wo: &Vector3f) -> EmissionEval {
        if Frame::cos_theta(wo) < 0.0 {
            return EmissionEval {
                value: Color::BLACK,
            };
        }
        EmissionEval {
            value: self.emission.evaluate(uv),
        }
    }
}
