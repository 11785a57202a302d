//! Lights

mod area;
mod directional;
mod envmap;
mod lambertian;
mod point;

#[cfg(test)]
pub(crate) mod tests_support;

// Re-export.
pub use area::*;
pub use directional::*;
pub use envmap::*;
pub use lambertian::*;
pub use point::*;

use lumo_core::emission::ArcEmission;
use lumo_core::light::ArcLight;
use lumo_core::properties::Properties;
use std::sync::Arc;

/// Creates a light from a variant name and its properties.
///
/// * `variant` - The light variant name.
/// * `props`   - The construction properties.
pub fn create(variant: &str, props: &Properties) -> Result<ArcLight, String> {
    match variant {
        "point" => Ok(Arc::new(PointLight::new(props)?)),
        "directional" => Ok(Arc::new(DirectionalLight::new(props)?)),
        "area" => Ok(Arc::new(AreaLight::new(props)?)),
        "envmap" => Ok(Arc::new(EnvironmentMap::new(props)?)),
        _ => Err(format!("unknown light variant '{variant}'")),
    }
}

/// Creates an emission from a variant name and its properties.
///
/// * `variant` - The emission variant name.
/// * `props`   - The construction properties.
pub fn create_emission(variant: &str, props: &Properties) -> Result<ArcEmission, String> {
    match variant {
        "lambertian" => Ok(Arc::new(Lambertian::new(props)?)),
        _ => Err(format!("unknown emission variant '{variant}'")),
    }
}
