//! BSDFs

mod conductor;
mod dielectric;
mod diffuse;
mod principled;
mod rough_conductor;

#[cfg(test)]
pub(crate) mod tests_support;

// Re-export.
pub use conductor::*;
pub use dielectric::*;
pub use diffuse::*;
pub use principled::*;
pub use rough_conductor::*;

use lumo_core::properties::Properties;
use lumo_core::reflection::ArcBsdf;
use std::sync::Arc;

/// Creates a BSDF from a variant name and its properties.
///
/// * `variant` - The BSDF variant name.
/// * `props`   - The construction properties.
pub fn create(variant: &str, props: &Properties) -> Result<ArcBsdf, String> {
    match variant {
        "diffuse" => Ok(Arc::new(Diffuse::new(props)?)),
        "conductor" => Ok(Arc::new(Conductor::new(props)?)),
        "dielectric" => Ok(Arc::new(Dielectric::new(props)?)),
        "roughconductor" => Ok(Arc::new(RoughConductor::new(props)?)),
        "principled" => Ok(Arc::new(Principled::new(props)?)),
        _ => Err(format!("unknown bsdf variant '{variant}'")),
    }
}
