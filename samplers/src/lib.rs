//! Samplers

mod independent;

// Re-export.
pub use independent::*;

use lumo_core::properties::Properties;
use lumo_core::sampler::Sampler;

/// Creates a sampler from a variant name and its properties.
///
/// * `variant` - The sampler variant name.
/// * `props`   - The construction properties.
pub fn create(variant: &str, props: &Properties) -> Result<Box<dyn Sampler>, String> {
    match variant {
        "independent" => Ok(Box::new(IndependentSampler::new(props))),
        _ => Err(format!("unknown sampler variant '{variant}'")),
    }
}
