//! Media

mod homogeneous;

// Re-export.
pub use homogeneous::*;

use lumo_core::medium::ArcMedium;
use lumo_core::properties::Properties;
use std::sync::Arc;

/// Creates a medium from a variant name and its properties.
///
/// * `variant` - The medium variant name.
/// * `props`   - The construction properties.
pub fn create(variant: &str, props: &Properties) -> Result<ArcMedium, String> {
    match variant {
        "homogeneous" => Ok(Arc::new(HomogeneousMedium::new(props)?)),
        _ => Err(format!("unknown medium variant '{variant}'")),
    }
}
