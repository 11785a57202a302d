//! Shapes

#[macro_use]
extern crate log;

mod mesh;
mod rectangle;
pub mod sdf;
mod sphere;

#[cfg(test)]
pub(crate) mod tests_support;

// Re-export.
pub use mesh::*;
pub use rectangle::*;
pub use sphere::*;

use lumo_core::properties::Properties;
use lumo_core::shape::ArcShape;
use std::sync::Arc;

/// Creates a shape from a variant name and its properties. Triangle meshes
/// and SDF shapes are not constructible this way: meshes take vertex and
/// index buffers produced by an external loader, and SDF shapes take their
/// distance-function tree (see `sdf::create_node`).
///
/// * `variant` - The shape variant name.
/// * `props`   - The construction properties.
pub fn create(variant: &str, props: &Properties) -> Result<ArcShape, String> {
    let _ = props;
    match variant {
        "sphere" => Ok(Arc::new(Sphere::new())),
        "rectangle" => Ok(Arc::new(Rectangle::new())),
        _ => Err(format!("unknown shape variant '{variant}'")),
    }
}
