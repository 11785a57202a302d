//! Integrators

#[macro_use]
extern crate log;

mod common;
mod direct;
mod normals;
mod path;
mod sdf_steps;
mod volume_path;

// Re-export.
pub use direct::*;
pub use normals::*;
pub use path::*;
pub use sdf_steps::*;
pub use volume_path::*;

use lumo_core::integrator::{Integrator, SamplingIntegratorData};
use lumo_core::properties::Properties;
use std::sync::Arc;

/// Creates an integrator from a variant name, its properties and the
/// pre-assembled common data (scene, sampler prototype, film).
///
/// * `variant` - The integrator variant name.
/// * `props`   - The construction properties.
/// * `data`    - The common sampling-integrator data.
pub fn create(
    variant: &str,
    props: &Properties,
    data: SamplingIntegratorData,
) -> Result<Arc<dyn Integrator>, String> {
    match variant {
        "normals" => Ok(Arc::new(NormalsIntegrator::new(props, data))),
        "sdf" => Ok(Arc::new(SdfIntegrator::new(data))),
        "direct" => Ok(Arc::new(DirectIntegrator::new(data))),
        "pathtracer" => Ok(Arc::new(PathTracer::new(props, data))),
        "volumepathtracer" => Ok(Arc::new(VolumePathTracer::new(props, data))),
        _ => Err(format!("unknown integrator variant '{variant}'")),
    }
}
