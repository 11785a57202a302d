//! Cameras

mod perspective;
mod thin_lens;

// Re-export.
pub use perspective::*;
pub use thin_lens::*;

use lumo_core::camera::ArcCamera;
use lumo_core::properties::Properties;
use std::sync::Arc;

/// Creates a camera from a variant name and its properties.
///
/// * `variant` - The camera variant name.
/// * `props`   - The construction properties.
pub fn create(variant: &str, props: &Properties) -> Result<ArcCamera, String> {
    match variant {
        "perspective" => Ok(Arc::new(PerspectiveCamera::new(props)?)),
        "thinlens" => Ok(Arc::new(ThinLensCamera::new(props)?)),
        _ => Err(format!("unknown camera variant '{variant}'")),
    }
}

/// Computes the half extents of the image plane at unit distance for a
/// field of view in degrees along a named axis, scaling the other axis by
/// the aspect ratio.
///
/// * `fov`        - Full field of view in degrees.
/// * `fov_axis`   - The axis the field of view applies to ("x" or "y").
/// * `resolution` - Image resolution in pixels.
pub(crate) fn image_plane_extents(
    fov: lumo_core::common::Float,
    fov_axis: &str,
    resolution: lumo_core::geometry::Point2i,
) -> Result<(lumo_core::common::Float, lumo_core::common::Float), String> {
    use lumo_core::common::*;

    let half_width = (fov / 2.0 * DEG_TO_RAD).tan();
    match fov_axis {
        "x" => {
            let aspect = resolution.y as Float / resolution.x as Float;
            Ok((half_width, half_width * aspect))
        }
        "y" => {
            let aspect = resolution.x as Float / resolution.y as Float;
            Ok((half_width * aspect, half_width))
        }
        axis => Err(format!("unknown fov axis '{axis}'")),
    }
}
