//! Image Texture

#![allow(dead_code)]

use lumo_core::color::Color;
use lumo_core::common::*;
use lumo_core::film::Image;
use lumo_core::geometry::{Point2f, Point2i};
use lumo_core::properties::Properties;
use lumo_core::texture::Texture;
use std::sync::Arc;

/// How lookups outside the [0,1] texture domain are handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BorderMode {
    Clamp,
    Repeat,
}

/// How texels are filtered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FilterMode {
    Nearest,
    Bilinear,
}

/// A texture backed by an image, with configurable border handling,
/// filtering and an exposure multiplier.
pub struct ImageTexture {
    /// The backing image.
    image: Arc<Image>,

    /// Multiplier applied to every lookup.
    exposure: Float,

    /// How lookups outside the texture domain are handled.
    border: BorderMode,

    /// How texels are filtered.
    filter: FilterMode,
}

impl ImageTexture {
    /// Create a new `ImageTexture`.
    ///
    /// * `props` - Construction properties (`image` child, `exposure`,
    ///             `border`, `filter`).
    pub fn new(props: &Properties) -> Result<Self, String> {
        let image = props.require_image("image")?;
        let exposure = props.float_or("exposure", 1.0);
        let border = props.enumeration(
            "border",
            BorderMode::Repeat,
            &[("clamp", BorderMode::Clamp), ("repeat", BorderMode::Repeat)],
        )?;
        let filter = props.enumeration(
            "filter",
            FilterMode::Bilinear,
            &[
                ("nearest", FilterMode::Nearest),
                ("bilinear", FilterMode::Bilinear),
            ],
        )?;

        Ok(Self {
            image,
            exposure,
            border,
            filter,
        })
    }

    /// Returns the color of a texel while respecting the border mode.
    ///
    /// * `iuv` - Integer texel coordinates, possibly out of range.
    fn pixel(&self, iuv: (i64, i64)) -> Color {
        let resolution = self.image.resolution();
        let (width, height) = (resolution.x as i64, resolution.y as i64);

        let coords = match self.border {
            BorderMode::Clamp => (
                clamp(iuv.0, 0, width - 1),
                clamp(iuv.1, 0, height - 1),
            ),
            BorderMode::Repeat => (iuv.0.rem_euclid(width), iuv.1.rem_euclid(height)),
        };

        self.image.get(Point2i::new(coords.0 as i32, coords.1 as i32))
    }
}

impl Texture for ImageTexture {
    fn evaluate(&self, uv: Point2f) -> Color {
        let resolution = self.image.resolution();

        // Flip the y-axis so that v grows upwards, and scale to texels.
        let x = uv.x * resolution.x as Float;
        let y = (1.0 - uv.y) * resolution.y as Float;

        let color = match self.filter {
            FilterMode::Nearest => self.pixel((x.floor() as i64, y.floor() as i64)),
            FilterMode::Bilinear => {
                // Shift by half a texel so that texel centres are the
                // interpolation knots.
                let mx = x - 0.5;
                let my = y - 0.5;
                let cell = (mx.floor() as i64, my.floor() as i64);
                let fx = mx - cell.0 as Float;
                let fy = my - cell.1 as Float;

                let tl = self.pixel(cell);
                let tr = self.pixel((cell.0 + 1, cell.1));
                let bl = self.pixel((cell.0, cell.1 + 1));
                let br = self.pixel((cell.0 + 1, cell.1 + 1));

                let top = tr * fx + tl * (1.0 - fx);
                let bottom = br * fx + bl * (1.0 - fx);
                bottom * fy + top * (1.0 - fy)
            }
        };

        color * self.exposure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Arc<Image> {
        Arc::new(Image::new(
            Point2i::new(2, 2),
            vec![
                Color::new(1.0, 0.0, 0.0),
                Color::new(0.0, 1.0, 0.0),
                Color::new(0.0, 0.0, 1.0),
                Color::new(1.0, 1.0, 1.0),
            ],
        ))
    }

    fn texture(border: BorderMode, filter: FilterMode) -> ImageTexture {
        ImageTexture {
            image: two_by_two(),
            exposure: 1.0,
            border,
            filter,
        }
    }

    #[test]
    fn nearest_lookup_flips_v() {
        let t = texture(BorderMode::Repeat, FilterMode::Nearest);
        // uv (0.25, 0.75) is the upper-left texel of the image.
        assert_eq!(t.evaluate(Point2f::new(0.25, 0.75)), Color::new(1.0, 0.0, 0.0));
        // uv (0.25, 0.25) is the lower-left texel.
        assert_eq!(t.evaluate(Point2f::new(0.25, 0.25)), Color::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn bilinear_midpoint_averages_the_texels() {
        let t = texture(BorderMode::Repeat, FilterMode::Bilinear);
        let c = t.evaluate(Point2f::new(0.5, 0.5));
        assert!((c.r - 0.5).abs() < 1e-5);
        assert!((c.g - 0.5).abs() < 1e-5);
        assert!((c.b - 0.5).abs() < 1e-5);
    }

    #[test]
    fn clamp_border_extends_edge_texels() {
        let t = texture(BorderMode::Clamp, FilterMode::Nearest);
        assert_eq!(
            t.evaluate(Point2f::new(-3.0, 0.75)),
            Color::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn repeat_border_wraps() {
        let t = texture(BorderMode::Repeat, FilterMode::Nearest);
        assert_eq!(
            t.evaluate(Point2f::new(1.25, 0.75)),
            t.evaluate(Point2f::new(0.25, 0.75))
        );
    }
}
