//! Images and Film

#![allow(dead_code)]

use crate::color::Color;
use crate::common::*;
use crate::geometry::{Bounds2i, Point2i};
use exr::prelude::{self as exrs, *};
use image::{open, ImageBuffer, Rgb, RgbImage};
use std::sync::Mutex;

/// Immutable pixel storage, used as the backing store for image textures and
/// environment maps. Loaded or generated once at scene build time and
/// read-only afterwards.
pub struct Image {
    /// Image resolution.
    resolution: Point2i,

    /// The pixels in scanline order.
    pixels: Vec<Color>,
}

impl Image {
    /// Creates an image from pixel data.
    ///
    /// * `resolution` - Image resolution.
    /// * `pixels`     - The pixels in scanline order.
    pub fn new(resolution: Point2i, pixels: Vec<Color>) -> Self {
        assert_eq!(
            (resolution.x as usize) * (resolution.y as usize),
            pixels.len()
        );
        Self { resolution, pixels }
    }

    /// Reads an image from a file. OpenEXR files are read as linear
    /// radiance; 8-bit formats are converted from sRGB.
    ///
    /// * `path` - Input file path.
    pub fn read(path: &str) -> std::result::Result<Self, String> {
        if path.to_lowercase().ends_with(".exr") {
            Self::read_exr(path)
        } else {
            Self::read_8_bit(path)
        }
    }

    /// Read a single layer OpenEXR file.
    ///
    /// * `path` - Input file path.
    fn read_exr(path: &str) -> std::result::Result<Self, String> {
        let reader = exrs::read()
            .no_deep_data()
            .largest_resolution_level()
            .rgba_channels(
                |resolution, _channels| {
                    let width = resolution.width();
                    let height = resolution.height();
                    Image {
                        resolution: Point2i::new(width as i32, height as i32),
                        pixels: vec![Color::BLACK; width * height],
                    }
                },
                |img, position, (r, g, b, _a): (f32, f32, f32, f32)| {
                    let offset = position.y() * img.resolution.x as usize + position.x();
                    img.pixels[offset] = Color::new(r, g, b);
                },
            )
            .first_valid_layer()
            .all_attributes();

        match reader.from_file(path) {
            Ok(img) => {
                let img = img.layer_data.channel_data.pixels;
                info!(
                    "Read EXR image {path} ({} x {})",
                    img.resolution.x, img.resolution.y
                );
                Ok(img)
            }
            Err(err) => Err(format!("Error reading image {path}: {err}")),
        }
    }

    /// Read an 8-bit image format, converting from sRGB to linear.
    ///
    /// * `path` - Input file path.
    fn read_8_bit(path: &str) -> std::result::Result<Self, String> {
        let img: RgbImage = match open(path) {
            Ok(i) => i.into_rgb8(),
            Err(err) => return Err(format!("Error reading image {path}: {err}")),
        };

        let width = img.width() as usize;
        let height = img.height() as usize;
        let pixels = img
            .pixels()
            .map(|p| {
                Color::new(
                    srgb_to_linear(p.0[0] as Float / 255.0),
                    srgb_to_linear(p.0[1] as Float / 255.0),
                    srgb_to_linear(p.0[2] as Float / 255.0),
                )
            })
            .collect();

        info!("Read image {path} ({width} x {height})");
        Ok(Self::new(Point2i::new(width as i32, height as i32), pixels))
    }

    /// Returns the image resolution.
    pub fn resolution(&self) -> Point2i {
        self.resolution
    }

    /// Returns the pixel at the given coordinates. The caller is responsible
    /// for staying within the resolution.
    ///
    /// * `p` - The pixel coordinates.
    pub fn get(&self, p: Point2i) -> Color {
        self.pixels[(p.y * self.resolution.x + p.x) as usize]
    }
}

/// The mutable render target. Worker threads render disjoint tiles and merge
/// them; merging is the only synchronisation point.
#[derive(Default)]
pub struct Film {
    inner: Mutex<FilmInner>,
}

#[derive(Default)]
struct FilmInner {
    resolution: Point2i,
    pixels: Vec<Color>,
}

impl Film {
    /// Creates an uninitialized film.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the pixel storage for the given resolution and clears it to
    /// black.
    ///
    /// * `resolution` - Image resolution.
    pub fn initialize(&self, resolution: Point2i) {
        let mut inner = self.inner.lock().unwrap();
        inner.resolution = resolution;
        inner.pixels = vec![Color::BLACK; (resolution.x as usize) * (resolution.y as usize)];
    }

    /// Returns the image resolution.
    pub fn resolution(&self) -> Point2i {
        self.inner.lock().unwrap().resolution
    }

    /// Merges a rendered tile into the film.
    ///
    /// * `bounds` - The pixel rectangle covered by the tile.
    /// * `pixels` - Tile pixels in scanline order within `bounds`.
    pub fn merge_block(&self, bounds: Bounds2i, pixels: &[Color]) {
        let mut inner = self.inner.lock().unwrap();
        let width = inner.resolution.x;
        let tile_width = bounds.diagonal().x;
        for (i, pixel) in bounds.into_iter().enumerate() {
            debug_assert_eq!(
                i,
                ((pixel.y - bounds.p_min.y) * tile_width + (pixel.x - bounds.p_min.x)) as usize
            );
            inner.pixels[(pixel.y * width + pixel.x) as usize] = pixels[i];
        }
    }

    /// Returns a single pixel value.
    ///
    /// * `p` - The pixel coordinates.
    pub fn pixel(&self, p: Point2i) -> Color {
        let inner = self.inner.lock().unwrap();
        inner.pixels[(p.y * inner.resolution.x + p.x) as usize]
    }

    /// Returns a copy of all pixels in scanline order.
    pub fn data(&self) -> Vec<Color> {
        self.inner.lock().unwrap().pixels.clone()
    }

    /// Replaces this film's content with another film's content.
    ///
    /// * `other` - The film to copy from.
    pub fn copy_from(&self, other: &Film) {
        let source = other.inner.lock().unwrap();
        let mut inner = self.inner.lock().unwrap();
        inner.resolution = source.resolution;
        inner.pixels = source.pixels.clone();
    }

    /// Writes the image to a file. OpenEXR output stays linear; any other
    /// extension is written as 8-bit sRGB through the `image` crate.
    ///
    /// * `path` - Output file path.
    pub fn save(&self, path: &str) -> std::result::Result<(), String> {
        let (resolution, pixels) = {
            let inner = self.inner.lock().unwrap();
            (inner.resolution, inner.pixels.clone())
        };
        if resolution.x <= 0 || resolution.y <= 0 {
            return Err(String::from("cannot save an uninitialized film"));
        }

        info!(
            "Writing image {path} with resolution {}x{}",
            resolution.x, resolution.y
        );

        if path.to_lowercase().ends_with(".exr") {
            write_exr(path, &pixels, resolution)
        } else {
            write_8_bit(path, &pixels, resolution)
        }
    }
}

/// Write pixels to an OpenEXR file.
fn write_exr(path: &str, pixels: &[Color], resolution: Point2i) -> std::result::Result<(), String> {
    let size = Vec2(resolution.x as usize, resolution.y as usize);

    let layer = Layer::new(
        size,
        LayerAttributes::named("render"),
        Encoding::SMALL_LOSSLESS,
        SpecificChannels::rgb(|pos: Vec2<usize>| {
            let pixel = pixels[pos.1 * (resolution.x as usize) + pos.0];
            (pixel.r, pixel.g, pixel.b)
        }),
    );

    let attributes = ImageAttributes::new(IntegerBounds::from_dimensions(size));
    match exrs::Image::empty(attributes).with_layer(layer).write().to_file(path) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}")),
    }
}

/// Write pixels to an 8-bit image file, converting to sRGB.
fn write_8_bit(path: &str, pixels: &[Color], resolution: Point2i) -> std::result::Result<(), String> {
    let mut imgbuf = ImageBuffer::new(resolution.x as u32, resolution.y as u32);
    for y in 0..resolution.y {
        for x in 0..resolution.x {
            let pixel = pixels[(y * resolution.x + x) as usize];
            imgbuf.put_pixel(
                x as u32,
                y as u32,
                Rgb([
                    quantize(pixel.r),
                    quantize(pixel.g),
                    quantize(pixel.b),
                ]),
            );
        }
    }

    match imgbuf.save(path) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}")),
    }
}

/// Converts a linear value to the sRGB transfer curve.
pub fn linear_to_srgb(v: Float) -> Float {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts an sRGB encoded value to linear.
pub fn srgb_to_linear(v: Float) -> Float {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Quantizes a linear value to an 8-bit sRGB channel.
fn quantize(v: Float) -> u8 {
    clamp(255.0 * linear_to_srgb(v) + 0.5, 0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn film_merge_and_readback() {
        let film = Film::new();
        film.initialize(Point2i::new(4, 4));
        let bounds = Bounds2i::new(Point2i::new(1, 1), Point2i::new(3, 3));
        let tile = vec![Color::gray(0.5); 4];
        film.merge_block(bounds, &tile);
        assert_eq!(film.pixel(Point2i::new(1, 1)), Color::gray(0.5));
        assert_eq!(film.pixel(Point2i::new(0, 0)), Color::BLACK);
    }

    #[test]
    fn srgb_roundtrip() {
        for i in 0..32 {
            let v = i as Float / 31.0;
            let roundtrip = srgb_to_linear(linear_to_srgb(v));
            assert!((roundtrip - v).abs() < 1e-5);
        }
    }
}
