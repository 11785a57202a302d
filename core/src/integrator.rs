//! Integrator

#![allow(dead_code)]

use crate::app::OPTIONS;
use crate::camera::Camera;
use crate::color::Color;
use crate::common::*;
use crate::film::Film;
use crate::geometry::{Bounds2i, Point2i, Ray};
use crate::iterators::BlockSpiral;
use crate::sampler::Sampler;
use crate::scene::Scene;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

/// A rendering algorithm that produces an image from a scene.
pub trait Integrator: Send + Sync {
    /// Renders the image.
    fn execute(&self) -> Result<(), String>;
}

/// An optional sink receiving tile snapshots for progressive preview. The
/// observer is responsible for its own buffering; the renderer only reports
/// which rectangle of the film was updated.
pub trait BlockCallback: Send + Sync {
    /// Called after a tile has been merged into the film.
    ///
    /// * `block` - The pixel rectangle that was updated.
    fn update_block(&self, block: Bounds2i);
}

/// Data common to all sampling integrators.
pub struct SamplingIntegratorData {
    /// The scene that should be rendered.
    pub scene: Arc<Scene>,

    /// The prototype sampler; worker threads derive their own instances
    /// from it.
    pub sampler: Box<dyn Sampler>,

    /// The output film populated by rendering.
    pub film: Arc<Film>,

    /// An optional sink for progressive tile updates.
    pub callback: Option<Arc<dyn BlockCallback>>,
}

impl SamplingIntegratorData {
    /// Create a new `SamplingIntegratorData`.
    ///
    /// * `scene`   - The scene that should be rendered.
    /// * `sampler` - The prototype sampler.
    /// * `film`    - The output film.
    pub fn new(scene: Arc<Scene>, sampler: Box<dyn Sampler>, film: Arc<Film>) -> Self {
        Self {
            scene,
            sampler,
            film,
            callback: None,
        }
    }

    /// Attaches a progressive preview sink.
    ///
    /// * `callback` - The sink receiving tile updates.
    pub fn with_callback(mut self, callback: Arc<dyn BlockCallback>) -> Self {
        self.callback = Some(callback);
        self
    }
}

/// A rendering algorithm driven by a stream of per-pixel samples: for every
/// pixel and sample, a camera ray is generated and handed to `li`, and the
/// average of the returned estimates becomes the pixel value.
pub trait SamplingIntegrator: Send + Sync {
    /// Returns the common data.
    fn data(&self) -> &SamplingIntegratorData;

    /// Returns (an estimate of) the incident radiance for a given ray.
    ///
    /// * `ray` - The camera ray.
    /// * `rng` - The per-pixel sampler.
    fn li(&self, ray: &Ray, rng: &mut dyn Sampler) -> Color;

    /// Computes all pixels of the image by iterating tiles in an outward
    /// spiral across a pool of worker threads.
    fn render(&self) -> Result<(), String> {
        let data = self.data();
        let scene = &data.scene;
        let film = &data.film;

        let resolution = scene.camera().resolution();
        film.initialize(resolution);

        let samples_per_pixel = data.sampler.samples_per_pixel();

        let tile_size = OPTIONS.tile_size as i32;
        let spiral = BlockSpiral::new(resolution, Point2i::new(tile_size, tile_size));
        let tile_count = spiral.total_blocks();
        let blocks: Vec<Bounds2i> = spiral.collect();

        info!(
            "Rendering {}x{} pixels in {} tiles with {} samples per pixel",
            resolution.x,
            resolution.y,
            tile_count,
            samples_per_pixel
        );

        let progress = create_progress_reporter(tile_count as u64);

        crossbeam::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded::<Bounds2i>(OPTIONS.threads());

            // Spawn worker threads.
            for _ in 0..OPTIONS.threads() {
                let rxc = rx.clone();
                let progress = &progress;
                scope.spawn(move |_| {
                    for block in rxc.iter() {
                        let tile = self.render_tile(block);
                        self.data().film.merge_block(block, &tile);
                        if let Some(callback) = &self.data().callback {
                            callback.update_block(block);
                        }
                        progress.inc(1);
                    }
                });
            }
            drop(rx); // Drop extra rx since we've cloned one for each worker.

            // Send work.
            for block in blocks {
                tx.send(block).unwrap();
            }
        })
        .map_err(|_| String::from("a render worker panicked"))?;

        progress.finish_with_message("Render complete");
        Ok(())
    }

    /// Renders one image tile and returns its pixels in scanline order.
    ///
    /// * `block` - The pixel rectangle of the tile.
    fn render_tile(&self, block: Bounds2i) -> Vec<Color> {
        let data = self.data();
        let scene = &data.scene;
        let camera = scene.camera();

        // Each tile gets an independent sampler instance; seeding per pixel
        // and sample keeps the result independent of tile scheduling.
        let mut sampler = data.sampler.clone_sampler();
        let samples_per_pixel = sampler.samples_per_pixel();
        let norm = 1.0 / samples_per_pixel as Float;

        let mut tile = Vec::with_capacity(block.area());
        for pixel in block {
            let mut sum = Color::BLACK;
            for sample_index in 0..samples_per_pixel {
                sampler.seed(pixel, sample_index);
                let camera_sample = camera.sample_pixel(pixel, &mut *sampler);
                let mut radiance = camera_sample.weight * self.li(&camera_sample.ray, &mut *sampler);

                if radiance.has_nans() {
                    error!(
                        "Not-a-number radiance value returned for pixel ({}, {}), sample {}. \
                         Setting to black.",
                        pixel.x, pixel.y, sample_index
                    );
                    radiance = Color::BLACK;
                } else if radiance.luminance() < -1e-5 {
                    error!(
                        "Negative luminance value, {}, returned for pixel ({}, {}), sample {}. \
                         Setting to black.",
                        radiance.luminance(),
                        pixel.x,
                        pixel.y,
                        sample_index
                    );
                    radiance = Color::BLACK;
                } else if radiance.luminance().is_infinite() {
                    error!(
                        "Infinite luminance value returned for pixel ({}, {}), sample {}. \
                         Setting to black.",
                        pixel.x, pixel.y, sample_index
                    );
                    radiance = Color::BLACK;
                }

                sum += radiance;
            }
            tile.push(sum * norm);
        }

        tile
    }
}

/// All sampling integrators are integrators.
impl<T: SamplingIntegrator> Integrator for T {
    fn execute(&self) -> Result<(), String> {
        self.render()
    }
}

/// Creates the progress bar used during rendering, hidden in quiet mode.
///
/// * `len` - Number of work items.
pub fn create_progress_reporter(len: u64) -> ProgressBar {
    if OPTIONS.quiet {
        ProgressBar::hidden()
    } else {
        let progress_style = ProgressStyle::default_bar()
            .template("{msg:25.cyan.bold} [{bar:40.green/white}] {pos:>5}/{len:5} ({elapsed}|{eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  ");
        let pb = ProgressBar::new(len);
        pb.set_message("Rendering");
        pb.set_style(progress_style);
        pb
    }
}
