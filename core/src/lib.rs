//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod autodiff;
pub mod camera;
pub mod color;
pub mod common;
pub mod emission;
pub mod film;
pub mod geometry;
pub mod instance;
pub mod integrator;
pub mod interaction;
pub mod iterators;
pub mod light;
pub mod medium;
pub mod microfacet;
pub mod portal;
pub mod properties;
pub mod reflection;
pub mod rng;
pub mod sampler;
pub mod sampling;
pub mod scene;
pub mod shape;
pub mod texture;
