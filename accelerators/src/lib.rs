//! Accelerators

#[macro_use]
extern crate log;

mod bvh;
mod group;

// Re-export.
pub use bvh::*;
pub use group::*;
