//! Spatial data structures
//!
//! This module contains:
//! - Axis-aligned regions and finished leaves
//! - Read-only raster access shared by the sampler and the exporters

/// Raster access trait and its implementations for decoded images
pub mod raster;
/// Rectangular regions, quadrant splitting and leaves
pub mod region;

pub use raster::Raster;
pub use region::{Leaf, Region};
