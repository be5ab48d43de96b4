//! Adaptive quadtree decomposition of raster images into flat-colored rectangles
//!
//! A region is split at its representative pixel (the sample whose luminance sits closest to
//! the region mean) until the color spread falls under a threshold or the region gets too small.
//! Each leaf keeps the representative color and is rendered as one SVG rectangle.

#![forbid(unsafe_code)]

/// Quadtree splitting: pixel sampling, divisibility policies and the region splitter
pub mod algorithm;
/// Region statistics and partition checks over finished leaf lists
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Regions, leaves and raster access
pub mod spatial;

pub use algorithm::splitter::{DecompositionConfig, QuadSplitter, decompose};
pub use io::error::{DecompositionError, Result};
