//! Input/output operations and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Defaults and runtime constants
pub mod configuration;
/// Error types and path context
pub mod error;
/// Raster loading and preview export
pub mod image;
/// Progress display for batch runs
pub mod progress;
/// SVG rendering of leaf lists
pub mod svg;
/// Animated GIF of leaves painted in decomposition order
pub mod visualization;
