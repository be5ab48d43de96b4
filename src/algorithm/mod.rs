/// Stop-or-split decisions for analyzed regions
pub mod policy;
/// Pixel sampling over rectangular regions
pub mod sampler;
/// Depth-first region splitter and its configuration
pub mod splitter;
