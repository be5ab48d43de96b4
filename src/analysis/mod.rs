//! Analysis of sampled regions and finished decompositions

/// Partition checks for leaf lists
pub mod coverage;
/// Luminance statistics and representative pixel selection
pub mod statistics;
