//! Depth-first quadtree splitter
//!
//! Each pending region is sampled, analyzed and either accepted as a leaf or split into four
//! children around its representative pixel. The split point follows where the color actually
//! sits rather than the geometric center, so boundaries track off-center transitions.
//!
//! Pending regions live on an explicit stack. Children are pushed in reverse so they are popped
//! upper-left, lower-left, upper-right, lower-right, which yields the same leaf order as a
//! recursive descent.

use crate::algorithm::policy::{DivisibilityPolicy, SizeThresholds};
use crate::algorithm::sampler::sample;
use crate::analysis::statistics::RegionStatistics;
use crate::io::error::{DecompositionError, Result};
use crate::spatial::{Leaf, Raster, Region};
use log::{debug, trace};

/// Parameters controlling when splitting stops
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DecompositionConfig {
    /// Minimum region extents eligible for splitting
    pub thresholds: SizeThresholds,
    /// Color criterion deciding whether a region is uniform enough
    pub policy: DivisibilityPolicy,
}

impl DecompositionConfig {
    /// Create a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a size threshold is zero or the policy's threshold is invalid
    pub fn new(thresholds: SizeThresholds, policy: DivisibilityPolicy) -> Result<Self> {
        let config = Self { thresholds, policy };
        config.validate()?;
        Ok(config)
    }

    /// Check thresholds and policy parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for the first invalid setting found
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.policy.validate()
    }
}

/// Incremental quadtree decomposition over a borrowed raster
pub struct QuadSplitter<'a, R: Raster + ?Sized> {
    raster: &'a R,
    config: DecompositionConfig,
    pending: Vec<Region>,
    leaves: Vec<Leaf>,
    covered_area: u64,
    regions_analyzed: usize,
    degenerate_splits: usize,
}

impl<'a, R: Raster + ?Sized> QuadSplitter<'a, R> {
    /// Prepare a decomposition of the whole raster
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the raster is empty
    pub fn new(raster: &'a R, config: DecompositionConfig) -> Result<Self> {
        Self::for_region(raster, raster.bounds(), config)
    }

    /// Prepare a decomposition of `region`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The raster cannot be read as RGBA pixels
    /// - The region has zero width or height
    /// - The region does not lie inside the raster
    pub fn for_region(raster: &'a R, region: Region, config: DecompositionConfig) -> Result<Self> {
        config.validate()?;
        raster.validate()?;

        if region.is_empty() {
            return Err(DecompositionError::EmptyRegion { region });
        }

        let (image_width, image_height) = raster.dimensions();
        if !region.fits_within(image_width, image_height) {
            return Err(DecompositionError::RegionOutOfBounds {
                region,
                image_width,
                image_height,
            });
        }

        Ok(Self {
            raster,
            config,
            pending: vec![region],
            leaves: Vec::new(),
            covered_area: 0,
            regions_analyzed: 0,
            degenerate_splits: 0,
        })
    }

    /// Resolve the next pending region into a leaf or four children
    ///
    /// Returns whether regions remain to be processed.
    ///
    /// # Errors
    ///
    /// Returns an error if a region cannot be sampled or analyzed
    pub fn step(&mut self) -> Result<bool> {
        let Some(region) = self.pending.pop() else {
            return Ok(false);
        };

        let samples = sample(self.raster, region)?;
        let statistics = RegionStatistics::analyze(&samples)?;
        self.regions_analyzed += 1;

        let leaf = Leaf::new(region, statistics.representative);
        if !self
            .config
            .policy
            .should_divide(&statistics, region, self.config.thresholds)
        {
            self.accept(leaf);
            return Ok(!self.pending.is_empty());
        }

        let (split_x, split_y) = statistics.split_point();
        let children = region.quadrants(split_x, split_y);

        if children.iter().any(Region::is_empty) {
            debug!("Degenerate split of {region} at ({split_x}, {split_y}), keeping it whole");
            self.degenerate_splits += 1;
            self.accept(leaf);
        } else {
            self.pending.extend(children.iter().rev());
        }

        Ok(!self.pending.is_empty())
    }

    /// Process every pending region and return the leaves
    ///
    /// # Errors
    ///
    /// Returns the first sampling or analysis error encountered
    pub fn run(mut self) -> Result<Vec<Leaf>> {
        while self.step()? {}
        Ok(self.leaves)
    }

    fn accept(&mut self, leaf: Leaf) {
        trace!("Leaf {} color {:?}", leaf.region, leaf.color);
        self.covered_area += leaf.region.area();
        self.leaves.push(leaf);
    }

    /// Leaves finalized so far, in output order
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// Consume the splitter and return the leaves finalized so far
    pub fn into_leaves(self) -> Vec<Leaf> {
        self.leaves
    }

    /// Pixels covered by finalized leaves
    pub const fn covered_area(&self) -> u64 {
        self.covered_area
    }

    /// Regions still waiting to be analyzed
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of regions sampled and analyzed so far
    pub const fn regions_analyzed(&self) -> usize {
        self.regions_analyzed
    }

    /// Splits abandoned because a child would have been empty
    pub const fn degenerate_splits(&self) -> usize {
        self.degenerate_splits
    }

    /// Whether every region has been resolved
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Decompose `region` of `raster` into an ordered list of leaves
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the region is empty or out of bounds
pub fn decompose<R: Raster + ?Sized>(
    raster: &R,
    region: Region,
    config: &DecompositionConfig,
) -> Result<Vec<Leaf>> {
    QuadSplitter::for_region(raster, region, *config)?.run()
}

/// Decompose the whole raster into an ordered list of leaves
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the raster is empty
pub fn decompose_image<R: Raster + ?Sized>(
    raster: &R,
    config: &DecompositionConfig,
) -> Result<Vec<Leaf>> {
    decompose(raster, raster.bounds(), config)
}
