//! Stop-or-split decisions for analyzed regions

use crate::analysis::statistics::RegionStatistics;
use crate::io::configuration::{DEFAULT_ERROR_THRESHOLD, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::Region;

/// Minimum extents below which a region is always a leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeThresholds {
    /// Regions narrower than this are never split
    pub min_width: u32,
    /// Regions shorter than this are never split
    pub min_height: u32,
}

impl SizeThresholds {
    /// Create validated thresholds
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either threshold is zero
    pub fn new(min_width: u32, min_height: u32) -> Result<Self> {
        let thresholds = Self {
            min_width,
            min_height,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Reject zero thresholds, which would let single pixels keep splitting
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the zero threshold
    pub fn validate(&self) -> Result<()> {
        if self.min_width == 0 {
            return Err(invalid_parameter(
                "min_width",
                &self.min_width,
                &"must be at least 1",
            ));
        }
        if self.min_height == 0 {
            return Err(invalid_parameter(
                "min_height",
                &self.min_height,
                &"must be at least 1",
            ));
        }
        Ok(())
    }

    /// Whether `region` is large enough to be considered for splitting
    pub const fn admits(&self, region: Region) -> bool {
        region.width >= self.min_width && region.height >= self.min_height
    }
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
        }
    }
}

/// Criterion deciding whether a region's colors are uniform enough to stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DivisibilityPolicy {
    /// Stop once the RMS luminance deviation drops strictly below `error_threshold`
    RmsThreshold {
        /// Largest RMS deviation still considered too coarse
        error_threshold: f64,
    },
    /// Stop once the region holds a single distinct RGBA color
    UniformColor,
}

impl DivisibilityPolicy {
    /// RMS policy with a validated threshold
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the threshold is negative or not finite
    pub fn rms(error_threshold: f64) -> Result<Self> {
        let policy = Self::RmsThreshold { error_threshold };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the policy's own parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the RMS threshold is negative or not finite
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::RmsThreshold { error_threshold }
                if !error_threshold.is_finite() || error_threshold < 0.0 =>
            {
                Err(invalid_parameter(
                    "error_threshold",
                    &error_threshold,
                    &"must be a finite, non-negative number",
                ))
            }
            Self::RmsThreshold { .. } | Self::UniformColor => Ok(()),
        }
    }

    /// Decide whether `region` should be split further
    ///
    /// Size thresholds win over color: a region under either minimum extent is a leaf no matter
    /// how varied its pixels are.
    pub fn should_divide(
        &self,
        statistics: &RegionStatistics,
        region: Region,
        thresholds: SizeThresholds,
    ) -> bool {
        if !thresholds.admits(region) {
            return false;
        }

        match *self {
            Self::RmsThreshold { error_threshold } => statistics.rms_deviation >= error_threshold,
            Self::UniformColor => !statistics.single_color,
        }
    }
}

impl Default for DivisibilityPolicy {
    fn default() -> Self {
        Self::RmsThreshold {
            error_threshold: DEFAULT_ERROR_THRESHOLD,
        }
    }
}
