//! Partition checks for leaf lists
//!
//! A decomposition is correct only if its leaves tile the decomposed region exactly: every pixel
//! covered once, nothing outside. The check rasterizes leaves into a bit mask.

use crate::io::error::{DecompositionError, Result};
use crate::spatial::{Leaf, Region};
use bitvec::vec::BitVec;

/// Pixel accounting of a leaf list against the region it should tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoverageReport {
    /// Pixels in the target region
    pub region_area: u64,
    /// Distinct target pixels covered by at least one leaf
    pub covered_pixels: u64,
    /// Leaf pixels landing on an already covered target pixel
    pub overlapping_pixels: u64,
    /// Leaf pixels outside the target region
    pub outside_pixels: u64,
}

impl CoverageReport {
    /// Target pixels no leaf covers
    pub const fn uncovered_pixels(&self) -> u64 {
        self.region_area.saturating_sub(self.covered_pixels)
    }

    /// True when the leaves tile the region with no gaps, overlaps or spill
    pub const fn is_exact_partition(&self) -> bool {
        self.covered_pixels == self.region_area
            && self.overlapping_pixels == 0
            && self.outside_pixels == 0
    }
}

/// Rasterize `leaves` over `region` and count covered, overlapping and stray pixels
pub fn measure_coverage(region: Region, leaves: &[Leaf]) -> CoverageReport {
    let region_width = u64::from(region.width);
    let mut mask = BitVec::<usize>::repeat(false, region.area() as usize);
    let mut report = CoverageReport {
        region_area: region.area(),
        ..CoverageReport::default()
    };

    for leaf in leaves {
        let bounds = leaf.region;
        if !bounds.overlaps(&region) {
            report.outside_pixels += bounds.area();
            continue;
        }

        for y in u64::from(bounds.y)..bounds.bottom() {
            for x in u64::from(bounds.x)..bounds.right() {
                if !region.contains(x, y) {
                    report.outside_pixels += 1;
                    continue;
                }

                let index = (y - u64::from(region.y)) * region_width + (x - u64::from(region.x));
                if let Some(mut covered) = mask.get_mut(index as usize) {
                    if *covered {
                        report.overlapping_pixels += 1;
                    } else {
                        *covered = true;
                        report.covered_pixels += 1;
                    }
                }
            }
        }
    }

    report
}

/// Check that `leaves` tile `region` exactly
///
/// # Errors
///
/// Returns `InvalidSourceData` describing the gaps, overlaps or stray pixels found
pub fn verify_partition(region: Region, leaves: &[Leaf]) -> Result<CoverageReport> {
    let report = measure_coverage(region, leaves);
    if report.is_exact_partition() {
        Ok(report)
    } else {
        Err(DecompositionError::InvalidSourceData {
            reason: format!(
                "leaves do not tile {region}: {} uncovered, {} overlapping, {} outside",
                report.uncovered_pixels(),
                report.overlapping_pixels,
                report.outside_pixels
            ),
        })
    }
}
