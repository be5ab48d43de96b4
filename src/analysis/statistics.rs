//! Luminance statistics and representative pixel selection for sampled regions

use crate::algorithm::sampler::PixelSample;
use crate::io::error::{DecompositionError, Result};

/// BT.709 luma weights for red, green and blue
pub const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Perceptual luminance of an RGBA color; alpha does not contribute
pub fn luminance(rgba: [u8; 4]) -> f64 {
    LUMA_WEIGHTS[0] * f64::from(rgba[0])
        + LUMA_WEIGHTS[1] * f64::from(rgba[1])
        + LUMA_WEIGHTS[2] * f64::from(rgba[2])
}

/// Color spread of a region and the sample chosen to stand in for it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStatistics {
    /// Arithmetic mean of sample luminances
    pub mean_luminance: f64,
    /// Root-mean-square deviation of luminance from the mean
    pub rms_deviation: f64,
    /// Sample whose luminance lies closest to the mean
    pub representative: PixelSample,
    /// Whether every sample carries the same RGBA value
    pub single_color: bool,
}

impl RegionStatistics {
    /// Compute statistics over a non-empty sample set
    ///
    /// The representative is the sample with the smallest squared luminance deviation from the
    /// mean. Ties go to the earliest sample, so a fixed sample order always yields the same pick.
    ///
    /// # Errors
    ///
    /// Returns `EmptySampleSet` if `samples` is empty
    pub fn analyze(samples: &[PixelSample]) -> Result<Self> {
        let Some(first) = samples.first() else {
            return Err(DecompositionError::EmptySampleSet);
        };

        let luminances: Vec<f64> = samples.iter().map(PixelSample::luminance).collect();
        let count = luminances.len() as f64;
        let mean_luminance = luminances.iter().sum::<f64>() / count;

        let mut squared_deviation_sum = 0.0;
        let mut smallest_deviation = f64::INFINITY;
        let mut representative = *first;
        let mut single_color = true;

        for (sample, &sample_luminance) in samples.iter().zip(&luminances) {
            let deviation = (sample_luminance - mean_luminance).powi(2);
            squared_deviation_sum += deviation;

            // Strict comparison keeps the first of equally close samples
            if deviation < smallest_deviation {
                smallest_deviation = deviation;
                representative = *sample;
            }

            single_color &= sample.rgba() == first.rgba();
        }

        Ok(Self {
            mean_luminance,
            rms_deviation: (squared_deviation_sum / count).sqrt(),
            representative,
            single_color,
        })
    }

    /// Absolute coordinate used as the inner corner when the region is split
    pub const fn split_point(&self) -> (u32, u32) {
        (self.representative.x, self.representative.y)
    }
}
