//! Pixel sampling over rectangular regions

use crate::analysis::statistics::luminance;
use crate::io::error::{DecompositionError, Result};
use crate::spatial::{Raster, Region};

/// Color and absolute position of a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSample {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
    /// Alpha channel
    pub alpha: u8,
    /// Absolute column
    pub x: u32,
    /// Absolute row
    pub y: u32,
}

impl PixelSample {
    /// Build a sample from RGBA bytes at (x, y)
    pub const fn new(rgba: [u8; 4], x: u32, y: u32) -> Self {
        Self {
            red: rgba[0],
            green: rgba[1],
            blue: rgba[2],
            alpha: rgba[3],
            x,
            y,
        }
    }

    /// Channels packed back into RGBA order
    pub const fn rgba(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Perceptual luminance of the sample (alpha is ignored)
    pub fn luminance(&self) -> f64 {
        luminance(self.rgba())
    }
}

/// Collect one sample per pixel of `region`, row by row
///
/// # Errors
///
/// Returns an error if:
/// - The raster cannot be read as RGBA pixels (`InvalidSourceData`)
/// - The region does not lie inside the raster (`RegionOutOfBounds`)
pub fn sample<R: Raster + ?Sized>(raster: &R, region: Region) -> Result<Vec<PixelSample>> {
    raster.validate()?;
    let (image_width, image_height) = raster.dimensions();
    let out_of_bounds = || DecompositionError::RegionOutOfBounds {
        region,
        image_width,
        image_height,
    };

    if !region.fits_within(image_width, image_height) {
        return Err(out_of_bounds());
    }

    let mut samples = Vec::with_capacity(region.area() as usize);
    for y in region.y..region.y + region.height {
        for x in region.x..region.x + region.width {
            let rgba = raster.rgba_at(x, y).ok_or_else(out_of_bounds)?;
            samples.push(PixelSample::new(rgba, x, y));
        }
    }

    Ok(samples)
}
