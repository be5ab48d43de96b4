//! Read-only pixel access over decoded images

use crate::io::error::{DecompositionError, Result};
use crate::spatial::Region;
use image::RgbaImage;
use ndarray::Array3;

/// Read access to an RGBA raster
///
/// Decomposition only ever reads the source, so any decoded buffer exposing its dimensions and
/// per-pixel RGBA bytes can be decomposed.
pub trait Raster {
    /// Image dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// RGBA bytes of the pixel at (x, y), or `None` outside the image
    fn rgba_at(&self, x: u32, y: u32) -> Option<[u8; 4]>;

    /// Check that every pixel inside [`Self::dimensions`] can be read
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the buffer cannot be read as RGBA pixels
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Region covering the whole image
    fn bounds(&self) -> Region {
        let (width, height) = self.dimensions();
        Region::whole(width, height)
    }
}

impl Raster for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn rgba_at(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }
}

// Laid out as (height, width, channels); three-channel arrays read as opaque
impl Raster for Array3<u8> {
    fn dimensions(&self) -> (u32, u32) {
        let (height, width, _) = self.dim();
        (
            u32::try_from(width).unwrap_or(u32::MAX),
            u32::try_from(height).unwrap_or(u32::MAX),
        )
    }

    fn validate(&self) -> Result<()> {
        let (height, width, channels) = self.dim();
        if channels < 3 {
            return Err(DecompositionError::InvalidSourceData {
                reason: format!("array has {channels} channels, at least 3 are required"),
            });
        }
        if u32::try_from(width).is_err() || u32::try_from(height).is_err() {
            return Err(DecompositionError::InvalidSourceData {
                reason: format!("array of {width}x{height} pixels exceeds the supported size"),
            });
        }
        Ok(())
    }

    fn rgba_at(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let (row, col) = (y as usize, x as usize);
        let red = *self.get((row, col, 0))?;
        let green = *self.get((row, col, 1))?;
        let blue = *self.get((row, col, 2))?;
        let alpha = self.get((row, col, 3)).copied().unwrap_or(u8::MAX);
        Some([red, green, blue, alpha])
    }
}
