//! Axis-aligned regions and the leaves produced by a decomposition

use crate::algorithm::sampler::PixelSample;
use std::fmt;

/// Axis-aligned rectangle in image pixel units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Horizontal extent
    pub width: u32,
    /// Vertical extent
    pub height: u32,
}

impl Region {
    /// Create a region from its origin and extent
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole `width` x `height` image
    pub const fn whole(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Number of pixels inside the region
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when either extent is zero
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge
    pub const fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Check whether the pixel at (x, y) lies inside the region
    pub const fn contains(&self, x: u64, y: u64) -> bool {
        x >= self.x as u64 && x < self.right() && y >= self.y as u64 && y < self.bottom()
    }

    /// Check whether the region lies inside a `width` x `height` image
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }

    /// Check whether two regions share at least one pixel
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && (self.x as u64) < other.right()
            && (other.x as u64) < self.right()
            && (self.y as u64) < other.bottom()
            && (other.y as u64) < self.bottom()
    }

    /// Four children sharing (`split_x`, `split_y`) as their inner corner
    ///
    /// Children are ordered upper-left, lower-left, upper-right, lower-right. A split point on
    /// the region's top or left edge yields empty children; a split point outside the region
    /// saturates to empty children as well, so callers only need to check [`Self::is_empty`].
    pub const fn quadrants(&self, split_x: u32, split_y: u32) -> [Self; 4] {
        let left_width = split_x.saturating_sub(self.x);
        let top_height = split_y.saturating_sub(self.y);
        let right_width = self.width.saturating_sub(left_width);
        let bottom_height = self.height.saturating_sub(top_height);
        let inner_x = self.x.saturating_add(left_width);
        let inner_y = self.y.saturating_add(top_height);

        [
            Self::new(self.x, self.y, left_width, top_height),
            Self::new(self.x, inner_y, left_width, bottom_height),
            Self::new(inner_x, self.y, right_width, top_height),
            Self::new(inner_x, inner_y, right_width, bottom_height),
        ]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Terminal region with its finalized representative color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf {
    /// Area covered by the leaf
    pub region: Region,
    /// Representative RGBA color
    pub color: [u8; 4],
    /// Absolute pixel coordinate the color was sampled from
    pub source: (u32, u32),
}

impl Leaf {
    /// Attach a representative sample to a region
    pub const fn new(region: Region, representative: PixelSample) -> Self {
        Self {
            region,
            color: representative.rgba(),
            source: (representative.x, representative.y),
        }
    }

    /// Color without the alpha channel
    pub const fn rgb(&self) -> [u8; 3] {
        [self.color[0], self.color[1], self.color[2]]
    }

    /// Flattened `(x, y, width, height, red, green, blue)` form consumed by renderers
    pub const fn to_render_tuple(&self) -> (u32, u32, u32, u32, u8, u8, u8) {
        (
            self.region.x,
            self.region.y,
            self.region.width,
            self.region.height,
            self.color[0],
            self.color[1],
            self.color[2],
        )
    }
}
