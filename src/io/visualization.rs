//! Frame capture and GIF generation for decomposition visualization

use crate::io::configuration::{MAX_VISUALIZATION_FRAMES, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{DecompositionError, Result};
use crate::io::image::paint_leaf;
use crate::spatial::Leaf;
use image::{Frame, Rgba, RgbaImage};
use std::path::Path;

/// Records finished leaves so the decomposition order can be replayed as an animation
pub struct VisualizationCapture {
    leaves: Vec<Leaf>,
    width: u32,
    height: u32,
}

impl VisualizationCapture {
    /// Create an empty capture for a `width` x `height` image
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            leaves: Vec::new(),
            width,
            height,
        }
    }

    /// Records a leaf in the order it was finalized
    pub fn record_leaf(&mut self, leaf: &Leaf) {
        self.leaves.push(*leaf);
    }

    /// Returns the total number of recorded leaves
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Export the captured leaves as a GIF with automatic frame skipping
    ///
    /// Frames below the viewer-supported delay are merged, and long leaf lists are batched so
    /// the animation never exceeds `MAX_VISUALIZATION_FRAMES` painted frames.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No leaves were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.leaves.is_empty() {
            return Err(DecompositionError::InvalidSourceData {
                reason: "No leaves captured for visualization".to_string(),
            });
        }

        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let viewer_skip = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms.max(1)) as usize
        } else {
            1
        };
        let frame_budget_skip = self.leaves.len().div_ceil(MAX_VISUALIZATION_FRAMES);
        let skip_factor = viewer_skip.max(frame_budget_skip).max(1);

        let frames = self.generate_frames(effective_delay_ms, skip_factor);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DecompositionError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| {
            DecompositionError::FileSystem {
                path: output_path.to_path_buf(),
                operation: "create file",
                source: e,
            }
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| DecompositionError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Mean color of all recorded leaves, used as the empty canvas
    fn background_color(&self) -> [u8; 4] {
        let mut sums = [0u64; 4];
        for leaf in &self.leaves {
            for (sum, channel) in sums.iter_mut().zip(leaf.color) {
                *sum += u64::from(channel);
            }
        }

        let count = self.leaves.len().max(1) as u64;
        sums.map(|sum| (sum / count) as u8)
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let background = Rgba(self.background_color());
        let mut canvas = RgbaImage::from_pixel(self.width, self.height, background);
        let mut frames = vec![Self::frame_from(&canvas, delay_ms)];

        for (painted, leaf) in self.leaves.iter().enumerate() {
            paint_leaf(&mut canvas, leaf);
            if (painted + 1) % skip_factor == 0 {
                frames.push(Self::frame_from(&canvas, delay_ms));
            }
        }

        if self.leaves.len() % skip_factor != 0 {
            frames.push(Self::frame_from(&canvas, delay_ms));
        }

        // Final frame displays longer for better visibility
        frames.push(Self::frame_from(&canvas, delay_ms * 25));

        frames
    }

    fn frame_from(canvas: &RgbaImage, delay_ms: u32) -> Frame {
        Frame::from_parts(
            canvas.clone(),
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        )
    }
}
