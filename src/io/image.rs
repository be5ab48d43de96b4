//! Raster loading and flat-colored PNG previews of leaf lists

use crate::io::error::{DecompositionError, Result};
use crate::spatial::Leaf;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Decode an image file into an RGBA buffer
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_raster(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| DecompositionError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// Paint every leaf with its representative color onto a `width` x `height` canvas
///
/// Pixels no leaf covers stay fully transparent. Leaf parts outside the canvas are clipped.
pub fn render_leaves(leaves: &[Leaf], width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    for leaf in leaves {
        paint_leaf(&mut img, leaf);
    }
    img
}

pub(crate) fn paint_leaf(img: &mut RgbaImage, leaf: &Leaf) {
    let region = leaf.region;
    let right = region.right().min(u64::from(img.width())) as u32;
    let bottom = region.bottom().min(u64::from(img.height())) as u32;

    for y in region.y..bottom {
        for x in region.x..right {
            img.put_pixel(x, y, Rgba(leaf.color));
        }
    }
}

/// Export the leaves as a PNG preview
///
/// # Errors
///
/// Returns an error if:
/// - The leaf list is empty
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_leaves_as_png(
    leaves: &[Leaf],
    width: u32,
    height: u32,
    output_path: &Path,
) -> Result<()> {
    if leaves.is_empty() {
        return Err(DecompositionError::InvalidSourceData {
            reason: "No leaves to render".to_string(),
        });
    }

    let img = render_leaves(leaves, width, height);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DecompositionError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| DecompositionError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
