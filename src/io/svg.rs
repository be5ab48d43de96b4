//! SVG rendering of leaf lists
//!
//! One filled, stroked `<rect>` per leaf with fill and stroke set to the leaf color, inside a
//! document whose viewport matches the source image. Alpha is not rendered.

use crate::io::error::{DecompositionError, Result};
use crate::spatial::Leaf;
use std::fmt::Write;
use std::path::Path;

const SVG_PROLOGUE: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n",
    "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 20010904//EN\" ",
    "\"http://www.w3.org/TR/2001/REC-SVG-20010904/DTD/svg10.dtd\">\n",
);

/// `#rrggbb` form of a color, alpha dropped
pub fn hex_color(color: [u8; 4]) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Render the leaves as an SVG document with a `width` x `height` viewport
pub fn render_svg(leaves: &[Leaf], width: u32, height: u32) -> String {
    let mut svg = String::with_capacity(SVG_PROLOGUE.len() + 256 + leaves.len() * 96);
    svg.push_str(SVG_PROLOGUE);

    // Writing into a String cannot fail
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         viewBox=\"0 0 {width} {height}\" xml:space=\"preserve\" width=\"{width}\" height=\"{height}\">\n"
    );
    svg.push_str("<g transform=\"scale(1)\">\n");

    for leaf in leaves {
        let (x, y, w, h, ..) = leaf.to_render_tuple();
        let color = hex_color(leaf.color);
        let _ = writeln!(
            svg,
            "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"{color}\" stroke=\"{color}\"/>"
        );
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Render the leaves and write the document to `output_path`
///
/// # Errors
///
/// Returns `FileSystem` if the parent directory cannot be created or the file cannot be written
pub fn write_svg(leaves: &[Leaf], width: u32, height: u32, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DecompositionError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(output_path, render_svg(leaves, width, height)).map_err(|e| {
        DecompositionError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "write svg",
            source: e,
        }
    })
}
