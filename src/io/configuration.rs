//! Decomposition defaults and runtime constants

// Splitting thresholds
/// Regions narrower than this are never split
pub const DEFAULT_MIN_WIDTH: u32 = 6;
/// Regions shorter than this are never split
pub const DEFAULT_MIN_HEIGHT: u32 = 6;
/// RMS luminance deviation under which a region counts as uniform
pub const DEFAULT_ERROR_THRESHOLD: f64 = 8.0;

// Input discovery
/// Image extensions picked up from a target directory (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "tiff"];

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_quad";
/// Extension of the vector output
pub const SVG_EXTENSION: &str = "svg";
/// Extension of the raster preview
pub const PREVIEW_EXTENSION: &str = "png";
/// Suffix of the decomposition animation
pub const VISUALIZATION_SUFFIX: &str = "_visualization.gif";

// Animation settings
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Upper bound on painted frames; leaves are batched per frame beyond it
pub const MAX_VISUALIZATION_FRAMES: usize = 120;
