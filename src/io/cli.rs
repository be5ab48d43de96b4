//! Command-line interface for batch vectorization of image files

use crate::algorithm::policy::{DivisibilityPolicy, SizeThresholds};
use crate::algorithm::splitter::{DecompositionConfig, QuadSplitter};
use crate::analysis::coverage::verify_partition;
use crate::io::configuration::{
    DEFAULT_ERROR_THRESHOLD, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH, GIF_FRAME_DELAY_MS,
    OUTPUT_SUFFIX, PREVIEW_EXTENSION, SUPPORTED_EXTENSIONS, SVG_EXTENSION, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, WithPath, io_error};
use crate::io::image::{export_leaves_as_png, load_raster};
use crate::io::progress::ProgressManager;
use crate::io::svg::write_svg;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::Raster;
use clap::{Parser, ValueEnum};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Divisibility criterion selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Stop when the RMS luminance deviation falls under the error threshold
    Rms,
    /// Stop when a region holds a single color
    Uniform,
}

#[derive(Parser)]
#[command(name = "quadtile")]
#[command(
    author,
    version,
    about = "Approximate images with adaptive quadtree rectangles written as SVG"
)]
/// Command-line arguments for the vectorizer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Regions narrower than this are never split
    #[arg(short = 'w', long, default_value_t = DEFAULT_MIN_WIDTH)]
    pub min_width: u32,

    /// Regions shorter than this are never split
    #[arg(short = 'H', long, default_value_t = DEFAULT_MIN_HEIGHT)]
    pub min_height: u32,

    /// RMS luminance deviation under which a region counts as uniform
    #[arg(short, long, default_value_t = DEFAULT_ERROR_THRESHOLD)]
    pub error_threshold: f64,

    /// Criterion deciding when a region stops splitting
    #[arg(long, value_enum, default_value_t = PolicyKind::Rms)]
    pub policy: PolicyKind,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Also write a PNG rendering of the rectangles
    #[arg(short, long)]
    pub preview: bool,

    /// Also write an animated GIF of the decomposition order
    #[arg(short, long)]
    pub visualize: bool,

    /// Check that the rectangles tile the image exactly
    #[arg(long)]
    pub verify: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the validated decomposition configuration from the flags
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a threshold is zero, negative or not finite
    pub fn decomposition_config(&self) -> Result<DecompositionConfig> {
        let thresholds = SizeThresholds::new(self.min_width, self.min_height)?;
        let policy = match self.policy {
            PolicyKind::Rms => DivisibilityPolicy::rms(self.error_threshold)?,
            PolicyKind::Uniform => DivisibilityPolicy::UniformColor,
        };
        DecompositionConfig::new(thresholds, policy)
    }
}

/// Orchestrates batch processing of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// Failures on individual files are logged and do not stop the batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the target cannot be read
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.decomposition_config()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut failures = 0;
        for file in &files {
            if let Err(err) = self.process_file(file, &config) {
                error!("{}: {err}", file.display());
                failures += 1;
                if let Some(ref mut pm) = self.progress_manager {
                    pm.fail_file();
                }
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        if failures > 0 {
            warn!("{failures} of {} files failed", files.len());
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_supported_image(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(io_error("Target file must be a supported image"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target).with_path(&self.cli.target)? {
                let path = entry.with_path(&self.cli.target)?.path();
                if is_supported_image(&path)
                    && !is_own_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(io_error("Target must be an image file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, config: &DecompositionConfig) -> Result<()> {
        let start_time = Instant::now();
        let raster = load_raster(input_path)?;
        let (width, height) = raster.dimensions();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path, raster.bounds().area());
        }

        let mut splitter = QuadSplitter::new(&raster, *config)?;
        while splitter.step()? {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_coverage(splitter.covered_area());
            }
        }
        let degenerate_splits = splitter.degenerate_splits();
        let leaves = splitter.into_leaves();

        info!(
            "{}: Total rects: {} ({degenerate_splits} degenerate splits)",
            input_path.display(),
            leaves.len()
        );

        if self.cli.verify {
            let report = verify_partition(raster.bounds(), &leaves)?;
            info!(
                "{}: partition verified, {} pixels covered",
                input_path.display(),
                report.covered_pixels
            );
        }

        write_svg(&leaves, width, height, &Self::get_output_path(input_path))?;

        if self.cli.preview {
            export_leaves_as_png(
                &leaves,
                width,
                height,
                &Self::get_preview_path(input_path),
            )?;
        }

        if self.cli.visualize {
            let mut capture = VisualizationCapture::new(width, height);
            for leaf in &leaves {
                capture.record_leaf(leaf);
            }
            debug!(
                "{}: animating {} leaves",
                input_path.display(),
                capture.leaf_count()
            );
            capture.export_gif(
                &Self::get_visualization_path(input_path),
                GIF_FRAME_DELAY_MS,
            )?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file();
        }

        info!(
            "{}: finished in {} milliseconds",
            input_path.display(),
            start_time.elapsed().as_millis()
        );

        Ok(())
    }

    /// Path of the SVG written for `input_path`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, &format!("{OUTPUT_SUFFIX}.{SVG_EXTENSION}"))
    }

    /// Path of the PNG preview written for `input_path`
    pub fn get_preview_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, &format!("{OUTPUT_SUFFIX}.{PREVIEW_EXTENSION}"))
    }

    /// Path of the decomposition animation written for `input_path`
    pub fn get_visualization_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, VISUALIZATION_SUFFIX)
    }
}

fn sibling_path(input_path: &Path, suffix: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

// Previews and animations land next to their inputs and must not be picked up as new inputs
fn is_own_output(path: &Path) -> bool {
    let own_suffixes = [
        format!("{OUTPUT_SUFFIX}.{SVG_EXTENSION}"),
        format!("{OUTPUT_SUFFIX}.{PREVIEW_EXTENSION}"),
        VISUALIZATION_SUFFIX.to_string(),
    ];

    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| own_suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())))
}
