//! Progress display for batch decomposition runs
//!
//! Files are decomposed one after another, so a single bar follows the current file, measured in
//! pixels covered by finished leaves. Runs over several files add a file counter above it.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static PIXEL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} px")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates the file counter and the per-file pixel bar
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bar: Option<ProgressBar>,
    file_active: bool,
    failed: u64,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bar: None,
            file_active: false,
            failed: 0,
        }
    }

    /// Prepare the display for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Replace the pixel bar with one for `path` covering `total_pixels`
    pub fn start_file(&mut self, path: &Path, total_pixels: u64) {
        if let Some(previous) = self.file_bar.take() {
            self.multi_progress.remove(&previous);
        }

        let bar = ProgressBar::new(total_pixels);
        bar.set_style(PIXEL_STYLE.clone());
        bar.set_prefix(path.file_name().unwrap_or_default().to_string_lossy().to_string());
        self.file_bar = Some(self.multi_progress.add(bar));
        self.file_active = true;
    }

    /// Report pixels covered by finished leaves so far
    pub fn update_coverage(&self, covered_pixels: u64) {
        if let Some(bar) = self.file_bar.as_ref().filter(|_| self.file_active) {
            bar.set_position(covered_pixels);
        }
    }

    /// Mark the current file as fully decomposed
    pub fn complete_file(&mut self) {
        if let Some(bar) = self.active_bar() {
            bar.set_prefix(format!("✓ {}", bar.prefix()));
            bar.finish();
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Mark the current file as failed; it counts as processed but not as covered
    ///
    /// Files failing before [`Self::start_file`] only advance the file counter.
    pub fn fail_file(&mut self) {
        self.failed += 1;
        if let Some(bar) = self.active_bar() {
            bar.set_prefix(format!("✗ {}", bar.prefix()));
            bar.abandon();
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
            batch_bar.set_message(format!("({} failed)", self.failed));
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    // Pixel bar of a file that is still being decomposed, closing it for further updates
    fn active_bar(&mut self) -> Option<&ProgressBar> {
        if !std::mem::replace(&mut self.file_active, false) {
            return None;
        }
        self.file_bar.as_ref()
    }
}
