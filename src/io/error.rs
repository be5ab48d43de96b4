//! Error types and path context for decomposition and export operations

use crate::spatial::Region;
use std::fmt;
use std::path::{Path, PathBuf};

const UNKNOWN_PATH: &str = "<unknown>";

/// Main error type for all decomposition operations
#[derive(Debug)]
pub enum DecompositionError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Configuration value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Region extends past the image edges
    RegionOutOfBounds {
        /// Offending region
        region: Region,
        /// Image width in pixels
        image_width: u32,
        /// Image height in pixels
        image_height: u32,
    },

    /// Region with zero width or height submitted for decomposition
    EmptyRegion {
        /// Offending region
        region: Region,
    },

    /// Statistics requested over an empty sample set
    EmptySampleSet,

    /// Leaf list or source data doesn't meet requirements
    InvalidSourceData {
        /// Description of what's wrong with the data
        reason: String,
    },

    /// Failed to save a raster rendering to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for DecompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::RegionOutOfBounds {
                region,
                image_width,
                image_height,
            } => {
                write!(
                    f,
                    "Region {region} lies outside the {image_width}x{image_height} image"
                )
            }
            Self::EmptyRegion { region } => {
                write!(f, "Region {region} has no pixels")
            }
            Self::EmptySampleSet => {
                write!(f, "Cannot compute statistics over an empty sample set")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for DecompositionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for decomposition results
pub type Result<T> = std::result::Result<T, DecompositionError>;

/// Attaches the path an operation worked on to errors created without one
pub trait WithPath<T> {
    /// Replace an `<unknown>` path in load, export and file system errors
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<DecompositionError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors converted without context carry the placeholder
            if let DecompositionError::ImageLoad { path: slot, .. }
            | DecompositionError::ImageExport { path: slot, .. }
            | DecompositionError::FileSystem { path: slot, .. } = &mut error
            {
                if slot.as_os_str() == UNKNOWN_PATH {
                    *slot = path.to_path_buf();
                }
            }
            error
        })
    }
}

impl From<image::ImageError> for DecompositionError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for DecompositionError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> DecompositionError {
    DecompositionError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an error for an unusable target path
pub fn io_error(msg: &str) -> DecompositionError {
    DecompositionError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
