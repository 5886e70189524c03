//! Typed error definitions for download_sorter.
//! Names the failure modes the binary reports with a stable `kind`/`code`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SorterError {
    #[error("Source path not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Destination directory does not exist: {0}")]
    DestinationMissing(PathBuf),

    #[error("Permission denied on {path}: {context}")]
    PermissionDenied { path: PathBuf, context: String },

    #[error("Cannot move {src} to {dest}: source and destination are on different filesystems")]
    CrossDevice { src: PathBuf, dest: PathBuf },

    #[error("Cannot watch {path}: {reason}")]
    WatchFailed { path: PathBuf, reason: String },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl SorterError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            SorterError::SourceNotFound(_) => 1,
            SorterError::DestinationMissing(_) => 2,
            SorterError::PermissionDenied { .. } => 3,
            SorterError::CrossDevice { .. } => 4,
            SorterError::WatchFailed { .. } => 5,
            SorterError::Interrupted => 130,
        }
    }

    /// Short machine-friendly label used as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            SorterError::SourceNotFound(_) => "source_not_found",
            SorterError::DestinationMissing(_) => "destination_missing",
            SorterError::PermissionDenied { .. } => "permission_denied",
            SorterError::CrossDevice { .. } => "cross_device",
            SorterError::WatchFailed { .. } => "watch_failed",
            SorterError::Interrupted => "interrupted",
        }
    }
}
