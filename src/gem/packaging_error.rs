//! Error types for gem packaging operations.

use super::packaging::AssemblyStep;
use thiserror::Error;

/// Errors arising while assembling a `.gem` archive.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// An I/O operation failed (staging, writing, archiving).
    #[error("I/O error during packaging: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization of the gem specification failed.
    #[error("gem metadata serialization error: {0}")]
    Metadata(#[from] serde_yaml::Error),

    /// A file in the staging `lib/` directory has a non-UTF-8 name.
    #[error("library path is not valid UTF-8: {}", .0.display())]
    InvalidLibraryPath(std::path::PathBuf),

    /// A step observer stopped the build.
    #[error("packaging aborted after {step}: {reason}")]
    Aborted {
        /// The step that had just completed.
        step: AssemblyStep,
        /// Why the observer stopped the build.
        reason: String,
    },
}
