//! Error types for building and installing gems.
//!
//! Each stage keeps its own error enum; [`MavenGemError`] wraps them so the
//! CLI and the search hook can report any failure through one type.

use crate::config::ConfigError;
use crate::gem::PackagingError;
use crate::maven::{MetadataError, RetrievalError};
use crate::pom::ManifestError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or installing a gem.
#[derive(Debug, Error)]
pub enum MavenGemError {
    /// The POM or JAR could not be retrieved.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// The POM is unreadable or incomplete.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The latest version of an artifact could not be determined.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// The gem archive could not be assembled.
    #[error(transparent)]
    Packaging(#[from] PackagingError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The gem command rejected the built gem.
    #[error("gem install failed for {}: {message}", gem.display())]
    InstallFailed {
        /// The gem that was being installed.
        gem: PathBuf,
        /// Output of the failed command.
        message: String,
    },

    /// Neither a POM file, URL, nor coordinate was given.
    #[error("specify filename or URL on command line")]
    MissingSource,

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

/// Result type alias using [`MavenGemError`].
pub type Result<T> = std::result::Result<T, MavenGemError>;
