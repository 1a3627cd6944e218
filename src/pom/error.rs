//! Error types for POM parsing.
//!
//! Structural failures name the missing element so the offending POM can be
//! fixed without re-reading the parser.

use super::xml::XmlError;
use thiserror::Error;

/// Errors arising from an unreadable or incomplete POM.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The POM bytes are not valid UTF-8.
    #[error("POM is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The POM is not well-formed XML.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// A required coordinate was not declared directly under `<project>`.
    #[error("malformed POM: missing <{missing}> under <project>")]
    MalformedManifest {
        /// Name of the absent element.
        missing: &'static str,
    },

    /// A dependency entry lacks one of its coordinates.
    #[error("malformed dependency #{position}: missing <{missing}>")]
    MalformedDependency {
        /// One-based position of the dependency within `<dependencies>`.
        position: usize,
        /// Name of the absent element.
        missing: &'static str,
    },
}

/// Result type alias using [`ManifestError`].
pub type Result<T> = std::result::Result<T, ManifestError>;
