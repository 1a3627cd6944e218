//! Latest-version lookup through `maven-metadata.xml`.
//!
//! Used when a coordinate is given without a version. The `release` entry is
//! preferred, then `latest`, then the last listed version.

use super::download::{ArtifactFetcher, RetrievalError};
use crate::pom::xml::{Element, XmlError, parse_document};
use log::debug;
use thiserror::Error;

/// Errors arising from repository metadata lookup.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The metadata document could not be retrieved.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// The metadata document is not well-formed XML.
    #[error("malformed repository metadata: {0}")]
    Xml(#[from] XmlError),

    /// The metadata lists no usable version.
    #[error("no versions published for {group}:{artifact}")]
    NoVersions {
        /// Maven `groupId`.
        group: String,
        /// Maven `artifactId`.
        artifact: String,
    },
}

/// Pick the version to install from a `maven-metadata.xml` document.
///
/// Returns `None` when the document lists no version.
///
/// # Errors
///
/// Returns [`XmlError`] if the document is not well-formed.
///
/// # Examples
///
/// ```
/// use maven_gem::maven::latest_version_from_metadata;
///
/// let xml = "<metadata><versioning><latest>1.1-SNAPSHOT</latest>\
///            <release>1.0</release></versioning></metadata>";
/// assert_eq!(latest_version_from_metadata(xml).expect("valid XML").as_deref(), Some("1.0"));
/// ```
pub fn latest_version_from_metadata(xml: &str) -> Result<Option<String>, XmlError> {
    let document = parse_document(xml)?;
    let Some(versioning) = document.child("versioning") else {
        return Ok(None);
    };

    let version = versioning
        .child_text("release")
        .or_else(|| versioning.child_text("latest"))
        .or_else(|| {
            versioning
                .child("versions")?
                .children_named("version")
                .filter_map(Element::trimmed_text)
                .last()
        });
    Ok(version.map(str::to_owned))
}

/// Resolve the newest published version of `group:artifact`.
///
/// # Errors
///
/// Returns [`MetadataError`] if the metadata cannot be fetched or parsed, or
/// lists no versions.
pub fn resolve_latest_version(
    fetcher: &dyn ArtifactFetcher,
    group: &str,
    artifact: &str,
) -> Result<String, MetadataError> {
    let url = fetcher.repository().metadata_url(group, artifact);
    let xml = fetcher.fetch_text(&url)?;
    let version =
        latest_version_from_metadata(&xml)?.ok_or_else(|| MetadataError::NoVersions {
            group: group.to_owned(),
            artifact: artifact.to_owned(),
        })?;
    debug!("resolved {group}:{artifact} to version {version}");
    Ok(version)
}
