//! Maven repository layout, POM sources, and artifact retrieval.
//!
//! # Sub-modules
//!
//! - [`repository`] - Remote repository URL derivation (`MavenRepository`).
//! - [`source`] - Classification of user input into a POM source.
//! - [`download`] - Fetcher trait and HTTP implementation.
//! - [`metadata`] - `maven-metadata.xml` latest-version lookup.

pub mod download;
pub mod metadata;
pub mod repository;
pub mod source;

pub use download::{ArtifactFetcher, HttpFetcher, RetrievalError};
pub use metadata::{MetadataError, latest_version_from_metadata, resolve_latest_version};
pub use repository::{DEFAULT_BASE_URL, MavenRepository};
pub use source::{MavenCoordinate, PomSource};
