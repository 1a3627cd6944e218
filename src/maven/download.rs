//! POM and JAR retrieval.
//!
//! Provides a trait-based abstraction over the transport so the build
//! pipeline and the search hook can be exercised without network access.

use super::repository::MavenRepository;
use super::source::PomSource;
use log::debug;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Trait for retrieving POMs, JARs, and repository metadata.
///
/// # Examples
///
/// ```
/// use maven_gem::maven::{ArtifactFetcher, HttpFetcher, MavenRepository};
///
/// let fetcher = HttpFetcher::new(MavenRepository::default(), None);
/// assert_eq!(fetcher.repository(), &MavenRepository::default());
/// // Use fetcher.fetch_artifact_bytes("ant", "ant", "1.6.5") in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactFetcher {
    /// Return the repository coordinates are resolved against.
    fn repository(&self) -> &MavenRepository;

    /// Retrieve the raw bytes of a POM.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the download fails.
    fn fetch_manifest_bytes(&self, source: &PomSource) -> Result<Vec<u8>, RetrievalError>;

    /// Retrieve the JAR for a coordinate, using the raw Maven version.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the JAR is not published.
    fn fetch_artifact_bytes(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> Result<Vec<u8>, RetrievalError>;

    /// Retrieve a UTF-8 text resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the body is not UTF-8.
    fn fetch_text(&self, url: &str) -> Result<String, RetrievalError>;

    /// Return whether a GET of `url` succeeds after following redirects.
    fn is_reachable(&self, url: &str) -> bool;
}

/// Errors arising from POM, JAR, or metadata retrieval.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested resource was not found (HTTP 404).
    #[error("not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// A local POM could not be read.
    #[error("failed to read {}: {source}", path.display())]
    File {
        /// The path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A text resource was not valid UTF-8.
    #[error("response from {url} is not valid UTF-8")]
    Encoding {
        /// The URL that was requested.
        url: String,
    },
}

/// HTTP-based fetcher using `ureq`.
pub struct HttpFetcher {
    repository: MavenRepository,
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// Create a fetcher for `repository`, applying `timeout` to each whole
    /// request when given.
    #[must_use]
    pub fn new(repository: MavenRepository, timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build();
        Self {
            repository,
            agent: ureq::Agent::new_with_config(config),
        }
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, RetrievalError> {
        debug!("GET {url}");
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut bytes = Vec::new();
        response
            .into_body()
            .as_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| RetrievalError::Http {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        debug!("received {} bytes from {url}", bytes.len());
        Ok(bytes)
    }
}

impl ArtifactFetcher for HttpFetcher {
    fn repository(&self) -> &MavenRepository {
        &self.repository
    }

    fn fetch_manifest_bytes(&self, source: &PomSource) -> Result<Vec<u8>, RetrievalError> {
        match source {
            PomSource::Path(path) => read_manifest_file(path),
            PomSource::Url(url) => self.download(url),
            PomSource::Coordinates {
                group,
                artifact,
                version,
            } => self.download(&self.repository.pom_url(group, artifact, version)),
        }
    }

    fn fetch_artifact_bytes(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> Result<Vec<u8>, RetrievalError> {
        self.download(&self.repository.jar_url(group, artifact, version))
    }

    fn fetch_text(&self, url: &str) -> Result<String, RetrievalError> {
        decode_text(url, self.download(url)?)
    }

    fn is_reachable(&self, url: &str) -> bool {
        match self.agent.get(url).call() {
            Ok(_) => true,
            Err(err) => {
                debug!("{url} is not reachable: {err}");
                false
            }
        }
    }
}

/// Read a POM from the local filesystem.
///
/// # Errors
///
/// Returns [`RetrievalError::File`] if the file cannot be read.
pub fn read_manifest_file(path: &Path) -> Result<Vec<u8>, RetrievalError> {
    std::fs::read(path).map_err(|source| RetrievalError::File {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a downloaded body as UTF-8.
///
/// # Errors
///
/// Returns [`RetrievalError::Encoding`] if the body is not UTF-8.
pub fn decode_text(url: &str, bytes: Vec<u8>) -> Result<String, RetrievalError> {
    String::from_utf8(bytes).map_err(|_| RetrievalError::Encoding {
        url: url.to_owned(),
    })
}

/// Map a ureq error to a [`RetrievalError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> RetrievalError {
    match err {
        ureq::Error::StatusCode(404) => RetrievalError::NotFound {
            url: url.to_owned(),
        },
        other => RetrievalError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
