//! Remote Maven repository layout.
//!
//! Artifacts live under `<base>/<group as path>/<artifact>/<version>/`, with
//! the group's dots turned into path separators.

use log::debug;

/// Repository used when no other base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://repo.maven.apache.org/maven2";

const METADATA_FILE: &str = "maven-metadata.xml";

/// A Maven repository identified by its base URL.
///
/// # Examples
///
/// ```
/// use maven_gem::maven::MavenRepository;
///
/// let repository = MavenRepository::new("https://repo.example.test/maven2/");
/// assert_eq!(
///     repository.pom_url("org.apache.ant", "ant", "1.8.2"),
///     "https://repo.example.test/maven2/org/apache/ant/ant/1.8.2/ant-1.8.2.pom"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenRepository {
    base_url: String,
}

impl MavenRepository {
    /// Create a repository rooted at `base_url`; trailing slashes are
    /// dropped.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Return the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Return `<base>/<group path>/<artifact>`.
    #[must_use]
    pub fn artifact_dir_url(&self, group: &str, artifact: &str) -> String {
        format!("{}/{}/{artifact}", self.base_url, group_path(group))
    }

    /// Return `<base>/<group path>/<artifact>/<version>`.
    #[must_use]
    pub fn version_dir_url(&self, group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{version}", self.artifact_dir_url(group, artifact))
    }

    /// Return the directory URL for a coordinate, with or without a version.
    #[must_use]
    pub fn coordinate_url(&self, group: &str, artifact: &str, version: Option<&str>) -> String {
        match version {
            Some(version) => self.version_dir_url(group, artifact, version),
            None => self.artifact_dir_url(group, artifact),
        }
    }

    /// Return the URL of an artifact's POM.
    #[must_use]
    pub fn pom_url(&self, group: &str, artifact: &str, version: &str) -> String {
        self.file_url(group, artifact, version, "pom")
    }

    /// Return the URL of an artifact's JAR.
    #[must_use]
    pub fn jar_url(&self, group: &str, artifact: &str, version: &str) -> String {
        self.file_url(group, artifact, version, "jar")
    }

    /// Return the URL of an artifact's `maven-metadata.xml`.
    #[must_use]
    pub fn metadata_url(&self, group: &str, artifact: &str) -> String {
        format!("{}/{METADATA_FILE}", self.artifact_dir_url(group, artifact))
    }

    fn file_url(&self, group: &str, artifact: &str, version: &str, extension: &str) -> String {
        let url = format!(
            "{}/{artifact}-{version}.{extension}",
            self.version_dir_url(group, artifact, version)
        );
        debug!("derived {extension} URL {url}");
        url
    }
}

impl Default for MavenRepository {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Turn a dotted group id into a repository path (`org.apache` becomes
/// `org/apache`).
#[must_use]
pub fn group_path(group: &str) -> String {
    group.replace('.', "/")
}
