//! Gem file naming policy.
//!
//! Gems built from Maven artifacts are always `java` platform gems named
//! `<group>.<artifact>-<version>-java.gem`.

use crate::pom::PomRecord;
use crate::version::GemVersion;
use std::fmt;

/// The platform every generated gem targets.
pub const PLATFORM: &str = "java";

const GEM_EXTENSION: &str = ".gem";

/// A fully-qualified gem archive name.
///
/// # Examples
///
/// ```
/// use maven_gem::gem::GemFileName;
/// use maven_gem::version::GemVersion;
///
/// let name = GemFileName::new("ant.ant", GemVersion::from_maven("1.6.5"));
/// assert_eq!(name.to_string(), "ant.ant-1.6.5-java.gem");
/// assert_eq!(name.staging_name(), "ant.ant-1.6.5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemFileName {
    gem_name: String,
    version: GemVersion,
}

impl GemFileName {
    /// Create a file name from a gem name and its normalized version.
    #[must_use]
    pub fn new(gem_name: impl Into<String>, version: GemVersion) -> Self {
        Self {
            gem_name: gem_name.into(),
            version,
        }
    }

    /// Derive the file name for a parsed POM.
    #[must_use]
    pub fn for_record(record: &PomRecord) -> Self {
        Self::new(record.gem_name(), record.version().clone())
    }

    /// Return the gem name component.
    #[must_use]
    pub fn gem_name(&self) -> &str {
        &self.gem_name
    }

    /// Return the version component.
    #[must_use]
    pub fn version(&self) -> &GemVersion {
        &self.version
    }

    /// Return `<gem>-<version>`, the stem of the staging directory.
    #[must_use]
    pub fn staging_name(&self) -> String {
        format!("{}-{}", self.gem_name, self.version)
    }

    /// Return `<gem>-<version>-java`, the name RubyGems reports.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}-{PLATFORM}", self.staging_name())
    }

    /// Return the filename as a string without consuming the value.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GemFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{GEM_EXTENSION}", self.full_name())
    }
}
