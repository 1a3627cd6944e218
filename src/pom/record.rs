//! Parsed POM record and gem dependency types.

use crate::version::GemVersion;

/// A runtime dependency pinned to one exact version.
///
/// # Examples
///
/// ```
/// use maven_gem::pom::GemDependency;
///
/// let dependency = GemDependency::exact("xerces", "xercesImpl", "2.6.2");
/// assert_eq!(dependency.name(), "xerces.xercesImpl");
/// assert_eq!(dependency.requirement(), "=2.6.2");
/// assert_eq!(dependency.version(), "2.6.2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemDependency {
    name: String,
    requirement: String,
}

impl GemDependency {
    /// Build an exact-match dependency on the gem translated from a Maven
    /// coordinate.
    #[must_use]
    pub fn exact(group: &str, artifact: &str, version: &str) -> Self {
        Self {
            name: gem_name(group, artifact),
            requirement: format!("={version}"),
        }
    }

    /// Return the dependency's gem name (`<group>.<artifact>`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the version constraint, always of the form `=<version>`.
    #[must_use]
    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    /// Return the pinned version without its `=` operator.
    #[must_use]
    pub fn version(&self) -> &str {
        self.requirement
            .strip_prefix('=')
            .unwrap_or(&self.requirement)
    }
}

/// Everything read from a POM that the gem needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomRecord {
    group: String,
    artifact: String,
    raw_version: String,
    version: GemVersion,
    dependencies: Vec<GemDependency>,
    authors: Vec<String>,
    homepage: Option<String>,
    description: Option<String>,
    class_name: String,
}

/// Inputs for [`PomRecord::new`], grouped to keep the constructor readable.
#[derive(Debug, Default)]
pub struct PomFields {
    /// Maven `groupId`.
    pub group: String,
    /// Maven `artifactId`.
    pub artifact: String,
    /// Version exactly as declared.
    pub raw_version: String,
    /// Dependencies in document order.
    pub dependencies: Vec<GemDependency>,
    /// Developer names in document order.
    pub authors: Vec<String>,
    /// Project `url`, verbatim.
    pub homepage: Option<String>,
    /// Project `description`, verbatim.
    pub description: Option<String>,
}

impl PomRecord {
    /// Build a record, deriving the gem version and Ruby class name.
    #[must_use]
    pub fn new(fields: PomFields) -> Self {
        let version = GemVersion::from_maven(&fields.raw_version);
        let class_name = class_name_for(&fields.artifact);
        Self {
            group: fields.group,
            artifact: fields.artifact,
            raw_version: fields.raw_version,
            version,
            dependencies: fields.dependencies,
            authors: fields.authors,
            homepage: fields.homepage,
            description: fields.description,
            class_name,
        }
    }

    /// Return the Maven `groupId`.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Return the Maven `artifactId`.
    #[must_use]
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Return the version exactly as the POM declared it.
    #[must_use]
    pub fn raw_version(&self) -> &str {
        &self.raw_version
    }

    /// Return the normalized gem version.
    #[must_use]
    pub fn version(&self) -> &GemVersion {
        &self.version
    }

    /// Return the dependencies in document order.
    #[must_use]
    pub fn dependencies(&self) -> &[GemDependency] {
        &self.dependencies
    }

    /// Return the author names in document order.
    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Return the project homepage, if declared.
    #[must_use]
    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref()
    }

    /// Return the project description, if declared.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Return the Ruby module name used by the generated loader.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Return the gem name, `<group>.<artifact>`.
    #[must_use]
    pub fn gem_name(&self) -> String {
        gem_name(&self.group, &self.artifact)
    }
}

fn gem_name(group: &str, artifact: &str) -> String {
    format!("{group}.{artifact}")
}

/// Derive a Ruby module name from an artifact id.
///
/// A trailing `.rb` is dropped, the rest is split on `-`, and each segment
/// is capitalized the way Ruby's `String#capitalize` does it: first
/// character upper-cased, the remainder lower-cased.
///
/// # Examples
///
/// ```
/// use maven_gem::pom::record::class_name_for;
///
/// assert_eq!(class_name_for("core-renderer"), "CoreRenderer");
/// assert_eq!(class_name_for("xercesImpl"), "Xercesimpl");
/// ```
#[must_use]
pub fn class_name_for(artifact: &str) -> String {
    artifact
        .strip_suffix(".rb")
        .unwrap_or(artifact)
        .split('-')
        .map(capitalize)
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
