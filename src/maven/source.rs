//! Where a POM comes from.

use std::fmt;
use std::path::PathBuf;

const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

/// A POM location: a repository coordinate, a URL, or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PomSource {
    /// A fully versioned coordinate resolved against the configured
    /// repository.
    Coordinates {
        /// Maven `groupId`.
        group: String,
        /// Maven `artifactId`.
        artifact: String,
        /// Raw Maven version.
        version: String,
    },
    /// A POM fetched over HTTP(S).
    Url(String),
    /// A POM read from the local filesystem.
    Path(PathBuf),
}

impl PomSource {
    /// Classify a single command-line argument as a URL or a file path.
    ///
    /// # Examples
    ///
    /// ```
    /// use maven_gem::maven::PomSource;
    ///
    /// assert!(matches!(PomSource::detect("https://example.test/a.pom"), PomSource::Url(_)));
    /// assert!(matches!(PomSource::detect("poms/a.pom"), PomSource::Path(_)));
    /// ```
    #[must_use]
    pub fn detect(input: &str) -> Self {
        if is_url(input) {
            Self::Url(input.to_owned())
        } else {
            Self::Path(PathBuf::from(input))
        }
    }

    /// Build a coordinate source.
    #[must_use]
    pub fn coordinates(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self::Coordinates {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates {
                group,
                artifact,
                version,
            } => write!(f, "{group}:{artifact}:{version}"),
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Return whether `input` names an `http://` or `https://` resource.
#[must_use]
pub fn is_url(input: &str) -> bool {
    URL_SCHEMES.iter().any(|scheme| input.starts_with(scheme))
}

/// A `group:artifact[:version]` coordinate as typed into a gem search.
///
/// # Examples
///
/// ```
/// use maven_gem::maven::MavenCoordinate;
///
/// let coordinate = MavenCoordinate::parse("ant:ant:1.6.5").expect("coordinate");
/// assert_eq!(coordinate.group(), "ant");
/// assert_eq!(coordinate.version(), Some("1.6.5"));
/// assert!(MavenCoordinate::parse("rake").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenCoordinate {
    group: String,
    artifact: String,
    version: Option<String>,
}

impl MavenCoordinate {
    /// Parse `group:artifact` or `group:artifact:version`.
    ///
    /// Returns `None` for names without a colon, with blank parts, or with
    /// more than three parts.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let mut parts = name.split(':').map(str::trim);
        let group = parts.next().filter(|part| !part.is_empty())?;
        let artifact = parts.next().filter(|part| !part.is_empty())?;
        let version = match parts.next() {
            Some("") => return None,
            other => other,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            group: group.to_owned(),
            artifact: artifact.to_owned(),
            version: version.map(str::to_owned),
        })
    }

    /// Return the `groupId`.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Return the `artifactId`.
    #[must_use]
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Return the version, if one was given.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl fmt::Display for MavenCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)?;
        if let Some(version) = &self.version {
            write!(f, ":{version}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::http("http://repo.example.test/a.pom", true)]
    #[case::https("https://repo.example.test/a.pom", true)]
    #[case::relative("a.pom", false)]
    #[case::ftp("ftp://repo.example.test/a.pom", false)]
    #[case::uppercase_scheme("HTTP://repo.example.test/a.pom", false)]
    fn classifies_urls(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_url(input), expected);
        assert_eq!(matches!(PomSource::detect(input), PomSource::Url(_)), expected);
    }

    #[test]
    fn displays_coordinates_with_colons() {
        let source = PomSource::coordinates("ant", "ant", "1.6.5");
        assert_eq!(source.to_string(), "ant:ant:1.6.5");
    }

    #[rstest]
    #[case::unversioned("ant:ant", Some(("ant", "ant", None)))]
    #[case::versioned("ant:ant:1.6.5", Some(("ant", "ant", Some("1.6.5"))))]
    #[case::spaced(" ant : ant ", Some(("ant", "ant", None)))]
    #[case::plain_gem_name("rake", None)]
    #[case::blank_artifact("ant:", None)]
    #[case::blank_group(":ant", None)]
    #[case::blank_version("ant:ant:", None)]
    #[case::too_many_parts("a:b:c:d", None)]
    fn parses_search_coordinates(
        #[case] name: &str,
        #[case] expected: Option<(&str, &str, Option<&str>)>,
    ) {
        let parsed = MavenCoordinate::parse(name);
        let actual = parsed
            .as_ref()
            .map(|c| (c.group(), c.artifact(), c.version()));
        assert_eq!(actual, expected);
    }

    #[test]
    fn coordinate_display_round_trips_input() {
        let coordinate = MavenCoordinate::parse("org.jruby:jruby:9.4.0.0").expect("parses");
        assert_eq!(coordinate.to_string(), "org.jruby:jruby:9.4.0.0");
    }
}
