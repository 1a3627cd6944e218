//! Maven-to-gem version normalization.
//!
//! RubyGems only accepts versions made of dot-separated segments, while Maven
//! versions are free-form tokens such as `2.0.0-alpha` or `R8pre2`. The
//! conversion keeps the numeric runs of the Maven version and joins them with
//! dots. It is lossy (`R8pre2` becomes `8.2`) but deterministic, and
//! dependent gems rely on the exact output, so the rules below must not
//! drift:
//!
//! 1. every `alpha` becomes `0`;
//! 2. every `beta` becomes `1`;
//! 3. each run of non-digit characters becomes a single separator;
//! 4. empty segments are dropped;
//! 5. a version with no digits at all becomes `0.0.0`.

use std::fmt;

/// Version used when a Maven version contains no digits.
pub const FALLBACK_VERSION: &str = "0.0.0";

/// A gem version derived from a Maven version string.
///
/// # Examples
///
/// ```
/// use maven_gem::version::GemVersion;
///
/// let version = GemVersion::from_maven("R8pre2");
/// assert_eq!(version.as_str(), "8.2");
/// assert_eq!(GemVersion::from_maven("").as_str(), "0.0.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GemVersion(String);

impl GemVersion {
    /// Normalize a raw Maven version into a gem version.
    #[must_use]
    pub fn from_maven(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for GemVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert a Maven version string into a dotted-numeric gem version.
///
/// Only ASCII digits count as digits; everything else separates segments.
///
/// # Examples
///
/// ```
/// use maven_gem::version::normalize;
///
/// assert_eq!(normalize("1.0-beta2"), "1.0.1.2");
/// assert_eq!(normalize("2.0.0-alpha"), "2.0.0.0");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let substituted = raw.replace("alpha", "0").replace("beta", "1");
    let segments: Vec<&str> = substituted
        .split(|c: char| !c.is_ascii_digit())
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        FALLBACK_VERSION.to_owned()
    } else {
        segments.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty("", "0.0.0")]
    #[case::pre_release_tag("R8pre2", "8.2")]
    #[case::canonical("1.6.5", "1.6.5")]
    #[case::alpha_suffix("2.0.0-alpha", "2.0.0.0")]
    #[case::beta_suffix("1.0-beta2", "1.0.1.2")]
    #[case::only_letters("final", "0.0.0")]
    #[case::only_separators("-.-", "0.0.0")]
    #[case::leading_zeros_kept("1.3.04", "1.3.04")]
    #[case::snapshot("3.1-SNAPSHOT", "3.1")]
    #[case::release_candidate("5.0.0.RC1", "5.0.0.1")]
    #[case::alphabet_soup("alphabeta", "01")]
    #[case::non_ascii_digit("1\u{0663}2", "1.2")]
    fn normalizes_maven_versions(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize(raw), expected);
    }

    #[rstest]
    #[case("")]
    #[case("R8pre2")]
    #[case("1.0-beta2")]
    #[case("v2_final-alpha")]
    #[case("...")]
    fn normalization_is_idempotent(#[case] raw: &str) {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1..2")]
    #[case(".1.")]
    fn output_is_dotted_numeric(#[case] raw: &str) {
        let version = normalize(raw);
        assert!(!version.is_empty());
        assert!(version.split('.').all(|s| !s.is_empty()));
        assert!(version.chars().all(|c| c.is_ascii_digit() || c == '.'));
    }

    #[test]
    fn gem_version_displays_normalized_form() {
        let version = GemVersion::from_maven("1.0-beta2");
        assert_eq!(version.to_string(), "1.0.1.2");
        assert_eq!(version.into_inner(), "1.0.1.2");
    }
}
