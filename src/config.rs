//! Configuration loader for repository, install command, and output
//! settings.
//!
//! Values are resolved in order, later sources winning:
//!
//! 1. built-in defaults;
//! 2. a TOML file: the `--config` path when given, otherwise
//!    `<config dir>/maven-gem/config.toml` when it exists;
//! 3. the `MAVEN_GEM_BASE_URL` environment variable;
//! 4. command-line flags, applied by the binary.

use crate::install::DEFAULT_GEM_COMMAND;
use crate::maven::{DEFAULT_BASE_URL, MavenRepository};
use directories_next::ProjectDirs;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding the repository base URL.
pub const BASE_URL_ENV: &str = "MAVEN_GEM_BASE_URL";

/// File name looked up in the per-user configuration directory.
pub const CONFIG_FILE: &str = "config.toml";

const APPLICATION: &str = "maven-gem";

/// Errors arising while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {}: {source}", path.display())]
    Read {
        /// The file that was read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`Config`].
    #[error("invalid configuration {}: {reason}", path.display())]
    Parse {
        /// The file that was parsed.
        path: PathBuf,
        /// The parser's message.
        reason: String,
    },
}

/// Settings shared by the CLI and the search hook.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the Maven repository.
    pub maven_base_url: String,
    /// Program and leading arguments used to install gems.
    pub gem_command: Vec<String>,
    /// Whole-request timeout in seconds; unset means no timeout.
    pub timeout_secs: Option<u64>,
    /// Where built gems are written; unset means the current directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maven_base_url: DEFAULT_BASE_URL.to_owned(),
            gem_command: vec![DEFAULT_GEM_COMMAND.to_owned()],
            timeout_secs: None,
            output_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from `explicit` or the per-user default file,
    /// then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if an explicit file is missing or
    /// unreadable, and [`ConfigError::Parse`] for invalid TOML.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit, default_config_path())
    }

    /// Load configuration with an injected default file location.
    ///
    /// A missing default file is not an error; a missing explicit file is.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    ///
    /// # Examples
    ///
    /// ```
    /// use maven_gem::config::Config;
    ///
    /// let config = Config::load_with(None, None).expect("defaults load");
    /// assert_eq!(config.gem_command, ["gem"]);
    /// ```
    pub fn load_with(
        explicit: Option<&Path>,
        default_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_path.filter(|path| path.is_file()),
        };
        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the parser's error for invalid TOML or unknown keys.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("loading configuration from {}", path.display());
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(url) = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
        {
            debug!("{BASE_URL_ENV} overrides the repository base URL");
            self.maven_base_url = url.trim().to_owned();
        }
        self
    }

    /// Return the repository base URL, falling back to the default when the
    /// configured value is blank.
    #[must_use]
    pub fn base_url(&self) -> &str {
        let url = self.maven_base_url.trim();
        if url.is_empty() { DEFAULT_BASE_URL } else { url }
    }

    /// Return the configured repository.
    #[must_use]
    pub fn repository(&self) -> MavenRepository {
        MavenRepository::new(self.base_url())
    }

    /// Return the request timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Return `<config dir>/maven-gem/config.toml`, if the platform has a
/// configuration directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APPLICATION).map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[rstest]
    fn defaults_use_central_and_gem() {
        let config = Config::default();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.gem_command, ["gem"]);
        assert!(config.timeout().is_none());
        assert!(config.output_dir.is_none());
    }

    #[rstest]
    fn deserialises_overrides_from_toml() {
        let source = concat!(
            "maven_base_url = \"https://mirror.example.test/m2/\"\n",
            "gem_command = [\"jruby\", \"-S\", \"gem\"]\n",
            "timeout_secs = 30\n",
            "output_dir = \"gems\"\n",
        );

        let config = Config::from_toml(source).expect("expected configuration to parse");

        assert_eq!(
            config.repository().base_url(),
            "https://mirror.example.test/m2"
        );
        assert_eq!(config.gem_command, ["jruby", "-S", "gem"]);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.output_dir, Some(PathBuf::from("gems")));
    }

    #[rstest]
    fn rejects_unknown_fields() {
        let outcome = Config::from_toml("mirror = \"x\"\n");
        assert!(outcome.is_err(), "expected unknown keys to be rejected");
    }

    #[rstest]
    fn blank_base_url_falls_back_to_default() {
        let config = Config::from_toml("maven_base_url = \"  \"\n").expect("parses");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[rstest]
    fn explicit_file_wins_over_default_location() {
        let dir = TempDir::new().expect("temp dir");
        let explicit = dir.path().join("explicit.toml");
        let default = dir.path().join("default.toml");
        fs::write(&explicit, "timeout_secs = 5\n").expect("write explicit");
        fs::write(&default, "timeout_secs = 9\n").expect("write default");

        let config = temp_env::with_var_unset(BASE_URL_ENV, || {
            Config::load_with(Some(&explicit), Some(default.clone()))
        })
        .expect("loads");

        assert_eq!(config.timeout_secs, Some(5));
    }

    #[rstest]
    fn default_location_is_used_when_present() {
        let dir = TempDir::new().expect("temp dir");
        let default = dir.path().join("config.toml");
        fs::write(&default, "gem_command = [\"jgem\"]\n").expect("write default");

        let config = temp_env::with_var_unset(BASE_URL_ENV, || {
            Config::load_with(None, Some(default.clone()))
        })
        .expect("loads");

        assert_eq!(config.gem_command, ["jgem"]);
    }

    #[rstest]
    fn missing_default_file_yields_defaults() {
        let dir = TempDir::new().expect("temp dir");

        let config = temp_env::with_var_unset(BASE_URL_ENV, || {
            Config::load_with(None, Some(dir.path().join("absent.toml")))
        })
        .expect("loads");

        assert_eq!(config, Config::default());
    }

    #[rstest]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("absent.toml");

        let err = Config::load_with(Some(&path), None).expect_err("explicit file is missing");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[rstest]
    fn invalid_toml_names_the_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("bad.toml");
        fs::write(&path, "timeout_secs = \"soon\"\n").expect("write");

        let err = Config::load_with(Some(&path), None).expect_err("invalid TOML");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[rstest]
    #[case::set(Some("https://env.example.test/m2"), "https://env.example.test/m2")]
    #[case::blank(Some("   "), "https://file.example.test/m2")]
    #[case::unset(None, "https://file.example.test/m2")]
    fn environment_overrides_file(#[case] env: Option<&str>, #[case] expected: &str) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "maven_base_url = \"https://file.example.test/m2\"\n").expect("write");

        let config = temp_env::with_var(BASE_URL_ENV, env, || Config::load_with(Some(&path), None))
            .expect("loads");

        assert_eq!(config.base_url(), expected);
    }
}
