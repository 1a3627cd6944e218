//! Package-manager integration: the search fallback and the `maven`
//! command.
//!
//! A host package manager wires [`MavenFallback`] around its own gem search.
//! When a search for `group:artifact[:version]` finds nothing and the
//! coordinate exists in the Maven repository, the artifact is converted and
//! installed as a side effect; the search result itself is passed through
//! untouched, so the host then picks up the newly installed gem on its own.

use crate::error::Result;
use crate::gem::GemFileName;
use crate::install::{BuildOptions, GemInstaller, install, resolve_source};
use crate::maven::{ArtifactFetcher, MavenCoordinate};
use log::{debug, warn};
use std::io::Write;

/// Name the host registers the conversion command under.
pub const COMMAND_NAME: &str = "maven";

/// A gem search performed by the host package manager.
pub trait SpecSearch {
    /// Whatever the host returns for one matching specification.
    type Match;

    /// Return the specifications matching `name`.
    fn search(&self, name: &str) -> Vec<Self::Match>;
}

impl<F, M> SpecSearch for F
where
    F: Fn(&str) -> Vec<M>,
{
    type Match = M;

    fn search(&self, name: &str) -> Vec<M> {
        self(name)
    }
}

/// The host's command table.
pub trait CommandRegistry {
    /// Make `name` available as a package-manager subcommand.
    fn register_command(&mut self, name: &str);
}

/// Register the `maven` command with the host.
pub fn register_plugin(registry: &mut dyn CommandRegistry) {
    registry.register_command(COMMAND_NAME);
}

/// Decorates a [`SpecSearch`] with a Maven install fallback.
///
/// # Examples
///
/// ```
/// use maven_gem::exec::SystemCommandExecutor;
/// use maven_gem::install::{BuildOptions, CommandGemInstaller};
/// use maven_gem::maven::{HttpFetcher, MavenRepository};
/// use maven_gem::plugin::{MavenFallback, SpecSearch};
///
/// let local = |name: &str| if name == "rake" { vec!["rake-13.0.6"] } else { Vec::new() };
/// let search = MavenFallback::new(
///     local,
///     HttpFetcher::new(MavenRepository::default(), None),
///     CommandGemInstaller::new(SystemCommandExecutor, Vec::new()),
///     BuildOptions::default(),
/// );
/// assert_eq!(search.search("rake"), ["rake-13.0.6"]);
/// // Plain gem names never reach the Maven repository.
/// assert!(search.search("nokogiri").is_empty());
/// ```
pub struct MavenFallback<S, F, I> {
    inner: S,
    fetcher: F,
    installer: I,
    options: BuildOptions,
}

impl<S, F, I> MavenFallback<S, F, I>
where
    S: SpecSearch,
    F: ArtifactFetcher,
    I: GemInstaller,
{
    /// Wrap `inner`, installing through `installer` with `options`.
    pub fn new(inner: S, fetcher: F, installer: I, options: BuildOptions) -> Self {
        Self {
            inner,
            fetcher,
            installer,
            options,
        }
    }

    /// Return the installer used by the fallback.
    pub fn installer(&self) -> &I {
        &self.installer
    }

    fn install_from_maven(&self, name: &str) {
        let Some(coordinate) = MavenCoordinate::parse(name) else {
            return;
        };
        let url = self.fetcher.repository().coordinate_url(
            coordinate.group(),
            coordinate.artifact(),
            coordinate.version(),
        );
        if !self.fetcher.is_reachable(&url) {
            debug!("{coordinate} is not in the Maven repository");
            return;
        }

        let mut stderr = std::io::stderr();
        let outcome = resolve_source(
            Some(coordinate.group()),
            Some(coordinate.artifact()),
            coordinate.version(),
            &self.fetcher,
        )
        .and_then(|source| {
            install(
                &source,
                &self.fetcher,
                &self.installer,
                &self.options,
                &mut stderr,
            )
        });
        match outcome {
            Ok(gem) => debug!("installed {} for {coordinate}", gem.full_name()),
            Err(err) => warn!("could not install {coordinate} from Maven: {err}"),
        }
    }
}

impl<S, F, I> SpecSearch for MavenFallback<S, F, I>
where
    S: SpecSearch,
    F: ArtifactFetcher,
    I: GemInstaller,
{
    type Match = S::Match;

    fn search(&self, name: &str) -> Vec<S::Match> {
        let found = self.inner.search(name);
        if found.is_empty() {
            self.install_from_maven(name);
        }
        found
    }
}

/// The `maven` package-manager command:
/// `maven <GROUP|POM> [ARTIFACT] [VERSION]`.
pub struct MavenCommand<F, I> {
    fetcher: F,
    installer: I,
    options: BuildOptions,
}

impl<F, I> MavenCommand<F, I>
where
    F: ArtifactFetcher,
    I: GemInstaller,
{
    /// Create the command.
    pub fn new(fetcher: F, installer: I, options: BuildOptions) -> Self {
        Self {
            fetcher,
            installer,
            options,
        }
    }

    /// Build and install the gem named by `args`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::MavenGemError::MissingSource`] for empty
    /// arguments, otherwise any error of [`install`].
    pub fn execute(&self, args: &[String], stderr: &mut dyn Write) -> Result<GemFileName> {
        let mut args = args.iter().map(String::as_str);
        let source = resolve_source(args.next(), args.next(), args.next(), &self.fetcher)?;
        install(
            &source,
            &self.fetcher,
            &self.installer,
            &self.options,
            stderr,
        )
    }
}
