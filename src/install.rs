//! Build and install orchestration.
//!
//! [`build`] runs the whole pipeline for one POM: retrieve it, parse it,
//! fetch the JAR, and assemble the gem. [`install`] additionally hands the
//! gem to the host package manager and deletes it afterwards.

use crate::error::{MavenGemError, Result};
use crate::exec::{CommandExecutor, failure_message};
use crate::gem::{AssemblyStep, GemFileName, PackageParams, assemble_with};
use crate::maven::{ArtifactFetcher, PomSource, resolve_latest_version};
use crate::output::write_stderr_line;
use crate::pom::parse_pom_bytes;
use camino::Utf8Path;
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Command used to install gems when none is configured.
pub const DEFAULT_GEM_COMMAND: &str = "gem";

/// Options shared by [`build`] and [`install`].
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory receiving the staging tree and the finished gem.
    pub output_dir: PathBuf,
    /// Report each step on stderr.
    pub verbose: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            verbose: false,
        }
    }
}

/// A gem produced by [`build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltGem {
    /// Location of the `.gem` file.
    pub path: PathBuf,
    /// The gem's name and version.
    pub name: GemFileName,
}

/// Installs a built gem into the host package manager.
#[cfg_attr(test, mockall::automock)]
pub trait GemInstaller {
    /// Install the gem file at `gem`.
    ///
    /// # Errors
    ///
    /// Returns [`MavenGemError::InstallFailed`] if the package manager
    /// rejects the gem.
    fn install_local(&self, gem: &Path) -> Result<()>;
}

/// Installs gems by running `<gem command> install <path>`.
///
/// # Examples
///
/// ```
/// use maven_gem::exec::SystemCommandExecutor;
/// use maven_gem::install::CommandGemInstaller;
///
/// let installer = CommandGemInstaller::new(SystemCommandExecutor, vec!["jruby".into(), "-S".into(), "gem".into()]);
/// assert_eq!(installer.command(), ["jruby", "-S", "gem"]);
/// ```
#[derive(Debug)]
pub struct CommandGemInstaller<E> {
    executor: E,
    command: Vec<String>,
}

impl<E: CommandExecutor> CommandGemInstaller<E> {
    /// Create an installer running `command` (program then leading
    /// arguments). An empty command falls back to `gem`.
    #[must_use]
    pub fn new(executor: E, command: Vec<String>) -> Self {
        let command = if command.is_empty() {
            vec![DEFAULT_GEM_COMMAND.to_owned()]
        } else {
            command
        };
        Self { executor, command }
    }

    /// Return the configured command prefix.
    #[must_use]
    pub fn command(&self) -> &[String] {
        &self.command
    }
}

impl<E: CommandExecutor> GemInstaller for CommandGemInstaller<E> {
    fn install_local(&self, gem: &Path) -> Result<()> {
        let gem_path = Utf8Path::from_path(gem).ok_or_else(|| MavenGemError::InstallFailed {
            gem: gem.to_path_buf(),
            message: "gem path is not valid UTF-8".to_owned(),
        })?;
        let (program, prefix) = match self.command.split_first() {
            Some((program, prefix)) => (program.as_str(), prefix),
            None => (DEFAULT_GEM_COMMAND, &[][..]),
        };
        let mut args: Vec<&str> = prefix.iter().map(String::as_str).collect();
        args.extend(["install", gem_path.as_str()]);

        let output = self.executor.run(program, &args)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(MavenGemError::InstallFailed {
                gem: gem.to_path_buf(),
                message: failure_message(&output),
            })
        }
    }
}

/// Turn positional arguments into a [`PomSource`].
///
/// With an artifact, the first argument is a `groupId`; a missing version is
/// resolved through the repository's `maven-metadata.xml`. Without one, the
/// first argument is a POM URL or file path.
///
/// # Errors
///
/// Returns [`MavenGemError::MissingSource`] when nothing was given and
/// [`MavenGemError::Metadata`] when the latest version cannot be resolved.
pub fn resolve_source(
    group_or_source: Option<&str>,
    artifact: Option<&str>,
    version: Option<&str>,
    fetcher: &dyn ArtifactFetcher,
) -> Result<PomSource> {
    let first = group_or_source
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(MavenGemError::MissingSource)?;
    let Some(artifact) = artifact.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(PomSource::detect(first));
    };
    let version = match version.map(str::trim).filter(|value| !value.is_empty()) {
        Some(version) => version.to_owned(),
        None => resolve_latest_version(fetcher, first, artifact)?,
    };
    Ok(PomSource::coordinates(first, artifact, version))
}

/// Build a gem from `source` into `options.output_dir`.
///
/// The JAR is only requested once the POM has parsed successfully.
///
/// # Errors
///
/// Returns the retrieval, parse, or packaging error of the failing stage.
/// No gem or staging tree is left behind on failure.
pub fn build(
    source: &PomSource,
    fetcher: &dyn ArtifactFetcher,
    options: &BuildOptions,
    stderr: &mut dyn Write,
) -> Result<BuiltGem> {
    let mut progress = Progress::new(options.verbose, stderr);
    match source {
        PomSource::Path(path) => progress.line(format_args!("Reading POM from {}", path.display())),
        _ => progress.line(format_args!(
            "Retrieving POM from {}",
            manifest_location(source, fetcher)
        )),
    }
    let bytes = fetcher.fetch_manifest_bytes(source)?;

    progress.line("Processing POM");
    let record = parse_pom_bytes(&bytes)?;
    debug!(
        "{}:{} version {} normalizes to {}",
        record.group(),
        record.artifact(),
        record.raw_version(),
        record.version()
    );

    let jar_url = fetcher
        .repository()
        .jar_url(record.group(), record.artifact(), record.raw_version());
    progress.line(format_args!("Fetching {jar_url}"));
    let jar = fetcher.fetch_artifact_bytes(record.group(), record.artifact(), record.raw_version())?;

    let name = GemFileName::for_record(&record);
    let params = PackageParams {
        output_dir: options.output_dir.clone(),
    };
    let path = assemble_with(&record, &jar, &params, |step, path| {
        match step {
            AssemblyStep::Staged => {
                progress.line(format_args!("Using {} work dir", path.display()));
            }
            AssemblyStep::JarWritten
            | AssemblyStep::LoaderWritten
            | AssemblyStep::MetadataWritten => {
                progress.line(format_args!("Writing {}", path.display()));
            }
            AssemblyStep::DataArchived => progress.line(format_args!("Building {name}")),
            AssemblyStep::MetadataCompressed | AssemblyStep::Packed => {}
        }
        Ok(())
    })?;
    progress.line("Done!");
    info!("built {}", path.display());

    Ok(BuiltGem { path, name })
}

/// Build a gem from `source` and install it with `installer`.
///
/// The gem file is deleted afterwards whether or not installation
/// succeeded.
///
/// # Errors
///
/// Returns any [`build`] error, or the installer's error.
pub fn install(
    source: &PomSource,
    fetcher: &dyn ArtifactFetcher,
    installer: &dyn GemInstaller,
    options: &BuildOptions,
    stderr: &mut dyn Write,
) -> Result<GemFileName> {
    let built = build(source, fetcher, options, stderr)?;
    let gem = TempPath::from_path(built.path);
    installer.install_local(&gem)?;
    info!("installed {}", built.name.full_name());
    Ok(built.name)
}

fn manifest_location(source: &PomSource, fetcher: &dyn ArtifactFetcher) -> String {
    match source {
        PomSource::Coordinates {
            group,
            artifact,
            version,
        } => fetcher.repository().pom_url(group, artifact, version),
        other => other.to_string(),
    }
}

/// Verbose-only progress lines.
struct Progress<'a> {
    verbose: bool,
    stderr: &'a mut dyn Write,
}

impl<'a> Progress<'a> {
    fn new(verbose: bool, stderr: &'a mut dyn Write) -> Self {
        Self { verbose, stderr }
    }

    fn line(&mut self, message: impl std::fmt::Display) {
        if self.verbose {
            write_stderr_line(self.stderr, message);
        }
    }
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
