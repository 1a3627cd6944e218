//! Command-line arguments for `maven-gem`.
//!
//! A bare `SOURCE` builds from a POM file or URL; `build` and `install`
//! also accept Maven coordinates.

use crate::config::Config;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Convert Maven artifacts into JRuby gems.
#[derive(Parser, Debug, Default)]
#[command(name = "maven-gem")]
#[command(version, about)]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = concat!(
    "Convert Maven artifacts into JRuby gems.\n\n",
    "Reads a POM, fetches the matching JAR from a Maven repository, and packs ",
    "both into a `java` platform gem with a generated Ruby loader. Dependencies ",
    "declared in the POM become exact-version gem dependencies named ",
    "<groupId>.<artifactId>.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Build a gem from a local POM:\n",
    "    $ maven-gem ant-1.6.5.pom\n\n",
    "  Build a gem from repository coordinates:\n",
    "    $ maven-gem build ant ant 1.6.5\n\n",
    "  Build and install the latest release:\n",
    "    $ maven-gem install org.xhtmlrenderer core-renderer\n\n",
    "  Use a mirror:\n",
    "    $ maven-gem --maven-base-url https://mirror.example.org/maven2 build ant ant 1.6.5",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// POM file or URL to build (used when no subcommand is given).
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options accepted before or after any subcommand.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Directory for built gems [default: current directory].
    #[arg(short, long, value_name = "DIR", global = true)]
    pub output_dir: Option<Utf8PathBuf>,

    /// Maven repository base URL [default: Maven Central].
    #[arg(long, value_name = "URL", global = true)]
    pub maven_base_url: Option<String>,

    /// Configuration file [default: <config dir>/maven-gem/config.toml].
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Report each step on stderr.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress the final summary (errors still shown).
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build a gem and leave it in the output directory.
    Build(SourceArgs),

    /// Build a gem, install it with the gem command, and delete it.
    Install(SourceArgs),
}

/// Positional arguments naming the POM to convert.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// POM file, POM URL, or (with ARTIFACT) a Maven groupId.
    #[arg(value_name = "GROUP|SOURCE")]
    pub group_or_source: Option<String>,

    /// Maven artifactId.
    #[arg(value_name = "ARTIFACT")]
    pub artifact: Option<String>,

    /// Maven version [default: latest release].
    #[arg(value_name = "VERSION")]
    pub version: Option<String>,
}

/// Whether the gem is kept or installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Build only.
    Build,
    /// Build, install, and delete.
    Install,
}

impl Cli {
    /// Return the requested mode and its source arguments.
    #[must_use]
    pub fn invocation(&self) -> (Mode, SourceArgs) {
        match &self.command {
            Some(Command::Build(args)) => (Mode::Build, args.clone()),
            Some(Command::Install(args)) => (Mode::Install, args.clone()),
            None => (
                Mode::Build,
                SourceArgs {
                    group_or_source: self.source.clone(),
                    ..SourceArgs::default()
                },
            ),
        }
    }

    /// Apply command-line overrides on top of loaded configuration.
    #[must_use]
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(url) = &self.global.maven_base_url {
            config.maven_base_url.clone_from(url);
        }
        if let Some(dir) = &self.global.output_dir {
            config.output_dir = Some(dir.clone().into_std_path_buf());
        }
        config
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
