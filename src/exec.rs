//! External command execution.
//!
//! The gem installer shells out to the host's `gem` command; tests swap in
//! a stub executor.

use crate::error::{MavenGemError, Result};
use log::debug;
use std::process::{Command, Output};

/// Runs the programs the installer shells out to.
pub trait CommandExecutor {
    /// Run `cmd` with `args` to completion, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns [`MavenGemError::Io`] when the program cannot be spawned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use maven_gem::exec::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let output = SystemCommandExecutor.run("gem", &["--version"])?;
    /// println!("{}", String::from_utf8_lossy(&output.stdout));
    /// # Ok::<(), maven_gem::error::MavenGemError>(())
    /// ```
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output>;
}

/// Spawns real processes with [`std::process::Command`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        debug!("running {cmd} {}", args.join(" "));
        Command::new(cmd)
            .args(args)
            .output()
            .map_err(MavenGemError::from)
    }
}

/// Return the trimmed stderr of a failed command, falling back to stdout and
/// then to the exit status.
#[must_use]
pub fn failure_message(output: &Output) -> String {
    [&output.stderr, &output.stdout]
        .into_iter()
        .map(|stream| String::from_utf8_lossy(stream).trim().to_owned())
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| output.status.to_string())
}
