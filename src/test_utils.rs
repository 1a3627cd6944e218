//! Shared test utilities for the crate and its integration tests.

use crate::error::{MavenGemError, Result};
use crate::exec::CommandExecutor;
use crate::install::GemInstaller;
use crate::maven::download::{ArtifactFetcher, RetrievalError, decode_text, read_manifest_file};
use crate::maven::{MavenRepository, PomSource};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

/// Apache Ant 1.6.5's POM: a parent, a comment, and two optional
/// dependencies.
pub const SAMPLE_POM: &str = r"<project>
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>org.apache</groupId>
    <artifactId>apache</artifactId>
    <version>4</version>
  </parent>
  <groupId>ant</groupId>
  <artifactId>ant</artifactId>
  <version>1.6.5</version>
  <!-- Fixed per MEV-531 -->
  <dependencies>
    <dependency>
      <groupId>xerces</groupId>
      <artifactId>xercesImpl</artifactId>
      <version>2.6.2</version>
      <optional>true</optional>
    </dependency>
    <dependency>
      <groupId>xml-apis</groupId>
      <artifactId>xml-apis</artifactId>
      <version>1.3.04</version>
      <optional>true</optional>
    </dependency>
  </dependencies>
</project>
";

/// Build the exit status a `gem` run with `code` would report.
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Build the exit status a `gem` run with `code` would report.
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Output of a `gem install` that succeeded silently.
#[must_use]
pub fn success_output() -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Output of a `gem install` that exited 1 after printing `stderr`.
#[must_use]
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// One scripted run of the gem command.
#[derive(Debug)]
pub struct ExpectedCall {
    /// Program name, usually `gem`.
    pub cmd: String,
    /// Arguments the installer must pass.
    pub args: Vec<String>,
    /// Answer handed back to the installer.
    pub result: Result<Output>,
}

impl ExpectedCall {
    /// Expect `cmd args...` and answer with `output`.
    pub fn new<I, S>(cmd: &str, args: I, output: Output) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cmd: cmd.to_owned(),
            args: args.into_iter().map(Into::into).collect(),
            result: Ok(output),
        }
    }
}

/// A `CommandExecutor` that replays predefined responses in order.
///
/// An unexpected or mismatched invocation yields
/// [`MavenGemError::StubMismatch`].
#[derive(Debug, Default)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Script the runs the installer is expected to make, in order.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
        }
    }

    /// Check that every scripted run happened.
    ///
    /// # Panics
    ///
    /// Panics when scripted runs are left over.
    pub fn assert_finished(&self) {
        let remaining = self.expected.borrow();
        assert!(remaining.is_empty(), "{} scripted runs never happened", remaining.len());
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        let Some(call) = self.expected.borrow_mut().pop_front() else {
            return Err(MavenGemError::StubMismatch {
                message: format!("unexpected invocation of {cmd} {}", args.join(" ")),
            });
        };
        if call.cmd != cmd || call.args != args {
            return Err(MavenGemError::StubMismatch {
                message: format!(
                    "expected {} {:?}, got {cmd} {args:?}",
                    call.cmd, call.args
                ),
            });
        }
        call.result
    }
}

/// An `ArtifactFetcher` serving canned bodies keyed by URL.
///
/// Every URL requested through the trait is recorded, so tests can assert
/// what was (and was not) downloaded.
#[derive(Debug, Default)]
pub struct StubFetcher {
    repository: MavenRepository,
    bodies: HashMap<String, Vec<u8>>,
    reachable: HashSet<String>,
    requests: RefCell<Vec<String>>,
}

impl StubFetcher {
    /// Create a fetcher with no bodies for `repository`.
    #[must_use]
    pub fn new(repository: MavenRepository) -> Self {
        Self {
            repository,
            ..Self::default()
        }
    }

    /// Serve `body` at `url`.
    #[must_use]
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Serve `pom` at the repository's POM URL for the coordinate.
    #[must_use]
    pub fn with_pom(self, group: &str, artifact: &str, version: &str, pom: &str) -> Self {
        let url = self.repository.pom_url(group, artifact, version);
        self.with_body(url, pom)
    }

    /// Serve `jar` at the repository's JAR URL for the coordinate.
    #[must_use]
    pub fn with_jar(self, group: &str, artifact: &str, version: &str, jar: &[u8]) -> Self {
        let url = self.repository.jar_url(group, artifact, version);
        self.with_body(url, jar)
    }

    /// Report `url` as reachable even without a body.
    #[must_use]
    pub fn with_reachable(mut self, url: impl Into<String>) -> Self {
        self.reachable.insert(url.into());
        self
    }

    /// Return every URL requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn get(&self, url: &str) -> std::result::Result<Vec<u8>, RetrievalError> {
        self.requests.borrow_mut().push(url.to_owned());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| RetrievalError::NotFound {
                url: url.to_owned(),
            })
    }
}

impl ArtifactFetcher for StubFetcher {
    fn repository(&self) -> &MavenRepository {
        &self.repository
    }

    fn fetch_manifest_bytes(
        &self,
        source: &PomSource,
    ) -> std::result::Result<Vec<u8>, RetrievalError> {
        match source {
            PomSource::Path(path) => read_manifest_file(path),
            PomSource::Url(url) => self.get(url),
            PomSource::Coordinates {
                group,
                artifact,
                version,
            } => self.get(&self.repository.pom_url(group, artifact, version)),
        }
    }

    fn fetch_artifact_bytes(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> std::result::Result<Vec<u8>, RetrievalError> {
        self.get(&self.repository.jar_url(group, artifact, version))
    }

    fn fetch_text(&self, url: &str) -> std::result::Result<String, RetrievalError> {
        decode_text(url, self.get(url)?)
    }

    fn is_reachable(&self, url: &str) -> bool {
        self.requests.borrow_mut().push(url.to_owned());
        self.reachable.contains(url) || self.bodies.contains_key(url)
    }
}

/// A `GemInstaller` that records each gem it is asked to install.
#[derive(Debug, Default)]
pub struct RecordingInstaller {
    installed: RefCell<Vec<PathBuf>>,
    failure: Option<String>,
}

impl RecordingInstaller {
    /// Create an installer that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an installer that records the gem and then fails with
    /// `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            installed: RefCell::default(),
            failure: Some(message.to_owned()),
        }
    }

    /// Return the gems seen so far.
    #[must_use]
    pub fn installed(&self) -> Vec<PathBuf> {
        self.installed.borrow().clone()
    }
}

impl GemInstaller for RecordingInstaller {
    fn install_local(&self, gem: &Path) -> Result<()> {
        if !gem.is_file() {
            return Err(MavenGemError::StubMismatch {
                message: format!("{} does not exist at install time", gem.display()),
            });
        }
        self.installed.borrow_mut().push(gem.to_path_buf());
        match &self.failure {
            Some(message) => Err(MavenGemError::InstallFailed {
                gem: gem.to_path_buf(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}
