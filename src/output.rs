//! Progress output for the CLI and the search hook.

use std::fmt::Display;
use std::io::Write;
use std::path::Path;

/// Write one line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort progress output; ignore write failures.
    }
}

/// Format the summary printed after a gem is built.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use maven_gem::output::built_message;
///
/// let message = built_message(Path::new("out/ant.ant-1.6.5-java.gem"));
/// assert_eq!(message, "Successfully built gem out/ant.ant-1.6.5-java.gem");
/// ```
#[must_use]
pub fn built_message(gem: &Path) -> String {
    format!("Successfully built gem {}", gem.display())
}

/// Format the summary printed after a gem is installed.
#[must_use]
pub fn installed_message(full_name: &str) -> String {
    format!("Successfully installed {full_name}")
}
