//! Ruby loader script generation.
//!
//! The loader defines a module carrying both versions and then requires the
//! bundled JAR, which only works under JRuby. On other Rubies it prints a
//! hint and re-raises the `LoadError`.

use crate::pom::PomRecord;

/// Message printed when the gem is loaded outside JRuby.
pub const JRUBY_REQUIRED: &str = "JAR-based gems require JRuby to load. Please visit www.jruby.org.";

/// Return the loader's file name, `<artifact>.rb`.
#[must_use]
pub fn loader_file_name(record: &PomRecord) -> String {
    format!("{}.rb", record.artifact())
}

/// Return the bundled JAR's file name, `<artifact>-<version>.jar`.
#[must_use]
pub fn jar_file_name(record: &PomRecord) -> String {
    format!("{}-{}.jar", record.artifact(), record.version())
}

/// Render the loader script for `record`.
///
/// # Examples
///
/// ```
/// use maven_gem::gem::loader::loader_source;
/// use maven_gem::pom::parse_pom;
///
/// let record = parse_pom(
///     "<project><groupId>ant</groupId><artifactId>ant</artifactId>\
///      <version>1.6.5</version></project>",
/// )
/// .expect("valid POM");
/// let source = loader_source(&record);
/// assert!(source.starts_with("module Ant\n"));
/// assert!(source.contains("require File.dirname(__FILE__) + '/ant-1.6.5.jar'"));
/// ```
#[must_use]
pub fn loader_source(record: &PomRecord) -> String {
    format!(
        "module {class}\n  \
         VERSION = '{version}'\n  \
         MAVEN_VERSION = '{maven_version}'\n\
         end\n\
         begin\n  \
         require 'java'\n  \
         require File.dirname(__FILE__) + '/{jar}'\n\
         rescue LoadError\n  \
         puts '{JRUBY_REQUIRED}'\n  \
         raise\n\
         end\n",
        class = record.class_name(),
        version = ruby_single_quoted(record.version().as_str()),
        maven_version = ruby_single_quoted(record.raw_version()),
        jar = ruby_single_quoted(&jar_file_name(record)),
    )
}

/// Escape text for a single-quoted Ruby literal.
fn ruby_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
