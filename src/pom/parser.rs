//! Element dispatch that turns a POM document into a [`PomRecord`].
//!
//! Only the direct children of the root `<project>` element are inspected;
//! inherited values from a `<parent>` POM are not resolved. Unknown elements
//! are ignored and a repeated element overwrites the earlier value.
//! Coordinate and version text is trimmed, since the raw version also
//! addresses the JAR in the repository; description and URL are kept as
//! written.

use super::error::{ManifestError, Result};
use super::record::{GemDependency, PomFields, PomRecord};
use super::xml::{Element, parse_document};
use log::debug;

const PROJECT: &str = "project";
const GROUP_ID: &str = "groupId";
const ARTIFACT_ID: &str = "artifactId";
const VERSION: &str = "version";

/// Position of the developer's display name when no `<name>` child exists.
const AUTHOR_POSITION: usize = 2;

/// Parse POM bytes, which must be UTF-8.
///
/// # Errors
///
/// Returns [`ManifestError::Encoding`] for non-UTF-8 input, otherwise the
/// errors of [`parse_pom`].
pub fn parse_pom_bytes(bytes: &[u8]) -> Result<PomRecord> {
    parse_pom(std::str::from_utf8(bytes)?)
}

/// Parse a POM document into a [`PomRecord`].
///
/// # Errors
///
/// Returns [`ManifestError::Xml`] if the document is not well-formed,
/// [`ManifestError::MalformedManifest`] if `groupId` or `artifactId` is
/// absent, and [`ManifestError::MalformedDependency`] if a dependency lacks
/// a coordinate.
///
/// # Examples
///
/// ```
/// use maven_gem::pom::parse_pom;
///
/// let record = parse_pom(concat!(
///     "<project><groupId>ant</groupId><artifactId>ant</artifactId>",
///     "<version>1.6.5</version></project>",
/// ))
/// .expect("valid POM");
/// assert_eq!(record.gem_name(), "ant.ant");
/// assert_eq!(record.version().as_str(), "1.6.5");
/// ```
pub fn parse_pom(xml: &str) -> Result<PomRecord> {
    let document = parse_document(xml)?;
    record_from_document(&document)
}

/// Build a [`PomRecord`] from an already parsed document.
///
/// # Errors
///
/// See [`parse_pom`].
pub fn record_from_document(document: &Element) -> Result<PomRecord> {
    let mut builder = PomBuilder::default();

    if document.name() == PROJECT {
        for element in document.children() {
            builder.apply(element)?;
        }
    } else {
        debug!("root element <{}> is not <{PROJECT}>", document.name());
    }

    builder.finish()
}

#[derive(Debug, Default)]
struct PomBuilder {
    group: Option<String>,
    artifact: Option<String>,
    raw_version: Option<String>,
    description: Option<String>,
    homepage: Option<String>,
    dependencies: Vec<GemDependency>,
    authors: Vec<String>,
}

impl PomBuilder {
    fn apply(&mut self, element: &Element) -> Result<()> {
        match element.name() {
            ARTIFACT_ID => self.artifact = element.trimmed_text().map(str::to_owned),
            GROUP_ID => self.group = element.trimmed_text().map(str::to_owned),
            VERSION => self.raw_version = Some(element.text().trim().to_owned()),
            "description" => self.description = Some(element.text().to_owned()),
            "url" => self.homepage = Some(element.text().to_owned()),
            "dependencies" => {
                for (index, dependency) in element.children().iter().enumerate() {
                    self.dependencies.push(parse_dependency(index + 1, dependency)?);
                }
            }
            "developers" => {
                self.authors
                    .extend(element.children_named("developer").filter_map(author_name));
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<PomRecord> {
        let group = self.group.ok_or(ManifestError::MalformedManifest { missing: GROUP_ID })?;
        let artifact = self.artifact.ok_or(ManifestError::MalformedManifest {
            missing: ARTIFACT_ID,
        })?;
        debug!(
            "parsed POM {group}:{artifact} with {} dependencies",
            self.dependencies.len()
        );

        Ok(PomRecord::new(PomFields {
            group,
            artifact,
            raw_version: self.raw_version.unwrap_or_default(),
            dependencies: self.dependencies,
            authors: self.authors,
            homepage: self.homepage,
            description: self.description,
        }))
    }
}

fn parse_dependency(position: usize, dependency: &Element) -> Result<GemDependency> {
    let field = |name: &'static str| {
        dependency
            .child_text(name)
            .ok_or(ManifestError::MalformedDependency {
                position,
                missing: name,
            })
    };
    let group = field(GROUP_ID)?;
    let artifact = field(ARTIFACT_ID)?;
    let version = field(VERSION)?;
    Ok(GemDependency::exact(group, artifact, version))
}

/// Read a developer's display name.
///
/// Prefers the `<name>` child and otherwise falls back to the third child
/// element. A developer with neither contributes no author.
fn author_name(developer: &Element) -> Option<String> {
    developer
        .child("name")
        .or_else(|| developer.nth_child(AUTHOR_POSITION))
        .and_then(Element::trimmed_text)
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
