//! `Gem::Specification` metadata.
//!
//! RubyGems reads the `metadata` member of a gem as a YAML-serialized Ruby
//! object, so each object in the document carries a `!ruby/object:` tag.
//! The document is built as a [`serde_yaml::Value`] tree rather than derived
//! from a struct because the tags are not expressible through `serde`
//! attributes.

use super::loader::{jar_file_name, loader_file_name};
use super::naming::PLATFORM;
use crate::pom::{GemDependency, PomRecord};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};

/// `RubyGems` release the metadata format is written for.
pub const RUBYGEMS_VERSION: &str = "3.4.10";

/// Metadata format revision understood by every `RubyGems` since 1.3.
pub const SPECIFICATION_VERSION: u64 = 4;

const SPECIFICATION_TAG: &str = "ruby/object:Gem::Specification";
const VERSION_TAG: &str = "ruby/object:Gem::Version";
const REQUIREMENT_TAG: &str = "ruby/object:Gem::Requirement";
const DEPENDENCY_TAG: &str = "ruby/object:Gem::Dependency";
const REQUIRE_PATH: &str = "lib";

/// The gem-specification fields derived from a POM.
///
/// # Examples
///
/// ```
/// use maven_gem::gem::GemSpecification;
/// use maven_gem::pom::parse_pom;
///
/// let record = parse_pom(
///     "<project><groupId>ant</groupId><artifactId>ant</artifactId>\
///      <version>1.6.5</version></project>",
/// )
/// .expect("valid POM");
/// let yaml = GemSpecification::from_record(&record).to_yaml().expect("serializes");
/// assert!(yaml.starts_with("--- !ruby/object:Gem::Specification\n"));
/// assert!(yaml.contains("name: ant.ant\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemSpecification {
    name: String,
    version: String,
    authors: Vec<String>,
    dependencies: Vec<GemDependency>,
    description: Option<String>,
    summary: String,
    homepage: Option<String>,
    files: Vec<String>,
}

impl GemSpecification {
    /// Derive the specification for a parsed POM.
    #[must_use]
    pub fn from_record(record: &PomRecord) -> Self {
        let name = record.gem_name();
        let summary = record
            .description()
            .map_or_else(|| name.clone(), str::to_owned);
        Self {
            version: record.version().as_str().to_owned(),
            authors: record.authors().to_vec(),
            dependencies: record.dependencies().to_vec(),
            description: record.description().map(str::to_owned),
            summary,
            homepage: record.homepage().map(str::to_owned),
            files: vec![
                format!("{REQUIRE_PATH}/{}", loader_file_name(record)),
                format!("{REQUIRE_PATH}/{}", jar_file_name(record)),
            ],
            name,
        }
    }

    /// Return the gem name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the files listed in the specification.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Build the tagged YAML value tree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut spec = Mapping::new();
        spec.insert("name".into(), self.name.clone().into());
        spec.insert("version".into(), version_value(&self.version));
        spec.insert("platform".into(), PLATFORM.into());
        spec.insert("authors".into(), strings(&self.authors));
        spec.insert("autorequire".into(), Value::Null);
        spec.insert("bindir".into(), "bin".into());
        spec.insert("cert_chain".into(), Value::Sequence(Vec::new()));
        spec.insert(
            "dependencies".into(),
            Value::Sequence(self.dependencies.iter().map(dependency_value).collect()),
        );
        spec.insert("description".into(), optional(self.description.as_deref()));
        spec.insert("email".into(), Value::Null);
        spec.insert("executables".into(), Value::Sequence(Vec::new()));
        spec.insert("extensions".into(), Value::Sequence(Vec::new()));
        spec.insert("extra_rdoc_files".into(), Value::Sequence(Vec::new()));
        spec.insert("files".into(), strings(&self.files));
        spec.insert("homepage".into(), optional(self.homepage.as_deref()));
        spec.insert("licenses".into(), Value::Sequence(Vec::new()));
        spec.insert("metadata".into(), Value::Mapping(Mapping::new()));
        spec.insert("post_install_message".into(), Value::Null);
        spec.insert("rdoc_options".into(), Value::Sequence(Vec::new()));
        spec.insert("require_paths".into(), strings(&[REQUIRE_PATH]));
        spec.insert("required_ruby_version".into(), any_version_requirement());
        spec.insert(
            "required_rubygems_version".into(),
            any_version_requirement(),
        );
        spec.insert("requirements".into(), Value::Sequence(Vec::new()));
        spec.insert("rubygems_version".into(), RUBYGEMS_VERSION.into());
        spec.insert("signing_key".into(), Value::Null);
        spec.insert(
            "specification_version".into(),
            SPECIFICATION_VERSION.into(),
        );
        spec.insert("summary".into(), self.summary.clone().into());
        spec.insert("test_files".into(), Value::Sequence(Vec::new()));
        tagged(SPECIFICATION_TAG, spec)
    }

    /// Serialize the specification as a YAML document starting with `---`.
    ///
    /// # Errors
    ///
    /// Returns [`serde_yaml::Error`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let body = serde_yaml::to_string(&self.to_value())?;
        let body = body.strip_prefix("---").unwrap_or(&body).trim_start();
        Ok(format!("--- {body}"))
    }
}

fn tagged(tag: &str, fields: Mapping) -> Value {
    Value::Tagged(Box::new(TaggedValue {
        tag: Tag::new(tag),
        value: Value::Mapping(fields),
    }))
}

fn strings<S: AsRef<str>>(items: &[S]) -> Value {
    Value::Sequence(
        items
            .iter()
            .map(|item| Value::String(item.as_ref().to_owned()))
            .collect(),
    )
}

fn optional(text: Option<&str>) -> Value {
    text.map_or(Value::Null, |text| Value::String(text.to_owned()))
}

fn version_value(version: &str) -> Value {
    let mut fields = Mapping::new();
    fields.insert("version".into(), version.into());
    tagged(VERSION_TAG, fields)
}

fn requirement_value(operator: &str, version: &str) -> Value {
    let constraint = Value::Sequence(vec![operator.into(), version_value(version)]);
    let mut fields = Mapping::new();
    fields.insert("requirements".into(), Value::Sequence(vec![constraint]));
    tagged(REQUIREMENT_TAG, fields)
}

fn any_version_requirement() -> Value {
    requirement_value(">=", "0")
}

fn dependency_value(dependency: &GemDependency) -> Value {
    let requirement = requirement_value("=", dependency.version());
    let mut fields = Mapping::new();
    fields.insert("name".into(), dependency.name().into());
    fields.insert("requirement".into(), requirement.clone());
    fields.insert("prerelease".into(), false.into());
    fields.insert("version_requirements".into(), requirement);
    tagged(DEPENDENCY_TAG, fields)
}
