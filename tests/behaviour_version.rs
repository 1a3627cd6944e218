//! Behaviour-driven tests for Maven version normalization.
//!
//! Tests use the rstest-bdd v0.5.0 mutable world pattern.

use maven_gem::version::{GemVersion, normalize};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

#[derive(Default)]
struct VersionWorld {
    maven_version: Option<String>,
    gem_version: Option<GemVersion>,
}

#[fixture]
fn world() -> VersionWorld {
    VersionWorld::default()
}

fn gem_version(world: &VersionWorld) -> &GemVersion {
    world.gem_version.as_ref().expect("version normalized")
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("the Maven version \"{raw}\"")]
fn given_maven_version(world: &mut VersionWorld, raw: String) {
    world.maven_version = Some(raw);
}

#[when("the version is normalized")]
fn when_normalized(world: &mut VersionWorld) {
    let raw = world.maven_version.as_deref().expect("Maven version set");
    world.gem_version = Some(GemVersion::from_maven(raw));
}

#[then("the gem version is \"{expected}\"")]
fn then_gem_version(world: &mut VersionWorld, expected: String) {
    assert_eq!(gem_version(world).as_str(), expected);
}

#[then("normalizing the gem version again changes nothing")]
fn then_idempotent(world: &mut VersionWorld) {
    let version = gem_version(world).as_str();
    assert_eq!(normalize(version), version);
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/version_normalization.feature",
    name = "Numeric versions pass through unchanged"
)]
fn scenario_numeric_versions(world: VersionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/version_normalization.feature",
    name = "Letters between digit runs are dropped"
)]
fn scenario_letters_dropped(world: VersionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/version_normalization.feature",
    name = "Alpha qualifiers become zero"
)]
fn scenario_alpha_qualifier(world: VersionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/version_normalization.feature",
    name = "Beta qualifiers become one"
)]
fn scenario_beta_qualifier(world: VersionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/version_normalization.feature",
    name = "Versions without digits fall back to the sentinel"
)]
fn scenario_fallback_version(world: VersionWorld) {
    let _ = world;
}
