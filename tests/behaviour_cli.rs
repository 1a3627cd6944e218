//! Behaviour-driven tests for the `maven-gem` binary.
//!
//! Only paths that fail or finish before any network access are exercised
//! here. Tests use the rstest-bdd v0.5.0 mutable world pattern.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

#[derive(Default)]
struct CliWorld {
    temp_dir: Option<TempDir>,
    config: Option<PathBuf>,
    pom: Option<PathBuf>,
    output: Option<Output>,
}

#[fixture]
fn world() -> CliWorld {
    CliWorld {
        temp_dir: Some(TempDir::new().expect("temp dir")),
        ..CliWorld::default()
    }
}

fn temp_path(world: &CliWorld) -> PathBuf {
    world
        .temp_dir
        .as_ref()
        .expect("temp_dir set")
        .path()
        .to_path_buf()
}

fn run(world: &mut CliWorld, args: &[String]) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_maven-gem"));
    if let Some(config) = &world.config {
        cmd.arg("--config").arg(config);
    }
    cmd.args(args);
    cmd.current_dir(temp_path(world));
    cmd.env_remove("MAVEN_GEM_BASE_URL");

    world.output = Some(cmd.output().expect("failed to run maven-gem"));
}

fn output(world: &CliWorld) -> &Output {
    world.output.as_ref().expect("command was run")
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("an empty configuration file")]
fn given_empty_config(world: &mut CliWorld) {
    let path = temp_path(world).join("config.toml");
    fs::write(&path, "").expect("write config");
    world.config = Some(path);
}

#[given("a local POM file without a groupId")]
fn given_malformed_pom(world: &mut CliWorld) {
    let path = temp_path(world).join("broken.pom");
    fs::write(
        &path,
        "<project><artifactId>ant</artifactId><version>1.6.5</version></project>",
    )
    .expect("write POM");
    world.pom = Some(path);
}

#[when("maven-gem is run with no arguments")]
fn when_run_without_arguments(world: &mut CliWorld) {
    run(world, &[]);
}

#[when("maven-gem is run with \"{args}\"")]
fn when_run_with(world: &mut CliWorld, args: String) {
    let args: Vec<String> = args.split_whitespace().map(str::to_owned).collect();
    run(world, &args);
}

#[when("maven-gem builds the local POM")]
fn when_build_local(world: &mut CliWorld) {
    let pom = world.pom.clone().expect("POM written");
    let out_dir = temp_path(world);
    let args = [
        "build".to_owned(),
        "--output-dir".to_owned(),
        out_dir.to_string_lossy().into_owned(),
        pom.to_string_lossy().into_owned(),
    ];
    run(world, &args);
}

#[then("the command succeeds")]
fn then_succeeds(world: &mut CliWorld) {
    let output = output(world);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[then("the command fails with exit code {code}")]
fn then_fails_with(world: &mut CliWorld, code: i32) {
    assert_eq!(output(world).status.code(), Some(code));
}

#[then("standard error says \"{message}\"")]
fn then_stderr_says(world: &mut CliWorld, message: String) {
    let stderr = String::from_utf8_lossy(&output(world).stderr);
    assert!(stderr.contains(&message), "stderr: {stderr}");
}

#[then("standard output mentions \"{text}\"")]
fn then_stdout_mentions(world: &mut CliWorld, text: String) {
    let stdout = String::from_utf8_lossy(&output(world).stdout);
    assert!(stdout.contains(&text), "stdout: {stdout}");
}

#[then("the output directory holds only the inputs")]
fn then_only_inputs(world: &mut CliWorld) {
    let mut names: Vec<String> = fs::read_dir(temp_path(world))
        .expect("read temp dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["broken.pom", "config.toml"]);
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/cli.feature",
    name = "Running without a source reports usage"
)]
fn scenario_missing_source(world: CliWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "A malformed local POM fails before anything is downloaded"
)]
fn scenario_malformed_local_pom(world: CliWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/cli.feature", name = "Help lists the subcommands")]
fn scenario_help(world: CliWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Verbose and quiet cannot be combined"
)]
fn scenario_verbose_quiet_conflict(world: CliWorld) {
    let _ = world;
}
