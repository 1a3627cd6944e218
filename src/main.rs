//! `maven-gem` CLI entrypoint.
//!
//! Builds a JRuby gem from a Maven POM and, with `install`, hands it to the
//! host's gem command.

use clap::Parser;
use maven_gem::cli::{Cli, Mode};
use maven_gem::config::Config;
use maven_gem::error::Result;
use maven_gem::exec::SystemCommandExecutor;
use maven_gem::install::{BuildOptions, CommandGemInstaller, build, install, resolve_source};
use maven_gem::maven::HttpFetcher;
use maven_gem::output::{built_message, installed_message, write_stderr_line};
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let config_path = cli.global.config.as_deref().map(camino::Utf8Path::as_std_path);
    let config = cli.apply_overrides(Config::load(config_path)?);
    let fetcher = HttpFetcher::new(config.repository(), config.timeout());
    let options = BuildOptions {
        output_dir: config
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(".")),
        verbose: cli.global.verbose,
    };

    let (mode, args) = cli.invocation();
    let source = resolve_source(
        args.group_or_source.as_deref(),
        args.artifact.as_deref(),
        args.version.as_deref(),
        &fetcher,
    )?;

    match mode {
        Mode::Build => {
            let built = build(&source, &fetcher, &options, stderr)?;
            if !cli.global.quiet {
                write_stderr_line(stderr, built_message(&built.path));
            }
        }
        Mode::Install => {
            let installer = CommandGemInstaller::new(SystemCommandExecutor, config.gem_command);
            let name = install(&source, &fetcher, &installer, &options, stderr)?;
            if !cli.global.quiet {
                write_stderr_line(stderr, installed_message(&name.full_name()));
            }
        }
    }
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}
