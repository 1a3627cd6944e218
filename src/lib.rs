//! Maven-to-RubyGems conversion library.
//!
//! This crate turns a Maven POM and its JAR into a `java` platform gem that
//! JRuby can install. It is used by the `maven-gem` CLI binary and can be
//! consumed programmatically, for example from a package-manager plugin that
//! falls back to Maven when a gem search comes up empty.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - TOML configuration and environment overrides
//! - [`error`] - Top-level error type wrapping each stage's failures
//! - [`exec`] - External command execution abstraction
//! - [`gem`] - Staging, loader generation, metadata, and `.gem` packing
//! - [`install`] - Build and install orchestration
//! - [`maven`] - Maven repository layout, sources, and artifact retrieval
//! - [`output`] - Progress output helpers
//! - [`plugin`] - Search fallback hook and command registration
//! - [`pom`] - POM parsing into a typed record
//! - [`version`] - Maven-to-gem version normalization

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod gem;
pub mod install;
pub mod maven;
pub mod output;
pub mod plugin;
pub mod pom;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod version;
