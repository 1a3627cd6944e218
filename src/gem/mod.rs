//! Gem staging, loader generation, metadata, and `.gem` packing.
//!
//! # Sub-modules
//!
//! - [`naming`] - Gem file naming policy (`GemFileName`).
//! - [`loader`] - Ruby loader script generation.
//! - [`specification`] - `Gem::Specification` YAML metadata.
//! - [`staging`] - Per-build working directory guard.
//! - [`packaging`] - Assembly of the staging tree into a `.gem` archive.
//! - [`packaging_error`] - Error types for packaging operations.

pub mod loader;
pub mod naming;
pub mod packaging;
pub mod packaging_error;
pub mod specification;
pub mod staging;

pub use naming::GemFileName;
pub use packaging::{AssemblyStep, PackageParams, assemble, assemble_with};
pub use packaging_error::PackagingError;
pub use specification::GemSpecification;
pub use staging::StagingDir;
