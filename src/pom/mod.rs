//! POM parsing into a typed record.
//!
//! # Sub-modules
//!
//! - [`error`] - Semantic error types for malformed POMs.
//! - [`parser`] - Element dispatch that fills a [`PomRecord`].
//! - [`record`] - The parsed record and dependency types.
//! - [`xml`] - Minimal element tree built from `quick-xml` events.

pub mod error;
pub mod parser;
pub mod record;
pub mod xml;

pub use error::ManifestError;
pub use parser::{parse_pom, parse_pom_bytes};
pub use record::{GemDependency, PomRecord};
