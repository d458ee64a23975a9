//! # wirecast Codegen
//!
//! Rust code generation from enum schemas and accessor annotations.
//!
//! This crate provides:
//! - Local enums with converters to and from their external representation
//! - Nil-safe getters and setters with optional lock discipline
//! - Generated test modules for both
//! - Build script integration
//!
//! Generated units are meant to be included from `OUT_DIR`:
//!
//! ```ignore
//! mod proto {
//!     // prost output declaring `proto::TimeUnit`
//! }
//!
//! include!(concat!(env!("OUT_DIR"), "/time_unit.rs"));
//! ```

pub mod builder;
pub mod code;
pub mod config;
pub mod error;
pub mod generator;
pub mod output;
pub mod printer;
pub mod rust;

pub use builder::Builder;
pub use config::{ExternalNaming, GeneratorConfig};
pub use error::CodegenError;
pub use generator::{GENERATED_HEADER, GeneratedUnit, Generator};
pub use output::UnitWriter;

/// Generates enum units from schema text with the default configuration.
///
/// # Arguments
/// * `text` - Schema text containing `enum Title { ... }` blocks
///
/// # Errors
/// Returns `CodegenError` if extraction, validation or rendering fails.
pub fn generate_enums(text: &str) -> Result<Vec<GeneratedUnit>, CodegenError> {
    Generator::default().generate_enums(text)
}

/// Generates enum units from a schema file with the default configuration.
///
/// # Errors
/// Returns `CodegenError` if reading, extraction or rendering fails.
pub fn generate_enums_from_file(path: &std::path::Path) -> Result<Vec<GeneratedUnit>, CodegenError> {
    let text = std::fs::read_to_string(path)?;
    generate_enums(&text)
}
