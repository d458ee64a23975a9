//! # wirecast Schema
//!
//! Descriptor extraction for the wirecast code generator.
//!
//! This crate provides:
//! - Enum block extraction from schema-like text
//! - Enum validation (ordinal uniqueness and contiguity)
//! - Accessor annotation loading from Rust struct declarations
//! - Zero/empty value classification per type category
//! - Identifier casing strategies

pub mod case;
pub mod classify;
pub mod descriptor;
pub mod error;
pub mod loader;
pub mod parser;
pub mod validation;

pub use case::{Casing, to_pascal_case, to_snake_case};
pub use classify::{Defaults, Literal, classify};
pub use descriptor::{
    Accessor, EnumDescriptor, FieldDescriptor, TypeCategory, TypeDescriptor, ValueDescriptor,
};
pub use error::{LoadError, ParseError, SchemaError};
pub use loader::TypeLoader;
pub use parser::parse_enums;
pub use validation::{validate_enum, validate_enums};
