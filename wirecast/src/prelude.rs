//! Prelude module for convenient imports.
//!
//! ```ignore
//! use wirecast::prelude::*;
//! ```

// Descriptors and loading
pub use wirecast_schema::{
    EnumDescriptor, FieldDescriptor, LoadError, ParseError, SchemaError, TypeCategory,
    TypeDescriptor, TypeLoader, parse_enums, validate_enums,
};

// Generation
pub use wirecast_codegen::{
    Builder, CodegenError, ExternalNaming, GeneratedUnit, Generator, GeneratorConfig, UnitWriter,
};

// Derive
pub use wirecast_derive::{AccessorFields, Accessors};
