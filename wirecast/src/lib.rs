//! # wirecast
//!
//! Build-time generation of enum converters and nil-safe accessors.
//!
//! ## Features
//!
//! - **Enum mirrors** - Local `#[repr(i32)]` enums with converters to and
//!   from an external (e.g. protobuf) representation, falling back to the
//!   ordinal-0 value for unknown inputs
//! - **Nil-safe accessors** - Getters and setters taking an optional owner,
//!   with optional lock discipline
//! - **Generated tests** - Table-driven test modules for every unit
//! - **Build integration** - A `build.rs` builder and derive macros
//!
//! ## Quick Start
//!
//! ```ignore
//! // build.rs
//! fn main() -> Result<(), wirecast::codegen::CodegenError> {
//!     wirecast::codegen::Builder::new()
//!         .enum_file("schema/enums.proto")
//!         .accessor_file("src/model.rs")
//!         .build()?;
//!     Ok(())
//! }
//! ```
//!
//! Types read by the build script derive `AccessorFields`, which accepts
//! the `#[accessor]` annotations and generates nothing; the accessors come
//! from the included unit:
//!
//! ```ignore
//! // src/model.rs
//! use wirecast::AccessorFields;
//!
//! #[derive(Default, AccessorFields)]
//! pub struct Account {
//!     #[accessor]
//!     balance: i64,
//! }
//!
//! include!(concat!(env!("OUT_DIR"), "/account_accessor.rs"));
//! ```
//!
//! Without a build script, `#[derive(Accessors)]` expands the same
//! accessors in place:
//!
//! ```ignore
//! use wirecast::prelude::*;
//!
//! #[derive(Default, Accessors)]
//! struct Account {
//!     #[accessor]
//!     balance: i64,
//! }
//!
//! assert_eq!(Account::get_balance(None), 0);
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Enum extraction, validation, annotation loading, classification
//! - [`codegen`] - Code synthesis, output and build-script integration

pub mod prelude;

/// Enum extraction, annotation loading and value classification.
pub mod schema {
    pub use wirecast_schema::*;
}

/// Code synthesis and build-script integration.
pub mod codegen {
    pub use wirecast_codegen::*;
}

pub use wirecast_derive::{AccessorFields, Accessors};
