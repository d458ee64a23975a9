//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Enum grammar error.
    #[error("enum parse error: {0}")]
    Parse(#[from] wirecast_schema::ParseError),

    /// Enum validation error.
    #[error("schema error: {0}")]
    Schema(#[from] wirecast_schema::SchemaError),

    /// Accessor annotation loading error.
    #[error("load error: {0}")]
    Load(#[from] wirecast_schema::LoadError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be deserialized.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration value is unusable.
    #[error("invalid config '{field}': {message}")]
    InvalidConfig {
        /// Config field name.
        field: String,
        /// Why the value is rejected.
        message: String,
    },

    /// Two wire values of one enum map to the same external variant.
    #[error("enum {enum_name}: '{first}' and '{second}' both map to external variant '{variant}'")]
    DuplicateExternalVariant {
        /// Enum title.
        enum_name: String,
        /// External variant name.
        variant: String,
        /// First wire value.
        first: String,
        /// Colliding wire value.
        second: String,
    },

    /// Internal code generation failure.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an invalid config error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}
