//! Error types for descriptor extraction, validation and loading.

use thiserror::Error;

/// Error type for enum grammar parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A value line does not split into `IDENTIFIER = INTEGER`.
    #[error(
        "malformed value in enum '{title}' at line {line}: expected `IDENTIFIER = INTEGER`, found '{raw}'"
    )]
    MalformedValue {
        /// Enum title.
        title: String,
        /// 1-based line number in the input.
        line: usize,
        /// Raw line content.
        raw: String,
    },

    /// The right side of a value line is not an integer.
    #[error("invalid ordinal '{value}' in enum '{title}' at line {line}: '{raw}'")]
    InvalidOrdinal {
        /// Enum title.
        title: String,
        /// 1-based line number in the input.
        line: usize,
        /// Raw line content.
        raw: String,
        /// Offending ordinal text.
        value: String,
    },

    /// An enum block has no closing brace.
    #[error("enum '{title}' opened at line {line} is never closed")]
    UnterminatedEnum {
        /// Enum title.
        title: String,
        /// 1-based line number of the `enum` keyword.
        line: usize,
    },
}

impl ParseError {
    /// Creates a malformed value error.
    pub fn malformed(title: impl Into<String>, line: usize, raw: impl Into<String>) -> Self {
        Self::MalformedValue {
            title: title.into(),
            line,
            raw: raw.into(),
        }
    }

    /// Returns the 1-based input line the error points at.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedValue { line, .. }
            | Self::InvalidOrdinal { line, .. }
            | Self::UnterminatedEnum { line, .. } => *line,
        }
    }
}

/// Error type for enum descriptor validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two enum blocks share a title.
    #[error("duplicate enum definition: '{title}'")]
    DuplicateEnum {
        /// Enum title.
        title: String,
    },

    /// An enum block declares no values.
    #[error("enum '{title}' declares no values")]
    EmptyEnum {
        /// Enum title.
        title: String,
    },

    /// Two values share an original or local identifier.
    #[error("duplicate identifier '{identifier}' in enum '{title}'")]
    DuplicateIdentifier {
        /// Enum title.
        title: String,
        /// Duplicated identifier.
        identifier: String,
    },

    /// Two values share an ordinal.
    #[error("duplicate ordinal {ordinal} in enum '{title}'")]
    DuplicateOrdinal {
        /// Enum title.
        title: String,
        /// Duplicated ordinal.
        ordinal: i32,
    },

    /// No value has ordinal 0.
    #[error("enum '{title}' has no unspecified value with ordinal 0")]
    MissingUnspecified {
        /// Enum title.
        title: String,
    },

    /// Ordinals are not exactly `0..N-1`.
    #[error("enum '{title}' ordinals are not contiguous: expected {expected}, found {found}")]
    NonContiguous {
        /// Enum title.
        title: String,
        /// Ordinal expected at this position.
        expected: i32,
        /// Ordinal found at this position.
        found: i32,
    },
}

/// Error type for accessor annotation loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source text is not valid Rust.
    #[error("failed to parse source: {0}")]
    Syn(#[from] syn::Error),

    /// Requested type is not declared in the source.
    #[error("type '{name}' not found")]
    TypeNotFound {
        /// Type name.
        name: String,
    },

    /// Type declaration shape cannot carry accessors.
    #[error("type '{name}' is not supported: {reason}")]
    UnsupportedShape {
        /// Type name.
        name: String,
        /// Why the shape is rejected.
        reason: String,
    },

    /// An `#[accessor(...)]` attribute is malformed.
    #[error("invalid accessor annotation on '{owner}': {source}")]
    InvalidAnnotation {
        /// Type or `Type.field` carrying the attribute.
        owner: String,
        /// Underlying attribute parse error.
        source: syn::Error,
    },

    /// A lock reference does not name a field of the owning type.
    #[error("lock field '{lock}' is not a field of '{type_name}'")]
    UnknownLockField {
        /// Owning type name.
        type_name: String,
        /// Referenced lock field.
        lock: String,
    },
}

impl LoadError {
    /// Creates an unsupported shape error.
    pub fn unsupported(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedShape {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Converts the error into a `syn::Error`, keeping the original span
    /// when one exists.
    #[must_use]
    pub fn to_syn_error(&self, span: proc_macro2::Span) -> syn::Error {
        match self {
            Self::Syn(err) | Self::InvalidAnnotation { source: err, .. } => err.clone(),
            other => syn::Error::new(span, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_title_and_line() {
        let err = ParseError::malformed("TimeUnit", 4, "TIME_UNIT_SECOND");
        let message = err.to_string();
        assert!(message.contains("TimeUnit"));
        assert!(message.contains("line 4"));
        assert!(message.contains("TIME_UNIT_SECOND"));
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn test_load_error_to_syn_error_keeps_message() {
        let err = LoadError::UnknownLockField {
            type_name: "Account".to_string(),
            lock: "mu".to_string(),
        };
        let syn_err = err.to_syn_error(proc_macro2::Span::call_site());
        assert!(syn_err.to_string().contains("'mu'"));
    }
}
