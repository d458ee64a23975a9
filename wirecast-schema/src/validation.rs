//! Enum descriptor validation.
//!
//! Generated enums declare the ordinal-0 variant with an explicit `= 0`
//! discriminant and every later variant bare, so the generated
//! discriminants only match the wire ordinals when those are exactly
//! `0..N-1`. Validation enforces that before anything is rendered.

use crate::descriptor::EnumDescriptor;
use crate::error::SchemaError;
use std::collections::HashSet;

/// Validates a batch of enum descriptors.
///
/// # Errors
/// Returns `SchemaError` for the first duplicate title or invalid enum.
pub fn validate_enums(enums: &[EnumDescriptor]) -> Result<(), SchemaError> {
    let mut seen_titles = HashSet::new();

    for enum_desc in enums {
        if !seen_titles.insert(enum_desc.title.as_str()) {
            return Err(SchemaError::DuplicateEnum {
                title: enum_desc.title.clone(),
            });
        }
        validate_enum(enum_desc)?;
    }

    Ok(())
}

/// Validates a single enum descriptor.
///
/// # Errors
/// Returns `SchemaError` if the enum is empty, has duplicate identifiers or
/// ordinals, lacks ordinal 0, or has gaps in its ordinals.
pub fn validate_enum(enum_desc: &EnumDescriptor) -> Result<(), SchemaError> {
    let title = &enum_desc.title;

    if enum_desc.values.is_empty() {
        return Err(SchemaError::EmptyEnum {
            title: title.clone(),
        });
    }

    let mut seen_names = HashSet::new();
    let mut seen_locals = HashSet::new();
    for value in &enum_desc.values {
        if !seen_names.insert(value.original.as_str()) {
            return Err(SchemaError::DuplicateIdentifier {
                title: title.clone(),
                identifier: value.original.clone(),
            });
        }
        if !seen_locals.insert(value.local.as_str()) {
            return Err(SchemaError::DuplicateIdentifier {
                title: title.clone(),
                identifier: value.local.clone(),
            });
        }
    }

    let mut ordinals: Vec<i32> = enum_desc.values.iter().map(|v| v.ordinal).collect();
    ordinals.sort_unstable();

    for pair in ordinals.windows(2) {
        if pair[0] == pair[1] {
            return Err(SchemaError::DuplicateOrdinal {
                title: title.clone(),
                ordinal: pair[0],
            });
        }
    }

    if !ordinals.contains(&0) {
        return Err(SchemaError::MissingUnspecified {
            title: title.clone(),
        });
    }

    for (expected, &found) in (0_i32..).zip(&ordinals) {
        if found != expected {
            return Err(SchemaError::NonContiguous {
                title: title.clone(),
                expected,
                found,
            });
        }
    }

    Ok(())
}
