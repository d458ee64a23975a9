//! Zero and empty value classification.
//!
//! The zero value is what an accessor returns for an absent owner; the
//! empty value is what a present but unpopulated owner holds. The two only
//! differ for struct values, whose empty value is a default-constructed
//! instance rather than the nil literal.

use crate::descriptor::TypeCategory;

/// Alias name treated as the universal error capability.
pub const ERROR_ALIAS: &str = "Error";

/// A target-neutral literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// Nil-like literal.
    Nil,
    /// Numeric zero.
    Zero {
        /// Whether the zero is a float.
        float: bool,
    },
    /// Boolean false.
    False,
    /// Empty string.
    EmptyString {
        /// Whether the string is owned.
        owned: bool,
    },
    /// Default-constructed instance of the named type.
    Instance(String),
}

/// Zero and empty literals for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    /// Literal for an absent owner.
    pub zero: Literal,
    /// Literal for a present, unpopulated owner.
    pub empty: Literal,
}

impl Defaults {
    fn same(literal: Literal) -> Self {
        Self {
            zero: literal.clone(),
            empty: literal,
        }
    }
}

/// Classifies a type category. Classification is total: categories with no
/// dedicated rule resolve to the nil literal.
#[must_use]
pub fn classify(category: &TypeCategory) -> Defaults {
    match category {
        TypeCategory::Pointer
        | TypeCategory::Array
        | TypeCategory::Slice
        | TypeCategory::Channel
        | TypeCategory::Interface
        | TypeCategory::Map
        | TypeCategory::Function
        | TypeCategory::Unsupported => Defaults::same(Literal::Nil),
        TypeCategory::Numeric { float } => Defaults::same(Literal::Zero { float: *float }),
        TypeCategory::Boolean => Defaults::same(Literal::False),
        TypeCategory::String { owned } => Defaults::same(Literal::EmptyString { owned: *owned }),
        TypeCategory::Struct { type_name } => Defaults {
            zero: Literal::Nil,
            empty: Literal::Instance(type_name.clone()),
        },
        TypeCategory::Named { name, .. } if name == ERROR_ALIAS => Defaults::same(Literal::Nil),
        TypeCategory::Named { underlying, .. } => classify(underlying),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_categories() {
        for category in [
            TypeCategory::Pointer,
            TypeCategory::Array,
            TypeCategory::Slice,
            TypeCategory::Channel,
            TypeCategory::Interface,
            TypeCategory::Map,
            TypeCategory::Function,
        ] {
            let defaults = classify(&category);
            assert_eq!(defaults.zero, Literal::Nil, "{category:?}");
            assert_eq!(defaults.empty, Literal::Nil, "{category:?}");
        }
    }

    #[test]
    fn test_basic_categories() {
        assert_eq!(
            classify(&TypeCategory::Numeric { float: true }).zero,
            Literal::Zero { float: true }
        );
        assert_eq!(classify(&TypeCategory::Boolean).empty, Literal::False);
        assert_eq!(
            classify(&TypeCategory::String { owned: true }).zero,
            Literal::EmptyString { owned: true }
        );
    }

    #[test]
    fn test_struct_zero_and_empty_differ() {
        let defaults = classify(&TypeCategory::Struct {
            type_name: "Card".into(),
        });
        assert_eq!(defaults.zero, Literal::Nil);
        assert_eq!(defaults.empty, Literal::Instance("Card".into()));
    }

    #[test]
    fn test_named_recurses() {
        let alias = TypeCategory::Named {
            name: "Millis".into(),
            underlying: Box::new(TypeCategory::Numeric { float: false }),
        };
        assert_eq!(classify(&alias).zero, Literal::Zero { float: false });

        let struct_alias = TypeCategory::Named {
            name: "Profile".into(),
            underlying: Box::new(TypeCategory::Struct {
                type_name: "EndUser".into(),
            }),
        };
        assert_eq!(
            classify(&struct_alias).empty,
            Literal::Instance("EndUser".into())
        );
    }

    #[test]
    fn test_error_alias_is_nil() {
        let alias = TypeCategory::Named {
            name: ERROR_ALIAS.into(),
            underlying: Box::new(TypeCategory::String { owned: true }),
        };
        assert_eq!(classify(&alias), Defaults::same(Literal::Nil));
    }

    #[test]
    fn test_unsupported_degrades_to_nil() {
        assert_eq!(classify(&TypeCategory::Unsupported).zero, Literal::Nil);
    }
}
