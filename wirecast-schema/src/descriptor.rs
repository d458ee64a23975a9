//! Descriptor types produced by extraction and loading.
//!
//! Descriptors are plain records: the extractor and loader create them,
//! the code generators only read them.

use crate::case::{to_pascal_case, to_snake_case};
use crate::classify::{Defaults, classify};

/// An enumeration extracted from an `enum Title { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    /// Enum title, unique within one input.
    pub title: String,
    /// Values in ascending ordinal order.
    pub values: Vec<ValueDescriptor>,
}

impl EnumDescriptor {
    /// Creates an enum descriptor with the given values.
    pub fn new(title: impl Into<String>, values: Vec<ValueDescriptor>) -> Self {
        Self {
            title: title.into(),
            values,
        }
    }

    /// Returns the ordinal-0 value used as the fallback branch.
    #[must_use]
    pub fn unspecified(&self) -> Option<&ValueDescriptor> {
        self.values.iter().find(|v| v.is_unspecified())
    }

    /// Iterates over every value except the unspecified sentinel.
    pub fn specified(&self) -> impl Iterator<Item = &ValueDescriptor> {
        self.values.iter().filter(|v| !v.is_unspecified())
    }

    /// Sorts values by ascending ordinal. The sort is stable.
    pub fn sort_values(&mut self) {
        self.values.sort_by_key(|v| v.ordinal);
    }
}

/// One value of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDescriptor {
    /// Wire-format name, e.g. `TIME_UNIT_SECOND`.
    pub original: String,
    /// Local name, e.g. `TimeUnitSecond`.
    pub local: String,
    /// Integer tag.
    pub ordinal: i32,
    /// Doc comment lines, comment marker stripped.
    pub doc: Vec<String>,
}

impl ValueDescriptor {
    /// Creates a value, deriving the local name from the original.
    pub fn new(original: impl Into<String>, ordinal: i32, doc: Vec<String>) -> Self {
        let original = original.into();
        Self {
            local: to_pascal_case(&original),
            original,
            ordinal,
            doc,
        }
    }

    /// Returns true for the ordinal-0 sentinel.
    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        self.ordinal == 0
    }
}

/// Structural classification of a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// Owning or borrowed pointer (`Box<T>`, `&T`, `*const T`, `Option<T>`).
    Pointer,
    /// Fixed-size array.
    Array,
    /// Growable or borrowed sequence.
    Slice,
    /// Channel endpoint.
    Channel,
    /// Trait object.
    Interface,
    /// Associative container.
    Map,
    /// Function pointer or closure object.
    Function,
    /// Concrete struct value.
    Struct {
        /// Concrete type path as written.
        type_name: String,
    },
    /// Integer or float primitive.
    Numeric {
        /// Whether the primitive is a float.
        float: bool,
    },
    /// `bool`.
    Boolean,
    /// `String` or `&str`.
    String {
        /// Whether the string is owned.
        owned: bool,
    },
    /// Local alias of another category.
    Named {
        /// Alias name.
        name: String,
        /// Category of the aliased type.
        underlying: Box<TypeCategory>,
    },
    /// Anything the loader cannot classify.
    Unsupported,
}

impl TypeCategory {
    /// Returns true when the zero value of this category is the nil literal.
    #[must_use]
    pub fn is_nil_like(&self) -> bool {
        match self {
            Self::Pointer
            | Self::Array
            | Self::Slice
            | Self::Channel
            | Self::Interface
            | Self::Map
            | Self::Function => true,
            Self::Named { underlying, .. } => underlying.is_nil_like(),
            _ => false,
        }
    }

    /// Returns true for categories whose values are `Copy` primitives.
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        match self {
            Self::Numeric { .. } | Self::Boolean => true,
            Self::Named { underlying, .. } => underlying.is_primitive(),
            _ => false,
        }
    }
}

/// Accessor generation request carried by a field annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Accessor {
    /// Not requested.
    #[default]
    Skip,
    /// Requested with the default name.
    Default,
    /// Requested with an explicit name.
    Custom(String),
}

impl Accessor {
    /// Returns true unless the accessor was not requested.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        !matches!(self, Self::Skip)
    }

    /// Resolves the method name, using `prefix` + snake-cased field for the
    /// default name.
    #[must_use]
    pub fn resolve(&self, prefix: &str, field: &str) -> Option<String> {
        match self {
            Self::Skip => None,
            Self::Default => Some(format!(
                "{prefix}{}",
                to_snake_case(field.trim_start_matches("r#"))
            )),
            Self::Custom(name) => Some(name.clone()),
        }
    }
}

/// An annotated field of an owning type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as declared.
    pub name: String,
    /// Declared type, rendered as source text.
    pub type_text: String,
    /// Structural category of the declared type.
    pub category: TypeCategory,
    /// Whether the declared type is `Option<_>`.
    pub nullable: bool,
    /// Getter request.
    pub getter: Accessor,
    /// Setter request.
    pub setter: Accessor,
    /// Lock field guarding this field, if any.
    pub lock: Option<String>,
    /// Sample value expression for the populated test fixture.
    pub sample: Option<String>,
}

impl FieldDescriptor {
    /// Creates a descriptor requesting both accessors with default names.
    pub fn new(
        name: impl Into<String>,
        type_text: impl Into<String>,
        category: TypeCategory,
        nullable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
            category,
            nullable,
            getter: Accessor::Default,
            setter: Accessor::Default,
            lock: None,
            sample: None,
        }
    }

    /// Returns the getter name, if a getter was requested.
    #[must_use]
    pub fn getter_name(&self, prefix: &str) -> Option<String> {
        self.getter.resolve(prefix, &self.name)
    }

    /// Returns the setter name, if a setter was requested.
    #[must_use]
    pub fn setter_name(&self, prefix: &str) -> Option<String> {
        self.setter.resolve(prefix, &self.name)
    }

    /// Classifies the field's zero and empty values.
    #[must_use]
    pub fn defaults(&self) -> Defaults {
        classify(&self.category)
    }
}

/// An owning type and its annotated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Type name.
    pub name: String,
    /// Type-level lock field, if declared.
    pub lock: Option<String>,
    /// Annotated fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Iterates over fields that have a getter.
    pub fn getters(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.getter.is_requested())
    }

    /// Iterates over fields that have a setter.
    pub fn setters(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.setter.is_requested())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_unit() -> EnumDescriptor {
        EnumDescriptor::new(
            "TimeUnit",
            vec![
                ValueDescriptor::new("TIME_UNIT_MINUTE", 2, Vec::new()),
                ValueDescriptor::new("TIME_UNIT_UNSPECIFIED", 0, Vec::new()),
                ValueDescriptor::new("TIME_UNIT_SECOND", 1, Vec::new()),
            ],
        )
    }

    #[test]
    fn test_value_local_name() {
        let value = ValueDescriptor::new("TIME_UNIT_SECOND", 1, Vec::new());
        assert_eq!(value.local, "TimeUnitSecond");
        assert!(!value.is_unspecified());
    }

    #[test]
    fn test_sort_and_unspecified() {
        let mut desc = time_unit();
        desc.sort_values();
        let ordinals: Vec<i32> = desc.values.iter().map(|v| v.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
        assert_eq!(
            desc.unspecified().map(|v| v.local.as_str()),
            Some("TimeUnitUnspecified")
        );
        assert_eq!(desc.specified().count(), 2);
    }

    #[test]
    fn test_accessor_resolve() {
        assert_eq!(Accessor::Skip.resolve("get_", "count"), None);
        assert_eq!(
            Accessor::Default.resolve("get_", "timeTransition").as_deref(),
            Some("get_time_transition")
        );
        assert_eq!(
            Accessor::Default.resolve("set_", "r#type").as_deref(),
            Some("set_type")
        );
        assert_eq!(
            Accessor::Custom("second_field".into())
                .resolve("get_", "field2")
                .as_deref(),
            Some("second_field")
        );
    }

    #[test]
    fn test_category_predicates() {
        assert!(TypeCategory::Map.is_nil_like());
        assert!(!TypeCategory::Boolean.is_nil_like());
        let alias = TypeCategory::Named {
            name: "Millis".into(),
            underlying: Box::new(TypeCategory::Numeric { float: false }),
        };
        assert!(alias.is_primitive());
        assert!(!alias.is_nil_like());
    }

    #[test]
    fn test_type_descriptor_filters() {
        let mut read_only = FieldDescriptor::new("id", "u64", TypeCategory::Numeric { float: false }, false);
        read_only.setter = Accessor::Skip;
        let both = FieldDescriptor::new("name", "String", TypeCategory::String { owned: true }, false);
        let desc = TypeDescriptor {
            name: "User".into(),
            lock: None,
            fields: vec![read_only, both],
        };
        assert_eq!(desc.getters().count(), 2);
        assert_eq!(desc.setters().count(), 1);
    }
}
