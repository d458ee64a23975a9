//! Rust code generation modules.

pub mod accessors;
pub mod enums;
pub mod scaffold;

pub use accessors::AccessorGenerator;
pub use enums::EnumGenerator;
pub use scaffold::ScaffoldGenerator;

use crate::code::Expr;
use wirecast_schema::{FieldDescriptor, Literal, TypeCategory};

/// Renders a classified literal for a field.
///
/// Nullable fields are `Option<_>`, so their nil literal is `None`; a nil
/// literal for any other field falls back to the type's `Default`.
#[must_use]
pub fn literal_expr(literal: &Literal, nullable: bool) -> Expr {
    let text = match literal {
        Literal::Nil if nullable => "None".to_string(),
        Literal::Nil => "Default::default()".to_string(),
        Literal::Zero { float: true } => "0.0".to_string(),
        Literal::Zero { float: false } => "0".to_string(),
        Literal::False => "false".to_string(),
        Literal::EmptyString { owned: true } => "String::new()".to_string(),
        Literal::EmptyString { owned: false } => "\"\"".to_string(),
        Literal::Instance(type_name) => {
            let call = if type_name.contains('<') {
                format!("<{type_name}>::default()")
            } else {
                format!("{type_name}::default()")
            };
            if nullable { format!("Some({call})") } else { call }
        }
    };
    Expr::Raw(text)
}

/// Renders a classified literal for a declared field.
///
/// Raw pointers have no `Default`, so their nil literal is a null pointer.
#[must_use]
pub fn field_literal(literal: &Literal, field: &FieldDescriptor) -> Expr {
    if *literal == Literal::Nil && !field.nullable {
        if let Ok(syn::Type::Ptr(ptr)) = syn::parse_str::<syn::Type>(&field.type_text) {
            let ctor = if ptr.mutability.is_some() { "null_mut" } else { "null" };
            return Expr::Raw(format!("std::ptr::{ctor}()"));
        }
    }
    literal_expr(literal, field.nullable)
}

/// Strips local aliases down to the aliased category.
#[must_use]
pub fn base_category(category: &TypeCategory) -> &TypeCategory {
    match category {
        TypeCategory::Named { underlying, .. } => base_category(underlying),
        other => other,
    }
}

/// Returns true for categories whose Rust types have neither `Default` nor
/// `PartialEq`: closures, trait objects and channel endpoints.
#[must_use]
pub fn is_opaque(category: &TypeCategory) -> bool {
    matches!(
        base_category(category),
        TypeCategory::Function | TypeCategory::Interface | TypeCategory::Channel
    )
}
