//! Accessor code generation.
//!
//! Accessors are associated functions taking an optional receiver, so an
//! absent owner reads as the field's zero value and ignores writes:
//!
//! ```ignore
//! pub fn get_number(this: Option<&Self>) -> Option<i64> {
//!     let Some(this) = this else {
//!         return None;
//!     };
//!     let _guard = this.mu.lock();
//!     this.number.clone()
//! }
//! ```
//!
//! The guard is released when it goes out of scope, on every path.

use super::{field_literal, is_opaque};
use crate::code::{Block, Expr, Function, ImplBlock, Param, Stmt};
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use std::collections::HashSet;
use wirecast_schema::{FieldDescriptor, TypeDescriptor};

/// Name of the value parameter of every generated setter.
pub const SETTER_VALUE: &str = "val";

/// Generator for getter and setter functions.
pub struct AccessorGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> AccessorGenerator<'a> {
    /// Creates a new accessor generator.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generates one inherent impl block holding every requested accessor,
    /// in field declaration order, getter before setter.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if two accessors share a name or a
    /// field has no zero value to return for an absent owner.
    pub fn generate(&self, desc: &TypeDescriptor) -> Result<ImplBlock, CodegenError> {
        let mut names = HashSet::new();
        let mut functions = Vec::new();

        for field in &desc.fields {
            if is_opaque(&field.category) && !field.nullable {
                return Err(CodegenError::generation(format!(
                    "field `{}` of `{}` has no zero value; declare it as `Option<{}>`",
                    field.name, desc.name, field.type_text
                )));
            }

            let getter = field.getter_name(&self.config.getter_prefix);
            let setter = field.setter_name(&self.config.setter_prefix);
            for name in getter.iter().chain(setter.iter()) {
                if !names.insert(name.clone()) {
                    return Err(CodegenError::generation(format!(
                        "accessor `{name}` is generated twice for `{}`",
                        desc.name
                    )));
                }
            }

            if let Some(name) = getter {
                functions.push(self.generate_getter(field, name));
            }
            if let Some(name) = setter {
                functions.push(self.generate_setter(field, name));
            }
        }

        Ok(ImplBlock {
            trait_name: None,
            target: desc.name.clone(),
            functions,
        })
    }

    fn generate_getter(&self, field: &FieldDescriptor, name: String) -> Function {
        let receiver = &self.config.receiver;
        let zero = field_literal(&field.defaults().zero, field);
        let value = Expr::field(Expr::raw(receiver), &field.name);
        let value = if field.category.is_primitive() {
            value
        } else {
            Expr::method(value, "clone", Vec::new())
        };

        let mut stmts = vec![self.receiver_guard(Some(zero))];
        stmts.extend(self.lock_guard(field));
        stmts.push(Stmt::Tail(value));

        let mut function = Function::new(name);
        function.docs = vec![format!(
            "Returns `{}`, or its zero value when `{receiver}` is absent.",
            display_name(field)
        )];
        function.attrs = vec!["must_use".to_string()];
        function.public = true;
        function.params = vec![Param::new(receiver, "Option<&Self>")];
        function.ret = Some(field.type_text.clone());
        function.body = Block::new(stmts);
        function
    }

    fn generate_setter(&self, field: &FieldDescriptor, name: String) -> Function {
        let receiver = &self.config.receiver;

        let mut stmts = vec![self.receiver_guard(None)];
        stmts.extend(self.lock_guard(field));
        stmts.push(Stmt::Expr(Expr::assign(
            Expr::field(Expr::raw(receiver), &field.name),
            Expr::raw(SETTER_VALUE),
        )));

        let mut function = Function::new(name);
        function.docs = vec![format!(
            "Sets `{}`; does nothing when `{receiver}` is absent.",
            display_name(field)
        )];
        function.public = true;
        function.params = vec![
            Param::new(receiver, "Option<&mut Self>"),
            Param::new(SETTER_VALUE, &field.type_text),
        ];
        function.body = Block::new(stmts);
        function
    }

    /// `let Some(this) = this else { return ..; };`
    fn receiver_guard(&self, zero: Option<Expr>) -> Stmt {
        let receiver = &self.config.receiver;
        Stmt::LetElse {
            pattern: format!("Some({receiver})"),
            value: Expr::raw(receiver),
            otherwise: Block::new(vec![Stmt::Return(zero)]),
        }
    }

    fn lock_guard(&self, field: &FieldDescriptor) -> Option<Stmt> {
        let lock = field.lock.as_ref()?;
        Some(Stmt::Let {
            mutable: false,
            name: "_guard".to_string(),
            ty: None,
            value: Expr::method(
                Expr::field(Expr::raw(&self.config.receiver), lock),
                &self.config.lock_method,
                Vec::new(),
            ),
        })
    }
}

fn display_name(field: &FieldDescriptor) -> &str {
    field.name.trim_start_matches("r#")
}
