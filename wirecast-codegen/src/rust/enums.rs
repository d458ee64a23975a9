//! Enum and converter code generation.

use crate::code::{Arm, Block, EnumDef, Expr, Function, ImplBlock, Item, Param, Stmt, Variant};
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use std::collections::HashMap;
use wirecast_schema::{EnumDescriptor, ValueDescriptor};

/// Generator for local enums and their external converters.
pub struct EnumGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generates the enum, its converters and both `From` impls.
    ///
    /// The descriptor must have passed validation: values sorted, ordinals
    /// exactly `0..N-1`.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateExternalVariant` if two values share
    /// an external variant name under the configured naming.
    pub fn generate(&self, desc: &EnumDescriptor) -> Result<Vec<Item>, CodegenError> {
        self.check_external_names(desc)?;
        let external = self.config.external_path(&desc.title);

        Ok(vec![
            Item::Enum(self.generate_enum(desc, &external)),
            Item::Impl(ImplBlock {
                trait_name: None,
                target: desc.title.clone(),
                functions: vec![
                    self.generate_to_external(desc, &external),
                    self.generate_from_external(desc, &external),
                ],
            }),
            Item::Impl(self.generate_from_impl(
                &desc.title,
                &external,
                Expr::method(Expr::raw("value"), &self.config.to_external, Vec::new()),
            )),
            Item::Impl(self.generate_from_impl(
                &external,
                &desc.title,
                Expr::call(
                    format!("Self::{}", self.config.from_external),
                    vec![Expr::raw("value")],
                ),
            )),
        ])
    }

    /// Checks that every value has its own external variant.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateExternalVariant` for the first
    /// collision in ordinal order.
    pub fn check_external_names(&self, desc: &EnumDescriptor) -> Result<(), CodegenError> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for value in &desc.values {
            let variant = self
                .config
                .external_naming
                .variant_name(&desc.title, &value.original);
            if let Some(first) = seen.get(&variant) {
                return Err(CodegenError::DuplicateExternalVariant {
                    enum_name: desc.title.clone(),
                    variant,
                    first: (*first).to_string(),
                    second: value.original.clone(),
                });
            }
            seen.insert(variant, &value.original);
        }
        Ok(())
    }

    /// Returns the external variant path for a value.
    #[must_use]
    pub fn external_variant(&self, desc: &EnumDescriptor, value: &ValueDescriptor) -> String {
        let name = self
            .config
            .external_naming
            .variant_name(&desc.title, &value.original);
        format!("{}::{name}", self.config.external_path(&desc.title))
    }

    fn generate_enum(&self, desc: &EnumDescriptor, external: &str) -> EnumDef {
        let variants = desc
            .values
            .iter()
            .map(|value| {
                let unspecified = value.is_unspecified();
                Variant {
                    docs: value.doc.clone(),
                    attrs: if unspecified {
                        vec!["default".to_string()]
                    } else {
                        Vec::new()
                    },
                    name: value.local.clone(),
                    discriminant: unspecified.then_some(0),
                }
            })
            .collect();

        EnumDef {
            docs: vec![format!("Local mirror of `{external}`.")],
            attrs: vec![
                "derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)".to_string(),
                "repr(i32)".to_string(),
                "allow(clippy::enum_variant_names)".to_string(),
            ],
            name: desc.title.clone(),
            variants,
        }
    }

    fn generate_to_external(&self, desc: &EnumDescriptor, external: &str) -> Function {
        let mut arms: Vec<Arm> = desc
            .specified()
            .map(|value| {
                Arm::new(
                    format!("Self::{}", value.local),
                    Expr::raw(self.external_variant(desc, value)),
                )
            })
            .collect();
        if let Some(unspecified) = desc.unspecified() {
            arms.push(Arm::new(
                format!("Self::{}", unspecified.local),
                Expr::raw(self.external_variant(desc, unspecified)),
            ));
        }

        let mut function = Function::new(&self.config.to_external);
        function.docs = vec![format!("Converts to `{external}`.")];
        function.attrs = vec!["must_use".to_string()];
        function.public = true;
        function.params = vec![Param::self_value()];
        function.ret = Some(external.to_string());
        function.body = Block::new(vec![Stmt::Tail(Expr::Match {
            scrutinee: Box::new(Expr::raw("self")),
            arms,
        })]);
        function
    }

    fn generate_from_external(&self, desc: &EnumDescriptor, external: &str) -> Function {
        let mut arms: Vec<Arm> = desc
            .specified()
            .map(|value| {
                Arm::new(
                    self.external_variant(desc, value),
                    Expr::raw(format!("Self::{}", value.local)),
                )
            })
            .collect();

        let mut docs = vec![format!("Converts from `{external}`.")];
        if let Some(unspecified) = desc.unspecified() {
            docs.push(String::new());
            docs.push(format!(
                "Values without a local counterpart map to `Self::{}`.",
                unspecified.local
            ));
            arms.push(Arm::new("_", Expr::raw(format!("Self::{}", unspecified.local))));
        }

        let mut function = Function::new(&self.config.from_external);
        function.docs = docs;
        function.attrs = vec!["must_use".to_string()];
        function.public = true;
        function.params = vec![Param::new("value", external)];
        function.ret = Some("Self".to_string());
        function.body = Block::new(vec![Stmt::Tail(Expr::Match {
            scrutinee: Box::new(Expr::raw("value")),
            arms,
        })]);
        function
    }

    fn generate_from_impl(&self, source: &str, target: &str, body: Expr) -> ImplBlock {
        let mut function = Function::new("from");
        function.params = vec![Param::new("value", source)];
        function.ret = Some("Self".to_string());
        function.body = Block::new(vec![Stmt::Tail(body)]);

        ImplBlock {
            trait_name: Some(format!("From<{source}>")),
            target: target.to_string(),
            functions: vec![function],
        }
    }
}
