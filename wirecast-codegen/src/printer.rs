//! Source printer for the code model.
//!
//! Output is laid out the way `rustfmt` would lay it out for these shapes:
//! four-space indentation, one array element, struct field or match arm
//! per line, and a blank line between items. Every printed unit is parsed
//! back with `syn` so a malformed rendering never reaches disk.

use crate::code::{Arm, Block, EnumDef, Expr, Function, ImplBlock, Item, Module, Stmt, StructDef, Unit};
use crate::error::CodegenError;
use std::fmt::Write as _;

const INDENT: &str = "    ";

/// Renders code model values to Rust source text.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
}

impl Printer {
    /// Creates an empty printer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints a whole unit and checks that it parses as a Rust file.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the printed source does not parse.
    pub fn print_unit(mut self, unit: &Unit) -> Result<String, CodegenError> {
        for line in &unit.header {
            self.line(0, &format!("// {line}"));
        }
        if !unit.header.is_empty() && !unit.items.is_empty() {
            self.out.push('\n');
        }
        self.items(0, &unit.items);
        self.finish()
    }

    /// Prints a list of items without a header.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the printed source does not parse.
    pub fn print_items(mut self, items: &[Item]) -> Result<String, CodegenError> {
        self.items(0, items);
        self.finish()
    }

    fn finish(self) -> Result<String, CodegenError> {
        syn::parse_file(&self.out).map_err(|e| {
            CodegenError::generation(format!("printed source does not parse: {e}"))
        })?;
        Ok(self.out)
    }

    fn line(&mut self, level: usize, text: &str) {
        if text.is_empty() {
            self.out.push('\n');
            return;
        }
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn docs(&mut self, level: usize, docs: &[String]) {
        for doc in docs {
            if doc.is_empty() {
                self.line(level, "///");
            } else {
                self.line(level, &format!("/// {doc}"));
            }
        }
    }

    fn attrs(&mut self, level: usize, attrs: &[String]) {
        for attr in attrs {
            self.line(level, &format!("#[{attr}]"));
        }
    }

    fn items(&mut self, level: usize, items: &[Item]) {
        for (i, item) in items.iter().enumerate() {
            // Consecutive `use` lines stay together.
            let grouped = i > 0 && matches!((&items[i - 1], item), (Item::Use(_), Item::Use(_)));
            if i > 0 && !grouped {
                self.out.push('\n');
            }
            self.item(level, item);
        }
    }

    fn item(&mut self, level: usize, item: &Item) {
        match item {
            Item::Enum(def) => self.enum_def(level, def),
            Item::Impl(block) => self.impl_block(level, block),
            Item::Struct(def) => self.struct_def(level, def),
            Item::Module(module) => self.module(level, module),
            Item::Function(function) => self.function(level, function),
            Item::Use(path) => self.line(level, &format!("use {path};")),
        }
    }

    fn enum_def(&mut self, level: usize, def: &EnumDef) {
        self.docs(level, &def.docs);
        self.attrs(level, &def.attrs);
        self.line(level, &format!("pub enum {} {{", def.name));
        for variant in &def.variants {
            self.docs(level + 1, &variant.docs);
            self.attrs(level + 1, &variant.attrs);
            match variant.discriminant {
                Some(value) => self.line(level + 1, &format!("{} = {value},", variant.name)),
                None => self.line(level + 1, &format!("{},", variant.name)),
            }
        }
        self.line(level, "}");
    }

    fn struct_def(&mut self, level: usize, def: &StructDef) {
        self.docs(level, &def.docs);
        self.attrs(level, &def.attrs);
        let vis = if def.public { "pub " } else { "" };
        if def.fields.is_empty() {
            self.line(level, &format!("{vis}struct {};", def.name));
            return;
        }
        self.line(level, &format!("{vis}struct {} {{", def.name));
        for field in &def.fields {
            self.line(level + 1, &format!("{}: {},", field.name, field.ty));
        }
        self.line(level, "}");
    }

    fn impl_block(&mut self, level: usize, block: &ImplBlock) {
        let head = match &block.trait_name {
            Some(trait_name) => format!("impl {trait_name} for {} {{", block.target),
            None => format!("impl {} {{", block.target),
        };
        self.line(level, &head);
        for (i, function) in block.functions.iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.function(level + 1, function);
        }
        self.line(level, "}");
    }

    fn module(&mut self, level: usize, module: &Module) {
        self.attrs(level, &module.attrs);
        self.line(level, &format!("mod {} {{", module.name));
        self.items(level + 1, &module.items);
        self.line(level, "}");
    }

    fn function(&mut self, level: usize, function: &Function) {
        self.docs(level, &function.docs);
        self.attrs(level, &function.attrs);
        let vis = if function.public { "pub " } else { "" };
        let params = function
            .params
            .iter()
            .map(|p| {
                if p.is_self_value() {
                    p.name.clone()
                } else {
                    format!("{}: {}", p.name, p.ty)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        let ret = function
            .ret
            .as_ref()
            .map(|ty| format!(" -> {ty}"))
            .unwrap_or_default();
        self.line(level, &format!("{vis}fn {}({params}){ret} {{", function.name));
        self.block_body(level + 1, &function.body);
        self.line(level, "}");
    }

    fn block_body(&mut self, level: usize, block: &Block) {
        for stmt in &block.stmts {
            self.stmt(level, stmt);
        }
    }

    fn stmt(&mut self, level: usize, stmt: &Stmt) {
        match stmt {
            Stmt::Let {
                mutable,
                name,
                ty,
                value,
            } => {
                let mut head = String::from("let ");
                if *mutable {
                    head.push_str("mut ");
                }
                head.push_str(name);
                if let Some(ty) = ty {
                    let _ = write!(head, ": {ty}");
                }
                let value = self.expr(level, value);
                self.line(level, &format!("{head} = {value};"));
            }
            Stmt::LetElse {
                pattern,
                value,
                otherwise,
            } => {
                let value = self.expr(level, value);
                self.line(level, &format!("let {pattern} = {value} else {{"));
                self.block_body(level + 1, otherwise);
                self.line(level, "};");
            }
            Stmt::Expr(expr) => {
                let text = self.expr(level, expr);
                self.line(level, &format!("{text};"));
            }
            Stmt::Tail(expr) => {
                let text = self.expr(level, expr);
                self.line(level, &text);
            }
            Stmt::Return(None) => self.line(level, "return;"),
            Stmt::Return(Some(expr)) => {
                let text = self.expr(level, expr);
                self.line(level, &format!("return {text};"));
            }
            Stmt::For {
                pattern,
                iter,
                body,
            } => {
                let iter = self.expr(level, iter);
                self.line(level, &format!("for {pattern} in {iter} {{"));
                self.block_body(level + 1, body);
                self.line(level, "}");
            }
            Stmt::Comment(text) => self.line(level, &format!("// {text}")),
            Stmt::Blank => self.out.push('\n'),
        }
    }

    /// Renders an expression whose first line starts at `level`.
    fn expr(&self, level: usize, expr: &Expr) -> String {
        match expr {
            Expr::Raw(text) => text.clone(),
            Expr::Str(text) => format!("{text:?}"),
            Expr::Call { func, args } => format!("{func}({})", self.args(level, args)),
            Expr::Method {
                receiver,
                method,
                args,
            } => format!(
                "{}.{method}({})",
                self.expr(level, receiver),
                self.args(level, args)
            ),
            Expr::Field { base, name } => format!("{}.{name}", self.expr(level, base)),
            Expr::Assign { target, value } => {
                format!("{} = {}", self.expr(level, target), self.expr(level, value))
            }
            Expr::Macro { name, args } => format!("{name}!({})", self.args(level, args)),
            Expr::Array(items) => self.delimited(level, "[", "]", items),
            Expr::Tuple(items) if expr.is_multiline() => self.delimited(level, "(", ")", items),
            Expr::Tuple(items) => format!("({})", self.args(level, items)),
            Expr::StructLit { name, fields } => {
                if fields.is_empty() {
                    return format!("{name} {{}}");
                }
                let pad = INDENT.repeat(level + 1);
                let mut text = format!("{name} {{\n");
                for (field, value) in fields {
                    let _ = writeln!(text, "{pad}{field}: {},", self.expr(level + 1, value));
                }
                let _ = write!(text, "{}}}", INDENT.repeat(level));
                text
            }
            Expr::Match { scrutinee, arms } => self.match_expr(level, scrutinee, arms),
        }
    }

    fn args(&self, level: usize, args: &[Expr]) -> String {
        args.iter()
            .map(|arg| self.expr(level, arg))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn delimited(&self, level: usize, open: &str, close: &str, items: &[Expr]) -> String {
        if items.is_empty() {
            return format!("{open}{close}");
        }
        let pad = INDENT.repeat(level + 1);
        let mut text = format!("{open}\n");
        for item in items {
            let _ = writeln!(text, "{pad}{},", self.expr(level + 1, item));
        }
        let _ = write!(text, "{}{close}", INDENT.repeat(level));
        text
    }

    fn match_expr(&self, level: usize, scrutinee: &Expr, arms: &[Arm]) -> String {
        let pad = INDENT.repeat(level + 1);
        let mut text = format!("match {} {{\n", self.expr(level, scrutinee));
        for arm in arms {
            let _ = writeln!(
                text,
                "{pad}{} => {},",
                arm.pattern,
                self.expr(level + 1, &arm.body)
            );
        }
        let _ = write!(text, "{}}}", INDENT.repeat(level));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Param, Variant};

    fn sample_function() -> Function {
        let mut function = Function::new("get_count");
        function.public = true;
        function.params.push(Param::new("this", "Option<&Self>"));
        function.ret = Some("u32".to_string());
        function.body = Block::new(vec![
            Stmt::LetElse {
                pattern: "Some(this)".to_string(),
                value: Expr::raw("this"),
                otherwise: Block::new(vec![Stmt::Return(Some(Expr::raw("0")))]),
            },
            Stmt::Tail(Expr::field(Expr::raw("this"), "count")),
        ]);
        function
    }

    #[test]
    fn test_print_enum_and_impl() {
        let unit = Unit {
            header: vec!["generated".to_string()],
            items: vec![
                Item::Enum(EnumDef {
                    docs: vec!["Side.".to_string()],
                    attrs: vec!["repr(i32)".to_string()],
                    name: "Side".to_string(),
                    variants: vec![
                        Variant {
                            docs: Vec::new(),
                            attrs: vec!["default".to_string()],
                            name: "Unknown".to_string(),
                            discriminant: Some(0),
                        },
                        Variant {
                            docs: vec!["Buy side.".to_string()],
                            attrs: Vec::new(),
                            name: "Buy".to_string(),
                            discriminant: None,
                        },
                    ],
                }),
                Item::Impl(ImplBlock {
                    trait_name: None,
                    target: "Counter".to_string(),
                    functions: vec![sample_function()],
                }),
            ],
        };

        let source = Printer::new().print_unit(&unit).expect("Failed to print");
        assert!(source.starts_with("// generated\n\n/// Side.\n#[repr(i32)]\npub enum Side {\n"));
        assert!(source.contains("    #[default]\n    Unknown = 0,\n"));
        assert!(source.contains("    /// Buy side.\n    Buy,\n"));
        assert!(source.contains(
            "    pub fn get_count(this: Option<&Self>) -> u32 {\n        let Some(this) = this else {\n            return 0;\n        };\n        this.count\n    }\n"
        ));
    }

    #[test]
    fn test_print_match_and_array_layout() {
        let mut function = Function::new("check");
        function.body = Block::new(vec![
            Stmt::Let {
                mutable: false,
                name: "fixtures".to_string(),
                ty: None,
                value: Expr::Array(vec![Expr::Tuple(vec![Expr::Str("a".into()), Expr::raw("1")])]),
            },
            Stmt::Tail(Expr::Match {
                scrutinee: Box::new(Expr::raw("fixtures.len()")),
                arms: vec![
                    Arm::new("1", Expr::raw("()")),
                    Arm::new("_", Expr::macro_call("panic", vec![Expr::Str("len".into())])),
                ],
            }),
        ]);

        let source = Printer::new()
            .print_items(&[Item::Function(function)])
            .expect("Failed to print");
        assert!(source.contains("    let fixtures = [\n        (\"a\", 1),\n    ];\n"));
        assert!(source.contains(
            "    match fixtures.len() {\n        1 => (),\n        _ => panic!(\"len\"),\n    }\n"
        ));
    }

    #[test]
    fn test_print_struct_literal_inside_tuple() {
        let expr = Expr::Tuple(vec![
            Expr::Str("absent".into()),
            Expr::raw("None"),
            Expr::StructLit {
                name: "Want".to_string(),
                fields: vec![("count".to_string(), Expr::raw("0"))],
            },
        ]);
        let text = Printer::new().expr(1, &expr);
        assert_eq!(
            text,
            "(\n        \"absent\",\n        None,\n        Want {\n            count: 0,\n        },\n    )"
        );
    }

    #[test]
    fn test_self_receiver_has_no_type() {
        let mut function = Function::new("to_wire");
        function.public = true;
        function.params = vec![Param::self_value()];
        function.ret = Some("u8".to_string());
        function.body = Block::new(vec![Stmt::Tail(Expr::raw("0"))]);
        let block = ImplBlock {
            trait_name: None,
            target: "Side".to_string(),
            functions: vec![function],
        };

        let source = Printer::new()
            .print_items(&[Item::Impl(block)])
            .expect("Failed to print");
        assert!(source.contains("    pub fn to_wire(self) -> u8 {\n"));
        assert!(!source.contains("self: Self"));
    }

    #[test]
    fn test_unparsable_output_is_an_error() {
        let items = vec![Item::Use("not a path !".to_string())];
        let result = Printer::new().print_items(&items);
        assert!(matches!(result, Err(CodegenError::Generation { .. })));
    }

    #[test]
    fn test_module_groups_use_lines() {
        let module = Module {
            attrs: vec!["cfg(test)".to_string()],
            name: "tests".to_string(),
            items: vec![
                Item::Use("super::*".to_string()),
                Item::Use("std::fmt".to_string()),
                Item::Struct(StructDef {
                    docs: Vec::new(),
                    attrs: Vec::new(),
                    public: false,
                    name: "Want".to_string(),
                    fields: vec![Param::new("count", "u32")],
                }),
            ],
        };
        let source = Printer::new()
            .print_items(&[Item::Module(module)])
            .expect("Failed to print");
        assert_eq!(
            source,
            "#[cfg(test)]\nmod tests {\n    use super::*;\n    use std::fmt;\n\n    struct Want {\n        count: u32,\n    }\n}\n"
        );
    }
}
