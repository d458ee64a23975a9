//! Test module generation for generated enums and accessors.

use super::{field_literal, is_opaque};
use crate::code::{Block, Expr, Function, Item, Module, Param, Stmt, StructDef};
use crate::config::GeneratorConfig;
use crate::rust::enums::EnumGenerator;
use wirecast_schema::{EnumDescriptor, FieldDescriptor, TypeDescriptor, to_snake_case};

/// Generator for `#[cfg(test)]` modules exercising generated code.
pub struct ScaffoldGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ScaffoldGenerator<'a> {
    /// Creates a new scaffold generator.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generates a table-driven test converting every value both ways.
    #[must_use]
    pub fn enum_tests(&self, desc: &EnumDescriptor) -> Item {
        let title = &desc.title;
        let snake = to_snake_case(title);
        let enums = EnumGenerator::new(self.config);

        let fixtures = desc
            .values
            .iter()
            .map(|value| {
                Expr::Tuple(vec![
                    Expr::raw(format!("{title}::{}", value.local)),
                    Expr::raw(enums.external_variant(desc, value)),
                ])
            })
            .collect();

        let to_external = Expr::method(Expr::raw("local"), &self.config.to_external, Vec::new());
        let from_external = Expr::call(
            format!("{title}::{}", self.config.from_external),
            vec![Expr::raw("external")],
        );

        let mut test = Function::new(format!("{snake}_converts_both_ways"));
        test.attrs = vec!["test".to_string()];
        test.body = Block::new(vec![
            Stmt::Let {
                mutable: false,
                name: "fixtures".to_string(),
                ty: None,
                value: Expr::Array(fixtures),
            },
            Stmt::For {
                pattern: "(local, external)".to_string(),
                iter: Expr::raw("fixtures"),
                body: Block::new(vec![
                    Stmt::Expr(Expr::macro_call(
                        "assert_eq",
                        vec![
                            to_external,
                            Expr::raw("external"),
                            Expr::Str("{local:?} to external".to_string()),
                        ],
                    )),
                    Stmt::Expr(Expr::macro_call(
                        "assert_eq",
                        vec![
                            from_external,
                            Expr::raw("local"),
                            Expr::Str("{local:?} from external".to_string()),
                        ],
                    )),
                ]),
            },
        ]);

        test_module(format!("{snake}_tests"), Vec::new(), test)
    }

    /// Generates an aggregate accessor test for one owning type.
    ///
    /// Fixtures cover an absent receiver, a `Default` receiver and, when any
    /// field declares a sample, a receiver populated with the samples. Every
    /// setter is also called on an absent receiver.
    #[must_use]
    pub fn accessor_tests(&self, desc: &TypeDescriptor) -> Item {
        let owner = &desc.name;
        let snake = to_snake_case(owner);

        let checked: Vec<(&FieldDescriptor, String)> = desc
            .fields
            .iter()
            .filter(|f| !is_opaque(&f.category))
            .filter_map(|f| {
                f.getter_name(&self.config.getter_prefix)
                    .map(|getter| (f, getter))
            })
            .collect();
        let sampled: Vec<&FieldDescriptor> =
            desc.fields.iter().filter(|f| f.sample.is_some()).collect();

        let mut stmts = Vec::new();
        let mut support = Vec::new();

        for field in desc.getters().filter(|f| is_opaque(&f.category)) {
            stmts.push(Stmt::Comment(format!(
                "`{}` has no equality and is not compared.",
                field.name
            )));
        }

        if !checked.is_empty() {
            support.push(Item::Struct(StructDef {
                docs: Vec::new(),
                attrs: Vec::new(),
                public: false,
                name: "Want".to_string(),
                fields: checked
                    .iter()
                    .map(|(f, _)| Param::new(&f.name, &f.type_text))
                    .collect(),
            }));

            stmts.push(let_stmt(false, "empty", Expr::raw(format!("{owner}::default()"))));

            let mut fixtures = vec![
                fixture(
                    "absent receiver",
                    Expr::raw("None"),
                    want(&checked, |f| field_literal(&f.defaults().zero, f)),
                ),
                fixture(
                    "empty receiver",
                    Expr::raw("Some(&empty)"),
                    want(&checked, |f| field_literal(&f.defaults().empty, f)),
                ),
            ];

            if sampled.is_empty() {
                stmts.push(Stmt::Comment(
                    "No field declares a sample, so only absent and empty receivers are checked."
                        .to_string(),
                ));
            } else {
                stmts.push(let_stmt(true, "populated", Expr::raw(format!("{owner}::default()"))));
                for field in &sampled {
                    stmts.push(Stmt::Expr(self.populate(owner, field)));
                }
                fixtures.push(fixture(
                    "populated receiver",
                    Expr::raw("Some(&populated)"),
                    want(&checked, |f| match &f.sample {
                        Some(sample) => Expr::raw(sample),
                        None => field_literal(&f.defaults().empty, f),
                    }),
                ));
            }

            stmts.push(let_stmt(false, "fixtures", Expr::Array(fixtures)));

            let asserts = checked
                .iter()
                .map(|(field, getter)| {
                    let name = field.name.trim_start_matches("r#");
                    Stmt::Expr(Expr::macro_call(
                        "assert_eq",
                        vec![
                            Expr::call(format!("{owner}::{getter}"), vec![Expr::raw("receiver")]),
                            Expr::field(Expr::raw("want"), &field.name),
                            Expr::Str(format!("{{name}}: {name}")),
                        ],
                    ))
                })
                .collect();
            stmts.push(Stmt::For {
                pattern: "(name, receiver, want)".to_string(),
                iter: Expr::raw("fixtures"),
                body: Block::new(asserts),
            });
        }

        let setters: Vec<Stmt> = desc
            .fields
            .iter()
            .filter_map(|f| {
                f.setter_name(&self.config.setter_prefix).map(|setter| {
                    Stmt::Expr(Expr::call(
                        format!("{owner}::{setter}"),
                        vec![Expr::raw("None"), field_literal(&f.defaults().zero, f)],
                    ))
                })
            })
            .collect();
        if !setters.is_empty() {
            if !stmts.is_empty() {
                stmts.push(Stmt::Blank);
            }
            stmts.push(Stmt::Comment("Setters on an absent receiver are no-ops.".to_string()));
            stmts.extend(setters);
        }

        let mut test = Function::new(format!("{snake}_accessors"));
        test.attrs = vec!["test".to_string()];
        test.body = Block::new(stmts);

        test_module(format!("{snake}_accessor_tests"), support, test)
    }

    /// Writes a field's sample through its setter, or directly when the
    /// field has no setter.
    fn populate(&self, owner: &str, field: &FieldDescriptor) -> Expr {
        let sample = Expr::raw(field.sample.clone().unwrap_or_default());
        match field.setter_name(&self.config.setter_prefix) {
            Some(setter) => Expr::call(
                format!("{owner}::{setter}"),
                vec![Expr::raw("Some(&mut populated)"), sample],
            ),
            None => Expr::assign(Expr::field(Expr::raw("populated"), &field.name), sample),
        }
    }
}

fn test_module(name: String, support: Vec<Item>, test: Function) -> Item {
    let mut items = vec![Item::Use("super::*".to_string())];
    items.extend(support);
    items.push(Item::Function(test));
    Item::Module(Module {
        attrs: vec!["cfg(test)".to_string()],
        name,
        items,
    })
}

fn let_stmt(mutable: bool, name: &str, value: Expr) -> Stmt {
    Stmt::Let {
        mutable,
        name: name.to_string(),
        ty: None,
        value,
    }
}

fn fixture(name: &str, receiver: Expr, want: Expr) -> Expr {
    Expr::Tuple(vec![Expr::Str(name.to_string()), receiver, want])
}

fn want(
    fields: &[(&FieldDescriptor, String)],
    value: impl Fn(&FieldDescriptor) -> Expr,
) -> Expr {
    Expr::StructLit {
        name: "Want".to_string(),
        fields: fields.iter().map(|&(f, _)| (f.name.clone(), value(f))).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::Printer;
    use wirecast_schema::{TypeLoader, parse_enums};

    const SOURCE: &str = r#"
pub struct Profile {
    #[accessor]
    name: String,
    #[accessor(getter, sample = "42")]
    age: u32,
    #[accessor(setter)]
    hidden: bool,
}

pub struct Plain {
    #[accessor]
    tags: Vec<String>,
    #[accessor(getter)]
    card: Card,
    #[accessor]
    callback: Option<Box<dyn Fn()>>,
}
"#;

    fn render(item: Item) -> String {
        Printer::new().print_items(&[item]).expect("Failed to print")
    }

    fn type_tests(type_name: &str) -> String {
        let loader = TypeLoader::from_source(SOURCE).expect("Failed to parse");
        let desc = loader.load(type_name).expect("Failed to load");
        let config = GeneratorConfig::default();
        render(ScaffoldGenerator::new(&config).accessor_tests(&desc))
    }

    #[test]
    fn test_enum_tests() {
        let desc = parse_enums("enum TimeUnit {\n TIME_UNIT_UNSPECIFIED = 0;\n TIME_UNIT_SECOND = 1;\n}")
            .expect("Failed to parse")
            .remove(0);
        let config = GeneratorConfig::default();
        let output = render(ScaffoldGenerator::new(&config).enum_tests(&desc));

        assert!(output.starts_with("#[cfg(test)]\nmod time_unit_tests {\n    use super::*;\n"));
        assert!(output.contains("    fn time_unit_converts_both_ways() {"));
        assert!(output.contains(
            "            (TimeUnit::TimeUnitUnspecified, proto::TimeUnit::Unspecified),\n            (TimeUnit::TimeUnitSecond, proto::TimeUnit::Second),\n"
        ));
        assert!(output.contains(
            "assert_eq!(local.to_proto(), external, \"{local:?} to external\");"
        ));
        assert!(output.contains(
            "assert_eq!(TimeUnit::from_proto(external), local, \"{local:?} from external\");"
        ));
    }

    #[test]
    fn test_accessor_fixtures_with_sample() {
        let output = type_tests("Profile");

        assert!(output.contains("    struct Want {\n        name: String,\n        age: u32,\n    }\n"));
        assert!(output.contains("        let empty = Profile::default();\n"));
        assert!(output.contains("        let mut populated = Profile::default();\n"));
        assert!(output.contains("        populated.age = 42;\n"));
        assert!(output.contains("\"absent receiver\",\n                None,\n"));
        assert!(output.contains("\"populated receiver\",\n                Some(&populated),\n"));
        assert!(output.contains("                    age: 42,\n"));
        assert!(output.contains(
            "assert_eq!(Profile::get_age(receiver), want.age, \"{name}: age\");"
        ));
        assert!(output.contains("        Profile::set_name(None, String::new());\n"));
        assert!(output.contains("        Profile::set_hidden(None, false);\n"));
        assert!(!output.contains("get_hidden"));
    }

    #[test]
    fn test_accessor_fixtures_without_sample() {
        let output = type_tests("Plain");

        assert!(!output.contains("populated"));
        assert!(output.contains(
            "// No field declares a sample, so only absent and empty receivers are checked."
        ));
        assert!(output.contains("// `callback` has no equality and is not compared."));
        assert!(output.contains("    struct Want {\n        tags: Vec<String>,\n        card: Card,\n    }\n"));
        // Absent owner: struct zero is the default; present owner: a default instance.
        assert!(output.contains("                    card: Default::default(),\n"));
        assert!(output.contains("                    card: Card::default(),\n"));
        assert!(output.contains("        Plain::set_callback(None, None);\n"));
    }
}
