//! Main code generator.

use crate::code::{Item, Unit};
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::printer::Printer;
use crate::rust::{AccessorGenerator, EnumGenerator, ScaffoldGenerator};
use wirecast_schema::{
    EnumDescriptor, TypeDescriptor, TypeLoader, parse_enums, to_snake_case, validate_enum,
    validate_enums,
};

/// First line of every generated unit.
pub const GENERATED_HEADER: &str = "Code generated by wirecast; DO NOT EDIT.";

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Enum title or type name the unit was generated for.
    pub name: String,
    /// File name relative to the output directory.
    pub file_name: String,
    /// Rust source text.
    pub source: String,
}

/// Code generator for enum converters and accessors.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a new generator.
    ///
    /// # Arguments
    /// * `config` - Naming and output options
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the generator configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Extracts, validates and renders every enum block in `text`.
    ///
    /// # Arguments
    /// * `text` - Schema text containing `enum Title { ... }` blocks
    ///
    /// # Returns
    /// One unit per enum, in input order. Nothing is returned unless every
    /// enum renders.
    ///
    /// # Errors
    /// Returns `CodegenError` if extraction, validation or rendering fails.
    pub fn generate_enums(&self, text: &str) -> Result<Vec<GeneratedUnit>, CodegenError> {
        let enums = parse_enums(text)?;
        validate_enums(&enums)?;

        let units = enums
            .iter()
            .map(|desc| self.render_enum(desc))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(enums = units.len(), "rendered enum units");
        Ok(units)
    }

    /// Renders one enum, its converters and, if enabled, its test module.
    ///
    /// # Errors
    /// Returns `CodegenError` if the descriptor is invalid or the output does
    /// not parse.
    pub fn render_enum(&self, desc: &EnumDescriptor) -> Result<GeneratedUnit, CodegenError> {
        self.config.validate()?;
        validate_enum(desc)?;

        let mut items = EnumGenerator::new(&self.config).generate(desc)?;
        if self.config.tests_enabled() {
            items.push(ScaffoldGenerator::new(&self.config).enum_tests(desc));
        }

        Ok(GeneratedUnit {
            name: desc.title.clone(),
            file_name: format!("{}.rs", to_snake_case(&desc.title)),
            source: print_unit(items)?,
        })
    }

    /// Loads one annotated type from Rust source and renders its accessors.
    ///
    /// # Arguments
    /// * `text` - Rust source declaring the type
    /// * `type_name` - Name of the owning struct
    ///
    /// # Errors
    /// Returns `CodegenError` if loading or rendering fails.
    pub fn generate_accessors(
        &self,
        text: &str,
        type_name: &str,
    ) -> Result<GeneratedUnit, CodegenError> {
        let loader = TypeLoader::from_source(text)?;
        let desc = loader.load(type_name)?;
        self.render_type(&desc)
    }

    /// Renders accessors for every struct in `text` with annotated fields.
    ///
    /// # Errors
    /// Returns `CodegenError` if any type fails to load or render.
    pub fn generate_all_accessors(&self, text: &str) -> Result<Vec<GeneratedUnit>, CodegenError> {
        let loader = TypeLoader::from_source(text)?;

        let units = loader
            .annotated_types()
            .iter()
            .map(|name| loader.load(name).map_err(CodegenError::from))
            .map(|desc| desc.and_then(|desc| self.render_type(&desc)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(types = units.len(), "rendered accessor units");
        Ok(units)
    }

    /// Renders the accessor impl and, if enabled, its test module.
    ///
    /// # Errors
    /// Returns `CodegenError` if the type has no annotated fields or the
    /// accessors cannot be generated.
    pub fn render_type(&self, desc: &TypeDescriptor) -> Result<GeneratedUnit, CodegenError> {
        self.config.validate()?;
        if desc.fields.is_empty() {
            return Err(CodegenError::generation(format!(
                "type `{}` has no annotated fields",
                desc.name
            )));
        }

        let mut items = vec![Item::Impl(AccessorGenerator::new(&self.config).generate(desc)?)];
        if self.config.tests_enabled() {
            items.push(ScaffoldGenerator::new(&self.config).accessor_tests(desc));
        }

        Ok(GeneratedUnit {
            name: desc.name.clone(),
            file_name: format!("{}_accessor.rs", to_snake_case(&desc.name)),
            source: print_unit(items)?,
        })
    }

    /// Renders only the accessor impl block, without header or tests.
    ///
    /// # Errors
    /// Returns `CodegenError` if the accessors cannot be generated.
    pub fn accessor_impl(&self, desc: &TypeDescriptor) -> Result<String, CodegenError> {
        self.config.validate()?;
        let block = AccessorGenerator::new(&self.config).generate(desc)?;
        Printer::new().print_items(&[Item::Impl(block)])
    }
}

fn print_unit(items: Vec<Item>) -> Result<String, CodegenError> {
    let unit = Unit {
        header: vec![GENERATED_HEADER.to_string()],
        items,
    };
    Printer::new().print_unit(&unit)
}
