//! Generator configuration.

use crate::error::CodegenError;
use crate::rust::accessors::SETTER_VALUE;
use serde::{Deserialize, Serialize};
use wirecast_schema::case::{Casing, strip_enum_prefix};

/// How external (wire) enum variants are spelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalNaming {
    /// Enum-title prefix stripped, then PascalCase: `TIME_UNIT_SECOND` in
    /// `TimeUnit` is `Second`.
    #[default]
    StripEnumPrefix,
    /// PascalCase of the full name: `TimeUnitSecond`.
    Pascal,
    /// Name as written in the schema: `TIME_UNIT_SECOND`.
    Verbatim,
}

impl ExternalNaming {
    /// Returns the external variant name for a wire value of enum `title`.
    #[must_use]
    pub fn variant_name(self, title: &str, original: &str) -> String {
        match self {
            Self::StripEnumPrefix => Casing::Pascal.apply(strip_enum_prefix(title, original)),
            Self::Pascal => Casing::Pascal.apply(original),
            Self::Verbatim => Casing::Verbatim.apply(original),
        }
    }
}

/// Configuration shared by every generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub(crate) external_module: String,
    pub(crate) external_naming: ExternalNaming,
    pub(crate) to_external: String,
    pub(crate) from_external: String,
    pub(crate) receiver: String,
    pub(crate) getter_prefix: String,
    pub(crate) setter_prefix: String,
    pub(crate) lock_method: String,
    pub(crate) emit_tests: bool,
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            external_module: "proto".to_string(),
            external_naming: ExternalNaming::default(),
            to_external: "to_proto".to_string(),
            from_external: "from_proto".to_string(),
            receiver: "this".to_string(),
            getter_prefix: "get_".to_string(),
            setter_prefix: "set_".to_string(),
            lock_method: "lock".to_string(),
            emit_tests: true,
        }
    }

    /// Parses a JSON configuration; missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns `CodegenError` if the JSON is malformed or a value is invalid.
    pub fn from_json(json: &str) -> Result<Self, CodegenError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the module path holding the external enums.
    #[must_use]
    pub fn external_module(mut self, path: impl Into<String>) -> Self {
        self.external_module = path.into();
        self
    }

    /// Sets the external variant naming.
    #[must_use]
    pub fn external_naming(mut self, naming: ExternalNaming) -> Self {
        self.external_naming = naming;
        self
    }

    /// Sets the local-to-external and external-to-local converter names.
    #[must_use]
    pub fn converters(mut self, to_external: impl Into<String>, from_external: impl Into<String>) -> Self {
        self.to_external = to_external.into();
        self.from_external = from_external.into();
        self
    }

    /// Sets the receiver parameter name of generated accessors.
    #[must_use]
    pub fn receiver(mut self, name: impl Into<String>) -> Self {
        self.receiver = name.into();
        self
    }

    /// Sets the default getter and setter prefixes.
    #[must_use]
    pub fn prefixes(mut self, getter: impl Into<String>, setter: impl Into<String>) -> Self {
        self.getter_prefix = getter.into();
        self.setter_prefix = setter.into();
        self
    }

    /// Sets the method called on lock fields to acquire a guard.
    #[must_use]
    pub fn lock_method(mut self, method: impl Into<String>) -> Self {
        self.lock_method = method.into();
        self
    }

    /// Enables or disables generated test modules.
    #[must_use]
    pub fn emit_tests(mut self, emit: bool) -> Self {
        self.emit_tests = emit;
        self
    }

    /// Returns the path of the external enum for `title`.
    #[must_use]
    pub fn external_path(&self, title: &str) -> String {
        format!("{}::{}", self.external_module, title)
    }

    /// Returns whether test modules are generated.
    #[must_use]
    pub fn tests_enabled(&self) -> bool {
        self.emit_tests
    }

    /// Checks that every configured name can appear in generated code.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidConfig` for the first unusable value.
    pub fn validate(&self) -> Result<(), CodegenError> {
        if self.external_module.is_empty()
            || syn::parse_str::<syn::Path>(&self.external_module).is_err()
        {
            return Err(CodegenError::invalid_config(
                "external_module",
                format!("'{}' is not a module path", self.external_module),
            ));
        }

        for (field, value) in [
            ("to_external", &self.to_external),
            ("from_external", &self.from_external),
            ("receiver", &self.receiver),
            ("lock_method", &self.lock_method),
        ] {
            if syn::parse_str::<syn::Ident>(value).is_err() {
                return Err(CodegenError::invalid_config(
                    field,
                    format!("'{value}' is not an identifier"),
                ));
            }
        }

        if self.receiver == "self" {
            return Err(CodegenError::invalid_config(
                "receiver",
                "accessors take an optional receiver and cannot use `self`",
            ));
        }
        if self.receiver == SETTER_VALUE {
            return Err(CodegenError::invalid_config(
                "receiver",
                format!("`{SETTER_VALUE}` is the setter value parameter"),
            ));
        }

        if self.getter_prefix == self.setter_prefix {
            return Err(CodegenError::invalid_config(
                "setter_prefix",
                "getter and setter prefixes must differ",
            ));
        }

        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
