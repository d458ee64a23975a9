//! Build-script integration.
//!
//! ```ignore
//! // build.rs
//! fn main() -> Result<(), wirecast_codegen::CodegenError> {
//!     wirecast_codegen::Builder::new()
//!         .enum_file("schema/enums.proto")
//!         .accessor_type("src/timing.rs", "DeliveryTiming")
//!         .build()?;
//!     Ok(())
//! }
//! ```

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::generator::{GeneratedUnit, Generator};
use crate::output::UnitWriter;
use std::fs;
use std::path::{Path, PathBuf};

/// An accessor input: one named type, or every annotated type of a file.
#[derive(Debug, Clone)]
enum AccessorInput {
    Type { path: PathBuf, name: String },
    File { path: PathBuf },
}

impl AccessorInput {
    fn path(&self) -> &Path {
        match self {
            Self::Type { path, .. } | Self::File { path } => path,
        }
    }
}

/// Builder collecting generator inputs for a build script.
#[derive(Debug, Clone)]
pub struct Builder {
    config: GeneratorConfig,
    enum_files: Vec<PathBuf>,
    accessor_inputs: Vec<AccessorInput>,
    out_dir: Option<PathBuf>,
    emit_rerun_if_changed: bool,
}

impl Builder {
    /// Creates a builder with default configuration and no inputs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            enum_files: Vec::new(),
            accessor_inputs: Vec::new(),
            out_dir: None,
            emit_rerun_if_changed: true,
        }
    }

    /// Sets the generator configuration.
    #[must_use]
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a schema file containing enum blocks.
    #[must_use]
    pub fn enum_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.enum_files.push(path.into());
        self
    }

    /// Adds one annotated type declared in a Rust source file.
    #[must_use]
    pub fn accessor_type(mut self, path: impl Into<PathBuf>, type_name: impl Into<String>) -> Self {
        self.accessor_inputs.push(AccessorInput::Type {
            path: path.into(),
            name: type_name.into(),
        });
        self
    }

    /// Adds every annotated type declared in a Rust source file.
    #[must_use]
    pub fn accessor_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.accessor_inputs
            .push(AccessorInput::File { path: path.into() });
        self
    }

    /// Sets the output directory. Defaults to `OUT_DIR`.
    #[must_use]
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    /// Enables or disables `cargo:rerun-if-changed` lines for inputs.
    #[must_use]
    pub fn emit_rerun_if_changed(mut self, emit: bool) -> Self {
        self.emit_rerun_if_changed = emit;
        self
    }

    /// Renders every input, then writes all units.
    ///
    /// # Returns
    /// Paths of the written units.
    ///
    /// # Errors
    /// Returns `CodegenError` if no output directory is available, an input
    /// cannot be read, or any unit fails to render or write. Nothing is
    /// written unless every unit renders.
    pub fn build(self) -> Result<Vec<PathBuf>, CodegenError> {
        self.config.validate()?;
        let out_dir = self.resolve_out_dir()?;
        let units = self.render()?;

        if units.is_empty() {
            tracing::warn!("no units generated");
        }

        let paths = UnitWriter::new(&out_dir).write_all(&units)?;
        tracing::info!(
            units = paths.len(),
            out_dir = %out_dir.display(),
            "generation complete"
        );
        Ok(paths)
    }

    /// Renders every input without writing anything.
    ///
    /// # Errors
    /// Returns `CodegenError` for the first input that fails.
    pub fn render(&self) -> Result<Vec<GeneratedUnit>, CodegenError> {
        let generator = Generator::new(self.config.clone());
        let mut units = Vec::new();

        for path in &self.enum_files {
            let text = self.read_input(path)?;
            let rendered = generator.generate_enums(&text)?;
            if rendered.is_empty() {
                tracing::warn!(path = %path.display(), "no enum blocks found, skipping");
            }
            units.extend(rendered);
        }

        for input in &self.accessor_inputs {
            let text = self.read_input(input.path())?;
            match input {
                AccessorInput::Type { name, .. } => {
                    units.push(generator.generate_accessors(&text, name)?);
                }
                AccessorInput::File { path } => {
                    let rendered = generator.generate_all_accessors(&text)?;
                    if rendered.is_empty() {
                        tracing::warn!(path = %path.display(), "no annotated types found, skipping");
                    }
                    units.extend(rendered);
                }
            }
        }

        Ok(units)
    }

    fn read_input(&self, path: &Path) -> Result<String, CodegenError> {
        if self.emit_rerun_if_changed {
            println!("cargo:rerun-if-changed={}", path.display());
        }
        tracing::debug!(path = %path.display(), "reading input");
        Ok(fs::read_to_string(path)?)
    }

    fn resolve_out_dir(&self) -> Result<PathBuf, CodegenError> {
        if let Some(dir) = &self.out_dir {
            return Ok(dir.clone());
        }
        std::env::var_os("OUT_DIR")
            .map(PathBuf::from)
            .ok_or_else(|| {
                CodegenError::invalid_config(
                    "out_dir",
                    "no output directory set and OUT_DIR is not defined",
                )
            })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENUMS: &str = "enum Side {\n    SIDE_UNSPECIFIED = 0;\n    SIDE_BUY = 1;\n    SIDE_SELL = 2;\n}\n";

    const TYPES: &str = r#"
pub struct Order {
    #[accessor]
    quantity: u64,
    #[accessor(getter)]
    side: Side,
}

pub struct Fill {
    #[accessor]
    price: f64,
}
"#;

    fn write_inputs(dir: &Path) -> (PathBuf, PathBuf) {
        let enums = dir.join("enums.proto");
        let types = dir.join("types.rs");
        fs::write(&enums, ENUMS).expect("Failed to write enums");
        fs::write(&types, TYPES).expect("Failed to write types");
        (enums, types)
    }

    #[test]
    fn test_build_writes_all_units() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let (enums, types) = write_inputs(dir.path());
        let out = dir.path().join("out");

        let paths = Builder::new()
            .enum_file(&enums)
            .accessor_type(&types, "Order")
            .accessor_file(&types)
            .out_dir(&out)
            .emit_rerun_if_changed(false)
            .build();

        // `Order` is requested twice and would be written twice.
        assert!(matches!(paths, Err(CodegenError::Generation { .. })));

        let paths = Builder::new()
            .enum_file(&enums)
            .accessor_file(&types)
            .out_dir(&out)
            .emit_rerun_if_changed(false)
            .build()
            .expect("Failed to build");

        let names: Vec<String> = paths
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["side.rs", "order_accessor.rs", "fill_accessor.rs"]);

        let side = fs::read_to_string(out.join("side.rs")).expect("Failed to read");
        assert!(side.contains("Self::SideBuy => proto::Side::Buy,"));
    }

    #[test]
    fn test_render_failure_writes_nothing() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let (enums, types) = write_inputs(dir.path());
        let out = dir.path().join("out");

        let result = Builder::new()
            .enum_file(&enums)
            .accessor_type(&types, "Missing")
            .out_dir(&out)
            .emit_rerun_if_changed(false)
            .build();

        assert!(matches!(result, Err(CodegenError::Load(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = Builder::new()
            .enum_file(dir.path().join("absent.proto"))
            .out_dir(dir.path())
            .emit_rerun_if_changed(false)
            .render();

        assert!(matches!(result, Err(CodegenError::Io(_))));
    }

    #[test]
    fn test_config_is_applied() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let (enums, _) = write_inputs(dir.path());

        let units = Builder::new()
            .config(GeneratorConfig::new().external_module("wire").emit_tests(false))
            .enum_file(&enums)
            .emit_rerun_if_changed(false)
            .render()
            .expect("Failed to render");

        assert_eq!(units.len(), 1);
        assert!(units[0].source.contains("pub fn to_proto(self) -> wire::Side {"));
        assert!(!units[0].source.contains("cfg(test)"));
    }
}
