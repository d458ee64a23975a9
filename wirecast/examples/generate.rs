//! Example generator run over an enum schema and an annotated type.
//!
//! Run with: `cargo run --example generate -- [schema.proto] [out_dir]`
//!
//! Without arguments a built-in schema is rendered to stdout. Set
//! `RUST_LOG=debug` to see extraction and loading events.

use anyhow::Context;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wirecast::prelude::*;

const SCHEMA: &str = r#"
enum TimeUnit {
    TIME_UNIT_UNSPECIFIED = 0;
    // One second.
    TIME_UNIT_SECOND = 1;
    TIME_UNIT_MINUTE = 2;
    TIME_UNIT_HOUR = 3;
}
"#;

const MODEL: &str = r#"
use parking_lot::Mutex;

#[accessor(lock = "mu")]
pub struct DeliveryTiming {
    mu: Mutex<()>,
    #[accessor]
    time_transition: i32,
    #[accessor(getter = "number_of_days", setter, sample = "Some(7)")]
    number: Option<i64>,
    #[accessor(getter)]
    unit: TimeUnit,
}
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let schema = match args.next() {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read schema {path}"))?,
        None => SCHEMA.to_string(),
    };
    let out_dir = args.next().map(PathBuf::from);

    let generator = Generator::new(GeneratorConfig::new().external_module("pb"));
    let mut units = generator
        .generate_enums(&schema)
        .context("failed to generate enums")?;
    units.extend(
        generator
            .generate_all_accessors(MODEL)
            .context("failed to generate accessors")?,
    );
    tracing::info!(units = units.len(), "generation finished");

    match out_dir {
        Some(dir) => {
            let paths = UnitWriter::new(&dir)
                .write_all(&units)
                .with_context(|| format!("failed to write units to {}", dir.display()))?;
            for path in paths {
                println!("wrote {}", path.display());
            }
        }
        None => {
            for unit in &units {
                println!("// ===== {} =====", unit.file_name);
                println!("{}", unit.source);
            }
        }
    }

    Ok(())
}
