//! End-to-end generation through the public API.

use std::fs;
use wirecast::prelude::*;

const SCHEMA: &str = r#"
enum Side {
    SIDE_UNSPECIFIED = 0;
    // Bid.
    SIDE_BUY = 1;
    SIDE_SELL = 2;
}

enum Venue {
    VENUE_UNSPECIFIED = 0;
    VENUE_PRIMARY = 1;
}
"#;

const MODEL: &str = r#"
pub struct Order {
    #[accessor]
    quantity: u64,
    #[accessor(sample = "Side::SideBuy")]
    side: Side,
}
"#;

#[test]
fn test_builder_writes_units_to_out_dir() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let schema = dir.path().join("enums.proto");
    let model = dir.path().join("model.rs");
    fs::write(&schema, SCHEMA)?;
    fs::write(&model, MODEL)?;

    let paths = Builder::new()
        .enum_file(&schema)
        .accessor_type(&model, "Order")
        .out_dir(dir.path().join("gen"))
        .emit_rerun_if_changed(false)
        .build()?;
    assert_eq!(paths.len(), 3);

    let side = fs::read_to_string(dir.path().join("gen").join("side.rs"))?;
    assert!(side.contains("    /// Bid.\n    SideBuy,\n"));
    assert!(side.contains("proto::Side::Buy => Self::SideBuy,"));

    let order = fs::read_to_string(dir.path().join("gen").join("order_accessor.rs"))?;
    assert!(order.contains("Order::set_side(Some(&mut populated), Side::SideBuy);"));
    assert!(order.contains("                    side: Side::SideBuy,\n"));
    Ok(())
}

#[test]
fn test_invalid_schema_generates_nothing() {
    let result = Generator::default().generate_enums("enum Side {\n    SIDE_BUY = 1;\n}");
    assert!(matches!(
        result,
        Err(CodegenError::Schema(SchemaError::MissingUnspecified { .. }))
    ));
}

#[test]
fn test_descriptors_are_exposed() {
    let enums = parse_enums(SCHEMA).expect("Failed to parse");
    assert!(validate_enums(&enums).is_ok());
    assert_eq!(enums[0].values[1].doc, vec!["Bid.".to_string()]);

    let desc = TypeLoader::from_source(MODEL)
        .and_then(|loader| loader.load("Order"))
        .expect("Failed to load");
    assert_eq!(desc.fields.len(), 2);
    assert_eq!(desc.fields[1].category, TypeCategory::Struct { type_name: "Side".to_string() });
}
