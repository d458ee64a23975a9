use wirecast::codegen::{Builder, CodegenError};

fn main() -> Result<(), CodegenError> {
    Builder::new()
        .enum_file("schema/delivery.proto")
        .accessor_file("src/model.rs")
        .build()?;
    Ok(())
}
