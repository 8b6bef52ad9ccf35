use std::error::Error;

#[cfg(feature = "gpu")]
fn build_shaders() -> Result<(), Box<dyn Error>> {
    use spirv_builder::{MetadataPrintout, SpirvBuilder};

    // Exposes the module path to `src/gpu.rs` as `env!("seascape_shaders.spv")`.
    SpirvBuilder::new("shaders", "spirv-unknown-vulkan1.1")
        .print_metadata(MetadataPrintout::Full)
        .build()?;
    Ok(())
}

#[cfg(not(feature = "gpu"))]
fn build_shaders() -> Result<(), Box<dyn Error>> {
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    build_shaders()
}
