// Build script generating the builtin module for the OpenCL subset fixture.
// The generated-module tests include it to check the emitted source compiles.

use std::env;
use std::fs;
use std::path::Path;

const FIXTURE: &str = "../progmodel-decls/tests/fixtures/opencl_subset.decl";

fn main() {
    println!("cargo:rerun-if-changed={FIXTURE}");

    if let Err(e) = generate_fixture_module() {
        panic!("Failed to generate the fixture module: {e}");
    }
}

fn generate_fixture_module() -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(FIXTURE)?;
    let records =
        progmodel_decls::parse_records(&source, Some("opencl_subset.decl".to_string()))?;
    let config = progmodel_tablegen::GeneratorConfig::new("OpenCL");
    let generated = progmodel_tablegen::generate(&records, &config)?;

    let out_dir = env::var("OUT_DIR")?;
    fs::write(Path::new(&out_dir).join("opencl_builtins.rs"), generated)?;
    Ok(())
}
