use std::path::PathBuf;
use std::{env, fs};

use jsongen_codegen::{Config, GenError, Generator, Passes};
use jsongen_core::definitions_from_json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo::rerun-if-changed=types.json");
    println!("cargo::rerun-if-changed=directives.txt");
    println!("cargo::rerun-if-changed=build.rs");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let defs = definitions_from_json(&fs::read_to_string(manifest_dir.join("types.json"))?)?;
    let mut passes = Passes::builtin();
    passes.directives(&fs::read_to_string(manifest_dir.join("directives.txt"))?)?;

    let generated = Generator::new(Config::default().emit_tests(true))
        .with_passes(passes)
        .generate(&defs);
    for skipped in &generated.skipped {
        if !matches!(skipped.reason, GenError::Filtered { .. }) {
            return Err(format!("{}: {}", skipped.type_name, skipped.reason).into());
        }
    }

    let out = PathBuf::from(env::var("OUT_DIR")?).join("generated.rs");
    fs::write(out, generated.render())?;
    Ok(())
}
