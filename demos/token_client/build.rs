use std::path::Path;
use std::path::PathBuf;

use keel_cli::GenerateOptions;

const SCHEMA: &str = "schema/token_program.json";

fn main() {
	println!("cargo:rerun-if-changed={SCHEMA}");

	let source = keel_cli::generate_client(Path::new(SCHEMA), &GenerateOptions::default())
		.unwrap_or_else(|e| panic!("failed to generate the token program client: {e}"));

	let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
	let target = out_dir.join("token_program.rs");
	std::fs::write(&target, source)
		.unwrap_or_else(|e| panic!("failed to write {}: {e}", target.display()));
}
