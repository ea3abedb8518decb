//! Generate typed Rust clients for keel programs from a JSON schema.
//!
//! A schema lists a program's instructions, the account records their roles
//! hold, the events it publishes, and its error codes. The generated module
//! contains tag constants, `build_*` instruction builders, record decoders,
//! event and error catalogs, and a client facade over [`keel::Transport`].

pub mod codegen;
pub mod error;
pub mod ir;
pub mod parse;

use std::path::Path;
use std::path::PathBuf;

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use typed_builder::TypedBuilder;
use walkdir::WalkDir;

pub use crate::codegen::render_program;
pub use crate::error::GenerateError;
pub use crate::error::SchemaError;
use crate::ir::ProgramIr;
pub use crate::parse::parse_program;

/// The runtime path generated code uses unless told otherwise.
pub const DEFAULT_RUNTIME_CRATE: &str = "::keel";

/// Options for client generation.
#[derive(Debug, Clone, TypedBuilder)]
pub struct GenerateOptions {
	/// Path through which generated code reaches the keel runtime.
	#[builder(default = DEFAULT_RUNTIME_CRATE.to_owned(), setter(into))]
	pub runtime_crate: String,
	/// Emit the `<Program>Client` facade.
	#[builder(default = true)]
	pub facade: bool,
	/// Replace the program name given in the schema.
	#[builder(default, setter(into, strip_option))]
	pub name: Option<String>,
}

impl Default for GenerateOptions {
	fn default() -> Self {
		Self::builder().build()
	}
}

/// Load and validate the schema at `schema_path`.
pub fn load_program(schema_path: &Path, options: &GenerateOptions) -> Result<ProgramIr, GenerateError> {
	parse_program(schema_path, options.name.as_deref())
}

/// Generate the client source for the schema at `schema_path`.
pub fn generate_client(schema_path: &Path, options: &GenerateOptions) -> Result<String, GenerateError> {
	let program = load_program(schema_path, options)?;
	render_program(&program, options)
}

/// Generate a client for every `*.json` schema below `schema_dir`, writing
/// `<stem>.rs` into `output_dir`. Returns the written paths in sorted order.
///
/// The program name override in `options` is ignored here since each schema
/// names its own program.
pub fn generate_directory(
	schema_dir: &Path,
	output_dir: &Path,
	options: &GenerateOptions,
) -> Result<Vec<PathBuf>, GenerateError> {
	let options = GenerateOptions {
		name: None,
		..options.clone()
	};

	let mut schemas = Vec::new();
	for entry in WalkDir::new(schema_dir).sort_by_file_name() {
		let entry = entry.map_err(|e| {
			let path = e.path().unwrap_or(schema_dir).to_path_buf();
			GenerateError::io(path, e.into())
		})?;
		let path = entry.path();
		if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
			schemas.push(path.to_path_buf());
		}
	}

	std::fs::create_dir_all(output_dir).map_err(|e| GenerateError::io(output_dir, e))?;

	let mut written = Vec::with_capacity(schemas.len());
	for schema in schemas {
		let source = generate_client(&schema, &options)?;
		let stem = schema.file_stem().unwrap_or_default().to_string_lossy();
		let output = output_dir.join(format!("{stem}.rs"));
		std::fs::write(&output, source).map_err(|e| GenerateError::io(&output, e))?;
		written.push(output);
	}

	Ok(written)
}

/// A table of every tagged entity in `program`: namespace, name, and tag.
pub fn tag_table(program: &ProgramIr) -> Table {
	let mut table = Table::new();
	table.load_preset(UTF8_FULL);
	table.set_header(vec!["namespace", "name", "tag"]);
	for entity in program.tagged_entities() {
		table.add_row(vec![
			entity.namespace.to_string(),
			entity.name,
			entity.tag.to_string(),
		]);
	}
	table
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_options() {
		let options = GenerateOptions::default();
		assert_eq!(options.runtime_crate, "::keel");
		assert!(options.facade);
		assert_eq!(options.name, None);

		let options = GenerateOptions::builder()
			.runtime_crate("crate::keel")
			.facade(false)
			.name("renamed")
			.build();
		assert_eq!(options.runtime_crate, "crate::keel");
		assert!(!options.facade);
		assert_eq!(options.name.as_deref(), Some("renamed"));
	}
}
