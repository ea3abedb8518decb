use std::fs;
use std::path::Path;
use std::path::PathBuf;

use keel_cli::GenerateError;
use keel_cli::GenerateOptions;
use keel_cli::SchemaError;
use keel_cli::generate_client;

fn fixture_dir() -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn generate(name: &str, options: &GenerateOptions) -> String {
	let path = fixture_dir().join(name);
	generate_client(&path, options)
		.unwrap_or_else(|e| panic!("failed to generate {}: {e}", path.display()))
}

fn parse(source: &str) -> syn::File {
	syn::parse_file(source).unwrap_or_else(|e| panic!("generated code does not parse: {e}"))
}

/// `source` with all whitespace removed, for checks that should not depend on
/// line breaks.
fn squash(source: &str) -> String {
	source.chars().filter(|c| !c.is_whitespace()).collect()
}

fn function_names(file: &syn::File) -> Vec<String> {
	file.items
		.iter()
		.filter_map(|item| {
			match item {
				syn::Item::Fn(function) => Some(function.sig.ident.to_string()),
				_ => None,
			}
		})
		.collect()
}

fn param_names(signature: &syn::Signature) -> String {
	signature
		.inputs
		.iter()
		.map(|input| {
			match input {
				syn::FnArg::Receiver(_) => "self".to_owned(),
				syn::FnArg::Typed(typed) => {
					match typed.pat.as_ref() {
						syn::Pat::Ident(pat) => pat.ident.to_string(),
						_ => "_".to_owned(),
					}
				}
			}
		})
		.collect::<Vec<_>>()
		.join(", ")
}

fn last_segment(path: &syn::Path) -> String {
	path.segments
		.last()
		.map(|segment| segment.ident.to_string())
		.unwrap_or_default()
}

/// One line per generated item: its kind, name, and member names. Impl
/// methods are indented below their impl.
fn outline(file: &syn::File) -> String {
	let mut lines = Vec::new();
	for item in &file.items {
		match item {
			syn::Item::Const(item) => lines.push(format!("const {}", item.ident)),
			syn::Item::Fn(item) => {
				lines.push(format!("fn {}({})", item.sig.ident, param_names(&item.sig)));
			}
			syn::Item::Struct(item) => {
				let fields = item
					.fields
					.iter()
					.filter_map(|field| field.ident.as_ref().map(ToString::to_string))
					.collect::<Vec<_>>()
					.join(", ");
				lines.push(format!("struct {} {{ {fields} }}", item.ident));
			}
			syn::Item::Enum(item) => {
				let variants = item
					.variants
					.iter()
					.map(|variant| variant.ident.to_string())
					.collect::<Vec<_>>()
					.join(", ");
				lines.push(format!("enum {} {{ {variants} }}", item.ident));
			}
			syn::Item::Impl(item) => {
				let self_ty = match item.self_ty.as_ref() {
					syn::Type::Path(ty) => last_segment(&ty.path),
					_ => "_".to_owned(),
				};
				match &item.trait_ {
					Some((_, path, _)) => lines.push(format!("impl {} for {self_ty}", last_segment(path))),
					None => lines.push(format!("impl {self_ty}")),
				}
				for member in &item.items {
					match member {
						syn::ImplItem::Const(member) => lines.push(format!("  const {}", member.ident)),
						syn::ImplItem::Fn(member) => {
							lines.push(format!("  fn {}({})", member.sig.ident, param_names(&member.sig)));
						}
						_ => {}
					}
				}
			}
			other => panic!("unexpected generated item: {other:?}"),
		}
	}
	lines.join("\n")
}

#[test]
fn every_schema_fixture_generates_valid_rust() {
	let mut schemas = fs::read_dir(fixture_dir().join("schemas"))
		.unwrap_or_else(|e| panic!("failed to read fixture directory: {e}"))
		.filter_map(|entry| entry.ok().map(|entry| entry.path()))
		.filter(|path| path.extension().is_some_and(|ext| ext == "json"))
		.collect::<Vec<_>>();
	schemas.sort();

	assert!(!schemas.is_empty(), "no fixtures found in tests/fixtures/schemas");

	for schema in schemas {
		let fixture_name = schema
			.file_stem()
			.and_then(|name| name.to_str())
			.unwrap_or_else(|| panic!("invalid fixture name: {}", schema.display()))
			.to_owned();

		let source = generate_client(&schema, &GenerateOptions::default())
			.unwrap_or_else(|e| panic!("failed to generate {}: {e}", schema.display()));
		assert!(source.starts_with(keel_cli::codegen::HEADER));
		let file = parse(&source);

		insta::assert_snapshot!(fixture_name, outline(&file));
	}
}

#[test]
fn token_program_items() {
	let source = generate("schemas/token_program.json", &GenerateOptions::default());
	let file = parse(&source);
	let functions = function_names(&file);

	for expected in [
		"build_initialize_vault",
		"build_transfer",
		"build_deposit",
		"build_set_limits",
		"build_close_vault",
		"build_freeze",
		"decode_vault",
		"decode_vault_account",
		"decode_config",
		"decode_config_account",
		"decode_simple_event_event",
		"decode_transferred_event",
		"decode_event",
		"parse_events",
	] {
		assert!(
			functions.iter().any(|name| name == expected),
			"missing function {expected}"
		);
	}

	// Five instructions hold a `Vault`; the catalog still has one entry.
	assert_eq!(
		functions.iter().filter(|name| *name == "decode_vault").count(),
		1
	);
	assert_eq!(source.matches("pub fn get_vault(").count(), 1);
	assert_eq!(source.matches("pub const VAULT_ACCOUNT_TAG").count(), 1);

	let squashed = squash(&source);
	assert!(squashed.contains(
		"pubconstTRANSFER_INSTRUCTION_TAG:::keel::Tag=::keel::Tag::new([249,211,217,47,244,133,20,4]);"
	));
	assert!(source.contains("pub struct TransferArgs"));
	assert!(!source.contains("pub struct CloseVaultArgs"));
	assert!(source.contains("impl ::keel::Record for Vault"));
	assert!(!source.contains("impl ::keel::Record for crate::state::Config"));
	assert!(squashed.contains("->Result<crate::state::Config,::keel::ClientError>"));
	assert!(source.contains("pub enum TokenProgramEvent"));
	assert!(source.contains("pub enum TokenProgramError"));
	assert!(source.contains("pub struct TokenProgramClient<T>"));
	assert!(source.contains("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS"));
}

#[test]
fn roles_keep_declared_order() {
	let source = generate("schemas/token_program.json", &GenerateOptions::default());
	let start = source
		.find("pub fn build_freeze(")
		.unwrap_or_else(|| panic!("build_freeze missing"));
	let builder = &source[start..];
	let config = builder.find("config:").unwrap_or_else(|| panic!("config missing"));
	let vault = builder.find("vault:").unwrap_or_else(|| panic!("vault missing"));
	let admin = builder.find("admin:").unwrap_or_else(|| panic!("admin missing"));

	assert!(config < vault);
	assert!(vault < admin);
}

#[test]
fn facade_can_be_skipped() {
	let options = GenerateOptions::builder().facade(false).build();
	let source = generate("schemas/token_program.json", &options);

	parse(&source);
	assert!(!source.contains("TokenProgramClient"));
	assert!(!source.contains("pub fn send_"));
	assert!(source.contains("pub fn build_transfer("));
}

#[test]
fn runtime_path_and_name_are_configurable() {
	let options = GenerateOptions::builder()
		.runtime_crate("crate::runtime")
		.name("vaults")
		.build();
	let source = generate("schemas/token_program.json", &options);

	parse(&source);
	let squashed = squash(&source);
	assert!(squashed.contains("crate::runtime::Tag::new("));
	assert!(squashed.contains("#[borsh(crate=\"crate::runtime::borsh\")]"));
	assert!(!source.contains("::keel::"));
	assert!(source.contains("pub struct VaultsClient<T>"));
	assert!(source.contains("pub enum VaultsEvent"));
}

#[test]
fn long_builders_allow_many_arguments() {
	let source = generate("many_roles.json", &GenerateOptions::default());

	parse(&source);
	// Seven roles plus the argument bundle.
	assert!(squash(&source).contains("#[allow(clippy::too_many_arguments)]pubfnbuild_route("));
	assert!(source.contains("pub hops: [u8; 4],"));
}

#[test]
fn schema_without_events_or_errors() {
	let source = generate("schemas/counter.json", &GenerateOptions::default());
	let file = parse(&source);
	let functions = function_names(&file);

	assert_eq!(functions, vec!["build_increment", "build_reset"]);
	assert!(!source.contains("decode_event"));
	assert!(!source.contains("CounterError"));
	assert!(source.contains("pub struct CounterClient<T>"));
	assert!(source.contains("pub fn send_reset("));
}

#[test]
fn reports_schema_errors_with_path() {
	let path = fixture_dir().join("missing_address.json");
	let error = generate_client(&path, &GenerateOptions::default())
		.err()
		.unwrap_or_else(|| panic!("schema without address accepted"));
	assert!(matches!(
		error,
		GenerateError::Schema {
			source: SchemaError::MissingAddress,
			..
		}
	));
	assert!(error.to_string().contains("missing_address.json"));

	let path = fixture_dir().join("unknown_type.json");
	let error = generate_client(&path, &GenerateOptions::default())
		.err()
		.unwrap_or_else(|| panic!("unknown type accepted"));
	assert!(matches!(
		error,
		GenerateError::Schema {
			source: SchemaError::UnknownType { ref name, .. },
			..
		} if name == "Amount"
	));
}

#[test]
fn reports_generated_name_clashes() {
	let path = fixture_dir().join("name_clash.json");
	let error = generate_client(&path, &GenerateOptions::default())
		.err()
		.unwrap_or_else(|| panic!("clashing instruction names accepted"));
	assert!(matches!(
		error,
		GenerateError::Schema {
			source: SchemaError::NameClash { ref name, .. },
			..
		} if name == "TRANSFER_INSTRUCTION_TAG"
	));
}

#[test]
fn rejects_unknown_keys_and_missing_files() {
	let path = fixture_dir().join("unknown_field.json");
	let error = generate_client(&path, &GenerateOptions::default())
		.err()
		.unwrap_or_else(|| panic!("unknown key accepted"));
	assert!(matches!(error, GenerateError::Json { .. }));

	let path = fixture_dir().join("does_not_exist.json");
	let error = generate_client(&path, &GenerateOptions::default())
		.err()
		.unwrap_or_else(|| panic!("missing file accepted"));
	assert!(matches!(error, GenerateError::Io { .. }));
}

#[test]
fn rejects_invalid_runtime_path() {
	let options = GenerateOptions::builder().runtime_crate("not a path").build();
	let path = fixture_dir().join("schemas/counter.json");
	let error = generate_client(&path, &options)
		.err()
		.unwrap_or_else(|| panic!("invalid runtime path accepted"));
	assert!(matches!(error, GenerateError::InvalidRuntimePath { .. }));
}

#[test]
fn generates_a_directory() {
	let output = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
	let written = keel_cli::generate_directory(
		&fixture_dir().join("schemas"),
		output.path(),
		&GenerateOptions::default(),
	)
	.unwrap_or_else(|e| panic!("{e}"));

	assert_eq!(
		written,
		vec![
			output.path().join("counter.rs"),
			output.path().join("token_program.rs"),
		]
	);
	for path in &written {
		let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("{e}"));
		parse(&source);
	}
}
