pub mod schema;
pub mod types;

use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use heck::ToSnakeCase;
use keel::Pubkey;

use crate::codegen::GeneratedName;
use crate::codegen::ItemScope;
use crate::codegen::generated_names;
use crate::error::GenerateError;
use crate::error::SchemaError;
use crate::ir::ArgumentsIr;
use crate::ir::ErrorIr;
use crate::ir::EventIr;
use crate::ir::FieldIr;
use crate::ir::InstructionIr;
use crate::ir::ProgramIr;
use crate::ir::RecordTypeRef;
use crate::ir::RoleIr;
use crate::ir::TaggedEntity;
use crate::ir::TypeDefIr;
use crate::parse::schema::ErrorDoc;
use crate::parse::schema::FieldDoc;
use crate::parse::schema::InstructionDoc;
use crate::parse::schema::SchemaDoc;
use crate::parse::schema::StructDoc;
use crate::parse::types::parse_type;

/// Role names that would clash with the parameters generated methods add
/// after the roles.
const RESERVED_ROLES: [&str; 2] = ["args", "signers"];

/// Read a JSON schema file and assemble a `ProgramIr`.
pub fn parse_program(
	schema_path: &Path,
	name_override: Option<&str>,
) -> Result<ProgramIr, GenerateError> {
	let json = std::fs::read_to_string(schema_path)
		.map_err(|e| GenerateError::io(schema_path, e))?;
	let doc = SchemaDoc::from_json(&json).map_err(|e| GenerateError::json(schema_path, e))?;
	assemble_program_ir(doc, name_override).map_err(|e| GenerateError::schema(schema_path, e))
}

/// Validate a deserialized schema and build its IR.
pub fn assemble_program_ir(
	doc: SchemaDoc,
	name_override: Option<&str>,
) -> Result<ProgramIr, SchemaError> {
	let name = name_override
		.map(str::to_owned)
		.or(doc.name)
		.unwrap_or_default();
	check_ident("program", &name.to_snake_case())?;

	let address = doc.address.ok_or(SchemaError::MissingAddress)?;
	let address = Pubkey::from_str(address.trim())
		.map_err(|_| SchemaError::InvalidAddress { address })?;

	let mut definitions = Definitions::default();
	for def in doc.types.iter().chain(&doc.events) {
		check_ident("type", &def.name)?;
		definitions.insert(&def.name)?;
	}

	let defined: HashSet<&str> = doc.types.iter().map(|def| def.name.as_str()).collect();

	let types = doc
		.types
		.iter()
		.map(|def| {
			Ok(TypeDefIr {
				name: def.name.clone(),
				fields: lower_fields(&def.fields, &defined, &def.name)?,
				docs: def.docs.clone(),
			})
		})
		.collect::<Result<Vec<_>, SchemaError>>()?;

	let instructions = doc
		.instructions
		.iter()
		.map(|instruction| lower_instruction(instruction, &defined))
		.collect::<Result<Vec<_>, SchemaError>>()?;

	let events = doc
		.events
		.iter()
		.map(|event| lower_event(event, &defined))
		.collect::<Result<Vec<_>, SchemaError>>()?;

	let errors = lower_errors(&doc.errors)?;

	let program = ProgramIr {
		name,
		address,
		docs: doc.docs,
		types,
		instructions,
		events,
		errors,
	};
	check_name_clashes(&generated_names(&program))?;
	check_tag_collisions(&program.tagged_entities())?;

	Ok(program)
}

fn lower_instruction(
	doc: &InstructionDoc,
	defined: &HashSet<&str>,
) -> Result<InstructionIr, SchemaError> {
	check_ident("instruction", &doc.name.to_snake_case())?;

	let mut seen = HashSet::new();
	let mut roles = Vec::with_capacity(doc.roles.len());
	for role in &doc.roles {
		let param = role.name.to_snake_case();
		check_ident("role", &param)?;
		if RESERVED_ROLES.contains(&param.as_str()) {
			return Err(SchemaError::ReservedRole {
				instruction: doc.name.clone(),
				role: role.name.clone(),
			});
		}
		if !seen.insert(param) {
			return Err(SchemaError::DuplicateRole {
				instruction: doc.name.clone(),
				role: role.name.clone(),
			});
		}

		let record = role
			.record
			.as_deref()
			.map(|record| resolve_record(record, defined, &doc.name, &role.name))
			.transpose()?;

		roles.push(RoleIr {
			name: role.name.clone(),
			is_signer: role.signer,
			is_mutable: role.mutable,
			record,
			docs: role.docs.clone(),
		});
	}

	let arguments = match &doc.args {
		None => ArgumentsIr::Void,
		Some(fields) => {
			ArgumentsIr::Fields(lower_fields(
				fields,
				defined,
				&format!("{}.args", doc.name),
			)?)
		}
	};

	Ok(InstructionIr::new(
		doc.name.clone(),
		roles,
		arguments,
		doc.docs.clone(),
	))
}

/// Resolve a role's `record`: either a type from `types`, or a path with at
/// least one `::` naming a type defined elsewhere.
fn resolve_record(
	record: &str,
	defined: &HashSet<&str>,
	instruction: &str,
	role: &str,
) -> Result<RecordTypeRef, SchemaError> {
	let unknown = || {
		SchemaError::UnknownRecord {
			instruction: instruction.to_owned(),
			role: role.to_owned(),
			record: record.to_owned(),
		}
	};

	let record = record.trim();
	if !record.contains("::") {
		return if defined.contains(record) {
			Ok(RecordTypeRef::defined(record))
		} else {
			Err(unknown())
		};
	}

	let path = syn::parse_str::<syn::Path>(record).map_err(|_| unknown())?;
	let last = path.segments.last().ok_or_else(unknown)?;
	if !last.arguments.is_none() {
		return Err(unknown());
	}

	Ok(RecordTypeRef::external(record, last.ident.to_string()))
}

fn lower_event(doc: &StructDoc, defined: &HashSet<&str>) -> Result<EventIr, SchemaError> {
	let fields = lower_fields(&doc.fields, defined, &doc.name)?;
	Ok(EventIr::new(doc.name.clone(), fields, doc.docs.clone()))
}

fn lower_fields(
	fields: &[FieldDoc],
	defined: &HashSet<&str>,
	owner: &str,
) -> Result<Vec<FieldIr>, SchemaError> {
	let mut seen = HashSet::new();
	fields
		.iter()
		.map(|field| {
			let name = field.name.to_snake_case();
			check_ident("field", &name)?;
			if !seen.insert(name) {
				return Err(SchemaError::DuplicateField {
					context: owner.to_owned(),
					field: field.name.clone(),
				});
			}

			let context = format!("{owner}.{}", field.name);
			Ok(FieldIr {
				name: field.name.clone(),
				ty: parse_type(&field.ty, defined, &context)?,
				docs: field.docs.clone(),
			})
		})
		.collect()
}

fn lower_errors(errors: &[ErrorDoc]) -> Result<Vec<ErrorIr>, SchemaError> {
	let mut names = HashSet::new();
	let mut codes: HashMap<u32, &str> = HashMap::new();

	errors
		.iter()
		.map(|error| {
			check_ident("error", &error.name)?;
			if !names.insert(error.name.as_str()) {
				return Err(SchemaError::DuplicateErrorName {
					name: error.name.clone(),
				});
			}
			if let Some(first) = codes.insert(error.code, &error.name) {
				return Err(SchemaError::DuplicateErrorCode {
					code: error.code,
					first: first.to_owned(),
					second: error.name.clone(),
				});
			}

			Ok(ErrorIr {
				name: error.name.clone(),
				code: error.code,
				message: error.message.clone().unwrap_or_else(|| error.name.clone()),
				docs: error.docs.clone(),
			})
		})
		.collect()
}

/// Reject any two distinct `(namespace, name)` pairs that share a tag.
pub fn check_tag_collisions(entities: &[TaggedEntity]) -> Result<(), SchemaError> {
	let mut owners: HashMap<keel::Tag, &TaggedEntity> = HashMap::new();
	for entity in entities {
		match owners.get(&entity.tag) {
			Some(owner) if owner.namespace != entity.namespace || owner.name != entity.name => {
				return Err(SchemaError::TagCollision {
					tag: entity.tag,
					first: format!("{}:{}", owner.namespace, owner.name),
					second: format!("{}:{}", entity.namespace, entity.name),
				});
			}
			Some(_) => {}
			None => {
				owners.insert(entity.tag, entity);
			}
		}
	}
	Ok(())
}

/// Reject two schema entries whose generated items share a name, e.g. an
/// instruction `transfer` next to `Transfer`, or a record `FooEvent` next to
/// an event `Foo`.
pub fn check_name_clashes(items: &[GeneratedName]) -> Result<(), SchemaError> {
	let mut owners: HashMap<(ItemScope, &str), &str> = HashMap::new();
	for item in items {
		if let Some(first) = owners.insert((item.scope, item.name.as_str()), item.owner.as_str()) {
			return Err(SchemaError::NameClash {
				name: item.name.clone(),
				first: first.to_owned(),
				second: item.owner.clone(),
			});
		}
	}
	Ok(())
}

/// Types and events declared by the schema. A name may appear once.
#[derive(Default)]
struct Definitions(HashSet<String>);

impl Definitions {
	fn insert(&mut self, name: &str) -> Result<(), SchemaError> {
		if self.0.insert(name.to_owned()) {
			Ok(())
		} else {
			Err(SchemaError::DuplicateDefinition {
				name: name.to_owned(),
			})
		}
	}
}

/// Check that `name` can be emitted as a Rust identifier, raw if need be.
fn check_ident(kind: &'static str, name: &str) -> Result<(), SchemaError> {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return Err(SchemaError::EmptyName { kind });
	};

	let well_formed = (first.is_ascii_alphabetic() || first == '_')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
		&& !matches!(name, "_" | "self" | "Self" | "super" | "crate");
	if well_formed {
		Ok(())
	} else {
		Err(SchemaError::InvalidIdentifier {
			kind,
			name: name.to_owned(),
		})
	}
}
