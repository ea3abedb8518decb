//! Intermediate representation for a loaded program schema.
//!
//! The IR is built from the JSON schema by [`crate::parse`] and consumed by
//! [`crate::codegen`]. Every tag is computed when the IR is constructed, so
//! the generators only ever copy bytes.

use std::collections::HashSet;

use keel::Namespace;
use keel::Pubkey;
use keel::Tag;
use typed_builder::TypedBuilder;

/// Top-level IR for a single program.
#[derive(Debug, Clone)]
pub struct ProgramIr {
	pub name: String,
	pub address: Pubkey,
	pub docs: Vec<String>,
	pub types: Vec<TypeDefIr>,
	pub instructions: Vec<InstructionIr>,
	pub events: Vec<EventIr>,
	pub errors: Vec<ErrorIr>,
}

impl ProgramIr {
	/// The distinct record types referenced by instruction roles.
	///
	/// Walks instructions in order, then roles in order. Records are keyed by
	/// simple name and the first reference wins, so two paths ending in the
	/// same type name share one entry.
	pub fn record_catalog(&self) -> Vec<&RecordTypeRef> {
		let mut seen = HashSet::new();
		self.instructions
			.iter()
			.flat_map(|instruction| &instruction.roles)
			.filter_map(|role| role.record.as_ref())
			.filter(|record| seen.insert(record.simple_name.as_str()))
			.collect()
	}

	/// Every entity that carries a tag in the generated client: instructions
	/// (once per distinct name), catalog records, and events.
	pub fn tagged_entities(&self) -> Vec<TaggedEntity> {
		let mut seen = HashSet::new();
		let instructions = self
			.instructions
			.iter()
			.filter(|instruction| seen.insert(instruction.name.as_str()))
			.map(|instruction| {
				TaggedEntity {
					namespace: Namespace::Instruction,
					name: instruction.name.clone(),
					tag: instruction.tag,
				}
			});
		let records = self.record_catalog().into_iter().map(|record| {
			TaggedEntity {
				namespace: Namespace::Account,
				name: record.simple_name.clone(),
				tag: record.tag,
			}
		});
		let events = self.events.iter().map(|event| {
			TaggedEntity {
				namespace: Namespace::Event,
				name: event.name.clone(),
				tag: event.tag,
			}
		});

		instructions.chain(records).chain(events).collect()
	}
}

/// A plain struct declared in the schema's `types`.
#[derive(Debug, Clone)]
pub struct TypeDefIr {
	pub name: String,
	pub fields: Vec<FieldIr>,
	pub docs: Vec<String>,
}

/// A callable entry point of the program.
#[derive(Debug, Clone)]
pub struct InstructionIr {
	pub name: String,
	pub roles: Vec<RoleIr>,
	pub arguments: ArgumentsIr,
	pub tag: Tag,
	pub docs: Vec<String>,
}

impl InstructionIr {
	pub fn new(
		name: impl Into<String>,
		roles: Vec<RoleIr>,
		arguments: ArgumentsIr,
		docs: Vec<String>,
	) -> Self {
		let name = name.into();
		let tag = Tag::derive(Namespace::Instruction, &name);
		Self {
			name,
			roles,
			arguments,
			tag,
			docs,
		}
	}
}

/// A positional account parameter of an instruction.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RoleIr {
	#[builder(setter(into))]
	pub name: String,
	#[builder(default)]
	pub is_signer: bool,
	#[builder(default)]
	pub is_mutable: bool,
	/// Set when the account at this position holds a known record type.
	#[builder(default, setter(strip_option))]
	pub record: Option<RecordTypeRef>,
	#[builder(default)]
	pub docs: Vec<String>,
}

/// The argument bundle of an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentsIr {
	/// No argument bundle; the payload is the bare tag.
	Void,
	Fields(Vec<FieldIr>),
}

/// A typed field of a struct, event, or argument bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIr {
	pub name: String,
	pub ty: TypeIr,
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeIr {
	Primitive(Primitive),
	String,
	Pubkey,
	Vec(Box<TypeIr>),
	Option(Box<TypeIr>),
	Array(Box<TypeIr>, usize),
	/// A struct declared in the schema's `types`.
	Defined(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
	U8,
	U16,
	U32,
	U64,
	U128,
	I8,
	I16,
	I32,
	I64,
	I128,
	Bool,
}

impl Primitive {
	pub fn from_name(name: &str) -> Option<Self> {
		let primitive = match name {
			"u8" => Self::U8,
			"u16" => Self::U16,
			"u32" => Self::U32,
			"u64" => Self::U64,
			"u128" => Self::U128,
			"i8" => Self::I8,
			"i16" => Self::I16,
			"i32" => Self::I32,
			"i64" => Self::I64,
			"i128" => Self::I128,
			"bool" => Self::Bool,
			_ => return None,
		};
		Some(primitive)
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::U8 => "u8",
			Self::U16 => "u16",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::U128 => "u128",
			Self::I8 => "i8",
			Self::I16 => "i16",
			Self::I32 => "i32",
			Self::I64 => "i64",
			Self::I128 => "i128",
			Self::Bool => "bool",
		}
	}
}

/// A record type referenced by a role, with its precomputed account tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTypeRef {
	/// The Rust path used in generated code.
	pub path: String,
	/// The last path segment; names the catalog entry and seeds the tag.
	pub simple_name: String,
	pub tag: Tag,
	pub source: RecordSource,
}

impl RecordTypeRef {
	/// A record declared in the schema's `types`.
	pub fn defined(name: impl Into<String>) -> Self {
		let name = name.into();
		Self::new(name.clone(), name, RecordSource::Defined)
	}

	/// A record type living outside the generated module, such as
	/// `crate::state::Config`.
	pub fn external(path: impl Into<String>, simple_name: impl Into<String>) -> Self {
		Self::new(path.into(), simple_name.into(), RecordSource::External)
	}

	fn new(path: String, simple_name: String, source: RecordSource) -> Self {
		let tag = Tag::derive(Namespace::Account, &simple_name);
		Self {
			path,
			simple_name,
			tag,
			source,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
	Defined,
	External,
}

/// A notification record published through the program log.
#[derive(Debug, Clone)]
pub struct EventIr {
	pub name: String,
	pub fields: Vec<FieldIr>,
	pub tag: Tag,
	pub docs: Vec<String>,
}

impl EventIr {
	pub fn new(name: impl Into<String>, fields: Vec<FieldIr>, docs: Vec<String>) -> Self {
		let name = name.into();
		let tag = Tag::derive(Namespace::Event, &name);
		Self {
			name,
			fields,
			tag,
			docs,
		}
	}
}

/// A custom program error code.
#[derive(Debug, Clone)]
pub struct ErrorIr {
	pub name: String,
	pub code: u32,
	pub message: String,
	pub docs: Vec<String>,
}

/// One row of [`ProgramIr::tagged_entities`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedEntity {
	pub namespace: Namespace,
	pub name: String,
	pub tag: Tag,
}
