use std::path::PathBuf;

use keel::Tag;

/// A schema that cannot be turned into a client.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
	#[error("program address is missing")]
	MissingAddress,

	#[error("program address `{address}` is not a valid base58 public key")]
	InvalidAddress { address: String },

	#[error("{kind} name is empty")]
	EmptyName { kind: &'static str },

	#[error("`{name}` is not a valid identifier for a {kind}")]
	InvalidIdentifier { kind: &'static str, name: String },

	#[error("instruction `{instruction}` declares role `{role}` more than once")]
	DuplicateRole { instruction: String, role: String },

	#[error("instruction `{instruction}` uses the reserved role name `{role}`")]
	ReservedRole { instruction: String, role: String },

	#[error("`{context}` declares field `{field}` more than once")]
	DuplicateField { context: String, field: String },

	#[error("cannot parse type `{ty}` of `{context}`: {message}")]
	InvalidType {
		context: String,
		ty: String,
		message: String,
	},

	#[error("type `{ty}` of `{context}` is not supported")]
	UnsupportedType { context: String, ty: String },

	#[error("unknown type `{name}` referenced by `{context}`")]
	UnknownType { context: String, name: String },

	#[error("unknown record `{record}` referenced by role `{role}` of instruction `{instruction}`")]
	UnknownRecord {
		instruction: String,
		role: String,
		record: String,
	},

	#[error("`{name}` is defined more than once")]
	DuplicateDefinition { name: String },

	#[error("{first} and {second} both generate `{name}`")]
	NameClash {
		name: String,
		first: String,
		second: String,
	},

	#[error("error `{name}` is declared more than once")]
	DuplicateErrorName { name: String },

	#[error("errors `{first}` and `{second}` share code {code}")]
	DuplicateErrorCode {
		code: u32,
		first: String,
		second: String,
	},

	#[error("tag {tag} of `{first}` collides with `{second}`")]
	TagCollision {
		tag: Tag,
		first: String,
		second: String,
	},
}

/// Errors produced while generating a client.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
	#[error("IO error at {path}: {source}")]
	Io {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("Failed to parse schema JSON in {path}: {source}")]
	Json {
		path: PathBuf,
		source: serde_json::Error,
	},

	#[error("Invalid schema in {path}: {source}")]
	Schema { path: PathBuf, source: SchemaError },

	#[error("Runtime crate `{path}` is not a Rust path")]
	InvalidRuntimePath { path: String },

	#[error("Generated code failed to parse: {0}")]
	Render(#[from] syn::Error),
}

impl GenerateError {
	pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}

	pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
		Self::Json {
			path: path.into(),
			source,
		}
	}

	pub fn schema(path: impl Into<PathBuf>, source: SchemaError) -> Self {
		Self::Schema {
			path: path.into(),
			source,
		}
	}
}
