//! The JSON schema document, as deserialized.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDoc {
	#[serde(default)]
	pub name: Option<String>,
	/// Base58 program address.
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub docs: Vec<String>,
	#[serde(default)]
	pub types: Vec<StructDoc>,
	#[serde(default)]
	pub instructions: Vec<InstructionDoc>,
	#[serde(default)]
	pub events: Vec<StructDoc>,
	#[serde(default)]
	pub errors: Vec<ErrorDoc>,
}

impl SchemaDoc {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructDoc {
	pub name: String,
	#[serde(default)]
	pub fields: Vec<FieldDoc>,
	#[serde(default)]
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDoc {
	pub name: String,
	/// Rust type syntax, e.g. `u64` or `Vec<Pubkey>`.
	#[serde(rename = "type")]
	pub ty: String,
	#[serde(default)]
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstructionDoc {
	pub name: String,
	#[serde(default)]
	pub roles: Vec<RoleDoc>,
	/// `None` when absent or `null`: the instruction takes no argument
	/// bundle. An empty array still produces an (empty) bundle.
	#[serde(default)]
	pub args: Option<Vec<FieldDoc>>,
	#[serde(default)]
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleDoc {
	pub name: String,
	#[serde(default)]
	pub signer: bool,
	#[serde(default)]
	pub mutable: bool,
	/// A type from `types`, or a `::`-qualified path to a record type
	/// defined elsewhere.
	#[serde(default)]
	pub record: Option<String>,
	#[serde(default)]
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorDoc {
	pub name: String,
	pub code: u32,
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub docs: Vec<String>,
}
