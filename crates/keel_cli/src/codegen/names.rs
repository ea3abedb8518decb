//! Identifier helpers shared by the generators.

use heck::ToShoutySnakeCase;
use heck::ToSnakeCase;
use heck::ToUpperCamelCase;
use proc_macro2::Ident;
use proc_macro2::Span;

/// An identifier for `name`, escaped as a raw identifier when `name` is a
/// keyword. Names are validated when the schema is loaded.
pub fn ident(name: &str) -> Ident {
	if syn::parse_str::<Ident>(name).is_ok() {
		Ident::new(name, Span::call_site())
	} else {
		Ident::new_raw(name, Span::call_site())
	}
}

/// `snake_case` identifier, used for functions, parameters, and fields.
pub fn snake(name: &str) -> Ident {
	ident(&name.to_snake_case())
}

/// `SHOUTY_SNAKE_CASE` identifier with a suffix, used for constants.
pub fn constant(name: &str, suffix: &str) -> Ident {
	ident(&format!("{}_{suffix}", name.to_shouty_snake_case()))
}

/// `<Program><suffix>`, e.g. `TokenProgramClient`.
pub fn program_item(program: &str, suffix: &str) -> Ident {
	ident(&format!("{}{suffix}", program.to_upper_camel_case()))
}

pub fn prefixed(prefix: &str, name: &str) -> Ident {
	ident(&format!("{prefix}_{}", name.to_snake_case()))
}

/// `decode_<name>_<kind>`, e.g. `decode_vault_account`.
pub fn decoder(name: &str, kind: &str) -> Ident {
	ident(&format!("decode_{}_{kind}", name.to_snake_case()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn escapes_keywords() {
		assert_eq!(ident("type").to_string(), "r#type");
		assert_eq!(snake("Match").to_string(), "r#match");
		assert_eq!(ident("amount").to_string(), "amount");
	}

	#[test]
	fn builds_item_names() {
		assert_eq!(constant("initializeVault", "INSTRUCTION_TAG").to_string(), "INITIALIZE_VAULT_INSTRUCTION_TAG");
		assert_eq!(prefixed("build", "initializeVault").to_string(), "build_initialize_vault");
		assert_eq!(decoder("SimpleEvent", "event").to_string(), "decode_simple_event_event");
		assert_eq!(program_item("token_program", "Client").to_string(), "TokenProgramClient");
	}
}
