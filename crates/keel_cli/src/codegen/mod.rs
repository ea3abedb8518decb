//! Rust client generation.
//!
//! Each generator lowers one part of a [`ProgramIr`] into a token stream. The
//! streams are concatenated, parsed back as a [`syn::File`], and formatted
//! with `prettyplease`. Generated items refer to runtime items through fully
//! qualified paths and carry no inner attributes, so the output can be
//! `include!`d into any module.

pub mod client;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod names;
pub mod records;
pub mod types;

use std::collections::HashSet;

use keel::Tag;
use proc_macro2::Ident;
use proc_macro2::Literal;
use proc_macro2::TokenStream;
use quote::ToTokens;
use quote::quote;

use crate::GenerateOptions;
use crate::codegen::instructions::InstructionNames;
use crate::error::GenerateError;
use crate::ir::ProgramIr;

/// First line of every generated file.
pub const HEADER: &str = "// This file is generated by keel. Do not edit it by hand.";

/// Settings shared by every generator.
#[derive(Debug, Clone)]
pub struct Context {
	/// Path of the runtime crate, e.g. `::keel`.
	pub runtime: syn::Path,
	/// The same path followed by `::borsh`, as a string for
	/// `#[borsh(crate = "...")]`.
	pub borsh_crate: String,
}

impl Context {
	pub fn new(runtime_crate: &str) -> Result<Self, GenerateError> {
		let runtime = syn::parse_str::<syn::Path>(runtime_crate.trim()).map_err(|_| {
			GenerateError::InvalidRuntimePath {
				path: runtime_crate.to_owned(),
			}
		})?;
		let borsh_crate = format!(
			"{}::borsh",
			runtime.to_token_stream().to_string().replace(' ', "")
		);

		Ok(Self {
			runtime,
			borsh_crate,
		})
	}
}

/// Render the client for `program` as formatted Rust source.
pub fn render_program(program: &ProgramIr, options: &GenerateOptions) -> Result<String, GenerateError> {
	let cx = Context::new(&options.runtime_crate)?;
	let tokens = program_tokens(program, &cx, options.facade)?;
	let file = syn::parse2::<syn::File>(tokens)?;

	Ok(format!("{HEADER}\n\n{}", prettyplease::unparse(&file)))
}

/// All generated items for `program`, in output order.
pub fn program_tokens(program: &ProgramIr, cx: &Context, facade: bool) -> syn::Result<TokenStream> {
	let rt = &cx.runtime;
	let docs = doc_attrs(&program.docs);
	let address = program.address.to_string();

	let types = types::generate_type_defs(&program.types, cx);
	let instructions = instructions::generate_instructions(&program.instructions, cx);
	let records = records::generate_records(&program.record_catalog(), cx)?;
	let events = events::generate_events(program, cx);
	let errors = errors::generate_errors(program);
	let client = if facade {
		client::generate_client(program, cx)?
	} else {
		TokenStream::new()
	};

	Ok(quote! {
		#docs
		pub const ID: #rt::Pubkey = #rt::Pubkey::from_str_const(#address);

		#types
		#instructions
		#records
		#events
		#errors
		#client
	})
}

/// Where a generated name lives. Names only clash within one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemScope {
	/// Structs and enums.
	Type,
	/// Functions and constants.
	Value,
	/// Methods of the client facade.
	Method,
}

/// A name the generator emits, with the schema entry it comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedName {
	pub scope: ItemScope,
	pub name: String,
	/// e.g. ``instruction `transfer` ``.
	pub owner: String,
}

impl GeneratedName {
	fn new(scope: ItemScope, name: &Ident, owner: &str) -> Self {
		Self {
			scope,
			name: name.to_string(),
			owner: owner.to_owned(),
		}
	}
}

/// Every module-level item and facade method generated for `program`, in
/// output order. A repeated instruction name is listed once.
pub fn generated_names(program: &ProgramIr) -> Vec<GeneratedName> {
	use ItemScope::Method;
	use ItemScope::Type;
	use ItemScope::Value;

	let mut items = Vec::new();

	let owner = format!("program `{}`", program.name);
	items.push(GeneratedName::new(Value, &names::ident("ID"), &owner));
	items.push(GeneratedName::new(Type, &names::program_item(&program.name, "Client"), &owner));
	for method in ["new", "transport", "into_transport"] {
		items.push(GeneratedName::new(Method, &names::ident(method), &owner));
	}
	if !program.events.is_empty() {
		items.push(GeneratedName::new(Type, &names::program_item(&program.name, "Event"), &owner));
		items.push(GeneratedName::new(Value, &names::ident("decode_event"), &owner));
		items.push(GeneratedName::new(Value, &names::ident("parse_events"), &owner));
	}
	if !program.errors.is_empty() {
		items.push(GeneratedName::new(Type, &names::program_item(&program.name, "Error"), &owner));
	}

	for def in &program.types {
		let owner = format!("type `{}`", def.name);
		items.push(GeneratedName::new(Type, &names::ident(&def.name), &owner));
	}

	let mut seen = HashSet::new();
	for instruction in &program.instructions {
		if !seen.insert(instruction.name.as_str()) {
			continue;
		}
		let owner = format!("instruction `{}`", instruction.name);
		let generated = InstructionNames::new(instruction);
		items.push(GeneratedName::new(Value, &generated.tag, &owner));
		if let Some(args) = &generated.args {
			items.push(GeneratedName::new(Type, args, &owner));
		}
		items.push(GeneratedName::new(Value, &generated.builder, &owner));
		items.push(GeneratedName::new(Method, &names::prefixed("send", &instruction.name), &owner));
	}

	for record in program.record_catalog() {
		let simple = &record.simple_name;
		let owner = format!("record `{simple}`");
		items.push(GeneratedName::new(Value, &names::constant(simple, "ACCOUNT_TAG"), &owner));
		items.push(GeneratedName::new(Value, &names::prefixed("decode", simple), &owner));
		items.push(GeneratedName::new(Value, &names::decoder(simple, "account"), &owner));
		items.push(GeneratedName::new(Method, &names::prefixed("get", simple), &owner));
	}

	for event in &program.events {
		let owner = format!("event `{}`", event.name);
		items.push(GeneratedName::new(Type, &names::ident(&event.name), &owner));
		items.push(GeneratedName::new(Value, &names::constant(&event.name, "EVENT_TAG"), &owner));
		items.push(GeneratedName::new(Value, &names::decoder(&event.name, "event"), &owner));
	}

	items
}

/// `#[doc]` attributes for each line of `docs`.
pub fn doc_attrs(docs: &[String]) -> TokenStream {
	let lines = docs.iter().map(|line| {
		let line = match line.trim_end() {
			"" => String::new(),
			line => format!(" {line}"),
		};
		quote!(#[doc = #line])
	});
	quote!(#(#lines)*)
}

/// A `Tag::new([..])` expression for `tag`.
pub fn tag_tokens(tag: Tag, cx: &Context) -> TokenStream {
	let rt = &cx.runtime;
	let bytes = tag.as_bytes().iter().map(|byte| Literal::u8_unsuffixed(*byte));
	quote!(#rt::Tag::new([#(#bytes),*]))
}
