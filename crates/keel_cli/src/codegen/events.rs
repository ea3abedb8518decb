use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::Context;
use crate::codegen::names;
use crate::codegen::tag_tokens;
use crate::codegen::types::struct_tokens;
use crate::ir::EventIr;
use crate::ir::ProgramIr;

/// Event structs, their tags and decoders, the program event enum, and the
/// log parser. Empty when the schema declares no events.
pub fn generate_events(program: &ProgramIr, cx: &Context) -> TokenStream {
	if program.events.is_empty() {
		return TokenStream::new();
	}

	let rt = &cx.runtime;
	let enum_name = names::program_item(&program.name, "Event");
	let structs = program.events.iter().map(|event| generate_event(event, cx));

	let variants = program.events.iter().map(|event| {
		let ident = names::ident(&event.name);
		quote!(#ident(#ident))
	});
	let arms = program.events.iter().map(|event| {
		let ident = names::ident(&event.name);
		let tag_name = names::constant(&event.name, "EVENT_TAG");
		let decode = names::decoder(&event.name, "event");
		quote! {
			#tag_name => #decode(data).map(|event| Some(#enum_name::#ident(event))),
		}
	});
	let enum_doc = format!(" Every event published by the `{}` program.", program.name);

	quote! {
		#(#structs)*

		#[doc = #enum_doc]
		#[derive(Clone, Debug, PartialEq, Eq)]
		pub enum #enum_name {
			#(#variants,)*
		}

		/// Decode a published event record. Returns `Ok(None)` when the data
		/// does not start with the tag of a known event.
		pub fn decode_event(data: &[u8]) -> Result<Option<#enum_name>, #rt::ClientError> {
			let Some(tag) = #rt::Tag::from_prefix(data) else {
				return Ok(None);
			};
			match tag {
				#(#arms)*
				_ => Ok(None),
			}
		}

		/// Collect the known events from transaction log lines, in order.
		/// Lines other than `Program data:` records and records with unknown
		/// tags are skipped.
		pub fn parse_events(logs: &[String]) -> Result<Vec<#enum_name>, #rt::ClientError> {
			let mut events = Vec::new();
			for line in logs {
				let Some(data) = #rt::parse_program_data(line)? else {
					continue;
				};
				if let Some(event) = decode_event(&data)? {
					events.push(event);
				}
			}
			Ok(events)
		}
	}
}

fn generate_event(event: &EventIr, cx: &Context) -> TokenStream {
	let rt = &cx.runtime;
	let ident = names::ident(&event.name);
	let name = &event.name;
	let tag_name = names::constant(&event.name, "EVENT_TAG");
	let decode = names::decoder(name, "event");
	let tag = tag_tokens(event.tag, cx);
	let definition = struct_tokens(&ident, &event.fields, &event.docs, cx);
	let tag_doc = format!(" Tag of the `{name}` event.");
	let decode_doc = format!(" Decode a published `{name}` record. Every byte must be consumed.");

	quote! {
		#definition

		impl #rt::Event for #ident {
			const NAME: &'static str = #name;
		}

		#[doc = #tag_doc]
		pub const #tag_name: #rt::Tag = #tag;

		#[doc = #decode_doc]
		pub fn #decode(data: &[u8]) -> Result<#ident, #rt::ClientError> {
			#rt::decode_tagged(#tag_name, data)
		}
	}
}

#[cfg(test)]
mod tests {
	use keel::Pubkey;

	use super::*;
	use crate::ir::FieldIr;
	use crate::ir::Primitive;
	use crate::ir::TypeIr;

	fn program(events: Vec<EventIr>) -> ProgramIr {
		ProgramIr {
			name: "token_program".to_owned(),
			address: Pubkey::new_unique(),
			docs: vec![],
			types: vec![],
			instructions: vec![],
			events,
			errors: vec![],
		}
	}

	fn render(program: &ProgramIr) -> String {
		let cx = Context::new("::keel").unwrap_or_else(|e| panic!("{e}"));
		let file = syn::parse2::<syn::File>(generate_events(program, &cx))
			.unwrap_or_else(|e| panic!("{e}"));
		prettyplease::unparse(&file)
	}

	#[test]
	fn emits_event_catalog() {
		let simple = EventIr::new(
			"SimpleEvent",
			vec![
				FieldIr {
					name: "count".to_owned(),
					ty: TypeIr::Primitive(Primitive::U64),
					docs: vec![],
				},
				FieldIr {
					name: "flag".to_owned(),
					ty: TypeIr::Primitive(Primitive::Bool),
					docs: vec![],
				},
			],
			vec![],
		);
		let source = render(&program(vec![simple]));

		assert!(source.contains("pub struct SimpleEvent"));
		assert!(source.contains("impl ::keel::Event for SimpleEvent"));
		assert!(source.contains("const NAME: &'static str = \"SimpleEvent\";"));
		assert!(source.contains("pub const SIMPLE_EVENT_EVENT_TAG: ::keel::Tag"));
		assert!(source.contains("pub fn decode_simple_event_event("));
		assert!(source.contains("pub enum TokenProgramEvent"));
		assert!(source.contains("SimpleEvent(SimpleEvent)"));
		assert!(source.contains("pub fn decode_event("));
		assert!(source.contains("pub fn parse_events("));
	}

	#[test]
	fn no_events_no_catalog() {
		let cx = Context::new("::keel").unwrap_or_else(|e| panic!("{e}"));
		assert!(generate_events(&program(vec![]), &cx).is_empty());
	}
}
