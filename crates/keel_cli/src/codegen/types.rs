use proc_macro2::Ident;
use proc_macro2::Literal;
use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::Context;
use crate::codegen::doc_attrs;
use crate::codegen::names;
use crate::ir::FieldIr;
use crate::ir::TypeDefIr;
use crate::ir::TypeIr;

/// The Rust type for a schema field type.
pub fn type_tokens(ty: &TypeIr, cx: &Context) -> TokenStream {
	let rt = &cx.runtime;
	match ty {
		TypeIr::Primitive(primitive) => {
			let ident = names::ident(primitive.as_str());
			quote!(#ident)
		}
		TypeIr::String => quote!(String),
		TypeIr::Pubkey => quote!(#rt::Pubkey),
		TypeIr::Vec(inner) => {
			let inner = type_tokens(inner, cx);
			quote!(Vec<#inner>)
		}
		TypeIr::Option(inner) => {
			let inner = type_tokens(inner, cx);
			quote!(Option<#inner>)
		}
		TypeIr::Array(inner, len) => {
			let inner = type_tokens(inner, cx);
			let len = Literal::usize_unsuffixed(*len);
			quote!([#inner; #len])
		}
		TypeIr::Defined(name) => {
			let ident = names::ident(name);
			quote!(#ident)
		}
	}
}

/// A borsh-encoded struct with public fields in declared order.
pub fn struct_tokens(
	name: &Ident,
	fields: &[FieldIr],
	docs: &[String],
	cx: &Context,
) -> TokenStream {
	let rt = &cx.runtime;
	let borsh_crate = &cx.borsh_crate;
	let docs = doc_attrs(docs);
	let fields = fields.iter().map(|field| {
		let docs = doc_attrs(&field.docs);
		let name = names::snake(&field.name);
		let ty = type_tokens(&field.ty, cx);
		quote! {
			#docs
			pub #name: #ty,
		}
	});

	quote! {
		#docs
		#[derive(
			Clone,
			Debug,
			PartialEq,
			Eq,
			#rt::borsh::BorshSerialize,
			#rt::borsh::BorshDeserialize,
		)]
		#[borsh(crate = #borsh_crate)]
		pub struct #name {
			#(#fields)*
		}
	}
}

/// Structs declared in the schema's `types`.
pub fn generate_type_defs(types: &[TypeDefIr], cx: &Context) -> TokenStream {
	let defs = types
		.iter()
		.map(|def| struct_tokens(&names::ident(&def.name), &def.fields, &def.docs, cx));
	quote!(#(#defs)*)
}
