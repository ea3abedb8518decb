use proc_macro2::Ident;
use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::Context;
use crate::codegen::names;
use crate::codegen::tag_tokens;
use crate::ir::RecordSource;
use crate::ir::RecordTypeRef;

/// Names generated for one catalog entry.
pub struct RecordNames {
	pub tag: Ident,
	pub decode: Ident,
	pub decode_account: Ident,
	pub getter: Ident,
	pub ty: syn::Path,
}

impl RecordNames {
	pub fn new(record: &RecordTypeRef) -> syn::Result<Self> {
		let simple = &record.simple_name;
		let ty = match record.source {
			RecordSource::Defined => syn::Path::from(names::ident(simple)),
			RecordSource::External => syn::parse_str::<syn::Path>(&record.path)?,
		};

		Ok(Self {
			tag: names::constant(simple, "ACCOUNT_TAG"),
			decode: names::prefixed("decode", simple),
			decode_account: names::decoder(simple, "account"),
			getter: names::prefixed("get", simple),
			ty,
		})
	}
}

/// Tag constants and decode helpers for every record in the catalog.
pub fn generate_records(catalog: &[&RecordTypeRef], cx: &Context) -> syn::Result<TokenStream> {
	let items = catalog
		.iter()
		.map(|record| generate_record(record, cx))
		.collect::<syn::Result<Vec<_>>>()?;
	Ok(quote!(#(#items)*))
}

fn generate_record(record: &RecordTypeRef, cx: &Context) -> syn::Result<TokenStream> {
	let rt = &cx.runtime;
	let names = RecordNames::new(record)?;
	let RecordNames {
		tag: tag_name,
		decode,
		decode_account,
		ty,
		..
	} = &names;
	let tag = tag_tokens(record.tag, cx);
	let simple = &record.simple_name;
	let tag_doc = format!(" Tag of `{simple}` account data.");
	let decode_doc = format!(
		" Decode `{simple}` account data. The data must start with [`{tag_name}`]; bytes after \
		 the record are ignored."
	);

	// Foreign types may not be given trait impls here.
	let record_impl = match record.source {
		RecordSource::Defined => {
			quote! {
				impl #rt::Record for #ty {
					const NAME: &'static str = #simple;
				}
			}
		}
		RecordSource::External => TokenStream::new(),
	};

	Ok(quote! {
		#[doc = #tag_doc]
		pub const #tag_name: #rt::Tag = #tag;

		#record_impl

		#[doc = #decode_doc]
		pub fn #decode(data: &[u8]) -> Result<#ty, #rt::ClientError> {
			#rt::decode_record(#tag_name, data)
		}

		/// Decode a fetched account's data.
		pub fn #decode_account(account: &impl #rt::ReadableAccount) -> Result<#ty, #rt::ClientError> {
			#decode(#rt::ReadableAccount::data(account))
		}
	})
}
