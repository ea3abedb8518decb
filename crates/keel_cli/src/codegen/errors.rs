use proc_macro2::Literal;
use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::doc_attrs;
use crate::codegen::names;
use crate::ir::ProgramIr;

/// The program's custom error codes as a `#[repr(u32)]` enum. Empty when the
/// schema declares no errors.
pub fn generate_errors(program: &ProgramIr) -> TokenStream {
	if program.errors.is_empty() {
		return TokenStream::new();
	}

	let enum_name = names::program_item(&program.name, "Error");
	let enum_doc = format!(" Custom error codes returned by the `{}` program.", program.name);

	let variants = program.errors.iter().map(|error| {
		let docs = doc_attrs(&error.docs);
		let ident = names::ident(&error.name);
		let code = Literal::u32_unsuffixed(error.code);
		quote! {
			#docs
			#ident = #code,
		}
	});
	let from_code = program.errors.iter().map(|error| {
		let ident = names::ident(&error.name);
		let code = Literal::u32_unsuffixed(error.code);
		quote!(#code => Some(Self::#ident),)
	});
	let messages = program.errors.iter().map(|error| {
		let ident = names::ident(&error.name);
		let message = &error.message;
		quote!(Self::#ident => #message,)
	});

	quote! {
		#[doc = #enum_doc]
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
		#[repr(u32)]
		pub enum #enum_name {
			#(#variants)*
		}

		impl #enum_name {
			/// The variant for a program error code, if it is one of ours.
			pub const fn from_code(code: u32) -> Option<Self> {
				match code {
					#(#from_code)*
					_ => None,
				}
			}

			pub const fn code(self) -> u32 {
				self as u32
			}

			pub const fn message(self) -> &'static str {
				match self {
					#(#messages)*
				}
			}
		}

		impl ::core::fmt::Display for #enum_name {
			fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
				f.write_str(self.message())
			}
		}

		impl ::std::error::Error for #enum_name {}
	}
}
