use heck::ToUpperCamelCase;
use proc_macro2::Ident;
use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::Context;
use crate::codegen::doc_attrs;
use crate::codegen::names;
use crate::codegen::tag_tokens;
use crate::codegen::types::struct_tokens;
use crate::ir::ArgumentsIr;
use crate::ir::InstructionIr;

/// Clippy's default `too-many-arguments-threshold`.
pub const MAX_PARAMS: usize = 7;

/// Names shared by the builder and the facade for one instruction.
pub struct InstructionNames {
	pub tag: Ident,
	pub args: Option<Ident>,
	pub builder: Ident,
	pub roles: Vec<Ident>,
}

impl InstructionNames {
	pub fn new(instruction: &InstructionIr) -> Self {
		let args = match instruction.arguments {
			ArgumentsIr::Void => None,
			ArgumentsIr::Fields(_) => {
				Some(names::ident(&format!(
					"{}Args",
					instruction.name.to_upper_camel_case()
				)))
			}
		};

		Self {
			tag: names::constant(&instruction.name, "INSTRUCTION_TAG"),
			args,
			builder: names::prefixed("build", &instruction.name),
			roles: instruction.roles.iter().map(|role| names::snake(&role.name)).collect(),
		}
	}

	/// The builder's parameter count.
	pub fn param_count(&self) -> usize {
		self.roles.len() + usize::from(self.args.is_some())
	}
}

/// Tag constants, argument structs, and `build_*` functions for every
/// instruction, in schema order.
pub fn generate_instructions(instructions: &[InstructionIr], cx: &Context) -> TokenStream {
	let items = instructions
		.iter()
		.map(|instruction| generate_instruction(instruction, cx));
	quote!(#(#items)*)
}

fn generate_instruction(instruction: &InstructionIr, cx: &Context) -> TokenStream {
	let rt = &cx.runtime;
	let names = InstructionNames::new(instruction);
	let tag_name = &names.tag;
	let builder = &names.builder;
	let tag = tag_tokens(instruction.tag, cx);
	let tag_doc = format!(" Tag of the `{}` instruction.", instruction.name);
	let docs = doc_attrs(&instruction.docs);

	let metas = instruction.roles.iter().zip(&names.roles).map(|(role, param)| {
		let is_signer = role.is_signer;
		let is_writable = role.is_mutable;
		quote! {
			#rt::AccountMeta {
				pubkey: #param,
				is_signer: #is_signer,
				is_writable: #is_writable,
			}
		}
	});
	let params = names.roles.iter().map(|param| quote!(#param: #rt::Pubkey));

	let too_many = (names.param_count() > MAX_PARAMS)
		.then(|| quote!(#[allow(clippy::too_many_arguments)]));

	let (args_struct, args_param, data, wraps) = match (&instruction.arguments, &names.args) {
		(ArgumentsIr::Fields(fields), Some(args_name)) => {
			let args_doc = vec![format!("Arguments of the `{}` instruction.", instruction.name)];
			(
				struct_tokens(args_name, fields, &args_doc, cx),
				quote!(args: &#args_name),
				quote!(#rt::encode_tagged(#tag_name, args)?),
				TokenStream::new(),
			)
		}
		_ => {
			(
				TokenStream::new(),
				TokenStream::new(),
				quote!(#tag_name.to_vec()),
				quote!(#[allow(clippy::unnecessary_wraps)]),
			)
		}
	};

	quote! {
		#[doc = #tag_doc]
		pub const #tag_name: #rt::Tag = #tag;

		#args_struct

		#docs
		#too_many
		#wraps
		pub fn #builder(#(#params,)* #args_param) -> Result<#rt::Instruction, #rt::ClientError> {
			Ok(#rt::Instruction {
				program_id: ID,
				accounts: vec![#(#metas),*],
				data: #data,
			})
		}
	}
}
