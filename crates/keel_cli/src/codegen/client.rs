use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::Context;
use crate::codegen::doc_attrs;
use crate::codegen::instructions::InstructionNames;
use crate::codegen::instructions::MAX_PARAMS;
use crate::codegen::names;
use crate::codegen::records::RecordNames;
use crate::ir::InstructionIr;
use crate::ir::ProgramIr;
use crate::ir::RecordTypeRef;

/// The `<Program>Client` facade: one `send_*` per instruction and one `get_*`
/// per catalog record.
pub fn generate_client(program: &ProgramIr, cx: &Context) -> syn::Result<TokenStream> {
	let rt = &cx.runtime;
	let client = names::program_item(&program.name, "Client");
	let mut docs = vec![format!(
		"Client for the `{}` program. Requests go through the wrapped transport.",
		program.name
	)];
	if !program.docs.is_empty() {
		docs.push(String::new());
		docs.extend(program.docs.iter().cloned());
	}
	let docs = doc_attrs(&docs);

	let senders = program
		.instructions
		.iter()
		.map(|instruction| generate_sender(instruction, cx));
	let getters = program
		.record_catalog()
		.into_iter()
		.map(|record| generate_getter(record, cx))
		.collect::<syn::Result<Vec<_>>>()?;

	Ok(quote! {
		#docs
		#[derive(Clone, Debug)]
		pub struct #client<T> {
			transport: T,
		}

		impl<T> #client<T> {
			pub const fn new(transport: T) -> Self {
				Self { transport }
			}

			pub const fn transport(&self) -> &T {
				&self.transport
			}

			pub fn into_transport(self) -> T {
				self.transport
			}
		}

		impl<T: #rt::Transport> #client<T> {
			#(#senders)*
			#(#getters)*
		}
	})
}

fn generate_sender(instruction: &InstructionIr, cx: &Context) -> TokenStream {
	let rt = &cx.runtime;
	let names = InstructionNames::new(instruction);
	let builder = &names.builder;
	let sender = names::prefixed("send", &instruction.name);
	let doc = format!(" Build a `{}` instruction and submit it.", instruction.name);

	let roles = &names.roles;
	let (args_param, args_arg) = match &names.args {
		Some(args) => (quote!(args: &#args,), quote!(args)),
		None => (TokenStream::new(), TokenStream::new()),
	};
	// The receiver does not count towards clippy's threshold.
	let too_many = (names.param_count() + 1 > MAX_PARAMS)
		.then(|| quote!(#[allow(clippy::too_many_arguments)]));

	quote! {
		#[doc = #doc]
		#too_many
		pub fn #sender(
			&self,
			#(#roles: #rt::Pubkey,)*
			#args_param
			signers: &[&T::Signer],
		) -> Result<T::Receipt, #rt::ClientError> {
			let instruction = #builder(#(#roles,)* #args_arg)?;
			#rt::Transport::submit(&self.transport, instruction, signers)
				.map_err(#rt::ClientError::Submit)
		}
	}
}

fn generate_getter(record: &RecordTypeRef, cx: &Context) -> syn::Result<TokenStream> {
	let rt = &cx.runtime;
	let RecordNames {
		decode_account,
		getter,
		ty,
		..
	} = RecordNames::new(record)?;
	let doc = format!(
		" Fetch and decode the `{}` stored at `address`. Returns `Ok(None)` when no account \
		 exists there.",
		record.simple_name
	);

	Ok(quote! {
		#[doc = #doc]
		pub fn #getter(&self, address: &#rt::Pubkey) -> Result<Option<#ty>, #rt::ClientError> {
			let Some(account) = #rt::Transport::fetch_account(&self.transport, address)
				.map_err(#rt::ClientError::Fetch)?
			else {
				return Ok(None);
			};
			#decode_account(&account).map(Some)
		}
	})
}

#[cfg(test)]
mod tests {
	use keel::Pubkey;

	use super::*;
	use crate::ir::ArgumentsIr;
	use crate::ir::FieldIr;
	use crate::ir::Primitive;
	use crate::ir::RoleIr;
	use crate::ir::TypeIr;

	fn render(program: &ProgramIr) -> String {
		let cx = Context::new("::keel").unwrap_or_else(|e| panic!("{e}"));
		let tokens = generate_client(program, &cx).unwrap_or_else(|e| panic!("{e}"));
		let file = syn::parse2::<syn::File>(tokens).unwrap_or_else(|e| panic!("{e}"));
		prettyplease::unparse(&file)
	}

	fn role_with_record(name: &str, record: RecordTypeRef) -> RoleIr {
		RoleIr::builder().name(name).record(record).build()
	}

	#[test]
	fn one_sender_per_instruction_one_getter_per_record() {
		let program = ProgramIr {
			name: "token_program".to_owned(),
			address: Pubkey::new_unique(),
			docs: vec!["A token vault.".to_owned()],
			types: vec![],
			instructions: vec![
				InstructionIr::new(
					"deposit",
					vec![
						role_with_record("vault", RecordTypeRef::defined("Vault")),
						RoleIr::builder().name("owner").is_signer(true).build(),
					],
					ArgumentsIr::Fields(vec![FieldIr {
						name: "amount".to_owned(),
						ty: TypeIr::Primitive(Primitive::U64),
						docs: vec![],
					}]),
					vec![],
				),
				InstructionIr::new(
					"close",
					vec![role_with_record("vault", RecordTypeRef::defined("Vault"))],
					ArgumentsIr::Void,
					vec![],
				),
			],
			events: vec![],
			errors: vec![],
		};
		let source = render(&program);

		assert!(source.contains("pub struct TokenProgramClient<T>"));
		assert!(source.contains("impl<T: ::keel::Transport> TokenProgramClient<T>"));
		assert!(source.contains("pub fn send_deposit("));
		assert!(source.contains("let instruction = build_deposit(vault, owner, args)?;"));
		assert!(source.contains("pub fn send_close("));
		assert!(source.contains("let instruction = build_close(vault)?;"));
		assert_eq!(source.matches("pub fn get_vault(").count(), 1);
		assert!(source.contains("::keel::ClientError::Submit"));
		assert!(source.contains("::keel::ClientError::Fetch"));
		assert!(source.contains("/// A token vault."));
	}
}
