use std::collections::HashSet;

use syn::GenericArgument;
use syn::PathArguments;

use crate::error::SchemaError;
use crate::ir::Primitive;
use crate::ir::TypeIr;

/// Parse a field type written in Rust type syntax.
///
/// `defined` holds the names of the structs declared in the schema; any other
/// bare identifier that is not a built-in is rejected. `context` names the
/// field for error messages.
pub fn parse_type(
	ty: &str,
	defined: &HashSet<&str>,
	context: &str,
) -> Result<TypeIr, SchemaError> {
	let parsed = syn::parse_str::<syn::Type>(ty).map_err(|e| {
		SchemaError::InvalidType {
			context: context.to_owned(),
			ty: ty.to_owned(),
			message: e.to_string(),
		}
	})?;

	lower_type(&parsed, ty, defined, context)
}

fn lower_type(
	parsed: &syn::Type,
	ty: &str,
	defined: &HashSet<&str>,
	context: &str,
) -> Result<TypeIr, SchemaError> {
	let unsupported = || {
		SchemaError::UnsupportedType {
			context: context.to_owned(),
			ty: ty.to_owned(),
		}
	};

	match parsed {
		syn::Type::Path(path) if path.qself.is_none() && path.path.segments.len() == 1 => {
			let segment = &path.path.segments[0];
			let name = segment.ident.to_string();

			match &segment.arguments {
				PathArguments::None => {
					if let Some(primitive) = Primitive::from_name(&name) {
						return Ok(TypeIr::Primitive(primitive));
					}
					match name.as_str() {
						"String" => Ok(TypeIr::String),
						"Pubkey" | "Address" => Ok(TypeIr::Pubkey),
						_ if defined.contains(name.as_str()) => Ok(TypeIr::Defined(name)),
						"Vec" | "Option" => Err(unsupported()),
						_ => {
							Err(SchemaError::UnknownType {
								context: context.to_owned(),
								name,
							})
						}
					}
				}
				PathArguments::AngleBracketed(generics) => {
					let mut args = generics.args.iter();
					let (Some(GenericArgument::Type(inner)), None) = (args.next(), args.next())
					else {
						return Err(unsupported());
					};
					let inner = Box::new(lower_type(inner, ty, defined, context)?);
					match name.as_str() {
						"Vec" => Ok(TypeIr::Vec(inner)),
						"Option" => Ok(TypeIr::Option(inner)),
						_ => Err(unsupported()),
					}
				}
				PathArguments::Parenthesized(_) => Err(unsupported()),
			}
		}
		syn::Type::Array(array) => {
			let syn::Expr::Lit(syn::ExprLit {
				lit: syn::Lit::Int(len),
				..
			}) = &array.len
			else {
				return Err(unsupported());
			};
			let len = len.base10_parse::<usize>().map_err(|_| unsupported())?;
			let elem = lower_type(&array.elem, ty, defined, context)?;
			Ok(TypeIr::Array(Box::new(elem), len))
		}
		syn::Type::Paren(inner) => lower_type(&inner.elem, ty, defined, context),
		_ => Err(unsupported()),
	}
}
