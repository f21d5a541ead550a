//! Text form of runtime type descriptors.
//!
//! | Kind | Form |
//! |---|---|
//! | array | `i32[]`, `i32[,]`, or `i32[2,3]` with a dimensions hint |
//! | pointer, reference | `*T`, `&T` |
//! | nested | `Outer+Inner` |
//! | nullable | `T?` |
//! | tuple | `(A, B)`, `(A,)`, `()` |
//! | generic | `Vec<i32>`, definitions as `HashMap<,>` |
//! | named | alias, or optional `namespace::` prefix and name |
//!
//! A collection-length hint appends `(n)` to the outermost name.

use std::fmt::Write as _;

use glimpse_reflect::{TypeDesc, TypeKind};

use crate::meta::{ARRAY_DIMENSIONS, COLLECTION_LENGTH, MetaProperties};
use crate::variables::Variables;

/// Renders the name of `ty`, applying hints from `meta` to the outermost type.
pub fn type_name(ty: &TypeDesc, variables: &Variables, meta: &MetaProperties) -> String {
	let mut out = String::new();
	Writer { variables }.write(&mut out, ty, Some(meta));
	out
}

struct Writer<'v> {
	variables: &'v Variables,
}

impl Writer<'_> {
	fn write(&self, out: &mut String, ty: &TypeDesc, hints: Option<&MetaProperties>) {
		match ty.kind() {
			TypeKind::Array { element, rank } => {
				self.write(out, element, None);
				out.push('[');
				match hints.and_then(|meta| meta.dimensions(ARRAY_DIMENSIONS)) {
					Some(dims) => {
						for (index, len) in dims.iter().enumerate() {
							if index > 0 {
								out.push(',');
							}
							let _ = write!(out, "{len}");
						}
					}
					None => out.extend(std::iter::repeat_n(',', rank.saturating_sub(1))),
				}
				out.push(']');
			}
			TypeKind::Pointer(inner) => {
				out.push('*');
				self.write(out, inner, None);
			}
			TypeKind::Reference(inner) => {
				out.push('&');
				self.write(out, inner, None);
			}
			TypeKind::GenericParam => out.push_str(ty.name()),
			TypeKind::Nullable(inner) => {
				self.write(out, inner, None);
				out.push('?');
			}
			TypeKind::Tuple(items) => {
				out.push('(');
				self.write_list(out, items);
				if items.len() == 1 {
					out.push(',');
				}
				out.push(')');
			}
			TypeKind::Generic(args) => {
				self.write_named(out, ty);
				out.push('<');
				self.write_list(out, args);
				out.push('>');
			}
			TypeKind::GenericDefinition { arity } => {
				self.write_named(out, ty);
				out.push('<');
				out.extend(std::iter::repeat_n(',', arity.saturating_sub(1)));
				out.push('>');
			}
			TypeKind::Named => self.write_named(out, ty),
		}
		if let Some(count) = hints.and_then(|meta| meta.count(COLLECTION_LENGTH)) {
			let _ = write!(out, "({count})");
		}
	}

	fn write_list(&self, out: &mut String, types: &[TypeDesc]) {
		for (index, ty) in types.iter().enumerate() {
			if index > 0 {
				out.push_str(", ");
			}
			self.write(out, ty, None);
		}
	}

	fn write_named(&self, out: &mut String, ty: &TypeDesc) {
		if self.variables.type_aliases
			&& let Some(alias) = ty.alias()
		{
			out.push_str(alias);
			return;
		}
		if let Some(enclosing) = ty.enclosing() {
			self.write(out, enclosing, None);
			out.push('+');
		} else if let Some(namespace) = ty.namespace()
			&& self.variables.namespaces.is_explicit(namespace)
		{
			out.push_str(namespace);
			out.push_str("::");
		}
		out.push_str(ty.name());
	}
}

#[cfg(test)]
mod tests;
