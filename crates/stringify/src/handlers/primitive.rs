use glimpse_reflect::{EnumValue, Shape};
use smallvec::SmallVec;

use crate::chain::{Composable, Stringifier, Target};
use crate::{Flow, StringifyContext, glyph};

/// Strings, booleans, characters, bytes, numbers, and enumerations.
pub(crate) struct PrimitiveStringifier;

enum Primitive<'v> {
	Str(&'v str),
	Bool(bool),
	Char(char),
	Byte(u8),
	Int(i128),
	UInt(u128),
	F32(f32),
	F64(f64),
	Enum(EnumValue),
}

impl Stringifier for PrimitiveStringifier {
	fn id(&self) -> &str {
		"primitive"
	}

	fn resolve<'v>(&self, target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>> {
		let primitive = match target.shape {
			Shape::Str(text) => Primitive::Str(text),
			Shape::Bool(value) => Primitive::Bool(value),
			Shape::Char(value) => Primitive::Char(value),
			Shape::Byte(value) => Primitive::Byte(value),
			Shape::Int(value) => Primitive::Int(value),
			Shape::UInt(value) => Primitive::UInt(value),
			Shape::F32(value) => Primitive::F32(value),
			Shape::F64(value) => Primitive::F64(value),
			Shape::Enum(value) => Primitive::Enum(value),
			_ => return Err(target),
		};
		Ok(Box::new(primitive))
	}
}

impl Composable for Primitive<'_> {
	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		match *self {
			Primitive::Str(text) => append_truncated(ctx, text),
			Primitive::Bool(value) => ctx.append_str(if value { "true" } else { "false" }),
			Primitive::Char(value) => ctx.append_char(value),
			Primitive::Byte(value) => return ctx.append_fmt(format_args!("0x{value:02X}")),
			Primitive::Int(value) => return ctx.append_fmt(format_args!("{value}")),
			Primitive::UInt(value) => return ctx.append_fmt(format_args!("{value}")),
			Primitive::F32(value) => return ctx.append_fmt(format_args!("{value}")),
			Primitive::F64(value) => return ctx.append_fmt(format_args!("{value}")),
			Primitive::Enum(value) if value.desc.flags => ctx.append_str(&flag_names(value)),
			Primitive::Enum(value) => match value.name() {
				Some(name) => ctx.append_str(name),
				None => return ctx.append_fmt(format_args!("{}", value.bits)),
			},
		}
		Ok(())
	}
}

fn append_truncated(ctx: &mut StringifyContext<'_>, text: &str) {
	let cut = ctx
		.variables()
		.max_string_length
		.value()
		.and_then(|max| text.char_indices().nth(max))
		.map(|(index, _)| index);
	match cut {
		Some(index) => {
			ctx.append_str(&text[..index]);
			ctx.append_str(glyph::ELLIPSIS);
		}
		None => ctx.append_str(text),
	}
}

/// Names the smallest set of declared flags covering `value`.
///
/// Declared values that are subsets of another present value are dropped, so
/// a named combination wins over its parts. Bits no declared value covers are
/// appended as a number.
fn flag_names(value: EnumValue) -> String {
	let bits = value.bits;
	let variants = value.desc.variants;
	if bits == 0 {
		return variants
			.iter()
			.find(|(_, v)| *v == 0)
			.map_or_else(|| "0".to_string(), |(name, _)| (*name).to_string());
	}

	let mut present: SmallVec<[(&str, u64); 8]> = SmallVec::new();
	for &(name, v) in variants {
		if v != 0 && v & bits == v && !present.iter().any(|(_, p)| *p == v) {
			present.push((name, v));
		}
	}
	let minimal = present
		.iter()
		.filter(|(_, v)| !present.iter().any(|(_, other)| other != v && other & v == *v));

	let mut out = String::new();
	let mut covered = 0;
	for (name, v) in minimal {
		if !out.is_empty() {
			out.push('|');
		}
		out.push_str(name);
		covered |= v;
	}
	let rest = bits & !covered;
	if rest != 0 {
		if !out.is_empty() {
			out.push('|');
		}
		out.push_str(&rest.to_string());
	}
	out
}

#[cfg(test)]
mod tests {
	use glimpse_reflect::EnumDesc;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	static ACCESS: EnumDesc = EnumDesc {
		flags: true,
		variants: &[("None", 0), ("A", 1), ("B", 2), ("C", 4), ("AB", 3)],
	};

	static NO_ZERO: EnumDesc = EnumDesc {
		flags: true,
		variants: &[("Read", 1), ("Write", 2), ("Alias", 1)],
	};

	#[rstest]
	#[case::named_combination(&ACCESS, 3, "AB")]
	#[case::parts(&ACCESS, 5, "A|C")]
	#[case::combination_and_part(&ACCESS, 7, "AB|C")]
	#[case::zero_named(&ACCESS, 0, "None")]
	#[case::zero_unnamed(&NO_ZERO, 0, "0")]
	#[case::duplicate_values(&NO_ZERO, 3, "Read|Write")]
	#[case::uncovered_bits(&NO_ZERO, 9, "Read|8")]
	#[case::only_uncovered(&NO_ZERO, 16, "16")]
	fn test_flag_minimality(#[case] desc: &'static EnumDesc, #[case] bits: u64, #[case] expected: &str) {
		assert_eq!(flag_names(EnumValue { desc, bits }), expected);
	}
}
