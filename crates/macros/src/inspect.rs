//! `#[derive(Inspect)]` implementation.
//!
//! Structs become opaque objects whose fields fill the member table; fieldless
//! enums become enumeration values backed by a static variant table.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::{Data, DataEnum, DeriveInput, Expr, Fields, Ident, LitStr, Token, parse_macro_input};

#[derive(Default)]
struct TypeAttrs {
	marker: Option<Ident>,
	name: Option<LitStr>,
	namespace: Option<LitStr>,
	flags: bool,
	display: bool,
	properties: Vec<Ident>,
}

#[derive(Default)]
struct FieldAttrs {
	include: bool,
	skip: bool,
	ignore: bool,
	rename: Option<LitStr>,
	order: Option<Expr>,
	with: Option<LitStr>,
	args: Vec<LitStr>,
}

pub fn derive_inspect(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	match expand(&input) {
		Ok(tokens) => tokens.into(),
		Err(e) => e.to_compile_error().into(),
	}
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.generics,
			"Inspect cannot be derived for generic types",
		));
	}
	let attrs = parse_type_attrs(input)?;
	match &input.data {
		Data::Struct(data) => expand_struct(input, &attrs, &data.fields),
		Data::Enum(data) => expand_enum(input, &attrs, data),
		Data::Union(_) => Err(syn::Error::new_spanned(
			input,
			"Inspect can only be derived for structs and enums",
		)),
	}
}

fn parse_type_attrs(input: &DeriveInput) -> syn::Result<TypeAttrs> {
	let mut attrs = TypeAttrs::default();
	for attr in input.attrs.iter().filter(|a| a.path().is_ident("glimpse")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("renderable") {
				attrs.marker = Some(format_ident!("Renderable"));
			} else if meta.path.is_ident("not_renderable") {
				attrs.marker = Some(format_ident!("NotRenderable"));
			} else if meta.path.is_ident("name") {
				attrs.name = Some(meta.value()?.parse()?);
			} else if meta.path.is_ident("namespace") {
				attrs.namespace = Some(meta.value()?.parse()?);
			} else if meta.path.is_ident("flags") {
				attrs.flags = true;
			} else if meta.path.is_ident("display") {
				attrs.display = true;
			} else if meta.path.is_ident("property") {
				meta.parse_nested_meta(|inner| {
					let Some(ident) = inner.path.get_ident() else {
						return Err(inner.error("property must name a method"));
					};
					attrs.properties.push(ident.clone());
					Ok(())
				})?;
			} else {
				return Err(meta.error("unknown glimpse type attribute"));
			}
			Ok(())
		})?;
	}
	Ok(attrs)
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
	let mut attrs = FieldAttrs::default();
	for attr in field.attrs.iter().filter(|a| a.path().is_ident("glimpse")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("include") {
				attrs.include = true;
			} else if meta.path.is_ident("skip") {
				attrs.skip = true;
			} else if meta.path.is_ident("ignore") {
				attrs.ignore = true;
			} else if meta.path.is_ident("rename") {
				attrs.rename = Some(meta.value()?.parse()?);
			} else if meta.path.is_ident("order") {
				attrs.order = Some(meta.value()?.parse()?);
			} else if meta.path.is_ident("with") {
				attrs.with = Some(meta.value()?.parse()?);
			} else if meta.path.is_ident("args") {
				let content;
				syn::parenthesized!(content in meta.input);
				let args = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
				attrs.args.extend(args);
			} else {
				return Err(meta.error("unknown glimpse field attribute"));
			}
			Ok(())
		})?;
	}
	if attrs.include && attrs.skip {
		return Err(syn::Error::new_spanned(
			field,
			"a field cannot be both included and skipped",
		));
	}
	if !attrs.args.is_empty() && attrs.with.is_none() {
		return Err(syn::Error::new_spanned(field, "args require `with = \"...\"`"));
	}
	Ok(attrs)
}

/// Builds the `TypeDesc::of::<Self>(..)` prefix shared by structs and enums.
fn type_builder(input: &DeriveInput, attrs: &TypeAttrs) -> TokenStream2 {
	let ident = &input.ident;
	let name = match &attrs.name {
		Some(name) => quote! { #name },
		None => quote! { ::core::stringify!(#ident) },
	};
	let namespace = match &attrs.namespace {
		Some(namespace) => quote! { #namespace },
		None => quote! { ::core::module_path!() },
	};
	let marker = attrs
		.marker
		.clone()
		.unwrap_or_else(|| format_ident!("Unmarked"));
	quote! {
		::glimpse_reflect::TypeDesc::of::<Self>(#name)
			.namespace(#namespace)
			.marker(::glimpse_reflect::TypeMarker::#marker)
	}
}

fn expand_struct(
	input: &DeriveInput,
	attrs: &TypeAttrs,
	fields: &Fields,
) -> syn::Result<TokenStream2> {
	if attrs.flags {
		return Err(syn::Error::new_spanned(input, "`flags` only applies to enums"));
	}
	let ident = &input.ident;
	let builder = type_builder(input, attrs);

	let mut members = Vec::new();
	for (index, field) in fields.iter().enumerate() {
		let field_attrs = parse_field_attrs(field)?;
		if field_attrs.ignore {
			continue;
		}
		let (name, access) = match &field.ident {
			Some(field_ident) => (field_ident.to_string(), quote! { #field_ident }),
			None => {
				let index = syn::Index::from(index);
				(index.index.to_string(), quote! { #index })
			}
		};
		let mut member = quote! {
			::glimpse_reflect::MemberDesc::field(#name, |owner: &Self| &owner.#access)
		};
		if !matches!(field.vis, syn::Visibility::Public(_)) {
			member.extend(quote! { .private() });
		}
		member.extend(member_modifiers(&field_attrs));
		members.push(member);
	}
	for property in &attrs.properties {
		let name = property.to_string();
		members.push(quote! {
			::glimpse_reflect::MemberDesc::property(#name, |owner: &Self| owner.#property())
		});
	}
	let shape = if attrs.display {
		quote! { ::glimpse_reflect::Shape::Display(self) }
	} else {
		quote! { ::glimpse_reflect::Shape::Object }
	};

	Ok(quote! {
		impl ::glimpse_reflect::Reflect for #ident {
			fn reflect_type() -> ::glimpse_reflect::TypeDesc {
				::glimpse_reflect::TypeDesc::interned::<Self>(|| {
					#builder
						#(.member(#members))*
						.build()
				})
			}
		}

		impl ::glimpse_reflect::Inspect for #ident {
			fn type_desc(&self) -> ::glimpse_reflect::TypeDesc {
				<Self as ::glimpse_reflect::Reflect>::reflect_type()
			}

			fn shape(&self) -> ::glimpse_reflect::Shape<'_> {
				#shape
			}
		}
	})
}

fn member_modifiers(attrs: &FieldAttrs) -> TokenStream2 {
	let mut tokens = TokenStream2::new();
	if attrs.include {
		tokens.extend(quote! { .include() });
	}
	if attrs.skip {
		tokens.extend(quote! { .skip() });
	}
	if let Some(rename) = &attrs.rename {
		tokens.extend(quote! { .rename(#rename) });
	}
	if let Some(order) = &attrs.order {
		tokens.extend(quote! { .order(#order) });
	}
	if let Some(with) = &attrs.with {
		let args = &attrs.args;
		tokens.extend(quote! {
			.with(#with, ::std::vec::Vec::<&'static str>::from([#(#args),*]))
		});
	}
	tokens
}

fn expand_enum(
	input: &DeriveInput,
	attrs: &TypeAttrs,
	data: &DataEnum,
) -> syn::Result<TokenStream2> {
	if !attrs.properties.is_empty() || attrs.display {
		return Err(syn::Error::new_spanned(
			input,
			"`property` and `display` only apply to structs",
		));
	}
	if data.variants.is_empty() {
		return Err(syn::Error::new_spanned(
			input,
			"Inspect cannot be derived for enums without variants",
		));
	}
	if let Some(variant) = data.variants.iter().find(|v| !matches!(v.fields, Fields::Unit)) {
		return Err(syn::Error::new_spanned(
			variant,
			"Inspect can only be derived for enums without fields",
		));
	}
	let ident = &input.ident;
	let builder = type_builder(input, attrs);
	let flags = attrs.flags;
	let variants: Vec<_> = data.variants.iter().map(|v| &v.ident).collect();
	let names: Vec<_> = variants.iter().map(ToString::to_string).collect();

	Ok(quote! {
		impl ::glimpse_reflect::Reflect for #ident {
			fn reflect_type() -> ::glimpse_reflect::TypeDesc {
				::glimpse_reflect::TypeDesc::interned::<Self>(|| {
					#builder
						.traits(::glimpse_reflect::TypeTraits::ENUM)
						.build()
				})
			}
		}

		impl ::glimpse_reflect::Inspect for #ident {
			fn type_desc(&self) -> ::glimpse_reflect::TypeDesc {
				<Self as ::glimpse_reflect::Reflect>::reflect_type()
			}

			fn shape(&self) -> ::glimpse_reflect::Shape<'_> {
				static DESC: ::glimpse_reflect::EnumDesc = ::glimpse_reflect::EnumDesc {
					flags: #flags,
					variants: &[#((#names, #ident::#variants as u64)),*],
				};
				let bits = match self {
					#(#ident::#variants => #ident::#variants as u64,)*
				};
				::glimpse_reflect::Shape::Enum(::glimpse_reflect::EnumValue { desc: &DESC, bits })
			}
		}
	})
}
