use std::collections::{BTreeMap, HashMap};

use glimpse_reflect::{Reflect, TypeDesc, TypeKind};
use pretty_assertions::assert_eq;
use rstest::rstest;
use smallvec::smallvec;

use super::*;
use crate::meta::MetaValue;
use crate::variables::NamespacePolicy;

fn plain(ty: &TypeDesc) -> String {
	type_name(ty, &Variables::default(), &MetaProperties::default())
}

fn app_type(name: &'static str) -> TypeDesc {
	TypeDesc::synthetic(name).namespace("app::model").build()
}

#[rstest]
#[case::alias(i32::reflect_type(), "i32")]
#[case::string(String::reflect_type(), "String")]
#[case::str_ref(<&'static str>::reflect_type(), "&str")]
#[case::unit(<()>::reflect_type(), "()")]
#[case::generic(Vec::<u8>::reflect_type(), "Vec<u8>")]
#[case::two_args(BTreeMap::<i32, String>::reflect_type(), "BTreeMap<i32, String>")]
#[case::nullable(Option::<i64>::reflect_type(), "i64?")]
#[case::tuple(<(i32, bool)>::reflect_type(), "(i32, bool)")]
#[case::single_tuple(<(char,)>::reflect_type(), "(char,)")]
#[case::array(<[u16; 4]>::reflect_type(), "u16[]")]
#[case::nested_generics(Vec::<Option<Vec<bool>>>::reflect_type(), "Vec<Vec<bool>?>")]
fn test_builtin_names(#[case] ty: TypeDesc, #[case] expected: &str) {
	assert_eq!(plain(&ty), expected);
}

#[test]
fn test_structural_kinds() {
	let element = app_type("Cell");
	let grid = TypeDesc::synthetic("grid")
		.kind(TypeKind::Array {
			element: element.clone(),
			rank: 3,
		})
		.build();
	assert_eq!(plain(&grid), "Cell[,,]");

	let pointer = TypeDesc::synthetic("ptr").kind(TypeKind::Pointer(element.clone())).build();
	assert_eq!(plain(&pointer), "*Cell");

	let definition = TypeDesc::synthetic("HashMap")
		.kind(TypeKind::GenericDefinition { arity: 2 })
		.build();
	assert_eq!(plain(&definition), "HashMap<,>");

	let param = TypeDesc::generic_param("T");
	let open = TypeDesc::synthetic("Slot").generic([param]).build();
	assert_eq!(plain(&open), "Slot<T>");
}

#[test]
fn test_nested_types_use_plus() {
	let outer = app_type("Outer");
	let inner = TypeDesc::synthetic("Inner")
		.namespace("app::model")
		.enclosing(outer.clone())
		.build();
	let innermost = TypeDesc::synthetic("Leaf").enclosing(inner).build();
	assert_eq!(plain(&innermost), "Outer+Inner+Leaf");

	let mut variables = Variables::default();
	variables.namespaces = NamespacePolicy::new(Some("^app"), None, false, false).unwrap();
	assert_eq!(
		type_name(&innermost, &variables, &MetaProperties::default()),
		"app::model::Outer+Inner+Leaf"
	);
}

#[test]
fn test_namespaces_and_aliases() {
	let mut variables = Variables {
		type_aliases: false,
		..Variables::default()
	};
	let meta = MetaProperties::default();
	let ty = HashMap::<String, app_model::Unit>::reflect_type();
	assert_eq!(type_name(&ty, &variables, &meta), "HashMap<String, Unit>");

	variables.namespaces = NamespacePolicy::new(None, Some("^app"), false, true).unwrap();
	assert_eq!(
		type_name(&ty, &variables, &meta),
		"std::collections::HashMap<alloc::string::String, Unit>"
	);

	variables.type_aliases = true;
	assert_eq!(
		type_name(&ty, &variables, &meta),
		"std::collections::HashMap<String, Unit>"
	);
}

#[test]
fn test_hints_apply_to_outermost_only() {
	let variables = Variables::default();
	let mut meta = MetaProperties::default();
	meta.set(COLLECTION_LENGTH, MetaValue::Count(2));
	assert_eq!(
		type_name(&Vec::<Vec<i32>>::reflect_type(), &variables, &meta),
		"Vec<Vec<i32>>(2)"
	);

	let mut meta = MetaProperties::default();
	meta.set(ARRAY_DIMENSIONS, MetaValue::Dimensions(smallvec![2, 3]));
	let matrix = TypeDesc::synthetic("matrix")
		.kind(TypeKind::Array {
			element: <[i32; 3]>::reflect_type(),
			rank: 2,
		})
		.build();
	assert_eq!(type_name(&matrix, &variables, &meta), "i32[][2,3]");
}

mod app_model {
	use glimpse_reflect::{Inspect, Reflect, Shape, TypeDesc};

	pub struct Unit;

	impl Reflect for Unit {
		fn reflect_type() -> TypeDesc {
			TypeDesc::interned::<Self>(|| TypeDesc::of::<Self>("Unit").namespace("app::model").build())
		}
	}

	impl Inspect for Unit {
		fn type_desc(&self) -> TypeDesc {
			Self::reflect_type()
		}

		fn shape(&self) -> Shape<'_> {
			Shape::Object
		}
	}
}
