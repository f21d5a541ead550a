use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
	AsyncSeq, Extent, Handle, Inspect, InspectError, Pair, Reflect, Shape, TypeDesc, TypeKind,
	TypeTraits, anonymous,
};

fn collect<'a>(shape: Shape<'a>) -> Vec<Handle<'a>> {
	match shape {
		Shape::Sequence(items) => items.iter.map(Result::unwrap).collect(),
		_ => panic!("expected a sequence, got {}", shape.label()),
	}
}

#[test]
fn test_scalars_widen() {
	assert!(matches!((-3_i8).shape(), Shape::Int(-3)));
	assert!(matches!(9_usize.shape(), Shape::UInt(9)));
	assert!(matches!(0xAB_u8.shape(), Shape::Byte(0xAB)));
	assert!(matches!("hi".shape(), Shape::Str("hi")));
	assert_eq!(i32::reflect_type().alias(), Some("i32"));
}

#[test]
fn test_option_is_nullable_proxy() {
	let none: Option<i32> = None;
	assert!(matches!(none.shape(), Shape::Null));
	match Some(4_i32).shape() {
		Shape::Proxy(inner) => assert!(matches!(inner.shape(), Shape::Int(4))),
		other => panic!("expected proxy, got {}", other.label()),
	}
	assert!(matches!(
		Option::<i32>::reflect_type().kind(),
		TypeKind::Nullable(inner) if inner == &i32::reflect_type()
	));
}

#[test]
fn test_rc_reports_identity() {
	let shared = Rc::new(1_u32);
	let alias = Rc::clone(&shared);
	assert_eq!(shared.identity(), alias.identity());
	assert!(shared.identity().is_some());
	assert_eq!(1_u32.identity(), None);
}

#[test]
fn test_weak_upgrades_or_nulls() {
	let strong = Rc::new(2_i64);
	let weak = Rc::downgrade(&strong);
	match weak.shape() {
		Shape::Proxy(inner) => assert_eq!(inner.identity(), strong.identity()),
		other => panic!("expected proxy, got {}", other.label()),
	}
	drop(strong);
	assert!(matches!(weak.shape(), Shape::Null));
}

#[test]
fn test_refcell_busy_when_mutably_borrowed() {
	let cell = RefCell::new(5_i32);
	let guard = cell.borrow_mut();
	assert!(matches!(
		cell.shape(),
		Shape::Faulted(InspectError::Busy("RefCell"))
	));
	drop(guard);
	match cell.shape() {
		Shape::Proxy(inner) => assert!(matches!(inner.shape(), Shape::Int(5))),
		other => panic!("expected proxy, got {}", other.label()),
	}
}

#[test]
fn test_vec_and_array_extents() {
	let items = vec![1_i32, 2, 3];
	match items.shape() {
		Shape::Sequence(seq) => {
			assert_eq!(seq.extent, Extent::Count(3));
			assert_eq!(seq.element, Some(i32::reflect_type()));
		}
		other => panic!("expected sequence, got {}", other.label()),
	}
	assert_eq!(collect(items.shape()).len(), 3);

	let grid = [0_u16; 4];
	match grid.shape() {
		Shape::Sequence(seq) => assert_eq!(seq.extent.count(), Some(4)),
		other => panic!("expected sequence, got {}", other.label()),
	}
	assert!(matches!(
		<[u16; 4]>::reflect_type().kind(),
		TypeKind::Array { rank: 1, .. }
	));
}

#[test]
fn test_map_entries_keep_order() {
	let map = BTreeMap::from([(2_i32, "b"), (1, "a")]);
	let Shape::Map(entries) = map.shape() else {
		panic!("expected map");
	};
	assert_eq!(entries.len, Some(2));
	let keys: Vec<_> = entries
		.iter
		.map(|entry| match entry.unwrap().0.shape() {
			Shape::Int(n) => n,
			_ => panic!("expected int key"),
		})
		.collect();
	assert_eq!(keys, [1, 2]);
	assert!(
		BTreeMap::<i32, &'static str>::reflect_type()
			.traits()
			.contains(TypeTraits::MAP)
	);
}

#[test]
fn test_tuple_and_callable() {
	let Shape::Tuple(items) = (1_i32, "x", true).shape() else {
		panic!("expected tuple");
	};
	assert_eq!(items.len(), 3);

	let f: fn(i32, bool) -> String = |n, _| n.to_string();
	let Shape::Callable(signature) = f.shape() else {
		panic!("expected callable");
	};
	assert_eq!(signature.params, [i32::reflect_type(), bool::reflect_type()]);
	assert_eq!(signature.ret, String::reflect_type());
}

#[test]
fn test_forbidden_handles_carry_traits() {
	let (tx, _rx) = std::sync::mpsc::channel::<i32>();
	assert!(tx.type_desc().traits().contains(TypeTraits::COMPLETION));
	let token = tokio_util::sync::CancellationToken::new();
	assert!(token.type_desc().traits().contains(TypeTraits::CANCELLATION));
	let iter = vec![1_i32].into_iter();
	assert_eq!(iter.type_desc().traits(), TypeTraits::ITERATOR);
}

#[test]
fn test_pair_and_anonymous() {
	let pair = Pair::new("k", 1_i32);
	assert!(matches!(pair.shape(), Shape::KeyValue(..)));
	assert!(pair.type_desc().traits().contains(TypeTraits::KEY_VALUE));

	let record = anonymous! { id: 7_u32, name: "ada" };
	let Shape::Anonymous(fields) = record.shape() else {
		panic!("expected anonymous");
	};
	let names: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
	assert_eq!(names, ["id", "name"]);
}

#[test]
fn test_async_seq_drains() {
	let seq = AsyncSeq::new(futures::stream::iter([1_i32, 2, 3]));
	assert_eq!(collect(seq.shape()).len(), 3);
	assert!(collect(seq.shape()).is_empty());
}

#[test]
fn test_type_desc_is_type_shaped() {
	let desc = TypeDesc::synthetic("Thing").build();
	assert!(matches!(desc.shape(), Shape::Type(ty) if ty == &desc));
}
