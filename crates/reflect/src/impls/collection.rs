use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use indexmap::IndexMap;
use smallvec::smallvec;

use crate::{Entries, Extent, Inspect, Items, Reflect, Shape, TypeDesc, TypeKind, TypeTraits};

macro_rules! sequence {
	($($ty:ident => $namespace:literal),* $(,)?) => {$(
		impl<T: Inspect + Reflect> Reflect for $ty<T> {
			fn reflect_type() -> TypeDesc {
				TypeDesc::interned::<Self>(|| {
					TypeDesc::of::<Self>(stringify!($ty))
						.namespace($namespace)
						.generic([T::reflect_type()])
						.traits(TypeTraits::ITERABLE)
						.build()
				})
			}
		}

		impl<T: Inspect + Reflect> Inspect for $ty<T> {
			static_type_desc!();

			fn shape(&self) -> Shape<'_> {
				Shape::Sequence(
					Items::borrowed(self.iter(), Extent::Count(self.len())).element(T::reflect_type()),
				)
			}
		}
	)*};
}

sequence! {
	Vec => "alloc::vec",
	VecDeque => "alloc::collections",
	BTreeSet => "alloc::collections",
}

impl<T: Inspect + Reflect, S: 'static> Reflect for HashSet<T, S> {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<Self>(|| {
			TypeDesc::of::<Self>("HashSet")
				.namespace("std::collections")
				.generic([T::reflect_type()])
				.traits(TypeTraits::ITERABLE)
				.build()
		})
	}
}

impl<T: Inspect + Reflect, S: 'static> Inspect for HashSet<T, S> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Sequence(
			Items::borrowed(self.iter(), Extent::Count(self.len())).element(T::reflect_type()),
		)
	}
}

fn array_type<A: ?Sized + 'static, T: Reflect>(name: &'static str) -> TypeDesc {
	TypeDesc::interned::<A>(|| {
		TypeDesc::of::<A>(name)
			.kind(TypeKind::Array {
				element: T::reflect_type(),
				rank: 1,
			})
			.traits(TypeTraits::ITERABLE)
			.build()
	})
}

impl<T: Inspect + Reflect, const N: usize> Reflect for [T; N] {
	fn reflect_type() -> TypeDesc {
		array_type::<Self, T>("array")
	}
}

impl<T: Inspect + Reflect, const N: usize> Inspect for [T; N] {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Sequence(
			Items::borrowed(self.iter(), Extent::Dimensions(smallvec![N])).element(T::reflect_type()),
		)
	}
}

impl<T: Inspect + Reflect> Reflect for Box<[T]> {
	fn reflect_type() -> TypeDesc {
		array_type::<Self, T>("slice")
	}
}

impl<T: Inspect + Reflect> Inspect for Box<[T]> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Sequence(
			Items::borrowed(self.iter(), Extent::Dimensions(smallvec![self.len()]))
				.element(T::reflect_type()),
		)
	}
}

fn map_type<M: 'static, K: Reflect, V: Reflect>(name: &'static str, namespace: &'static str) -> TypeDesc {
	TypeDesc::interned::<M>(|| {
		TypeDesc::of::<M>(name)
			.namespace(namespace)
			.generic([K::reflect_type(), V::reflect_type()])
			.traits(TypeTraits::ITERABLE | TypeTraits::MAP)
			.build()
	})
}

impl<K: Inspect + Reflect, V: Inspect + Reflect, S: 'static> Reflect for HashMap<K, V, S> {
	fn reflect_type() -> TypeDesc {
		map_type::<Self, K, V>("HashMap", "std::collections")
	}
}

impl<K: Inspect + Reflect, V: Inspect + Reflect, S: 'static> Inspect for HashMap<K, V, S> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Map(Entries::borrowed(self.iter(), self.len()))
	}
}

impl<K: Inspect + Reflect, V: Inspect + Reflect> Reflect for BTreeMap<K, V> {
	fn reflect_type() -> TypeDesc {
		map_type::<Self, K, V>("BTreeMap", "alloc::collections")
	}
}

impl<K: Inspect + Reflect, V: Inspect + Reflect> Inspect for BTreeMap<K, V> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Map(Entries::borrowed(self.iter(), self.len()))
	}
}

impl<K: Inspect + Reflect, V: Inspect + Reflect, S: 'static> Reflect for IndexMap<K, V, S> {
	fn reflect_type() -> TypeDesc {
		map_type::<Self, K, V>("IndexMap", "indexmap")
	}
}

impl<K: Inspect + Reflect, V: Inspect + Reflect, S: 'static> Inspect for IndexMap<K, V, S> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Map(Entries::borrowed(self.iter(), self.len()))
	}
}
