//! Key-value pairs.

use crate::{Handle, Inspect, Reflect, Shape, TypeDesc, TypeTraits};

/// A key and its value, rendered as `Pair{key:value}`.
///
/// Sequences whose element type is a pair render as maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pair<K, V> {
	/// The key.
	pub key: K,
	/// The value.
	pub value: V,
}

impl<K, V> Pair<K, V> {
	/// Creates a pair.
	pub const fn new(key: K, value: V) -> Self {
		Self { key, value }
	}
}

impl<K, V> From<(K, V)> for Pair<K, V> {
	fn from((key, value): (K, V)) -> Self {
		Self { key, value }
	}
}

impl<K: Inspect + Reflect, V: Inspect + Reflect> Reflect for Pair<K, V> {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<Self>(|| {
			TypeDesc::of::<Self>("Pair")
				.namespace("glimpse_reflect")
				.generic([K::reflect_type(), V::reflect_type()])
				.traits(TypeTraits::KEY_VALUE)
				.build()
		})
	}
}

impl<K: Inspect + Reflect, V: Inspect + Reflect> Inspect for Pair<K, V> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::KeyValue(Handle::Borrowed(&self.key), Handle::Borrowed(&self.value))
	}
}
