use std::borrow::Cow;
use std::sync::Arc;

use crate::{Inspect, Reflect, Shape, TypeDesc, TypeKind};

fn primitive<T: ?Sized + 'static>(name: &'static str) -> TypeDesc {
	TypeDesc::interned::<T>(|| {
		TypeDesc::of::<T>(name)
			.namespace("core::primitive")
			.alias(name)
			.build()
	})
}

macro_rules! numeric {
	($($ty:ty => $variant:ident($wide:ty)),* $(,)?) => {$(
		impl Reflect for $ty {
			fn reflect_type() -> TypeDesc {
				primitive::<$ty>(stringify!($ty))
			}
		}

		impl Inspect for $ty {
			static_type_desc!();

			fn shape(&self) -> Shape<'_> {
				Shape::$variant(<$wide>::from(*self))
			}
		}
	)*};
}

numeric! {
	i8 => Int(i128),
	i16 => Int(i128),
	i32 => Int(i128),
	i64 => Int(i128),
	i128 => Int(i128),
	u16 => UInt(u128),
	u32 => UInt(u128),
	u64 => UInt(u128),
	u128 => UInt(u128),
	u8 => Byte(u8),
	f32 => F32(f32),
	f64 => F64(f64),
	bool => Bool(bool),
	char => Char(char),
}

impl Reflect for isize {
	fn reflect_type() -> TypeDesc {
		primitive::<isize>("isize")
	}
}

impl Inspect for isize {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Int(*self as i128)
	}
}

impl Reflect for usize {
	fn reflect_type() -> TypeDesc {
		primitive::<usize>("usize")
	}
}

impl Inspect for usize {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::UInt(*self as u128)
	}
}

impl Reflect for str {
	fn reflect_type() -> TypeDesc {
		primitive::<str>("str")
	}
}

impl Reflect for String {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<String>(|| {
			TypeDesc::of::<String>("String")
				.namespace("alloc::string")
				.alias("String")
				.build()
		})
	}
}

impl Inspect for String {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Str(self)
	}
}

impl Reflect for &'static str {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<&'static str>(|| {
			TypeDesc::of::<&'static str>("&str")
				.kind(TypeKind::Reference(str::reflect_type()))
				.build()
		})
	}
}

impl Inspect for &'static str {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Str(self)
	}
}

macro_rules! str_wrapper {
	($($ty:ty => $name:literal in $namespace:literal),* $(,)?) => {$(
		impl Reflect for $ty {
			fn reflect_type() -> TypeDesc {
				TypeDesc::interned::<$ty>(|| {
					TypeDesc::of::<$ty>($name)
						.namespace($namespace)
						.generic([str::reflect_type()])
						.build()
				})
			}
		}

		impl Inspect for $ty {
			static_type_desc!();

			fn shape(&self) -> Shape<'_> {
				Shape::Str(self)
			}
		}
	)*};
}

str_wrapper! {
	Box<str> => "Box" in "alloc::boxed",
	Arc<str> => "Arc" in "alloc::sync",
	Cow<'static, str> => "Cow" in "alloc::borrow",
}

impl Reflect for () {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<()>(|| {
			TypeDesc::of::<()>("()")
				.alias("()")
				.kind(TypeKind::Tuple(Vec::new()))
				.build()
		})
	}
}

impl Inspect for () {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Tuple(Vec::new())
	}
}
