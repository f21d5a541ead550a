use crate::{Handle, Inspect, Reflect, Shape, Signature, TypeDesc, TypeKind, TypeTraits};

macro_rules! tuple {
	($($idx:tt $name:ident),+) => {
		impl<$($name: Inspect + Reflect),+> Reflect for ($($name,)+) {
			fn reflect_type() -> TypeDesc {
				TypeDesc::interned::<Self>(|| {
					TypeDesc::of::<Self>("tuple")
						.kind(TypeKind::Tuple(vec![$($name::reflect_type()),+]))
						.build()
				})
			}
		}

		impl<$($name: Inspect + Reflect),+> Inspect for ($($name,)+) {
			static_type_desc!();

			fn shape(&self) -> Shape<'_> {
				Shape::Tuple(vec![$(Handle::Borrowed(&self.$idx)),+])
			}
		}
	};
}

tuple!(0 A);
tuple!(0 A, 1 B);
tuple!(0 A, 1 B, 2 C);
tuple!(0 A, 1 B, 2 C, 3 D);
tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);

macro_rules! callable {
	($($param:ident),*) => {
		impl<$($param: Reflect + 'static,)* R: Reflect + 'static> Reflect for fn($($param),*) -> R {
			fn reflect_type() -> TypeDesc {
				TypeDesc::interned::<Self>(|| {
					TypeDesc::of::<Self>("fn")
						.generic([$($param::reflect_type(),)* R::reflect_type()])
						.traits(TypeTraits::CALLABLE)
						.build()
				})
			}
		}

		impl<$($param: Reflect + 'static,)* R: Reflect + 'static> Inspect for fn($($param),*) -> R {
			static_type_desc!();

			fn shape(&self) -> Shape<'_> {
				Shape::Callable(Signature {
					params: vec![$($param::reflect_type()),*],
					ret: R::reflect_type(),
				})
			}
		}
	};
}

callable!();
callable!(A);
callable!(A, B);
callable!(A, B, C);
