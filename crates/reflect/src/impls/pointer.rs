//! Transparent wrappers: nullable values, boxes, shared handles, and borrow guards.

use std::cell::RefCell;
use std::rc::{self, Rc};
use std::sync::{self, Arc};

use parking_lot::{Mutex, RwLock};

use crate::{Handle, Inspect, InspectError, Reflect, Shape, TypeDesc, TypeKind};

macro_rules! wrapper_type {
	($ty:ty, $name:literal, $namespace:literal, $inner:ty) => {
		TypeDesc::interned::<$ty>(|| {
			TypeDesc::of::<$ty>($name)
				.namespace($namespace)
				.generic([<$inner>::reflect_type()])
				.build()
		})
	};
}

impl<T: Inspect + Reflect> Reflect for Option<T> {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<Self>(|| {
			TypeDesc::of::<Self>("Option")
				.namespace("core::option")
				.kind(TypeKind::Nullable(T::reflect_type()))
				.build()
		})
	}
}

impl<T: Inspect + Reflect> Inspect for Option<T> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		match self {
			Some(value) => Shape::Proxy(Handle::Borrowed(value)),
			None => Shape::Null,
		}
	}
}

impl<T: Inspect + Reflect> Reflect for Box<T> {
	fn reflect_type() -> TypeDesc {
		wrapper_type!(Self, "Box", "alloc::boxed", T)
	}
}

impl<T: Inspect + Reflect> Inspect for Box<T> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Proxy(Handle::Borrowed(&**self))
	}
}

impl Reflect for Box<dyn Inspect> {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<Self>(|| {
			let inner = TypeDesc::of::<dyn Inspect>("dyn Inspect").build();
			TypeDesc::of::<Self>("Box")
				.namespace("alloc::boxed")
				.generic([inner])
				.build()
		})
	}
}

impl Inspect for Box<dyn Inspect> {
	fn type_desc(&self) -> TypeDesc {
		(**self).type_desc()
	}

	fn shape(&self) -> Shape<'_> {
		Shape::Proxy(Handle::Borrowed(&**self))
	}

	fn identity(&self) -> Option<usize> {
		(**self).identity()
	}
}

impl<T: Inspect + Reflect> Reflect for &'static T {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<Self>(|| {
			TypeDesc::of::<Self>("&")
				.kind(TypeKind::Reference(T::reflect_type()))
				.build()
		})
	}
}

impl<T: Inspect + Reflect> Inspect for &'static T {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Proxy(Handle::Borrowed(*self))
	}
}

impl<T: Inspect + Reflect> Reflect for Rc<T> {
	fn reflect_type() -> TypeDesc {
		wrapper_type!(Self, "Rc", "alloc::rc", T)
	}
}

impl<T: Inspect + Reflect> Inspect for Rc<T> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Proxy(Handle::Borrowed(&**self))
	}

	fn identity(&self) -> Option<usize> {
		Some(Rc::as_ptr(self) as usize)
	}
}

impl<T: Inspect + Reflect> Reflect for Arc<T> {
	fn reflect_type() -> TypeDesc {
		wrapper_type!(Self, "Arc", "alloc::sync", T)
	}
}

impl<T: Inspect + Reflect> Inspect for Arc<T> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Proxy(Handle::Borrowed(&**self))
	}

	fn identity(&self) -> Option<usize> {
		Some(Arc::as_ptr(self) as usize)
	}
}

impl<T: Inspect + Reflect> Reflect for rc::Weak<T> {
	fn reflect_type() -> TypeDesc {
		wrapper_type!(Self, "Weak", "alloc::rc", T)
	}
}

impl<T: Inspect + Reflect> Inspect for rc::Weak<T> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		match self.upgrade() {
			Some(strong) => Shape::Proxy(Handle::owned(strong)),
			None => Shape::Null,
		}
	}
}

impl<T: Inspect + Reflect> Reflect for sync::Weak<T> {
	fn reflect_type() -> TypeDesc {
		wrapper_type!(Self, "Weak", "alloc::sync", T)
	}
}

impl<T: Inspect + Reflect> Inspect for sync::Weak<T> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		match self.upgrade() {
			Some(strong) => Shape::Proxy(Handle::owned(strong)),
			None => Shape::Null,
		}
	}
}

impl<T: Inspect + Reflect> Reflect for RefCell<T> {
	fn reflect_type() -> TypeDesc {
		wrapper_type!(Self, "RefCell", "core::cell", T)
	}
}

impl<T: Inspect + Reflect> Inspect for RefCell<T> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		match self.try_borrow() {
			Ok(guard) => Shape::Proxy(Handle::guarded(guard)),
			Err(_) => Shape::Faulted(InspectError::Busy("RefCell")),
		}
	}
}

impl<T: Inspect + Reflect> Reflect for Mutex<T> {
	fn reflect_type() -> TypeDesc {
		wrapper_type!(Self, "Mutex", "parking_lot", T)
	}
}

impl<T: Inspect + Reflect> Inspect for Mutex<T> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		match self.try_lock() {
			Some(guard) => Shape::Proxy(Handle::guarded(guard)),
			None => Shape::Faulted(InspectError::Busy("Mutex")),
		}
	}
}

impl<T: Inspect + Reflect> Reflect for RwLock<T> {
	fn reflect_type() -> TypeDesc {
		wrapper_type!(Self, "RwLock", "parking_lot", T)
	}
}

impl<T: Inspect + Reflect> Inspect for RwLock<T> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		match self.try_read() {
			Some(guard) => Shape::Proxy(Handle::guarded(guard)),
			None => Shape::Faulted(InspectError::Busy("RwLock")),
		}
	}
}
