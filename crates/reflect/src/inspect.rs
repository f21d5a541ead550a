use std::any::Any;
use std::fmt;
use std::ops::Deref;

use crate::{Shape, TypeDesc};

/// Object-safe runtime view of a value.
///
/// Renderers only ever see values through this trait. Handlers downcast via
/// `&dyn Inspect as &dyn Any` when they need the concrete type. The explicit
/// `'static` bound makes `&'a dyn Inspect` default to a `'static` object.
pub trait Inspect: Any + 'static {
	/// Returns the runtime type of this value.
	fn type_desc(&self) -> TypeDesc;

	/// Returns the runtime shape of this value.
	fn shape(&self) -> Shape<'_>;

	/// Returns the identity of a shared-ownership handle.
	///
	/// Only handles that can form reference cycles (`Rc`, `Arc`) report an
	/// identity; plain values are value types and return `None`.
	fn identity(&self) -> Option<usize> {
		None
	}
}

/// Static type descriptor of a type.
pub trait Reflect {
	/// Returns the descriptor of `Self`.
	fn reflect_type() -> TypeDesc;
}

/// A value reachable from another value.
pub enum Handle<'a> {
	/// Borrowed from the owner.
	Borrowed(&'a dyn Inspect),
	/// Computed on demand and owned by the handle.
	Owned(Box<dyn Inspect>),
	/// Borrowed through a guard (`Ref`, `MutexGuard`) kept alive by the handle.
	Guarded(Box<dyn Deref<Target = dyn Inspect> + 'a>),
}

impl<'a> Handle<'a> {
	/// Boxes an owned value.
	pub fn owned(value: impl Inspect) -> Self {
		Self::Owned(Box::new(value))
	}

	/// Keeps `guard` alive and exposes its target.
	pub fn guarded<G, T>(guard: G) -> Self
	where
		G: Deref<Target = T> + 'a,
		T: Inspect,
	{
		Self::Guarded(Box::new(Guard(guard)))
	}
}

impl Deref for Handle<'_> {
	type Target = dyn Inspect;

	fn deref(&self) -> &Self::Target {
		match self {
			Self::Borrowed(value) => *value,
			Self::Owned(value) => &**value,
			Self::Guarded(guard) => &***guard,
		}
	}
}

impl<'a, T: Inspect> From<&'a T> for Handle<'a> {
	fn from(value: &'a T) -> Self {
		Self::Borrowed(value)
	}
}

impl fmt::Debug for Handle<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let kind = match self {
			Self::Borrowed(_) => "Borrowed",
			Self::Owned(_) => "Owned",
			Self::Guarded(_) => "Guarded",
		};
		f.debug_tuple(kind).field(&(**self).type_desc()).finish()
	}
}

struct Guard<G>(G);

impl<G, T> Deref for Guard<G>
where
	G: Deref<Target = T>,
	T: Inspect,
{
	type Target = dyn Inspect;

	fn deref(&self) -> &Self::Target {
		&*self.0
	}
}
