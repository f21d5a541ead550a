//! Runtime object model for reflective rendering.
//!
//! Rust has no runtime reflection, so values describe themselves:
//! - [`Inspect`]: object-safe view of a value (runtime type, shape, identity)
//! - [`Reflect`]: static type descriptor, used for generic arguments and
//!   declared member types
//! - [`TypeDesc`]: cheap-clone runtime type descriptor with member table and
//!   declarative markers
//! - [`Shape`]: what a value looks like at runtime (scalar, sequence, map, ...)
//! - [`Handle`]: a value reachable from another value (borrowed, owned, or
//!   kept alive behind a borrow guard)
//!
//! Implementations are provided for primitives, strings, smart pointers,
//! std collections, tuples, function pointers, and the time/id/url/regex types
//! used across the workspace.

/// Implements `Inspect::type_desc` as the static descriptor of `Self`.
macro_rules! static_type_desc {
	() => {
		fn type_desc(&self) -> $crate::TypeDesc {
			<Self as $crate::Reflect>::reflect_type()
		}
	};
}

/// Ad-hoc anonymous records.
pub mod anonymous;
/// Async sequences drained synchronously.
pub mod async_seq;
/// Inspection errors.
pub mod error;
mod impls;
/// The [`Inspect`] and [`Reflect`] traits and [`Handle`].
pub mod inspect;
/// Member tables and declarative markers.
pub mod member;
/// Key-value pairs.
pub mod pair;
/// Runtime value shapes.
pub mod shape;
/// Runtime type descriptors.
pub mod type_desc;

pub use anonymous::Anonymous;
pub use async_seq::AsyncSeq;
pub use error::{InspectError, MemberError};
pub use inspect::{Handle, Inspect, Reflect};
pub use member::{
	Inclusion, MemberDesc, MemberKind, MemberMarker, RendererRef, TypeMarker, Visibility,
};
pub use pair::Pair;
pub use shape::{EnumDesc, EnumValue, Entries, Extent, Items, Shape, Signature};
pub use type_desc::{TypeBuilder, TypeDesc, TypeKey, TypeKind, TypeTraits};
