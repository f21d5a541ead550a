//! Async sequences drained synchronously.
//!
//! Rendering never awaits: an [`AsyncSeq`] pulls its items by blocking the
//! rendering thread on each `next()`. Items are consumed as they render, so a
//! second render only shows what the first one left behind.

use futures::executor::block_on;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;

use crate::{Extent, Handle, Inspect, InspectError, Items, Reflect, Shape, TypeDesc, TypeTraits};

/// Wraps a [`Stream`] so it renders as a sequence.
pub struct AsyncSeq<S> {
	stream: Mutex<S>,
}

impl<S> AsyncSeq<S> {
	/// Wraps a stream.
	pub fn new(stream: S) -> Self {
		Self {
			stream: Mutex::new(stream),
		}
	}

	/// Returns the wrapped stream.
	pub fn into_inner(self) -> S {
		self.stream.into_inner()
	}
}

impl<S> Reflect for AsyncSeq<S>
where
	S: Stream + Unpin + Send + 'static,
	S::Item: Inspect + Reflect,
{
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<Self>(|| {
			TypeDesc::of::<Self>("AsyncSeq")
				.namespace("glimpse_reflect")
				.generic([<S::Item as Reflect>::reflect_type()])
				.traits(TypeTraits::ITERABLE)
				.build()
		})
	}
}

impl<S> Inspect for AsyncSeq<S>
where
	S: Stream + Unpin + Send + 'static,
	S::Item: Inspect + Reflect,
{
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		let Some(mut stream) = self.stream.try_lock() else {
			return Shape::Faulted(InspectError::Busy("AsyncSeq"));
		};
		let items = std::iter::from_fn(move || {
			block_on(stream.next()).map(|item| Ok(Handle::owned(item)))
		});
		let element = <S::Item as Reflect>::reflect_type();
		Shape::Sequence(Items::new(items, Extent::Unknown).element(element))
	}
}
