use std::panic::{self, AssertUnwindSafe};

use glimpse_reflect::{Entries, Extent, Handle, InspectError, Items, Shape, TypeDesc, TypeTraits};

use crate::chain::{Composable, Stringifier, Target};
use crate::meta::{ARRAY_DIMENSIONS, COLLECTION_LENGTH, MetaValue};
use crate::variables::ItemBudget;
use crate::{Flow, StringifyContext, glyph};

/// Sequences render as `[..]`, maps and sequences of pairs as `{k:v, ..}`.
pub(crate) struct CollectionStringifier;

impl Stringifier for CollectionStringifier {
	fn id(&self) -> &str {
		"collection"
	}

	fn resolve<'v>(&self, target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>> {
		match target.shape {
			Shape::Sequence(items) => Ok(Box::new(Sequence {
				type_desc: target.type_desc,
				items,
			})),
			Shape::Map(entries) => Ok(Box::new(Map {
				type_desc: target.type_desc,
				entries,
			})),
			_ => Err(target),
		}
	}
}

struct Sequence<'v> {
	type_desc: TypeDesc,
	items: Items<'v>,
}

impl Composable for Sequence<'_> {
	fn is_deep(&self) -> bool {
		true
	}

	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		let Items {
			iter,
			extent,
			element,
		} = self.items;
		ctx.append_type_name_hinted(&self.type_desc, |meta| match extent {
			Extent::Count(len) => meta.set(COLLECTION_LENGTH, MetaValue::Count(len)),
			Extent::Dimensions(dims) => meta.set(ARRAY_DIMENSIONS, MetaValue::Dimensions(dims)),
			Extent::Unknown => {}
		})?;

		let keyed = element.is_some_and(|element| element.traits().contains(TypeTraits::KEY_VALUE));
		if keyed {
			ctx.append_char('{');
			ctx.append_items(ItemBudget::Dictionary, Guarded::new(iter), |ctx, item| match item {
				Ok(pair) => append_pair(ctx, &pair),
				Err(error) => append_failure(ctx, &error),
			})?;
			ctx.append_char('}');
		} else {
			ctx.append_char('[');
			ctx.append_items(ItemBudget::Collection, Guarded::new(iter), |ctx, item| match item {
				Ok(item) => ctx.compose(&*item),
				Err(error) => append_failure(ctx, &error),
			})?;
			ctx.append_char(']');
		}
		Ok(())
	}
}

fn append_pair(ctx: &mut StringifyContext<'_>, pair: &Handle<'_>) -> Flow {
	match pair.shape() {
		Shape::KeyValue(key, value) => {
			ctx.compose(&*key)?;
			ctx.append_char(':');
			ctx.compose(&*value)
		}
		_ => ctx.compose(&**pair),
	}
}

struct Map<'v> {
	type_desc: TypeDesc,
	entries: Entries<'v>,
}

impl Composable for Map<'_> {
	fn is_deep(&self) -> bool {
		true
	}

	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		let Entries { iter, len } = self.entries;
		ctx.append_type_name_hinted(&self.type_desc, |meta| {
			if let Some(len) = len {
				meta.set(COLLECTION_LENGTH, MetaValue::Count(len));
			}
		})?;
		ctx.append_char('{');
		ctx.append_items(ItemBudget::Dictionary, Guarded::new(iter), |ctx, entry| match entry {
			Ok((key, value)) => {
				ctx.compose(&*key)?;
				ctx.append_char(':');
				ctx.compose(&*value)
			}
			Err(error) => append_failure(ctx, &error),
		})?;
		ctx.append_char('}');
		Ok(())
	}
}

fn append_failure(ctx: &mut StringifyContext<'_>, error: &InspectError) -> Flow {
	tracing::trace!(%error, "stringify.collection.item_failed");
	ctx.append_str(glyph::ERROR);
	Ok(())
}

/// Item source that turns a panicking step into an error and stops after
/// the first error.
struct Guarded<I> {
	iter: I,
	done: bool,
}

impl<I> Guarded<I> {
	fn new(iter: I) -> Self {
		Self { iter, done: false }
	}
}

impl<I, T> Iterator for Guarded<I>
where
	I: Iterator<Item = Result<T, InspectError>>,
{
	type Item = Result<T, InspectError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		let step = panic::catch_unwind(AssertUnwindSafe(|| self.iter.next()))
			.unwrap_or(Some(Err(InspectError::Panicked)));
		if !matches!(step, Some(Ok(_))) {
			self.done = true;
		}
		step
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_guarded_stops_after_error() {
		let source = vec![Ok(1), Err(InspectError::Source("gone".into())), Ok(3)];
		let seen: Vec<_> = Guarded::new(source.into_iter()).collect();
		assert_eq!(seen, vec![Ok(1), Err(InspectError::Source("gone".into()))]);
	}

	#[test]
	fn test_guarded_catches_panics() {
		let mut calls = 0;
		let source = std::iter::from_fn(|| {
			calls += 1;
			if calls > 1 {
				panic!("broken iterator");
			}
			Some(Ok::<_, InspectError>(calls))
		});
		let seen: Vec<_> = Guarded::new(source).collect();
		assert_eq!(seen, vec![Ok(1), Err(InspectError::Panicked)]);
	}
}
