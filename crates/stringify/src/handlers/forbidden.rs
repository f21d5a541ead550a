use glimpse_reflect::{TypeDesc, TypeKey, TypeTraits};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::chain::{Composable, Stringifier, Target};
use crate::{Flow, StringifyContext, glyph};

/// Types that are never traversed: thread handles, cancellation primitives,
/// completion handles, and one-shot cursors such as iterators and futures.
pub(crate) struct ForbiddenStringifier {
	explicit: FxHashSet<TypeKey>,
	cache: RwLock<FxHashMap<TypeKey, bool>>,
}

impl ForbiddenStringifier {
	/// Creates the handler, also forbidding every type in `explicit`.
	pub(crate) fn new(explicit: FxHashSet<TypeKey>) -> Self {
		Self {
			explicit,
			cache: RwLock::new(FxHashMap::default()),
		}
	}

	/// Returns true when values of `ty` must not be traversed.
	pub(crate) fn is_forbidden(&self, ty: &TypeDesc) -> bool {
		let key = ty.key();
		if let Some(&forbidden) = self.cache.read().get(&key) {
			return forbidden;
		}
		let forbidden = ty
			.ancestors()
			.any(|ty| self.explicit.contains(&ty.key()) || is_forbidden_shape(ty.traits()));
		*self.cache.write().entry(key).or_insert(forbidden)
	}
}

fn is_forbidden_shape(traits: TypeTraits) -> bool {
	traits.intersects(TypeTraits::THREAD | TypeTraits::CANCELLATION | TypeTraits::COMPLETION)
		|| (traits.intersects(TypeTraits::ITERATOR | TypeTraits::FUTURE)
			&& !traits.contains(TypeTraits::ITERABLE))
}

impl Stringifier for ForbiddenStringifier {
	fn id(&self) -> &str {
		"forbidden"
	}

	fn resolve<'v>(&self, target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>> {
		if self.is_forbidden(&target.type_desc) {
			Ok(Box::new(ForbiddenValue(target.type_desc)))
		} else {
			Err(target)
		}
	}
}

/// Writes the type name followed by the forbidden glyph.
pub(crate) struct ForbiddenValue(pub(crate) TypeDesc);

impl Composable for ForbiddenValue {
	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		ctx.append_type_name(&self.0)?;
		ctx.append_str(glyph::FORBIDDEN);
		Ok(())
	}
}
