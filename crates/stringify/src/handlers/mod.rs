//! Built-in stringifiers.

mod anonymous;
mod basic;
mod collection;
mod forbidden;
mod memberwise;
mod primitive;
mod type_info;

use std::sync::Arc;

pub(crate) use anonymous::AnonymousStringifier;
pub(crate) use basic::BasicStringifier;
pub(crate) use collection::CollectionStringifier;
pub(crate) use forbidden::{ForbiddenStringifier, ForbiddenValue};
pub(crate) use memberwise::MemberwiseStringifier;
pub(crate) use primitive::PrimitiveStringifier;
pub(crate) use type_info::TypeInfoStringifier;

use crate::chain::{Stringifier, priority};

/// Returns the built-in registrations, sharing `forbidden` with the memberwise fallback.
pub(crate) fn builtins(
	forbidden: Arc<ForbiddenStringifier>,
	memberwise: MemberwiseStringifier,
) -> Vec<(Arc<dyn Stringifier>, i16)> {
	let entries: [(Arc<dyn Stringifier>, i16); 7] = [
		(forbidden, priority::FORBIDDEN),
		(Arc::new(PrimitiveStringifier), priority::PRIMITIVE),
		(Arc::new(BasicStringifier), priority::BASIC),
		(Arc::new(TypeInfoStringifier), priority::TYPE_INFO),
		(Arc::new(AnonymousStringifier), priority::ANONYMOUS),
		(Arc::new(CollectionStringifier), priority::COLLECTION),
		(Arc::new(memberwise), priority::MEMBERWISE),
	];
	entries.into()
}
