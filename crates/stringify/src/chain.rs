//! The ordered stringifier chain.
//!
//! Every non-proxy value is offered to each [`Stringifier`] in descending
//! priority order; the first one that accepts it returns a [`Composable`]
//! that knows how to write the value into the session.

use std::sync::Arc;

use glimpse_reflect::{Inspect, Shape, TypeDesc};

use crate::{Flow, StringifyContext};

/// Fixed priorities of the built-in stringifiers.
pub mod priority {
	/// Forbidden types; always tried first.
	pub const FORBIDDEN: i16 = i16::MAX;
	/// Strings, numbers, booleans, characters, enums.
	pub const PRIMITIVE: i16 = 3000;
	/// Tuples, key-value pairs, callables, dates, ids, urls, regexes.
	pub const BASIC: i16 = 2000;
	/// Type descriptors rendered as values.
	pub const TYPE_INFO: i16 = 1500;
	/// Anonymous records.
	pub const ANONYMOUS: i16 = 1000;
	/// Sequences and maps.
	pub const COLLECTION: i16 = 500;
	/// Memberwise fallback; always tried last.
	pub const MEMBERWISE: i16 = i16::MIN;
}

/// A value offered to the chain, with its shape and runtime type.
pub struct Target<'v> {
	/// The value itself.
	pub value: &'v dyn Inspect,
	/// The shape the value reported.
	pub shape: Shape<'v>,
	/// The runtime type of the value.
	pub type_desc: TypeDesc,
}

/// A resolved value ready to be written.
pub trait Composable {
	/// Returns true when rendering consumes a depth level.
	fn is_deep(&self) -> bool {
		false
	}

	/// Writes the value into `ctx`.
	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow;
}

/// A type handler in the chain.
pub trait Stringifier: Send + Sync + 'static {
	/// Returns the identity used to deduplicate registrations.
	fn id(&self) -> &str;

	/// Accepts `target` by returning a composable, or hands it back.
	fn resolve<'v>(&self, target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>>;
}

struct Registration {
	stringifier: Arc<dyn Stringifier>,
	priority: i16,
}

/// Stringifiers in resolution order.
pub struct StringifierChain {
	entries: Vec<Registration>,
}

impl StringifierChain {
	/// Builds the chain from built-in and custom registrations.
	///
	/// Custom priorities are clamped strictly between the memberwise floor and
	/// the forbidden ceiling. Registrations sharing an id keep the first one
	/// seen, built-ins first. Equal priorities keep registration order.
	pub fn build(
		builtins: Vec<(Arc<dyn Stringifier>, i16)>,
		custom: Vec<(Arc<dyn Stringifier>, i16)>,
	) -> Self {
		let custom = custom.into_iter().map(|(stringifier, priority)| {
			(stringifier, priority.clamp(i16::MIN + 1, i16::MAX - 1))
		});
		let mut entries: Vec<Registration> = Vec::new();
		for (stringifier, priority) in builtins.into_iter().chain(custom) {
			if entries.iter().any(|entry| entry.stringifier.id() == stringifier.id()) {
				continue;
			}
			entries.push(Registration { stringifier, priority });
		}
		entries.sort_by(|a, b| b.priority.cmp(&a.priority));
		let chain = Self { entries };
		tracing::debug!(stringifiers = ?chain.describe(), "stringify.chain.built");
		chain
	}

	/// Offers `target` to each stringifier in order.
	pub fn resolve<'v>(&self, mut target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>> {
		for entry in &self.entries {
			match entry.stringifier.resolve(target) {
				Ok(composable) => return Ok(composable),
				Err(refused) => target = refused,
			}
		}
		Err(target)
	}

	/// Returns `(id, priority)` pairs in resolution order.
	pub fn describe(&self) -> Vec<(&str, i16)> {
		self.entries
			.iter()
			.map(|entry| (entry.stringifier.id(), entry.priority))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	struct Refuse(&'static str);

	impl Stringifier for Refuse {
		fn id(&self) -> &str {
			self.0
		}

		fn resolve<'v>(&self, target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>> {
			Err(target)
		}
	}

	fn entry(id: &'static str, priority: i16) -> (Arc<dyn Stringifier>, i16) {
		(Arc::new(Refuse(id)), priority)
	}

	#[test]
	fn test_custom_priorities_are_clamped() {
		let chain = StringifierChain::build(
			vec![entry("forbidden", i16::MAX), entry("memberwise", i16::MIN)],
			vec![entry("loud", i16::MAX), entry("quiet", i16::MIN), entry("mid", 10)],
		);
		assert_eq!(
			chain.describe(),
			vec![
				("forbidden", i16::MAX),
				("loud", i16::MAX - 1),
				("mid", 10),
				("quiet", i16::MIN + 1),
				("memberwise", i16::MIN),
			]
		);
	}

	#[test]
	fn test_duplicate_ids_keep_first() {
		let chain = StringifierChain::build(
			vec![entry("primitive", 3000)],
			vec![entry("primitive", 9000), entry("custom", 1), entry("custom", 2)],
		);
		assert_eq!(chain.describe(), vec![("primitive", 3000), ("custom", 1)]);
	}

	#[test]
	fn test_equal_priorities_keep_registration_order() {
		let chain = StringifierChain::build(
			vec![entry("builtin", 500)],
			vec![entry("first", 500), entry("second", 500)],
		);
		assert_eq!(
			chain.describe(),
			vec![("builtin", 500), ("first", 500), ("second", 500)]
		);
	}
}
