//! Scoped side-channel hints passed from handlers to nested renders.
//!
//! A collection handler knows how many items it holds; the type-name renderer
//! it calls does not. The handler scopes a hint into [`MetaProperties`] for
//! the duration of that nested render.

use std::borrow::Cow;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use smallvec::SmallVec;

/// Total item count of the collection whose type name is being rendered.
pub const COLLECTION_LENGTH: &str = "collection.length";
/// Per-dimension lengths of the array whose type name is being rendered.
pub const ARRAY_DIMENSIONS: &str = "array.dimensions";

/// How meta-property keys are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyComparison {
	/// Exact match.
	#[default]
	Ordinal,
	/// ASCII case-insensitive match.
	IgnoreCase,
}

/// A meta-property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
	/// A count.
	Count(usize),
	/// Array dimensions.
	Dimensions(SmallVec<[usize; 2]>),
	/// A switch.
	Flag(bool),
	/// Free text.
	Text(String),
}

/// Keyed hints visible to one render scope and its children.
#[derive(Debug, Clone, Default)]
pub struct MetaProperties {
	comparison: KeyComparison,
	entries: FxHashMap<String, MetaValue>,
}

impl MetaProperties {
	/// Creates an empty map using `comparison` for keys.
	pub fn new(comparison: KeyComparison) -> Self {
		Self {
			comparison,
			entries: FxHashMap::default(),
		}
	}

	fn normalize<'k>(&self, key: &'k str) -> Cow<'k, str> {
		match self.comparison {
			KeyComparison::Ordinal => Cow::Borrowed(key),
			KeyComparison::IgnoreCase => Cow::Owned(key.to_ascii_lowercase()),
		}
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&MetaValue> {
		self.entries.get(self.normalize(key).as_ref())
	}

	/// Stores `value` under `key`, replacing any previous value.
	pub fn set(&mut self, key: &str, value: MetaValue) {
		let key = self.normalize(key).into_owned();
		self.entries.insert(key, value);
	}

	/// Removes the value stored under `key`.
	pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
		let key = self.normalize(key);
		self.entries.remove(key.as_ref())
	}

	/// Returns the count stored under `key`, if it is a count.
	pub fn count(&self, key: &str) -> Option<usize> {
		match self.get(key)? {
			MetaValue::Count(n) => Some(*n),
			_ => None,
		}
	}

	/// Returns the dimensions stored under `key`, if they are dimensions.
	pub fn dimensions(&self, key: &str) -> Option<&[usize]> {
		match self.get(key)? {
			MetaValue::Dimensions(dims) => Some(dims),
			_ => None,
		}
	}

	/// Returns true when no hints are set.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
