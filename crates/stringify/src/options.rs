//! Engine-wide configuration.

use std::time::Duration;

use glimpse_primitives::{Expiration, InheritableThreshold, Threshold};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::meta::KeyComparison;
use crate::variables::NamespacePolicy;

/// Default configuration of a [`Stringify`](crate::Stringify) engine.
///
/// Loadable from TOML; every key is optional and unknown keys are rejected.
/// Count budgets accept a non-negative integer or `"unlimited"`; the
/// inheritable ones also accept `"inherit"`.
///
/// ```toml
/// max_string_length = 64
/// max_collection_items = 10
/// max_member_count = "unlimited"
/// max_render_time_ms = 50
/// namespace_include = "^app::"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StringifyOptions {
	/// Characters of a string shown before the ellipsis.
	pub max_string_length: Threshold,
	/// Items of a sequence shown before the ellipsis.
	pub max_collection_items: Threshold,
	/// Entries of a map; falls back to the collection budget.
	pub max_dictionary_items: InheritableThreshold,
	/// Members of an object; falls back to the dictionary budget.
	pub max_member_count: InheritableThreshold,
	/// Fields of an anonymous record; falls back to the member budget.
	pub max_anonymous_properties: InheritableThreshold,
	/// Items of a tuple; falls back to the collection budget.
	pub max_tuple_items: InheritableThreshold,
	/// Parameters of a callable signature; falls back to the collection budget.
	pub max_parameters: InheritableThreshold,
	/// Nesting levels of composite values.
	pub max_depth: Threshold,
	/// Bytes of output per render.
	pub max_total_length: Threshold,
	/// Wall-clock budget per render, in milliseconds.
	pub max_render_time_ms: Option<u64>,
	/// Dedicated budget for rendering a type name, in milliseconds.
	pub type_name_time_ms: Option<u64>,
	/// Namespaces matching this pattern are written out.
	pub namespace_include: Option<String>,
	/// Namespaces matching this pattern are omitted.
	pub namespace_exclude: Option<String>,
	/// Write the namespace when both patterns match.
	pub namespace_when_ambiguous: bool,
	/// Write the namespace when neither pattern matches.
	pub namespace_when_unspecified: bool,
	/// Use short aliases for well-known types.
	pub type_aliases: bool,
	/// Render types with no marker or contract memberwise.
	pub render_unknown_types: bool,
	/// How meta-property keys compare.
	pub meta_key_comparison: KeyComparison,
	/// Separator between items and members.
	pub member_separator: String,
}

impl Default for StringifyOptions {
	fn default() -> Self {
		Self {
			max_string_length: Threshold::limit(256),
			max_collection_items: Threshold::limit(32),
			max_dictionary_items: InheritableThreshold::Inherit,
			max_member_count: InheritableThreshold::Inherit,
			max_anonymous_properties: InheritableThreshold::Inherit,
			max_tuple_items: InheritableThreshold::Inherit,
			max_parameters: InheritableThreshold::Inherit,
			max_depth: Threshold::limit(8),
			max_total_length: Threshold::limit(4096),
			max_render_time_ms: Some(100),
			type_name_time_ms: None,
			namespace_include: None,
			namespace_exclude: None,
			namespace_when_ambiguous: false,
			namespace_when_unspecified: false,
			type_aliases: true,
			render_unknown_types: true,
			meta_key_comparison: KeyComparison::Ordinal,
			member_separator: ", ".to_string(),
		}
	}
}

impl StringifyOptions {
	/// Parses and validates options from a TOML document.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Parse`] for malformed documents, unknown keys, and
	/// negative numbers, and [`ConfigError::InvalidPattern`] for namespace
	/// patterns that do not compile.
	pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
		let options: Self = toml::from_str(document)?;
		options.namespace_policy()?;
		Ok(options)
	}

	/// Returns the per-render wall-clock budget.
	pub fn render_time(&self) -> Expiration {
		expiration(self.max_render_time_ms)
	}

	/// Returns the dedicated budget for type names.
	pub fn type_name_time(&self) -> Expiration {
		expiration(self.type_name_time_ms)
	}

	/// Compiles the namespace patterns.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidPattern`] when a pattern does not compile.
	pub fn namespace_policy(&self) -> Result<NamespacePolicy, ConfigError> {
		NamespacePolicy::new(
			self.namespace_include.as_deref(),
			self.namespace_exclude.as_deref(),
			self.namespace_when_ambiguous,
			self.namespace_when_unspecified,
		)
	}
}

fn expiration(millis: Option<u64>) -> Expiration {
	millis.map_or(Expiration::Never, |ms| {
		Expiration::After(Duration::from_millis(ms))
	})
}
