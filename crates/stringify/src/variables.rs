//! Per-render limits and formatting switches.
//!
//! [`Variables`] are resolved once from [`StringifyOptions`] when an engine is
//! built. A render starts from a shared snapshot; handlers that need different
//! limits for a nested value scope a modified copy for that value only.

use glimpse_primitives::{InheritableThreshold, Threshold};
use regex::Regex;

use crate::error::ConfigError;
use crate::options::StringifyOptions;

/// Item budget kinds, each resolving to a concrete [`Threshold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemBudget {
	/// Items of a sequence.
	Collection,
	/// Entries of a map.
	Dictionary,
	/// Members of an object.
	Members,
	/// Fields of an anonymous record.
	Anonymous,
	/// Items of a tuple.
	Tuple,
	/// Parameters of a callable signature.
	Parameters,
}

/// Limits and switches in effect for one render scope.
#[derive(Debug, Clone)]
pub struct Variables {
	/// Characters of a string shown before the ellipsis.
	pub max_string_length: Threshold,
	/// Items of a sequence shown before the ellipsis.
	pub max_collection_items: Threshold,
	/// Entries of a map.
	pub max_dictionary_items: InheritableThreshold,
	/// Members of an object.
	pub max_member_count: InheritableThreshold,
	/// Fields of an anonymous record.
	pub max_anonymous_properties: InheritableThreshold,
	/// Items of a tuple.
	pub max_tuple_items: InheritableThreshold,
	/// Parameters of a callable signature.
	pub max_parameters: InheritableThreshold,
	/// Nesting levels of composite values.
	pub max_depth: Threshold,
	/// When namespaces are written in type names.
	pub namespaces: NamespacePolicy,
	/// Use short aliases for well-known types.
	pub type_aliases: bool,
	/// Separator between items and members.
	pub member_separator: String,
}

impl Variables {
	/// Resolves variables from options and their compiled namespace policy.
	pub fn from_options(options: &StringifyOptions, namespaces: NamespacePolicy) -> Self {
		Self {
			max_string_length: options.max_string_length,
			max_collection_items: options.max_collection_items,
			max_dictionary_items: options.max_dictionary_items,
			max_member_count: options.max_member_count,
			max_anonymous_properties: options.max_anonymous_properties,
			max_tuple_items: options.max_tuple_items,
			max_parameters: options.max_parameters,
			max_depth: options.max_depth,
			namespaces,
			type_aliases: options.type_aliases,
			member_separator: options.member_separator.clone(),
		}
	}

	/// Resolves the threshold for an item budget.
	///
	/// Members inherit from dictionaries, anonymous records from members; every
	/// chain ends at the collection budget.
	pub fn threshold(&self, budget: ItemBudget) -> Threshold {
		let root = self.max_collection_items;
		match budget {
			ItemBudget::Collection => root,
			ItemBudget::Dictionary => self.max_dictionary_items.resolve(&[], root),
			ItemBudget::Members => self
				.max_member_count
				.resolve(&[self.max_dictionary_items], root),
			ItemBudget::Anonymous => self
				.max_anonymous_properties
				.resolve(&[self.max_member_count, self.max_dictionary_items], root),
			ItemBudget::Tuple => self.max_tuple_items.resolve(&[], root),
			ItemBudget::Parameters => self.max_parameters.resolve(&[], root),
		}
	}
}

impl Default for Variables {
	fn default() -> Self {
		Self::from_options(&StringifyOptions::default(), NamespacePolicy::default())
	}
}

/// Decides whether a namespace is written in front of a type name.
#[derive(Debug, Clone, Default)]
pub struct NamespacePolicy {
	include: Option<Regex>,
	exclude: Option<Regex>,
	when_ambiguous: bool,
	when_unspecified: bool,
}

impl NamespacePolicy {
	/// Compiles a policy from include and exclude patterns.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidPattern`] when a pattern does not compile.
	pub fn new(
		include: Option<&str>,
		exclude: Option<&str>,
		when_ambiguous: bool,
		when_unspecified: bool,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			include: compile("namespace_include", include)?,
			exclude: compile("namespace_exclude", exclude)?,
			when_ambiguous,
			when_unspecified,
		})
	}

	/// Returns true when `namespace` should be written out.
	pub fn is_explicit(&self, namespace: &str) -> bool {
		let included = self.include.as_ref().is_some_and(|re| re.is_match(namespace));
		let excluded = self.exclude.as_ref().is_some_and(|re| re.is_match(namespace));
		match (included, excluded) {
			(true, true) => self.when_ambiguous,
			(true, false) => true,
			(false, true) => false,
			(false, false) => self.when_unspecified,
		}
	}
}

fn compile(field: &'static str, pattern: Option<&str>) -> Result<Option<Regex>, ConfigError> {
	pattern
		.map(|pattern| Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern { field, source }))
		.transpose()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case::all_inherit(InheritableThreshold::Inherit, InheritableThreshold::Inherit, Threshold::limit(32))]
	#[case::dictionary_wins(InheritableThreshold::Limit(4), InheritableThreshold::Inherit, Threshold::limit(4))]
	#[case::members_win(InheritableThreshold::Limit(4), InheritableThreshold::Limit(2), Threshold::limit(2))]
	#[case::unlimited_stops_chain(
		InheritableThreshold::Limit(4),
		InheritableThreshold::Unlimited,
		Threshold::UNLIMITED
	)]
	fn test_anonymous_budget_inherits(
		#[case] dictionary: InheritableThreshold,
		#[case] members: InheritableThreshold,
		#[case] expected: Threshold,
	) {
		let variables = Variables {
			max_dictionary_items: dictionary,
			max_member_count: members,
			..Variables::default()
		};
		assert_eq!(variables.threshold(ItemBudget::Anonymous), expected);
	}

	#[test]
	fn test_tuple_and_parameters_skip_dictionary() {
		let variables = Variables {
			max_dictionary_items: InheritableThreshold::Limit(1),
			max_parameters: InheritableThreshold::Limit(5),
			..Variables::default()
		};
		assert_eq!(variables.threshold(ItemBudget::Tuple), Threshold::limit(32));
		assert_eq!(variables.threshold(ItemBudget::Parameters), Threshold::limit(5));
		assert_eq!(variables.threshold(ItemBudget::Members), Threshold::limit(1));
	}

	#[rstest]
	#[case::included("app::model", true)]
	#[case::excluded("core::option", false)]
	#[case::ambiguous("app::core", false)]
	#[case::unspecified("serde::de", true)]
	fn test_namespace_policy(#[case] namespace: &str, #[case] expected: bool) {
		let policy = NamespacePolicy::new(Some("^app"), Some("core"), false, true).unwrap();
		assert_eq!(policy.is_explicit(namespace), expected);
	}

	#[test]
	fn test_default_policy_hides_everything() {
		assert!(!NamespacePolicy::default().is_explicit("app"));
	}
}
