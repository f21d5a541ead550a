//! Configuration errors.

use glimpse_primitives::BudgetError;
use thiserror::Error;

/// Errors rejected while building a [`Stringify`](crate::Stringify) engine.
///
/// Rendering itself never fails; every problem found at render time becomes
/// an inline glyph. Only configuration is validated eagerly.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A budget value was out of range.
	#[error(transparent)]
	Budget(#[from] BudgetError),

	/// A namespace pattern failed to compile.
	#[error("invalid {field} pattern: {source}")]
	InvalidPattern {
		/// Option that carried the pattern.
		field: &'static str,
		/// Compilation failure.
		#[source]
		source: regex::Error,
	},

	/// A custom stringifier reported an empty id.
	#[error("stringifier id must not be empty")]
	EmptyStringifierId,

	/// A member renderer was registered under an empty name.
	#[error("member renderer name must not be empty")]
	EmptyRendererName,

	/// An options document could not be parsed.
	#[error("options parse error: {0}")]
	Parse(#[from] toml::de::Error),
}
