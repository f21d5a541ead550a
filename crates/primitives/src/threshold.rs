//! Count thresholds.
//!
//! A [`Threshold`] is either unlimited or a non-negative hard cap. An
//! [`InheritableThreshold`] may additionally defer to other thresholds; it is
//! resolved through an ordered fallback list that ends at a plain [`Threshold`].

use serde::Deserialize;

use crate::BudgetError;

/// A count cap: `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "ThresholdRepr")]
pub struct Threshold(Option<usize>);

impl Threshold {
	/// No cap.
	pub const UNLIMITED: Self = Self(None);

	/// Creates a hard cap of `limit`.
	#[inline]
	pub const fn limit(limit: usize) -> Self {
		Self(Some(limit))
	}

	/// Creates a threshold from a signed configuration value.
	///
	/// # Errors
	///
	/// Returns [`BudgetError::NegativeThreshold`] when `value` is negative.
	pub fn from_signed(value: i64) -> Result<Self, BudgetError> {
		usize::try_from(value)
			.map(Self::limit)
			.map_err(|_| BudgetError::NegativeThreshold(value))
	}

	/// Returns the cap, or `None` when unlimited.
	#[inline]
	pub const fn value(self) -> Option<usize> {
		self.0
	}

	/// Returns true when there is no cap.
	#[inline]
	pub const fn is_unlimited(self) -> bool {
		self.0.is_none()
	}

	/// Returns true when `amount` stays within the cap.
	#[inline]
	pub fn admits(self, amount: usize) -> bool {
		self.0.is_none_or(|limit| amount <= limit)
	}
}

impl TryFrom<ThresholdRepr> for Threshold {
	type Error = BudgetError;

	fn try_from(repr: ThresholdRepr) -> Result<Self, Self::Error> {
		match repr {
			ThresholdRepr::Count(value) => Self::from_signed(value),
			ThresholdRepr::Keyword(word) if word == "unlimited" => Ok(Self::UNLIMITED),
			ThresholdRepr::Keyword(word) => Err(BudgetError::UnknownKeyword(word)),
		}
	}
}

impl From<usize> for Threshold {
	fn from(limit: usize) -> Self {
		Self::limit(limit)
	}
}

impl std::fmt::Display for Threshold {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.0 {
			Some(limit) => write!(f, "{limit}"),
			None => f.write_str("unlimited"),
		}
	}
}

/// A threshold that may defer to other thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "ThresholdRepr")]
pub enum InheritableThreshold {
	/// Fall back to the next threshold in the chain.
	#[default]
	Inherit,
	/// No cap, regardless of fallbacks.
	Unlimited,
	/// Hard cap.
	Limit(usize),
}

impl InheritableThreshold {
	/// Creates an inheritable threshold from a signed configuration value.
	///
	/// # Errors
	///
	/// Returns [`BudgetError::NegativeThreshold`] when `value` is negative.
	pub fn from_signed(value: i64) -> Result<Self, BudgetError> {
		usize::try_from(value)
			.map(Self::Limit)
			.map_err(|_| BudgetError::NegativeThreshold(value))
	}

	/// Returns this threshold as a plain one, or `None` when it inherits.
	#[inline]
	pub const fn explicit(self) -> Option<Threshold> {
		match self {
			Self::Inherit => None,
			Self::Unlimited => Some(Threshold::UNLIMITED),
			Self::Limit(limit) => Some(Threshold::limit(limit)),
		}
	}

	/// Resolves through `fallbacks` in order, ending at `root`.
	///
	/// The first non-inheriting entry wins; if every entry inherits, `root`
	/// applies.
	pub fn resolve(self, fallbacks: &[InheritableThreshold], root: Threshold) -> Threshold {
		std::iter::once(self)
			.chain(fallbacks.iter().copied())
			.find_map(Self::explicit)
			.unwrap_or(root)
	}
}

impl From<Threshold> for InheritableThreshold {
	fn from(threshold: Threshold) -> Self {
		match threshold.value() {
			Some(limit) => Self::Limit(limit),
			None => Self::Unlimited,
		}
	}
}

/// Serialized form: an integer cap, or a keyword (`unlimited`, and `inherit`
/// where inheritance applies).
#[derive(Deserialize)]
#[serde(untagged)]
enum ThresholdRepr {
	Count(i64),
	Keyword(String),
}

impl TryFrom<ThresholdRepr> for InheritableThreshold {
	type Error = BudgetError;

	fn try_from(repr: ThresholdRepr) -> Result<Self, Self::Error> {
		match repr {
			ThresholdRepr::Count(value) => Self::from_signed(value),
			ThresholdRepr::Keyword(word) => match word.as_str() {
				"inherit" => Ok(Self::Inherit),
				"unlimited" => Ok(Self::Unlimited),
				_ => Err(BudgetError::UnknownKeyword(word)),
			},
		}
	}
}

#[cfg(test)]
mod tests;
