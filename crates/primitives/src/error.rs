use thiserror::Error;

/// Errors raised when a budget value is rejected at configuration time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
	/// A count threshold was configured with a negative value.
	#[error("threshold must be non-negative, got {0}")]
	NegativeThreshold(i64),
	/// A duration budget was configured with a negative value.
	#[error("duration must be non-negative, got {0}ms")]
	NegativeDuration(i64),
	/// An inheritable threshold keyword was not recognized.
	#[error("unknown threshold keyword {0:?} (expected \"inherit\" or \"unlimited\")")]
	UnknownKeyword(String),
}
