use thiserror::Error;

/// Errors raised while reading a member of a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemberError {
	/// The getter was handed an owner of the wrong concrete type.
	#[error("member owner is not a {expected}")]
	OwnerMismatch {
		/// Type name the getter expected.
		expected: &'static str,
	},
	/// The member cannot be read (write-only or indexed).
	#[error("member {0} is not readable")]
	Unreadable(String),
	/// The getter itself failed.
	#[error("{0}")]
	Failed(String),
}

impl MemberError {
	/// Creates a getter failure with a message.
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}
}

/// Errors raised while inspecting a value or iterating its items.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InspectError {
	/// The value is exclusively borrowed or locked elsewhere.
	#[error("value is busy: {0}")]
	Busy(&'static str),
	/// An item source failed mid-iteration.
	#[error("item source failed: {0}")]
	Source(String),
	/// An item source panicked.
	#[error("item source panicked")]
	Panicked,
}
