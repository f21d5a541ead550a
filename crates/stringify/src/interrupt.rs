//! Short-circuit signals unwinding out of a render.

use glimpse_reflect::{InspectError, MemberError, TypeDesc};
use thiserror::Error;

/// Control-flow signal threaded through a render.
///
/// None of these reach the caller of [`Stringify::render`](crate::Stringify::render):
/// each is caught at a fixed boundary and turned into a glyph.
#[derive(Debug, Error)]
pub enum Interrupt {
	/// An item budget ran out. Caught by the enclosing bounded sequence.
	#[error("item budget exhausted")]
	CountExhausted,
	/// The deadline expired. Caught by the nearest atomic compose boundary.
	#[error("time budget exhausted")]
	TimeExhausted,
	/// The value is already being rendered further up. Caught one level up.
	#[error("cycle back to {type_desc:?} {depth_delta} levels up")]
	Cycle {
		/// Type of the value that closed the cycle.
		type_desc: TypeDesc,
		/// Levels between this position and the first sighting.
		depth_delta: usize,
	},
	/// Rendering failed. Caught where the failing value is invoked.
	#[error("{0}")]
	Failed(String),
}

impl Interrupt {
	/// Creates a failure with a message.
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}
}

impl From<MemberError> for Interrupt {
	fn from(error: MemberError) -> Self {
		Self::Failed(error.to_string())
	}
}

impl From<InspectError> for Interrupt {
	fn from(error: InspectError) -> Self {
		Self::Failed(error.to_string())
	}
}

/// Outcome of one render step.
pub type Flow = Result<(), Interrupt>;
