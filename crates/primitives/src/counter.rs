use crate::Threshold;

/// Item budget for one bounded sequence, taken one unit at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllottedCounter {
	remaining: Option<usize>,
}

impl AllottedCounter {
	/// Creates a counter allotted `threshold` units.
	#[inline]
	pub const fn new(threshold: Threshold) -> Self {
		Self {
			remaining: threshold.value(),
		}
	}

	/// Takes one unit. Returns false once the allotment is spent.
	#[inline]
	pub fn try_take(&mut self) -> bool {
		match &mut self.remaining {
			None => true,
			Some(0) => false,
			Some(left) => {
				*left -= 1;
				true
			}
		}
	}

	/// Returns the units left, or `None` when unlimited.
	#[inline]
	pub const fn remaining(&self) -> Option<usize> {
		self.remaining
	}

	/// Returns true once no units are left.
	#[inline]
	pub const fn is_exhausted(&self) -> bool {
		matches!(self.remaining, Some(0))
	}
}

impl From<Threshold> for AllottedCounter {
	fn from(threshold: Threshold) -> Self {
		Self::new(threshold)
	}
}
