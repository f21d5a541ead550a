//! Wall-clock budgets.

use std::time::{Duration, Instant};

use crate::BudgetError;

/// When a time budget runs out, measured from the start of its clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Expiration {
	/// The budget never runs out.
	#[default]
	Never,
	/// The budget runs out once this much running time has elapsed.
	After(Duration),
}

impl Expiration {
	/// Creates an expiration from a signed millisecond count.
	///
	/// # Errors
	///
	/// Returns [`BudgetError::NegativeDuration`] when `millis` is negative.
	pub fn from_millis(millis: i64) -> Result<Self, BudgetError> {
		u64::try_from(millis)
			.map(|ms| Self::After(Duration::from_millis(ms)))
			.map_err(|_| BudgetError::NegativeDuration(millis))
	}

	/// Returns the allotted duration, or `None` for [`Expiration::Never`].
	#[inline]
	pub const fn duration(self) -> Option<Duration> {
		match self {
			Self::Never => None,
			Self::After(duration) => Some(duration),
		}
	}
}

/// Monotonic, pausable clock enforcing an [`Expiration`].
///
/// Only running time counts against the budget. A render that hands control
/// to a nested scope with its own dedicated clock pauses this one, so the
/// nested work does not consume the parent's budget.
#[derive(Debug, Clone)]
pub struct DeadlineClock {
	expiration: Expiration,
	banked: Duration,
	running_since: Option<Instant>,
}

impl DeadlineClock {
	/// Creates a running clock.
	pub fn start(expiration: Expiration) -> Self {
		Self {
			expiration,
			banked: Duration::ZERO,
			running_since: Some(Instant::now()),
		}
	}

	/// Creates a running clock that never expires.
	pub fn unbounded() -> Self {
		Self::start(Expiration::Never)
	}

	/// Returns the expiration this clock enforces.
	#[inline]
	pub const fn expiration(&self) -> Expiration {
		self.expiration
	}

	/// Returns true while the clock is running.
	#[inline]
	pub const fn is_running(&self) -> bool {
		self.running_since.is_some()
	}

	/// Stops accumulating time. No-op when already paused.
	pub fn pause(&mut self) {
		if let Some(since) = self.running_since.take() {
			self.banked += since.elapsed();
		}
	}

	/// Resumes accumulating time. No-op when already running.
	pub fn resume(&mut self) {
		if self.running_since.is_none() {
			self.running_since = Some(Instant::now());
		}
	}

	/// Returns the running time accumulated so far.
	pub fn elapsed(&self) -> Duration {
		self.banked + self.running_since.map_or(Duration::ZERO, |since| since.elapsed())
	}

	/// Returns the time left, or `None` when the clock never expires.
	pub fn remaining(&self) -> Option<Duration> {
		self.expiration
			.duration()
			.map(|budget| budget.saturating_sub(self.elapsed()))
	}

	/// Returns true once the accumulated running time reaches the budget.
	pub fn is_expired(&self) -> bool {
		self.expiration
			.duration()
			.is_some_and(|budget| self.elapsed() >= budget)
	}
}

#[cfg(test)]
mod tests;
