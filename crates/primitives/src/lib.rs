//! Budget primitives for bounded rendering: thresholds, deadlines, and counters.
//!
//! Every resource a render may consume (string length, item counts, depth,
//! total output, wall-clock time) is expressed with one of these types:
//! - [`Threshold`]: unlimited or a hard cap
//! - [`InheritableThreshold`]: a threshold that may defer to a fallback chain
//! - [`Expiration`] and [`DeadlineClock`]: pausable wall-clock budgets
//! - [`AllottedCounter`]: a decrementing per-sequence item budget

/// Decrementing item budgets.
pub mod counter;
/// Wall-clock expirations and the pausable deadline clock.
pub mod deadline;
/// Budget configuration errors.
pub mod error;
/// Count thresholds with inheritance fallback chains.
pub mod threshold;

pub use counter::AllottedCounter;
pub use deadline::{DeadlineClock, Expiration};
pub use error::BudgetError;
pub use threshold::{InheritableThreshold, Threshold};
