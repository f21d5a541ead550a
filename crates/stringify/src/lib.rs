//! Bounded, extensible, reflective rendering of values for logs and traces.
//!
//! A [`Stringify`] engine turns any [`Inspect`] value into a compact single
//! line, under hard budgets:
//! - output length, string length, and per-sequence item counts
//! - nesting depth, with cycles written as back-references (`Node~1`)
//! - wall-clock time, rolling back partial output to an ellipsis
//!
//! Values are offered to an ordered chain of [`Stringifier`]s. The built-in
//! chain covers forbidden handles, primitives, tuples and well-known value
//! objects, type descriptors, anonymous records, and collections, and ends in
//! a memberwise fallback driven by the type's member table, its declarative
//! markers, and programmatic [`TypeContract`]s.
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! let map = BTreeMap::from([(1, "a")]);
//! assert_eq!(glimpse_stringify::render(&map), "BTreeMap<i32, &str>(1){1:a}");
//! assert_eq!(glimpse_stringify::render(&(1, 'x')), "(1, x)");
//! ```

use std::sync::LazyLock;

/// The ordered stringifier chain and the traits handlers implement.
pub mod chain;
/// Render session.
pub mod context;
/// Type and member contracts.
pub mod contracts;
mod engine;
/// Configuration errors.
pub mod error;
/// Glyphs written in place of values.
pub mod glyph;
mod handlers;
/// Render-time control flow.
pub mod interrupt;
/// Scoped meta-property hints.
pub mod meta;
/// Engine options.
pub mod options;
/// Named member renderers.
pub mod renderer;
/// Type-name rendering.
pub mod type_name;
/// Per-scope limits.
pub mod variables;

pub use chain::{Composable, Stringifier, StringifierChain, Target, priority};
pub use context::{Compose, Mark, StringifyContext};
pub use contracts::{ContractsBuilder, MemberContract, TypeContract, TypeContracts};
pub use engine::{Stringify, StringifyBuilder};
pub use error::ConfigError;
pub use glimpse_primitives::{Expiration, InheritableThreshold, Threshold};
pub use glimpse_reflect::{Inspect, Reflect, TypeDesc};
pub use interrupt::{Flow, Interrupt};
pub use meta::{ARRAY_DIMENSIONS, COLLECTION_LENGTH, KeyComparison, MetaProperties, MetaValue};
pub use options::StringifyOptions;
pub use renderer::MemberRenderer;
pub use type_name::type_name;
pub use variables::{ItemBudget, NamespacePolicy, Variables};

static DEFAULT: LazyLock<Stringify> = LazyLock::new(Stringify::default);

/// Renders `value` with the process-wide default engine.
pub fn render(value: &dyn Inspect) -> String {
	DEFAULT.render(value)
}
