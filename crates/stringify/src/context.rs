//! The render session.
//!
//! A [`StringifyContext`] lives for exactly one top-level render. It owns the
//! output buffer, the cycle-detection map, the scoped variables and meta
//! properties, and the deadline clock. Handlers write through its append
//! methods and recurse through [`StringifyContext::compose`].
//!
//! Budgets are enforced at fixed points:
//! - every append checks the total length and becomes a no-op once full
//! - every compose boundary checks the deadline
//! - every bounded sequence takes from its own item counter
//! - every deep value takes a depth level

use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use glimpse_primitives::{AllottedCounter, DeadlineClock, Expiration};
use glimpse_reflect::{Inspect, Shape, TypeDesc};
use rustc_hash::FxHashMap;

use crate::chain::{Composable, Target};
use crate::engine::Engine;
use crate::variables::{ItemBudget, Variables};
use crate::{Flow, Interrupt, MetaProperties, glyph};

/// A saved buffer position for [`StringifyContext::rollback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
	len: usize,
	full: bool,
}

/// Options of one compose boundary.
pub struct Compose<'c> {
	atomic: bool,
	variables: Option<Box<dyn FnOnce(&mut Variables) + 'c>>,
	meta: Option<Box<dyn FnOnce(&mut MetaProperties) + 'c>>,
	dedicated: Option<Expiration>,
}

impl Default for Compose<'_> {
	fn default() -> Self {
		Self {
			atomic: true,
			variables: None,
			meta: None,
			dedicated: None,
		}
	}
}

impl<'c> Compose<'c> {
	/// Creates an atomic boundary with no overrides.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets whether partial output is rolled back when time runs out.
	pub fn atomic(mut self, atomic: bool) -> Self {
		self.atomic = atomic;
		self
	}

	/// Overrides variables for this value and its children.
	pub fn variables(mut self, configure: impl FnOnce(&mut Variables) + 'c) -> Self {
		self.variables = Some(Box::new(configure));
		self
	}

	/// Overrides meta properties for this value and its children.
	pub fn meta(mut self, configure: impl FnOnce(&mut MetaProperties) + 'c) -> Self {
		self.meta = Some(Box::new(configure));
		self
	}

	/// Renders under a private deadline, pausing the current one.
	pub fn dedicated(mut self, expiration: Expiration) -> Self {
		self.dedicated = Some(expiration);
		self
	}
}

/// State of one top-level render.
pub struct StringifyContext<'e> {
	engine: &'e Engine,
	buffer: String,
	max_length: Option<usize>,
	full: bool,
	depth: usize,
	seen: FxHashMap<usize, usize>,
	variables: Arc<Variables>,
	meta: Arc<MetaProperties>,
	deadline: DeadlineClock,
	suspended: Vec<DeadlineClock>,
}

impl<'e> StringifyContext<'e> {
	pub(crate) fn new(engine: &'e Engine) -> Self {
		Self {
			engine,
			buffer: String::new(),
			max_length: engine.max_total_length.value(),
			full: engine.max_total_length.value() == Some(0),
			depth: 0,
			seen: FxHashMap::default(),
			variables: Arc::clone(&engine.variables),
			meta: Arc::clone(&engine.meta),
			deadline: DeadlineClock::start(engine.render_time),
			suspended: Vec::new(),
		}
	}

	/// Returns the variables in effect.
	#[inline]
	pub fn variables(&self) -> &Variables {
		&self.variables
	}

	/// Returns the meta properties in effect.
	#[inline]
	pub fn meta(&self) -> &MetaProperties {
		&self.meta
	}

	/// Returns the current depth.
	#[inline]
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Returns true once the total length budget is spent.
	#[inline]
	pub fn is_full(&self) -> bool {
		self.full
	}

	/// Returns the output written so far.
	#[inline]
	pub fn output(&self) -> &str {
		&self.buffer
	}

	pub(crate) fn finish(self) -> String {
		self.buffer
	}

	/// Appends text, truncating at the total length budget.
	pub fn append_str(&mut self, text: &str) {
		if self.full {
			return;
		}
		let Some(max) = self.max_length else {
			self.buffer.push_str(text);
			return;
		};
		let room = max.saturating_sub(self.buffer.len());
		if text.len() < room {
			self.buffer.push_str(text);
			return;
		}
		self.buffer.push_str(&text[..text.floor_char_boundary(room)]);
		self.full = true;
	}

	/// Appends one character.
	pub fn append_char(&mut self, ch: char) {
		self.append_str(ch.encode_utf8(&mut [0; 4]));
	}

	/// Appends formatted text.
	///
	/// A formatting implementation that reports an error fails the enclosing
	/// value with [`Interrupt::Failed`].
	pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Flow {
		if let Some(text) = args.as_str() {
			self.append_str(text);
			return Ok(());
		}
		let mut written = Ok(());
		self.append_with(|buffer| written = buffer.write_fmt(args));
		written.map_err(|_| Interrupt::failed("formatting implementation returned an error"))
	}

	/// Lets `write` mutate the buffer directly, then truncates any overflow.
	pub fn append_with(&mut self, write: impl FnOnce(&mut String)) {
		if self.full {
			return;
		}
		write(&mut self.buffer);
		if let Some(max) = self.max_length
			&& self.buffer.len() >= max
		{
			let cut = self.buffer.floor_char_boundary(max);
			self.buffer.truncate(cut);
			self.full = true;
		}
	}

	/// Saves the buffer position.
	pub fn mark(&self) -> Mark {
		Mark {
			len: self.buffer.len(),
			full: self.full,
		}
	}

	/// Drops everything written since `mark`.
	pub fn rollback(&mut self, mark: Mark) {
		self.buffer.truncate(mark.len);
		self.full = mark.full;
	}

	/// Renders `value` inside an atomic boundary.
	pub fn compose(&mut self, value: &dyn Inspect) -> Flow {
		self.compose_with(value, Compose::new())
	}

	/// Renders `value` inside a configured boundary.
	///
	/// Returns [`Interrupt::TimeExhausted`] without writing anything when the
	/// deadline has already expired, so the enclosing boundary handles it.
	/// Once inside, a time interrupt is absorbed here: atomic boundaries roll
	/// back their partial output, and both kinds write an ellipsis.
	pub fn compose_with(&mut self, value: &dyn Inspect, scope: Compose<'_>) -> Flow {
		let Compose {
			atomic,
			variables,
			meta,
			dedicated,
		} = scope;
		let suspended = self.suspended.len();
		if let Some(expiration) = dedicated {
			let mut parent = std::mem::replace(&mut self.deadline, DeadlineClock::start(expiration));
			parent.pause();
			self.suspended.push(parent);
		}
		let flow = if self.deadline.is_expired() {
			Err(Interrupt::TimeExhausted)
		} else {
			self.compose_scoped(value, atomic, variables, meta)
		};
		self.restore_deadline(suspended);
		flow
	}

	fn compose_scoped(
		&mut self,
		value: &dyn Inspect,
		atomic: bool,
		variables: Option<Box<dyn FnOnce(&mut Variables) + '_>>,
		meta: Option<Box<dyn FnOnce(&mut MetaProperties) + '_>>,
	) -> Flow {
		let saved_variables = variables.map(|configure| {
			let mut scoped = Variables::clone(&self.variables);
			configure(&mut scoped);
			std::mem::replace(&mut self.variables, Arc::new(scoped))
		});
		let saved_meta = meta.map(|configure| {
			let mut scoped = MetaProperties::clone(&self.meta);
			configure(&mut scoped);
			std::mem::replace(&mut self.meta, Arc::new(scoped))
		});

		let mark = self.mark();
		let flow = match self.compose_value(value, None) {
			Err(Interrupt::TimeExhausted) => {
				tracing::trace!(depth = self.depth, atomic, "stringify.time_exhausted");
				if atomic {
					self.rollback(mark);
				}
				self.append_str(glyph::ELLIPSIS);
				Ok(())
			}
			flow => flow,
		};

		if let Some(variables) = saved_variables {
			self.variables = variables;
		}
		if let Some(meta) = saved_meta {
			self.meta = meta;
		}
		flow
	}

	fn compose_value(&mut self, value: &dyn Inspect, identity: Option<usize>) -> Flow {
		let identity = identity.or_else(|| value.identity());
		match value.shape() {
			Shape::Proxy(inner) => self.compose_value(&*inner, identity),
			Shape::Null => {
				self.append_str(glyph::NULL);
				Ok(())
			}
			Shape::Faulted(error) => {
				tracing::trace!(ty = ?value.type_desc(), %error, "stringify.faulted");
				self.append_str(glyph::ERROR);
				Ok(())
			}
			Shape::Display(display) => self.invoke(|ctx| ctx.append_fmt(format_args!("{display}"))),
			shape => {
				let target = Target {
					value,
					shape,
					type_desc: value.type_desc(),
				};
				self.compose_resolved(target, identity)
			}
		}
	}

	fn compose_resolved(&mut self, target: Target<'_>, identity: Option<usize>) -> Flow {
		let type_desc = target.type_desc.clone();
		let engine = self.engine;
		let Ok(composable) = engine.chain.resolve(target) else {
			return self.append_type_name(&type_desc);
		};
		match self.enter(composable, &type_desc, identity) {
			Err(Interrupt::Cycle {
				type_desc,
				depth_delta,
			}) => {
				tracing::trace!(ty = ?type_desc, depth_delta, "stringify.cycle");
				self.append_type_name(&type_desc)?;
				self.append_char(glyph::CYCLE);
				self.append_fmt(format_args!("{depth_delta}"))
			}
			flow => flow,
		}
	}

	fn enter(
		&mut self,
		composable: Box<dyn Composable + '_>,
		type_desc: &TypeDesc,
		identity: Option<usize>,
	) -> Flow {
		let deep = composable.is_deep();
		let depth = self.depth + usize::from(deep);
		if deep && !self.variables.max_depth.admits(depth) {
			self.append_str(glyph::TOO_DEEP);
			return Ok(());
		}
		if let Some(first) = identity.and_then(|id| self.seen.get(&id).copied()) {
			return Err(Interrupt::Cycle {
				type_desc: type_desc.clone(),
				depth_delta: depth.saturating_sub(first),
			});
		}

		let previous = self.depth;
		self.depth = depth;
		if let Some(id) = identity {
			self.seen.insert(id, depth);
		}
		let flow = self.invoke(|ctx| composable.compose(ctx));
		if let Some(id) = identity {
			self.seen.remove(&id);
		}
		self.depth = previous;
		flow
	}

	/// Runs `body`, turning failures and panics into the error glyph.
	pub(crate) fn invoke(&mut self, body: impl FnOnce(&mut Self) -> Flow) -> Flow {
		let mark = self.mark();
		let depth = self.depth;
		let suspended = self.suspended.len();
		let variables = Arc::clone(&self.variables);
		let meta = Arc::clone(&self.meta);
		match panic::catch_unwind(AssertUnwindSafe(|| body(self))) {
			Ok(Err(Interrupt::Failed(message))) => {
				tracing::trace!(error = %message, "stringify.handler_failed");
				self.rollback(mark);
				self.append_str(glyph::ERROR);
				Ok(())
			}
			Ok(flow) => flow,
			Err(_) => {
				tracing::trace!(depth, "stringify.handler_panicked");
				self.depth = depth;
				self.seen.retain(|_, first| *first <= depth);
				self.restore_deadline(suspended);
				self.variables = variables;
				self.meta = meta;
				self.rollback(mark);
				self.append_str(glyph::ERROR);
				Ok(())
			}
		}
	}

	fn restore_deadline(&mut self, suspended: usize) {
		while self.suspended.len() > suspended {
			if let Some(mut parent) = self.suspended.pop() {
				parent.resume();
				self.deadline = parent;
			}
		}
	}

	/// Writes `items` separated by the member separator, bounded by `budget`.
	///
	/// An exhausted budget writes an ellipsis in place of the remaining items.
	/// An expired deadline propagates so the nearest atomic section rolls back
	/// as a whole. Other interrupts propagate too.
	pub fn append_items<I>(
		&mut self,
		budget: ItemBudget,
		items: I,
		mut each: impl FnMut(&mut Self, I::Item) -> Flow,
	) -> Flow
	where
		I: IntoIterator,
	{
		let variables = Arc::clone(&self.variables);
		let mut counter = AllottedCounter::new(variables.threshold(budget));
		for (index, item) in items.into_iter().enumerate() {
			if self.full {
				break;
			}
			if self.deadline.is_expired() {
				return Err(Interrupt::TimeExhausted);
			}
			if index > 0 {
				self.append_str(&variables.member_separator);
			}
			match allot(&mut counter).and_then(|()| each(self, item)) {
				Ok(()) => {}
				Err(Interrupt::CountExhausted) => {
					self.append_str(glyph::ELLIPSIS);
					break;
				}
				Err(interrupt) => return Err(interrupt),
			}
		}
		Ok(())
	}

	/// Writes `name:` followed by the rendered value.
	pub fn append_member(&mut self, name: &str, value: &dyn Inspect) -> Flow {
		self.append_str(name);
		self.append_char(':');
		self.compose(value)
	}

	/// Writes the name of `type_desc` under the dedicated type-name deadline.
	pub fn append_type_name(&mut self, type_desc: &TypeDesc) -> Flow {
		let expiration = self.engine.type_name_time;
		self.compose_with(type_desc, Compose::new().dedicated(expiration))
	}

	/// Writes the name of `type_desc` with scoped meta-property hints.
	pub fn append_type_name_hinted(
		&mut self,
		type_desc: &TypeDesc,
		hints: impl FnOnce(&mut MetaProperties),
	) -> Flow {
		let expiration = self.engine.type_name_time;
		self.compose_with(type_desc, Compose::new().dedicated(expiration).meta(hints))
	}
}

fn allot(counter: &mut AllottedCounter) -> Flow {
	if counter.try_take() {
		Ok(())
	} else {
		Err(Interrupt::CountExhausted)
	}
}
