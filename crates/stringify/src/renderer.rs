//! Named member renderers referenced by contracts and markers.

use std::sync::Arc;

use glimpse_reflect::Inspect;
use rustc_hash::FxHashMap;

use crate::{Flow, StringifyContext};

/// Writes one member value in place of the normal chain.
pub trait MemberRenderer: Send + Sync + 'static {
	/// Writes `value` using the arguments from the member's contract or marker.
	fn render(&self, value: &dyn Inspect, args: &[String], ctx: &mut StringifyContext<'_>) -> Flow;
}

impl<F> MemberRenderer for F
where
	F: Fn(&dyn Inspect, &[String], &mut StringifyContext<'_>) -> Flow + Send + Sync + 'static,
{
	fn render(&self, value: &dyn Inspect, args: &[String], ctx: &mut StringifyContext<'_>) -> Flow {
		self(value, args, ctx)
	}
}

/// Writes its first argument, or `***`, instead of the value.
struct Redact;

impl MemberRenderer for Redact {
	fn render(&self, _value: &dyn Inspect, args: &[String], ctx: &mut StringifyContext<'_>) -> Flow {
		ctx.append_str(args.first().map_or("***", String::as_str));
		Ok(())
	}
}

/// Writes the runtime type name of the value.
struct TypeOnly;

impl MemberRenderer for TypeOnly {
	fn render(&self, value: &dyn Inspect, _args: &[String], ctx: &mut StringifyContext<'_>) -> Flow {
		ctx.append_type_name(&value.type_desc())
	}
}

/// Renderers by name.
#[derive(Clone)]
pub(crate) struct Renderers {
	by_name: FxHashMap<String, Arc<dyn MemberRenderer>>,
}

impl Renderers {
	/// Creates the table with the built-in `redact` and `type` renderers.
	pub(crate) fn new() -> Self {
		let mut by_name: FxHashMap<String, Arc<dyn MemberRenderer>> = FxHashMap::default();
		by_name.insert("redact".to_string(), Arc::new(Redact));
		by_name.insert("type".to_string(), Arc::new(TypeOnly));
		Self { by_name }
	}

	pub(crate) fn insert(&mut self, name: String, renderer: Arc<dyn MemberRenderer>) {
		self.by_name.insert(name, renderer);
	}

	pub(crate) fn get(&self, name: &str) -> Option<&Arc<dyn MemberRenderer>> {
		self.by_name.get(name)
	}
}
