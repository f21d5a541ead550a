//! Engine assembly and the public render entry points.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use glimpse_primitives::{Expiration, Threshold};
use glimpse_reflect::{Inspect, Reflect, TypeDesc, TypeKey};
use rustc_hash::FxHashSet;

use crate::chain::{Stringifier, StringifierChain};
use crate::contracts::{ContractsBuilder, TypeContract};
use crate::handlers::{ForbiddenStringifier, MemberwiseStringifier, builtins};
use crate::renderer::{MemberRenderer, Renderers};
use crate::variables::{NamespacePolicy, Variables};
use crate::{
	Compose, ConfigError, Interrupt, MetaProperties, StringifyContext, StringifyOptions, glyph,
};

/// Immutable state shared by every render of one engine.
pub(crate) struct Engine {
	pub(crate) variables: Arc<Variables>,
	pub(crate) meta: Arc<MetaProperties>,
	pub(crate) max_total_length: Threshold,
	pub(crate) render_time: Expiration,
	pub(crate) type_name_time: Expiration,
	pub(crate) chain: StringifierChain,
}

impl Engine {
	fn render(&self, value: &dyn Inspect, scope: Compose<'_>) -> String {
		let mut ctx = StringifyContext::new(self);
		let start = ctx.mark();
		match panic::catch_unwind(AssertUnwindSafe(|| ctx.compose_with(value, scope))) {
			Ok(Ok(())) => {}
			Ok(Err(interrupt)) => {
				tracing::debug!(%interrupt, "stringify.render.interrupted");
				if matches!(interrupt, Interrupt::TimeExhausted) {
					ctx.append_str(glyph::ELLIPSIS);
				}
			}
			Err(_) => {
				tracing::debug!("stringify.render.panicked");
				ctx.rollback(start);
				ctx.append_str(glyph::ERROR);
			}
		}
		ctx.finish()
	}
}

/// A configured renderer. Cheap to clone and safe to share across threads.
///
/// ```
/// use glimpse_stringify::{Stringify, Threshold};
///
/// let engine = Stringify::builder()
///     .configure(|options| options.max_collection_items = Threshold::limit(2))
///     .build()
///     .unwrap();
/// assert_eq!(engine.render(&vec![1, 2, 3]), "Vec<i32>(3)[1, 2, …]");
/// ```
#[derive(Clone)]
pub struct Stringify(Arc<Engine>);

impl Stringify {
	/// Starts configuring an engine.
	pub fn builder() -> StringifyBuilder {
		StringifyBuilder::default()
	}

	/// Creates an engine from options with no custom registrations.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidPattern`] when a namespace pattern does
	/// not compile.
	pub fn new(options: StringifyOptions) -> Result<Self, ConfigError> {
		Self::builder().options(options).build()
	}

	/// Renders `value`.
	pub fn render(&self, value: &dyn Inspect) -> String {
		self.0.render(value, Compose::new().atomic(false))
	}

	/// Renders `value` with variables overridden for this render only.
	pub fn render_with(&self, value: &dyn Inspect, configure: impl FnOnce(&mut Variables)) -> String {
		self.0
			.render(value, Compose::new().atomic(false).variables(configure))
	}

	/// Renders the name of a type.
	pub fn render_type(&self, ty: &TypeDesc) -> String {
		self.render(ty)
	}

	#[cfg(test)]
	pub(crate) fn engine(&self) -> &Engine {
		&self.0
	}
}

impl Default for Stringify {
	fn default() -> Self {
		let builder = StringifyBuilder::default();
		let namespaces = NamespacePolicy::default();
		builder.assemble(namespaces)
	}
}

impl fmt::Debug for Stringify {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Stringify")
			.field("stringifiers", &self.0.chain.describe())
			.field("max_total_length", &self.0.max_total_length)
			.field("render_time", &self.0.render_time)
			.finish_non_exhaustive()
	}
}

/// Builder for [`Stringify`].
#[derive(Default)]
pub struct StringifyBuilder {
	options: StringifyOptions,
	stringifiers: Vec<(Arc<dyn Stringifier>, i16)>,
	contracts: ContractsBuilder,
	renderers: Vec<(String, Arc<dyn MemberRenderer>)>,
	forbidden: FxHashSet<TypeKey>,
}

impl StringifyBuilder {
	/// Replaces the options.
	pub fn options(mut self, options: StringifyOptions) -> Self {
		self.options = options;
		self
	}

	/// Edits the options in place.
	pub fn configure(mut self, configure: impl FnOnce(&mut StringifyOptions)) -> Self {
		configure(&mut self.options);
		self
	}

	/// Registers a custom stringifier.
	///
	/// The priority is clamped so built-in forbidden checks always run first
	/// and the memberwise fallback always runs last.
	pub fn stringifier(mut self, stringifier: impl Stringifier, priority: i16) -> Self {
		self.stringifiers.push((Arc::new(stringifier), priority));
		self
	}

	/// Configures the contract of `T`.
	pub fn contract<T: Reflect>(mut self, configure: impl FnOnce(&mut TypeContract)) -> Self {
		self.contracts.contract::<T>(configure);
		self
	}

	/// Configures the contract of a descriptor.
	pub fn contract_for(mut self, ty: &TypeDesc, configure: impl FnOnce(&mut TypeContract)) -> Self {
		self.contracts.contract_for(ty, configure);
		self
	}

	/// Registers a member renderer referenced by contracts and markers.
	pub fn member_renderer(mut self, name: impl Into<String>, renderer: impl MemberRenderer) -> Self {
		self.renderers.push((name.into(), Arc::new(renderer)));
		self
	}

	/// Never traverses values of `T`.
	pub fn forbid<T: Reflect>(mut self) -> Self {
		self.forbidden.insert(T::reflect_type().key());
		self
	}

	/// Validates the configuration and builds the engine.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::EmptyStringifierId`] or
	/// [`ConfigError::EmptyRendererName`] for unnamed registrations, and
	/// [`ConfigError::InvalidPattern`] for namespace patterns that do not
	/// compile.
	pub fn build(self) -> Result<Stringify, ConfigError> {
		if self.stringifiers.iter().any(|(s, _)| s.id().is_empty()) {
			return Err(ConfigError::EmptyStringifierId);
		}
		if self.renderers.iter().any(|(name, _)| name.is_empty()) {
			return Err(ConfigError::EmptyRendererName);
		}
		let namespaces = self.options.namespace_policy()?;
		Ok(self.assemble(namespaces))
	}

	fn assemble(self, namespaces: NamespacePolicy) -> Stringify {
		let Self {
			options,
			stringifiers,
			contracts,
			renderers: custom_renderers,
			forbidden,
		} = self;

		let mut renderers = Renderers::new();
		for (name, renderer) in custom_renderers {
			renderers.insert(name, renderer);
		}
		let forbidden = Arc::new(ForbiddenStringifier::new(forbidden));
		let memberwise = MemberwiseStringifier::new(
			Arc::new(contracts.build()),
			Arc::clone(&forbidden),
			Arc::new(renderers),
			options.render_unknown_types,
		);
		let chain = StringifierChain::build(builtins(forbidden, memberwise), stringifiers);

		Stringify(Arc::new(Engine {
			variables: Arc::new(Variables::from_options(&options, namespaces)),
			meta: Arc::new(MetaProperties::new(options.meta_key_comparison)),
			max_total_length: options.max_total_length,
			render_time: options.render_time(),
			type_name_time: options.type_name_time(),
			chain,
		}))
	}
}
