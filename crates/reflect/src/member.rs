//! Member tables and declarative markers.
//!
//! Each [`TypeDesc`] carries a table of [`MemberDesc`]s: the fields and
//! computed properties memberwise rendering can show. A member knows its
//! declared type lazily (via [`Reflect`]) so self-referential types can
//! describe themselves, and reads go through a type-erased getter that
//! downcasts the owner.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::{Handle, Inspect, MemberError, Reflect, TypeDesc};

/// Whether a member is stored or computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
	/// Stored field.
	Field,
	/// Computed accessor.
	Property,
}

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
	/// Visible outside the declaring module.
	Public,
	/// Private to the declaring module.
	NonPublic,
}

/// Explicit include/exclude decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inclusion {
	/// Render it.
	Include,
	/// Never render it.
	Exclude,
}

/// Named member renderer with arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererRef {
	/// Registered renderer name.
	pub name: String,
	/// Arguments passed on every call.
	pub args: Vec<String>,
}

impl RendererRef {
	/// Creates a renderer reference.
	pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			name: name.into(),
			args: args.into_iter().map(Into::into).collect(),
		}
	}
}

/// Declarative markers placed on a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberMarker {
	/// Include or exclude override.
	pub inclusion: Option<Inclusion>,
	/// Display name override.
	pub name: Option<String>,
	/// Custom renderer.
	pub renderer: Option<RendererRef>,
	/// Sort key; higher renders first.
	pub order: Option<i32>,
}

/// Declarative marker placed on a type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TypeMarker {
	/// No marker.
	#[default]
	Unmarked,
	/// Render memberwise.
	Renderable,
	/// Never render memberwise.
	NotRenderable,
}

type Getter = Arc<dyn for<'a> Fn(&'a dyn Any) -> Result<Handle<'a>, MemberError> + Send + Sync>;

fn erase<F>(getter: F) -> Getter
where
	F: for<'a> Fn(&'a dyn Any) -> Result<Handle<'a>, MemberError> + Send + Sync + 'static,
{
	Arc::new(getter)
}

fn owner_of<T: 'static>(owner: &dyn Any) -> Result<&T, MemberError> {
	owner.downcast_ref::<T>().ok_or(MemberError::OwnerMismatch {
		expected: std::any::type_name::<T>(),
	})
}

/// One member of a type's member table.
#[derive(Clone)]
pub struct MemberDesc {
	name: Cow<'static, str>,
	kind: MemberKind,
	visibility: Visibility,
	declared: fn() -> TypeDesc,
	readable: bool,
	parameterized: bool,
	marker: MemberMarker,
	getter: Getter,
}

impl MemberDesc {
	/// Describes a public stored field of `T`.
	pub fn field<T, V>(
		name: impl Into<Cow<'static, str>>,
		get: impl Fn(&T) -> &V + Send + Sync + 'static,
	) -> Self
	where
		T: 'static,
		V: Inspect + Reflect,
	{
		let getter = erase(move |owner| Ok(Handle::Borrowed(get(owner_of::<T>(owner)?))));
		Self::new(name.into(), MemberKind::Field, V::reflect_type, getter)
	}

	/// Describes a public computed property of `T`.
	pub fn property<T, V>(
		name: impl Into<Cow<'static, str>>,
		get: impl Fn(&T) -> V + Send + Sync + 'static,
	) -> Self
	where
		T: 'static,
		V: Inspect + Reflect,
	{
		let getter = erase(move |owner| Ok(Handle::owned(get(owner_of::<T>(owner)?))));
		Self::new(name.into(), MemberKind::Property, V::reflect_type, getter)
	}

	/// Describes a public computed property of `T` whose getter can fail.
	pub fn try_property<T, V>(
		name: impl Into<Cow<'static, str>>,
		get: impl Fn(&T) -> Result<V, MemberError> + Send + Sync + 'static,
	) -> Self
	where
		T: 'static,
		V: Inspect + Reflect,
	{
		let getter = erase(move |owner| get(owner_of::<T>(owner)?).map(Handle::owned));
		Self::new(name.into(), MemberKind::Property, V::reflect_type, getter)
	}

	fn new(
		name: Cow<'static, str>,
		kind: MemberKind,
		declared: fn() -> TypeDesc,
		getter: Getter,
	) -> Self {
		Self {
			name,
			kind,
			visibility: Visibility::Public,
			declared,
			readable: true,
			parameterized: false,
			marker: MemberMarker::default(),
			getter,
		}
	}

	/// Marks the member non-public.
	pub fn private(mut self) -> Self {
		self.visibility = Visibility::NonPublic;
		self
	}

	/// Marks the member as always included.
	pub fn include(mut self) -> Self {
		self.marker.inclusion = Some(Inclusion::Include);
		self
	}

	/// Marks the member as never included.
	pub fn skip(mut self) -> Self {
		self.marker.inclusion = Some(Inclusion::Exclude);
		self
	}

	/// Overrides the display name.
	pub fn rename(mut self, name: impl Into<String>) -> Self {
		self.marker.name = Some(name.into());
		self
	}

	/// Sets the sort key; higher renders first.
	pub fn order(mut self, order: i32) -> Self {
		self.marker.order = Some(order);
		self
	}

	/// Renders the member with a registered renderer.
	pub fn with(
		mut self,
		renderer: impl Into<String>,
		args: impl IntoIterator<Item = impl Into<String>>,
	) -> Self {
		self.marker.renderer = Some(RendererRef::new(renderer, args));
		self
	}

	/// Marks the member as having no getter.
	pub fn write_only(mut self) -> Self {
		self.readable = false;
		self
	}

	/// Marks the member as an indexer that needs arguments to read.
	pub fn indexer(mut self) -> Self {
		self.parameterized = true;
		self
	}

	/// Returns the declared name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns whether the member is stored or computed.
	pub fn kind(&self) -> MemberKind {
		self.kind
	}

	/// Returns the member visibility.
	pub fn visibility(&self) -> Visibility {
		self.visibility
	}

	/// Returns the declared type of the member.
	pub fn declared(&self) -> TypeDesc {
		(self.declared)()
	}

	/// Returns whether the member has a getter.
	pub fn is_readable(&self) -> bool {
		self.readable
	}

	/// Returns whether reading needs arguments.
	pub fn is_parameterized(&self) -> bool {
		self.parameterized
	}

	/// Returns the declarative markers.
	pub fn marker(&self) -> &MemberMarker {
		&self.marker
	}

	/// Reads the member from `owner`.
	pub fn read<'a>(&self, owner: &'a dyn Inspect) -> Result<Handle<'a>, MemberError> {
		if !self.readable || self.parameterized {
			return Err(MemberError::Unreadable(self.name.to_string()));
		}
		(self.getter)(owner as &dyn Any)
	}
}

impl fmt::Debug for MemberDesc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemberDesc")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("visibility", &self.visibility)
			.field("readable", &self.readable)
			.field("parameterized", &self.parameterized)
			.field("marker", &self.marker)
			.finish_non_exhaustive()
	}
}
