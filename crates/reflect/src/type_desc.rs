//! Runtime type descriptors.
//!
//! A [`TypeDesc`] is the runtime stand-in for a type: its name and namespace,
//! its structural kind (array, nullable, tuple, generic instantiation, ...),
//! the types enclosing it and deriving it, declarative markers, and the
//! member table used by memberwise rendering.
//!
//! Descriptors are cheap to clone and compare by [`TypeKey`]. Descriptors of
//! Rust types are interned per [`TypeId`] so generic instantiations are built
//! once per process.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use bitflags::bitflags;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{MemberDesc, TypeMarker};

bitflags! {
	/// Structural traits of a type, consulted by handlers that never look
	/// inside values of certain kinds.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct TypeTraits: u16 {
		/// Stateful cursor over items (an iterator, enumerator).
		const ITERATOR = 1 << 0;
		/// Can be iterated repeatedly without consuming it.
		const ITERABLE = 1 << 1;
		/// Pending computation or async state machine.
		const FUTURE = 1 << 2;
		/// Thread handle.
		const THREAD = 1 << 3;
		/// Cancellation primitive.
		const CANCELLATION = 1 << 4;
		/// Task-completion handle or channel endpoint.
		const COMPLETION = 1 << 5;
		/// Compiler-synthesized (or ad-hoc) anonymous record.
		const ANONYMOUS = 1 << 6;
		/// Key-value pair.
		const KEY_VALUE = 1 << 7;
		/// Map keyed by its items' keys.
		const MAP = 1 << 8;
		/// Enumeration.
		const ENUM = 1 << 9;
		/// Callable (function pointer, closure signature).
		const CALLABLE = 1 << 10;
	}
}

/// Identity of a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKey {
	/// Descriptor of a Rust type.
	Rust(TypeId),
	/// Descriptor assembled by hand, unique per construction.
	Synthetic(u64),
}

/// Structural kind of a type.
#[derive(Debug, Clone)]
pub enum TypeKind {
	/// Plain named type.
	Named,
	/// Array of `element` with `rank` dimensions.
	Array {
		/// Element type.
		element: TypeDesc,
		/// Number of dimensions.
		rank: usize,
	},
	/// Raw pointer to a type.
	Pointer(TypeDesc),
	/// Reference to a type.
	Reference(TypeDesc),
	/// Unbound generic parameter such as `T`.
	GenericParam,
	/// Nullable wrapper around a type.
	Nullable(TypeDesc),
	/// Tuple of item types.
	Tuple(Vec<TypeDesc>),
	/// Generic instantiation with type arguments.
	Generic(Vec<TypeDesc>),
	/// Unbound generic definition with `arity` parameters.
	GenericDefinition {
		/// Number of generic parameters.
		arity: usize,
	},
}

struct TypeInfo {
	key: TypeKey,
	name: Cow<'static, str>,
	namespace: Option<Cow<'static, str>>,
	alias: Option<&'static str>,
	kind: TypeKind,
	enclosing: Option<TypeDesc>,
	base: Option<TypeDesc>,
	traits: TypeTraits,
	marker: TypeMarker,
	members: Vec<MemberDesc>,
}

/// Cheap-clone runtime type descriptor.
#[derive(Clone)]
pub struct TypeDesc(Arc<TypeInfo>);

static NEXT_SYNTHETIC: AtomicU64 = AtomicU64::new(1);

static INTERNED: LazyLock<RwLock<FxHashMap<TypeId, TypeDesc>>> = LazyLock::new(Default::default);

impl TypeDesc {
	/// Starts a descriptor for the Rust type `T`.
	pub fn of<T: ?Sized + 'static>(name: impl Into<Cow<'static, str>>) -> TypeBuilder {
		TypeBuilder::new(TypeKey::Rust(TypeId::of::<T>()), name.into())
	}

	/// Starts a hand-assembled descriptor with a fresh, unique key.
	pub fn synthetic(name: impl Into<Cow<'static, str>>) -> TypeBuilder {
		let id = NEXT_SYNTHETIC.fetch_add(1, Ordering::Relaxed);
		TypeBuilder::new(TypeKey::Synthetic(id), name.into())
	}

	/// Creates an unbound generic parameter such as `T`.
	pub fn generic_param(name: impl Into<Cow<'static, str>>) -> Self {
		Self::synthetic(name).kind(TypeKind::GenericParam).build()
	}

	/// Returns the interned descriptor of `T`, building it with `init` on first use.
	///
	/// `init` runs outside the lock because descriptors of generic types intern
	/// their arguments; a racing builder may run twice, the first insert wins.
	pub fn interned<T: ?Sized + 'static>(init: impl FnOnce() -> TypeDesc) -> TypeDesc {
		let id = TypeId::of::<T>();
		if let Some(desc) = INTERNED.read().get(&id) {
			return desc.clone();
		}
		let built = init();
		INTERNED.write().entry(id).or_insert(built).clone()
	}

	/// Returns the identity of this descriptor.
	#[inline]
	pub fn key(&self) -> TypeKey {
		self.0.key
	}

	/// Returns the simple name, without namespace or generic arguments.
	#[inline]
	pub fn name(&self) -> &str {
		&self.0.name
	}

	/// Returns the namespace (module path), if any.
	#[inline]
	pub fn namespace(&self) -> Option<&str> {
		self.0.namespace.as_deref()
	}

	/// Returns the short alias of a well-known type, if any.
	#[inline]
	pub fn alias(&self) -> Option<&'static str> {
		self.0.alias
	}

	/// Returns the structural kind.
	#[inline]
	pub fn kind(&self) -> &TypeKind {
		&self.0.kind
	}

	/// Returns the type this one is declared inside, if any.
	#[inline]
	pub fn enclosing(&self) -> Option<&TypeDesc> {
		self.0.enclosing.as_ref()
	}

	/// Returns the type this one derives from, if any.
	#[inline]
	pub fn base(&self) -> Option<&TypeDesc> {
		self.0.base.as_ref()
	}

	/// Returns the structural traits.
	#[inline]
	pub fn traits(&self) -> TypeTraits {
		self.0.traits
	}

	/// Returns the declarative marker placed on the type.
	#[inline]
	pub fn marker(&self) -> TypeMarker {
		self.0.marker
	}

	/// Returns the members declared directly on this type.
	#[inline]
	pub fn members(&self) -> &[MemberDesc] {
		&self.0.members
	}

	/// Returns this type followed by its base types, nearest first.
	pub fn ancestors(&self) -> impl Iterator<Item = &TypeDesc> {
		std::iter::successors(Some(self), |ty| ty.base())
	}

	/// Returns the types enclosing this one, innermost first.
	pub fn enclosing_chain(&self) -> impl Iterator<Item = &TypeDesc> {
		std::iter::successors(self.enclosing(), |ty| ty.enclosing())
	}

	/// Returns `namespace::name`, or just the name without a namespace.
	pub fn full_name(&self) -> Cow<'_, str> {
		match self.namespace() {
			Some(namespace) => Cow::Owned(format!("{namespace}::{}", self.name())),
			None => Cow::Borrowed(self.name()),
		}
	}
}

impl PartialEq for TypeDesc {
	fn eq(&self, other: &Self) -> bool {
		self.0.key == other.0.key
	}
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.key.hash(state);
	}
}

impl fmt::Debug for TypeDesc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("TypeDesc").field(&self.full_name()).finish()
	}
}

/// Builder for [`TypeDesc`].
pub struct TypeBuilder {
	info: TypeInfo,
}

impl TypeBuilder {
	fn new(key: TypeKey, name: Cow<'static, str>) -> Self {
		Self {
			info: TypeInfo {
				key,
				name,
				namespace: None,
				alias: None,
				kind: TypeKind::Named,
				enclosing: None,
				base: None,
				traits: TypeTraits::empty(),
				marker: TypeMarker::Unmarked,
				members: Vec::new(),
			},
		}
	}

	/// Sets the namespace (module path).
	pub fn namespace(mut self, namespace: impl Into<Cow<'static, str>>) -> Self {
		self.info.namespace = Some(namespace.into());
		self
	}

	/// Sets the short alias used for well-known types.
	pub fn alias(mut self, alias: &'static str) -> Self {
		self.info.alias = Some(alias);
		self
	}

	/// Sets the structural kind.
	pub fn kind(mut self, kind: TypeKind) -> Self {
		self.info.kind = kind;
		self
	}

	/// Sets the generic arguments, making this a generic instantiation.
	pub fn generic(self, args: impl IntoIterator<Item = TypeDesc>) -> Self {
		self.kind(TypeKind::Generic(args.into_iter().collect()))
	}

	/// Sets the enclosing type.
	pub fn enclosing(mut self, enclosing: TypeDesc) -> Self {
		self.info.enclosing = Some(enclosing);
		self
	}

	/// Sets the base type.
	pub fn base(mut self, base: TypeDesc) -> Self {
		self.info.base = Some(base);
		self
	}

	/// Adds structural traits.
	pub fn traits(mut self, traits: TypeTraits) -> Self {
		self.info.traits |= traits;
		self
	}

	/// Sets the declarative type marker.
	pub fn marker(mut self, marker: TypeMarker) -> Self {
		self.info.marker = marker;
		self
	}

	/// Appends a member to the member table.
	pub fn member(mut self, member: MemberDesc) -> Self {
		self.info.members.push(member);
		self
	}

	/// Appends members to the member table.
	pub fn members(mut self, members: impl IntoIterator<Item = MemberDesc>) -> Self {
		self.info.members.extend(members);
		self
	}

	/// Finishes the descriptor.
	pub fn build(self) -> TypeDesc {
		TypeDesc(Arc::new(self.info))
	}
}
