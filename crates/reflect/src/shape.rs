//! Runtime value shapes.

use std::fmt;

use smallvec::SmallVec;

use crate::{Handle, Inspect, InspectError, TypeDesc};

/// What a value looks like at runtime.
pub enum Shape<'a> {
	/// Absent value.
	Null,
	/// Text.
	Str(&'a str),
	/// Boolean.
	Bool(bool),
	/// Character.
	Char(char),
	/// Single byte.
	Byte(u8),
	/// Signed integer, widened.
	Int(i128),
	/// Unsigned integer, widened.
	UInt(u128),
	/// Single-precision float.
	F32(f32),
	/// Double-precision float.
	F64(f64),
	/// Enumeration value.
	Enum(EnumValue),
	/// Positional items.
	Tuple(Vec<Handle<'a>>),
	/// Key-value pair.
	KeyValue(Handle<'a>, Handle<'a>),
	/// Iterable items.
	Sequence(Items<'a>),
	/// Keyed entries.
	Map(Entries<'a>),
	/// Ad-hoc record of named values.
	Anonymous(Vec<(&'a str, Handle<'a>)>),
	/// Callable with a signature.
	Callable(Signature),
	/// A type descriptor used as a value.
	Type(&'a TypeDesc),
	/// Transparent wrapper around another value.
	Proxy(Handle<'a>),
	/// The value could not be inspected.
	Faulted(InspectError),
	/// Value that renders itself through `Display`.
	Display(&'a dyn fmt::Display),
	/// Opaque object, described by its type's member table.
	Object,
}

impl Shape<'_> {
	/// Returns a short label for diagnostics.
	pub fn label(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Str(_) => "str",
			Self::Bool(_) => "bool",
			Self::Char(_) => "char",
			Self::Byte(_) => "byte",
			Self::Int(_) => "int",
			Self::UInt(_) => "uint",
			Self::F32(_) => "f32",
			Self::F64(_) => "f64",
			Self::Enum(_) => "enum",
			Self::Tuple(_) => "tuple",
			Self::KeyValue(..) => "key_value",
			Self::Sequence(_) => "sequence",
			Self::Map(_) => "map",
			Self::Anonymous(_) => "anonymous",
			Self::Callable(_) => "callable",
			Self::Type(_) => "type",
			Self::Proxy(_) => "proxy",
			Self::Faulted(_) => "faulted",
			Self::Display(_) => "display",
			Self::Object => "object",
		}
	}
}

/// Known size of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extent {
	/// Size unknown until iterated.
	Unknown,
	/// Flat count.
	Count(usize),
	/// Array dimensions, outermost first.
	Dimensions(SmallVec<[usize; 2]>),
}

impl Extent {
	/// Returns the total element count, if known.
	pub fn count(&self) -> Option<usize> {
		match self {
			Self::Unknown => None,
			Self::Count(n) => Some(*n),
			Self::Dimensions(dims) => Some(dims.iter().product()),
		}
	}
}

/// Items of a sequence.
pub struct Items<'a> {
	/// Item source; an `Err` stops rendering of the remaining items.
	pub iter: Box<dyn Iterator<Item = Result<Handle<'a>, InspectError>> + 'a>,
	/// Known size.
	pub extent: Extent,
	/// Declared element type, if any.
	pub element: Option<TypeDesc>,
}

impl<'a> Items<'a> {
	/// Wraps a fallible item source.
	pub fn new(
		iter: impl Iterator<Item = Result<Handle<'a>, InspectError>> + 'a,
		extent: Extent,
	) -> Self {
		Self {
			iter: Box::new(iter),
			extent,
			element: None,
		}
	}

	/// Wraps borrowed items of a collection with a known length.
	pub fn borrowed<T: Inspect>(iter: impl Iterator<Item = &'a T> + 'a, extent: Extent) -> Self {
		Self::new(iter.map(|item| Ok(Handle::Borrowed(item))), extent)
	}

	/// Sets the declared element type.
	pub fn element(mut self, element: TypeDesc) -> Self {
		self.element = Some(element);
		self
	}
}

/// Entries of a map.
pub struct Entries<'a> {
	/// Entry source.
	pub iter: Box<dyn Iterator<Item = Result<(Handle<'a>, Handle<'a>), InspectError>> + 'a>,
	/// Number of entries, if known.
	pub len: Option<usize>,
}

impl<'a> Entries<'a> {
	/// Wraps borrowed entries of a map with a known length.
	pub fn borrowed<K: Inspect, V: Inspect>(
		iter: impl Iterator<Item = (&'a K, &'a V)> + 'a,
		len: usize,
	) -> Self {
		Self {
			iter: Box::new(iter.map(|(k, v)| Ok((Handle::Borrowed(k), Handle::Borrowed(v))))),
			len: Some(len),
		}
	}
}

/// Static description of an enumeration.
#[derive(Debug)]
pub struct EnumDesc {
	/// Values combine as bit flags.
	pub flags: bool,
	/// Declared variants and their numeric values, in declaration order.
	pub variants: &'static [(&'static str, u64)],
}

/// Enumeration value.
#[derive(Debug, Clone, Copy)]
pub struct EnumValue {
	/// Enumeration description.
	pub desc: &'static EnumDesc,
	/// Numeric value.
	pub bits: u64,
}

impl EnumValue {
	/// Returns the name of the variant with exactly this value.
	pub fn name(&self) -> Option<&'static str> {
		self.desc
			.variants
			.iter()
			.find(|(_, bits)| *bits == self.bits)
			.map(|(name, _)| *name)
	}
}

/// Parameter and return types of a callable.
#[derive(Debug, Clone)]
pub struct Signature {
	/// Parameter types.
	pub params: Vec<TypeDesc>,
	/// Return type.
	pub ret: TypeDesc,
}
