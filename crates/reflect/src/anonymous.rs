use crate::{Handle, Inspect, Reflect, Shape, TypeDesc, TypeTraits};

/// Ad-hoc record of named values.
///
/// Every public property of an anonymous record renders unconditionally.
/// Build one with [`anonymous!`](crate::anonymous!):
///
/// ```
/// let record = glimpse_reflect::anonymous! { id: 7_u32, name: "ada" };
/// assert_eq!(record.len(), 2);
/// ```
#[derive(Default)]
pub struct Anonymous {
	fields: Vec<(&'static str, Box<dyn Inspect>)>,
}

impl Anonymous {
	/// Creates an empty record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a named value.
	pub fn field(mut self, name: &'static str, value: impl Inspect) -> Self {
		self.fields.push((name, Box::new(value)));
		self
	}

	/// Returns the number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns true when the record has no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl Reflect for Anonymous {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<Self>(|| {
			TypeDesc::of::<Self>("Anonymous")
				.namespace("glimpse_reflect")
				.traits(TypeTraits::ANONYMOUS)
				.build()
		})
	}
}

impl Inspect for Anonymous {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Anonymous(
			self.fields
				.iter()
				.map(|(name, value)| (*name, Handle::Borrowed(&**value)))
				.collect(),
		)
	}
}

/// Builds an [`Anonymous`] record from `name: value` pairs.
#[macro_export]
macro_rules! anonymous {
	($($name:ident : $value:expr),* $(,)?) => {
		$crate::Anonymous::new()$(.field(stringify!($name), $value))*
	};
}
