use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use url::Url;
use uuid::Uuid;

use crate::{Inspect, Reflect, Shape, TypeDesc};

/// Opaque values whose handlers downcast to the concrete type.
macro_rules! opaque {
	($($ty:ty => $name:literal in $namespace:literal),* $(,)?) => {$(
		impl Reflect for $ty {
			fn reflect_type() -> TypeDesc {
				TypeDesc::interned::<$ty>(|| TypeDesc::of::<$ty>($name).namespace($namespace).build())
			}
		}

		impl Inspect for $ty {
			static_type_desc!();

			fn shape(&self) -> Shape<'_> {
				Shape::Object
			}
		}
	)*};
}

opaque! {
	Duration => "Duration" in "core::time",
	NaiveDate => "NaiveDate" in "chrono",
	NaiveDateTime => "NaiveDateTime" in "chrono",
	Uuid => "Uuid" in "uuid",
	Url => "Url" in "url",
	Regex => "Regex" in "regex",
}

impl Reflect for DateTime<Utc> {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<Self>(|| {
			let utc = TypeDesc::interned::<Utc>(|| TypeDesc::of::<Utc>("Utc").namespace("chrono").build());
			TypeDesc::of::<Self>("DateTime")
				.namespace("chrono")
				.generic([utc])
				.build()
		})
	}
}

impl Inspect for DateTime<Utc> {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Object
	}
}

impl Reflect for TypeDesc {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<TypeDesc>(|| {
			TypeDesc::of::<TypeDesc>("TypeDesc")
				.namespace("glimpse_reflect")
				.build()
		})
	}
}

impl Inspect for TypeDesc {
	static_type_desc!();

	fn shape(&self) -> Shape<'_> {
		Shape::Type(self)
	}
}
