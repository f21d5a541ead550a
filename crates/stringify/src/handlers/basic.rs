use std::any::Any;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use glimpse_reflect::{Handle, Inspect, Shape, Signature, TypeDesc};
use regex::Regex;
use url::Url;
use uuid::Uuid;

use crate::chain::{Composable, Stringifier, Target};
use crate::variables::ItemBudget;
use crate::{Flow, StringifyContext, glyph};

/// Tuples, key-value pairs, callables, and well-known value objects.
pub(crate) struct BasicStringifier;

impl Stringifier for BasicStringifier {
	fn id(&self) -> &str {
		"basic"
	}

	fn resolve<'v>(&self, target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>> {
		match target.shape {
			Shape::Tuple(items) => Ok(Box::new(TupleValue(items))),
			Shape::KeyValue(key, value) => Ok(Box::new(KeyValue {
				type_desc: target.type_desc,
				key,
				value,
			})),
			Shape::Callable(signature) => Ok(Box::new(Callable(signature))),
			Shape::Object => match known_text(target.value) {
				Some(text) => Ok(Box::new(Text(text))),
				None => Err(target),
			},
			_ => Err(target),
		}
	}
}

fn known_text(value: &dyn Inspect) -> Option<String> {
	let any = value as &dyn Any;
	if let Some(duration) = any.downcast_ref::<Duration>() {
		Some(format!("{duration:?}"))
	} else if let Some(instant) = any.downcast_ref::<DateTime<Utc>>() {
		Some(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
	} else if let Some(date) = any.downcast_ref::<NaiveDate>() {
		Some(date.to_string())
	} else if let Some(instant) = any.downcast_ref::<NaiveDateTime>() {
		Some(instant.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
	} else if let Some(id) = any.downcast_ref::<Uuid>() {
		Some(id.hyphenated().to_string())
	} else if let Some(url) = any.downcast_ref::<Url>() {
		Some(url.as_str().to_string())
	} else {
		any.downcast_ref::<Regex>().map(|re| re.as_str().to_string())
	}
}

struct Text(String);

impl Composable for Text {
	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		ctx.append_str(&self.0);
		Ok(())
	}
}

struct TupleValue<'v>(Vec<Handle<'v>>);

impl Composable for TupleValue<'_> {
	fn is_deep(&self) -> bool {
		true
	}

	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		ctx.append_char('(');
		ctx.append_items(ItemBudget::Tuple, self.0, |ctx, item| ctx.compose(&*item))?;
		ctx.append_char(')');
		Ok(())
	}
}

struct KeyValue<'v> {
	type_desc: TypeDesc,
	key: Handle<'v>,
	value: Handle<'v>,
}

impl Composable for KeyValue<'_> {
	fn is_deep(&self) -> bool {
		true
	}

	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		ctx.append_type_name(&self.type_desc)?;
		ctx.append_char('{');
		ctx.compose(&*self.key)?;
		ctx.append_char(':');
		ctx.compose(&*self.value)?;
		ctx.append_char('}');
		Ok(())
	}
}

struct Callable(Signature);

impl Composable for Callable {
	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		let Signature { params, ret } = self.0;
		ctx.append_str(glyph::LAMBDA);
		ctx.append_char('(');
		ctx.append_items(ItemBudget::Parameters, params, |ctx, param| {
			ctx.append_type_name(&param)
		})?;
		ctx.append_str(") -> ");
		ctx.append_type_name(&ret)
	}
}
