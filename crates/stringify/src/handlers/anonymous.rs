use glimpse_reflect::{Handle, Shape};

use crate::chain::{Composable, Stringifier, Target};
use crate::variables::ItemBudget;
use crate::{Flow, StringifyContext};

/// Anonymous records render every field, bounded by their own budget.
pub(crate) struct AnonymousStringifier;

impl Stringifier for AnonymousStringifier {
	fn id(&self) -> &str {
		"anonymous"
	}

	fn resolve<'v>(&self, target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>> {
		match target.shape {
			Shape::Anonymous(fields) => Ok(Box::new(Record(fields))),
			_ => Err(target),
		}
	}
}

struct Record<'v>(Vec<(&'v str, Handle<'v>)>);

impl Composable for Record<'_> {
	fn is_deep(&self) -> bool {
		true
	}

	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		ctx.append_char('{');
		ctx.append_items(ItemBudget::Anonymous, self.0, |ctx, (name, value)| {
			ctx.append_member(name, &*value)
		})?;
		ctx.append_char('}');
		Ok(())
	}
}
