use glimpse_reflect::{Shape, TypeDesc};

use crate::chain::{Composable, Stringifier, Target};
use crate::type_name::type_name;
use crate::{Flow, StringifyContext};

/// Type descriptors used as values render as their type name.
pub(crate) struct TypeInfoStringifier;

impl Stringifier for TypeInfoStringifier {
	fn id(&self) -> &str {
		"type_info"
	}

	fn resolve<'v>(&self, target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>> {
		match target.shape {
			Shape::Type(ty) => Ok(Box::new(TypeName(ty))),
			_ => Err(target),
		}
	}
}

struct TypeName<'v>(&'v TypeDesc);

impl Composable for TypeName<'_> {
	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		let name = type_name(self.0, ctx.variables(), ctx.meta());
		ctx.append_str(&name);
		Ok(())
	}
}
