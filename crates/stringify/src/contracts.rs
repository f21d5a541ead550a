//! Programmatic per-type and per-member rendering contracts.
//!
//! Contracts take precedence over the declarative markers a type carries in
//! its descriptor. They are assembled once through [`ContractsBuilder`] and
//! never change afterwards; render plans built from them are cached.

use glimpse_reflect::{Inclusion, Reflect, RendererRef, TypeDesc, TypeKey};
use rustc_hash::FxHashMap;

/// Overrides for one member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberContract {
	/// Include or exclude override.
	pub inclusion: Option<Inclusion>,
	/// Output name override.
	pub name: Option<String>,
	/// Custom renderer override.
	pub renderer: Option<RendererRef>,
	/// Sort key override; higher renders first.
	pub order: Option<i32>,
}

impl MemberContract {
	/// Always renders the member.
	pub fn include(&mut self) -> &mut Self {
		self.inclusion = Some(Inclusion::Include);
		self
	}

	/// Never renders the member.
	pub fn exclude(&mut self) -> &mut Self {
		self.inclusion = Some(Inclusion::Exclude);
		self
	}

	/// Renders the member under another name.
	pub fn rename(&mut self, name: impl Into<String>) -> &mut Self {
		self.name = Some(name.into());
		self
	}

	/// Renders the member with a registered member renderer.
	pub fn with(
		&mut self,
		renderer: impl Into<String>,
		args: impl IntoIterator<Item = impl Into<String>>,
	) -> &mut Self {
		self.renderer = Some(RendererRef::new(renderer, args));
		self
	}

	/// Sets the sort key.
	pub fn order(&mut self, order: i32) -> &mut Self {
		self.order = Some(order);
		self
	}
}

/// Overrides for one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeContract {
	/// Render or forbid the type as a whole.
	pub inclusion: Option<Inclusion>,
	members: FxHashMap<String, MemberContract>,
}

impl TypeContract {
	/// Renders the type memberwise even when unmarked.
	pub fn include(&mut self) -> &mut Self {
		self.inclusion = Some(Inclusion::Include);
		self
	}

	/// Renders the type as its name and the forbidden glyph.
	pub fn exclude(&mut self) -> &mut Self {
		self.inclusion = Some(Inclusion::Exclude);
		self
	}

	/// Configures the member called `name`.
	pub fn member(&mut self, name: &str, configure: impl FnOnce(&mut MemberContract)) -> &mut Self {
		configure(self.members.entry(name.to_string()).or_default());
		self
	}

	/// Returns the contract of the member called `name`.
	pub fn get(&self, name: &str) -> Option<&MemberContract> {
		self.members.get(name)
	}
}

/// All registered contracts, keyed by type.
#[derive(Debug, Default)]
pub struct TypeContracts {
	types: FxHashMap<TypeKey, TypeContract>,
}

impl TypeContracts {
	/// Returns the contract registered for `ty` itself.
	pub fn get(&self, ty: &TypeDesc) -> Option<&TypeContract> {
		self.types.get(&ty.key())
	}

	/// Returns the nearest member contract for `name`, walking `ty` and its bases.
	pub fn member(&self, ty: &TypeDesc, name: &str) -> Option<&MemberContract> {
		ty.ancestors()
			.filter_map(|ty| self.get(ty))
			.find_map(|contract| contract.get(name))
	}

	/// Returns true when no contracts are registered.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}

/// Collects contracts before an engine is built.
#[derive(Debug, Default)]
pub struct ContractsBuilder {
	types: FxHashMap<TypeKey, TypeContract>,
}

impl ContractsBuilder {
	/// Configures the contract for `T`.
	pub fn contract<T: Reflect>(&mut self, configure: impl FnOnce(&mut TypeContract)) -> &mut Self {
		self.contract_for(&T::reflect_type(), configure)
	}

	/// Configures the contract for a descriptor.
	pub fn contract_for(
		&mut self,
		ty: &TypeDesc,
		configure: impl FnOnce(&mut TypeContract),
	) -> &mut Self {
		configure(self.types.entry(ty.key()).or_default());
		self
	}

	/// Freezes the collected contracts.
	pub fn build(self) -> TypeContracts {
		TypeContracts { types: self.types }
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_member_lookup_walks_bases() {
		let base = TypeDesc::synthetic("Base").build();
		let derived = TypeDesc::synthetic("Derived").base(base.clone()).build();

		let mut builder = ContractsBuilder::default();
		builder
			.contract_for(&base, |contract| {
				contract
					.member("id", |member| {
						member.rename("key");
					})
					.member("secret", |member| {
						member.exclude();
					});
			})
			.contract_for(&derived, |contract| {
				contract.member("id", |member| {
					member.order(5);
				});
			});
		let contracts = builder.build();

		assert_eq!(contracts.member(&derived, "id").and_then(|m| m.order), Some(5));
		assert_eq!(contracts.member(&derived, "id").and_then(|m| m.name.clone()), None);
		assert_eq!(
			contracts.member(&derived, "secret").and_then(|m| m.inclusion),
			Some(Inclusion::Exclude)
		);
		assert!(contracts.member(&base, "missing").is_none());
	}

	#[test]
	fn test_repeated_configuration_accumulates() {
		let mut builder = ContractsBuilder::default();
		builder.contract::<i32>(|contract| {
			contract.include();
		});
		builder.contract::<i32>(|contract| {
			contract.member("x", |member| {
				member.with("redact", ["***"]);
			});
		});
		let contracts = builder.build();
		let contract = contracts.get(&i32::reflect_type()).unwrap();
		assert_eq!(contract.inclusion, Some(Inclusion::Include));
		assert_eq!(
			contract.get("x").and_then(|m| m.renderer.clone()),
			Some(RendererRef::new("redact", ["***"]))
		);
	}
}
