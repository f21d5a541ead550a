//! Memberwise fallback.
//!
//! Renders any object as `Type{name:value, ..}` from its descriptor's member
//! table. Two per-type results are cached for the life of the engine:
//! - the decision whether the type is rendered, forbidden, or skipped
//! - the render plan: eligible members in output order with resolved names
//!   and renderers
//!
//! Contracts win over declarative markers, and markers win over convention.

use std::sync::Arc;

use glimpse_reflect::{
	Inclusion, Inspect, MemberDesc, MemberKind, RendererRef, Shape, TypeDesc, TypeKey, TypeMarker,
	Visibility,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{ForbiddenStringifier, ForbiddenValue};
use crate::chain::{Composable, Stringifier, Target};
use crate::contracts::TypeContracts;
use crate::renderer::Renderers;
use crate::variables::ItemBudget;
use crate::{Flow, Interrupt, StringifyContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
	Render,
	Forbid,
	Skip,
}

/// One member in a render plan.
struct RenderStep {
	member: MemberDesc,
	name: String,
	renderer: Option<RendererRef>,
	order: i32,
}

pub(crate) struct MemberwiseStringifier {
	contracts: Arc<TypeContracts>,
	forbidden: Arc<ForbiddenStringifier>,
	renderers: Arc<Renderers>,
	render_unknown: bool,
	decisions: RwLock<FxHashMap<TypeKey, Decision>>,
	plans: RwLock<FxHashMap<TypeKey, Arc<[RenderStep]>>>,
}

impl MemberwiseStringifier {
	pub(crate) fn new(
		contracts: Arc<TypeContracts>,
		forbidden: Arc<ForbiddenStringifier>,
		renderers: Arc<Renderers>,
		render_unknown: bool,
	) -> Self {
		Self {
			contracts,
			forbidden,
			renderers,
			render_unknown,
			decisions: RwLock::new(FxHashMap::default()),
			plans: RwLock::new(FxHashMap::default()),
		}
	}

	fn decision(&self, ty: &TypeDesc) -> Decision {
		let key = ty.key();
		if let Some(&decision) = self.decisions.read().get(&key) {
			return decision;
		}
		let decision = self.decide(ty);
		tracing::debug!(ty = ?ty, ?decision, "stringify.memberwise.decision");
		*self.decisions.write().entry(key).or_insert(decision)
	}

	/// Walks the type, its bases, then its enclosing types; the first contract
	/// or marker found decides.
	fn decide(&self, ty: &TypeDesc) -> Decision {
		for ty in ty.ancestors().chain(ty.enclosing_chain()) {
			match self.contracts.get(ty).and_then(|contract| contract.inclusion) {
				Some(Inclusion::Include) => return Decision::Render,
				Some(Inclusion::Exclude) => return Decision::Forbid,
				None => {}
			}
			match ty.marker() {
				TypeMarker::Renderable => return Decision::Render,
				TypeMarker::NotRenderable => return Decision::Skip,
				TypeMarker::Unmarked => {}
			}
		}
		if self.render_unknown {
			Decision::Render
		} else {
			Decision::Skip
		}
	}

	fn plan(&self, ty: &TypeDesc) -> Arc<[RenderStep]> {
		let key = ty.key();
		if let Some(plan) = self.plans.read().get(&key) {
			return Arc::clone(plan);
		}
		let plan = self.build_plan(ty);
		tracing::debug!(ty = ?ty, members = plan.len(), "stringify.memberwise.plan");
		Arc::clone(self.plans.write().entry(key).or_insert(plan))
	}

	fn build_plan(&self, ty: &TypeDesc) -> Arc<[RenderStep]> {
		let fields = ty.members().iter().filter(|m| m.kind() == MemberKind::Field);
		let properties = ty.members().iter().filter(|m| m.kind() == MemberKind::Property);
		let mut steps: Vec<RenderStep> = fields
			.chain(properties)
			.filter(|member| self.is_eligible(member))
			.filter_map(|member| self.step(ty, member))
			.collect();
		steps.sort_by(|a, b| b.order.cmp(&a.order));
		steps.into()
	}

	fn is_eligible(&self, member: &MemberDesc) -> bool {
		member.is_readable()
			&& !member.is_parameterized()
			&& !self.forbidden.is_forbidden(&member.declared())
	}

	fn step(&self, ty: &TypeDesc, member: &MemberDesc) -> Option<RenderStep> {
		let contract = self.contracts.member(ty, member.name());
		let marker = member.marker();
		let inclusion = contract.and_then(|c| c.inclusion).or(marker.inclusion);
		let included = match inclusion {
			Some(Inclusion::Include) => true,
			Some(Inclusion::Exclude) => false,
			None => member.visibility() == Visibility::Public,
		};
		if !included {
			return None;
		}
		let name = contract
			.and_then(|c| c.name.clone())
			.or_else(|| marker.name.clone())
			.unwrap_or_else(|| member.name().to_string());
		let renderer = contract
			.and_then(|c| c.renderer.clone())
			.or_else(|| marker.renderer.clone());
		let order = contract.and_then(|c| c.order).or(marker.order).unwrap_or(0);
		Some(RenderStep {
			member: member.clone(),
			name,
			renderer,
			order,
		})
	}
}

impl Stringifier for MemberwiseStringifier {
	fn id(&self) -> &str {
		"memberwise"
	}

	fn resolve<'v>(&self, target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>> {
		if !matches!(target.shape, Shape::Object) {
			return Err(target);
		}
		match self.decision(&target.type_desc) {
			Decision::Skip => Err(target),
			Decision::Forbid => Ok(Box::new(ForbiddenValue(target.type_desc))),
			Decision::Render => {
				let steps = self.plan(&target.type_desc);
				Ok(Box::new(Members {
					value: target.value,
					type_desc: target.type_desc,
					steps,
					renderers: Arc::clone(&self.renderers),
				}))
			}
		}
	}
}

struct Members<'v> {
	value: &'v dyn Inspect,
	type_desc: TypeDesc,
	steps: Arc<[RenderStep]>,
	renderers: Arc<Renderers>,
}

impl Members<'_> {
	/// Writes `name:value`; a failing getter or renderer writes the error
	/// glyph for this member only.
	fn render_step(&self, ctx: &mut StringifyContext<'_>, step: &RenderStep) -> Flow {
		ctx.append_str(&step.name);
		ctx.append_char(':');
		ctx.invoke(|ctx| {
			let value = step.member.read(self.value).inspect_err(|error| {
				tracing::trace!(
					ty = ?self.type_desc,
					member = step.member.name(),
					%error,
					"stringify.memberwise.read_failed"
				);
			})?;
			let Some(renderer) = &step.renderer else {
				return ctx.compose(&*value);
			};
			let Some(render) = self.renderers.get(&renderer.name) else {
				return Err(Interrupt::failed(format!(
					"no member renderer named {:?}",
					renderer.name
				)));
			};
			render.render(&*value, &renderer.args, ctx)
		})
	}
}

impl Composable for Members<'_> {
	fn is_deep(&self) -> bool {
		true
	}

	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		ctx.append_type_name(&self.type_desc)?;
		ctx.append_char('{');
		let steps = Arc::clone(&self.steps);
		ctx.append_items(ItemBudget::Members, steps.iter(), |ctx, step| {
			self.render_step(ctx, step)
		})?;
		ctx.append_char('}');
		Ok(())
	}
}
