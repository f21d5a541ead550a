//! Integration tests for engine registrations: contracts, member renderers,
//! custom stringifiers, and file-based options.

use std::any::Any;

use glimpse_macros::Inspect;
use glimpse_reflect::Inspect as _;
use glimpse_stringify::{
	Composable, ConfigError, Flow, Stringifier, Stringify, StringifyContext, StringifyOptions,
	Target, priority,
};
use pretty_assertions::assert_eq;

#[derive(Inspect)]
pub struct Celsius(pub f64);

#[derive(Inspect)]
#[glimpse(not_renderable)]
pub struct Session {
	pub user: String,
	pub token: String,
}

#[derive(Inspect)]
pub struct Reading {
	pub sensor: String,
	pub value: Celsius,
}

struct CelsiusStringifier;

impl Stringifier for CelsiusStringifier {
	fn id(&self) -> &str {
		"celsius"
	}

	fn resolve<'v>(&self, target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>> {
		match (target.value as &dyn Any).downcast_ref::<Celsius>() {
			Some(celsius) => Ok(Box::new(Degrees(celsius.0))),
			None => Err(target),
		}
	}
}

struct Degrees(f64);

impl Composable for Degrees {
	fn compose(self: Box<Self>, ctx: &mut StringifyContext<'_>) -> Flow {
		ctx.append_fmt(format_args!("{:.1}°C", self.0))
	}
}

struct Unnamed;

impl Stringifier for Unnamed {
	fn id(&self) -> &str {
		""
	}

	fn resolve<'v>(&self, target: Target<'v>) -> Result<Box<dyn Composable + 'v>, Target<'v>> {
		Err(target)
	}
}

fn silent(_: &dyn glimpse_stringify::Inspect, _: &[String], _: &mut StringifyContext<'_>) -> Flow {
	Ok(())
}

#[test]
fn test_custom_stringifier_runs_before_memberwise() {
	let stringify = Stringify::builder()
		.stringifier(CelsiusStringifier, priority::BASIC)
		.build()
		.unwrap();
	let reading = Reading {
		sensor: "attic".to_string(),
		value: Celsius(21.54),
	};
	assert_eq!(stringify.render(&reading), "Reading{sensor:attic, value:21.5°C}");
	assert_eq!(Stringify::default().render(&Celsius(3.0)), "Celsius{0:3}");
}

#[test]
fn test_contract_includes_a_not_renderable_type() {
	let session = Session {
		user: "ada".to_string(),
		token: "s3cr3t".to_string(),
	};
	assert_eq!(glimpse_stringify::render(&session), "Session");

	let stringify = Stringify::builder()
		.contract::<Session>(|contract| {
			contract.include().member("token", |member| {
				member.with("redact", ["<token>"]);
			});
		})
		.build()
		.unwrap();
	assert_eq!(stringify.render(&session), "Session{user:ada, token:<token>}");
}

#[test]
fn test_type_renderer_writes_the_runtime_type() {
	let stringify = Stringify::builder()
		.contract::<Reading>(|contract| {
			contract.member("value", |member| {
				member.with("type", [] as [&str; 0]);
			});
		})
		.build()
		.unwrap();
	let reading = Reading {
		sensor: "cellar".to_string(),
		value: Celsius(12.0),
	};
	assert_eq!(stringify.render(&reading), "Reading{sensor:cellar, value:Celsius}");
}

#[test]
fn test_forbidden_types_render_as_a_marker() {
	let stringify = Stringify::builder().forbid::<Celsius>().build().unwrap();
	assert_eq!(stringify.render(&Celsius(1.0)), "Celsius⛔");
	assert_eq!(stringify.render(&vec![Celsius(1.0)]), "Vec<Celsius>(1)[Celsius⛔]");
}

#[test]
fn test_empty_stringifier_id_is_rejected() {
	let err = Stringify::builder().stringifier(Unnamed, 0).build().unwrap_err();
	assert!(matches!(err, ConfigError::EmptyStringifierId));
}

#[test]
fn test_empty_renderer_name_is_rejected() {
	let err = Stringify::builder()
		.member_renderer("", silent)
		.build()
		.unwrap_err();
	assert!(matches!(err, ConfigError::EmptyRendererName));
}

#[test]
fn test_options_from_toml() {
	let options = StringifyOptions::from_toml_str(
		r#"
			max_collection_items = 2
			member_separator = "; "
			namespace_include = "^alloc"
		"#,
	)
	.unwrap();
	let stringify = Stringify::new(options).unwrap();
	assert_eq!(
		stringify.render(&vec![1, 2, 3]),
		"alloc::vec::Vec<i32>(3)[1; 2; …]"
	);
}

#[test]
fn test_render_type() {
	let ty = <Vec<Option<u8>> as glimpse_stringify::Reflect>::reflect_type();
	assert_eq!(Stringify::default().render_type(&ty), "Vec<u8?>");
	assert_eq!(Celsius(0.0).type_desc().name(), "Celsius");
}
