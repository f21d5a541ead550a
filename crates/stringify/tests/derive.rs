//! Integration tests for values described by `#[derive(Inspect)]`.

use std::collections::BTreeMap;
use std::fmt;

use glimpse_macros::Inspect;
use glimpse_reflect::{AsyncSeq, Pair, anonymous};
use glimpse_stringify::{Stringify, StringifyOptions, Threshold};
use pretty_assertions::assert_eq;

fn engine(configure: impl FnOnce(&mut StringifyOptions)) -> Stringify {
	Stringify::builder().configure(configure).build().unwrap()
}

#[derive(Inspect)]
#[glimpse(namespace = "app::model")]
pub enum Status {
	Open,
	Closed,
}

#[derive(Inspect)]
#[glimpse(namespace = "app::model", flags)]
pub enum Perm {
	None = 0,
	Read = 1,
	Write = 2,
	All = 3,
}

#[derive(Inspect)]
#[glimpse(namespace = "app::model", property(total))]
pub struct Order {
	pub id: u64,
	#[glimpse(include, rename = "who")]
	customer: String,
	#[glimpse(with = "redact")]
	pub card: String,
	#[glimpse(ignore)]
	pub cache: Vec<u8>,
	#[glimpse(order = 5)]
	pub status: Status,
	quantity: u64,
}

impl Order {
	fn total(&self) -> u64 {
		self.id * self.quantity
	}
}

fn order() -> Order {
	Order {
		id: 4,
		customer: "ada".to_string(),
		card: "4111-1111".to_string(),
		cache: vec![1, 2, 3],
		status: Status::Open,
		quantity: 3,
	}
}

#[derive(Inspect)]
#[glimpse(not_renderable, namespace = "app::net")]
pub struct Socket {
	pub fd: i32,
}

#[derive(Inspect)]
#[glimpse(display, name = "Money")]
pub struct Cents(pub i64);

impl fmt::Display for Cents {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
	}
}

#[derive(Inspect)]
#[glimpse(display)]
pub struct Unprintable;

impl fmt::Display for Unprintable {
	fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
		Err(fmt::Error)
	}
}

#[derive(Inspect)]
pub struct Point(pub i32, pub i32);

#[test]
fn test_derived_struct_follows_markers() {
	assert_eq!(
		Stringify::default().render(&order()),
		"Order{status:Open, id:4, who:ada, card:***, total:12}"
	);
}

#[test]
fn test_namespace_policy_qualifies_matching_types() {
	let stringify = engine(|options| options.namespace_include = Some("^app::".to_string()));
	let out = stringify.render(&vec![Status::Closed]);
	assert_eq!(out, "Vec<app::model::Status>(1)[Closed]");
}

#[test]
fn test_derived_flags() {
	let render = glimpse_stringify::render;
	assert_eq!(render(&Perm::None), "None");
	assert_eq!(render(&Perm::Write), "Write");
	assert_eq!(render(&Perm::All), "All");
}

#[test]
fn test_not_renderable_writes_the_name() {
	assert_eq!(glimpse_stringify::render(&Socket { fd: 3 }), "Socket");
}

#[test]
fn test_display_types_use_display() {
	assert_eq!(glimpse_stringify::render(&Cents(1250)), "$12.50");
	assert_eq!(
		glimpse_stringify::render(&vec![Cents(5)]),
		"Vec<Money>(1)[$0.05]"
	);
}

#[test]
fn test_display_errors_render_the_error_glyph() {
	assert_eq!(glimpse_stringify::render(&Unprintable), "⚠");
	assert_eq!(glimpse_stringify::render(&(1, Unprintable)), "(1, ⚠)");
}

#[test]
fn test_tuple_struct_fields_are_positional() {
	assert_eq!(glimpse_stringify::render(&Point(1, -2)), "Point{0:1, 1:-2}");
}

#[test]
fn test_anonymous_records_have_no_type_name() {
	let record = anonymous! { id: 7_u32, name: "ada", tags: vec!["a", "b"] };
	assert_eq!(
		glimpse_stringify::render(&record),
		"{id:7, name:ada, tags:Vec<&str>(2)[a, b]}"
	);
}

#[test]
fn test_async_sequences_drain_on_render() {
	let seq = AsyncSeq::new(futures::stream::iter(vec![1, 2, 3]));
	assert_eq!(glimpse_stringify::render(&seq), "AsyncSeq<i32>[1, 2, 3]");
	assert_eq!(glimpse_stringify::render(&seq), "AsyncSeq<i32>[]");
}

#[test]
fn test_sequences_of_pairs_render_as_dictionaries() {
	let pairs = vec![Pair::new("a", 1), Pair::new("b", 2)];
	assert_eq!(
		glimpse_stringify::render(&pairs),
		"Vec<Pair<&str, i32>>(2){a:1, b:2}"
	);
}

#[test]
fn test_dictionary_budget_inherits_collection_budget() {
	let stringify = engine(|options| options.max_collection_items = Threshold::limit(1));
	let map = BTreeMap::from([(1, "x"), (2, "y")]);
	assert_eq!(stringify.render(&map), "BTreeMap<i32, &str>(2){1:x, …}");
}
