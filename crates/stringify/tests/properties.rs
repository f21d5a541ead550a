//! Integration tests for the hard bounds every render honors.
//!
//! Each test drives a configured engine end to end and checks the exact line
//! it writes when a budget runs out.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use glimpse_macros::Inspect;
use glimpse_reflect::{EnumDesc, EnumValue, Inspect, Reflect, Shape, TypeDesc, TypeTraits};
use glimpse_stringify::{Stringify, StringifyOptions, Threshold};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn engine(configure: impl FnOnce(&mut StringifyOptions)) -> Stringify {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::TRACE)
		.try_init();
	Stringify::builder().configure(configure).build().unwrap()
}

#[derive(Inspect)]
pub struct Nest {
	pub inner: Option<Box<Nest>>,
}

fn nest(levels: usize) -> Nest {
	(0..levels).fold(Nest { inner: None }, |inner, _| Nest {
		inner: Some(Box::new(inner)),
	})
}

#[derive(Inspect)]
pub struct Node {
	pub me: RefCell<Option<Rc<Node>>>,
}

#[derive(Inspect)]
#[glimpse(property(boom))]
pub struct Loop {
	#[glimpse(order = -1)]
	pub me: RefCell<Option<Rc<Loop>>>,
}

impl Loop {
	fn boom(&self) -> u32 {
		panic!("getter panicked")
	}
}

#[derive(Inspect)]
#[glimpse(property(wait))]
pub struct Slow;

impl Slow {
	fn wait(&self) -> u32 {
		std::thread::sleep(Duration::from_millis(60));
		1
	}
}

#[derive(Inspect)]
pub struct Shelf {
	pub items: Vec<Slow>,
}

#[derive(Inspect)]
#[glimpse(display)]
pub struct Exploding;

impl fmt::Display for Exploding {
	fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
		panic!("display exploded")
	}
}

#[derive(Clone, Copy)]
struct Access(u64);

static ACCESS: EnumDesc = EnumDesc {
	flags: true,
	variants: &[("None", 0), ("Read", 1), ("Write", 2), ("Exec", 4)],
};

impl Reflect for Access {
	fn reflect_type() -> TypeDesc {
		TypeDesc::interned::<Self>(|| {
			TypeDesc::of::<Self>("Access")
				.traits(TypeTraits::ENUM)
				.build()
		})
	}
}

impl Inspect for Access {
	fn type_desc(&self) -> TypeDesc {
		Self::reflect_type()
	}

	fn shape(&self) -> Shape<'_> {
		Shape::Enum(EnumValue {
			desc: &ACCESS,
			bits: self.0,
		})
	}
}

#[test]
fn test_total_length_is_a_hard_cap() {
	let stringify = engine(|options| options.max_total_length = Threshold::limit(12));
	let values: Vec<String> = (0..50).map(|n| format!("value-{n}")).collect();
	let out = stringify.render(&values);
	assert_eq!(out, "Vec<String>(");
	assert!(out.len() <= 12);
}

#[test]
fn test_zero_length_renders_nothing() {
	let stringify = engine(|options| options.max_total_length = Threshold::limit(0));
	assert_eq!(stringify.render(&vec![1, 2, 3]), "");
}

#[test]
fn test_depth_cap() {
	let stringify = engine(|options| options.max_depth = Threshold::limit(2));
	assert_eq!(stringify.render(&nest(3)), "Nest{inner:Nest{inner:⋯}}");
	assert_eq!(stringify.render(&nest(1)), "Nest{inner:Nest{inner:∅}}");
}

#[test]
fn test_cycle_is_a_back_reference() {
	let stringify = engine(|_| {});
	let node = Rc::new(Node {
		me: RefCell::new(None),
	});
	*node.me.borrow_mut() = Some(Rc::clone(&node));
	assert_eq!(stringify.render(&node), "Node{me:Node~1}");
	node.me.borrow_mut().take();
}

#[rstest]
#[case::unbounded(Threshold::UNLIMITED)]
#[case::bounded(Threshold::limit(4))]
fn test_cycle_survives_a_panicking_sibling(#[case] max_depth: Threshold) {
	let stringify = engine(|options| options.max_depth = max_depth);
	let node = Rc::new(Loop {
		me: RefCell::new(None),
	});
	*node.me.borrow_mut() = Some(Rc::clone(&node));
	assert_eq!(stringify.render(&node), "Loop{boom:⚠, me:Loop~1}");
	node.me.borrow_mut().take();
}

#[test]
fn test_shared_values_are_not_cycles() {
	let stringify = engine(|_| {});
	let shared = Rc::new(5_i32);
	let pair = (Rc::clone(&shared), Rc::clone(&shared));
	assert_eq!(stringify.render(&pair), "(5, 5)");
}

#[test]
fn test_expired_deadline_rolls_back_the_item() {
	let stringify = engine(|options| options.max_render_time_ms = Some(20));
	assert_eq!(stringify.render(&vec![Slow]), "Vec<Slow>(1)[…]");
}

#[test]
fn test_expired_deadline_rolls_back_the_whole_collection() {
	let stringify = engine(|options| options.max_render_time_ms = Some(20));
	let shelf = Shelf {
		items: vec![Slow, Slow, Slow],
	};
	assert_eq!(stringify.render(&shelf), "Shelf{items:…}");
}

#[test]
fn test_no_deadline_renders_everything() {
	let stringify = engine(|options| options.max_render_time_ms = None);
	assert_eq!(stringify.render(&vec![Slow]), "Vec<Slow>(1)[Slow{wait:1}]");
}

#[test]
fn test_collection_truncation() {
	let stringify = engine(|options| options.max_collection_items = Threshold::limit(5));
	let values: Vec<i32> = (0..1000).collect();
	assert_eq!(stringify.render(&values), "Vec<i32>(1000)[0, 1, 2, 3, 4, …]");
}

#[test]
fn test_string_truncation_counts_chars() {
	let stringify = engine(|options| options.max_string_length = Threshold::limit(3));
	assert_eq!(stringify.render(&"héllo".to_string()), "hél…");
	assert_eq!(stringify.render(&"hey".to_string()), "hey");
}

#[test]
fn test_panicking_display_is_contained() {
	let stringify = engine(|_| {});
	assert_eq!(stringify.render(&Exploding), "⚠");
	assert_eq!(stringify.render(&(1, Exploding)), "(1, ⚠)");
}

#[rstest]
#[case(0, "None")]
#[case(3, "Read|Write")]
#[case(7, "Read|Write|Exec")]
#[case(9, "Read|8")]
#[case(16, "16")]
fn test_flags(#[case] bits: u64, #[case] expected: &str) {
	assert_eq!(glimpse_stringify::render(&Access(bits)), expected);
}

#[test]
fn test_render_with_scopes_one_call() {
	let stringify = engine(|_| {});
	let values = vec![1, 2, 3];
	let narrowed = stringify.render_with(&values, |variables| {
		variables.max_collection_items = Threshold::limit(1);
	});
	assert_eq!(narrowed, "Vec<i32>(3)[1, …]");
	assert_eq!(stringify.render(&values), "Vec<i32>(3)[1, 2, 3]");
}
