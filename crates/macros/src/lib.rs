//! Procedural macros for glimpse.
//!
//! Provides `#[derive(Inspect)]`, which generates the runtime type descriptor,
//! member table, and declarative markers consumed by the renderer.

use proc_macro::TokenStream;

/// Inspect derive macro implementation.
mod inspect;

/// Derives `Inspect` and `Reflect` for a struct or a fieldless enum.
///
/// Type attributes (`#[glimpse(...)]` on the item):
/// * `renderable` / `not_renderable` - declarative type marker
/// * `name = "..."` - rendered type name (defaults to the item name)
/// * `namespace = "..."` - namespace (defaults to `module_path!()`)
/// * `flags` - enum values combine as bit flags
/// * `display` - render the struct through its `Display` impl
/// * `property(a, b)` - expose `&self` methods as computed properties
///
/// Field attributes:
/// * `include` / `skip` - declarative include or exclude marker
/// * `ignore` - leave the field out of the member table entirely
/// * `rename = "..."` - output name
/// * `order = N` - sort key, higher first
/// * `with = "renderer"`, `args("a", "b")` - custom member renderer
///
/// ```ignore
/// #[derive(Inspect)]
/// #[glimpse(renderable, property(total))]
/// pub struct Order {
///     pub id: u64,
///     #[glimpse(include, rename = "who")]
///     customer: String,
///     #[glimpse(with = "redact")]
///     pub card: String,
/// }
/// ```
#[proc_macro_derive(Inspect, attributes(glimpse))]
pub fn derive_inspect(input: TokenStream) -> TokenStream {
	inspect::derive_inspect(input)
}
