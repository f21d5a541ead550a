//! Fixed glyphs written in place of values.

/// Absent value.
pub const NULL: &str = "∅";
/// Truncated output, or a count or time budget ran out.
pub const ELLIPSIS: &str = "…";
/// The configured maximum depth was reached.
pub const TOO_DEEP: &str = "⋯";
/// Reading or rendering the value failed.
pub const ERROR: &str = "⚠";
/// The type is never traversed.
pub const FORBIDDEN: &str = "⛔";
/// Prefix of a callable signature.
pub const LAMBDA: &str = "λ";
/// Separates a type name from a cycle's depth delta.
pub const CYCLE: char = '~';
