//! [`Inspect`](crate::Inspect) and [`Reflect`](crate::Reflect) for std and
//! third-party types.

mod collection;
mod external;
mod forbidden;
mod pointer;
mod scalar;
mod tuple;

#[cfg(test)]
mod tests;
