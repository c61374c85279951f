//! Optional type values (`?T`) built on the Nullable substrate.
//!
//! This crate provides:
//! - [`OptionalAlias`] - The managed value kind representing `?T`
//! - [`make_optional`] - Ownership-transferring construction
//! - [`as_union_like`] - Capability query for foreign union aliases

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod optional;
pub mod union_view;

pub use optional::{
    OPTIONAL_TYPE_NAME, OptionalAlias, instance_check, make_optional, subclass_check,
};
pub use union_view::{TYPING_MODULE, UNION_TYPE_NAME, UnionView, as_union_like};
