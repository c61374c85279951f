//! Nullable - Optional type values for a managed-object runtime
//!
//! This crate re-exports both layers of the Nullable system for
//! convenient access. For detailed documentation, see the individual
//! layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: nullable_typing     — The `?T` value kind, union-like views
//! Layer 0: nullable_foundation — Heap, handles, value kinds, errors
//! ```

pub use nullable_foundation as foundation;
pub use nullable_typing as typing;
