//! Managed-value substrate for Nullable.
//!
//! This crate provides:
//! - [`Heap`] - Slot storage with reference counts and cycle tracking
//! - [`ObjRef`] - Generational handles to managed values
//! - [`ManagedObject`] - The protocol every value kind implements
//! - [`Error`] - Typed errors with no local recovery
//! - Builtin collaborator kinds (singletons, scalars, tuples, classes,
//!   aliases, duck-typed foreign objects)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod handle;
pub mod heap;
pub mod kinds;
pub mod object;

pub use error::{Error, ErrorKind, Result};
pub use handle::ObjRef;
pub use heap::{Heap, HeapConfig};
pub use object::{CompareOp, Compared, ManagedObject};
