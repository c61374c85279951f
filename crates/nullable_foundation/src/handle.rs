//! Managed-value handles with generational indices.

use std::fmt;

/// Handle to a managed value in a [`Heap`](crate::Heap).
///
/// The generation counter increments when a slot is reused after the
/// object it held is destroyed, allowing detection of stale handles to
/// destroyed values.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ObjRef {
    /// Index into heap slot storage.
    pub index: u32,
    /// Generation counter for stale handle detection.
    pub generation: u32,
}

impl ObjRef {
    /// Creates a new handle with the given index and generation.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Debug for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjRef({}v{})", self.index, self.generation)
    }
}
