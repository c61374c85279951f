//! The managed-object protocol: the slots every value kind implements.
//!
//! A value kind registers itself with the substrate by implementing
//! [`ManagedObject`]. The heap dispatches hashing, rendering,
//! comparison, attribute reads, and cycle-collector traversal through
//! this trait; defaults give leaf values sensible behavior (no edges,
//! no attributes, unhashable, comparison deferred).

use std::any::Any;

use crate::error::{Error, Result};
use crate::handle::ObjRef;
use crate::heap::Heap;

/// Rich comparison operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`==`).
    Eq,
    /// Not equal (`!=`).
    Ne,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
}

impl CompareOp {
    /// Returns true for the equality operators (`==` and `!=`).
    #[must_use]
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Eq | Self::Ne)
    }

    /// Returns the operator to use when retrying with reversed operands.
    #[must_use]
    pub const fn reflected(self) -> Self {
        match self {
            Self::Eq => Self::Eq,
            Self::Ne => Self::Ne,
            Self::Lt => Self::Gt,
            Self::Le => Self::Ge,
            Self::Gt => Self::Lt,
            Self::Ge => Self::Le,
        }
    }

    /// Maps an already-computed equality judgment through this operator.
    ///
    /// `Eq` yields the judgment, `Ne` its negation, and ordering
    /// operators decline since equality alone cannot decide them.
    #[must_use]
    pub const fn decide_equality(self, equal: bool) -> Compared {
        match self {
            Self::Eq => Compared::Decided(equal),
            Self::Ne => Compared::Decided(!equal),
            _ => Compared::NotApplicable,
        }
    }
}

/// Three-way result of a rich comparison.
///
/// A kind may decline to judge a pair, signaling the heap to retry with
/// the operands reversed before falling back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compared {
    /// The comparison was judged.
    Decided(bool),
    /// This kind declines; retry with the reflected operand.
    NotApplicable,
}

/// Protocol implemented by every managed value kind.
///
/// Objects are immutable after construction. Methods that consult other
/// values receive the owning [`Heap`] by shared reference; mutation of
/// the heap never happens during dispatch.
pub trait ManagedObject: Any {
    /// Internal qualified name of this value's kind (e.g. `types.Optional`).
    fn type_name(&self) -> &str;

    /// The managed references this value owns.
    ///
    /// Reported to the cycle collector during traversal and released
    /// when the value is destroyed. Leaf values report none.
    fn edges(&self) -> Vec<ObjRef> {
        Vec::new()
    }

    /// Hashes this value. Kinds without a hash slot fail.
    fn hash(&self, _heap: &Heap) -> Result<u64> {
        Err(Error::unhashable(self.type_name().to_owned()))
    }

    /// Default textual representation of this value.
    fn repr(&self, heap: &Heap) -> Result<String>;

    /// Rich comparison against another value.
    ///
    /// The default declines every pair, leaving the judgment to the
    /// reflected operand or the heap's identity fallback.
    fn compare(&self, _heap: &Heap, _other: ObjRef, _op: CompareOp) -> Result<Compared> {
        Ok(Compared::NotApplicable)
    }

    /// Reads a named attribute of this value.
    ///
    /// `Ok(None)` means the attribute is absent (a normal branch);
    /// `Err` means the lookup itself failed. Returned handles are
    /// borrowed — no ownership is transferred to the caller.
    fn attr(&self, _heap: &Heap, _name: &str) -> Result<Option<ObjRef>> {
        Ok(None)
    }

    /// Upcast for downcasting to the concrete kind.
    fn as_any(&self) -> &dyn Any;
}
