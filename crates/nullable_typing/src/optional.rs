//! The Optional value kind: `?T`, a type that may be absent.
//!
//! An [`OptionalAlias`] wraps exactly one managed value — the wrapped
//! type — and is immutable after construction. It hashes like its
//! wrapped type, renders as `?` followed by an item rendering, and
//! compares equal to the foreign typing ecosystem's `Union[T, None]`
//! aliases as well as to other Optionals wrapping equal types.

use std::any::Any;

use nullable_foundation::kinds::StrValue;
use nullable_foundation::{CompareOp, Compared, Error, Heap, ManagedObject, ObjRef, Result};

use crate::union_view::as_union_like;

/// Internal type name of the Optional kind.
pub const OPTIONAL_TYPE_NAME: &str = "types.Optional";

const BUILTINS_MODULE: &str = "builtins";

/// Managed value representing an Optional type, e.g. `?int`.
///
/// Holds one owned reference to the wrapped type, exposed read-only as
/// the `__args__` attribute.
#[derive(Debug)]
pub struct OptionalAlias {
    wrapped: ObjRef,
}

impl OptionalAlias {
    /// The wrapped type's handle (borrowed).
    #[must_use]
    pub const fn wrapped(&self) -> ObjRef {
        self.wrapped
    }
}

/// Constructs an Optional wrapping the given value.
///
/// Ownership of `wrapped` transfers to the new value. On allocation
/// failure the wrapped reference is released before the error is
/// returned, so the caller retains no surviving handle either way. On
/// success the new value carries a single outstanding reference and is
/// registered with the cycle collector.
pub fn make_optional(heap: &mut Heap, wrapped: ObjRef) -> Result<ObjRef> {
    match heap.alloc(OptionalAlias { wrapped }) {
        Ok(handle) => Ok(handle),
        Err(err) => {
            heap.release(wrapped)?;
            Err(err)
        }
    }
}

/// `__instancecheck__` — semantics not yet defined.
///
/// The surface exists so callers can probe for it, but a judgment is
/// never produced; callers get a typed `Unimplemented` failure instead
/// of a silently wrong answer.
pub fn instance_check(_heap: &Heap, _optional: ObjRef, _instance: ObjRef) -> Result<bool> {
    Err(Error::unimplemented("__instancecheck__"))
}

/// `__subclasscheck__` — semantics not yet defined.
pub fn subclass_check(_heap: &Heap, _optional: ObjRef, _class: ObjRef) -> Result<bool> {
    Err(Error::unimplemented("__subclasscheck__"))
}

/// Renders the wrapped type for use after the `?` sigil.
///
/// Dispatch order: the ellipsis singleton renders literally; anything
/// shaped like a generic alias (`__origin__` + `__args__`) keeps its
/// own repr; class-like values (`__qualname__` present) render as the
/// qualified name, prefixed by the module unless it is `builtins`;
/// everything else keeps its own repr.
fn item_repr(heap: &Heap, item: ObjRef) -> Result<String> {
    if item == heap.ellipsis() {
        return Ok("...".to_owned());
    }

    if heap.lookup_attr(item, "__origin__")?.is_some()
        && heap.lookup_attr(item, "__args__")?.is_some()
    {
        // Some generic alias; its own repr already nests properly.
        return heap.repr_of(item);
    }

    let Some(qualname) = heap.lookup_attr(item, "__qualname__")? else {
        return heap.repr_of(item);
    };
    let Some(module) = heap.lookup_attr(item, "__module__")? else {
        return heap.repr_of(item);
    };
    if module == heap.none() {
        return heap.repr_of(item);
    }

    match heap.downcast::<StrValue>(module)? {
        // Builtins don't need a module prefix.
        Some(module) if module.value() == BUILTINS_MODULE => heap.display_of(qualname),
        _ => Ok(format!(
            "{}.{}",
            heap.display_of(module)?,
            heap.display_of(qualname)?
        )),
    }
}

fn contains(heap: &Heap, items: &[ObjRef], needle: ObjRef) -> Result<bool> {
    for item in items {
        if heap.values_equal(*item, needle)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Set equality over handle slices: order and duplicate members are
/// ignored, matching the set conversion the comparison rule applies to
/// both sides.
fn sets_equal(heap: &Heap, left: &[ObjRef], right: &[ObjRef]) -> Result<bool> {
    for item in left {
        if !contains(heap, right, *item)? {
            return Ok(false);
        }
    }
    for item in right {
        if !contains(heap, left, *item)? {
            return Ok(false);
        }
    }
    Ok(true)
}

impl ManagedObject for OptionalAlias {
    fn type_name(&self) -> &str {
        OPTIONAL_TYPE_NAME
    }

    fn edges(&self) -> Vec<ObjRef> {
        vec![self.wrapped]
    }

    /// Delegates entirely to the wrapped type's hash, so Optionals of
    /// equal-and-equal-hash types hash equal themselves.
    fn hash(&self, heap: &Heap) -> Result<u64> {
        heap.hash_of(self.wrapped)
    }

    fn repr(&self, heap: &Heap) -> Result<String> {
        let mut out = String::from("?");
        out.push_str(&item_repr(heap, self.wrapped)?);
        Ok(out)
    }

    fn compare(&self, heap: &Heap, other: ObjRef, op: CompareOp) -> Result<Compared> {
        // Only equality is defined for Optionals; ordering defers to
        // the reflected operand.
        if !op.is_equality() {
            return Ok(Compared::NotApplicable);
        }

        if let Some(view) = as_union_like(heap, other)? {
            // Optional(T) vs Union[...]: compare {T, NoneType} against
            // the union's members with set semantics.
            let left = [self.wrapped, heap.none_type()];
            let equal = sets_equal(heap, &left, view.args())?;
            return Ok(op.decide_equality(equal));
        }

        if let Some(other) = heap.downcast::<Self>(other)? {
            // Tail comparison of the wrapped types, same operator.
            return heap.compare(self.wrapped, other.wrapped, op);
        }

        // Concretely neither form: a decided judgment, not a deferral.
        Ok(op.decide_equality(false))
    }

    fn attr(&self, _heap: &Heap, name: &str) -> Result<Option<ObjRef>> {
        match name {
            "__args__" => Ok(Some(self.wrapped)),
            _ => Ok(None),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
