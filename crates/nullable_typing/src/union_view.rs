//! Capability query for foreign union-like values.
//!
//! The typing ecosystem's union aliases are not defined by this
//! runtime; they are recognized purely by shape. Rather than scattering
//! attribute probes through comparison code, [`as_union_like`] is the
//! single adapter that inspects a value and either yields a typed view
//! of its members or reports "not this kind".

use nullable_foundation::kinds::{StrValue, TupleValue};
use nullable_foundation::{Error, Heap, ObjRef, Result};

/// Internal type name marking the foreign ecosystem's union alias kind.
pub const UNION_TYPE_NAME: &str = "_GenericAlias";

/// Module name of the foreign typing ecosystem.
pub const TYPING_MODULE: &str = "typing";

/// Read-only view of a foreign union-like value's member types.
#[derive(Debug)]
pub struct UnionView {
    args: Vec<ObjRef>,
}

impl UnionView {
    /// The union's member handles (borrowed from the foreign value).
    #[must_use]
    pub fn args(&self) -> &[ObjRef] {
        &self.args
    }
}

/// Queries whether a value is a foreign union-like alias.
///
/// A value qualifies when its kind's internal name is
/// [`UNION_TYPE_NAME`] and its `__module__` attribute is the string
/// [`TYPING_MODULE`]; its `__args__` attribute must then be a tuple of
/// member types. Absent attributes make this a normal "not this kind"
/// branch; a failing attribute lookup propagates as an error.
pub fn as_union_like(heap: &Heap, handle: ObjRef) -> Result<Option<UnionView>> {
    if heap.get(handle)?.type_name() != UNION_TYPE_NAME {
        return Ok(None);
    }
    let Some(module) = heap.lookup_attr(handle, "__module__")? else {
        return Ok(None);
    };
    match heap.downcast::<StrValue>(module)? {
        Some(module) if module.value() == TYPING_MODULE => {}
        _ => return Ok(None),
    }
    let Some(args) = heap.lookup_attr(handle, "__args__")? else {
        return Ok(None);
    };
    let Some(tuple) = heap.downcast::<TupleValue>(args)? else {
        let actual = heap.get(args)?.type_name().to_owned();
        return Err(Error::type_mismatch("tuple", actual));
    };
    Ok(Some(UnionView {
        args: tuple.items().to_vec(),
    }))
}
