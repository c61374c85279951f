//! Slot-based heap with explicit reference counts and cycle-collector
//! tracking.
//!
//! Ownership is single-owner by convention: a value holding a handle in
//! its [`edges`](crate::ManagedObject::edges) owns exactly one
//! reference to it, released when the holder is destroyed. Handles
//! returned by attribute reads are borrowed; callers that keep them
//! must [`acquire`](Heap::acquire) their own reference.

use crate::error::{Error, Result};
use crate::handle::ObjRef;
use crate::kinds::{ClassValue, EllipsisValue, NoneValue, StrValue};
use crate::object::{CompareOp, Compared, ManagedObject};

/// Heap configuration.
#[derive(Debug, Clone, Default)]
pub struct HeapConfig {
    /// Maximum number of live objects; `None` means unbounded.
    pub capacity: Option<usize>,
}

struct Slot {
    generation: u32,
    refcount: u32,
    tracked: bool,
    obj: Option<Box<dyn ManagedObject>>,
}

/// Owner of every managed value.
///
/// Construction pre-allocates the immortal singletons: the `None`
/// value, the `Ellipsis` value, and the class object for `None`'s type.
pub struct Heap {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    capacity: Option<usize>,
    none: ObjRef,
    ellipsis: ObjRef,
    none_type: ObjRef,
}

impl Heap {
    /// Creates an unbounded heap.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HeapConfig::default())
    }

    /// Creates a heap with the given configuration.
    #[must_use]
    pub fn with_config(config: HeapConfig) -> Self {
        let placeholder = ObjRef::new(u32::MAX, 0);
        let mut heap = Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            capacity: config.capacity,
            none: placeholder,
            ellipsis: placeholder,
            none_type: placeholder,
        };
        // Singletons bypass the capacity limit so a small limit still
        // yields a usable heap.
        heap.none = heap.alloc_unchecked(Box::new(NoneValue));
        heap.ellipsis = heap.alloc_unchecked(Box::new(EllipsisValue));
        let module = heap.alloc_unchecked(Box::new(StrValue::new("builtins")));
        let qualname = heap.alloc_unchecked(Box::new(StrValue::new("NoneType")));
        heap.none_type = heap.alloc_unchecked(Box::new(ClassValue::new(Some(module), qualname)));
        heap
    }

    /// Replaces the live-object capacity limit.
    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
    }

    /// The `None` singleton.
    #[must_use]
    pub const fn none(&self) -> ObjRef {
        self.none
    }

    /// The `Ellipsis` singleton.
    #[must_use]
    pub const fn ellipsis(&self) -> ObjRef {
        self.ellipsis
    }

    /// The class object for `None`'s type.
    #[must_use]
    pub const fn none_type(&self) -> ObjRef {
        self.none_type
    }

    /// Number of live objects, singletons included.
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.live
    }

    /// Allocates a new object with a single outstanding reference.
    ///
    /// Ownership of any handles in the value's `edges()` transfers to
    /// the new object. Fails with `HeapExhausted` when the configured
    /// capacity is reached; on that path the caller still owns the
    /// edge references and must release them itself.
    pub fn alloc<T: ManagedObject>(&mut self, value: T) -> Result<ObjRef> {
        if let Some(limit) = self.capacity {
            if self.live >= limit {
                return Err(Error::heap_exhausted(limit));
            }
        }
        Ok(self.alloc_unchecked(Box::new(value)))
    }

    fn alloc_unchecked(&mut self, obj: Box<dyn ManagedObject>) -> ObjRef {
        // Values holding owned references participate in cycle
        // collection; leaves do not.
        let tracked = !obj.edges().is_empty();
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.refcount = 1;
            slot.tracked = tracked;
            slot.obj = Some(obj);
            ObjRef::new(index, slot.generation)
        } else {
            let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 0,
                refcount: 1,
                tracked,
                obj: Some(obj),
            });
            ObjRef::new(index, 0)
        }
    }

    fn slot(&self, handle: ObjRef) -> Result<&Slot> {
        let slot = self
            .slots
            .get(handle.index as usize)
            .ok_or_else(|| Error::stale_handle(handle))?;
        if slot.generation != handle.generation || slot.obj.is_none() {
            return Err(Error::stale_handle(handle));
        }
        Ok(slot)
    }

    /// Returns the object behind a handle.
    pub fn get(&self, handle: ObjRef) -> Result<&dyn ManagedObject> {
        let slot = self.slot(handle)?;
        slot.obj
            .as_deref()
            .ok_or_else(|| Error::stale_handle(handle))
    }

    /// Typed view of the object behind a handle.
    ///
    /// `Ok(None)` when the object is live but of a different kind.
    pub fn downcast<T: ManagedObject>(&self, handle: ObjRef) -> Result<Option<&T>> {
        Ok(self.get(handle)?.as_any().downcast_ref::<T>())
    }

    /// Acquires an additional reference, returning the handle.
    pub fn acquire(&mut self, handle: ObjRef) -> Result<ObjRef> {
        self.slot(handle)?;
        self.slots[handle.index as usize].refcount += 1;
        Ok(handle)
    }

    /// Releases one reference.
    ///
    /// When the count reaches zero the object is removed from cycle
    /// tracking, its slot is freed, and each reference it owned is
    /// released in turn (iteratively, so long ownership chains cannot
    /// overflow the stack).
    pub fn release(&mut self, handle: ObjRef) -> Result<()> {
        self.slot(handle)?;
        let mut pending = vec![handle];
        while let Some(current) = pending.pop() {
            let slot = self
                .slots
                .get_mut(current.index as usize)
                .ok_or_else(|| Error::stale_handle(current))?;
            if slot.generation != current.generation || slot.obj.is_none() {
                return Err(Error::stale_handle(current));
            }
            slot.refcount -= 1;
            if slot.refcount == 0 {
                slot.tracked = false;
                slot.generation = slot.generation.wrapping_add(1);
                let obj = slot.obj.take();
                self.free.push(current.index);
                self.live -= 1;
                if let Some(obj) = obj {
                    pending.extend(obj.edges());
                }
            }
        }
        Ok(())
    }

    /// Current reference count of a live object.
    pub fn refcount(&self, handle: ObjRef) -> Result<u32> {
        Ok(self.slot(handle)?.refcount)
    }

    /// Whether the handle still refers to a live object.
    #[must_use]
    pub fn is_live(&self, handle: ObjRef) -> bool {
        self.slot(handle).is_ok()
    }

    /// Whether the object is registered with the cycle collector.
    pub fn is_tracked(&self, handle: ObjRef) -> Result<bool> {
        Ok(self.slot(handle)?.tracked)
    }

    /// Reports each reference the object owns to the visitor.
    pub fn traverse(&self, handle: ObjRef, visit: &mut dyn FnMut(ObjRef)) -> Result<()> {
        for edge in self.get(handle)?.edges() {
            visit(edge);
        }
        Ok(())
    }

    /// Hashes a value through its kind's hash slot.
    pub fn hash_of(&self, handle: ObjRef) -> Result<u64> {
        self.get(handle)?.hash(self)
    }

    /// Default textual representation of a value.
    pub fn repr_of(&self, handle: ObjRef) -> Result<String> {
        self.get(handle)?.repr(self)
    }

    /// String conversion: string contents for strings, repr otherwise.
    pub fn display_of(&self, handle: ObjRef) -> Result<String> {
        if let Some(s) = self.downcast::<StrValue>(handle)? {
            return Ok(s.value().to_owned());
        }
        self.repr_of(handle)
    }

    /// Rich comparison with the deferral discipline.
    ///
    /// Asks the left operand first; on `NotApplicable` retries the
    /// right operand with the reflected operator. If both decline,
    /// equality operators fall back to identity and ordering operators
    /// stay undecided.
    pub fn compare(&self, a: ObjRef, b: ObjRef, op: CompareOp) -> Result<Compared> {
        if let Compared::Decided(value) = self.get(a)?.compare(self, b, op)? {
            return Ok(Compared::Decided(value));
        }
        if let Compared::Decided(value) = self.get(b)?.compare(self, a, op.reflected())? {
            return Ok(Compared::Decided(value));
        }
        Ok(op.decide_equality(a == b))
    }

    /// Equality judgment between two values.
    pub fn values_equal(&self, a: ObjRef, b: ObjRef) -> Result<bool> {
        match self.compare(a, b, CompareOp::Eq)? {
            Compared::Decided(value) => Ok(value),
            Compared::NotApplicable => Ok(a == b),
        }
    }

    /// Reads a named attribute; absence is `Ok(None)`, not an error.
    pub fn lookup_attr(&self, handle: ObjRef, name: &str) -> Result<Option<ObjRef>> {
        self.get(handle)?.attr(self, name)
    }

    /// Reads a named attribute, treating absence as an error.
    pub fn getattr(&self, handle: ObjRef, name: &str) -> Result<ObjRef> {
        match self.lookup_attr(handle, name)? {
            Some(value) => Ok(value),
            None => {
                let type_name = self.get(handle)?.type_name().to_owned();
                Err(Error::attribute_error(type_name, name))
            }
        }
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
