//! Builtin value kinds the substrate provides as collaborators.
//!
//! These cover the values the Optional component touches transiently:
//! the `None` and `Ellipsis` singletons, hashable scalars, tuples,
//! class-like values with `__module__`/`__qualname__` attributes,
//! generic aliases, and a duck-typed foreign object kind used to model
//! values from ecosystems the runtime does not itself define.

use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::handle::ObjRef;
use crate::heap::Heap;
use crate::object::{CompareOp, Compared, ManagedObject};

fn stable_hash<T: Hash + ?Sized>(tag: &str, value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    value.hash(&mut hasher);
    hasher.finish()
}

/// Renders a value compactly for use inside alias reprs: classes by
/// their qualified name, everything else by its default repr.
fn short_name(heap: &Heap, handle: ObjRef) -> Result<String> {
    if let Some(class) = heap.downcast::<ClassValue>(handle)? {
        return heap.display_of(class.qualname());
    }
    heap.repr_of(handle)
}

/// The `None` singleton's kind.
#[derive(Debug)]
pub struct NoneValue;

impl ManagedObject for NoneValue {
    fn type_name(&self) -> &str {
        "NoneType"
    }

    fn hash(&self, _heap: &Heap) -> Result<u64> {
        Ok(stable_hash("none", &()))
    }

    fn repr(&self, _heap: &Heap) -> Result<String> {
        Ok("None".to_owned())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The `Ellipsis` singleton's kind.
#[derive(Debug)]
pub struct EllipsisValue;

impl ManagedObject for EllipsisValue {
    fn type_name(&self) -> &str {
        "ellipsis"
    }

    fn hash(&self, _heap: &Heap) -> Result<u64> {
        Ok(stable_hash("ellipsis", &()))
    }

    fn repr(&self, _heap: &Heap) -> Result<String> {
        Ok("Ellipsis".to_owned())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 64-bit signed integer value.
#[derive(Debug)]
pub struct IntValue(i64);

impl IntValue {
    /// Creates an integer value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the integer.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl ManagedObject for IntValue {
    fn type_name(&self) -> &str {
        "int"
    }

    fn hash(&self, _heap: &Heap) -> Result<u64> {
        Ok(stable_hash("int", &self.0))
    }

    fn repr(&self, _heap: &Heap) -> Result<String> {
        Ok(self.0.to_string())
    }

    fn compare(&self, heap: &Heap, other: ObjRef, op: CompareOp) -> Result<Compared> {
        let Some(other) = heap.downcast::<Self>(other)? else {
            return Ok(Compared::NotApplicable);
        };
        let decided = match op {
            CompareOp::Eq => self.0 == other.0,
            CompareOp::Ne => self.0 != other.0,
            CompareOp::Lt => self.0 < other.0,
            CompareOp::Le => self.0 <= other.0,
            CompareOp::Gt => self.0 > other.0,
            CompareOp::Ge => self.0 >= other.0,
        };
        Ok(Compared::Decided(decided))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Immutable string value.
#[derive(Debug)]
pub struct StrValue(Arc<str>);

impl StrValue {
    /// Creates a string value.
    #[must_use]
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    /// Returns the string contents.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ManagedObject for StrValue {
    fn type_name(&self) -> &str {
        "str"
    }

    fn hash(&self, _heap: &Heap) -> Result<u64> {
        Ok(stable_hash("str", &*self.0))
    }

    fn repr(&self, _heap: &Heap) -> Result<String> {
        Ok(format!("'{}'", self.0))
    }

    fn compare(&self, heap: &Heap, other: ObjRef, op: CompareOp) -> Result<Compared> {
        let Some(other) = heap.downcast::<Self>(other)? else {
            return Ok(Compared::NotApplicable);
        };
        let decided = match op {
            CompareOp::Eq => self.0 == other.0,
            CompareOp::Ne => self.0 != other.0,
            CompareOp::Lt => self.0 < other.0,
            CompareOp::Le => self.0 <= other.0,
            CompareOp::Gt => self.0 > other.0,
            CompareOp::Ge => self.0 >= other.0,
        };
        Ok(Compared::Decided(decided))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Fixed-length sequence of owned handles.
///
/// Used as the `__args__` payload of alias kinds and as the transient
/// sequence form during comparisons.
#[derive(Debug)]
pub struct TupleValue(Vec<ObjRef>);

impl TupleValue {
    /// Creates a tuple owning the given handles.
    #[must_use]
    pub fn new(items: Vec<ObjRef>) -> Self {
        Self(items)
    }

    /// Returns the element handles.
    #[must_use]
    pub fn items(&self) -> &[ObjRef] {
        &self.0
    }
}

impl ManagedObject for TupleValue {
    fn type_name(&self) -> &str {
        "tuple"
    }

    fn edges(&self) -> Vec<ObjRef> {
        self.0.clone()
    }

    fn hash(&self, heap: &Heap) -> Result<u64> {
        let mut element_hashes = Vec::with_capacity(self.0.len());
        for item in &self.0 {
            element_hashes.push(heap.hash_of(*item)?);
        }
        Ok(stable_hash("tuple", &element_hashes))
    }

    fn repr(&self, heap: &Heap) -> Result<String> {
        let mut parts = Vec::with_capacity(self.0.len());
        for item in &self.0 {
            parts.push(heap.repr_of(*item)?);
        }
        if parts.len() == 1 {
            Ok(format!("({},)", parts[0]))
        } else {
            Ok(format!("({})", parts.join(", ")))
        }
    }

    fn compare(&self, heap: &Heap, other: ObjRef, op: CompareOp) -> Result<Compared> {
        if !op.is_equality() {
            return Ok(Compared::NotApplicable);
        }
        let Some(other) = heap.downcast::<Self>(other)? else {
            return Ok(Compared::NotApplicable);
        };
        if self.0.len() != other.0.len() {
            return Ok(op.decide_equality(false));
        }
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            if !heap.values_equal(*a, *b)? {
                return Ok(op.decide_equality(false));
            }
        }
        Ok(op.decide_equality(true))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Class-like value: a qualified name plus an optional module string.
///
/// Exposes `__qualname__` and `__module__` as attributes; both handles
/// are owned. A class with no module attribute models the "module
/// absent" duck-typing branch; a class whose module is the `None`
/// singleton models the "module is none" branch.
#[derive(Debug)]
pub struct ClassValue {
    module: Option<ObjRef>,
    qualname: ObjRef,
}

impl ClassValue {
    /// Creates a class value, taking ownership of the given handles.
    #[must_use]
    pub const fn new(module: Option<ObjRef>, qualname: ObjRef) -> Self {
        Self { module, qualname }
    }

    /// Allocates a class with freshly allocated name strings.
    pub fn alloc(heap: &mut Heap, module: Option<&str>, qualname: &str) -> Result<ObjRef> {
        let qualname = heap.alloc(StrValue::new(qualname))?;
        let module = match module {
            Some(module) => match heap.alloc(StrValue::new(module)) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    heap.release(qualname)?;
                    return Err(err);
                }
            },
            None => None,
        };
        match heap.alloc(Self::new(module, qualname)) {
            Ok(handle) => Ok(handle),
            Err(err) => {
                heap.release(qualname)?;
                if let Some(module) = module {
                    heap.release(module)?;
                }
                Err(err)
            }
        }
    }

    /// Allocates a class in the `builtins` module.
    pub fn builtin(heap: &mut Heap, qualname: &str) -> Result<ObjRef> {
        Self::alloc(heap, Some("builtins"), qualname)
    }

    /// Returns the qualified name handle.
    #[must_use]
    pub const fn qualname(&self) -> ObjRef {
        self.qualname
    }

    /// Returns the module handle, if the attribute exists.
    #[must_use]
    pub const fn module(&self) -> Option<ObjRef> {
        self.module
    }
}

impl ManagedObject for ClassValue {
    fn type_name(&self) -> &str {
        "type"
    }

    fn edges(&self) -> Vec<ObjRef> {
        let mut edges = Vec::with_capacity(2);
        if let Some(module) = self.module {
            edges.push(module);
        }
        edges.push(self.qualname);
        edges
    }

    fn hash(&self, heap: &Heap) -> Result<u64> {
        let qualname = heap.hash_of(self.qualname)?;
        let module = match self.module {
            Some(module) => Some(heap.hash_of(module)?),
            None => None,
        };
        Ok(stable_hash("type", &(module, qualname)))
    }

    fn repr(&self, heap: &Heap) -> Result<String> {
        let qualname = heap.display_of(self.qualname)?;
        match self.module {
            Some(module) if module != heap.none() => {
                Ok(format!("<class '{}.{qualname}'>", heap.display_of(module)?))
            }
            _ => Ok(format!("<class '{qualname}'>")),
        }
    }

    fn compare(&self, heap: &Heap, other: ObjRef, op: CompareOp) -> Result<Compared> {
        if !op.is_equality() {
            return Ok(Compared::NotApplicable);
        }
        let Some(other) = heap.downcast::<Self>(other)? else {
            return Ok(Compared::NotApplicable);
        };
        let modules_equal = match (self.module, other.module) {
            (Some(a), Some(b)) => heap.values_equal(a, b)?,
            (None, None) => true,
            _ => false,
        };
        let equal = modules_equal && heap.values_equal(self.qualname, other.qualname)?;
        Ok(op.decide_equality(equal))
    }

    fn attr(&self, _heap: &Heap, name: &str) -> Result<Option<ObjRef>> {
        match name {
            "__qualname__" => Ok(Some(self.qualname)),
            "__module__" => Ok(self.module),
            _ => Ok(None),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Generic alias value: an origin plus an argument tuple.
///
/// Exposes `__origin__` and `__args__`, the shape that rendering code
/// duck-types as "some generic alias" and leaves to its own repr.
#[derive(Debug)]
pub struct GenericAliasValue {
    origin: ObjRef,
    args: ObjRef,
}

impl GenericAliasValue {
    /// Creates a generic alias, taking ownership of both handles.
    #[must_use]
    pub const fn new(origin: ObjRef, args: ObjRef) -> Self {
        Self { origin, args }
    }

    /// Returns the origin handle.
    #[must_use]
    pub const fn origin(&self) -> ObjRef {
        self.origin
    }

    /// Returns the argument tuple handle.
    #[must_use]
    pub const fn args(&self) -> ObjRef {
        self.args
    }
}

impl ManagedObject for GenericAliasValue {
    fn type_name(&self) -> &str {
        "types.GenericAlias"
    }

    fn edges(&self) -> Vec<ObjRef> {
        vec![self.origin, self.args]
    }

    fn hash(&self, heap: &Heap) -> Result<u64> {
        let origin = heap.hash_of(self.origin)?;
        let args = heap.hash_of(self.args)?;
        Ok(stable_hash("types.GenericAlias", &(origin, args)))
    }

    fn repr(&self, heap: &Heap) -> Result<String> {
        let origin = short_name(heap, self.origin)?;
        let Some(args) = heap.downcast::<TupleValue>(self.args)? else {
            return Ok(format!("{origin}[{}]", heap.repr_of(self.args)?));
        };
        let mut parts = Vec::with_capacity(args.items().len());
        for item in args.items() {
            parts.push(short_name(heap, *item)?);
        }
        Ok(format!("{origin}[{}]", parts.join(", ")))
    }

    fn attr(&self, _heap: &Heap, name: &str) -> Result<Option<ObjRef>> {
        match name {
            "__origin__" => Ok(Some(self.origin)),
            "__args__" => Ok(Some(self.args)),
            _ => Ok(None),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An attribute slot on a [`ForeignValue`].
#[derive(Debug)]
pub enum AttrSlot {
    /// The attribute yields this handle (owned by the foreign value).
    Value(ObjRef),
    /// Reading the attribute fails with an attribute lookup error.
    ///
    /// Distinct from the attribute being absent; models descriptors
    /// whose lookup itself raises.
    Poisoned,
}

/// Duck-typed value from an ecosystem the runtime does not define.
///
/// Carries an arbitrary internal type name and a flat attribute table.
/// Protocol checks against foreign values only ever inspect the type
/// name and read attributes, so this one kind can stand in for any
/// foreign shape (including the typing ecosystem's union aliases).
#[derive(Debug)]
pub struct ForeignValue {
    type_name: String,
    attrs: Vec<(String, AttrSlot)>,
}

impl ForeignValue {
    /// Creates a foreign value with the given internal type name.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attrs: Vec::new(),
        }
    }

    /// Adds an attribute, taking ownership of the handle.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, handle: ObjRef) -> Self {
        self.attrs.push((name.into(), AttrSlot::Value(handle)));
        self
    }

    /// Adds an attribute whose lookup fails.
    #[must_use]
    pub fn with_poisoned_attr(mut self, name: impl Into<String>) -> Self {
        self.attrs.push((name.into(), AttrSlot::Poisoned));
        self
    }
}

impl ManagedObject for ForeignValue {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn edges(&self) -> Vec<ObjRef> {
        self.attrs
            .iter()
            .filter_map(|(_, slot)| match slot {
                AttrSlot::Value(handle) => Some(*handle),
                AttrSlot::Poisoned => None,
            })
            .collect()
    }

    fn repr(&self, _heap: &Heap) -> Result<String> {
        Ok(format!("<{} object>", self.type_name))
    }

    fn attr(&self, _heap: &Heap, name: &str) -> Result<Option<ObjRef>> {
        for (attr_name, slot) in &self.attrs {
            if attr_name == name {
                return match slot {
                    AttrSlot::Value(handle) => Ok(Some(*handle)),
                    AttrSlot::Poisoned => {
                        Err(Error::attribute_error(self.type_name.clone(), name))
                    }
                };
            }
        }
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
