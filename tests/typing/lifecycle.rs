//! Integration tests for Optional construction and ownership
//!
//! Ownership transfer, destruction, traversal, attribute surface, and
//! the allocation-failure path.

use nullable_foundation::kinds::ClassValue;
use nullable_foundation::{ErrorKind, Heap};
use nullable_typing::{
    OPTIONAL_TYPE_NAME, OptionalAlias, instance_check, make_optional, subclass_check,
};

// =============================================================================
// Ownership
// =============================================================================

#[test]
fn construction_transfers_ownership() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    heap.acquire(int).unwrap();
    assert_eq!(heap.refcount(int).unwrap(), 2);

    // One of the two references now belongs to the Optional.
    let opt = make_optional(&mut heap, int).unwrap();
    assert_eq!(heap.refcount(int).unwrap(), 2);
    assert_eq!(heap.refcount(opt).unwrap(), 1);

    // Destroying the Optional releases exactly one reference.
    heap.release(opt).unwrap();
    assert!(!heap.is_live(opt));
    assert!(heap.is_live(int));
    assert_eq!(heap.refcount(int).unwrap(), 1);
}

#[test]
fn destruction_can_cascade_to_wrapped() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    let opt = make_optional(&mut heap, int).unwrap();

    // The Optional held the only reference to the wrapped type.
    heap.release(opt).unwrap();
    assert!(!heap.is_live(int));
}

#[test]
fn allocation_failure_releases_the_input() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    heap.set_capacity(Some(heap.live_count()));

    let err = make_optional(&mut heap, int).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::HeapExhausted { .. }));
    // The caller retains no surviving handle.
    assert!(!heap.is_live(int));
}

#[test]
fn allocation_failure_with_shared_input_drops_one_reference() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    heap.acquire(int).unwrap();
    heap.set_capacity(Some(heap.live_count()));

    assert!(make_optional(&mut heap, int).is_err());
    assert!(heap.is_live(int));
    assert_eq!(heap.refcount(int).unwrap(), 1);
}

// =============================================================================
// Cycle-Collector Cooperation
// =============================================================================

#[test]
fn optional_is_tracked() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    let opt = make_optional(&mut heap, int).unwrap();
    assert!(heap.is_tracked(opt).unwrap());
}

#[test]
fn wrapped_is_the_sole_traversal_edge() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    let opt = make_optional(&mut heap, int).unwrap();

    let mut seen = Vec::new();
    heap.traverse(opt, &mut |edge| seen.push(edge)).unwrap();
    assert_eq!(seen, vec![int]);
}

// =============================================================================
// Attribute Surface
// =============================================================================

#[test]
fn type_name_is_registered() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    let opt = make_optional(&mut heap, int).unwrap();
    assert_eq!(heap.get(opt).unwrap().type_name(), OPTIONAL_TYPE_NAME);
}

#[test]
fn args_attribute_is_the_wrapped_handle() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    let opt = make_optional(&mut heap, int).unwrap();

    let args = heap.getattr(opt, "__args__").unwrap();
    assert_eq!(args, int);
    // Shared reference semantics: the read does not add a reference.
    assert_eq!(heap.refcount(int).unwrap(), 1);
    let alias = heap.downcast::<OptionalAlias>(opt).unwrap().unwrap();
    assert_eq!(alias.wrapped(), int);
}

#[test]
fn other_attributes_fall_through_to_generic_lookup() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    let opt = make_optional(&mut heap, int).unwrap();
    assert!(heap.lookup_attr(opt, "__origin__").unwrap().is_none());
    assert!(matches!(
        heap.getattr(opt, "__origin__").unwrap_err().kind,
        ErrorKind::AttributeError { .. }
    ));
}

// =============================================================================
// Unresolved Method Surface
// =============================================================================

#[test]
fn instance_check_fails_fast() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    let opt = make_optional(&mut heap, int).unwrap();
    assert!(matches!(
        instance_check(&heap, opt, int).unwrap_err().kind,
        ErrorKind::Unimplemented("__instancecheck__")
    ));
}

#[test]
fn subclass_check_fails_fast() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    let opt = make_optional(&mut heap, int).unwrap();
    assert!(matches!(
        subclass_check(&heap, opt, int).unwrap_err().kind,
        ErrorKind::Unimplemented("__subclasscheck__")
    ));
}
