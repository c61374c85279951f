//! Integration tests for substrate errors
//!
//! Error construction, kinds, and display formatting.

use nullable_foundation::{Error, ErrorKind, ObjRef};

#[test]
fn stale_handle_mentions_the_handle() {
    let err = Error::stale_handle(ObjRef::new(7, 2));
    let msg = format!("{err}");
    assert!(msg.contains("7v2"));
}

#[test]
fn heap_exhausted_mentions_the_limit() {
    let err = Error::heap_exhausted(128);
    assert!(format!("{err}").contains("128"));
}

#[test]
fn unhashable_mentions_the_kind() {
    let err = Error::unhashable("types.Optional");
    assert!(format!("{err}").contains("types.Optional"));
}

#[test]
fn attribute_error_mentions_both_names() {
    let err = Error::attribute_error("_GenericAlias", "__args__");
    let msg = format!("{err}");
    assert!(msg.contains("_GenericAlias"));
    assert!(msg.contains("__args__"));
}

#[test]
fn type_mismatch_mentions_both_kinds() {
    let err = Error::type_mismatch("tuple", "int");
    let msg = format!("{err}");
    assert!(msg.contains("tuple"));
    assert!(msg.contains("int"));
}

#[test]
fn unimplemented_carries_operation_name() {
    let err = Error::unimplemented("__subclasscheck__");
    assert!(matches!(
        err.kind,
        ErrorKind::Unimplemented("__subclasscheck__")
    ));
    assert!(format!("{err}").contains("__subclasscheck__"));
}
