//! Integration tests for Optional rendering
//!
//! The `?` sigil plus the four-case item dispatch: ellipsis, generic
//! aliases, class-like values, and the default-repr fallback.

use nullable_foundation::kinds::{
    ClassValue, ForeignValue, GenericAliasValue, IntValue, StrValue, TupleValue,
};
use nullable_foundation::Heap;
use nullable_typing::make_optional;

#[test]
fn ellipsis_renders_literally() {
    let mut heap = Heap::new();
    let ellipsis = heap.acquire(heap.ellipsis()).unwrap();
    let opt = make_optional(&mut heap, ellipsis).unwrap();
    assert_eq!(heap.repr_of(opt).unwrap(), "?...");
}

#[test]
fn builtin_class_elides_its_module() {
    let mut heap = Heap::new();
    let foo = ClassValue::builtin(&mut heap, "Foo").unwrap();
    let opt = make_optional(&mut heap, foo).unwrap();
    assert_eq!(heap.repr_of(opt).unwrap(), "?Foo");
}

#[test]
fn qualified_class_keeps_its_module() {
    let mut heap = Heap::new();
    let bar = ClassValue::alloc(&mut heap, Some("pkg"), "Bar").unwrap();
    let opt = make_optional(&mut heap, bar).unwrap();
    assert_eq!(heap.repr_of(opt).unwrap(), "?pkg.Bar");
}

#[test]
fn class_without_module_falls_back_to_repr() {
    let mut heap = Heap::new();
    let bar = ClassValue::alloc(&mut heap, None, "Bar").unwrap();
    let opt = make_optional(&mut heap, bar).unwrap();
    assert_eq!(heap.repr_of(opt).unwrap(), "?<class 'Bar'>");
}

#[test]
fn class_with_none_module_falls_back_to_repr() {
    let mut heap = Heap::new();
    let qualname = heap.alloc(StrValue::new("Bar")).unwrap();
    let none = heap.acquire(heap.none()).unwrap();
    let bar = heap.alloc(ClassValue::new(Some(none), qualname)).unwrap();
    let opt = make_optional(&mut heap, bar).unwrap();
    assert_eq!(heap.repr_of(opt).unwrap(), "?<class 'Bar'>");
}

#[test]
fn class_with_non_string_module_is_formatted_anyway() {
    let mut heap = Heap::new();
    let qualname = heap.alloc(StrValue::new("Bar")).unwrap();
    let module = heap.alloc(IntValue::new(7)).unwrap();
    let bar = heap.alloc(ClassValue::new(Some(module), qualname)).unwrap();
    let opt = make_optional(&mut heap, bar).unwrap();
    assert_eq!(heap.repr_of(opt).unwrap(), "?7.Bar");
}

#[test]
fn generic_alias_keeps_its_own_repr() {
    let mut heap = Heap::new();
    let list = ClassValue::builtin(&mut heap, "list").unwrap();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    let args = heap.alloc(TupleValue::new(vec![int])).unwrap();
    let alias = heap.alloc(GenericAliasValue::new(list, args)).unwrap();
    let opt = make_optional(&mut heap, alias).unwrap();
    assert_eq!(heap.repr_of(opt).unwrap(), "?list[int]");
}

#[test]
fn plain_value_falls_back_to_repr() {
    let mut heap = Heap::new();
    let n = heap.alloc(IntValue::new(42)).unwrap();
    let opt = make_optional(&mut heap, n).unwrap();
    assert_eq!(heap.repr_of(opt).unwrap(), "?42");
}

#[test]
fn nested_optional_renders_through_the_fallback() {
    let mut heap = Heap::new();
    let int = ClassValue::builtin(&mut heap, "int").unwrap();
    let inner = make_optional(&mut heap, int).unwrap();
    let outer = make_optional(&mut heap, inner).unwrap();
    assert_eq!(heap.repr_of(outer).unwrap(), "??int");
}

#[test]
fn attribute_failure_during_rendering_propagates() {
    let mut heap = Heap::new();
    let broken = heap
        .alloc(ForeignValue::new("mystery").with_poisoned_attr("__qualname__"))
        .unwrap();
    let opt = make_optional(&mut heap, broken).unwrap();
    assert!(heap.repr_of(opt).is_err());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn repr_always_starts_with_the_sigil(n in any::<i64>()) {
            let mut heap = Heap::new();
            let value = heap.alloc(IntValue::new(n)).unwrap();
            let opt = make_optional(&mut heap, value).unwrap();
            let repr = heap.repr_of(opt).unwrap();
            prop_assert!(repr.starts_with('?'));
            prop_assert_eq!(repr, format!("?{n}"));
        }
    }
}
