use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_allocate_appends_stable_indices() {
    let mut heap = Heap::new();
    let a = heap.allocate(Value::Num(1.0));
    let b = heap.allocate(Value::Num(2.0));
    assert_eq!(a.get(), 0);
    assert_eq!(b.get(), 1);
    assert_eq!(heap.deref(a), Ok(&Value::Num(1.0)));
    assert_eq!(heap.deref(b), Ok(&Value::Num(2.0)));
    assert_eq!(heap.live_count(), 2);
    assert_eq!(heap.capacity(), 2);
}

#[test]
fn test_free_then_reuse() {
    let mut heap = Heap::new();
    let a = heap.allocate(Value::Num(1.0));
    let b = heap.allocate(Value::Num(2.0));
    assert!(heap.free(a));
    assert_eq!(heap.live_count(), 1);

    let c = heap.allocate(Value::Bool(true));
    assert_eq!(c, a);
    assert_eq!(heap.deref(c), Ok(&Value::Bool(true)));
    assert_eq!(heap.deref(b), Ok(&Value::Num(2.0)));
    assert_eq!(heap.capacity(), 2);
}

#[test]
fn test_double_free_is_ignored() {
    let mut heap = Heap::new();
    let a = heap.allocate(Value::Void);
    assert!(heap.free(a));
    assert!(!heap.free(a));
    let b = heap.allocate(Value::Num(1.0));
    let c = heap.allocate(Value::Num(2.0));
    assert_ne!(b, c);
}

#[test]
fn test_deref_errors_are_distinct() {
    let mut heap = Heap::new();
    let a = heap.allocate(Value::Void);
    heap.free(a);

    let null = heap.deref(a).unwrap_err();
    assert_eq!(null, HeapError::NullPointer(a));
    assert_eq!(null.to_string(), "dereferencing a null pointer");

    let missing = heap.deref(HeapIndex::new(7)).unwrap_err();
    assert_eq!(missing.to_string(), "dereferencing a value not on the heap");
}

#[test]
fn test_deref_mut_writes_in_place() {
    let mut heap = Heap::new();
    let a = heap.allocate(Value::Num(1.0));
    *heap.deref_mut(a).unwrap() = Value::Num(5.0);
    assert_eq!(heap.deref(a), Ok(&Value::Num(5.0)));
}

#[test]
fn test_terminal_follows_chain() {
    let mut heap = Heap::new();
    let data = heap.allocate(Value::Num(1.0));
    let mid = heap.allocate(Value::Ref(data));
    let top = heap.allocate(Value::Ref(mid));
    assert_eq!(heap.terminal(top), Ok(data));
}

#[test]
fn test_terminal_detects_cycle() {
    let mut heap = Heap::new();
    let a = heap.allocate(Value::Void);
    let b = heap.allocate(Value::Ref(a));
    *heap.deref_mut(a).unwrap() = Value::Ref(b);
    assert!(heap.terminal(a).is_err());
}
