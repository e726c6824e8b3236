use super::*;
use std::collections::HashMap;

#[test]
fn test_name_equality_with_str() {
    let name = Name::new("counter");
    assert_eq!(name, "counter");
    assert_eq!(name.as_str(), "counter");
}

#[test]
fn test_name_clone_shares_text() {
    let a = Name::new("x");
    let b = a.clone();
    assert!(Rc::ptr_eq(&a.0, &b.0));
}

#[test]
fn test_name_borrow_lookup() {
    let mut map = HashMap::new();
    map.insert(Name::new("argv"), 7);
    assert_eq!(map.get("argv").copied(), Some(7));
    assert_eq!(map.get("missing").copied(), None);
}

#[test]
fn test_name_display() {
    assert_eq!(Name::from("Point").to_string(), "Point");
    assert_eq!(format!("{:?}", Name::from("p")), "\"p\"");
}
