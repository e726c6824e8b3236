use super::*;
use brine_ir::{Expr, Pos, Stmt, StmtKind};
use pretty_assertions::assert_eq;

fn point_layout() -> Rc<[Param]> {
    Rc::from(vec![
        Param {
            name: Name::new("x"),
            ty: TypeName::new("num"),
            is_ref: false,
        },
        Param {
            name: Name::new("y"),
            ty: TypeName::new("num"),
            is_ref: false,
        },
    ])
}

fn empty_function() -> Rc<FunctionDef> {
    Rc::new(FunctionDef {
        params: Vec::new(),
        return_type: TypeName::var(),
        returns_ref: false,
        captures: false,
        body: Stmt::new(StmtKind::Expr(Expr::default()), Pos::new(1)),
        pos: Pos::new(1),
    })
}

#[test]
fn test_is_integer() {
    assert!(Value::Num(3.0).is_integer());
    assert!(Value::Num(-12.0).is_integer());
    assert!(!Value::Num(3.5).is_integer());
    assert!(!Value::Num(f64::INFINITY).is_integer());
    assert!(!Value::str("3").is_integer());
}

#[test]
fn test_is_lvalue() {
    assert!(Value::Ident(Name::new("x")).is_lvalue());
    assert!(!Value::Num(1.0).is_lvalue());
    assert!(!Value::Ref(HeapIndex::new(0)).is_lvalue());
}

#[test]
fn test_copy_array_is_distinct() {
    let original = Value::array(
        TypeName::new("int[]"),
        vec![Value::array(TypeName::new("int"), vec![Value::Num(1.0)])],
    );
    let mut copied = original.copy();
    assert_eq!(copied, original);

    if let Value::Array(outer) = &mut copied {
        if let Value::Array(inner) = &mut outer.elements[0] {
            inner.elements.push(Value::Num(2.0));
        }
    }
    assert_ne!(copied, original);
}

#[test]
fn test_copy_object_is_distinct() {
    let original = Value::Object(ObjectValue {
        class_name: Name::new("Point"),
        layout: point_layout(),
        members: vec![
            Value::Num(1.0),
            Value::array(TypeName::new("int"), vec![Value::Num(2.0)]),
        ],
    });
    let mut copied = original.copy();
    assert_eq!(copied, original);

    if let Value::Object(object) = &mut copied {
        object.members[0] = Value::Num(9.0);
        if let Value::Array(inner) = &mut object.members[1] {
            inner.elements.push(Value::Num(3.0));
        }
    }
    assert_ne!(copied, original);
    match &original {
        Value::Object(object) => {
            assert_eq!(object.members[0], Value::Num(1.0));
            assert_eq!(
                object.members[1],
                Value::array(TypeName::new("int"), vec![Value::Num(2.0)])
            );
        }
        _ => panic!("expected an object"),
    }
}

#[test]
fn test_as_int_range() {
    assert_eq!(Value::Num(-7.0).as_int(), Some(-7));
    assert_eq!(Value::Num(-(2f64.powi(63))).as_int(), Some(i64::MIN));
    assert_eq!(Value::Num(2f64.powi(63)).as_int(), None);
    assert_eq!(Value::Num(1e84).as_int(), None);
    assert_eq!(Value::Num(-1e84).as_int(), None);
    assert_eq!(Value::Num(0.5).as_int(), None);
}

#[test]
fn test_copy_function_shares_definition() {
    let func = Value::Function(FunctionValue::new(empty_function()));
    let copied = func.copy();
    match (&func, &copied) {
        (Value::Function(a), Value::Function(b)) => assert!(Rc::ptr_eq(&a.def, &b.def)),
        _ => panic!("expected functions"),
    }
}

#[test]
fn test_display_scalars() {
    let heap = Heap::new();
    assert_eq!(Value::Num(8.0).display(&heap).to_string(), "8");
    assert_eq!(Value::Num(-0.0).display(&heap).to_string(), "0");
    assert_eq!(Value::Num(2.5).display(&heap).to_string(), "2.5");
    assert_eq!(Value::str("hi").display(&heap).to_string(), "hi");
    assert_eq!(Value::Bool(false).display(&heap).to_string(), "false");
    assert_eq!(Value::Void.display(&heap).to_string(), "void");
}

#[test]
fn test_display_through_heap() {
    let mut heap = Heap::new();
    let xs = heap.allocate(Value::array(
        TypeName::new("int"),
        vec![Value::Num(1.0), Value::Num(2.0)],
    ));
    let point = Value::Object(ObjectValue {
        class_name: Name::new("Point"),
        layout: point_layout(),
        members: vec![Value::Num(1.0), Value::Ref(xs)],
    });
    assert_eq!(
        point.display(&heap).to_string(),
        "Point { x: 1, y: [1, 2] }"
    );
}

#[test]
fn test_display_cycle_terminates() {
    let mut heap = Heap::new();
    let a = heap.allocate(Value::Void);
    *heap.deref_mut(a).unwrap() = Value::array(TypeName::new("var"), vec![Value::Ref(a)]);
    assert_eq!(Value::Ref(a).display(&heap).to_string(), "[<cycle #0>]");
}

#[test]
fn test_object_member_lookup() {
    let mut object = ObjectValue {
        class_name: Name::new("Point"),
        layout: point_layout(),
        members: vec![Value::Num(1.0), Value::Num(2.0)],
    };
    assert_eq!(object.get("y"), Some(&Value::Num(2.0)));
    assert_eq!(object.get("z"), None);
    *object.get_mut("x").unwrap() = Value::Num(9.0);
    assert_eq!(object.members[0], Value::Num(9.0));
}
