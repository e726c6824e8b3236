use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_type_name_arrays() {
    let int = TypeName::new("int");
    assert!(!int.is_array());
    assert_eq!(int.element_type(), None);

    let matrix = TypeName::array_of(&TypeName::array_of(&int));
    assert_eq!(matrix.as_str(), "int[][]");
    assert!(matrix.is_array());
    assert_eq!(matrix.element_type(), Some(TypeName::new("int[]")));
}

#[test]
fn test_decl_flags() {
    let decl = Declaration {
        ty: TypeName::new("int[]"),
        name: Name::new("xs"),
        flags: DeclFlags::CONST | DeclFlags::ALLOC,
        init: None,
    };
    assert!(decl.is_constant());
    assert!(decl.is_allocated());
    assert!(!decl.is_reference());
}

#[test]
fn test_operator_precedence_order() {
    assert!(AssignOp::PRECEDENCE < BinaryOp::Or.precedence());
    assert!(BinaryOp::Or.precedence() < BinaryOp::And.precedence());
    assert!(BinaryOp::BitXor.precedence() < BinaryOp::BitAnd.precedence());
    assert!(BinaryOp::Eq.precedence() < BinaryOp::Lt.precedence());
    assert!(BinaryOp::Shl.precedence() < BinaryOp::Add.precedence());
    assert!(BinaryOp::Add.precedence() < BinaryOp::Mod.precedence());
    assert!(BinaryOp::Mul.precedence() < UnaryOp::PRECEDENCE);
}

#[test]
fn test_compound_assign_maps_to_binary() {
    assert_eq!(AssignOp::Assign.binary(), None);
    assert_eq!(AssignOp::Add.binary(), Some(BinaryOp::Add));
    assert_eq!(AssignOp::BitXor.binary(), Some(BinaryOp::BitXor));
    assert_eq!(AssignOp::Mod.to_string(), "%=");
}
