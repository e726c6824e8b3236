use super::*;
use brine_ir::{AssignOp, BinaryOp, DeclFlags, ExprItem, StmtKind, UnaryOp};
use pretty_assertions::assert_eq;

fn parse_ok(source: &str) -> Program {
    parse_source(source, "test.brn").unwrap()
}

/// Compact rendering of a postfix sequence for assertions.
fn render(items: &[ExprItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            ExprItem::Num(n) => n.to_string(),
            ExprItem::Str(s) => format!("{s:?}"),
            ExprItem::Bool(b) => b.to_string(),
            ExprItem::Ident(name) => name.to_string(),
            ExprItem::Function(_) => "<func>".to_string(),
            ExprItem::Array(elems) => {
                let inner: Vec<String> = elems.iter().map(|e| render(&e.items)).collect();
                format!("[{}]", inner.join(", "))
            }
            ExprItem::Binary(op) => op.to_string(),
            ExprItem::Unary(op) => format!("u{op}"),
            ExprItem::Assign(op) => op.to_string(),
            ExprItem::Member => ".".to_string(),
            ExprItem::Call(args) => {
                let inner: Vec<String> = args.iter().map(|e| render(&e.items)).collect();
                format!("call({})", inner.join(", "))
            }
            ExprItem::Index(index) => format!("index({})", render(&index.items)),
            ExprItem::Grouped(inner) => format!("({})", render(&inner.items)),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn single_expr(source: &str) -> String {
    let program = parse_ok(source);
    match &program.statements[0].kind {
        StmtKind::Expr(expr) => render(&expr.items),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn test_precedence_mul_over_add() {
    assert_eq!(single_expr("1 + 2 * 3;"), "1 2 3 * +");
}

#[test]
fn test_left_associative_subtraction() {
    assert_eq!(single_expr("10 - 4 - 3;"), "10 4 - 3 -");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(single_expr("a = b += 2;"), "a b 2 += =");
}

#[test]
fn test_parentheses_become_groups() {
    assert_eq!(single_expr("(1 + 2) * 3;"), "(1 2 +) 3 *");
}

#[test]
fn test_logical_and_bitwise_levels() {
    assert_eq!(single_expr("a || b && c | d ^ e & f;"), "a b c d e f & ^ | && ||");
    assert_eq!(single_expr("a == b < c << d;"), "a b c d << < ==");
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    assert_eq!(single_expr("-a * !b;"), "a u- b u! *");
    assert_eq!(single_expr("~~x;"), "x u~ u~");
}

#[test]
fn test_postfix_chain() {
    assert_eq!(
        single_expr("p.next.f(1, x + 2)[0];"),
        "p next . f . call(1, x 2 +) index(0)"
    );
}

#[test]
fn test_empty_call_and_array_literal() {
    assert_eq!(single_expr("f();"), "f call()");
    assert_eq!(single_expr("[1, \"a\", true];"), "[1, \"a\", true]");
}

#[test]
fn test_interpolation_call_on_string() {
    assert_eq!(single_expr("\"@0 and @1\"(a, b);"), "\"@0 and @1\" call(a, b)");
}

#[test]
fn test_declaration_flags_and_types() {
    let program = parse_ok("const alloc int[] xs = [1]; ref int[] ys = xs; num n;");
    let StmtKind::Decl(decl) = &program.statements[0].kind else {
        panic!("expected declaration");
    };
    assert_eq!(decl.ty.as_str(), "int[]");
    assert_eq!(decl.flags, DeclFlags::CONST | DeclFlags::ALLOC);
    assert!(decl.init.is_some());

    let StmtKind::Decl(decl) = &program.statements[1].kind else {
        panic!("expected declaration");
    };
    assert!(decl.is_reference());
    assert_eq!(decl.name, "ys");

    let StmtKind::Decl(decl) = &program.statements[2].kind else {
        panic!("expected declaration");
    };
    assert!(decl.init.is_none());
    assert_eq!(decl.flags, DeclFlags::empty());
}

#[test]
fn test_function_definition_sugar() {
    let program = parse_ok("func add(int a, ref int[] b) -> ref int[] { return b; }");
    let StmtKind::Decl(decl) = &program.statements[0].kind else {
        panic!("expected declaration");
    };
    assert_eq!(decl.ty.as_str(), "func");
    assert!(decl.is_constant());
    let init = decl.init.as_ref().unwrap();
    let ExprItem::Function(def) = &init.items[0] else {
        panic!("expected function literal");
    };
    assert_eq!(def.params.len(), 2);
    assert!(!def.params[0].is_ref);
    assert!(def.params[1].is_ref);
    assert_eq!(def.return_type.as_str(), "int[]");
    assert!(def.returns_ref);
    assert!(!def.captures);
}

#[test]
fn test_closure_literal_defaults_to_var() {
    let program = parse_ok("func f = closure func() { return x; };");
    let StmtKind::Decl(decl) = &program.statements[0].kind else {
        panic!("expected declaration");
    };
    let ExprItem::Function(def) = &decl.init.as_ref().unwrap().items[0] else {
        panic!("expected function literal");
    };
    assert!(def.captures);
    assert_eq!(def.return_type.as_str(), "var");
}

#[test]
fn test_class_definition() {
    let program = parse_ok("class Point { num x; num y; ref obj next; }");
    let StmtKind::Class(class) = &program.statements[0].kind else {
        panic!("expected class");
    };
    assert_eq!(class.name, "Point");
    let names: Vec<&str> = class.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y", "next"]);
    assert!(class.members[2].is_ref);
}

#[test]
fn test_set_member_and_set_index() {
    let program = parse_ok("p.q.x = 3; xs[i + 1] += 2;");
    match &program.statements[0].kind {
        StmtKind::SetMember {
            target,
            member,
            op,
            value,
        } => {
            assert_eq!(render(&target.items), "p q .");
            assert_eq!(member, "x");
            assert_eq!(*op, AssignOp::Assign);
            assert_eq!(render(&value.items), "3");
        }
        other => panic!("expected set-member, got {other:?}"),
    }
    match &program.statements[1].kind {
        StmtKind::SetIndex {
            target, index, op, ..
        } => {
            assert_eq!(render(&target.items), "xs");
            assert_eq!(render(&index.items), "i 1 +");
            assert_eq!(*op, AssignOp::Add);
        }
        other => panic!("expected set-index, got {other:?}"),
    }
}

#[test]
fn test_for_slots() {
    let program = parse_ok("for (int i = 0; i < 3; xs[i] = i) {}");
    let StmtKind::For {
        init, cond, step, ..
    } = &program.statements[0].kind
    else {
        panic!("expected for");
    };
    assert!(matches!(init.as_deref().map(|s| &s.kind), Some(StmtKind::Decl(_))));
    assert_eq!(render(&cond.as_ref().unwrap().items), "i 3 <");
    assert!(matches!(
        step.as_deref().map(|s| &s.kind),
        Some(StmtKind::SetIndex { .. })
    ));

    let program = parse_ok("for (;;) break;");
    let StmtKind::For {
        init, cond, step, ..
    } = &program.statements[0].kind
    else {
        panic!("expected for");
    };
    assert!(init.is_none() && cond.is_none() && step.is_none());
}

#[test]
fn test_for_requires_three_slots() {
    let err = parse_source("for (i = 0; i < 3) {}", "t").unwrap_err();
    assert_eq!(
        err,
        SyntaxError::Parse(ParseError::new(ParseErrorKind::MalformedFor, 1))
    );
}

#[test]
fn test_if_else_chain_and_positions() {
    let program = parse_ok("if (a)\n  b = 1;\nelse if (c) {\n  b = 2;\n}\nwhile (false) ;");
    let StmtKind::If { else_branch, .. } = &program.statements[0].kind else {
        panic!("expected if");
    };
    let else_branch = else_branch.as_ref().unwrap();
    assert!(matches!(else_branch.kind, StmtKind::If { .. }));
    assert_eq!(else_branch.pos.line, 3);
    assert_eq!(program.statements[1].pos.line, 6);
}

#[test]
fn test_operator_items() {
    let program = parse_ok("x >= y;");
    let StmtKind::Expr(expr) = &program.statements[0].kind else {
        panic!("expected expression");
    };
    assert!(matches!(expr.items[2], ExprItem::Binary(BinaryOp::GtEq)));

    let program = parse_ok("-x;");
    let StmtKind::Expr(expr) = &program.statements[0].kind else {
        panic!("expected expression");
    };
    assert!(matches!(expr.items[1], ExprItem::Unary(UnaryOp::Neg)));
}

#[test]
fn test_missing_semicolon() {
    let err = parse_source("int x = 1\nint y = 2;", "t").unwrap_err();
    assert_eq!(err.line(), 2);
    assert_eq!(
        err.to_string(),
        "expected `;`, found identifier `int` (line 2)"
    );
}

#[test]
fn test_unclosed_block() {
    let err = parse_source("{ int x = 1;", "t").unwrap_err();
    assert_eq!(err.to_string(), "expected `}`, found end of file (line 1)");
}

#[test]
fn test_expected_expression() {
    let err = parse_source("x = ;", "t").unwrap_err();
    assert_eq!(err.to_string(), "expected an expression, found `;` (line 1)");
}

#[test]
fn test_lex_error_passes_through() {
    let err = parse_source("int x = 1;\nx = #;", "t").unwrap_err();
    assert!(matches!(err, SyntaxError::Lex(_)));
    assert_eq!(err.line(), 2);
}
