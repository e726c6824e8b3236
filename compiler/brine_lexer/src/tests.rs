use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_declaration() {
    assert_eq!(
        kinds("const int x = 5;"),
        vec![
            TokenKind::Const,
            TokenKind::Ident(Name::new("int")),
            TokenKind::Ident(Name::new("x")),
            TokenKind::Eq,
            TokenKind::Num(5.0),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_decimal_number() {
    assert_eq!(kinds("3.25"), vec![TokenKind::Num(3.25), TokenKind::Eof]);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(
        kinds("constant iffy"),
        vec![
            TokenKind::Ident(Name::new("constant")),
            TokenKind::Ident(Name::new("iffy")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_compound_operators_longest_match() {
    assert_eq!(
        kinds("a <<= b"),
        vec![
            TokenKind::Ident(Name::new("a")),
            TokenKind::Shl,
            TokenKind::Eq,
            TokenKind::Ident(Name::new("b")),
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("x += 1 >= -> && ||"),
        vec![
            TokenKind::Ident(Name::new("x")),
            TokenKind::PlusEq,
            TokenKind::Num(1.0),
            TokenKind::GtEq,
            TokenKind::Arrow,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_string_escapes_are_cooked() {
    let tokens = lex(r#""a\tb\n""#).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Str("a\tb\n".to_string()));
    assert_eq!(tokens[0].text, r#""a\tb\n""#);
}

#[test]
fn test_comments_and_lines() {
    let tokens = lex("// header\nint x;\n\n// trailing\nx = 1;").unwrap();
    let lines: Vec<u32> = tokens.iter().map(|t| t.pos.line).collect();
    assert_eq!(lines, vec![2, 2, 2, 5, 5, 5, 5, 5]);
}

#[test]
fn test_unterminated_string() {
    let err = lex("str s = \"oops;\n").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.line, 1);
}

#[test]
fn test_invalid_escape() {
    let err = lex("\n\"bad \\q\"").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidEscape('q'));
    assert_eq!(err.line, 2);
}

#[test]
fn test_unexpected_character() {
    let err = lex("int x = 1 $ 2;").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedChar('$'));
    assert_eq!(err.to_string(), "unexpected character `$` (line 1)");
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}
