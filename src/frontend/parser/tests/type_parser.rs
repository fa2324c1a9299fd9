//! Type parsing tests

use super::*;
use crate::frontend::parser::ParserState;

fn parse_type_src(src: &str) -> Type {
    let tokens = lex(src);
    let mut state = ParserState::new(FILENAME, &tokens);
    state.parse_type().expect("type should parse")
}

#[test]
fn test_primitive_types() {
    assert!(matches!(parse_type_src("int"), Type::Int(_)));
    assert!(matches!(parse_type_src("bool"), Type::Bool(_)));
    assert!(matches!(parse_type_src("char"), Type::Char(_)));
    assert!(matches!(parse_type_src("string"), Type::String(_)));
    assert!(matches!(parse_type_src("void"), Type::Void(_)));
}

#[test]
fn test_nested_array_types() {
    match parse_type_src("int[][]") {
        Type::Array { element, span } => {
            assert!(matches!(*element, Type::Array { .. }));
            assert_eq!(span, crate::util::span::Span::new(0, 7));
        }
        other => panic!("expected array type, got {:?}", other),
    }
}

#[test]
fn test_record_types() {
    assert_eq!(parse_type_src("{int x, bool[] ys}").to_string(), "{int x, bool[] ys}");
    assert_eq!(parse_type_src("{{int a} inner}[]").to_string(), "{{int a} inner}[]");
    assert_eq!(parse_type_src("{}").to_string(), "{}");
}

#[test]
fn test_named_type() {
    assert!(matches!(parse_type_src("Point[]"), Type::Array { ref element, .. } if matches!(**element, Type::Named(ref n, _) if n == "Point")));
}

#[test]
fn test_duplicate_field_rejected() {
    let tokens = lex("{int a, int a}");
    let mut state = ParserState::new(FILENAME, &tokens);
    assert_eq!(state.parse_type().unwrap_err().message, "duplicate field");
}

#[test]
fn test_type_lookahead() {
    let tokens = lex("int {bool [char Point x null");
    let mut state = ParserState::new(FILENAME, &tokens);
    assert!(state.is_type_ahead(0));
    assert!(state.is_type_ahead(1));
    assert!(state.is_type_ahead(3));
    assert!(!state.is_type_ahead(5));
    assert!(!state.is_type_ahead(7));
    assert!(!state.is_type_ahead(8));

    state.declare_type("Point");
    assert!(state.is_type_ahead(5));
    assert!(!state.is_type_ahead(6));
}

#[test]
fn test_record_type_variable_declaration() {
    assert!(matches!(
        single_stmt("{int n, Point p}[] xs;"),
        StmtKind::VariableDeclaration(ref d) if d.name == "xs"
    ));
}
