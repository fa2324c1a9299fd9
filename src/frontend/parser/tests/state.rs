//! Parser state tests

use super::*;
use crate::frontend::parser::ParserState;
use crate::frontend::tokens::TokenKind;
use crate::util::span::Span;

#[test]
fn test_empty_stream() {
    let tokens = lex("");
    let state = ParserState::new(FILENAME, &tokens);
    assert!(state.at_end());
    assert!(state.current().is_none());
    let err = state.check_not_eof().unwrap_err();
    assert_eq!(err.message, "unexpected end-of-file");
    assert_eq!(err.span, Span::dummy());
}

#[test]
fn test_bump_and_peek() {
    let tokens = lex("a b c");
    let mut state = ParserState::new(FILENAME, &tokens);
    assert_eq!(state.peek_nth(2).map(|t| t.text()), Some("c".to_string()));
    state.bump();
    assert!(state.at(&TokenKind::Identifier("b".into())));
    state.bump();
    state.bump();
    assert!(state.at_end());
    state.bump();
    assert!(state.at_end());
}

#[test]
fn test_skip_only_consumes_match() {
    let tokens = lex("; ,");
    let mut state = ParserState::new(FILENAME, &tokens);
    assert!(!state.skip(&TokenKind::Comma));
    assert!(state.skip(&TokenKind::Semicolon));
    assert!(state.skip(&TokenKind::Comma));
}

#[test]
fn test_expect_messages() {
    let tokens = lex("x");
    let mut state = ParserState::new(FILENAME, &tokens);
    let err = state.expect(&TokenKind::Semicolon).unwrap_err();
    assert_eq!(err.message, "expecting ';', found 'x'");
    let err = state.expect(&TokenKind::KwWhile).unwrap_err();
    assert_eq!(err.message, "keyword while expected.");
    assert_eq!(state.mark(), 0);

    assert_eq!(state.expect_identifier().unwrap().0, "x");
    let err = state.expect(&TokenKind::Semicolon).unwrap_err();
    assert_eq!(err.message, "unexpected end-of-file");
    assert_eq!(err.span, Span::new(0, 1));
}

#[test]
fn test_checkpoint_restore() {
    let tokens = lex("a = b;");
    let mut state = ParserState::new(FILENAME, &tokens);
    let checkpoint = state.checkpoint();
    state.parse_expr().unwrap();
    assert_eq!(state.mark(), 1);
    state.restore(checkpoint);
    assert_eq!(state.mark(), 0);
    assert_eq!(state.checkpoint(), checkpoint);
}

#[test]
fn test_span_from_covers_consumed_tokens() {
    let tokens = lex("foo + barbaz");
    let mut state = ParserState::new(FILENAME, &tokens);
    let start = state.mark();
    // nothing consumed yet: the span of the first token
    assert_eq!(state.span_from(start), Span::new(0, 3));
    state.bump();
    state.bump();
    state.bump();
    assert_eq!(state.span_from(start), Span::new(0, 12));
}

#[test]
fn test_declared_names() {
    let tokens = lex("");
    let mut state = ParserState::new(FILENAME, &tokens);
    assert!(!state.context().is_type("Point"));
    state.declare_type("Point");
    state.declare_macro("double");
    state.declare_macro("double");
    assert!(state.context().is_type("Point"));
    assert!(state.context().is_macro("double"));
    assert!(!state.context().is_macro("Point"));
    assert_eq!(state.context().type_count(), 1);
    assert_eq!(state.context().macro_count(), 1);
}
