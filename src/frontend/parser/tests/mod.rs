//! Parser tests module

mod state;
mod type_parser;

use crate::frontend::parser::ast::*;
use crate::frontend::parser::{parse, parse_expression, SyntaxError};
use crate::frontend::test_utils::lex;

pub(super) const FILENAME: &str = "test.while";

/// Parse a whole file
pub(super) fn parse_src(src: &str) -> Result<File, SyntaxError> {
    parse(FILENAME, &lex(src))
}

pub(super) fn parse_ok(src: &str) -> File {
    match parse_src(src) {
        Ok(file) => file,
        Err(e) => panic!("unexpected syntax error: {}", e),
    }
}

pub(super) fn parse_err(src: &str) -> SyntaxError {
    match parse_src(src) {
        Ok(file) => panic!("expected a syntax error, got {:?}", file),
        Err(e) => e,
    }
}

/// Parse a single expression
pub(super) fn expr(src: &str) -> Expr {
    parse_expression(FILENAME, &lex(src)).expect("expression should parse")
}

/// Parse a single expression and render its shape
pub(super) fn shape(src: &str) -> String {
    expr(src).to_string()
}

/// Parse `prelude` followed by `void main() { body }` and return the body
pub(super) fn body_with(
    prelude: &str,
    body: &str,
) -> Vec<Stmt> {
    let file = parse_ok(&format!("{}\nvoid main() {{ {} }}", prelude, body));
    file.method("main").expect("main is declared").body.clone()
}

pub(super) fn body(src: &str) -> Vec<Stmt> {
    body_with("", src)
}

/// Parse a body holding exactly one statement
pub(super) fn single_stmt(src: &str) -> StmtKind {
    let mut stmts = body(src);
    assert_eq!(stmts.len(), 1, "expected one statement in {:?}", src);
    stmts.remove(0).kind
}
