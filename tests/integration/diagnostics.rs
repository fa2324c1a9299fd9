//! Rendering syntax errors against source text

use crate::common::tokens;
use wlc_frontend::compile_tokens;
use wlc_frontend::util::diagnostic::{render_syntax_error, EmitterConfig};
use wlc_frontend::util::span::SourceFile;

#[test]
fn test_render_error_from_pipeline() {
    let src = "void main ( ) {\n  print x\n}";
    let err = compile_tokens("main.while", &tokens(src)).unwrap_err();
    assert_eq!(err.message, "expecting ';', found '}'");

    let source = SourceFile::new("main.while", src);
    let text = render_syntax_error(&err, Some(&source), &EmitterConfig::plain());
    assert_eq!(text, "error: expecting ';', found '}'\n --> main.while:3:1\n   3 | }\n     | ^\n");
}

#[test]
fn test_render_end_of_file() {
    let src = "int main ( ) {";
    let err = compile_tokens("main.while", &tokens(src)).unwrap_err();
    let text = render_syntax_error(&err, None, &EmitterConfig::plain());
    assert_eq!(text, "error: unexpected end-of-file\n --> main.while:13..14\n");
}
