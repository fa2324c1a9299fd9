//! End-to-end tests over the public entry points

use crate::common::{tokens, tokens_json};
use std::io::Write;
use wlc_frontend::frontend::macros::{self, ExpandOptions};
use wlc_frontend::frontend::parser::ast::{Decl, Expr, StmtKind};
use wlc_frontend::frontend::parser::parse;
use wlc_frontend::{compile_json, compile_token_file, compile_tokens, File, Frontend, FrontendConfig, FrontendError};

const PROGRAM: &str = "
type Point is { int x , int y }
macro double ( v ) is v + v
macro origin ( ) is { x : 0 , y : 0 }
int main ( ) {
    Point p = origin ( ) ;
    int [ ] xs = [ 0 ; double ( 3 ) ] ;
    for ( int i = 0 ; i < | xs | ; i = i + 1 ) {
        xs [ i ] = double ( i ) ;
    }
    if ( p . x == 0 && xs [ 1 ] != 2 ) {
        print \"bad\" ;
    } else if ( ! done ( ) ) {
        report ( double ( p . y ) ) ;
    }
    switch ( xs [ 0 ] ) {
        case 0 : return 1 ;
        default : return double ( - 2 ) ;
    }
}
";

fn main_body(file: &File) -> &[wlc_frontend::frontend::parser::ast::Stmt] {
    &file.method("main").unwrap().body
}

#[test]
fn test_full_program_expands() {
    let file = compile_tokens("prog.while", &tokens(PROGRAM)).unwrap();
    assert_eq!(file.decls.len(), 4);
    assert_eq!(file.decls.iter().filter(|d| matches!(d, Decl::Macro(_))).count(), 2);

    let body = main_body(&file);
    assert_eq!(body.len(), 5);
    match &body[0].kind {
        StmtKind::VariableDeclaration(decl) => {
            assert_eq!(decl.initialiser.as_ref().unwrap().to_string(), "{x: 0, y: 0}")
        }
        other => panic!("expected declaration, got {:?}", other),
    }
    match &body[1].kind {
        StmtKind::VariableDeclaration(decl) => {
            assert_eq!(decl.initialiser.as_ref().unwrap().to_string(), "[0; (3 + 3)]")
        }
        other => panic!("expected declaration, got {:?}", other),
    }

    let rendered = format!("{:?}", body);
    assert!(!rendered.contains("\"double\""));
    assert!(!rendered.contains("\"origin\""));
    assert!(rendered.contains("\"report\""));
}

#[test]
fn test_expansion_matches_manual_pipeline() {
    let toks = tokens(PROGRAM);
    let manual = macros::expand_with(parse("prog.while", &toks).unwrap(), ExpandOptions::default());
    assert_eq!(compile_tokens("prog.while", &toks).unwrap(), manual);
}

#[test]
fn test_parse_only_keeps_macro_calls() {
    let frontend = Frontend::with_config(FrontendConfig::new().with_expand_macros(false));
    let file = frontend.compile("prog.while", &tokens(PROGRAM)).unwrap();
    assert!(format!("{:?}", main_body(&file)).contains("\"double\""));
}

#[test]
fn test_negative_literal_argument() {
    let file = compile_tokens("prog.while", &tokens(PROGRAM)).unwrap();
    match &main_body(&file)[4].kind {
        StmtKind::Switch { cases, .. } => match &cases[1].body[0].kind {
            StmtKind::Return(Some(e)) => assert_eq!(e.to_string(), "(-2 + -2)"),
            other => panic!("expected return, got {:?}", other),
        },
        other => panic!("expected switch, got {:?}", other),
    }
}

#[test]
fn test_compile_json_entry_point() {
    let file = compile_json("prog.while", &tokens_json(PROGRAM)).unwrap();
    assert_eq!(file, compile_tokens("prog.while", &tokens(PROGRAM)).unwrap());
}

#[test]
fn test_token_file_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.while.json");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(tokens_json(PROGRAM).as_bytes())
        .unwrap();

    let file = compile_token_file(&path).unwrap();
    assert!(file.filename.ends_with("prog.while"));
    assert!(!file.filename.ends_with(".json"));
}

#[test]
fn test_missing_token_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = compile_token_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, FrontendError::Io(_)));
}

#[test]
fn test_syntax_error_surfaces() {
    let err = compile_json("bad.while", &tokens_json("int main ( ) { x = ; }")).unwrap_err();
    let syntax = err.as_syntax_error().expect("syntax error");
    assert_eq!(syntax.message, "unrecognised term (\";\")");
    assert_eq!(syntax.filename, "bad.while");
}

#[test]
fn test_config_file_drives_frontend() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "(full_traversal: true)").unwrap();
    let config = FrontendConfig::load(file.path()).unwrap();

    let src = "macro inc ( x ) is x + 1 int main ( ) { return xs [ inc ( 0 ) ] ; }";
    let expanded = Frontend::with_config(config).compile("t.while", &tokens(src)).unwrap();
    let default = compile_tokens("t.while", &tokens(src)).unwrap();

    let returned = |file: &File| match &main_body(file)[0].kind {
        StmtKind::Return(Some(Expr::IndexOf { index, .. })) => index.to_string(),
        other => panic!("expected indexed return, got {:?}", other),
    };
    assert_eq!(returned(&expanded), "(0 + 1)");
    assert_eq!(returned(&default), "inc(0)");
}
