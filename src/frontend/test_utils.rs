//! Test-only token scanner
//!
//! Turns WhileLang snippets into token streams with byte-offset spans, so
//! tests can be written as source text.

use crate::frontend::tokens::{Token, TokenKind};
use crate::util::span::Span;

/// Scan `src` into tokens; panics on characters outside the language
pub(crate) fn lex(src: &str) -> Vec<Token> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        let start = i;

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if src[i..].starts_with("//") {
            i = src[i..].find('\n').map_or(bytes.len(), |n| i + n);
            continue;
        }

        let kind = if c.is_ascii_alphabetic() || c == '_' {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            let word = &src[start..i];
            TokenKind::keyword(word).unwrap_or_else(|| TokenKind::Identifier(word.to_string()))
        } else if c.is_ascii_digit() {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            TokenKind::IntLiteral(src[start..i].parse().expect("integer literal"))
        } else if c == '\'' {
            let (value, next) = unescape(src, i + 1, '\'');
            i = next;
            let mut chars = value.chars();
            TokenKind::CharLiteral(chars.next().expect("empty char literal"))
        } else if c == '"' {
            let (value, next) = unescape(src, i + 1, '"');
            i = next;
            TokenKind::StringLiteral(value)
        } else {
            let two = src.get(i..i + 2).unwrap_or("");
            let kind = match two {
                "==" => Some(TokenKind::Eq),
                "!=" => Some(TokenKind::Neq),
                "<=" => Some(TokenKind::Le),
                ">=" => Some(TokenKind::Ge),
                "&&" => Some(TokenKind::And),
                "||" => Some(TokenKind::Or),
                _ => None,
            };
            match kind {
                Some(kind) => {
                    i += 2;
                    kind
                }
                None => {
                    i += 1;
                    match c {
                        '=' => TokenKind::Assign,
                        '<' => TokenKind::Lt,
                        '>' => TokenKind::Gt,
                        '+' => TokenKind::Plus,
                        '-' => TokenKind::Minus,
                        '*' => TokenKind::Star,
                        '/' => TokenKind::Slash,
                        '%' => TokenKind::Percent,
                        '!' => TokenKind::Not,
                        '|' => TokenKind::Bar,
                        '(' => TokenKind::LParen,
                        ')' => TokenKind::RParen,
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        '[' => TokenKind::LBracket,
                        ']' => TokenKind::RBracket,
                        ',' => TokenKind::Comma,
                        ';' => TokenKind::Semicolon,
                        ':' => TokenKind::Colon,
                        '.' => TokenKind::Dot,
                        other => panic!("unexpected character {:?} at {}", other, start),
                    }
                }
            }
        };

        tokens.push(Token::new(kind, Span::new(start, i)));
    }

    tokens
}

/// Read an escaped literal body up to `quote`; returns the value and the
/// offset just past the closing quote
fn unescape(
    src: &str,
    from: usize,
    quote: char,
) -> (String, usize) {
    let mut value = String::new();
    let mut chars = src[from..].char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            '\\' => {
                let (_, escaped) = chars.next().expect("dangling escape");
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            }
            c if c == quote => return (value, from + offset + 1),
            c => value.push(c),
        }
    }
    panic!("unterminated literal starting at {}", from - 1)
}

#[test]
fn test_lex_spans_and_kinds() {
    let tokens = lex("int x = -12; // done\nprint \"a b\";");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::KwInt,
            TokenKind::Identifier("x".into()),
            TokenKind::Assign,
            TokenKind::Minus,
            TokenKind::IntLiteral(12),
            TokenKind::Semicolon,
            TokenKind::KwPrint,
            TokenKind::StringLiteral("a b".into()),
            TokenKind::Semicolon,
        ]
    );
    assert_eq!(tokens[1].span, Span::new(4, 5));
    assert_eq!(tokens[7].span, Span::new(27, 32));
}
