//! Token stream builder for integration tests
//!
//! Tokens are written separated by whitespace, e.g. `int x = 1 ;`. String
//! literals are written `"text"` and must not contain spaces.

use wlc_frontend::frontend::tokens::{Token, TokenKind};
use wlc_frontend::util::span::Span;

pub fn tokens(src: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut offset = 0;
    for word in src.split(|c: char| c.is_ascii_whitespace()) {
        if !word.is_empty() {
            out.push(Token::new(kind(word), Span::new(offset, offset + word.len())));
        }
        offset += word.len() + 1;
    }
    out
}

fn kind(word: &str) -> TokenKind {
    if let Some(kw) = TokenKind::keyword(word) {
        return kw;
    }
    if let Ok(n) = word.parse::<i64>() {
        return TokenKind::IntLiteral(n);
    }
    if word.len() >= 2 && word.starts_with('"') && word.ends_with('"') {
        return TokenKind::StringLiteral(word[1..word.len() - 1].to_string());
    }
    if word.len() == 3 && word.starts_with('\'') && word.ends_with('\'') {
        return TokenKind::CharLiteral(word.chars().nth(1).unwrap());
    }
    match word {
        "=" => TokenKind::Assign,
        "==" => TokenKind::Eq,
        "!=" => TokenKind::Neq,
        "<" => TokenKind::Lt,
        "<=" => TokenKind::Le,
        ">" => TokenKind::Gt,
        ">=" => TokenKind::Ge,
        "+" => TokenKind::Plus,
        "-" => TokenKind::Minus,
        "*" => TokenKind::Star,
        "/" => TokenKind::Slash,
        "%" => TokenKind::Percent,
        "&&" => TokenKind::And,
        "||" => TokenKind::Or,
        "!" => TokenKind::Not,
        "|" => TokenKind::Bar,
        "(" => TokenKind::LParen,
        ")" => TokenKind::RParen,
        "{" => TokenKind::LBrace,
        "}" => TokenKind::RBrace,
        "[" => TokenKind::LBracket,
        "]" => TokenKind::RBracket,
        "," => TokenKind::Comma,
        ";" => TokenKind::Semicolon,
        ":" => TokenKind::Colon,
        "." => TokenKind::Dot,
        name => TokenKind::Identifier(name.to_string()),
    }
}

/// JSON encoding of `tokens(src)`, as an external lexer would write it
pub fn tokens_json(src: &str) -> String {
    serde_json::to_string(&tokens(src)).unwrap()
}
