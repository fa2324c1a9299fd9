//! Token types
//!
//! Tokens are produced by an external lexer and handed over as an ordered,
//! immutable sequence. They serialize with serde so a token stream can be
//! read from JSON.

use crate::util::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords
    KwType,
    KwMacro,
    KwIs,
    KwAssert,
    KwReturn,
    KwPrint,
    KwIf,
    KwElse,
    KwWhile,
    KwDo,
    KwFor,
    KwSwitch,
    KwCase,
    KwDefault,
    KwBreak,
    KwContinue,
    KwNull,
    KwTrue,
    KwFalse,
    KwInt,
    KwBool,
    KwChar,
    KwString,
    KwVoid,

    // Identifiers
    Identifier(String),

    // Literals (already decoded by the lexer)
    IntLiteral(i64),
    CharLiteral(char),
    StringLiteral(String),

    // Operators
    Assign,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    And,
    Or,
    Not,
    Bar,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
}

impl TokenKind {
    /// Keyword for the given source text, if it is one
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "type" => TokenKind::KwType,
            "macro" => TokenKind::KwMacro,
            "is" => TokenKind::KwIs,
            "assert" => TokenKind::KwAssert,
            "return" => TokenKind::KwReturn,
            "print" => TokenKind::KwPrint,
            "if" => TokenKind::KwIf,
            "else" => TokenKind::KwElse,
            "while" => TokenKind::KwWhile,
            "do" => TokenKind::KwDo,
            "for" => TokenKind::KwFor,
            "switch" => TokenKind::KwSwitch,
            "case" => TokenKind::KwCase,
            "default" => TokenKind::KwDefault,
            "break" => TokenKind::KwBreak,
            "continue" => TokenKind::KwContinue,
            "null" => TokenKind::KwNull,
            "true" => TokenKind::KwTrue,
            "false" => TokenKind::KwFalse,
            "int" => TokenKind::KwInt,
            "bool" => TokenKind::KwBool,
            "char" => TokenKind::KwChar,
            "string" => TokenKind::KwString,
            "void" => TokenKind::KwVoid,
            _ => return None,
        };
        Some(kind)
    }

    /// Primitive type keywords, as recognized by declaration lookahead
    #[inline]
    pub fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            TokenKind::KwInt
                | TokenKind::KwBool
                | TokenKind::KwChar
                | TokenKind::KwString
                | TokenKind::KwVoid
        )
    }

    #[inline]
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::KwType
                | TokenKind::KwMacro
                | TokenKind::KwIs
                | TokenKind::KwAssert
                | TokenKind::KwReturn
                | TokenKind::KwPrint
                | TokenKind::KwIf
                | TokenKind::KwElse
                | TokenKind::KwWhile
                | TokenKind::KwDo
                | TokenKind::KwFor
                | TokenKind::KwSwitch
                | TokenKind::KwCase
                | TokenKind::KwDefault
                | TokenKind::KwBreak
                | TokenKind::KwContinue
                | TokenKind::KwNull
                | TokenKind::KwTrue
                | TokenKind::KwFalse
        ) || self.is_primitive_type()
    }
}

impl fmt::Display for TokenKind {
    /// Source text of the token
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let text = match self {
            TokenKind::KwType => "type",
            TokenKind::KwMacro => "macro",
            TokenKind::KwIs => "is",
            TokenKind::KwAssert => "assert",
            TokenKind::KwReturn => "return",
            TokenKind::KwPrint => "print",
            TokenKind::KwIf => "if",
            TokenKind::KwElse => "else",
            TokenKind::KwWhile => "while",
            TokenKind::KwDo => "do",
            TokenKind::KwFor => "for",
            TokenKind::KwSwitch => "switch",
            TokenKind::KwCase => "case",
            TokenKind::KwDefault => "default",
            TokenKind::KwBreak => "break",
            TokenKind::KwContinue => "continue",
            TokenKind::KwNull => "null",
            TokenKind::KwTrue => "true",
            TokenKind::KwFalse => "false",
            TokenKind::KwInt => "int",
            TokenKind::KwBool => "bool",
            TokenKind::KwChar => "char",
            TokenKind::KwString => "string",
            TokenKind::KwVoid => "void",
            TokenKind::Identifier(name) => return write!(f, "{}", name),
            TokenKind::IntLiteral(n) => return write!(f, "{}", n),
            TokenKind::CharLiteral(c) => return write!(f, "{:?}", c),
            TokenKind::StringLiteral(s) => return write!(f, "{:?}", s),
            TokenKind::Assign => "=",
            TokenKind::Eq => "==",
            TokenKind::Neq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Not => "!",
            TokenKind::Bar => "|",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
        };
        f.write_str(text)
    }
}

/// Token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(
        kind: TokenKind,
        span: Span,
    ) -> Self {
        Self { kind, span }
    }

    /// Source text of this token
    #[inline]
    pub fn text(&self) -> String {
        self.kind.to_string()
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::dummy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("macro"), Some(TokenKind::KwMacro));
        assert_eq!(TokenKind::keyword("void"), Some(TokenKind::KwVoid));
        assert_eq!(TokenKind::keyword("Point"), None);
    }

    #[test]
    fn test_display_is_source_text() {
        assert_eq!(TokenKind::Le.to_string(), "<=");
        assert_eq!(TokenKind::CharLiteral('a').to_string(), "'a'");
        assert_eq!(TokenKind::StringLiteral("hi".into()).to_string(), "\"hi\"");
        assert_eq!(TokenKind::Identifier("p".into()).to_string(), "p");
    }

    #[test]
    fn test_primitive_types() {
        assert!(TokenKind::KwVoid.is_primitive_type());
        assert!(!TokenKind::KwNull.is_primitive_type());
        assert!(TokenKind::KwNull.is_keyword());
        assert!(!TokenKind::Identifier("int".into()).is_keyword());
    }

    #[test]
    fn test_token_json_shape() {
        let token = Token::new(TokenKind::Identifier("x".into()), Span::new(4, 5));
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"kind":{"Identifier":"x"},"span":{"start":4,"end":5}}"#);
        let back: Token = serde_json::from_str(r#"{"kind":"Semicolon","span":{"start":5,"end":6}}"#).unwrap();
        assert_eq!(back.kind, TokenKind::Semicolon);
    }
}
