//! The token alphabet produced by the lexer.

use tinyc_util::Symbol;

/// A single lexical token.
///
/// `PartialEq` compares `IntLit`/`FloatLit` by value (not bit pattern), which
/// is fine here: tests compare literal tokens for exact textual values, never
/// NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Eof,

    KwInt,
    KwFloat,
    KwFor,
    KwWhile,
    KwIf,
    KwReturn,

    Ident(Symbol),
    IntLit(i64),
    FloatLit(f64),

    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,

    /// A byte that matched none of the lexer's rules. Carries the offending
    /// text so diagnostics can quote it.
    Invalid(String),
}

/// Maps an already-scanned identifier's text to a keyword token, if it is one.
pub fn keyword_from_ident(text: &str) -> Option<Token> {
    Some(match text {
        "int" => Token::KwInt,
        "float" => Token::KwFloat,
        "for" => Token::KwFor,
        "while" => Token::KwWhile,
        "if" => Token::KwIf,
        "return" => Token::KwReturn,
        _ => return None,
    })
}
