//! Identifier and keyword lexing.

use crate::token::{keyword_from_ident, Token};
use crate::Lexer;
use tinyc_util::Symbol;

/// First character of an identifier: a letter or underscore.
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Any later character of an identifier: a letter, digit, or underscore.
///
/// The grammar (rather than the reference lexer, which never advances past
/// the first character) is authoritative here, so digits are allowed after
/// the first character.
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Assumes the cursor is positioned on a character for which
    /// [`is_ident_start`] holds, and that character has not yet been consumed.
    pub fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);

        keyword_from_ident(text).unwrap_or_else(|| Token::Ident(Symbol::intern(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use tinyc_util::Handler;

    fn lex_ident(source: &str) -> Token {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_identifier()
    }

    #[test]
    fn plain_identifier() {
        assert_eq!(lex_ident("foo"), Token::Ident(Symbol::intern("foo")));
    }

    #[test]
    fn identifier_with_underscore_and_digits() {
        assert_eq!(
            lex_ident("foo_bar_123"),
            Token::Ident(Symbol::intern("foo_bar_123"))
        );
    }

    #[test]
    fn identifier_starting_with_underscore() {
        assert_eq!(lex_ident("_hidden"), Token::Ident(Symbol::intern("_hidden")));
    }

    #[test]
    fn keyword_int() {
        assert_eq!(lex_ident("int"), Token::KwInt);
    }

    #[test]
    fn keyword_float() {
        assert_eq!(lex_ident("float"), Token::KwFloat);
    }

    #[test]
    fn keyword_for() {
        assert_eq!(lex_ident("for"), Token::KwFor);
    }

    #[test]
    fn keyword_while() {
        assert_eq!(lex_ident("while"), Token::KwWhile);
    }

    #[test]
    fn keyword_if() {
        assert_eq!(lex_ident("if"), Token::KwIf);
    }

    #[test]
    fn keyword_return() {
        assert_eq!(lex_ident("return"), Token::KwReturn);
    }

    #[test]
    fn keyword_prefix_is_still_an_identifier() {
        assert_eq!(lex_ident("integers"), Token::Ident(Symbol::intern("integers")));
    }
}
