//! Core lexer implementation: the `Lexer` struct and `next_token` dispatch.

use tinyc_util::{DiagnosticBuilder, Handler, Span};

use crate::cursor::Cursor;
use crate::lexer::identifier::is_ident_start;
use crate::token::Token;

/// Lexer for the tinyc source language.
///
/// Single-pass, one character of lookahead. Tokens are produced on demand by
/// [`Lexer::next_token`]; [`crate::tokenize`] drives it to completion.
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    pub cursor: Cursor<'a>,

    /// Error handler for reporting lexical errors.
    pub handler: &'a mut Handler,

    /// Starting byte offset of the token currently being scanned.
    pub token_start: usize,

    token_start_line: u32,
    token_start_column: u32,
}

/// ASCII whitespace per C's `isspace`: space, tab, newline, CR, vertical tab,
/// form feed. Deliberately not `char::is_whitespace`, which is Unicode-aware
/// and would accept bytes this language's grammar doesn't.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Returns the next token from the source code.
    ///
    /// Skips leading whitespace, then dispatches on the current character.
    /// An unrecognized byte is reported and consumed (never left in place),
    /// so the scan always makes forward progress.
    pub fn next_token(&mut self) -> Token {
        while is_space(self.cursor.current_char()) {
            self.cursor.advance();
        }

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::Eof;
        }

        match self.cursor.current_char() {
            ',' => {
                self.cursor.advance();
                Token::Comma
            },
            ';' => {
                self.cursor.advance();
                Token::Semicolon
            },
            '(' => {
                self.cursor.advance();
                Token::LParen
            },
            ')' => {
                self.cursor.advance();
                Token::RParen
            },
            '{' => {
                self.cursor.advance();
                Token::LBrace
            },
            '}' => {
                self.cursor.advance();
                Token::RBrace
            },
            '=' => {
                self.cursor.advance();
                Token::Assign
            },
            '+' => {
                self.cursor.advance();
                Token::Plus
            },
            '*' => {
                self.cursor.advance();
                Token::Star
            },
            '/' => {
                self.cursor.advance();
                Token::Slash
            },
            '-' => {
                self.cursor.advance();
                if self.cursor.current_char().is_ascii_digit() {
                    self.lex_number(self.cursor.position(), true)
                } else {
                    Token::Minus
                }
            },
            c if c.is_ascii_digit() => self.lex_number(self.token_start, false),
            c if is_ident_start(c) => self.lex_identifier(),
            c => {
                self.report_error(format!("unexpected character '{}'", c));
                self.cursor.advance();
                Token::Invalid(c.to_string())
            },
        }
    }

    /// Reports a lexical error spanning the token currently being scanned.
    pub fn report_error(&mut self, message: String) {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::error(message)
            .span(span)
            .emit(self.handler);
    }

    /// Returns the current line number (1-based).
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Returns the current column number (1-based).
    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    /// Returns the current byte position in the source.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token == Token::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::keyword_from_ident;
    use tinyc_util::Symbol;

    fn lex_all(source: &str) -> Vec<Token> {
        let mut handler = Handler::new();
        crate::tokenize(source, &mut handler)
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(lex_all(""), vec![Token::Eof]);
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            lex_all(",;(){}=+-*/"),
            vec![
                Token::Comma,
                Token::Semicolon,
                Token::LParen,
                Token::RParen,
                Token::LBrace,
                Token::RBrace,
                Token::Assign,
                Token::Plus,
                Token::Minus,
                Token::Star,
                Token::Slash,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn whitespace_is_skipped_between_tokens() {
        assert_eq!(
            lex_all(" \t\n\r x \n"),
            vec![Token::Ident(Symbol::intern("x")), Token::Eof]
        );
    }

    #[test]
    fn minus_before_digit_fuses_into_signed_literal() {
        assert_eq!(lex_all("-5"), vec![Token::IntLit(-5), Token::Eof]);
    }

    #[test]
    fn minus_before_non_digit_is_a_bare_token() {
        assert_eq!(
            lex_all("x - y"),
            vec![
                Token::Ident(Symbol::intern("x")),
                Token::Minus,
                Token::Ident(Symbol::intern("y")),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn unrecognized_byte_is_reported_and_consumed() {
        let mut handler = Handler::new();
        let tokens = crate::tokenize("x # y", &mut handler);
        assert!(handler.has_errors());
        assert_eq!(tokens.last(), Some(&Token::Eof));
    }

    #[test]
    fn function_like_snippet() {
        let tokens = lex_all("int add(int a, int b) { return a + b; }");
        assert_eq!(tokens.first(), Some(&Token::KwInt));
        assert_eq!(tokens.last(), Some(&Token::Eof));
    }

    // ------------------------------------------------------------------
    // Property-based tests over arbitrary inputs.
    // ------------------------------------------------------------------

    #[test]
    fn property_arbitrary_whitespace_is_always_just_eof() {
        use proptest::prelude::*;

        proptest!(|(input in "[ \t\n\r]{0,40}")| {
            prop_assert_eq!(lex_all(&input), vec![Token::Eof]);
        });
    }

    #[test]
    fn property_arbitrary_identifier_strings_lex_to_a_single_token() {
        use proptest::prelude::*;

        proptest!(|(input in "[a-zA-Z_][a-zA-Z0-9_]{0,30}")| {
            let tokens = lex_all(&input);
            prop_assert_eq!(tokens.len(), 2);
            prop_assert_eq!(&tokens[1], &Token::Eof);
            match keyword_from_ident(&input) {
                Some(kw) => prop_assert_eq!(tokens[0].clone(), kw),
                None => prop_assert!(matches!(tokens[0], Token::Ident(_))),
            }
        });
    }

    #[test]
    fn property_arbitrary_decimal_runs_lex_to_a_single_int_literal() {
        use proptest::prelude::*;

        proptest!(|(digits in "[0-9]{1,18}")| {
            let value: i64 = digits.parse().unwrap();
            prop_assert_eq!(lex_all(&digits), vec![Token::IntLit(value), Token::Eof]);
        });
    }
}
