//! Integer and float literal lexing.
//!
//! The grammar is deliberately small: a run of decimal digits, optionally
//! followed by `.` and a further run of decimal digits. There is no
//! hex/octal/binary prefix, no exponent, and no digit-group separators.

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an int or float literal starting at the cursor's current digit.
    ///
    /// `start` is the byte offset the literal's text begins at (which
    /// precedes the cursor when a leading `-` has already been consumed by
    /// the caller); `negative` records whether that `-` was seen, since the
    /// sign is not itself part of the digit run this method scans.
    pub fn lex_number(&mut self, start: usize, negative: bool) -> Token {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut is_float = false;
        if self.cursor.current_char() == '.' {
            is_float = true;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let digits = self.cursor.slice_from(start);
        let text = if negative {
            format!("-{}", digits)
        } else {
            digits.to_string()
        };

        if is_float {
            match text.parse::<f64>() {
                Ok(value) => Token::FloatLit(value),
                Err(e) => {
                    self.report_error(format!("invalid floating point literal '{}': {}", text, e));
                    Token::FloatLit(0.0)
                },
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => Token::IntLit(value),
                Err(e) => {
                    self.report_error(format!("invalid integer literal '{}': {}", text, e));
                    Token::IntLit(0)
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyc_util::Handler;

    fn lex_num(source: &str) -> Token {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        let start = lexer.cursor.position();
        lexer.lex_number(start, false)
    }

    #[test]
    fn plain_integer() {
        assert_eq!(lex_num("42"), Token::IntLit(42));
        assert_eq!(lex_num("0"), Token::IntLit(0));
        assert_eq!(lex_num("123456"), Token::IntLit(123456));
    }

    #[test]
    fn plain_float() {
        match lex_num("3.14") {
            Token::FloatLit(f) => assert!((f - 3.14).abs() < 1e-9),
            other => panic!("expected FloatLit, got {:?}", other),
        }
    }

    #[test]
    fn float_with_trailing_dot() {
        match lex_num("3.") {
            Token::FloatLit(f) => assert!((f - 3.0).abs() < 1e-9),
            other => panic!("expected FloatLit, got {:?}", other),
        }
    }

    #[test]
    fn negative_integer_fusion() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("5", &mut handler);
        let start = lexer.cursor.position();
        assert_eq!(lexer.lex_number(start, true), Token::IntLit(-5));
    }

    #[test]
    fn negative_float_fusion() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("2.5", &mut handler);
        let start = lexer.cursor.position();
        match lexer.lex_number(start, true) {
            Token::FloatLit(f) => assert!((f + 2.5).abs() < 1e-9),
            other => panic!("expected FloatLit, got {:?}", other),
        }
    }

    #[test]
    fn stops_before_non_digit() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("12;", &mut handler);
        let start = lexer.cursor.position();
        assert_eq!(lexer.lex_number(start, false), Token::IntLit(12));
        assert_eq!(lexer.cursor.current_char(), ';');
    }
}
