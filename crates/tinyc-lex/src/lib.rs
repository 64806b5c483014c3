//! tinyc-lex - Lexical analyzer for the tinyc source language.
//!
//! A single-pass scanner: source text in, an ordered token stream out,
//! terminated by [`Token::Eof`]. One character of lookahead is enough for
//! every recognition rule; there is no look-behind.

pub mod cursor;
mod lexer;

pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::Token;

use tinyc_util::Handler;

/// Tokenizes an entire source buffer, including the trailing [`Token::Eof`].
///
/// Lexing never recovers: the first byte that matches none of the
/// recognition rules is reported to `handler` and tokenization stops right
/// there, with a synthesized `Eof` closing the stream so downstream parsing
/// sees a normal (if premature) end of input rather than hanging.
pub fn tokenize(source: &str, handler: &mut Handler) -> Vec<Token> {
    let mut lexer = Lexer::new(source, handler);
    let mut tokens = Vec::with_capacity(source.len() / 2);
    loop {
        let token = lexer.next_token();
        let is_eof = token == Token::Eof;
        tokens.push(token);
        if is_eof {
            break;
        }
        if handler.has_errors() {
            tokens.push(Token::Eof);
            break;
        }
    }
    tokens
}
