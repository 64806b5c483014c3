//! tinyc-par - Recursive-descent parser over [`tinyc_lex::Token`].
//!
//! Predictive, backtracking recursive descent with a single token of
//! lookahead beyond the alternative being tried. Every `parse_*` routine
//! follows the same contract: on success it advances past what it
//! consumed and returns `Ok(Some(node))`; if the construct it looks for
//! simply isn't at the current position it returns `Ok(None)` with the
//! cursor exactly where it started, so the caller can try the next
//! grammar alternative. `Err` is reserved for the point past which there
//! is no alternative left to try — either a genuine syntax error (an
//! expected token never showed up) or a semantic rejection from `Sema` —
//! and is always fatal; there is no error recovery.
//!
//! The parser never builds `Variable`, `Assignment`, `Call`, `Binary`, or
//! `Return` nodes itself — those come back from the `Sema` action it
//! calls the moment it recognizes the surrounding syntax.

mod expr;
mod items;
mod stmt;

use std::fmt;

use tinyc_lex::Token;
use tinyc_sem::{PrimType, Sema, SemaError, Symbol, Unit};

/// A fatal parse failure: either a malformed program (no diagnostic detail
/// beyond what token was expected where) or a semantic rejection, which
/// always carries the one-line diagnostic text the driver prints verbatim.
#[derive(Debug)]
pub enum ParseError {
    UnexpectedToken {
        expected: &'static str,
        found: Token,
    },
    Semantic(SemaError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found:?}")
            },
            ParseError::Semantic(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<SemaError> for ParseError {
    fn from(e: SemaError) -> Self {
        ParseError::Semantic(e)
    }
}

/// Parses an entire token stream (as produced by [`tinyc_lex::tokenize`])
/// into a type-checked [`Unit`].
pub fn parse(tokens: Vec<Token>) -> Result<Unit, ParseError> {
    let mut parser = Parser::new(tokens);
    parser.parse_unit()
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    sema: Sema,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            sema: Sema::new(),
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn bump(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, tok: &Token) -> bool {
        if self.peek() == tok {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: &Token, what: &'static str) -> Result<(), ParseError> {
        if self.eat(tok) {
            Ok(())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.peek().clone(),
        }
    }

    fn parse_type_tag(&mut self) -> Option<PrimType> {
        match self.peek() {
            Token::KwInt => {
                self.bump();
                Some(PrimType::Int)
            },
            Token::KwFloat => {
                self.bump();
                Some(PrimType::Float)
            },
            _ => None,
        }
    }

    fn parse_ident(&mut self) -> Option<Symbol> {
        if let Token::Ident(s) = self.peek().clone() {
            self.bump();
            Some(s)
        } else {
            None
        }
    }

    /// `unit := function_decl+`.
    fn parse_unit(&mut self) -> Result<Unit, ParseError> {
        let mut saw_function = false;
        while !matches!(self.peek(), Token::Eof) {
            self.parse_function_decl()?;
            saw_function = true;
        }
        if !saw_function {
            return Err(self.unexpected("function declaration"));
        }
        let sema = std::mem::replace(&mut self.sema, Sema::new());
        Ok(sema.into_unit())
    }
}
