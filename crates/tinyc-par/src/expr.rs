//! Expression grammar: `expr`, `add_expr`, `mul_expr`, `prim_expr`.

use tinyc_lex::Token;
use tinyc_sem::{BinOpKind, Expr, ExprKind, PrimType};

use crate::{ParseError, Parser};

impl Parser {
    /// `expr := add_expr`
    pub(crate) fn parse_expr(&mut self) -> Result<Option<Expr>, ParseError> {
        self.parse_add_expr()
    }

    pub(crate) fn parse_expr_required(&mut self, what: &'static str) -> Result<Expr, ParseError> {
        self.parse_expr()?.ok_or_else(|| self.unexpected(what))
    }

    /// `add_expr := mul_expr (('+'|'-') mul_expr)*`
    ///
    /// Left-associative by iterative folding: each `(op, next-operand)`
    /// pair is folded into the accumulating left-hand side via
    /// `sema.act_on_binary_expression` as soon as it's read, so
    /// `a - b - c` becomes `Binary(MINUS, Binary(MINUS, a, b), c)`.
    fn parse_add_expr(&mut self) -> Result<Option<Expr>, ParseError> {
        let Some(mut lhs) = self.parse_mul_expr()? else {
            return Ok(None);
        };
        loop {
            let op = match self.peek() {
                Token::Plus => BinOpKind::Plus,
                Token::Minus => BinOpKind::Minus,
                _ => break,
            };
            self.bump();
            let rhs = self
                .parse_mul_expr()?
                .ok_or_else(|| self.unexpected("an operand"))?;
            lhs = self.sema.act_on_binary_expression(op, lhs, rhs)?;
        }
        Ok(Some(lhs))
    }

    /// `mul_expr := prim_expr (('*'|'/') prim_expr)*`
    fn parse_mul_expr(&mut self) -> Result<Option<Expr>, ParseError> {
        let Some(mut lhs) = self.parse_primary()? else {
            return Ok(None);
        };
        loop {
            let op = match self.peek() {
                Token::Star => BinOpKind::Multiply,
                Token::Slash => BinOpKind::Divide,
                _ => break,
            };
            self.bump();
            let rhs = self
                .parse_primary()?
                .ok_or_else(|| self.unexpected("an operand"))?;
            lhs = self.sema.act_on_binary_expression(op, lhs, rhs)?;
        }
        Ok(Some(lhs))
    }

    /// ```text
    /// prim_expr := int_lit | float_lit
    ///            | '(' expr ')'
    ///            | type '(' expr ')'
    ///            | name '(' [expr (',' expr)*] ')'
    ///            | name '=' expr
    ///            | name
    /// ```
    fn parse_primary(&mut self) -> Result<Option<Expr>, ParseError> {
        match self.peek().clone() {
            Token::IntLit(v) => {
                self.bump();
                Ok(Some(Expr {
                    kind: ExprKind::IntLiteral(v),
                    ty: PrimType::Int,
                }))
            },
            Token::FloatLit(v) => {
                self.bump();
                Ok(Some(Expr {
                    kind: ExprKind::FloatLiteral(v),
                    ty: PrimType::Float,
                }))
            },
            Token::LParen => {
                self.bump();
                let inner = self.parse_expr_required("an expression")?;
                self.expect(&Token::RParen, "')'")?;
                Ok(Some(inner))
            },
            Token::KwInt | Token::KwFloat => {
                let target = self
                    .parse_type_tag()
                    .expect("peeked a type keyword immediately above");
                self.expect(&Token::LParen, "'(' after a cast's target type")?;
                let inner = self.parse_expr_required("the cast's operand")?;
                self.expect(&Token::RParen, "')'")?;
                Ok(Some(Expr {
                    kind: ExprKind::Cast {
                        target,
                        inner: Box::new(inner),
                    },
                    ty: target,
                }))
            },
            Token::Ident(name) => {
                self.bump();
                if self.eat(&Token::LParen) {
                    let args = self.parse_call_args()?;
                    self.expect(&Token::RParen, "')'")?;
                    Ok(Some(self.sema.act_on_call_expression(name, args)?))
                } else if self.eat(&Token::Assign) {
                    let value = self.parse_expr_required("an assigned value")?;
                    Ok(Some(self.sema.act_on_assignment_expression(name, value)?))
                } else {
                    Ok(Some(self.sema.act_on_variable_expression(name)?))
                }
            },
            _ => Ok(None),
        }
    }

    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        if matches!(self.peek(), Token::RParen) {
            return Ok(Vec::new());
        }
        let mut args = vec![self.parse_expr_required("an argument")?];
        while self.eat(&Token::Comma) {
            args.push(self.parse_expr_required("an argument")?);
        }
        Ok(args)
    }
}
