//! Statement grammar: `statement`, `compound`, and its eight alternatives.

use tinyc_lex::Token;
use tinyc_sem::Stmt;

use crate::{ParseError, Parser};

impl Parser {
    /// `statement := for_stmt | while_stmt | if_stmt | return_stmt
    ///             | compound  | var_decl  | expr_stmt`
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        if let Some(s) = self.parse_for_stmt()? {
            return Ok(Some(s));
        }
        if let Some(s) = self.parse_while_stmt()? {
            return Ok(Some(s));
        }
        if let Some(s) = self.parse_if_stmt()? {
            return Ok(Some(s));
        }
        if let Some(s) = self.parse_return_stmt()? {
            return Ok(Some(s));
        }
        if let Some(body) = self.parse_compound()? {
            return Ok(Some(Stmt::Compound(body)));
        }
        if let Some(s) = self.parse_var_decl_stmt()? {
            return Ok(Some(s));
        }
        if let Some(s) = self.parse_expr_stmt()? {
            return Ok(Some(s));
        }
        Ok(None)
    }

    /// `compound := '{' statement+ '}'`. Does not push a new `Sema` scope —
    /// every local in a function body, nested or not, shares the one scope
    /// pushed on function entry.
    pub(crate) fn parse_compound(&mut self) -> Result<Option<Vec<Stmt>>, ParseError> {
        if !self.eat(&Token::LBrace) {
            return Ok(None);
        }
        let mut stmts = Vec::new();
        while let Some(stmt) = self.parse_statement()? {
            stmts.push(stmt);
        }
        if stmts.is_empty() {
            return Err(self.unexpected("at least one statement"));
        }
        self.expect(&Token::RBrace, "'}'")?;
        Ok(Some(stmts))
    }

    /// `for_stmt := 'for' '(' expr ';' expr ';' expr ')' compound`
    fn parse_for_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        if !self.eat(&Token::KwFor) {
            return Ok(None);
        }
        self.expect(&Token::LParen, "'('")?;
        let init = self.parse_expr_required("a for-loop initializer")?;
        self.expect(&Token::Semicolon, "';'")?;
        let cond = self.parse_expr_required("a for-loop condition")?;
        self.expect(&Token::Semicolon, "';'")?;
        let step = self.parse_expr_required("a for-loop step")?;
        self.expect(&Token::RParen, "')'")?;
        let body = self
            .parse_compound()?
            .ok_or_else(|| self.unexpected("a for-loop body"))?;
        Ok(Some(Stmt::For {
            init,
            cond,
            step,
            body: Box::new(Stmt::Compound(body)),
        }))
    }

    /// `while_stmt := 'while' '(' expr ')' compound`
    fn parse_while_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        if !self.eat(&Token::KwWhile) {
            return Ok(None);
        }
        self.expect(&Token::LParen, "'('")?;
        let cond = self.parse_expr_required("a while condition")?;
        self.expect(&Token::RParen, "')'")?;
        let body = self
            .parse_compound()?
            .ok_or_else(|| self.unexpected("a while body"))?;
        Ok(Some(Stmt::While {
            cond,
            body: Box::new(Stmt::Compound(body)),
        }))
    }

    /// `if_stmt := 'if' '(' expr ')' compound`
    fn parse_if_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        if !self.eat(&Token::KwIf) {
            return Ok(None);
        }
        self.expect(&Token::LParen, "'('")?;
        let cond = self.parse_expr_required("an if condition")?;
        self.expect(&Token::RParen, "')'")?;
        let body = self
            .parse_compound()?
            .ok_or_else(|| self.unexpected("an if body"))?;
        Ok(Some(Stmt::If {
            cond,
            body: Box::new(Stmt::Compound(body)),
        }))
    }

    /// `return_stmt := 'return' expr ';'`
    fn parse_return_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        if !self.eat(&Token::KwReturn) {
            return Ok(None);
        }
        let value = self.parse_expr_required("a return value")?;
        self.expect(&Token::Semicolon, "';'")?;
        Ok(Some(self.sema.act_on_return_statement(value)?))
    }

    /// `var_decl := type name [ '=' expr ] ';'`
    ///
    /// Disambiguated from a cast-expression statement (`type '(' expr ')'
    /// ;`) by the token right after `type`: a name commits to `var_decl`,
    /// anything else rolls back for `expr_stmt` to try.
    fn parse_var_decl_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        let start = self.pos;
        let Some(ty) = self.parse_type_tag() else {
            return Ok(None);
        };
        let Some(name) = self.parse_ident() else {
            self.pos = start;
            return Ok(None);
        };
        let init = if self.eat(&Token::Assign) {
            Some(self.parse_expr_required("an initializer expression")?)
        } else {
            None
        };
        self.expect(&Token::Semicolon, "';'")?;
        let var = self.sema.act_on_variable_declaration(ty, name, init)?;
        Ok(Some(Stmt::VariableDecl(var)))
    }

    /// `expr_stmt := expr ';'`
    fn parse_expr_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        let Some(expr) = self.parse_expr()? else {
            return Ok(None);
        };
        self.expect(&Token::Semicolon, "';'")?;
        Ok(Some(Stmt::ExpressionStmt(expr)))
    }
}
