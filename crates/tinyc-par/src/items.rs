//! Top-level grammar: `function_decl` and `param`.

use tinyc_lex::Token;
use tinyc_sem::{FuncId, Stmt, VarId};

use crate::{ParseError, Parser};

impl Parser {
    /// `function_decl := type name '(' [param (',' param)*] ')' compound`
    pub(crate) fn parse_function_decl(&mut self) -> Result<FuncId, ParseError> {
        let ret = self
            .parse_type_tag()
            .ok_or_else(|| self.unexpected("a return type"))?;
        let name = self
            .parse_ident()
            .ok_or_else(|| self.unexpected("a function name"))?;
        self.expect(&Token::LParen, "'('")?;

        self.sema.enter_function(ret);
        let params = self.parse_param_list()?;
        self.expect(&Token::RParen, "')'")?;
        let body = self
            .parse_compound()?
            .ok_or_else(|| self.unexpected("a function body"))?;
        self.sema.exit_function();

        Ok(self
            .sema
            .act_on_function_declaration(ret, name, params, Stmt::Compound(body))?)
    }

    fn parse_param_list(&mut self) -> Result<Vec<VarId>, ParseError> {
        if matches!(self.peek(), Token::RParen) {
            return Ok(Vec::new());
        }
        let mut params = vec![self.parse_param()?];
        while self.eat(&Token::Comma) {
            params.push(self.parse_param()?);
        }
        Ok(params)
    }

    /// `param := type name`
    fn parse_param(&mut self) -> Result<VarId, ParseError> {
        let ty = self
            .parse_type_tag()
            .ok_or_else(|| self.unexpected("a parameter type"))?;
        let name = self
            .parse_ident()
            .ok_or_else(|| self.unexpected("a parameter name"))?;
        Ok(self.sema.declare_parameter(ty, name)?)
    }
}
