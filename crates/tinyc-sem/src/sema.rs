//! `Sema`: the parser's stateful companion.
//!
//! Holds the scope stack, the flat function list, and the return type of
//! whichever function is currently being parsed, and exposes the
//! `act_on_*` entry points the grammar's actions describe. The parser calls these
//! on every successfully recognized construct; `Sema` both validates and
//! builds the corresponding AST node. The parser never constructs
//! `Variable`, `Assignment`, `Call`, `Binary`, or `Return` nodes itself.

use tinyc_util::{IndexVec, Symbol};

use crate::ast::{Expr, ExprKind, FunctionDecl, Stmt, Unit, VariableDecl};
use crate::errors::SemaError;
use crate::ids::{FuncId, VarId};
use crate::ty::{BinOpKind, PrimType};

pub struct Sema {
    vars: IndexVec<VarId, VariableDecl>,
    funcs: IndexVec<FuncId, FunctionDecl>,
    function_order: Vec<FuncId>,

    /// Scope stack. A fresh global (always-empty) scope is pushed at
    /// construction; `enter_function`/`exit_function` push and pop the one
    /// scope a function body parses in. Nested compound statements do
    /// *not* push a scope — every local
    /// in a function body shares the function's single scope.
    scopes: Vec<Vec<VarId>>,

    /// Set on function entry, consulted by `act_on_return_statement`.
    current_return_type: Option<PrimType>,
}

impl Sema {
    pub fn new() -> Self {
        Self {
            vars: IndexVec::new(),
            funcs: IndexVec::new(),
            function_order: Vec::new(),
            scopes: vec![Vec::new()],
            current_return_type: None,
        }
    }

    /// Pushes the scope a function's parameters and locals share.
    pub fn enter_function(&mut self, return_type: PrimType) {
        self.scopes.push(Vec::new());
        self.current_return_type = Some(return_type);
    }

    /// Pops the function scope on body exit.
    pub fn exit_function(&mut self) {
        self.scopes.pop();
        self.current_return_type = None;
    }

    /// `lookup_variable`: searches scopes innermost-first. With exactly two
    /// scopes live during a function body (an always-empty global, and the
    /// function's own), search order is unobservable; innermost-first is
    /// chosen to be future-proof if nested scoping is ever added.
    fn lookup_variable(&self, name: Symbol) -> Option<VarId> {
        for scope in self.scopes.iter().rev() {
            if let Some(&id) = scope.iter().find(|&&id| self.vars[id].name == name) {
                return Some(id);
            }
        }
        None
    }

    fn current_scope_has(&self, name: Symbol) -> bool {
        self.scopes
            .last()
            .expect("scope stack never empties while parsing")
            .iter()
            .any(|&id| self.vars[id].name == name)
    }

    fn default_value(ty: PrimType) -> Expr {
        match ty {
            PrimType::Int => Expr {
                kind: ExprKind::IntLiteral(0),
                ty: PrimType::Int,
            },
            PrimType::Float => Expr {
                kind: ExprKind::FloatLiteral(0.0),
                ty: PrimType::Float,
            },
        }
    }

    /// Declares a function parameter. Distinct from
    /// `act_on_variable_declaration`: parameters are checked for
    /// uniqueness against each other (not the general scope-duplicate
    /// rule, hence the separate "duplicate parameter name" diagnostic) and
    /// never get a synthesized initializer — their value arrives with the
    /// call, not from an expression sema evaluates.
    pub fn declare_parameter(&mut self, ty: PrimType, name: Symbol) -> Result<VarId, SemaError> {
        if self.current_scope_has(name) {
            return Err(SemaError::DuplicateParameter(name.as_str().to_string()));
        }
        let id = self.vars.push(VariableDecl {
            ty,
            name,
            init: None,
        });
        self.scopes
            .last_mut()
            .expect("scope stack never empties while parsing")
            .push(id);
        Ok(id)
    }

    /// `act_on_variable_declaration`.
    pub fn act_on_variable_declaration(
        &mut self,
        ty: PrimType,
        name: Symbol,
        init: Option<Expr>,
    ) -> Result<VarId, SemaError> {
        if self.current_scope_has(name) {
            return Err(SemaError::DuplicateVariable(name.as_str().to_string()));
        }
        if let Some(ref init) = init {
            if init.ty != ty {
                return Err(SemaError::InitializerTypeMismatch);
            }
        }
        let init = init.unwrap_or_else(|| Self::default_value(ty));
        let id = self.vars.push(VariableDecl {
            ty,
            name,
            init: Some(init),
        });
        self.scopes
            .last_mut()
            .expect("scope stack never empties while parsing")
            .push(id);
        Ok(id)
    }

    /// `act_on_function_declaration`. Registered only once the body has
    /// been fully parsed (mirroring the reference implementation), so a
    /// function cannot call itself or a function declared later in the
    /// source — such a call fails with "unknown function" at the call site.
    pub fn act_on_function_declaration(
        &mut self,
        ret: PrimType,
        name: Symbol,
        params: Vec<VarId>,
        body: Stmt,
    ) -> Result<FuncId, SemaError> {
        if self
            .function_order
            .iter()
            .any(|&id| self.funcs[id].name == name)
        {
            return Err(SemaError::DuplicateFunction(name.as_str().to_string()));
        }
        let id = self.funcs.push(FunctionDecl {
            ret,
            name,
            params,
            body,
        });
        self.function_order.push(id);
        Ok(id)
    }

    /// `act_on_call_expression`. Argument arity is checked; argument
    /// *types* are not — a correct compiler would add this, but this one
    /// never did.
    pub fn act_on_call_expression(
        &self,
        name: Symbol,
        args: Vec<Expr>,
    ) -> Result<Expr, SemaError> {
        let func = self
            .function_order
            .iter()
            .copied()
            .find(|&id| self.funcs[id].name == name)
            .ok_or_else(|| SemaError::UnknownFunction(name.as_str().to_string()))?;

        let decl = &self.funcs[func];
        if args.len() != decl.params.len() {
            return Err(SemaError::ArityMismatch {
                name: name.as_str().to_string(),
                expected: decl.params.len(),
                actual: args.len(),
            });
        }
        Ok(Expr {
            kind: ExprKind::Call { func, args },
            ty: decl.ret,
        })
    }

    /// `act_on_assignment_expression`.
    pub fn act_on_assignment_expression(
        &self,
        name: Symbol,
        value: Expr,
    ) -> Result<Expr, SemaError> {
        let var = self
            .lookup_variable(name)
            .ok_or_else(|| SemaError::UnknownVariable(name.as_str().to_string()))?;
        let decl_ty = self.vars[var].ty;
        if decl_ty != value.ty {
            return Err(SemaError::AssignmentTypeMismatch);
        }
        Ok(Expr {
            kind: ExprKind::Assignment {
                var,
                value: Box::new(value),
            },
            ty: decl_ty,
        })
    }

    /// `act_on_variable_expression`.
    pub fn act_on_variable_expression(&self, name: Symbol) -> Result<Expr, SemaError> {
        let var = self
            .lookup_variable(name)
            .ok_or_else(|| SemaError::UnknownVariable(name.as_str().to_string()))?;
        Ok(Expr {
            kind: ExprKind::Variable(var),
            ty: self.vars[var].ty,
        })
    }

    /// `act_on_binary_expression`. Type promotion never fires in practice
    /// (the precondition already forbids mismatched operand types), so the
    /// result type is simply the shared operand type.
    pub fn act_on_binary_expression(
        &self,
        op: BinOpKind,
        lhs: Expr,
        rhs: Expr,
    ) -> Result<Expr, SemaError> {
        if lhs.ty != rhs.ty {
            return Err(SemaError::MixedTypeBinaryOperands);
        }
        let ty = lhs.ty;
        Ok(Expr {
            kind: ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            ty,
        })
    }

    /// `act_on_return_statement`.
    pub fn act_on_return_statement(&self, value: Expr) -> Result<Stmt, SemaError> {
        let expected = self
            .current_return_type
            .expect("return statement parsed outside a function body");
        if expected != value.ty {
            return Err(SemaError::ReturnTypeMismatch);
        }
        Ok(Stmt::Return(value))
    }

    /// Consumes the analyzer, handing its arenas to the caller as a `Unit`.
    /// Called once top-level parsing succeeds.
    pub fn into_unit(self) -> Unit {
        Unit {
            vars: self.vars,
            funcs: self.funcs,
            function_order: self.function_order,
        }
    }
}

impl Default for Sema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_declaration_synthesizes_default() {
        let mut sema = Sema::new();
        sema.enter_function(PrimType::Int);
        let id = sema
            .act_on_variable_declaration(PrimType::Int, Symbol::intern("x"), None)
            .unwrap();
        assert!(matches!(
            &sema.vars[id].init,
            Some(Expr {
                kind: ExprKind::IntLiteral(0),
                ..
            })
        ));
    }

    #[test]
    fn duplicate_variable_in_scope_is_rejected() {
        let mut sema = Sema::new();
        sema.enter_function(PrimType::Int);
        sema.act_on_variable_declaration(PrimType::Int, Symbol::intern("x"), None)
            .unwrap();
        let err = sema
            .act_on_variable_declaration(PrimType::Int, Symbol::intern("x"), None)
            .unwrap_err();
        assert_eq!(err, SemaError::DuplicateVariable("x".to_string()));
    }

    #[test]
    fn initializer_type_mismatch_is_rejected() {
        let mut sema = Sema::new();
        sema.enter_function(PrimType::Int);
        let float_one = Expr {
            kind: ExprKind::FloatLiteral(1.0),
            ty: PrimType::Float,
        };
        let err = sema
            .act_on_variable_declaration(PrimType::Int, Symbol::intern("x"), Some(float_one))
            .unwrap_err();
        assert_eq!(err, SemaError::InitializerTypeMismatch);
    }

    #[test]
    fn duplicate_parameter_name_is_rejected() {
        let mut sema = Sema::new();
        sema.enter_function(PrimType::Int);
        sema.declare_parameter(PrimType::Int, Symbol::intern("x"))
            .unwrap();
        let err = sema
            .declare_parameter(PrimType::Int, Symbol::intern("x"))
            .unwrap_err();
        assert_eq!(err, SemaError::DuplicateParameter("x".to_string()));
    }

    #[test]
    fn unknown_callee_is_rejected() {
        let sema = Sema::new();
        let err = sema
            .act_on_call_expression(Symbol::intern("g"), Vec::new())
            .unwrap_err();
        assert_eq!(err, SemaError::UnknownFunction("g".to_string()));
    }

    #[test]
    fn call_argument_arity_is_checked_but_not_types() {
        let mut sema = Sema::new();
        sema.enter_function(PrimType::Int);
        let param = sema
            .declare_parameter(PrimType::Int, Symbol::intern("x"))
            .unwrap();
        let body = Stmt::Return(Expr {
            kind: ExprKind::Variable(param),
            ty: PrimType::Int,
        });
        sema.exit_function();
        sema.act_on_function_declaration(PrimType::Int, Symbol::intern("f"), vec![param], body)
            .unwrap();

        let err = sema
            .act_on_call_expression(Symbol::intern("f"), Vec::new())
            .unwrap_err();
        assert!(matches!(err, SemaError::ArityMismatch { expected: 1, actual: 0, .. }));

        // Wrong argument *type* is accepted as long as arity matches.
        let wrong_type_arg = Expr {
            kind: ExprKind::FloatLiteral(1.0),
            ty: PrimType::Float,
        };
        assert!(sema
            .act_on_call_expression(Symbol::intern("f"), vec![wrong_type_arg])
            .is_ok());
    }

    #[test]
    fn function_cannot_call_itself_or_a_later_function() {
        // Functions are registered in `function_order` only once their body
        // is fully parsed, so lookups while parsing a body never see it.
        let sema = Sema::new();
        assert!(sema
            .act_on_call_expression(Symbol::intern("f"), Vec::new())
            .is_err());
    }

    #[test]
    fn return_type_mismatch_is_rejected() {
        let mut sema = Sema::new();
        sema.enter_function(PrimType::Int);
        let float_one = Expr {
            kind: ExprKind::FloatLiteral(1.0),
            ty: PrimType::Float,
        };
        let err = sema.act_on_return_statement(float_one).unwrap_err();
        assert_eq!(err, SemaError::ReturnTypeMismatch);
    }
}
