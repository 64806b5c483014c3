//! The type-checked AST that `Sema` builds and `tinyc-gen` visits.
//!
//! Declarations (`VariableDecl`, `FunctionDecl`) live in arenas owned by
//! [`Unit`]; every other node refers to them by [`VarId`]/[`FuncId`] rather
//! than by pointer (see [`crate::ids`]).

use tinyc_util::{IndexVec, Symbol};

use crate::ids::{FuncId, VarId};
use crate::ty::{BinOpKind, PrimType};

/// A single expression, together with the result type sema resolved for it.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: PrimType,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    IntLiteral(i64),
    FloatLiteral(f64),
    /// A reference to a declared variable or parameter.
    Variable(VarId),
    /// `name = value`. Resolves to `value`'s type, which sema has already
    /// checked matches the declaration's type.
    Assignment { var: VarId, value: Box<Expr> },
    Call { func: FuncId, args: Vec<Expr> },
    Binary {
        op: BinOpKind,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `T(expr)`. Always yields `target`, regardless of `inner`'s type.
    Cast { target: PrimType, inner: Box<Expr> },
}

/// A declared variable, local or parameter.
///
/// Locals produced via the `var_decl` grammar rule always carry an
/// initializer after sema runs (explicit or the synthesized default).
/// Parameters never do: their value comes from the caller at the call site,
/// not from an expression evaluated on entry, so `init` is `None` for them
/// and the code generator binds them directly from the function's SSA
/// arguments instead of visiting an initializer.
#[derive(Debug, Clone)]
pub struct VariableDecl {
    pub ty: PrimType,
    pub name: Symbol,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    /// References the arena slot created by `act_on_variable_declaration`.
    VariableDecl(VarId),
    ExpressionStmt(Expr),
    Return(Expr),
    If { cond: Expr, body: Box<Stmt> },
    While { cond: Expr, body: Box<Stmt> },
    For {
        init: Expr,
        cond: Expr,
        step: Expr,
        body: Box<Stmt>,
    },
    Compound(Vec<Stmt>),
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub ret: PrimType,
    pub name: Symbol,
    pub params: Vec<VarId>,
    pub body: Stmt,
}

/// A fully parsed, type-checked translation unit: the arenas that own every
/// declaration, plus the order functions were declared in.
#[derive(Debug)]
pub struct Unit {
    pub vars: IndexVec<VarId, VariableDecl>,
    pub funcs: IndexVec<FuncId, FunctionDecl>,
    /// Declaration order, which is also emission order for the code generator.
    pub function_order: Vec<FuncId>,
}

impl Unit {
    pub fn functions(&self) -> impl Iterator<Item = (FuncId, &FunctionDecl)> {
        self.function_order.iter().map(|&id| (id, &self.funcs[id]))
    }
}
