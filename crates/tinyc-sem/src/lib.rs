//! Semantic analysis: the `Sema` companion object the parser drives while
//! it recognizes the grammar, and the type-checked AST it builds.
//!
//! There is no separate analysis pass over a pre-built syntax tree — the
//! parser calls an `act_on_*` method the instant it recognizes a
//! construct, and `Sema` validates and builds that node right there. A
//! construct that fails an `act_on_*` check is a fatal error: unlike a
//! syntax mismatch, there is no alternative production to backtrack into.

mod ast;
mod errors;
mod ids;
mod sema;
mod ty;

pub use ast::{Expr, ExprKind, FunctionDecl, Stmt, Unit, VariableDecl};
pub use errors::SemaError;
pub use ids::{FuncId, VarId};
pub use sema::Sema;
pub use ty::{BinOpKind, PrimType};

pub use tinyc_util::Symbol;
