//! Semantic diagnostics.
//!
//! This draws a hard line between syntactic mismatches (not
//! user-facing; the parser just tries another alternative) and semantic
//! violations, which are always fatal and always reported as exactly one
//! line. `SemaError` is the taxonomy of that second class: one variant per
//! diagnostic kind, `Display`-formatted as the single line the
//! driver prints verbatim.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemaError {
    #[error("duplicate variable name in scope: {0}")]
    DuplicateVariable(String),

    #[error("initializer type mismatch")]
    InitializerTypeMismatch,

    #[error("duplicate function name: {0}")]
    DuplicateFunction(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("argument arity mismatch: function {name} expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("assigned value type mismatch")]
    AssignmentTypeMismatch,

    #[error("mixed-type binary operands")]
    MixedTypeBinaryOperands,

    #[error("return value type mismatch")]
    ReturnTypeMismatch,

    #[error("duplicate parameter name: {0}")]
    DuplicateParameter(String),
}
