//! Error types for LLVM code generation.

use thiserror::Error;

/// Error type for LLVM code generation.
///
/// The visitor itself never fails on a well-typed [`tinyc_sem::Unit`] — every
/// failure mode here is a wrapped builder-API error (inkwell surfaces LLVM's
/// own error strings rather than a typed enum) or a failed post-emission
/// verification.
#[derive(Debug, Error)]
pub enum CodeGenError {
    /// An inkwell builder call returned an error string.
    #[error("LLVM builder error: {0}")]
    Builder(String),

    /// `FunctionValue::verify` rejected the emitted function, most often
    /// because a control-flow path fell off the end of the function
    /// without a `return` statement.
    #[error("function '{0}' failed LLVM verification")]
    VerificationFailed(String),
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
