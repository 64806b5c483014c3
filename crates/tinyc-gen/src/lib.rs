//! tinyc-gen - LLVM IR code generation for the tinyc compiler.
//!
//! Lowers a type-checked [`tinyc_sem::Unit`] straight to LLVM IR via
//! [`inkwell`], with no intermediate representation of its own. There is
//! exactly one entry point: [`generate`].

mod codegen;
mod error;
mod types;

pub use codegen::generate;
pub use error::{CodeGenError, Result};
