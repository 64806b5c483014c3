//! Arena indices for the declarations `Sema` owns.
//!
//! The original design models `Variable`/`Assignment`/`Call` as weak
//! references into declarations owned elsewhere in the AST. Rust has no
//! implicit-cycle shared mutability story that makes that pleasant, so
//! declarations live in two arenas owned by `Sema`/`Unit`, and every
//! reference is a `u32` index instead of a pointer.

use tinyc_util::define_idx;

define_idx!(VarId);
define_idx!(FuncId);
