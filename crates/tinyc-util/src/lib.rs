//! tinyc-util - Core Utilities and Foundation Types
//!
//! Fundamental utilities shared by every phase of the compiler: string
//! interning, typed indices, diagnostics, spans, and stable definition ids.
//! These are the zero-cost bits the rest of the workspace builds on, not
//! anything specific to one language or pass.

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use def_id::{DefId, DefIdGenerator};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use error::{
    DiagnosticError, DiagnosticResult, IndexVecError, IndexVecResult, SourceMapError,
    SourceMapResult, SymbolError, SymbolResult,
};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;

// Re-export commonly used general-purpose types that every crate in the
// workspace reaches for instead of re-adding its own hasher dependency.
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;

// `define_idx!` lives in `index_vec` (and is re-exported at the crate root
// via `#[macro_export]`), generating a newtype index that implements `Idx`.
