//! tinyc-drv - the compiler driver's library half.
//!
//! Reads an entire source program from a [`Read`], runs the lexer, the
//! parser (which drives semantic analysis the instant it recognizes each
//! construct), and the code generator in sequence, and renders the
//! result to a [`Write`]: the emitted module's textual LLVM IR on
//! success, or exactly one diagnostic line on any lexical, syntactic, or
//! semantic failure. [`exit_code`] maps that outcome onto the process's
//! contract — status `0` on success, `-1` on any compilation failure.
//!
//! There is no CLI: no flags, no positional arguments, no environment
//! variables beyond the standard `tracing`/`RUST_LOG` convention that
//! governs how much phase instrumentation reaches stderr.

use std::io::{Read, Write};

use inkwell::context::Context;
use thiserror::Error;
use tracing::{debug, instrument};

pub use tinyc_gen::CodeGenError;
pub use tinyc_par::ParseError;

/// Everything that can keep a module from being emitted.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Reading the source program from its input stream failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The lexer gave up on an unrecognized byte. Not part of the
    /// semantic diagnostic taxonomy `SemaError` covers, so it carries its
    /// own one-line message rather than a typed variant.
    #[error("{0}")]
    Lex(String),

    /// A syntax error, or a semantic rejection surfaced through the
    /// parser. `Display` is the one-line diagnostic printed to the
    /// output stream.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Code generation could not emit or verify a function.
    #[error("{0}")]
    CodeGen(#[from] CodeGenError),
}

/// The process exit status for a pipeline outcome: `0` on success, `-1`
/// on any compilation failure. A failure to even read the input stream
/// is not a compilation failure in the taxonomy's sense and exits `1`
/// instead — the taxonomy has nothing to say about an input that was
/// never read.
pub fn exit_code(result: &Result<(), DriverError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(DriverError::Io(_)) => 1,
        Err(_) => -1,
    }
}

/// Runs the full pipeline over everything read from `input`, writing
/// either the emitted module's textual IR or a single diagnostic line
/// to `output`.
///
/// The diagnostic line (if any) is written before this returns `Err` —
/// callers only need [`exit_code`] to pick the right process exit
/// status, not to format anything themselves.
#[instrument(skip_all)]
pub fn compile(input: &mut impl Read, output: &mut impl Write) -> Result<(), DriverError> {
    let mut source = String::new();
    input.read_to_string(&mut source)?;

    match run_pipeline(&source) {
        Ok(ir) => {
            write!(output, "{ir}")?;
            Ok(())
        },
        Err(e) => {
            writeln!(output, "{e}")?;
            Err(e)
        },
    }
}

#[instrument(skip_all)]
fn run_pipeline(source: &str) -> Result<String, DriverError> {
    debug!(bytes = source.len(), "tokenizing");
    let mut handler = tinyc_util::Handler::new();
    let tokens = tinyc_lex::tokenize(source, &mut handler);
    if handler.has_errors() {
        let message = handler
            .diagnostics()
            .into_iter()
            .find(|d| d.level == tinyc_util::Level::Error)
            .expect("has_errors implies at least one error-level diagnostic")
            .message;
        return Err(DriverError::Lex(message));
    }

    debug!(tokens = tokens.len(), "parsing");
    let unit = tinyc_par::parse(tokens)?;

    debug!(functions = unit.function_order.len(), "generating code");
    let context = Context::create();
    let module = tinyc_gen::generate(&context, &unit, "tinyc")?;

    Ok(module.print_to_string().to_string())
}
