//! Reads a program from stdin and writes its compiled form to stdout.
//!
//! Set `RUST_LOG=debug` (or `trace`) to see per-phase instrumentation on
//! stderr; it never affects stdout or the exit status.

use std::io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let result = tinyc_drv::compile(&mut io::stdin(), &mut io::stdout());
    std::process::exit(tinyc_drv::exit_code(&result));
}
