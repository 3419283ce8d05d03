//! Binary entrypoint for the OptimusHQ server launcher.
//!
//! The binary delegates to [`optimushq::run`], which validates the
//! environment, resolves the pre-built server entry script, and supervises
//! the spawned server process until it exits.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    optimushq::run(std::env::args_os(), &mut stdout, &mut stderr)
}
