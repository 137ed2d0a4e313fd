//! # Error reporting
//!
//! Turns a lifecycle [`Error`] into what the user sees on the terminal.
//!
//! - Failures of the command's own `go` step print the bare message, then a
//!   trace: the whole trace under `--verbose`, otherwise only its first line.
//! - Validation and settings failures print `error: <message>` and a pointer
//!   to `--help`.
//! - Usage errors, help and version output are rendered by clap.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::env;
use std::io::{self, Write};

use crate::error::Error;
use crate::output::OutputConfig;

/// Printed when a command error carries neither causes nor a backtrace.
pub const NO_TRACE_HINT: &str = "(run with RUST_BACKTRACE=1 to capture a backtrace)";

/// Make errors created from now on capture a backtrace, unless
/// `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE` is already set.
///
/// Must run before the first backtrace capture: the standard library reads
/// these variables once.
pub fn enable_backtraces() {
    if env::var_os("RUST_LIB_BACKTRACE").is_none() && env::var_os("RUST_BACKTRACE").is_none() {
        env::set_var("RUST_LIB_BACKTRACE", "1");
    }
}

/// Trace lines for a command error: its chain of causes followed by the
/// captured backtrace, if any.
pub fn trace_lines(err: &anyhow::Error) -> Vec<String> {
    let causes = err.chain().skip(1).map(|cause| cause.to_string());
    build_trace(causes, err.backtrace())
}

fn build_trace(causes: impl Iterator<Item = String>, backtrace: &Backtrace) -> Vec<String> {
    let mut lines: Vec<String> = causes.map(|cause| format!("caused by: {cause}")).collect();

    if backtrace.status() == BacktraceStatus::Captured {
        lines.extend(backtrace.to_string().lines().map(str::to_string));
    }

    if lines.is_empty() {
        lines.push(NO_TRACE_HINT.to_string());
    }
    lines
}

/// Write the report for `err` to `stdout` or `stderr`.
pub fn report(
    err: &Error,
    verbose: bool,
    output: &OutputConfig,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> io::Result<()> {
    match err {
        Error::Usage(e) => {
            let rendered = e.render();
            let target: &mut dyn Write = if e.use_stderr() { stderr } else { stdout };
            if output.use_color {
                write!(target, "{}", rendered.ansi())
            } else {
                write!(target, "{}", rendered)
            }
        }
        Error::Command(e) => {
            writeln!(stderr, "{e}")?;
            let trace = trace_lines(e);
            let shown = if verbose { trace.len() } else { 1 };
            for line in trace.iter().take(shown) {
                writeln!(stderr, "{line}")?;
            }
            Ok(())
        }
        other => {
            writeln!(stderr, "{} {}", output.error_label(), other)?;
            writeln!(stderr, "Try --help for help.")
        }
    }
}
