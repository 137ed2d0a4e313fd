//! # ght-settings
//!
//! Prints the settings a GHTorrent command would run with: the YAML settings
//! file after `--addr`, `--username` and `--password` overrides have been
//! applied. `--key` narrows the output to a single setting.
//!
//! The binary is a thin wrapper: the lifecycle is driven by
//! `ghtorrent::command`, and this crate only supplies the `go` step.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    ghtorrent::command::main::<cli::ShowSettings>()
}
