//! Process exit codes used by ghtorrent commands.
//!
//! - `0`: success, including `--help` and `--version`
//! - `1`: any validation, settings or command failure
//! - `2`: invalid command-line usage (reported by clap)

/// Successful termination
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 2;
