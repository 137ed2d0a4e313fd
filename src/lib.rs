//! # GHTorrent Command Library
//!
//! Shared plumbing for the GHTorrent command-line utilities. Each utility is a
//! type implementing [`command::Command`]; this crate parses its flags,
//! validates the environment, loads the YAML settings file, applies
//! command-line overrides and then hands control to the command.
//!
//! ## Quick Example
//!
//! ```
//! use std::io::Write;
//!
//! use ghtorrent::command::{Command, Context, Runner};
//!
//! #[derive(Default)]
//! struct ShowAddress {
//!     seen: Option<String>,
//! }
//!
//! impl Command for ShowAddress {
//!     fn go(&mut self, ctx: &Context, _out: &mut dyn Write) -> anyhow::Result<()> {
//!         self.seen = ctx.settings.get_str("attach_ip").map(str::to_string);
//!         Ok(())
//!     }
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("config.yaml"), "attach_ip: 0.0.0.0\n").unwrap();
//!
//! let runner = Runner::new(["ght-show", "--addr", "10.1.1.1"], dir.path());
//! let mut command = ShowAddress::default();
//! let mut stdout: Vec<u8> = Vec::new();
//! runner.run(&mut command, &mut stdout).unwrap();
//!
//! assert_eq!(command.seen.as_deref(), Some("10.1.1.1"));
//! ```
//!
//! ## Modules
//!
//! - **`command`**: the [`Command`](command::Command) trait, the
//!   [`Runner`](command::Runner) that drives it, and the `main` helper.
//! - **`options`**: the standard flags and the parsed [`Options`](options::Options).
//! - **`validate`**: checks run before settings are loaded.
//! - **`settings`**: the YAML settings mapping and its merge/override helpers.
//! - **`report`** and **`output`**: how failures are shown to the user.
//! - **`error`** and **`exit_codes`**: failure types and their exit codes.

pub mod command;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod options;
pub mod output;
pub mod report;
pub mod settings;
pub mod users;
pub mod validate;
pub mod version;

#[cfg(test)]
mod settings_proptest;
