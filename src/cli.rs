//! The `ght-settings` command.

use std::io::Write;

use anyhow::{bail, Context as _, Result};
use clap::{Args, FromArgMatches};

use ghtorrent::command::{Command, Context};
use ghtorrent::settings::display_value;

/// Flags specific to `ght-settings`.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Print only the value of this top-level setting
    #[arg(short, long, value_name = "KEY")]
    pub key: Option<String>,
}

/// Show the effective settings.
#[derive(Debug, Default)]
pub struct ShowSettings;

impl Command for ShowSettings {
    fn about(&self) -> Option<&str> {
        Some("Print the settings a GHTorrent command would run with")
    }

    fn prepare_options(&self, options: clap::Command) -> clap::Command {
        SettingsArgs::augment_args(options)
    }

    fn go(&mut self, ctx: &Context, out: &mut dyn Write) -> Result<()> {
        let args = SettingsArgs::from_arg_matches(ctx.options.matches())
            .context("reading ght-settings flags")?;

        match args.key {
            Some(key) => {
                let Some(value) = ctx.settings.get(&key) else {
                    bail!("No such setting: {key}");
                };
                writeln!(out, "{}", display_value(Some(value)))?;
            }
            None => write!(out, "{}", ctx.settings.to_yaml_string()?)?,
        }
        Ok(())
    }
}
