//! Logger setup for ghtorrent commands.

use env_logger::Env;
use log::SetLoggerError;

/// Install `env_logger` as the process logger.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output under `--verbose`. Fails if a logger is already installed.
pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init()
}
