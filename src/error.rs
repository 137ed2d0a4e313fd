//! # Error Handling
//!
//! This module defines the error type shared by every stage of the command
//! lifecycle. It uses `thiserror` to give each failure a descriptive message
//! that can be shown to the user as-is.
//!
//! The variants fall into four groups:
//!
//! - **Usage**: the command line could not be parsed (or `--help` /
//!   `--version` was requested). These carry clap's own rendering and exit
//!   code.
//! - **Validation**: a missing settings file, a `--user` flag given by a
//!   non-root process, an unknown OS user or a failed user lookup, or a
//!   check added by a command.
//! - **Settings**: the settings file could not be read, is not valid YAML, or
//!   is not a mapping.
//! - **Command**: the command's own `go` step failed.
//!
//! Exit-code translation lives in [`Error::exit_code`] so that library code
//! only ever returns values; the process is terminated by the binary.

use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

/// Main error type for ghtorrent command operations
#[derive(Error, Debug)]
pub enum Error {
    /// The command line could not be parsed, or help/version output was
    /// requested.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// `--config` was not given and no `config.yaml` exists in the working
    /// directory.
    #[error(
        "No config file in default location ({}). You need to specify the --config parameter. \
         Read the documentation on how to create a config.yaml file.",
        dir.display()
    )]
    DefaultConfigNotFound { dir: PathBuf },

    /// The file named by `--config` does not exist.
    #[error("Cannot find file {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// `--user` was given but the process is not running as root.
    #[error("Option --user (-u) can only be specified by root")]
    UserRequiresRoot,

    /// `--user` names an account that does not exist on this system.
    #[error("No such user: {user}")]
    NoSuchUser { user: String },

    /// The system user database could not be queried.
    #[error("Cannot look up user {user}: {source}")]
    UserLookup {
        user: String,
        source: std::io::Error,
    },

    /// A check contributed by a command's own validation failed.
    #[error("{message}")]
    InvalidOption { message: String },

    /// The settings file exists but could not be read.
    #[error("Cannot read settings from {}: {source}", path.display())]
    SettingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not valid YAML.
    #[error("Cannot parse settings in {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// The settings document parsed, but its top level is not a mapping.
    #[error("Settings must be a YAML mapping, found {found}")]
    SettingsFormat { found: &'static str },

    /// Writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error outside of file loading (e.g. parsing an in-memory
    /// document or converting a setting to a typed value).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The command's `go` step returned an error.
    #[error(transparent)]
    Command(#[from] anyhow::Error),
}

impl Error {
    /// Shorthand for a failed command-specific validation check.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidOption {
            message: message.into(),
        }
    }

    /// The process exit code this error translates to.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(e) => e.exit_code(),
            _ => exit_codes::ERROR,
        }
    }

    /// True for help/version requests, which clap reports through its error
    /// type but which are not failures.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::Usage(e) if e.exit_code() == exit_codes::SUCCESS)
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
