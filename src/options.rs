//! # Command-line options
//!
//! Every ghtorrent command accepts the same standard flags:
//!
//! | Flag | Short | Default | Effect |
//! |---|---|---|---|
//! | `--config` | `-c` | `config.yaml` | settings file location |
//! | `--verbose` | `-v` | off | full trace on error |
//! | `--addr` | `-a` | | overrides `attach_ip` |
//! | `--username` | `-s` | | overrides `github_username` |
//! | `--password` | | | overrides `github_passwd` |
//!
//! Commands register their own flags on the same `clap::Command` before the
//! standard ones are added, and read them back through [`Options::get`] or
//! [`Options::matches`].

use std::any::Any;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches};

use crate::settings::keys;

/// Settings file used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "config.yaml";

/// Flag id that, when registered by a command, requests a run as another
/// OS user.
pub const USER_FLAG: &str = "user";

/// Flags that override a setting, paired with the key they replace.
pub const OVERRIDES: [(&str, &str); 3] = [
    ("addr", keys::ATTACH_IP),
    ("username", keys::GITHUB_USERNAME),
    ("password", keys::GITHUB_PASSWD),
];

/// Add the standard ghtorrent flags to `command`.
pub fn standard_options(command: clap::Command) -> clap::Command {
    command
        .next_help_heading("Standard options")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_CONFIG)
                .help("config.yaml file location"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("verbose mode"),
        )
        .arg(
            Arg::new("addr")
                .short('a')
                .long("addr")
                .value_name("IP")
                .help("ip address to use for performing requests"),
        )
        .arg(
            Arg::new("username")
                .short('s')
                .long("username")
                .value_name("USER")
                .help("Username at Github"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .value_name("PASSWORD")
                .help("Password at Github"),
        )
}

/// The `--user` value, whatever value parser the command registered it
/// with. Only a value given on the command line or through the environment
/// counts.
fn requested_user(matches: &ArgMatches) -> Option<String> {
    let mut raw = matches.try_get_raw(USER_FLAG).ok().flatten()?;
    if !matches!(
        matches.value_source(USER_FLAG),
        Some(ValueSource::CommandLine) | Some(ValueSource::EnvVariable)
    ) {
        return None;
    }
    Some(
        raw.next()
            .map(|value| value.to_string_lossy().into_owned())
            .unwrap_or_default(),
    )
}

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Options {
    config: PathBuf,
    config_given: bool,
    verbose: bool,
    addr: Option<String>,
    username: Option<String>,
    password: Option<String>,
    user: Option<String>,
    matches: ArgMatches,
}

impl Options {
    /// Parse `args` (including the program name) against `command`.
    pub fn parse<I, T>(command: clap::Command, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command.try_get_matches_from(args)?;
        Ok(Self::from_matches(matches))
    }

    /// Extract the standard options from already parsed matches.
    pub fn from_matches(matches: ArgMatches) -> Self {
        let string = |id: &str| matches.try_get_one::<String>(id).ok().flatten().cloned();

        Self {
            config: matches
                .try_get_one::<PathBuf>("config")
                .ok()
                .flatten()
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG)),
            config_given: matches!(
                matches.value_source("config"),
                Some(ValueSource::CommandLine) | Some(ValueSource::EnvVariable)
            ),
            verbose: matches
                .try_get_one::<bool>("verbose")
                .ok()
                .flatten()
                .copied()
                .unwrap_or(false),
            addr: string("addr"),
            username: string("username"),
            password: string("password"),
            user: requested_user(&matches),
            matches,
        }
    }

    /// Path of the settings file, as given on the command line.
    pub fn config(&self) -> &Path {
        &self.config
    }

    /// Whether `--config` was given explicitly.
    pub fn config_given(&self) -> bool {
        self.config_given
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn addr(&self) -> Option<&str> {
        self.addr.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The `--user` value, if the command registered that flag and it was
    /// given.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// The value of a standard override flag by id.
    pub fn override_flag(&self, id: &str) -> Option<&str> {
        match id {
            "addr" => self.addr(),
            "username" => self.username(),
            "password" => self.password(),
            _ => None,
        }
    }

    /// The value of any flag, including those registered by the command.
    ///
    /// Returns `None` when the flag is unknown, was not given, or holds a
    /// different type.
    pub fn get<T: Any + Clone + Send + Sync + 'static>(&self, id: &str) -> Option<T> {
        self.matches.try_get_one::<T>(id).ok().flatten().cloned()
    }

    /// Whether a boolean flag registered with `ArgAction::SetTrue` was set.
    pub fn flag(&self, id: &str) -> bool {
        self.get::<bool>(id).unwrap_or(false)
    }

    /// Raw clap matches, for commands that need more than [`Options::get`].
    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }
}
