//! # Option validation
//!
//! Checks run after the command line is parsed and before any settings are
//! loaded. [`standard_checks`] is what every command gets by default;
//! commands that override [`Command::validate`](crate::command::Command::validate)
//! call it first and then add their own checks.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::options::{Options, DEFAULT_CONFIG};
use crate::users::UserDirectory;

/// Everything validation is allowed to look at.
pub struct ValidationContext<'a> {
    pub options: &'a Options,
    pub cwd: &'a Path,
    pub users: &'a dyn UserDirectory,
}

impl ValidationContext<'_> {
    /// The settings file path, resolved against the working directory.
    pub fn config_path(&self) -> PathBuf {
        self.resolve(self.options.config())
    }

    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }

    /// Run the checks shared by all commands.
    pub fn standard_checks(&self) -> Result<()> {
        standard_checks(self)
    }
}

/// Validate the settings file location and the `--user` flag.
pub fn standard_checks(ctx: &ValidationContext<'_>) -> Result<()> {
    if ctx.options.config_given() {
        if !file_exists(&ctx.config_path()) {
            return Err(Error::ConfigNotFound {
                path: ctx.options.config().to_path_buf(),
            });
        }
    } else if !file_exists(&ctx.resolve(Path::new(DEFAULT_CONFIG))) {
        return Err(Error::DefaultConfigNotFound {
            dir: ctx.cwd.to_path_buf(),
        });
    }

    if let Some(user) = ctx.options.user() {
        if !ctx.users.is_superuser() {
            return Err(Error::UserRequiresRoot);
        }
        let exists = ctx
            .users
            .user_exists(user)
            .map_err(|source| Error::UserLookup {
                user: user.to_string(),
                source,
            })?;
        if !exists {
            return Err(Error::NoSuchUser {
                user: user.to_string(),
            });
        }
    }

    debug!("Options validated");
    Ok(())
}

/// Whether anything can be stat'ed at `path`.
pub fn file_exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}
