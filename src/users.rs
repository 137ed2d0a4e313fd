//! OS user lookup used to validate the `--user` flag.

use std::io;

/// Access to the identity of the running process and the system's user
/// database.
pub trait UserDirectory {
    /// Whether the process runs with superuser privileges.
    fn is_superuser(&self) -> bool;

    /// Whether an account called `name` exists.
    fn user_exists(&self, name: &str) -> io::Result<bool>;
}

/// The real user database of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUsers;

#[cfg(unix)]
impl UserDirectory for SystemUsers {
    fn is_superuser(&self) -> bool {
        nix::unistd::Uid::current().is_root()
    }

    fn user_exists(&self, name: &str) -> io::Result<bool> {
        if name.contains('\0') {
            return Ok(false);
        }
        let entry = nix::unistd::User::from_name(name).map_err(io::Error::from)?;
        Ok(entry.is_some())
    }
}

#[cfg(not(unix))]
impl UserDirectory for SystemUsers {
    fn is_superuser(&self) -> bool {
        false
    }

    fn user_exists(&self, _name: &str) -> io::Result<bool> {
        Ok(false)
    }
}
