//! Project version, read from the packaged `VERSION` file.

const VERSION_FILE: &str = include_str!("../VERSION");

/// Returns the project version as recorded in the `VERSION` file.
pub fn version() -> &'static str {
    VERSION_FILE.trim()
}
