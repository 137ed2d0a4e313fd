//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::MINIMAL);
//!     fixture.command().assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common settings files for testing.
#[allow(dead_code)]
pub mod configs {
    /// Settings with every key the standard flags can override.
    pub const MINIMAL: &str = r#"attach_ip: 0.0.0.0
github_username: octocat
github_passwd: secret
"#;

    /// Settings with keys only commands care about.
    pub const MIRROR: &str = r#"attach_ip: 0.0.0.0
mongo_host: localhost
mirror:
  reqrate: 83
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "attach_ip: [unclosed\n";

    /// A document that is not a mapping.
    pub const SEQUENCE: &str = "- attach_ip\n- github_username\n";
}

/// A temporary working directory, optionally holding a settings file.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `config.yaml` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("config.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a `ght-settings` command running in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ght-settings");
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
