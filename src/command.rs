//! # Command lifecycle
//!
//! Every ghtorrent command-line utility implements [`Command`] and is driven
//! by a [`Runner`] through the same fixed sequence:
//!
//! 1. [`Command::prepare_options`] registers the command's own flags, then
//!    the standard flags are added and the command line is parsed.
//! 2. [`Command::validate`] checks the parsed options and the environment.
//! 3. The YAML settings file is loaded.
//! 4. `--addr`, `--username` and `--password` override `attach_ip`,
//!    `github_username` and `github_passwd`.
//! 5. [`Command::go`] does the actual work.
//!
//! The first failure ends the run. [`Runner::run`] returns it as an
//! [`Error`](crate::error::Error); [`Runner::execute`] and [`main`] also
//! report it and translate it into an exit code.
//!
//! ```no_run
//! use std::io::Write;
//!
//! use ghtorrent::command::{self, Command, Context};
//!
//! #[derive(Default)]
//! struct Hello;
//!
//! impl Command for Hello {
//!     fn go(&mut self, ctx: &Context, out: &mut dyn Write) -> anyhow::Result<()> {
//!         writeln!(out, "{} settings loaded", ctx.settings.len())?;
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> std::process::ExitCode {
//!     command::main::<Hello>()
//! }
//! ```

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::{debug, info};

use crate::error::Result;
use crate::exit_codes;
use crate::logging;
use crate::options::{standard_options, Options, OVERRIDES};
use crate::output::OutputConfig;
use crate::report;
use crate::settings::{display_value, Settings};
use crate::users::{SystemUsers, UserDirectory};
use crate::validate::ValidationContext;
use crate::version::version;

/// Program name used when the argument list is empty.
const FALLBACK_NAME: &str = "ghtorrent";

/// A command-line utility driven by [`Runner`].
pub trait Command {
    /// One-line description shown by `--help`.
    fn about(&self) -> Option<&str> {
        None
    }

    /// Register command-specific flags.
    ///
    /// Called before the standard flags are added, so the command must not
    /// reuse their names or the short letters `c`, `v`, `a`, `s`.
    fn prepare_options(&self, options: clap::Command) -> clap::Command {
        options
    }

    /// Check the parsed options before settings are loaded.
    ///
    /// Overrides should call `ctx.standard_checks()` to keep the shared
    /// checks.
    fn validate(&self, ctx: &ValidationContext<'_>) -> Result<()> {
        ctx.standard_checks()
    }

    /// The command's work. Normal output goes to `out`.
    fn go(&mut self, _ctx: &Context, _out: &mut dyn Write) -> anyhow::Result<()> {
        Ok(())
    }
}

/// State handed to [`Command::go`].
#[derive(Debug, Clone)]
pub struct Context {
    /// Program name, from the first argument.
    pub name: String,
    /// The full argument list, program name included.
    pub args: Vec<OsString>,
    pub options: Options,
    /// Settings after command-line overrides.
    pub settings: Settings,
}

/// Basename of the program in `args[0]`.
pub fn command_name(args: &[OsString]) -> String {
    args.first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// Drives a [`Command`] through its lifecycle for one invocation.
pub struct Runner {
    args: Vec<OsString>,
    cwd: PathBuf,
    users: Box<dyn UserDirectory>,
    output: OutputConfig,
    capture_backtraces: bool,
}

impl Runner {
    /// Create a runner for `args` (program name first) run from `cwd`.
    pub fn new<I, T>(args: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
            users: Box::new(SystemUsers),
            output: OutputConfig::without_color(),
            capture_backtraces: false,
        }
    }

    /// Create a runner for this process's arguments and working directory.
    pub fn from_env() -> io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(std::env::args_os(), cwd)
            .with_output(OutputConfig::detect())
            .with_backtraces(true))
    }

    /// Use `users` to answer `--user` checks.
    pub fn with_users(mut self, users: impl UserDirectory + 'static) -> Self {
        self.users = Box::new(users);
        self
    }

    /// Style reports according to `output`.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Turn on backtrace capture for `--verbose` runs in [`Runner::execute`].
    ///
    /// This sets `RUST_LIB_BACKTRACE` for the whole process unless the user
    /// already chose a backtrace setting.
    pub fn with_backtraces(mut self, capture: bool) -> Self {
        self.capture_backtraces = capture;
        self
    }

    pub fn name(&self) -> String {
        command_name(&self.args)
    }

    /// Parse the command line with the command's flags and the standard
    /// ones.
    pub fn process_options<C: Command + ?Sized>(&self, command: &C) -> Result<Options> {
        let mut cli = clap::Command::new(self.name()).version(version());
        if let Some(about) = command.about() {
            cli = cli.about(about.to_string());
        }
        let cli = standard_options(command.prepare_options(cli));
        Ok(Options::parse(cli, self.args.iter().cloned())?)
    }

    /// Run the lifecycle up to and including [`Command::go`].
    ///
    /// Override messages and the command's output are written to `stdout`.
    pub fn run<C: Command + ?Sized>(
        &self,
        command: &mut C,
        stdout: &mut dyn Write,
    ) -> Result<()> {
        let options = self.process_options(command)?;
        self.run_with_options(command, options, stdout)
    }

    fn run_with_options<C: Command + ?Sized>(
        &self,
        command: &mut C,
        options: Options,
        stdout: &mut dyn Write,
    ) -> Result<()> {
        let name = self.name();
        debug!("{}: options parsed", name);

        let validation = ValidationContext {
            options: &options,
            cwd: &self.cwd,
            users: self.users.as_ref(),
        };
        command.validate(&validation)?;
        let config_path = validation.config_path();

        let mut settings = Settings::load(&config_path)?;
        apply_overrides(&mut settings, &options, stdout)?;

        let ctx = Context {
            name,
            args: self.args.clone(),
            options,
            settings,
        };
        debug!("{}: running", ctx.name);
        command.go(&ctx, stdout)?;
        Ok(())
    }

    /// Set up logging, run the lifecycle, report any failure, and return the
    /// exit code. Failures writing the report itself are ignored.
    pub fn execute<C: Command + ?Sized>(
        &self,
        command: &mut C,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> i32 {
        let (verbose, result) = match self.process_options(command) {
            Ok(options) => {
                let verbose = options.verbose();
                if logging::init(verbose).is_err() {
                    debug!("Logger already installed");
                }
                if verbose && self.capture_backtraces {
                    report::enable_backtraces();
                }
                (verbose, self.run_with_options(command, options, stdout))
            }
            Err(e) => (false, Err(e)),
        };

        match result {
            Ok(()) => exit_codes::SUCCESS,
            Err(err) => {
                let _ = report::report(&err, verbose, &self.output, stdout, stderr);
                err.exit_code()
            }
        }
    }
}

/// Apply `--addr`, `--username` and `--password` to `settings`, announcing
/// each replacement on `stdout`.
pub fn apply_overrides(
    settings: &mut Settings,
    options: &Options,
    stdout: &mut dyn Write,
) -> io::Result<()> {
    for (flag, key) in OVERRIDES {
        let Some(value) = options.override_flag(flag) else {
            continue;
        };
        writeln!(
            stdout,
            "Overriding configuration {}={} with cmd line {}",
            key,
            display_value(settings.get(key)),
            value
        )?;
        settings.override_value(key, value);
        info!("Setting {} overridden from --{}", key, flag);
    }
    Ok(())
}

/// Construct `C`, run it against this process's arguments, and return the
/// exit code for `main`.
pub fn main<C: Command + Default>() -> ExitCode {
    let runner = match Runner::from_env() {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("error: cannot determine working directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut command = C::default();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let code = runner.execute(&mut command, &mut stdout, &mut stderr);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
