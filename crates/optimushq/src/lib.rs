//! Launcher runtime for the OptimusHQ multi-agent platform.
//!
//! The crate validates the launch environment, resolves the pre-built
//! server entry under the package root, prints the start-up banner, then
//! spawns the server under a JavaScript runtime with inherited stdio and
//! supervises it: termination signals are forwarded verbatim and the
//! launcher's exit code mirrors the server's own.
//!
//! The pipeline is driven through [`run`], which takes the argument list
//! and both output streams so every path is exercisable from tests with
//! substituted IO and environment state.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

mod config;
mod env;
mod launcher;
mod output;
mod paths;
mod telemetry;

use config::LaunchConfig;
use env::{Environment, SystemEnvironment};
use launcher::{LaunchError, LaunchRequest, SystemLauncher, resolve_runtime};
use output::{write_banner, write_usage};
use paths::{locate_server_entry, package_root};

/// Bundles the IO streams provided to the launcher runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

struct LauncherRunner<'a, W: Write, E: Write> {
    io: &'a mut IoStreams<'a, W, E>,
    env: &'a dyn Environment,
}

impl<'a, W, E> LauncherRunner<'a, W, E>
where
    W: Write,
    E: Write,
{
    fn new(io: &'a mut IoStreams<'a, W, E>, env: &'a dyn Environment) -> Self {
        Self { io, env }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut launcher = SystemLauncher;
        self.run_with_handler(args, |request| launcher.launch(request))
    }

    fn run_with_handler<I, F>(&mut self, args: I, mut handler: F) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
        F: FnMut(&LaunchRequest) -> Result<ExitCode, LaunchError>,
    {
        let result = Cli::try_parse_from(args)
            .map_err(AppError::CliUsage)
            .and_then(|cli| {
                self.dispatch(&cli, &mut handler)
                    .map_err(AppError::Launch)
            });
        match result {
            Ok(exit_code) => exit_code,
            Err(error) => {
                let _ = writeln!(self.io.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    /// Walks the launch preconditions in their fixed order, then hands the
    /// resolved request to the launch handler.
    ///
    /// The superuser check comes first, before help handling, so a root
    /// invocation never reaches any other behaviour. Help short-circuits
    /// next, without touching configuration or the filesystem.
    fn dispatch<F>(&mut self, cli: &Cli, handler: &mut F) -> Result<ExitCode, LaunchError>
    where
        F: FnMut(&LaunchRequest) -> Result<ExitCode, LaunchError>,
    {
        if self.env.effective_uid() == 0 {
            return Err(LaunchError::RootUser);
        }
        if wants_help(&cli.arguments) {
            write_usage(self.io.stdout).map_err(LaunchError::Io)?;
            return Ok(ExitCode::SUCCESS);
        }
        let config = LaunchConfig::from_environment(self.env)?;
        let root = package_root(self.env)?;
        let server_entry = locate_server_entry(&root)
            .ok_or_else(|| LaunchError::ServerNotBuilt { root: root.clone() })?;
        let request = LaunchRequest {
            config,
            package_root: root,
            server_entry,
            runtime: resolve_runtime(self.env),
        };
        write_banner(self.io.stdout, &request.config).map_err(LaunchError::Io)?;
        handler(&request)
    }
}

/// Runs the launcher with the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let environment = SystemEnvironment;
    telemetry::initialise(&environment);
    let mut io = IoStreams::new(stdout, stderr);
    LauncherRunner::new(&mut io, &environment).run(args)
}

/// Runs the full pipeline against a substituted environment.
#[cfg(test)]
pub(crate) fn run_with_environment<'a, I, W, E>(
    args: I,
    io: &'a mut IoStreams<'a, W, E>,
    environment: &'a dyn Environment,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    LauncherRunner::new(io, environment).run(args)
}

/// Runs the pipeline with the launch stage replaced by `handler`.
#[cfg(test)]
pub(crate) fn run_with_handler<'a, I, W, E, F>(
    args: I,
    io: &'a mut IoStreams<'a, W, E>,
    environment: &'a dyn Environment,
    handler: F,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    F: FnMut(&LaunchRequest) -> Result<ExitCode, LaunchError>,
{
    LauncherRunner::new(io, environment).run_with_handler(args, handler)
}

fn wants_help(arguments: &[String]) -> bool {
    arguments
        .iter()
        .any(|argument| argument == "--help" || argument == "-h")
}

/// Command-line surface of the launcher.
///
/// The launcher takes no structured options: `--help`/`-h` are recognised
/// in any position and everything else is ignored, so stray flags never
/// prevent a launch. Clap's built-in help handling is disabled to keep
/// that permissiveness.
#[derive(Parser, Debug)]
#[command(name = "optimushq", disable_help_flag = true)]
struct Cli {
    /// Raw arguments; only `--help`/`-h` are significant.
    #[arg(
        value_name = "ARG",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    arguments: Vec<String>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Launch(#[from] LaunchError),
}
