//! Server process spawning.
//!
//! Resolves the JavaScript runtime and assembles the `Command` that runs
//! the built server entry: package root as the working directory, stdio
//! inherited from the launcher, and the resolved configuration overlaid on
//! the parent environment.

use std::ffi::OsString;
use std::process::{Child, Command, Stdio};

use tracing::debug;

use super::error::LaunchError;
use super::types::LaunchRequest;
use crate::config::{AUTH_PASS_VAR, AUTH_USER_VAR, PORT_VAR};
use crate::env::{Environment, non_empty_var};

/// Environment variable overriding the runtime that executes the server.
pub(crate) const RUNTIME_VAR: &str = "OPTIMUSHQ_NODE";
/// Runtime used when no override is present.
pub(crate) const DEFAULT_RUNTIME: &str = "node";

/// Resolves the runtime binary that will execute the server entry.
///
/// Uses `OPTIMUSHQ_NODE` when set and non-empty, otherwise the `node` on
/// the operator's `PATH`.
pub(crate) fn resolve_runtime(env: &dyn Environment) -> OsString {
    non_empty_var(env, RUNTIME_VAR)
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(DEFAULT_RUNTIME))
}

/// Builds the server command without spawning it.
///
/// The environment overlay always carries the resolved `PORT`, `AUTH_USER`
/// and `AUTH_PASS`, defaults included, so the server sees exactly the
/// values the banner advertised.
pub(crate) fn server_command(request: &LaunchRequest) -> Command {
    let mut command = Command::new(&request.runtime);
    command
        .arg(&request.server_entry)
        .current_dir(&request.package_root)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .env(PORT_VAR, request.config.port.to_string())
        .env(AUTH_USER_VAR, &request.config.auth_user)
        .env(AUTH_PASS_VAR, &request.config.auth_pass);
    command
}

/// Spawns the server process.
pub(super) fn spawn_server(request: &LaunchRequest) -> Result<Child, LaunchError> {
    debug!(
        runtime = ?request.runtime,
        entry = ?request.server_entry,
        "starting server process"
    );
    server_command(request)
        .spawn()
        .map_err(|source| LaunchError::SpawnServer {
            runtime: request.runtime.clone(),
            source,
        })
}
