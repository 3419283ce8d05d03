//! Launch orchestration: spawn the server, supervise it, mirror its exit.

use std::process::{ExitCode, ExitStatus};

use tracing::debug;

use super::error::LaunchError;
use super::signals::SignalRelay;
use super::spawning::spawn_server;
use super::types::LaunchRequest;

/// Production launcher: runs the server to completion in the foreground.
pub(crate) struct SystemLauncher;

impl SystemLauncher {
    /// Spawns the server and blocks until it exits.
    ///
    /// The signal relay is installed before the spawn so there is no window
    /// in which a termination signal could kill the launcher while leaving
    /// an orphaned server behind. The relay stays alive for the whole wait
    /// and forwards every termination signal to the server; the launcher
    /// only ever exits by mirroring the server's own exit.
    pub(crate) fn launch(&mut self, request: &LaunchRequest) -> Result<ExitCode, LaunchError> {
        let relay = SignalRelay::install()?;
        let mut server = spawn_server(request)?;
        relay.activate(server.id());
        debug!(pid = server.id(), "supervising server process");
        let status = server
            .wait()
            .map_err(|source| LaunchError::WaitServer { source })?;
        debug!(?status, "server process exited");
        Ok(exit_code_from_child(&status))
    }
}

/// Maps the server's exit status onto the launcher's exit code.
///
/// A status without a code means the server died to a signal; the platform
/// has always treated that as a clean shutdown, so it maps to success.
fn exit_code_from_child(status: &ExitStatus) -> ExitCode {
    match status.code() {
        Some(code) if (0..=255).contains(&code) => ExitCode::from(code as u8),
        Some(_) => ExitCode::FAILURE,
        None => ExitCode::SUCCESS,
    }
}
