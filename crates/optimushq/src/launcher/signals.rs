//! Termination-signal relay to the server process.
//!
//! The launcher parks its main thread in `Child::wait`, so a background
//! thread services the signal iterator. The relay is installed before the
//! server is spawned and learns the target pid afterwards through a
//! write-once cell: signals arriving in between are dropped rather than
//! queued, and every signal received after activation is forwarded to the
//! server verbatim, once per delivery. The launcher itself stays alive; it
//! exits only when the server does.

#[cfg(unix)]
use std::sync::Arc;
#[cfg(unix)]
use std::thread::{self, JoinHandle};

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;
#[cfg(unix)]
use once_cell::sync::OnceCell;
#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::{Handle, Signals};
#[cfg(unix)]
use tracing::{debug, warn};

use super::error::LaunchError;

/// Signals relayed to the server process.
#[cfg(unix)]
const FORWARDED_SIGNALS: [i32; 2] = [SIGINT, SIGTERM];

/// Forwards termination signals to the server for as long as it runs.
#[cfg(unix)]
pub(super) struct SignalRelay {
    target: Arc<OnceCell<Pid>>,
    handle: Handle,
    worker: Option<JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalRelay {
    /// Installs the relay ahead of the spawn.
    ///
    /// Until [`Self::activate`] publishes a pid the relay drops incoming
    /// signals, so a signal racing the spawn can never hit an unrelated
    /// process.
    pub(super) fn install() -> Result<Self, LaunchError> {
        let mut signals = Signals::new(FORWARDED_SIGNALS)
            .map_err(|source| LaunchError::SignalSetup { source })?;
        let handle = signals.handle();
        let target = Arc::new(OnceCell::new());
        let worker_target = Arc::clone(&target);
        let worker = thread::Builder::new()
            .name(String::from("signal-relay"))
            .spawn(move || {
                for raw in signals.forever() {
                    relay_signal(&worker_target, raw);
                }
            })
            .map_err(|source| LaunchError::SignalSetup { source })?;
        Ok(Self {
            target,
            handle,
            worker: Some(worker),
        })
    }

    /// Publishes the server pid the relay forwards to.
    ///
    /// Only the first call takes effect; the relay serves exactly one
    /// server for its lifetime.
    pub(super) fn activate(&self, pid: u32) {
        let _ = self.target.set(Pid::from_raw(pid as i32));
    }
}

#[cfg(unix)]
impl Drop for SignalRelay {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(unix)]
fn relay_signal(target: &OnceCell<Pid>, raw: i32) {
    match target.get() {
        Some(pid) => forward(*pid, raw),
        None => debug!(
            signal = raw,
            "termination signal received before the server started; dropping"
        ),
    }
}

#[cfg(unix)]
fn forward(pid: Pid, raw: i32) {
    let Ok(signal) = Signal::try_from(raw) else {
        warn!(signal = raw, "unrepresentable signal; not forwarding");
        return;
    };
    match signal::kill(pid, signal) {
        Ok(()) => debug!(%pid, %signal, "forwarded termination signal to the server"),
        Err(Errno::ESRCH) => debug!(%pid, %signal, "server already exited; nothing to signal"),
        Err(errno) => warn!(%pid, %signal, %errno, "failed to forward termination signal"),
    }
}

/// No-op relay for platforms without Unix signal semantics.
#[cfg(not(unix))]
pub(super) struct SignalRelay;

#[cfg(not(unix))]
impl SignalRelay {
    pub(super) fn install() -> Result<Self, LaunchError> {
        Ok(Self)
    }

    pub(super) fn activate(&self, _pid: u32) {}
}
