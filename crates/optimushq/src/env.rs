//! Process-environment access seam.
//!
//! Launch preconditions depend on environment variables and on the effective
//! uid of the process. Both are read through [`Environment`] so the full
//! pipeline can run under test with fabricated state instead of mutating the
//! real process environment.

use std::env;

/// Read-only view of the process environment consulted during a launch.
pub(crate) trait Environment {
    /// Returns the value of `key`, or `None` when the variable is unset or
    /// not valid Unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns the effective uid of the current process.
    fn effective_uid(&self) -> u32;
}

/// [`Environment`] backed by the real process state.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    #[cfg(unix)]
    fn effective_uid(&self) -> u32 {
        nix::unistd::geteuid().as_raw()
    }

    #[cfg(not(unix))]
    fn effective_uid(&self) -> u32 {
        // No superuser account to refuse on platforms without uids.
        u32::MAX
    }
}

/// Returns the value of `key` when it is set to a non-empty string.
///
/// The platform has always treated an empty variable the same as an unset
/// one, so every lookup that feeds a default goes through here.
pub(crate) fn non_empty_var(env: &dyn Environment, key: &str) -> Option<String> {
    env.var(key).filter(|value| !value.is_empty())
}
