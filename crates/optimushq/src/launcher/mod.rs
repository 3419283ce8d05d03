//! Server process lifecycle: spawn, signal forwarding, and exit mapping.
//!
//! This module is split into focused submodules so each concern remains
//! small and testable:
//! - [`types`] defines the resolved launch request.
//! - [`error`] captures the launch failure taxonomy.
//! - [`spawning`] resolves the runtime and assembles the server command.
//! - [`signals`] relays termination signals to the running server.
//! - [`controller`] implements the spawn/supervise/exit flow.

mod controller;
mod error;
mod signals;
mod spawning;
mod types;

pub(crate) use controller::SystemLauncher;
pub(crate) use error::LaunchError;
#[cfg(test)]
pub(crate) use spawning::RUNTIME_VAR;
pub(crate) use spawning::resolve_runtime;
pub(crate) use types::LaunchRequest;
