//! Launch configuration resolved from environment variables.
//!
//! The server takes its port and administrator credentials from `PORT`,
//! `AUTH_USER` and `AUTH_PASS`. The launcher resolves them once, prints
//! them (password masked) in the start-up banner, and overlays them on the
//! server's environment so the resolved values and the advertised values
//! can never drift apart.

use std::num::ParseIntError;

use thiserror::Error;

use crate::env::{Environment, non_empty_var};

/// Port the server listens on when `PORT` is unset.
pub(crate) const DEFAULT_PORT: u16 = 3001;
/// Administrator login when `AUTH_USER` is unset.
pub(crate) const DEFAULT_AUTH_USER: &str = "admin";
/// Administrator password when `AUTH_PASS` is unset.
pub(crate) const DEFAULT_AUTH_PASS: &str = "admin";

/// Environment variable naming the server port.
pub(crate) const PORT_VAR: &str = "PORT";
/// Environment variable naming the administrator login.
pub(crate) const AUTH_USER_VAR: &str = "AUTH_USER";
/// Environment variable naming the administrator password.
pub(crate) const AUTH_PASS_VAR: &str = "AUTH_PASS";

/// Resolved configuration handed to the server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LaunchConfig {
    pub(crate) port: u16,
    pub(crate) auth_user: String,
    pub(crate) auth_pass: String,
}

/// Errors raised while resolving the launch configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// `PORT` was set to something other than a TCP port number.
    #[error("invalid PORT value '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            auth_user: String::from(DEFAULT_AUTH_USER),
            auth_pass: String::from(DEFAULT_AUTH_PASS),
        }
    }
}

impl LaunchConfig {
    /// Resolves the configuration from the environment.
    ///
    /// Unset and empty variables fall back to the defaults. A non-empty
    /// `PORT` that is not a valid port number aborts the launch rather than
    /// silently starting the server somewhere the operator did not ask for.
    pub(crate) fn from_environment(env: &dyn Environment) -> Result<Self, ConfigError> {
        let port = match non_empty_var(env, PORT_VAR) {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };
        let auth_user = non_empty_var(env, AUTH_USER_VAR)
            .unwrap_or_else(|| String::from(DEFAULT_AUTH_USER));
        let auth_pass = non_empty_var(env, AUTH_PASS_VAR)
            .unwrap_or_else(|| String::from(DEFAULT_AUTH_PASS));
        Ok(Self {
            port,
            auth_user,
            auth_pass,
        })
    }

    /// Returns the password masked as one asterisk per character.
    ///
    /// Counts characters rather than bytes so a multi-byte password is not
    /// reported longer than it is.
    pub(crate) fn masked_password(&self) -> String {
        "*".repeat(self.auth_pass.chars().count())
    }
}
