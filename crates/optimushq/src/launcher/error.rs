//! Error surface of the launch pipeline.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::output::ROOT_REJECTION;
use crate::paths::PathsError;

/// Errors raised while validating, preparing, or supervising a launch.
#[derive(Debug, Error)]
pub(crate) enum LaunchError {
    /// The platform refuses to run with superuser privileges.
    #[error("{}", ROOT_REJECTION)]
    RootUser,
    /// No built server entry exists under the package root.
    #[error("server not built at {}; run \"npm run build\" first", root.display())]
    ServerNotBuilt { root: PathBuf },
    /// Installing the termination-signal relay failed.
    #[error("failed to install termination-signal handlers: {source}")]
    SignalSetup {
        #[source]
        source: io::Error,
    },
    /// The server process could not be started.
    #[error("failed to start server with runtime {runtime:?}: {source}")]
    SpawnServer {
        runtime: OsString,
        #[source]
        source: io::Error,
    },
    /// Waiting on the running server process failed.
    #[error("failed to monitor the server process: {source}")]
    WaitServer {
        #[source]
        source: io::Error,
    },
    /// Writing launcher output failed.
    #[error("failed to write launcher output: {0}")]
    Io(#[source] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Paths(#[from] PathsError),
}
