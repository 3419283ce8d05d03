//! The resolved launch request.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::LaunchConfig;

/// Everything a launch needs, resolved up front.
///
/// By the time a request exists the preconditions have passed: the process
/// is unprivileged, the configuration parsed, and the server entry found.
/// The launch stage itself can then only fail on OS-level operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LaunchRequest {
    /// Configuration advertised in the banner and overlaid on the server's
    /// environment.
    pub(crate) config: LaunchConfig,
    /// Working directory for the server process.
    pub(crate) package_root: PathBuf,
    /// Built entry script passed to the runtime.
    pub(crate) server_entry: PathBuf,
    /// JavaScript runtime that executes the entry.
    pub(crate) runtime: OsString,
}
