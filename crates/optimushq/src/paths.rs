//! Package-root discovery and server entry resolution.
//!
//! The launcher binary ships inside the OptimusHQ package next to the built
//! server. The package root is the parent of the directory holding the
//! executable, and the server entry is the first build output found under
//! it. `OPTIMUSHQ_ROOT` overrides the computed root for packaging layouts
//! and tests.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::env::{Environment, non_empty_var};

/// Environment variable overriding the computed package root.
pub(crate) const ROOT_VAR: &str = "OPTIMUSHQ_ROOT";

/// Server entry locations relative to the package root, in resolution order.
///
/// The direct layout comes from builds emitting straight into `dist`; the
/// nested layout appears when the TypeScript build preserves the source
/// tree.
pub(crate) const SERVER_ENTRY_CANDIDATES: [&str; 2] = [
    "server/dist/index.js",
    "server/dist/server/src/index.js",
];

/// Errors raised while locating the package root.
#[derive(Debug, Error)]
pub(crate) enum PathsError {
    /// The running executable's path could not be read.
    #[error("failed to resolve the launcher executable path: {source}")]
    ExecutablePath {
        #[source]
        source: io::Error,
    },
    /// The executable sits too close to the filesystem root to have a
    /// package directory above it.
    #[error("launcher executable {exe:?} has no package directory above it")]
    NoPackageRoot { exe: PathBuf },
}

/// Resolves the OptimusHQ package root.
pub(crate) fn package_root(env: &dyn Environment) -> Result<PathBuf, PathsError> {
    if let Some(root) = non_empty_var(env, ROOT_VAR) {
        return Ok(PathBuf::from(root));
    }
    let exe = env::current_exe().map_err(|source| PathsError::ExecutablePath { source })?;
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or(PathsError::NoPackageRoot { exe })
}

/// Returns the first existing server entry under `root`, if any.
///
/// `None` means the server was never built; the caller turns that into the
/// fatal build-first error before anything is spawned.
pub(crate) fn locate_server_entry(root: &Path) -> Option<PathBuf> {
    SERVER_ENTRY_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}
