//! Structured telemetry initialisation for the launcher.
//!
//! Diagnostics are written to process stderr through `tracing` and stay out
//! of the launcher's contract output (usage, banner, errors). A launch with
//! default settings emits nothing: supervision breadcrumbs sit at `debug`.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use strum::{Display, EnumString};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::env::{Environment, non_empty_var};

/// Environment variable holding the log filter directives.
pub(crate) const LOG_FILTER_VAR: &str = "OPTIMUSHQ_LOG";
/// Environment variable selecting the log output format.
pub(crate) const LOG_FORMAT_VAR: &str = "OPTIMUSHQ_LOG_FORMAT";
/// Filter applied when `OPTIMUSHQ_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "info";

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Supported logging output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub(crate) enum LogFormat {
    /// Human-readable single line output.
    #[default]
    Compact,
    /// Structured JSON suitable for ingestion by logging stacks.
    Json,
}

/// Configures the global tracing subscriber when invoked for the first time.
///
/// Repeated calls are idempotent. A launcher must not refuse to start the
/// server over a log-filter typo, so unparsable `OPTIMUSHQ_LOG` or
/// `OPTIMUSHQ_LOG_FORMAT` values fall back to the defaults instead of
/// failing.
pub(crate) fn initialise(env: &dyn Environment) {
    TELEMETRY_GUARD.get_or_init(|| install_subscriber(env));
}

fn install_subscriber(env: &dyn Environment) {
    let filter = resolve_filter(env);
    let format = resolve_format(env);

    let builder = |filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            // Avoid stray colour codes in non-TTY sinks while keeping colour
            // on interactive terminals.
            .with_ansi(io::stderr().is_terminal())
            .with_timer(fmt::time::UtcTime::rfc_3339())
    };

    let subscriber: Box<dyn Subscriber + Send + Sync> = match format {
        LogFormat::Json => Box::new(builder(filter).json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder(filter).compact().finish()),
    };

    // Another subscriber may already be installed when the library runs
    // embedded in a test harness; keep whichever got there first.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Builds the log filter from `OPTIMUSHQ_LOG`.
///
/// Unset, empty, and unparsable directives all resolve to the default
/// filter.
fn resolve_filter(env: &dyn Environment) -> EnvFilter {
    non_empty_var(env, LOG_FILTER_VAR)
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Selects the log format from `OPTIMUSHQ_LOG_FORMAT`.
///
/// Unset, empty, and unrecognised values all resolve to compact output.
fn resolve_format(env: &dyn Environment) -> LogFormat {
    non_empty_var(env, LOG_FORMAT_VAR)
        .and_then(|value| value.parse::<LogFormat>().ok())
        .unwrap_or_default()
}
