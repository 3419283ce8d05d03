//! Operator-facing launcher text.
//!
//! Usage and the start-up banner render through caller-supplied writers so
//! the binary and the test suites observe identical bytes. Diagnostics go
//! through tracing instead and never mix with this output.

use std::io::{self, Write};

use crate::config::LaunchConfig;

/// Interior width of the start-up banner frame.
const BANNER_WIDTH: usize = 59;
/// Spaces between the banner border and its content.
const BANNER_MARGIN: usize = 3;

/// Explanation printed when the launcher is started by the superuser.
pub(crate) const ROOT_REJECTION: &str = "\
OptimusHQ cannot run as root.

Claude CLI requires --dangerously-skip-permissions, which is
blocked for root users. Start the launcher from an unprivileged
account instead:

  sudo useradd -m claude
  sudo su - claude
  optimushq";

const USAGE: &str = "
OptimusHQ - Multi-Agent Platform

Usage: optimushq [options]

Options:
  --help, -h    Show this help message

Environment Variables:
  PORT          Server port (default: 3001)
  AUTH_USER     Admin username (default: admin)
  AUTH_PASS     Admin password (default: admin)

Examples:
  optimushq                    Start the server
  PORT=8080 optimushq          Start on port 8080

Features:
  - Multi-project workspace with agents
  - Skills, APIs, and MCP server management
  - WhatsApp integration (Settings > WhatsApp)
  - Real-time chat with Claude

";

/// Writes the `--help` text.
pub(crate) fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(USAGE.as_bytes())?;
    out.flush()
}

/// Writes the start-up banner describing how to reach the server.
///
/// The password appears only as its mask; the plain text never enters
/// launcher output.
pub(crate) fn write_banner<W: Write>(out: &mut W, config: &LaunchConfig) -> io::Result<()> {
    let frame = format!("  +{}+", "-".repeat(BANNER_WIDTH));
    let blank = format!("  |{}|", " ".repeat(BANNER_WIDTH));
    writeln!(out)?;
    writeln!(out, "{frame}")?;
    writeln!(out, "{blank}")?;
    banner_line(out, "OptimusHQ - Multi-Agent Platform")?;
    writeln!(out, "{blank}")?;
    banner_line(out, &format!("Server: http://localhost:{}", config.port))?;
    banner_line(
        out,
        &format!("Login:  {} / {}", config.auth_user, config.masked_password()),
    )?;
    writeln!(out, "{blank}")?;
    banner_line(out, "WhatsApp: Settings > WhatsApp Integration")?;
    writeln!(out, "{blank}")?;
    writeln!(out, "{frame}")?;
    writeln!(out)?;
    out.flush()
}

fn banner_line<W: Write>(out: &mut W, content: &str) -> io::Result<()> {
    let margin = " ".repeat(BANNER_MARGIN);
    writeln!(
        out,
        "  |{margin}{content:<width$}|",
        width = BANNER_WIDTH - BANNER_MARGIN
    )
}
