//! The `lms run` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::session::Flow;

pub fn execute(
    config_path: Option<PathBuf>,
    script: PathBuf,
    roster: Option<PathBuf>,
) -> Result<()> {
    let content = std::fs::read_to_string(&script)
        .with_context(|| format!("failed to read script: {}", script.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut session = super::open_session(config_path, roster, &mut out)?;
    let echo = session.config().echo_commands;

    for (n, line) in content.lines().enumerate() {
        if echo && !line.trim().is_empty() {
            writeln!(out, "{}{line}", session.config().prompt)?;
        }
        tracing::debug!("{}:{}", script.display(), n + 1);
        if session.execute_line(line, &mut out)? == Flow::Exit {
            break;
        }
    }
    Ok(())
}
