//! The `lms shell` command.

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::session::Flow;

pub fn execute(config_path: Option<PathBuf>, roster: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut session = super::open_session(config_path, roster, &mut out)?;
    let interactive = stdin.is_terminal();
    if interactive {
        writeln!(out, "Type `help` for commands, `exit` to leave.")?;
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            write!(out, "{}", session.config().prompt)?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        if session.execute_line(&line?, &mut out)? == Flow::Exit {
            break;
        }
    }

    writeln!(out, "Exiting LMS...")?;
    Ok(())
}
