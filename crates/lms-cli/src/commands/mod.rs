pub mod init;
pub mod run;
pub mod shell;
pub mod validate;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use lms_core::config::load_config_from;

use crate::session::Session;

/// Load config and open a session, importing the roster given on the
/// command line or, failing that, the one named in the config.
fn open_session(
    config_path: Option<PathBuf>,
    roster: Option<PathBuf>,
    out: &mut dyn Write,
) -> Result<Session> {
    let config = load_config_from(config_path.as_deref())?;
    let roster = roster.or_else(|| config.roster.clone());

    let mut session = Session::new(config);
    if let Some(path) = roster {
        session.load_roster(&path, out)?;
    }
    Ok(session)
}
