//! Shell configuration loaded from `lms.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::registry::RegistryOptions;

/// Top-level lms configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsConfig {
    /// Prompt printed before each interactive command.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Decimal places when printing a GPA.
    #[serde(default = "default_gpa_precision")]
    pub gpa_precision: usize,
    /// Reject courses whose id is already in use.
    #[serde(default)]
    pub unique_course_ids: bool,
    /// Roster file imported when a session starts.
    #[serde(default)]
    pub roster: Option<PathBuf>,
    /// Echo each script line before running it.
    #[serde(default)]
    pub echo_commands: bool,
}

fn default_prompt() -> String {
    "lms> ".to_string()
}

fn default_gpa_precision() -> usize {
    2
}

impl Default for LmsConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            gpa_precision: default_gpa_precision(),
            unique_course_ids: false,
            roster: None,
            echo_commands: false,
        }
    }
}

impl LmsConfig {
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            unique_course_ids: self.unique_course_ids,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Without a path the search order is:
/// 1. `lms.toml` in the current directory
/// 2. `~/.config/lms/config.toml`
///
/// Environment variable overrides: `LMS_ROSTER`, `LMS_PROMPT`.
pub fn load_config_from(path: Option<&Path>) -> Result<LmsConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("lms.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => LmsConfig::default(),
    };

    if let Ok(roster) = std::env::var("LMS_ROSTER") {
        if !roster.is_empty() {
            config.roster = Some(PathBuf::from(roster));
        }
    }
    if let Ok(prompt) = std::env::var("LMS_PROMPT") {
        config.prompt = prompt;
    }

    Ok(config)
}

/// Parse a TOML string into an `LmsConfig`.
pub fn parse_config(content: &str) -> Result<LmsConfig> {
    let config: LmsConfig = toml::from_str(content)?;
    anyhow::ensure!(
        config.gpa_precision <= 6,
        "gpa_precision must be at most 6, got {}",
        config.gpa_precision
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lms"))
}
