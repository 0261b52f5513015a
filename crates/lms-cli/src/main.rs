//! lms: command shell for the student/teacher/course record engine.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod line;
mod render;
mod session;

#[derive(Parser)]
#[command(name = "lms", version, about = "Student, teacher and course records")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every engine operation
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session reading commands from stdin
    Shell {
        /// Roster TOML to import before the first command
        #[arg(long)]
        roster: Option<PathBuf>,
    },

    /// Run a file of shell commands
    Run {
        /// Script with one shell command per line
        #[arg(long)]
        script: PathBuf,

        /// Roster TOML to import before the script
        #[arg(long)]
        roster: Option<PathBuf>,
    },

    /// Check a roster TOML file without importing it
    Validate {
        /// Path to roster file
        #[arg(long)]
        roster: PathBuf,
    },

    /// Create a starter config and example roster
    Init,
}

fn init_tracing(verbose: bool) {
    let directive = if verbose { "lms=debug" } else { "lms=warn" };
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(d) = directive.parse() {
        filter = filter.add_directive(d);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Shell { roster } => commands::shell::execute(cli.config, roster),
        Commands::Run { script, roster } => commands::run::execute(cli.config, script, roster),
        Commands::Validate { roster } => commands::validate::execute(roster),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
