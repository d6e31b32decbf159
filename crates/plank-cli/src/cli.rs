use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "plank",
    version,
    about = "Plank: month-board task planner",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    #[arg(long = "data")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render the month board.
    Show {
        /// Anchor month as YYYY-MM; defaults to the current month.
        #[arg(long)]
        month: Option<String>,
    },
    /// List tasks, optionally narrowed.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        user: Option<String>,
        /// all | 1week | 2weeks | 3weeks
        #[arg(long, default_value = "all")]
        window: String,
    },
    /// Add a task to the board.
    Add {
        name: String,
        #[arg(long)]
        start: String,
        /// Defaults to a single-day task ending on `start`.
        #[arg(long)]
        end: Option<String>,
        #[arg(long, default_value = "development")]
        category: String,
        /// Defaults to the first roster entry.
        #[arg(long)]
        user: Option<String>,
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long, default_value = "sky")]
        color: String,
    },
    /// Remove a task by id (full uuid or unique prefix).
    Remove { id: String },
    /// Report load diagnostics for the stored collection.
    Check,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
