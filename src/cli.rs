use clap::Parser;

use crate::cmd::Commands;

/// In-memory personal task dashboard.
/// Every run starts from the built-in demo tasks unless --no-seed is given.
#[derive(Parser)]
#[command(name = "taskdash", version, about = "Personal task dashboard")]
pub struct Cli {
    /// Start with an empty task list instead of the demo tasks.
    #[arg(long, global = true)]
    pub no_seed: bool,

    /// Write debug logs to stderr for the list and overview commands (the
    /// dashboard draws on the same terminal and stays quiet). RUST_LOG
    /// overrides the default filter.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
