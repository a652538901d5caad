//! # taskdash - personal task dashboard
//!
//! An in-memory task tracker with a terminal dashboard.
//!
//! ## Key Features
//!
//! - **Task store**: add, advance or set status, delete; newest tasks first
//! - **Filtered lists**: by status, category and free-text search, sorted by
//!   priority then due date
//! - **Overview**: due today, upcoming this week, high priority, weekly progress,
//!   most used category
//! - **Two interfaces**: interactive TUI plus plain CLI output (table or JSON)
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the dashboard
//! taskdash
//!
//! # Open straight on today's tasks
//! taskdash ui --view today
//!
//! # Print high-level numbers
//! taskdash overview
//!
//! # Work tasks mentioning "report", as JSON
//! taskdash list --category work --search report --json
//! ```
//!
//! Nothing is written to disk. Each run starts from the built-in demo tasks,
//! or from an empty list with `--no-seed`.

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod format;
pub mod metrics;
pub mod seed;
pub mod store;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use fields::View;
use seed::seeded_store;
use store::TaskStore;
use view::TaskFilter;

/// `--debug` output goes to stderr, which the dashboard shares, so only the
/// line-oriented subcommands install a subscriber.
fn logs_to_stderr(cli: &Cli) -> bool {
    cli.debug && !matches!(cli.command, None | Some(Commands::Ui { .. }))
}

fn main() {
    let cli = Cli::parse();

    if logs_to_stderr(&cli) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskdash=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    // Completions don't need any task data.
    if let Some(Commands::Completions { shell }) = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let store = if cli.no_seed {
        TaskStore::new()
    } else {
        seeded_store(Local::now())
    };

    let result = match cli.command {
        None => cmd_ui(store, View::Overview),
        Some(Commands::Ui { view }) => cmd_ui(store, view),
        Some(Commands::List { status, category, search, today, json }) => {
            let filter = TaskFilter {
                status,
                category,
                search: search.unwrap_or_default(),
            };
            cmd_list(&store, filter, today, json)
        }
        Some(Commands::Overview { json }) => cmd_overview(&store, json),
        Some(Commands::Completions { .. }) => unreachable!("completions handled above"),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("taskdash").chain(args.iter().copied()))
    }

    #[test]
    fn test_debug_logging_skips_dashboard() {
        assert!(!logs_to_stderr(&parse(&["--debug"])));
        assert!(!logs_to_stderr(&parse(&["ui", "--debug", "--view", "today"])));
        assert!(logs_to_stderr(&parse(&["list", "--debug"])));
        assert!(logs_to_stderr(&parse(&["--debug", "overview"])));
        assert!(!logs_to_stderr(&parse(&["list"])));
    }
}
