//! Command implementations for the CLI interface.
//!
//! Each handler works on the in-memory store built by `main` and either
//! prints a view of it or hands it to the terminal UI.

use std::io;

use chrono::{DateTime, Local, NaiveDate};
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::Cli;
use crate::error::Result;
use crate::fields::*;
use crate::format::*;
use crate::metrics::OverviewMetrics;
use crate::store::TaskStore;
use crate::tui::run::run_tui;
use crate::view::{filter_and_sort, today_tasks, TaskFilter};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard (default).
    Ui {
        /// Screen to open first.
        #[arg(long, value_enum, default_value_t = View::Overview)]
        view: View,
    },

    /// List tasks sorted by priority and due date.
    List {
        /// Filter by status.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
        /// Filter by category.
        #[arg(long, value_enum, default_value_t = CategoryFilter::All)]
        category: CategoryFilter,
        /// Case-insensitive text to look for in title or description.
        #[arg(long)]
        search: Option<String>,
        /// Only tasks due today.
        #[arg(long)]
        today: bool,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show overview statistics.
    Overview {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(store: TaskStore, view: View) -> Result<()> {
    info!(tasks = store.len(), ?view, "starting dashboard");
    run_tui(store, view)?;
    Ok(())
}

/// Print the filtered, sorted task list.
pub fn cmd_list(store: &TaskStore, filter: TaskFilter, today_only: bool, json: bool) -> Result<()> {
    info!(?filter, today_only, "listing tasks");
    print!("{}", render_list(store, &filter, today_only, json, Local::now().date_naive())?);
    Ok(())
}

/// Output of `list` as of `today`: a table, JSON, or an empty-list notice.
pub fn render_list(
    store: &TaskStore,
    filter: &TaskFilter,
    today_only: bool,
    json: bool,
    today: NaiveDate,
) -> Result<String> {
    let tasks = if today_only {
        filter_and_sort(today_tasks(store.tasks(), today), filter)
    } else {
        filter_and_sort(store.tasks(), filter)
    };

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&tasks)?));
    }
    if tasks.is_empty() {
        // Without criteria an empty result means an empty store.
        let msg = if filter.is_empty() && !today_only {
            "No tasks yet."
        } else {
            "No tasks found."
        };
        return Ok(format!("{msg}\n"));
    }
    Ok(format_table(&tasks, today))
}

/// Print overview metrics.
pub fn cmd_overview(store: &TaskStore, json: bool) -> Result<()> {
    info!(tasks = store.len(), "overview");
    print!("{}", render_overview(store, json, Local::now())?);
    Ok(())
}

/// Output of `overview` as of `now`, as text or JSON.
pub fn render_overview(store: &TaskStore, json: bool, now: DateTime<Local>) -> Result<String> {
    let today = now.date_naive();
    let metrics = OverviewMetrics::derive_at(store.tasks(), now);

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&metrics)?));
    }

    let counts = metrics.counts;
    let mut lines = vec![
        format!("Completed:    {}", counts.completed),
        format!("In progress:  {}", counts.in_progress),
        format!("Planned:      {}", counts.todo),
        format!("Progress:     {}%", metrics.completion_rate),
        String::new(),
    ];

    lines.push(format!("Due today ({}):", metrics.today.len()));
    if metrics.today.is_empty() {
        lines.push("  -".into());
    }
    for t in &metrics.today {
        lines.push(format!("  {} [{}]", t.title, format_status(t.status)));
    }

    lines.push(format!("Upcoming this week ({}):", metrics.upcoming.len()));
    if metrics.upcoming.is_empty() {
        lines.push("  -".into());
    }
    for t in &metrics.upcoming {
        lines.push(format!("  {} ({})", t.title, format_due_relative(t.due_date, today)));
    }
    lines.push(String::new());

    lines.push(format!("High priority open:   {}", metrics.high_priority_open));
    lines.push(format!("Completed this week:  {}", metrics.completed_this_week));
    lines.push(match metrics.top_category {
        Some(top) => format!("Top category:         {} ({} tasks)", format_category(top.category), top.count),
        None => "Top category:         -".into(),
    });
    lines.push(format!(
        "Weekly progress:      {}% ({} of {} tasks)",
        metrics.weekly_progress, metrics.completed_this_week, counts.all
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "taskdash", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::seed::seeded_store;
    use crate::task::NewTask;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
    }

    fn ids_in(table: &str) -> Vec<u64> {
        table
            .lines()
            .skip(1)
            .filter_map(|l| l.split_whitespace().next()?.parse().ok())
            .collect()
    }

    #[test]
    fn test_list_table_is_sorted() {
        let store = seeded_store(now());
        let out = render_list(&store, &TaskFilter::default(), false, false, now().date_naive()).unwrap();
        assert!(out.starts_with("ID"));
        assert_eq!(ids_in(&out), vec![1, 4, 3, 2, 5]);
    }

    #[test]
    fn test_list_today_combines_with_filter() {
        let store = seeded_store(now());
        let today = now().date_naive();
        let filter = TaskFilter {
            status: StatusFilter::Todo,
            ..TaskFilter::default()
        };
        let out = render_list(&store, &filter, true, false, today).unwrap();
        assert_eq!(ids_in(&out), vec![2]);

        let work = TaskFilter {
            category: CategoryFilter::Work,
            ..TaskFilter::default()
        };
        let out = render_list(&store, &work, true, false, today).unwrap();
        assert_eq!(ids_in(&out), vec![1]);
    }

    #[test]
    fn test_list_empty_messages() {
        let today = now().date_naive();
        let empty = TaskStore::new();
        assert_eq!(render_list(&empty, &TaskFilter::default(), false, false, today).unwrap(), "No tasks yet.\n");
        assert_eq!(render_list(&empty, &TaskFilter::default(), true, false, today).unwrap(), "No tasks found.\n");

        let store = seeded_store(now());
        let filter = TaskFilter {
            search: "nothing like this".into(),
            ..TaskFilter::default()
        };
        assert_eq!(render_list(&store, &filter, false, false, today).unwrap(), "No tasks found.\n");
    }

    #[test]
    fn test_list_json() {
        let store = seeded_store(now());
        let filter = TaskFilter {
            category: CategoryFilter::Health,
            ..TaskFilter::default()
        };
        let out = render_list(&store, &filter, false, true, now().date_naive()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Gym workout");
        assert_eq!(items[0]["status"], "completed");

        // An empty match is still valid JSON.
        let out = render_list(&TaskStore::new(), &filter, false, true, now().date_naive()).unwrap();
        assert_eq!(out.trim(), "[]");
    }

    #[test]
    fn test_list_marks_overdue() {
        let mut store = TaskStore::new();
        let today = now().date_naive();
        store.add_task(NewTask::new("Late").due(today - chrono::Duration::days(2)));
        let out = render_list(&store, &TaskFilter::default(), false, false, today).unwrap();
        let row = out.lines().nth(1).unwrap();
        assert!(row.contains('!'));
        assert!(row.contains("Late"));
    }

    #[test]
    fn test_overview_text() {
        let out = render_overview(&seeded_store(now()), false, now()).unwrap();
        assert!(out.contains("Completed:    1"));
        assert!(out.contains("Progress:     20%"));
        assert!(out.contains("Due today (2):"));
        assert!(out.contains("  Team call (Tomorrow)"));
        assert!(out.contains("High priority open:   2"));
        assert!(out.contains("Top category:         Work (2 tasks)"));
        assert!(out.contains("Weekly progress:      20% (1 of 5 tasks)"));
    }

    #[test]
    fn test_overview_empty() {
        let out = render_overview(&TaskStore::new(), false, now()).unwrap();
        assert!(out.contains("Due today (0):\n  -"));
        assert!(out.contains("Top category:         -"));
        assert!(out.contains("Weekly progress:      0% (0 of 0 tasks)"));
    }

    #[test]
    fn test_overview_json() {
        let out = render_overview(&seeded_store(now()), true, now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["highPriorityOpen"], 2);
        assert_eq!(value["counts"]["inProgress"], 2);
        assert_eq!(value["today"].as_array().unwrap().len(), 2);
    }
}
