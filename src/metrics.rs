//! Aggregate statistics for the overview screen.

use chrono::{DateTime, Duration, Local, Utc};
use serde::Serialize;

use crate::fields::{Category, Priority, Status};
use crate::task::Task;
use crate::view::{today_tasks, StatusCounts};

/// Look-ahead window for upcoming tasks and look-back window for completions.
pub const WEEK_DAYS: i64 = 7;

/// The category with the most tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Read-only summary of the collection at a point in time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics<'a> {
    /// Due on the current calendar day, any status.
    pub today: Vec<&'a Task>,
    /// Due after today and within the next week, not completed.
    pub upcoming: Vec<&'a Task>,
    pub high_priority_open: usize,
    pub completed_this_week: usize,
    pub top_category: Option<CategoryCount>,
    pub counts: StatusCounts,
    /// Completed share of all tasks, rounded percent.
    pub completion_rate: u32,
    /// Completed-this-week share of all tasks, rounded percent.
    pub weekly_progress: u32,
}

impl<'a> OverviewMetrics<'a> {
    /// Compute metrics against the system clock.
    pub fn derive(tasks: &'a [Task]) -> Self {
        Self::derive_at(tasks, Local::now())
    }

    /// Compute metrics as of `now`.
    pub fn derive_at(tasks: &'a [Task], now: DateTime<Local>) -> Self {
        let today = now.date_naive();
        let horizon = today + Duration::days(WEEK_DAYS);
        let week_ago = now.with_timezone(&Utc) - Duration::days(WEEK_DAYS);

        let upcoming = tasks
            .iter()
            .filter(|t| t.status != Status::Completed)
            .filter(|t| t.due_date.is_some_and(|d| d > today && d <= horizon))
            .collect();

        let high_priority_open = tasks
            .iter()
            .filter(|t| t.priority == Priority::High && t.status != Status::Completed)
            .count();

        let completed_this_week = tasks
            .iter()
            .filter(|t| t.completed_at.is_some_and(|at| at >= week_ago))
            .count();

        let counts = StatusCounts::from_tasks(tasks);

        OverviewMetrics {
            today: today_tasks(tasks, today),
            upcoming,
            high_priority_open,
            completed_this_week,
            top_category: top_category(tasks),
            counts,
            completion_rate: percent(counts.completed, counts.all),
            weekly_progress: percent(completed_this_week, counts.all),
        }
    }
}

/// Most frequent category. Equal counts go to the alphabetically first name.
pub fn top_category(tasks: &[Task]) -> Option<CategoryCount> {
    Category::ALL
        .iter()
        .map(|&category| CategoryCount {
            category,
            count: tasks.iter().filter(|t| t.category == category).count(),
        })
        .filter(|c| c.count > 0)
        .min_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.key().cmp(b.category.key())))
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
