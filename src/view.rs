//! Filtered and sorted projections of the task collection.
//!
//! Everything here borrows the tasks and returns new sequences of references;
//! nothing in this module mutates the collection.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::fields::*;
use crate::task::Task;

/// Criteria applied by the task list screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub search: String,
}

impl TaskFilter {
    /// True when no criterion narrows the list.
    pub fn is_empty(&self) -> bool {
        self.status == StatusFilter::All && self.category == CategoryFilter::All && self.search.is_empty()
    }

    /// Check one task against every criterion.
    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.matches(task.status) || !self.category.matches(task.category) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle) || task.description.to_lowercase().contains(&needle)
    }
}

/// Order by priority (high first), then by due date with undated tasks last.
///
/// Two undated tasks of equal priority compare equal so a stable sort keeps
/// their existing order.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.priority.rank().cmp(&b.priority.rank()).then_with(|| match (a.due_date, b.due_date) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// Apply `filter` and sort the survivors with `compare_tasks`.
pub fn filter_and_sort<'a, I>(tasks: I, filter: &TaskFilter) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut out: Vec<&Task> = tasks.into_iter().filter(|t| filter.matches(t)).collect();
    out.sort_by(|a, b| compare_tasks(a, b));
    out
}

/// Tasks due on `today`, in collection order.
pub fn today_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| t.due_date == Some(today)).collect()
}

/// Whether a task is past its due date and still open.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.status != Status::Completed && task.due_date.is_some_and(|d| d < today)
}

/// Per-status counts shown on the status tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub all: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn from_tasks<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut counts = StatusCounts::default();
        for t in tasks {
            counts.all += 1;
            match t.status {
                Status::Todo => counts.todo += 1,
                Status::InProgress => counts.in_progress += 1,
                Status::Completed => counts.completed += 1,
            }
        }
        counts
    }

    /// Count behind a given tab.
    pub fn for_filter(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Todo => self.todo,
            StatusFilter::InProgress => self.in_progress,
            StatusFilter::Completed => self.completed,
        }
    }
}
