//! Task data structure and related functionality.
//!
//! This module defines the `Task` record held by the store and the `NewTask`
//! payload callers hand to it when creating one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// A single to-do record.
///
/// `id` and `created_at` are assigned by the store and never change.
/// `completed_at` is present exactly when `status` is `Completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Everything needed to create a task except what the store assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// A todo with the add form's defaults: personal, medium, no due date.
    pub fn new(title: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            description: String::new(),
            category: Category::Personal,
            priority: Priority::Medium,
            status: Status::Todo,
            due_date: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn due(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_json_shape() {
        let task = Task {
            id: 7,
            title: "Call the team".into(),
            description: String::new(),
            category: Category::Work,
            priority: Priority::High,
            status: Status::InProgress,
            due_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            created_at: Utc.with_ymd_and_hms(2025, 2, 27, 9, 30, 0).unwrap(),
            completed_at: None,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["dueDate"], "2025-03-01");
        assert_eq!(value["status"], "in-progress");
        assert_eq!(value["createdAt"], "2025-02-27T09:30:00Z");
        assert!(value.get("completedAt").is_none());

        let back: Task = serde_json::from_value(value).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_new_task_defaults() {
        let data = NewTask::new("Read a book");
        assert_eq!(data.category, Category::Personal);
        assert_eq!(data.priority, Priority::Medium);
        assert_eq!(data.status, Status::Todo);
        assert!(data.due_date.is_none());
    }
}
