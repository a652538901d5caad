//! Demo records the dashboard starts with.
//!
//! Nothing is persisted, so every run rebuilds the same five tasks with dates
//! relative to the moment of launch.

use chrono::{DateTime, Duration, Local, Utc};

use crate::fields::*;
use crate::store::TaskStore;
use crate::task::Task;

/// Store pre-filled with the demo tasks as of `now`.
pub fn seeded_store(now: DateTime<Local>) -> TaskStore {
    TaskStore::from_tasks(seed_tasks(now))
}

/// Demo tasks as of `now`, in display order.
pub fn seed_tasks(now: DateTime<Local>) -> Vec<Task> {
    let today = now.date_naive();
    let utc = now.with_timezone(&Utc);
    let days_ago = |n: i64| utc - Duration::days(n);

    vec![
        Task {
            id: 1,
            title: "Finish the project report".into(),
            description: "Prepare the monthly report for management".into(),
            category: Category::Work,
            priority: Priority::High,
            status: Status::InProgress,
            due_date: Some(today),
            created_at: days_ago(2),
            completed_at: None,
        },
        Task {
            id: 2,
            title: "Buy groceries".into(),
            description: "Milk, bread, eggs, vegetables".into(),
            category: Category::Shopping,
            priority: Priority::Medium,
            status: Status::Todo,
            due_date: Some(today),
            created_at: days_ago(1),
            completed_at: None,
        },
        Task {
            id: 3,
            title: "Gym workout".into(),
            description: "Strength training + cardio".into(),
            category: Category::Health,
            priority: Priority::Medium,
            status: Status::Completed,
            due_date: Some(today - Duration::days(1)),
            created_at: days_ago(3),
            completed_at: Some(days_ago(1)),
        },
        Task {
            id: 4,
            title: "Team call".into(),
            description: "Discuss plans for the next sprint".into(),
            category: Category::Work,
            priority: Priority::High,
            status: Status::Todo,
            due_date: Some(today + Duration::days(1)),
            created_at: utc,
            completed_at: None,
        },
        Task {
            id: 5,
            title: "Read a book".into(),
            description: "Finish \"Atomic Habits\"".into(),
            category: Category::Personal,
            priority: Priority::Low,
            status: Status::InProgress,
            due_date: None,
            created_at: days_ago(5),
            completed_at: None,
        },
    ]
}
