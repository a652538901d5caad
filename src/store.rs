//! In-memory task store.
//!
//! The `TaskStore` owns the task collection, assigns identifiers and creation
//! times, and applies the three mutations the dashboard supports: add,
//! status update and delete. Views over the collection live in `view` and
//! `metrics` and only ever borrow it.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::fields::Status;
use crate::task::{NewTask, Task};

/// Ordered task collection, newest first.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    last_id: u64,
}

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        TaskStore::default()
    }

    /// Build a store around existing records, kept in the given order.
    /// Identifiers handed out afterwards start above the highest one present.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        TaskStore { tasks, last_id }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Add a task stamped with the current time.
    pub fn add_task(&mut self, data: NewTask) -> &Task {
        self.add_task_at(data, Utc::now())
    }

    /// Add a task created at `now` and put it at the front of the collection.
    ///
    /// The store does not validate the payload; rejecting an empty title is
    /// the caller's job.
    pub fn add_task_at(&mut self, data: NewTask, now: DateTime<Utc>) -> &Task {
        self.last_id += 1;
        let task = Task {
            id: self.last_id,
            title: data.title,
            description: data.description,
            category: data.category,
            priority: data.priority,
            status: data.status,
            due_date: data.due_date,
            created_at: now,
            completed_at: (data.status == Status::Completed).then_some(now),
        };
        debug!(id = task.id, title = %task.title, "task added");
        self.tasks.insert(0, task);
        &self.tasks[0]
    }

    /// Set a task's status using the current time for `completed_at`.
    pub fn update_status(&mut self, id: u64, status: Status) -> Option<&Task> {
        self.update_status_at(id, status, Utc::now())
    }

    /// Set a task's status. Unknown IDs are ignored and yield `None`.
    pub fn update_status_at(&mut self, id: u64, status: Status, now: DateTime<Utc>) -> Option<&Task> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "status update for unknown task ignored");
            return None;
        };
        task.status = status;
        task.completed_at = if status == Status::Completed { Some(now) } else { None };
        debug!(id, ?status, "task status updated");
        Some(&*task)
    }

    /// Move a task one step along the status cycle.
    pub fn advance_status(&mut self, id: u64) -> Option<&Task> {
        let next = self.get(id)?.status.next();
        self.update_status(id, next)
    }

    /// Remove a task, returning it. Unknown IDs are ignored.
    pub fn delete_task(&mut self, id: u64) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(idx);
        debug!(id, "task deleted");
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::fields::Priority;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, hour, 0, 0).unwrap()
    }

    fn store_with(titles: &[&str]) -> TaskStore {
        let mut store = TaskStore::new();
        for title in titles {
            store.add_task_at(NewTask::new(*title), at(8));
        }
        store
    }

    #[test]
    fn test_adds_are_prepended_with_unique_ids() {
        let store = store_with(&["one", "two", "three", "four"]);
        assert_eq!(store.len(), 4);

        let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["four", "three", "two", "one"]);

        let ids: HashSet<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_add_assigns_creation_time() {
        let mut store = TaskStore::new();
        let task = store.add_task_at(NewTask::new("Water plants").priority(Priority::Low), at(9));
        assert_eq!(task.created_at, at(9));
        assert_eq!(task.status, Status::Todo);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_add_completed_task_keeps_invariant() {
        let mut store = TaskStore::new();
        let task = store.add_task_at(NewTask::new("Already done").status(Status::Completed), at(9));
        assert_eq!(task.completed_at, Some(at(9)));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = store_with(&["a", "b"]);
        let newest = store.tasks()[0].id;
        store.delete_task(newest);
        let id = store.add_task_at(NewTask::new("c"), at(10)).id;
        assert_ne!(id, newest);
    }

    #[test]
    fn test_from_tasks_continues_numbering() {
        let seeded = store_with(&["a", "b", "c"]);
        let mut store = TaskStore::from_tasks(seeded.tasks().to_vec());
        let id = store.add_task_at(NewTask::new("d"), at(10)).id;
        assert_eq!(id, 4);
    }

    #[test]
    fn test_update_status_sets_and_clears_completed_at() {
        let mut store = store_with(&["a"]);
        let id = store.tasks()[0].id;

        let task = store.update_status_at(id, Status::Completed, at(11)).unwrap();
        assert_eq!(task.status, Status::Completed);
        assert_eq!(task.completed_at, Some(at(11)));

        let task = store.update_status_at(id, Status::InProgress, at(12)).unwrap();
        assert_eq!(task.status, Status::InProgress);
        assert!(task.completed_at.is_none());

        store.update_status_at(id, Status::Completed, at(13));
        let task = store.update_status_at(id, Status::Todo, at(14)).unwrap();
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_update_status_leaves_other_fields() {
        let mut store = TaskStore::new();
        let before = store
            .add_task_at(NewTask::new("Gym").description("legs").priority(Priority::High), at(7))
            .clone();
        let after = store.update_status_at(before.id, Status::InProgress, at(8)).unwrap().clone();
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = store_with(&["a", "b"]);
        let before = store.tasks().to_vec();
        assert!(store.update_status_at(999, Status::Completed, at(9)).is_none());
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn test_advance_status_cycles() {
        let mut store = store_with(&["a"]);
        let id = store.tasks()[0].id;
        assert_eq!(store.advance_status(id).unwrap().status, Status::InProgress);
        let done = store.advance_status(id).unwrap();
        assert_eq!(done.status, Status::Completed);
        assert!(done.completed_at.is_some());
        let reopened = store.advance_status(id).unwrap();
        assert_eq!(reopened.status, Status::Todo);
        assert!(reopened.completed_at.is_none());
        assert!(store.advance_status(999).is_none());
    }

    #[test]
    fn test_delete_removes_exactly_one_and_keeps_order() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        let victim = store.tasks()[1].id;
        let removed = store.delete_task(victim).unwrap();
        assert_eq!(removed.title, "c");

        let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["d", "b", "a"]);
        assert!(store.get(victim).is_none());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = store_with(&["a", "b"]);
        let before = store.tasks().to_vec();
        assert!(store.delete_task(42).is_none());
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn test_completed_at_uses_update_time() {
        let mut store = store_with(&["a"]);
        let id = store.tasks()[0].id;
        let later = at(8) + Duration::hours(30);
        let task = store.update_status_at(id, Status::Completed, later).unwrap();
        assert_eq!(task.completed_at, Some(later));
    }
}
