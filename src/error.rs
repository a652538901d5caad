//! Error type for the command and form layers.
//!
//! The task store itself never fails; these errors come from validating user
//! input before it reaches the store and from terminal I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("Unrecognised due date '{0}'. Use YYYY-MM-DD, 'today', 'tomorrow', a weekday or 'in Nd'.")]
    InvalidDueDate(String),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashError>;
