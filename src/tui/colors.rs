//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Priority, Status};

/// Accent for the active view, headers and focused fields.
pub const INDIGO: Color = Color::Rgb(99, 102, 241);
/// Muted text and the todo status.
pub const SLATE: Color = Color::Rgb(100, 116, 139);
/// In progress.
pub const SKY: Color = Color::Rgb(56, 189, 248);
/// Completed.
pub const EMERALD: Color = Color::Rgb(52, 211, 153);
/// High priority and overdue dates.
pub const ROSE: Color = Color::Rgb(248, 113, 113);
/// Confirmation dialog background.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => SLATE,
        Status::InProgress => SKY,
        Status::Completed => EMERALD,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => SLATE,
        Priority::Medium => SKY,
        Priority::High => ROSE,
    }
}
