//! Enumerations for TUI state management.

/// Which screen or dialog currently receives input.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    Dashboard,
    AddTask,
    Help,
    Confirm,
}

/// Input mode for the dashboard's search box.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    None,
    Search,
}
