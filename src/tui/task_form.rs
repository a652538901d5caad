//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` used by the add-task dialog: the text
//! inputs, the category and priority selectors, field focus order and the
//! validation that turns the form into a `NewTask`.

use chrono::NaiveDate;

use crate::error::{DashError, Result};
use crate::fields::{Category, Priority, Status};
use crate::format::parse_due_input;
use crate::task::NewTask;
use crate::tui::input::InputField;

/// Focus order of the form fields.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const CATEGORY_FIELD: usize = 2;
pub const PRIORITY_FIELD: usize = 3;
pub const DUE_FIELD: usize = 4;
pub const FIELD_COUNT: usize = 5;

/// Add-task form state.
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub due: InputField,
    pub category: usize,
    pub priority: usize,
    pub current_field: usize,
    pub categories: Vec<Category>,
    pub priorities: Vec<Priority>,
}

impl TaskForm {
    /// Empty form with personal / medium preselected.
    pub fn new() -> Self {
        let categories = Category::ALL.to_vec();
        let priorities = vec![Priority::Low, Priority::Medium, Priority::High];
        let mut form = Self {
            title: InputField::new(),
            description: InputField::new(),
            due: InputField::new(),
            category: categories.iter().position(|&c| c == Category::Personal).unwrap_or(0),
            priority: priorities.iter().position(|&p| p == Priority::Medium).unwrap_or(0),
            current_field: TITLE_FIELD,
            categories,
            priorities,
        };
        form.update_active_field();
        form
    }

    pub fn selected_category(&self) -> Category {
        self.categories[self.category]
    }

    pub fn selected_priority(&self) -> Priority {
        self.priorities[self.priority]
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Mark the focused text input as active.
    pub fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_FIELD;
        self.description.active = self.current_field == DESCRIPTION_FIELD;
        self.due.active = self.current_field == DUE_FIELD;
    }

    /// The focused text input, if the focus is not on a selector.
    pub fn active_input(&self) -> Option<&InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&self.title),
            DESCRIPTION_FIELD => Some(&self.description),
            DUE_FIELD => Some(&self.due),
            _ => None,
        }
    }

    fn active_input_mut(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&mut self.title),
            DESCRIPTION_FIELD => Some(&mut self.description),
            DUE_FIELD => Some(&mut self.due),
            _ => None,
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.active_input_mut() {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.active_input_mut() {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.active_input_mut() {
            field.handle_delete();
        }
    }

    /// Handle left/right arrow keys for cursor movement or selector changes.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            CATEGORY_FIELD => self.category = cycle(self.category, self.categories.len(), right),
            PRIORITY_FIELD => self.priority = cycle(self.priority, self.priorities.len(), right),
            _ => {
                if let Some(field) = self.active_input_mut() {
                    if right {
                        field.move_cursor_right();
                    } else {
                        field.move_cursor_left();
                    }
                }
            }
        }
    }

    /// Validate the form and build the payload for the store.
    ///
    /// A blank title is refused here; the store accepts whatever it is given.
    pub fn to_new_task(&self, today: NaiveDate) -> Result<NewTask> {
        let title = self.title.value.trim();
        if title.is_empty() {
            return Err(DashError::EmptyTitle);
        }

        let due_raw = self.due.value.trim();
        let due_date = if due_raw.is_empty() {
            None
        } else {
            Some(parse_due_input(due_raw, today).ok_or_else(|| DashError::InvalidDueDate(due_raw.to_string()))?)
        };

        Ok(NewTask {
            title: title.to_string(),
            description: self.description.value.trim().to_string(),
            category: self.selected_category(),
            priority: self.selected_priority(),
            status: Status::Todo,
            due_date,
        })
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1) % len
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}
