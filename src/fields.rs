//! Enumerations and field types for task management.
//!
//! This module defines the categorical values a task carries (category,
//! priority, status) and the "all or one" filters the views apply to them.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Life area a task belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Work,
    Personal,
    Health,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Work,
        Category::Personal,
        Category::Health,
        Category::Shopping,
        Category::Other,
    ];

    /// Lowercase identifier, the same string the JSON form uses.
    pub fn key(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Health => "health",
            Category::Shopping => "shopping",
            Category::Other => "other",
        }
    }
}

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort rank: high first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// Task completion status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Completed,
}

impl Status {
    /// Next step of the todo -> in-progress -> completed -> todo cycle.
    pub fn next(self) -> Status {
        match self {
            Status::Todo => Status::InProgress,
            Status::InProgress => Status::Completed,
            Status::Completed => Status::Todo,
        }
    }
}

/// Status filter used by the task list tabs.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Todo,
    InProgress,
    Completed,
}

impl StatusFilter {
    pub const TABS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Todo,
        StatusFilter::InProgress,
        StatusFilter::Completed,
    ];

    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Todo => status == Status::Todo,
            StatusFilter::InProgress => status == Status::InProgress,
            StatusFilter::Completed => status == Status::Completed,
        }
    }

    /// Following tab, wrapping back to `All`.
    pub fn next(self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Todo,
            StatusFilter::Todo => StatusFilter::InProgress,
            StatusFilter::InProgress => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

/// Category filter: everything, or a single category.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Work,
    Personal,
    Health,
    Shopping,
    Other,
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Work => category == Category::Work,
            CategoryFilter::Personal => category == Category::Personal,
            CategoryFilter::Health => category == Category::Health,
            CategoryFilter::Shopping => category == Category::Shopping,
            CategoryFilter::Other => category == Category::Other,
        }
    }

    pub fn next(self) -> CategoryFilter {
        match self {
            CategoryFilter::All => CategoryFilter::Work,
            CategoryFilter::Work => CategoryFilter::Personal,
            CategoryFilter::Personal => CategoryFilter::Health,
            CategoryFilter::Health => CategoryFilter::Shopping,
            CategoryFilter::Shopping => CategoryFilter::Other,
            CategoryFilter::Other => CategoryFilter::All,
        }
    }
}

/// Screens of the dashboard.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Overview,
    Tasks,
    Today,
}
