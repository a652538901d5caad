//! Display labels, due-date parsing and plain-text table output.

use chrono::{Datelike, Duration, NaiveDate};

use crate::fields::*;
use crate::task::Task;
use crate::view::is_overdue;

/// Parse human-readable due date input.
///
/// Supports:
/// - "today", "tomorrow"
/// - weekday names ("friday", "fri") for the next occurrence, today included
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Duration::try_days(days).and_then(|d| today.checked_add_signed(d));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Duration::try_weeks(weeks).and_then(|w| today.checked_add_signed(w));
            }
        }
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];
    for (day_name, target_day) in weekdays {
        if s == day_name {
            let current_day = today.weekday().num_days_from_monday() as i64;
            let days_ahead = (target_day + 7 - current_day) % 7;
            return Some(today + Duration::days(days_ahead));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Format a due date relative to today: "Today", "Tomorrow" or "14 Mar".
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) if d == today => "Today".into(),
        Some(d) if d == today + Duration::days(1) => "Tomorrow".into(),
        Some(d) => d.format("%-d %b").to_string(),
    }
}

/// Format a task status for display.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Todo => "To do",
        Status::InProgress => "In progress",
        Status::Completed => "Completed",
    }
}

/// Format a priority level for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

/// Format a category for display.
pub fn format_category(c: Category) -> &'static str {
    match c {
        Category::Work => "Work",
        Category::Personal => "Personal",
        Category::Health => "Health",
        Category::Shopping => "Shopping",
        Category::Other => "Other",
    }
}

pub fn format_status_filter(f: StatusFilter) -> &'static str {
    match f {
        StatusFilter::All => "All",
        StatusFilter::Todo => "To do",
        StatusFilter::InProgress => "In progress",
        StatusFilter::Completed => "Completed",
    }
}

pub fn format_category_filter(f: CategoryFilter) -> &'static str {
    match f {
        CategoryFilter::All => "All categories",
        CategoryFilter::Work => "Work",
        CategoryFilter::Personal => "Personal",
        CategoryFilter::Health => "Health",
        CategoryFilter::Shopping => "Shopping",
        CategoryFilter::Other => "Other",
    }
}

/// Render tasks as a plain-text table, one line per task plus a header.
pub fn format_table(tasks: &[&Task], today: NaiveDate) -> String {
    let mut out = format!(
        "{:<5} {:<12} {:<7} {:<9} {:<12} {}\n",
        "ID", "Status", "Pri", "Category", "Due", "Title"
    );
    for t in tasks {
        let mut due = format_due_relative(t.due_date, today);
        if is_overdue(t, today) {
            due.push('!');
        }
        out.push_str(&format!(
            "{:<5} {:<12} {:<7} {:<9} {:<12} {}\n",
            t.id,
            format_status(t.status),
            format_priority(t.priority),
            format_category(t.category),
            due,
            truncate(&t.title, 48),
        ));
    }
    out
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
