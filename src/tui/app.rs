//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store for the
//! session, handles key input, and renders the dashboard: a sidebar with the
//! three views (Overview, All tasks, Today), the filtered task table, the
//! add-task form and the help and confirmation dialogs.

use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::fields::*;
use crate::format::*;
use crate::metrics::OverviewMetrics;
use crate::store::TaskStore;
use crate::task::Task;
use crate::tui::{
    colors::{priority_color, status_color, DARK_RED, EMERALD, INDIGO, ROSE, SKY, SLATE},
    enums::{AppState, InputMode},
    input::InputField,
    task_form::{TaskForm, CATEGORY_FIELD, DESCRIPTION_FIELD, DUE_FIELD, PRIORITY_FIELD, TITLE_FIELD},
    utils::centered_rect,
};
use crate::view::{filter_and_sort, is_overdue, today_tasks, StatusCounts, TaskFilter};

const SIDEBAR_WIDTH: u16 = 24;
/// Rows shown in the overview's today / upcoming panels.
const OVERVIEW_PREVIEW: usize = 3;

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    store: TaskStore,
    view: View,
    filter: TaskFilter,
    search: InputField,
    input_mode: InputMode,
    task_list_state: TableState,
    visible_tasks: Vec<u64>,
    task_form: TaskForm,
    status_message: String,
    pending_delete: Option<u64>,
}

impl App {
    /// Create the app around a store, opening on `view`.
    pub fn new(store: TaskStore, view: View) -> Self {
        let mut app = App {
            state: AppState::Dashboard,
            store,
            view,
            filter: TaskFilter::default(),
            search: InputField::new(),
            input_mode: InputMode::None,
            task_list_state: TableState::default(),
            visible_tasks: Vec::new(),
            task_form: TaskForm::new(),
            status_message: String::new(),
            pending_delete: None,
        };
        app.update_visible_tasks();
        app
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Recompute the rows of the current list view.
    ///
    /// Keeps the selection on the same task when it is still visible.
    fn update_visible_tasks(&mut self) {
        let old_selected_id = self.selected_task_id();

        let today = Self::today();
        self.visible_tasks = match self.view {
            View::Today => filter_and_sort(today_tasks(self.store.tasks(), today), &self.filter),
            _ => filter_and_sort(self.store.tasks(), &self.filter),
        }
        .into_iter()
        .map(|t| t.id)
        .collect();

        let new_idx = old_selected_id
            .and_then(|id| self.visible_tasks.iter().position(|&v| v == id))
            .or(if self.visible_tasks.is_empty() { None } else { Some(0) });
        self.task_list_state.select(new_idx);
    }

    /// Tasks the status tabs count: everything the current view is based on.
    fn view_base(&self) -> Vec<&Task> {
        match self.view {
            View::Today => today_tasks(self.store.tasks(), Self::today()),
            _ => self.store.tasks().iter().collect(),
        }
    }

    fn selected_task_id(&self) -> Option<u64> {
        self.task_list_state
            .selected()
            .and_then(|idx| self.visible_tasks.get(idx))
            .copied()
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Switch screens. Filters belong to a screen and start fresh on entry.
    fn set_view(&mut self, view: View) {
        if self.view == view {
            return;
        }
        debug!(?view, "switching view");
        self.view = view;
        self.filter = TaskFilter::default();
        self.search.clear();
        self.input_mode = InputMode::None;
        self.task_list_state.select(None);
        self.update_visible_tasks();
    }

    fn is_list_view(&self) -> bool {
        matches!(self.view, View::Tasks | View::Today)
    }

    fn move_selection(&mut self, down: bool) {
        let Some(selected) = self.task_list_state.selected() else {
            return;
        };
        if down {
            if selected + 1 < self.visible_tasks.len() {
                self.task_list_state.select(Some(selected + 1));
            }
        } else if selected > 0 {
            self.task_list_state.select(Some(selected - 1));
        }
    }

    fn set_selected_status(&mut self, status: Status) {
        if let Some(id) = self.selected_task_id() {
            if self.store.update_status(id, status).is_some() {
                self.set_status_message(format!("Status changed to \"{}\"", format_status(status)));
            }
            self.update_visible_tasks();
        }
    }

    fn advance_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if let Some(task) = self.store.advance_status(id) {
                let msg = format!("Status changed to \"{}\"", format_status(task.status));
                self.set_status_message(msg);
            }
            self.update_visible_tasks();
        }
    }

    fn request_delete(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.pending_delete = Some(id);
            self.state = AppState::Confirm;
        }
    }

    fn delete_pending(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            if self.store.delete_task(id).is_some() {
                self.set_status_message("Task deleted".to_string());
            }
            self.update_visible_tasks();
        }
    }

    fn submit_form(&mut self) {
        match self.task_form.to_new_task(Self::today()) {
            Ok(data) => {
                self.store.add_task(data);
                self.state = AppState::Dashboard;
                self.task_form = TaskForm::new();
                self.update_visible_tasks();
                self.set_status_message("Task created".to_string());
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    /// Handle keyboard input on the dashboard.
    ///
    /// Returns true if the application should quit.
    fn handle_dashboard_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.input_mode == InputMode::Search {
            match key {
                KeyCode::Esc => {
                    self.search.clear();
                    self.input_mode = InputMode::None;
                }
                KeyCode::Enter => {
                    self.input_mode = InputMode::None;
                    if !self.search.value.is_empty() {
                        self.set_status_message(format!(
                            "Search: '{}' ({} tasks)",
                            self.search.value,
                            self.visible_tasks.len()
                        ));
                    }
                    return false;
                }
                KeyCode::Backspace => self.search.handle_backspace(),
                KeyCode::Left => self.search.move_cursor_left(),
                KeyCode::Right => self.search.move_cursor_right(),
                KeyCode::Char(c) => self.search.handle_char(c),
                _ => return false,
            }
            self.filter.search = self.search.value.clone();
            self.update_visible_tasks();
            return false;
        }

        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.filter.is_empty() {
                    return true;
                }
                self.filter = TaskFilter::default();
                self.search.clear();
                self.update_visible_tasks();
                self.set_status_message("Filters cleared".to_string());
            }
            KeyCode::Char('1') => self.set_view(View::Overview),
            KeyCode::Char('2') => self.set_view(View::Tasks),
            KeyCode::Char('3') => self.set_view(View::Today),
            KeyCode::Char('a') => {
                self.task_form = TaskForm::new();
                self.state = AppState::AddTask;
            }
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => self.state = AppState::Help,
            _ if !self.is_list_view() => {}
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('c') => {
                self.filter.category = self.filter.category.next();
                self.update_visible_tasks();
            }
            KeyCode::Tab => {
                self.filter.status = self.filter.status.next();
                self.update_visible_tasks();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.advance_selected(),
            KeyCode::Char('t') => self.set_selected_status(Status::Todo),
            KeyCode::Char('p') => self.set_selected_status(Status::InProgress),
            KeyCode::Char('d') => self.set_selected_status(Status::Completed),
            KeyCode::Char('x') | KeyCode::Delete => self.request_delete(),
            _ => {}
        }
        false
    }

    /// Handle keyboard input in the add-task form.
    fn handle_form_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Esc => {
                self.state = AppState::Dashboard;
                self.set_status_message("Cancelled".to_string());
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
        false
    }

    /// Handle keyboard input in the confirmation dialog.
    fn handle_confirm_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.delete_pending();
                self.state = AppState::Dashboard;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.pending_delete = None;
                self.state = AppState::Dashboard;
            }
            _ => {}
        }
        false
    }

    /// Dispatch one key press to the handler for the current state.
    ///
    /// Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.clear_status_message();
        match self.state {
            AppState::Dashboard => self.handle_dashboard_input(key, modifiers),
            AppState::AddTask => self.handle_form_input(key, modifiers),
            AppState::Confirm => self.handle_confirm_input(key),
            AppState::Help => {
                self.state = AppState::Dashboard;
                false
            }
        }
    }

    /// Poll for and handle keyboard events.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    fn render_sidebar(&self, f: &mut Frame, area: Rect) {
        let entries = [
            (View::Overview, "1  Overview"),
            (View::Tasks, "2  All tasks"),
            (View::Today, "3  Today"),
        ];
        let mut lines = vec![
            Line::from(Span::styled("TASKDASH", Style::default().fg(INDIGO).add_modifier(Modifier::BOLD))),
            Line::from(""),
        ];
        for (view, label) in entries {
            let style = if view == self.view {
                Style::default().bg(INDIGO).fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(format!(" {label:<20}"), style)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" a  New task", Style::default().fg(SLATE))));
        lines.push(Line::from(Span::styled(" ?  Help", Style::default().fg(SLATE))));
        lines.push(Line::from(Span::styled(" q  Quit", Style::default().fg(SLATE))));

        let sidebar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(sidebar, area);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let title = match self.view {
            View::Overview => "Overview",
            View::Tasks => "All tasks",
            View::Today => "Today",
        };
        let date = Local::now().format("%A, %-d %B %Y").to_string();
        let header = Paragraph::new(Line::from(vec![
            Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(date, Style::default().fg(SLATE).add_modifier(Modifier::ITALIC)),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);
    }

    fn render_card(f: &mut Frame, area: Rect, label: &str, value: String, color: Color) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(label.to_string(), Style::default().fg(SLATE))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
        f.render_widget(card, area);
    }

    fn render_overview(&self, f: &mut Frame, area: Rect) {
        let today = Self::today();
        let metrics = OverviewMetrics::derive(self.store.tasks());

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(OVERVIEW_PREVIEW as u16 + 3),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let stat_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(rows[0]);
        let counts = metrics.counts;
        Self::render_card(f, stat_cols[0], "Completed", counts.completed.to_string(), EMERALD);
        Self::render_card(f, stat_cols[1], "In progress", counts.in_progress.to_string(), SKY);
        Self::render_card(f, stat_cols[2], "Planned", counts.todo.to_string(), Color::Yellow);
        Self::render_card(f, stat_cols[3], "Progress", format!("{}%", metrics.completion_rate), INDIGO);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let mut today_lines: Vec<Line> = metrics
            .today
            .iter()
            .take(OVERVIEW_PREVIEW)
            .map(|t| {
                Line::from(vec![
                    Span::raw(truncate(&t.title, 32)),
                    Span::raw("  "),
                    Span::styled(format_status(t.status), Style::default().fg(status_color(t.status))),
                ])
            })
            .collect();
        if today_lines.is_empty() {
            today_lines.push(Line::from(Span::styled("Nothing due today", Style::default().fg(SLATE))));
        }
        let today_panel = Paragraph::new(today_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Due today ({})", metrics.today.len())),
        );
        f.render_widget(today_panel, panels[0]);

        let mut upcoming_lines: Vec<Line> = metrics
            .upcoming
            .iter()
            .take(OVERVIEW_PREVIEW)
            .map(|t| {
                Line::from(vec![
                    Span::raw(truncate(&t.title, 32)),
                    Span::raw("  "),
                    Span::styled(format_due_relative(t.due_date, today), Style::default().fg(SLATE)),
                ])
            })
            .collect();
        if upcoming_lines.is_empty() {
            upcoming_lines.push(Line::from(Span::styled("Nothing upcoming", Style::default().fg(SLATE))));
        }
        let upcoming_panel = Paragraph::new(upcoming_lines)
            .block(Block::default().borders(Borders::ALL).title("Upcoming this week"));
        f.render_widget(upcoming_panel, panels[1]);

        let quick_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(rows[2]);
        Self::render_card(f, quick_cols[0], "High priority", metrics.high_priority_open.to_string(), ROSE);
        Self::render_card(
            f,
            quick_cols[1],
            "Completed this week",
            metrics.completed_this_week.to_string(),
            EMERALD,
        );
        let (top_value, top_label) = match metrics.top_category {
            Some(top) => (format_category(top.category).to_string(), format!("Top category, {} tasks", top.count)),
            None => ("-".to_string(), "No data".to_string()),
        };
        Self::render_card(f, quick_cols[2], &top_label, top_value, INDIGO);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Weekly progress: {} of {} tasks done",
                metrics.completed_this_week, counts.all
            )))
            .gauge_style(Style::default().fg(INDIGO))
            .percent(metrics.weekly_progress.min(100) as u16);
        f.render_widget(gauge, rows[3]);
    }

    fn render_filter_bar(&self, f: &mut Frame, area: Rect) {
        let counts = StatusCounts::from_tasks(self.view_base());
        let mut spans = Vec::new();
        for tab in StatusFilter::TABS {
            let style = if tab == self.filter.status {
                Style::default().bg(INDIGO).fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(
                format!(" {} ({}) ", format_status_filter(tab), counts.for_filter(tab)),
                style,
            ));
            spans.push(Span::raw(" "));
        }

        let search_style = if self.input_mode == InputMode::Search {
            Style::default().fg(INDIGO)
        } else {
            Style::default()
        };
        let search_text = if self.search.value.is_empty() && self.input_mode != InputMode::Search {
            Span::styled("Search tasks... (/)", Style::default().fg(SLATE))
        } else {
            Span::raw(self.search.value.clone())
        };

        let lines = vec![
            Line::from(spans),
            Line::from(vec![
                Span::styled("Search: ", search_style),
                search_text,
                Span::raw("    "),
                Span::styled("Category (c): ", Style::default().fg(SLATE)),
                Span::raw(format_category_filter(self.filter.category)),
            ]),
        ];
        let bar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Filters (Tab: status)"));
        f.render_widget(bar, area);

        if self.input_mode == InputMode::Search {
            let x = area.x + 1 + "Search: ".len() as u16 + self.search.cursor_width() as u16;
            f.set_cursor_position((x, area.y + 2));
        }
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let today = Self::today();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);
        self.render_filter_bar(f, chunks[0]);

        let header_cells = ["ID", "Status", "Priority", "Category", "Due", "Title"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(INDIGO).fg(Color::White))
            .height(1);

        let rows: Vec<Row> = self
            .visible_tasks
            .iter()
            .filter_map(|&id| self.store.get(id))
            .map(|task| {
                let title_style = if task.status == Status::Completed {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                let due_style = if is_overdue(task, today) {
                    Style::default().fg(ROSE)
                } else {
                    Style::default().fg(SLATE)
                };
                let title = if task.description.is_empty() {
                    task.title.clone()
                } else {
                    format!("{}  - {}", task.title, task.description)
                };
                Row::new(vec![
                    Cell::from(task.id.to_string()),
                    Cell::from(format_status(task.status)).style(Style::default().fg(status_color(task.status))),
                    Cell::from(format_priority(task.priority)).style(Style::default().fg(priority_color(task.priority))),
                    Cell::from(format_category(task.category)),
                    Cell::from(format_due_relative(task.due_date, today)).style(due_style),
                    Cell::from(title).style(title_style),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Min(20),
        ];

        let title = if self.visible_tasks.is_empty() {
            if self.filter.is_empty() && self.view == View::Tasks {
                "No tasks yet - press 'a' to add one".to_string()
            } else {
                "No tasks found".to_string()
            }
        } else {
            match self.view {
                View::Today => format!("{} scheduled for today", self.visible_tasks.len()),
                _ => format!("Tasks ({}/{})", self.visible_tasks.len(), self.store.len()),
            }
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.task_list_state);
    }

    fn render_task_form(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 70, area);
        f.render_widget(Clear, area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title("New task")
            .border_style(Style::default().fg(INDIGO));
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(inner);

        let form = &self.task_form;
        let focus = |field: usize| {
            if form.current_field == field {
                Style::default().fg(INDIGO)
            } else {
                Style::default()
            }
        };

        let title = Paragraph::new(form.title.value.as_str())
            .block(Block::default().borders(Borders::ALL).title("Title *").border_style(focus(TITLE_FIELD)));
        f.render_widget(title, chunks[0]);

        let description = Paragraph::new(form.description.value.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Description")
                    .border_style(focus(DESCRIPTION_FIELD)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(description, chunks[1]);

        let category = Paragraph::new(format!("< {} >", format_category(form.selected_category())))
            .block(Block::default().borders(Borders::ALL).title("Category").border_style(focus(CATEGORY_FIELD)));
        f.render_widget(category, chunks[2]);

        let priority = Paragraph::new(Span::styled(
            format!("< {} >", format_priority(form.selected_priority())),
            Style::default().fg(priority_color(form.selected_priority())),
        ))
        .block(Block::default().borders(Borders::ALL).title("Priority").border_style(focus(PRIORITY_FIELD)));
        f.render_widget(priority, chunks[3]);

        let due = Paragraph::new(form.due.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Due (YYYY-MM-DD, today, tomorrow, fri, in 3d)")
                .border_style(focus(DUE_FIELD)),
        );
        f.render_widget(due, chunks[4]);

        let hint = Paragraph::new("Tab/Up/Down: field   Left/Right: change   Enter: create   Esc: cancel")
            .style(Style::default().fg(SLATE))
            .wrap(Wrap { trim: true });
        f.render_widget(hint, chunks[5]);

        if let Some(input) = form.active_input() {
            let target = match form.current_field {
                TITLE_FIELD => chunks[0],
                DESCRIPTION_FIELD => chunks[1],
                _ => chunks[4],
            };
            f.set_cursor_position((target.x + 1 + input.cursor_width() as u16, target.y + 1));
        }
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("Views:", bold)),
            Line::from("  1 / 2 / 3      Overview / All tasks / Today"),
            Line::from("  a              Add new task"),
            Line::from("  ?, h, F1       Show this help"),
            Line::from("  q, Esc, Ctrl+C Quit (Esc clears filters first)"),
            Line::from(""),
            Line::from(Span::styled("Task lists:", bold)),
            Line::from("  Up/Down, k/j   Move selection"),
            Line::from("  Enter, Space   Advance status (To do > In progress > Completed > To do)"),
            Line::from("  t / p / d      Set To do / In progress / Completed"),
            Line::from("  x, Delete      Delete task"),
            Line::from("  /              Search title and description"),
            Line::from("  c              Cycle category filter"),
            Line::from("  Tab            Cycle status tab"),
            Line::from(""),
            Line::from(Span::styled("Due date formats:", bold)),
            Line::from("  YYYY-MM-DD, today, tomorrow, monday..sunday, in 3d, in 2w"),
        ];

        let area = centered_rect(70, 70, area);
        f.render_widget(Clear, area);
        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help - press any key to return"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let title = self
            .pending_delete
            .and_then(|id| self.store.get(id))
            .map(|t| t.title.clone())
            .unwrap_or_default();

        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled("Delete this task?", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(title),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title("Confirm")
                    .borders(Borders::ALL)
                    .style(Style::default().bg(DARK_RED)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.input_mode == InputMode::Search {
            "Search: type to filter (Esc to clear, Enter to confirm)".to_string()
        } else {
            match self.state {
                AppState::Dashboard => format!("{} tasks | Press '?' for help", self.store.len()),
                AppState::AddTask => "Add new task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm delete".to_string(),
            }
        };
        let status = Paragraph::new(text).style(Style::default().bg(INDIGO).fg(Color::White));
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to appropriate view renderers.
    pub fn render(&mut self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(rows[0]);
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(cols[1]);

        self.render_sidebar(f, cols[0]);
        self.render_header(f, main[0]);
        match self.view {
            View::Overview => self.render_overview(f, main[1]),
            View::Tasks | View::Today => self.render_task_list(f, main[1]),
        }

        match self.state {
            AppState::Dashboard => {}
            AppState::AddTask => self.render_task_form(f, rows[0]),
            AppState::Help => self.render_help(f, rows[0]),
            AppState::Confirm => self.render_confirm(f, rows[0]),
        }

        self.render_status_bar(f, rows[1]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::seed::seeded_store;

    fn app(view: View) -> App {
        App::new(seeded_store(Local::now()), view)
    }

    fn press(app: &mut App, key: KeyCode) -> bool {
        app.handle_key(key, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_task_list_is_sorted() {
        let app = app(View::Tasks);
        // high: 1 (today), 4 (tomorrow); medium: 3 (yesterday), 2 (today); low: 5
        assert_eq!(app.visible_tasks, vec![1, 4, 3, 2, 5]);
        assert_eq!(app.selected_task_id(), Some(1));
    }

    #[test]
    fn test_today_view() {
        let app = app(View::Today);
        assert_eq!(app.visible_tasks, vec![1, 2]);
    }

    #[test]
    fn test_view_switch_resets_filters() {
        let mut app = app(View::Tasks);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.filter.category, CategoryFilter::Work);
        assert_eq!(app.visible_tasks, vec![1, 4]);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.view, View::Today);
        assert!(app.filter.is_empty());
        assert_eq!(app.visible_tasks, vec![1, 2]);
    }

    #[test]
    fn test_search() {
        let mut app = app(View::Tasks);
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "EGGS");
        assert_eq!(app.visible_tasks, vec![2]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::None);
        assert!(app.status_message.contains("1 tasks"));

        // Esc outside search mode clears the filter instead of quitting.
        assert!(!press(&mut app, KeyCode::Esc));
        assert_eq!(app.visible_tasks.len(), 5);
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_status_tabs() {
        let mut app = app(View::Tasks);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.filter.status, StatusFilter::Todo);
        assert_eq!(app.visible_tasks, vec![4, 2]);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.visible_tasks, vec![1, 5]);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.visible_tasks, vec![3]);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.filter.status, StatusFilter::All);
    }

    #[test]
    fn test_advance_and_set_status() {
        let mut app = app(View::Tasks);
        press(&mut app, KeyCode::Enter);
        let task = app.store.get(1).unwrap();
        assert_eq!(task.status, Status::Completed);
        assert!(task.completed_at.is_some());
        assert_eq!(app.status_message, "Status changed to \"Completed\"");

        press(&mut app, KeyCode::Char('t'));
        let task = app.store.get(1).unwrap();
        assert_eq!(task.status, Status::Todo);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_selection_follows_task() {
        let mut app = app(View::Tasks);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_task_id(), Some(4));
        press(&mut app, KeyCode::Tab);
        // Task 4 is a todo and stays selected under the todo tab.
        assert_eq!(app.selected_task_id(), Some(4));
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_task_id(), Some(4));
    }

    #[test]
    fn test_delete_with_confirmation() {
        let mut app = app(View::Tasks);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state, AppState::Confirm);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.len(), 5);

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.state, AppState::Dashboard);
        assert_eq!(app.store.len(), 4);
        assert!(app.store.get(1).is_none());
        assert_eq!(app.status_message, "Task deleted");
        assert_eq!(app.selected_task_id(), Some(4));
    }

    #[test]
    fn test_add_task_form() {
        let mut app = app(View::Tasks);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.state, AppState::AddTask);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::AddTask);
        assert_eq!(app.status_message, "Task title cannot be empty");

        type_str(&mut app, "Pay rent");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::Dashboard);
        assert_eq!(app.status_message, "Task created");
        assert_eq!(app.store.len(), 6);
        let newest = &app.store.tasks()[0];
        assert_eq!(newest.title, "Pay rent");
        assert_eq!(newest.priority, Priority::High);
        assert_eq!(newest.status, Status::Todo);
        assert_eq!(app.visible_tasks.len(), 6);
    }

    #[test]
    fn test_form_rejects_out_of_range_due() {
        let mut app = app(View::Tasks);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "x");
        press(&mut app, KeyCode::BackTab);
        type_str(&mut app, "in 99999999999w");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::AddTask);
        assert!(app.status_message.starts_with("Unrecognised due date"));
        assert_eq!(app.store.len(), 5);
    }

    #[test]
    fn test_overview_ignores_list_keys() {
        let mut app = app(View::Overview);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state, AppState::Dashboard);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.get(1).unwrap().status, Status::InProgress);
    }

    #[test]
    fn test_render_screens() {
        let mut app = app(View::Overview);
        let text = screen(&mut app);
        assert!(text.contains("Due today (2)"));
        assert!(text.contains("Weekly progress"));

        press(&mut app, KeyCode::Char('2'));
        let text = screen(&mut app);
        assert!(text.contains("Buy groceries"));
        assert!(text.contains("Tasks (5/5)"));

        press(&mut app, KeyCode::Char('a'));
        let text = screen(&mut app);
        assert!(text.contains("New task"));

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('?'));
        let text = screen(&mut app);
        assert!(text.contains("Help - press any key to return"));
    }

    #[test]
    fn test_empty_store_renders() {
        let mut app = App::new(TaskStore::new(), View::Tasks);
        assert!(app.selected_task_id().is_none());
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state, AppState::Dashboard);
        let text = screen(&mut app);
        assert!(text.contains("No tasks yet"));
    }
}
