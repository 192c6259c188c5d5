//! Main application logic for the terminal user interface.
//!
//! The `App` struct owns the task store and all UI state, handles keyboard
//! input, and renders the task list, the add/edit popup, and the delete
//! confirmation dialog.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};

use crate::fields::{format_priority, format_status, Priority, Status};
use crate::filter::TaskFilter;
use crate::store::TaskStore;
use crate::task::Task;
use crate::tui::{
    colors::{DONE_GREY, HIGH_RED, LOW_GREEN, MEDIUM_GOLD},
    task_form::{TaskForm, PRIORITY_FIELD, STATUS_FIELD, TEXT_FIELD},
    utils::centered_rect,
};

/// Which screen is currently active.
#[derive(Clone, Copy, PartialEq)]
enum AppState {
    TaskList,
    TaskForm,
    ConfirmDelete,
    Help,
}

/// Terminal UI state: the store, the current filter, and popup state.
pub struct App {
    state: AppState,
    store: TaskStore,
    table_state: TableState,
    visible: Vec<u64>,
    filter: TaskFilter,
    search_active: bool,
    form: TaskForm,
    pending_delete: Option<u64>,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Create the UI over an already-opened store.
    pub fn new(store: TaskStore) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            store,
            table_state: TableState::default(),
            visible: Vec::new(),
            filter: TaskFilter::default(),
            search_active: false,
            form: TaskForm::new(),
            pending_delete: None,
            status_message: String::new(),
            should_quit: false,
        };
        app.update_visible();
        app
    }

    /// Main event loop: draw, poll, handle, until quit.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            self.handle_input()?;
            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Recompute the visible id list from the filter, keeping the selection
    /// on the same task where possible.
    fn update_visible(&mut self) {
        let old_selected = self
            .table_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .copied();

        self.visible = self
            .filter
            .apply(self.store.tasks())
            .iter()
            .map(|t| t.id)
            .collect();

        let new_index = old_selected
            .and_then(|id| self.visible.iter().position(|&v| v == id))
            .or(if self.visible.is_empty() { None } else { Some(0) });
        self.table_state.select(new_index);
    }

    fn selected_task(&self) -> Option<&Task> {
        self.table_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .and_then(|&id| self.store.get(id))
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match self.state {
                    AppState::TaskList => self.handle_task_list_input(key.code),
                    AppState::TaskForm => self.handle_form_input(key.code),
                    AppState::ConfirmDelete => self.handle_confirm_input(key.code),
                    AppState::Help => self.state = AppState::TaskList,
                }
            }
        }
        Ok(())
    }

    fn handle_task_list_input(&mut self, key: KeyCode) {
        // While the search bar is active, keys edit the search term.
        if self.search_active {
            match key {
                KeyCode::Esc => {
                    self.filter.search.clear();
                    self.search_active = false;
                    self.update_visible();
                }
                KeyCode::Enter => self.search_active = false,
                KeyCode::Backspace => {
                    self.filter.search.pop();
                    self.update_visible();
                }
                KeyCode::Char(c) => {
                    self.filter.search.push(c);
                    self.update_visible();
                }
                _ => {}
            }
            return;
        }

        self.status_message.clear();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => {
                if let Some(selected) = self.table_state.selected() {
                    if selected > 0 {
                        self.table_state.select(Some(selected - 1));
                    }
                }
            }
            KeyCode::Down => {
                if let Some(selected) = self.table_state.selected() {
                    if selected + 1 < self.visible.len() {
                        self.table_state.select(Some(selected + 1));
                    }
                }
            }
            KeyCode::Char('a') => {
                self.form = TaskForm::new();
                self.state = AppState::TaskForm;
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task() {
                    self.form = TaskForm::from_task(task);
                    self.state = AppState::TaskForm;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    if let Err(e) = self.store.toggle_complete(id) {
                        self.status_message = format!("Failed to save tasks: {e}");
                    }
                    self.update_visible();
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    self.pending_delete = Some(id);
                    self.state = AppState::ConfirmDelete;
                }
            }
            KeyCode::Char('/') => self.search_active = true,
            KeyCode::Char('p') => {
                self.filter.priority = cycle_priority(self.filter.priority);
                self.update_visible();
            }
            KeyCode::Char('s') => {
                self.filter.status = cycle_status(self.filter.status);
                self.update_visible();
            }
            KeyCode::Char('c') => {
                self.filter = TaskFilter::default();
                self.update_visible();
            }
            KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.status_message.clear();
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        if self.form.text.value.trim().is_empty() {
            self.status_message = "Task text cannot be empty.".to_string();
            return;
        }
        let text = self.form.text.value.clone();
        let priority = self.form.selected_priority();
        let status = self.form.selected_status();

        let result = match self.form.editing {
            Some(id) => self
                .store
                .edit(id, &text, Some(priority), Some(status))
                .map(|_| ()),
            None => self.store.add(&text, priority, Some(status)).map(|_| ()),
        };
        if let Err(e) = result {
            self.status_message = format!("Failed to save tasks: {e}");
            return;
        }
        self.state = AppState::TaskList;
        self.update_visible();
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(id) = self.pending_delete.take() {
                    match self.store.delete(id) {
                        Ok(true) => self.status_message = format!("Deleted task {id}"),
                        Ok(false) => {}
                        Err(e) => self.status_message = format!("Failed to save tasks: {e}"),
                    }
                }
                self.state = AppState::TaskList;
                self.update_visible();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.pending_delete = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
    }

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(f.area());

        self.draw_header(f, chunks[0]);
        self.draw_task_table(f, chunks[1]);
        self.draw_footer(f, chunks[2]);

        match self.state {
            AppState::TaskForm => self.draw_form_popup(f),
            AppState::ConfirmDelete => self.draw_confirm_popup(f),
            AppState::Help => self.draw_help_popup(f),
            AppState::TaskList => {}
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let search = if self.search_active {
            format!("/{}_", self.filter.search)
        } else if self.filter.search.is_empty() {
            "-".to_string()
        } else {
            format!("/{}", self.filter.search)
        };
        let priority = self
            .filter
            .priority
            .map(format_priority)
            .unwrap_or("All");
        let status = self.filter.status.map(format_status).unwrap_or("All");

        let line = Line::from(vec![
            Span::styled(
                " taskpad ",
                Style::default()
                    .fg(Color::Black)
                    .bg(MEDIUM_GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  search: {search}  priority: {priority}  status: {status}  ({} of {} shown)",
                self.visible.len(),
                self.store.len()
            )),
        ]);
        let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);
    }

    fn draw_task_table(&mut self, f: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .visible
            .iter()
            .filter_map(|&id| self.store.get(id))
            .map(|t| {
                let style = if t.completed {
                    Style::default()
                        .fg(DONE_GREY)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(priority_color(t.priority))
                };
                Row::new(vec![
                    if t.completed { "x" } else { " " }.to_string(),
                    t.text.clone(),
                    format_priority(t.priority).to_string(),
                    format_status(t.status).to_string(),
                    t.created_at
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Min(20),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(17),
            ],
        )
        .header(
            Row::new(vec!["", "Task", "Pri", "Status", "Created"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(" Tasks "))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect) {
        let text = if self.status_message.is_empty() {
            "a add  e edit  space toggle  d delete  / search  p/s filter  c clear  ? help  q quit"
                .to_string()
        } else {
            self.status_message.clone()
        };
        let footer = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, area);
    }

    fn draw_form_popup(&self, f: &mut Frame) {
        let title = if self.form.editing.is_some() {
            " Edit Task "
        } else {
            " Add Task "
        };
        let area = centered_rect(60, 40, f.area());
        f.render_widget(Clear, area);

        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        let text_style = field_style(self.form.current_field == TEXT_FIELD);
        let text = Paragraph::new(self.form.text.value.as_str()).style(text_style).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Text ")
                .style(text_style),
        );
        f.render_widget(text, chunks[0]);

        let priority = Line::from(vec![
            Span::raw(" Priority: "),
            Span::styled(
                format!("< {} >", format_priority(self.form.selected_priority())),
                field_style(self.form.current_field == PRIORITY_FIELD)
                    .fg(priority_color(self.form.selected_priority())),
            ),
        ]);
        f.render_widget(Paragraph::new(priority), chunks[1]);

        let status = Line::from(vec![
            Span::raw(" Status:   "),
            Span::styled(
                format!("< {} >", format_status(self.form.selected_status())),
                field_style(self.form.current_field == STATUS_FIELD),
            ),
        ]);
        f.render_widget(Paragraph::new(status), chunks[2]);

        let hint = Paragraph::new("Tab next field  <-/-> change  Enter save  Esc cancel")
            .alignment(Alignment::Center)
            .style(Style::default().fg(DONE_GREY));
        f.render_widget(hint, chunks[3]);
    }

    fn draw_confirm_popup(&self, f: &mut Frame) {
        let area = centered_rect(50, 20, f.area());
        f.render_widget(Clear, area);

        let text = self
            .pending_delete
            .and_then(|id| self.store.get(id))
            .map(|t| t.text.clone())
            .unwrap_or_default();
        let body = Paragraph::new(format!("Delete \"{text}\"?\n\ny confirm / n cancel"))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Confirm Delete ")
                    .style(Style::default().fg(HIGH_RED)),
            );
        f.render_widget(body, area);
    }

    fn draw_help_popup(&self, f: &mut Frame) {
        let area = centered_rect(60, 50, f.area());
        f.render_widget(Clear, area);

        let lines = vec![
            Line::from("a        add a task"),
            Line::from("e        edit the selected task"),
            Line::from("space    toggle completion"),
            Line::from("d        delete the selected task"),
            Line::from("/        search task text"),
            Line::from("p        cycle the priority filter"),
            Line::from("s        cycle the status filter"),
            Line::from("c        clear search and filters"),
            Line::from("q        quit"),
            Line::from(""),
            Line::from("press any key to close"),
        ];
        let body = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Help "));
        f.render_widget(body, area);
    }
}

/// Advance the priority filter: All -> Low -> Medium -> High -> All.
fn cycle_priority(current: Option<Priority>) -> Option<Priority> {
    match current {
        None => Some(Priority::Low),
        Some(Priority::Low) => Some(Priority::Medium),
        Some(Priority::Medium) => Some(Priority::High),
        Some(Priority::High) => None,
    }
}

/// Advance the status filter: All -> NotStarted -> InProgress -> Completed -> All.
fn cycle_status(current: Option<Status>) -> Option<Status> {
    match current {
        None => Some(Status::NotStarted),
        Some(Status::NotStarted) => Some(Status::InProgress),
        Some(Status::InProgress) => Some(Status::Completed),
        Some(Status::Completed) => None,
    }
}

fn priority_color(p: Priority) -> Color {
    match p {
        Priority::Low => LOW_GREEN,
        Priority::Medium => MEDIUM_GOLD,
        Priority::High => HIGH_RED,
    }
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_cycles_return_to_unfiltered() {
        let mut p = None;
        for _ in 0..4 {
            p = cycle_priority(p);
        }
        assert_eq!(p, None);

        let mut s = None;
        for _ in 0..4 {
            s = cycle_status(s);
        }
        assert_eq!(s, None);
    }
}
