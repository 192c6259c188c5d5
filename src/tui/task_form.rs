//! Add/edit popup form for the terminal user interface.
//!
//! The form carries a text field plus priority and status selectors.
//! Tab/Shift-Tab move between fields; left/right either move the text
//! cursor or cycle the focused selector.

use crate::fields::{Priority, Status};
use crate::task::Task;
use crate::tui::input::InputField;

/// Field order within the form.
pub const TEXT_FIELD: usize = 0;
pub const PRIORITY_FIELD: usize = 1;
pub const STATUS_FIELD: usize = 2;
pub const FIELD_COUNT: usize = 3;

/// State for the add/edit task popup.
pub struct TaskForm {
    pub text: InputField,
    pub priority: usize,
    pub status: usize,
    pub current_field: usize,
    pub priorities: Vec<Priority>,
    pub statuses: Vec<Status>,
    /// `Some(id)` while editing an existing task, `None` while adding.
    pub editing: Option<u64>,
}

impl TaskForm {
    /// A blank form with the creation defaults selected.
    pub fn new() -> Self {
        let priorities = vec![Priority::Low, Priority::Medium, Priority::High];
        let statuses = vec![Status::NotStarted, Status::InProgress, Status::Completed];
        TaskForm {
            text: InputField::new(),
            priority: priorities
                .iter()
                .position(|&p| p == Priority::default())
                .unwrap_or(0),
            status: statuses
                .iter()
                .position(|&s| s == Status::default())
                .unwrap_or(0),
            current_field: TEXT_FIELD,
            priorities,
            statuses,
            editing: None,
        }
    }

    /// A form pre-filled from an existing task, for editing.
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new();
        form.text = InputField::with_value(&task.text);
        form.priority = form
            .priorities
            .iter()
            .position(|&p| p == task.priority)
            .unwrap_or(form.priority);
        form.status = form
            .statuses
            .iter()
            .position(|&s| s == task.status)
            .unwrap_or(form.status);
        form.editing = Some(task.id);
        form
    }

    pub fn selected_priority(&self) -> Priority {
        self.priorities[self.priority]
    }

    pub fn selected_status(&self) -> Status {
        self.statuses[self.status]
    }

    /// Move focus to the next field.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    /// Move focus to the previous field.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
    }

    /// Type into the text field; selectors ignore characters.
    pub fn handle_char(&mut self, c: char) {
        if self.current_field == TEXT_FIELD {
            self.text.insert(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if self.current_field == TEXT_FIELD {
            self.text.backspace();
        }
    }

    /// Left/right: cursor movement in the text field, cycling on a selector.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            TEXT_FIELD => {
                if right {
                    self.text.move_right()
                } else {
                    self.text.move_left()
                }
            }
            PRIORITY_FIELD => {
                self.priority = cycle(self.priority, self.priorities.len(), right);
            }
            STATUS_FIELD => {
                self.status = cycle(self.status, self.statuses.len(), right);
            }
            _ => {}
        }
    }
}

fn cycle(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_selects_creation_defaults() {
        let form = TaskForm::new();
        assert_eq!(form.selected_priority(), Priority::Medium);
        assert_eq!(form.selected_status(), Status::NotStarted);
        assert!(form.editing.is_none());
    }

    #[test]
    fn from_task_prefills_every_field() {
        let task = Task::new(9, "Walk dog".into(), Priority::High, Status::InProgress);
        let form = TaskForm::from_task(&task);
        assert_eq!(form.text.value, "Walk dog");
        assert_eq!(form.selected_priority(), Priority::High);
        assert_eq!(form.selected_status(), Status::InProgress);
        assert_eq!(form.editing, Some(9));
    }

    #[test]
    fn selectors_cycle_in_both_directions() {
        let mut form = TaskForm::new();
        form.current_field = PRIORITY_FIELD;
        form.handle_left_right(true);
        assert_eq!(form.selected_priority(), Priority::High);
        form.handle_left_right(true);
        assert_eq!(form.selected_priority(), Priority::Low);
        form.handle_left_right(false);
        assert_eq!(form.selected_priority(), Priority::High);
    }
}
