//! Application state definitions

use super::notices::NoticeBoard;
use super::returns::ReturnsTable;
use super::route::{Route, Router};

/// Buttons under the wizard fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormButton {
    Back,
    #[default]
    Continue,
}

impl FormButton {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Back => Self::Continue,
            Self::Continue => Self::Back,
        };
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub router: Router,
    pub notices: NoticeBoard,
    pub returns: ReturnsTable,

    // Wizard focus; `active_form_field == field_count` means the button row
    pub active_form_field: usize,
    pub form_selected_button: FormButton,
}

impl AppState {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            returns: ReturnsTable::new(rows_per_page),
            ..Default::default()
        }
    }

    pub fn current_route(&self) -> Route {
        self.router.current()
    }

    /// Push an error message to the queue
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.notices.push_error(message);
    }

    /// Check if there are any errors to display
    pub fn has_errors(&self) -> bool {
        self.notices.has_errors()
    }

    /// Dismiss the current error (removes from front of queue)
    pub fn dismiss_error(&mut self) {
        self.notices.dismiss_error();
    }

    /// Move to next form field, wrapping through the button row
    pub fn next_form_field(&mut self, field_count: usize) {
        self.active_form_field = (self.active_form_field + 1) % (field_count + 1);
    }

    /// Move to previous form field
    pub fn prev_form_field(&mut self, field_count: usize) {
        if self.active_form_field == 0 {
            self.active_form_field = field_count;
        } else {
            self.active_form_field -= 1;
        }
    }

    pub fn on_button_row(&self, field_count: usize) -> bool {
        self.active_form_field >= field_count
    }

    /// Clear form focus
    pub fn reset_form_focus(&mut self) {
        self.active_form_field = 0;
        self.form_selected_button = FormButton::default();
    }
}
