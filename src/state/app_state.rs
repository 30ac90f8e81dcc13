//! Application state definitions

use super::forms::{Form, FieldKind, IntakeForm};
use std::collections::VecDeque;

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Form
    pub form: IntakeForm,

    // UI state
    pub status_message: Option<String>,
    /// Endpoint shown in the status bar
    pub endpoint: String,

    // Errors awaiting acknowledgement, oldest first
    error_queue: VecDeque<String>,
}

impl AppState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    /// Move focus to the next field
    pub fn next_form_field(&mut self) {
        self.form.next_field();
    }

    /// Move focus to the previous field
    pub fn prev_form_field(&mut self) {
        self.form.prev_field();
    }

    /// Type a character into the focused field
    pub fn form_input_char(&mut self, c: char) {
        if let Some(field) = self.form.focused_field() {
            match field.kind() {
                FieldKind::Select(_) if c == ' ' => self.form.state.cycle_option(field, true),
                _ => {
                    self.form.state.push_char(field, c);
                }
            }
        }
    }

    /// Delete the last character of the focused field
    pub fn form_backspace(&mut self) {
        if let Some(field) = self.form.focused_field() {
            self.form.state.pop_char(field);
        }
    }

    /// Insert a newline when the focused field is multi-line
    pub fn form_newline(&mut self) -> bool {
        match self.form.focused_field() {
            Some(field) if field.kind() == FieldKind::TextArea => {
                self.form.state.push_char(field, '\n');
                true
            }
            _ => false,
        }
    }

    /// Cycle the focused select field; no-op for other kinds
    pub fn form_cycle_option(&mut self, forward: bool) {
        if let Some(field) = self.form.focused_field() {
            self.form.state.cycle_option(field, forward);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldId, Step};

    mod error_queue {
        use super::*;

        #[test]
        fn test_errors_are_shown_oldest_first() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_dismiss_on_empty_is_noop() {
            let mut state = AppState::default();
            state.dismiss_error();
            assert!(state.current_error().is_none());
        }
    }

    mod input_routing {
        use super::*;

        #[test]
        fn test_chars_go_to_focused_field() {
            let mut state = AppState::default();
            state.form_input_char('A');
            state.form_input_char('d');
            state.form_input_char('a');
            assert_eq!(state.form.state.value(FieldId::FirstName), "Ada");
            state.form_backspace();
            assert_eq!(state.form.state.value(FieldId::FirstName), "Ad");
        }

        #[test]
        fn test_chars_on_button_row_are_ignored() {
            let mut state = AppState::default();
            state.form.prev_field();
            state.form_input_char('x');
            assert_eq!(state.form.state.values(), &Default::default());
        }

        #[test]
        fn test_space_cycles_select() {
            let mut state = AppState::default();
            state.form.state.set_value(FieldId::FirstName, "Ada");
            state.form.state.set_value(FieldId::LastName, "Lovelace");
            state.form.state.set_value(FieldId::Email, "ada@example.com");
            state.form.advance();
            assert_eq!(state.form.state.current_step(), Step::Two);
            state.next_form_field(); // gender
            state.form_input_char(' ');
            assert_eq!(state.form.state.value(FieldId::Gender), "Male");
            state.form_cycle_option(false);
            assert_eq!(state.form.state.value(FieldId::Gender), "Select Gender");
        }

        #[test]
        fn test_newline_only_in_text_area() {
            let mut state = AppState::default();
            assert!(!state.form_newline());
            state.form.state.set_value(FieldId::FirstName, "Ada");
            state.form.state.set_value(FieldId::LastName, "Lovelace");
            state.form.state.set_value(FieldId::Email, "ada@example.com");
            state.form.advance();
            state.form.state.set_value(FieldId::Mobile, "07123456789");
            state.form.state.set_value(FieldId::Gender, "Male");
            state.form.state.set_value(FieldId::DobDay, "01");
            state.form.state.set_value(FieldId::DobMonth, "01");
            state.form.state.set_value(FieldId::DobYear, "2000");
            state.form.advance();
            state.form_input_char('a');
            assert!(state.form_newline());
            state.form_input_char('b');
            assert_eq!(state.form.state.value(FieldId::Comments), "a\nb");
        }
    }
}
