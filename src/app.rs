//! Application state and core logic

use crate::config::IntakeConfig;
use crate::state::{AdvanceOutcome, AppState, FieldKind, SubmissionBlocked};
use crate::submission::{submit_form, SubmissionClient, SubmissionClientTrait, SubmitOutcome};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const FIX_FIELDS_MESSAGE: &str = "Please fix the highlighted fields";

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Client used for the final submission
    client: Box<dyn SubmissionClientTrait>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from configuration
    pub fn new(config: &IntakeConfig) -> Result<Self> {
        let client = SubmissionClient::from_config(config)?;
        tracing::info!("Submissions will be sent to {}", client.url());
        let state = AppState::new(client.url());
        Ok(Self::with_client(state, Box::new(client)))
    }

    /// Create an App around an existing client
    pub fn with_client(state: AppState, client: Box<dyn SubmissionClientTrait>) -> Self {
        Self {
            state,
            client,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Request a clean exit
    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        let on_button = self.state.form.is_buttons_row_active();
        let on_select = self
            .state
            .form
            .focused_field()
            .is_some_and(|f| matches!(f.kind(), FieldKind::Select(_)));

        match key.code {
            KeyCode::Tab => self.state.next_form_field(),
            KeyCode::BackTab => self.state.prev_form_field(),
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.activate_step_action().await;
            }
            KeyCode::Char('w') if key.modifiers.contains(crate::platform::ACTION_MODIFIER) => {
                self.activate_step_action().await;
            }
            KeyCode::Enter if on_button => self.activate_step_action().await,
            KeyCode::Enter => {
                // Enter in a multi-line field adds a newline, elsewhere moves on
                if !self.state.form_newline() {
                    self.state.next_form_field();
                }
            }
            KeyCode::Left if on_select => self.state.form_cycle_option(false),
            KeyCode::Right if on_select => self.state.form_cycle_option(true),
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
            // Form field input (only when not on the button row)
            KeyCode::Char(c) if !on_button => self.state.form_input_char(c),
            KeyCode::Backspace if !on_button => self.state.form_backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Run the current step's button: advance, or submit from the last step
    async fn activate_step_action(&mut self) {
        match self.state.form.advance() {
            AdvanceOutcome::Advanced(step) => {
                self.state.status_message =
                    Some(format!("Step {}: {}", step.number(), step.title()));
            }
            AdvanceOutcome::Blocked => {
                self.state.status_message = Some(FIX_FIELDS_MESSAGE.to_string());
            }
            AdvanceOutcome::ReadyToSubmit => self.submit().await,
        }
    }

    /// Send the completed form
    async fn submit(&mut self) {
        match submit_form(&mut self.state.form, self.client.as_ref()).await {
            SubmitOutcome::Submitted => {
                self.state.status_message = Some("Thank you, your details were sent".to_string());
            }
            SubmitOutcome::Blocked(SubmissionBlocked::Invalid) => {
                self.state.status_message = Some(FIX_FIELDS_MESSAGE.to_string());
            }
            SubmitOutcome::Blocked(SubmissionBlocked::InFlight) => {
                self.state.status_message = Some("Submission already in progress".to_string());
            }
            SubmitOutcome::Failed(reason) => {
                self.push_error(format!(
                    "Your details could not be sent. Nothing was lost; press {} to try again.\n\n{reason}",
                    crate::platform::SAVE_SHORTCUT
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldId, FormValues, Step};
    use crate::submission::{MockSubmissionClientTrait, SubmitError};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(client: MockSubmissionClientTrait) -> App {
        App::with_client(AppState::new("http://test"), Box::new(client))
    }

    async fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Fill steps one and two through the keyboard, ending on step three
    async fn fill_to_step_three(app: &mut App) {
        type_str(app, "Ada").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_str(app, "Lovelace").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_str(app, "ada@example.com").await;
        app.handle_key(ctrl('s')).await.unwrap();
        assert_eq!(app.state.form.state.current_step(), Step::Two);

        type_str(app, "07123456789").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_str(app, "05").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_str(app, "12").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_str(app, "1990").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.form.state.current_step(), Step::Three);
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_should_quit_initially_false() {
            let app = app_with(MockSubmissionClientTrait::new());
            assert!(!app.should_quit());
        }

        #[tokio::test]
        async fn test_blocked_advance_sets_status_and_touches() {
            let mut app = app_with(MockSubmissionClientTrait::new());
            app.handle_key(ctrl('s')).await.unwrap();
            assert_eq!(app.state.form.state.current_step(), Step::One);
            assert_eq!(app.state.status_message.as_deref(), Some(FIX_FIELDS_MESSAGE));
            assert!(app.state.form.state.is_touched(FieldId::Email));
        }

        #[tokio::test]
        async fn test_enter_on_text_field_moves_focus() {
            let mut app = app_with(MockSubmissionClientTrait::new());
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.form.focused_field(), Some(FieldId::LastName));
        }

        #[tokio::test]
        async fn test_keyboard_fill_composes_dob() {
            let mut app = app_with(MockSubmissionClientTrait::new());
            fill_to_step_three(&mut app).await;
            assert_eq!(app.state.form.state.value(FieldId::Dob), "05/12/1990");
            assert_eq!(app.state.form.state.value(FieldId::Gender), "Female");
        }

        #[tokio::test]
        async fn test_control_chars_are_not_typed() {
            let mut app = app_with(MockSubmissionClientTrait::new());
            app.handle_key(ctrl('x')).await.unwrap();
            assert_eq!(app.state.form.state.value(FieldId::FirstName), "");
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_successful_submit_resets_form() {
            let mut client = MockSubmissionClientTrait::new();
            client
                .expect_create_person()
                .withf(|values: &FormValues| values.comments == "hi\nthere")
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(client);

            fill_to_step_three(&mut app).await;
            type_str(&mut app, "hi").await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            type_str(&mut app, "there").await;
            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(app.state.form.state.current_step(), Step::One);
            assert_eq!(app.state.form.state.values(), &FormValues::default());
            assert!(!app.state.has_errors());
        }

        #[tokio::test]
        async fn test_failed_submit_shows_error_and_keeps_values() {
            let mut client = MockSubmissionClientTrait::new();
            client.expect_create_person().times(1).returning(|_| {
                Err(SubmitError::Rejected {
                    url: "http://test/api/createPerson".to_string(),
                    status: 500,
                    message: "failure".to_string(),
                })
            });
            let mut app = app_with(client);

            fill_to_step_three(&mut app).await;
            let before = app.state.form.state.values().clone();
            app.handle_key(ctrl('s')).await.unwrap();

            assert!(app.state.has_errors());
            assert!(app.state.current_error().unwrap().contains("500"));
            assert_eq!(app.state.form.state.current_step(), Step::Three);
            assert_eq!(app.state.form.state.values(), &before);
            assert!(!app.state.form.state.is_submitting());
        }

        #[test]
        fn test_error_dialog_swallows_keys_until_dismissed() {
            let mut app = app_with(MockSubmissionClientTrait::new());
            app.push_error("boom");
            tokio_test::block_on(async {
                app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
                assert_eq!(app.state.form.state.value(FieldId::FirstName), "");
                app.handle_key(key(KeyCode::Esc)).await.unwrap();
                assert!(!app.state.has_errors());
                app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            });
            assert_eq!(app.state.form.state.value(FieldId::FirstName), "x");
        }
    }
}
