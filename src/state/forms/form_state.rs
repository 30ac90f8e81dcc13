//! Form state, step gating and focus handling

use super::date::compose_dob;
use super::field::{FieldId, FieldKind, FormValues, Step, FIELD_COUNT};
use super::validation::validate;

/// Trait for common form focus operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Result of asking to leave a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved on to the given step
    Advanced(Step),
    /// The terminal step is valid; the caller should submit
    ReadyToSubmit,
    /// Step is incomplete; its fields are now touched
    Blocked,
}

/// Why a submission could not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionBlocked {
    /// Another submission has not finished yet
    InFlight,
    /// At least one field fails validation; all fields are now touched
    Invalid,
}

/// Values, touched flags and errors for the whole intake form
#[derive(Debug, Clone)]
pub struct FormState {
    values: FormValues,
    touched: [bool; FIELD_COUNT],
    errors: [Option<&'static str>; FIELD_COUNT],
    edited: [bool; 3],
    current_step: Step,
    submitting: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        let mut state = Self {
            values: FormValues::default(),
            touched: [false; FIELD_COUNT],
            errors: [None; FIELD_COUNT],
            edited: [false; 3],
            current_step: Step::One,
            submitting: false,
        };
        state.revalidate();
        state
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(field)
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_touched(&self, field: FieldId) -> bool {
        self.touched[field.index()]
    }

    /// Validation error regardless of touched state
    pub fn error(&self, field: FieldId) -> Option<&'static str> {
        self.errors[field.index()]
    }

    /// Validation error, only once the field has been touched
    pub fn visible_error(&self, field: FieldId) -> Option<&'static str> {
        if self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }

    pub fn is_step_edited(&self, step: Step) -> bool {
        self.edited[step_slot(step)]
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(Option::is_some)
    }

    /// Replace a field's value.
    ///
    /// Marks the field touched and its step edited, keeps the derived date in
    /// sync and recomputes every error. Derived fields cannot be set directly.
    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) {
        if field.is_derived() {
            tracing::debug!("Ignoring direct write to derived field {field:?}");
            return;
        }
        *self.values.get_mut(field) = value.into();
        self.touched[field.index()] = true;
        self.edited[step_slot(field.step())] = true;
        if field.is_date_part() {
            self.values.dob = compose_dob(
                &self.values.dob_day,
                &self.values.dob_month,
                &self.values.dob_year,
            );
        }
        self.revalidate();
    }

    /// Append a typed character, honouring the field's maximum length.
    /// Returns false when the character was refused.
    pub fn push_char(&mut self, field: FieldId, c: char) -> bool {
        if matches!(field.kind(), FieldKind::Select(_) | FieldKind::Hidden) {
            return false;
        }
        let current = self.values.get(field);
        if let Some(max) = field.max_len() {
            if current.chars().count() >= max {
                return false;
            }
        }
        let mut value = current.to_string();
        value.push(c);
        self.set_value(field, value);
        true
    }

    /// Remove the last character of a text field
    pub fn pop_char(&mut self, field: FieldId) {
        if matches!(field.kind(), FieldKind::Select(_) | FieldKind::Hidden) {
            return;
        }
        let mut value = self.values.get(field).to_string();
        if value.pop().is_some() {
            self.set_value(field, value);
        }
    }

    /// Move a select field to its next (or previous) option
    pub fn cycle_option(&mut self, field: FieldId, forward: bool) {
        let FieldKind::Select(options) = field.kind() else {
            return;
        };
        let current = options
            .iter()
            .position(|o| *o == self.values.get(field))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else if current == 0 {
            options.len() - 1
        } else {
            current - 1
        };
        self.set_value(field, options[next]);
    }

    /// Mark a field touched when focus leaves it
    pub fn blur(&mut self, field: FieldId) {
        self.touched[field.index()] = true;
    }

    /// Whether the user may leave `step`.
    ///
    /// Steps before the terminal one must have been edited at least once and
    /// hold no errors; the terminal step only needs to be error-free.
    pub fn can_advance(&self, step: Step) -> bool {
        if !step.is_terminal() && !self.is_step_edited(step) {
            return false;
        }
        step.fields().all(|f| self.error(f).is_none())
    }

    /// Try to leave `step`, touching its fields when that is not allowed
    pub fn request_advance(&mut self, step: Step) -> AdvanceOutcome {
        if !self.can_advance(step) {
            for field in step.fields() {
                self.touched[field.index()] = true;
            }
            tracing::debug!("Advance from step {} blocked", step.number());
            return AdvanceOutcome::Blocked;
        }
        match step.next() {
            Some(next) => {
                tracing::debug!("Advancing from step {} to {}", step.number(), next.number());
                self.current_step = next;
                AdvanceOutcome::Advanced(next)
            }
            None => AdvanceOutcome::ReadyToSubmit,
        }
    }

    /// Validate the whole form and raise the submitting flag.
    ///
    /// On success returns the values to send. Refuses while another
    /// submission is in flight, and touches every field when anything is
    /// invalid.
    pub fn begin_submission(&mut self) -> Result<FormValues, SubmissionBlocked> {
        if self.submitting {
            return Err(SubmissionBlocked::InFlight);
        }
        if self.has_errors() {
            let invalid: Vec<&str> = FieldId::ALL
                .into_iter()
                .filter(|f| self.error(*f).is_some())
                .map(FieldId::wire_key)
                .collect();
            tracing::debug!("Submission refused, invalid fields: {invalid:?}");
            self.touched = [true; FIELD_COUNT];
            return Err(SubmissionBlocked::Invalid);
        }
        self.submitting = true;
        Ok(self.values.clone())
    }

    /// Lower the submitting flag; a successful submission also resets the form
    pub fn finish_submission(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.reset();
        }
    }

    /// Return to the initial empty state on step one
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn revalidate(&mut self) {
        for field in FieldId::ALL {
            self.errors[field.index()] = validate(field, &self.values);
        }
    }
}

fn step_slot(step: Step) -> usize {
    usize::from(step.number() - 1)
}

/// Form state plus keyboard focus within the current step.
///
/// Focus indexes run over the step's editable fields followed by one slot
/// for the action button.
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    pub state: FormState,
    pub active_field_index: usize,
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editable fields of the current step in focus order
    pub fn focusable_fields(&self) -> Vec<FieldId> {
        self.state.current_step().editable_fields()
    }

    /// Field under focus, or `None` when the button row is focused
    pub fn focused_field(&self) -> Option<FieldId> {
        self.focusable_fields().get(self.active_field_index).copied()
    }

    /// Returns true if the button row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.focused_field().is_none()
    }

    /// Ask to leave the current step; focus returns to the top on success
    pub fn advance(&mut self) -> AdvanceOutcome {
        let outcome = self.state.request_advance(self.state.current_step());
        if let AdvanceOutcome::Advanced(_) = outcome {
            self.active_field_index = 0;
        }
        outcome
    }

    /// Apply the outcome of a submission and refocus after a reset
    pub fn finish_submission(&mut self, succeeded: bool) {
        self.state.finish_submission(succeeded);
        if succeeded {
            self.active_field_index = 0;
        }
    }
}

impl Form for IntakeForm {
    fn field_count(&self) -> usize {
        self.focusable_fields().len() + 1 // fields + button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        if let Some(left) = self.focused_field() {
            self.state.blur(left);
        }
        self.active_field_index = index.min(self.field_count() - 1);
    }
}
