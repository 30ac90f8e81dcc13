//! Form domain layer
//!
//! Field schema, validation rules, derived date composition and the
//! step-gated form state that drives the intake form.

mod date;
mod field;
mod form_state;
mod validation;

pub use field::{FieldId, FieldKind, FormValues, Step};
pub use form_state::{AdvanceOutcome, Form, FormState, IntakeForm, SubmissionBlocked};
