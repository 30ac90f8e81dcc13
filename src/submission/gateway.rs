//! Drives one submission attempt against the form state

use super::traits::SubmissionClientTrait;
use crate::state::{IntakeForm, SubmissionBlocked};

/// What happened to a submission request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Persisted; the form is back to its initial state
    Submitted,
    /// Nothing was sent
    Blocked(SubmissionBlocked),
    /// Sent but failed; the form is unchanged apart from the submitting flag
    Failed(String),
}

/// Validate, send and settle the form.
///
/// The submitting flag is raised for the duration of the call and lowered on
/// every path. Only a successful response resets the form.
pub async fn submit_form(
    form: &mut IntakeForm,
    client: &dyn SubmissionClientTrait,
) -> SubmitOutcome {
    let values = match form.state.begin_submission() {
        Ok(values) => values,
        Err(blocked) => {
            tracing::debug!("Submission not started: {blocked:?}");
            return SubmitOutcome::Blocked(blocked);
        }
    };

    match client.create_person(&values).await {
        Ok(()) => {
            form.finish_submission(true);
            SubmitOutcome::Submitted
        }
        Err(err) => {
            tracing::warn!(status = ?err.status(), "Submission failed: {err}");
            form.finish_submission(false);
            SubmitOutcome::Failed(err.to_string())
        }
    }
}
