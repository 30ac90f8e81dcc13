//! Trait abstraction for the submission client to enable mocking in tests

use super::SubmitError;
use crate::state::FormValues;
use async_trait::async_trait;

/// Sends completed forms to the persistence endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionClientTrait: Send + Sync {
    /// Persist one completed form. Any 2xx status counts as success.
    async fn create_person(&self, values: &FormValues) -> Result<(), SubmitError>;
}
