//! Submission gateway for the `createPerson` endpoint

mod client;
mod error;
mod gateway;
mod traits;

pub use client::SubmissionClient;
pub use error::SubmitError;
pub use gateway::{submit_form, SubmitOutcome};
pub use traits::SubmissionClientTrait;

#[cfg(test)]
pub use traits::MockSubmissionClientTrait;
