//! Submission error types

/// Errors from sending a completed form
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request never produced a response
    #[error("HTTP error calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The endpoint answered with a non-2xx status
    #[error("{url} returned {status}: {message}")]
    Rejected {
        url: String,
        status: u16,
        message: String,
    },
}

impl SubmitError {
    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Client(_) | Self::Transport { .. } => None,
        }
    }
}
