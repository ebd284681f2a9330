use thiserror::Error;

/// Failure of a single API call
#[derive(Error, Debug)]
pub enum CallError {
    #[error("authorization rejected (HTTP {0})")]
    Unauthorized(u16),

    #[error("authorization rejected after token refresh (HTTP {0})")]
    Rejected(u16),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("credential error: {0}")]
    Credential(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl CallError {
    /// Whether the retry policy may try the call again
    pub fn is_retryable(&self) -> bool {
        matches!(self, CallError::Status(_) | CallError::Transport(_))
    }

    /// Whether the failure is about the credential rather than the call
    pub fn is_auth(&self) -> bool {
        matches!(self, CallError::Rejected(_) | CallError::Credential(_))
    }

    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                CallError::Unauthorized(status.as_u16())
            }
            other => CallError::Status(other.as_u16()),
        }
    }
}
