//! Typed API errors

use serde::Deserialize;
use thiserror::Error;

/// Failure talking to the GitHub REST API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("GitHub API error ({status} {reason}): {message}")]
    Status {
        status: u16,
        reason: String,
        message: String,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    pub(crate) fn from_response(status: u16, reason: Option<&str>, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.trim().to_string()
                }
            });

        ApiError::Status {
            status,
            reason: reason.unwrap_or("Unknown").to_string(),
            message,
        }
    }

    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { .. } => None,
            ApiError::Status { status, .. } => Some(*status),
        }
    }

    /// Whether repeating the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
        }
    }
}

/// Classify an error coming out of any client call
pub fn is_transient(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<ApiError>()
        .is_some_and(ApiError::is_transient)
}
