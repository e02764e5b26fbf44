//! Error taxonomy for a run
//!
//! Credential errors are recoverable by asking for another token, item
//! errors are folded into the [`RunSummary`](crate::pool::RunSummary), and
//! everything else ends the run through [`RunError`].

use crate::constants::{credentials::TOKEN_LENGTH, exit};
use serde::Serialize;
use thiserror::Error;

/// Why a token was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Rejected locally, before any request was made
    #[error(
        "GitHub token must be {} characters long (letters, digits and underscores)",
        TOKEN_LENGTH
    )]
    Format,

    /// GitHub refused the token or could not be reached
    #[error("credential rejected by server")]
    Rejected,

    /// The token authenticates but lacks a required scope
    #[error("missing scope: {0}")]
    MissingScope(String),
}

/// Fatal failure while enumerating organizations or repositories
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("failed to list {what} (page {page}): {cause:#}")]
    Request {
        what: String,
        page: u32,
        cause: anyhow::Error,
    },

    #[error("listing {what} did not finish within {max_pages} pages")]
    PageLimit { what: String, max_pages: u32 },
}

/// A single repository update that did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{repository}: {message}")]
pub struct ItemMutationError {
    pub repository: String,
    pub message: String,
}

/// Anything that ends a run early
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error("no organizations are visible to {login}")]
    NoOrganizations { login: String },

    #[error("organization '{0}' is not visible to this token")]
    UnknownOrganization(String),

    #[error("no valid GitHub token after {0} attempt(s)")]
    CredentialAttemptsExhausted(u32),

    #[error("aborted by operator")]
    Aborted,

    #[error("{0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl RunError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Aborted => exit::ABORTED,
            _ => exit::FAILURE,
        }
    }
}
